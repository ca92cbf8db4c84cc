//! Fallback location configuration.

use serde::{Deserialize, Serialize};

/// Location used when the operator leaves the form empty or geocoding fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Fallback city.
    #[serde(default = "default_city")]
    pub city: String,
    /// Fallback country.
    #[serde(default = "default_country")]
    pub country: String,
    /// Latitude prefilled in the GPS form.
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    /// Longitude prefilled in the GPS form.
    #[serde(default = "default_longitude")]
    pub longitude: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
            country: default_country(),
            latitude: default_latitude(),
            longitude: default_longitude(),
        }
    }
}

fn default_city() -> String {
    "Lomé".to_string()
}

fn default_country() -> String {
    "Togo".to_string()
}

fn default_latitude() -> f64 {
    6.17249
}

fn default_longitude() -> f64 {
    1.23136
}
