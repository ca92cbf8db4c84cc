//! External API configuration.

use serde::{Deserialize, Serialize};

/// Endpoints and request discipline for the timings, Hijri and geocoding APIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the AlAdhan API (timings and Hijri conversion).
    #[serde(default = "default_aladhan_base_url")]
    pub aladhan_base_url: String,
    /// Base URL of the Nominatim reverse geocoder.
    #[serde(default = "default_nominatim_base_url")]
    pub nominatim_base_url: String,
    /// AlAdhan calculation method identifier.
    #[serde(default = "default_calculation_method")]
    pub calculation_method: u8,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// User-Agent sent upstream (Nominatim requires an identifying agent).
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Preferred language for geocoder results.
    #[serde(default = "default_geocoder_language")]
    pub geocoder_language: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            aladhan_base_url: default_aladhan_base_url(),
            nominatim_base_url: default_nominatim_base_url(),
            calculation_method: default_calculation_method(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            geocoder_language: default_geocoder_language(),
        }
    }
}

fn default_aladhan_base_url() -> String {
    "http://api.aladhan.com".to_string()
}

fn default_nominatim_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_calculation_method() -> u8 {
    2
}

fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("salat-board/{}", env!("CARGO_PKG_VERSION"))
}

fn default_geocoder_language() -> String {
    "fr".to_string()
}
