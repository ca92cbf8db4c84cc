//! Page presentation configuration.

use serde::{Deserialize, Serialize};

/// Settings for the rendered dashboard page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Page title and header.
    #[serde(default = "default_title")]
    pub title: String,
    /// Client re-poll interval once prayer times are shown, in seconds.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_seconds: u64,
    /// Footer caption: the credits line.
    #[serde(default = "default_footer")]
    pub footer: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            refresh_interval_seconds: default_refresh_interval(),
            footer: default_footer(),
        }
    }
}

fn default_title() -> String {
    "Masjid Nima Bernard-Kopé - Prayer Times".to_string()
}

fn default_refresh_interval() -> u64 {
    60
}

fn default_footer() -> String {
    "Développé par Yacoubou KOUMAI - © 2024 | v1.0.0".to_string()
}
