//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Credential file location and login behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Path to the credential file (YAML or TOML, chosen by extension).
    #[serde(default = "default_credentials_path")]
    pub credentials_path: String,
    /// Username whose sessions may edit the offset configuration.
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    /// Login attempts allowed per client per minute. `0` disables throttling.
    #[serde(default)]
    pub login_rate_limit: u32,
    /// Key the login limit on `X-Forwarded-For` instead of the peer address.
    /// Only safe behind a proxy that overwrites the header.
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            credentials_path: default_credentials_path(),
            admin_username: default_admin_username(),
            login_rate_limit: 0,
            trust_forwarded_for: false,
        }
    }
}

fn default_credentials_path() -> String {
    "config.yaml".to_string()
}

fn default_admin_username() -> String {
    "admin".to_string()
}
