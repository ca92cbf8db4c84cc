//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! `config/default.toml`, an optional environment overlay, and `SALAT__*`
//! environment variables. Every field carries a serde default so an empty
//! file still yields a runnable configuration.

pub mod app;
pub mod auth;
pub mod cache;
pub mod location;
pub mod logging;
pub mod offsets;
pub mod page;
pub mod upstream;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::cache::CacheConfig;
pub use self::location::LocationConfig;
pub use self::logging::LoggingConfig;
pub use self::offsets::OffsetDefaultsConfig;
pub use self::page::PageConfig;
pub use self::upstream::UpstreamConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Credential file and login settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Prayer-time cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// External API settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Fallback location settings.
    #[serde(default)]
    pub location: LocationConfig,
    /// Default Iqama and reminder offsets.
    #[serde(default)]
    pub offsets: OffsetDefaultsConfig,
    /// Page presentation settings.
    #[serde(default)]
    pub page: PageConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default` with the `config/{env}` overlay and
    /// environment variables prefixed with `SALAT__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SALAT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Load configuration from a single explicit file, no overlay.
    pub fn load_file(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
