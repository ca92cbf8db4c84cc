//! Cache provider configuration.

use serde::{Deserialize, Serialize};

/// In-memory cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries held in memory.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Upper bound on how long any entry lives, in seconds.
    #[serde(default = "default_max_ttl")]
    pub max_ttl_seconds: u64,
    /// Freshness window for prayer timing snapshots, in seconds.
    #[serde(default = "default_prayer_ttl")]
    pub prayer_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
            max_ttl_seconds: default_max_ttl(),
            prayer_ttl_seconds: default_prayer_ttl(),
        }
    }
}

fn default_max_capacity() -> u64 {
    10_000
}

fn default_max_ttl() -> u64 {
    // Revoked session ids must outlive the longest cookie expiry.
    90 * 24 * 3600
}

fn default_prayer_ttl() -> u64 {
    3600
}
