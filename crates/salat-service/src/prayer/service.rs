//! Cached prayer timing lookups.
//!
//! Snapshots are cached by normalized (city, country). A snapshot is fresh
//! while `clock.now() - fetched_at` is below the configured TTL; fresh hits
//! never reach upstream. Failures are never cached and never retried.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use serde::Serialize;
use tracing::{debug, info, warn};

use salat_cache::keys;
use salat_cache::provider::CacheManager;
use salat_core::config::CacheConfig;
use salat_core::traits::{CacheProvider, Clock, PrayerTimesSource};
use salat_core::types::{Location, PrayerTimings};

/// Result of a timings lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TimingsLookup {
    /// Timings for the requested location.
    Available(PrayerTimings),
    /// Upstream failed; the page renders an error card instead.
    Unavailable {
        /// Short cause, for logs and the JSON API.
        reason: String,
    },
}

impl TimingsLookup {
    /// The snapshot, if available.
    pub fn timings(&self) -> Option<&PrayerTimings> {
        match self {
            Self::Available(timings) => Some(timings),
            Self::Unavailable { .. } => None,
        }
    }
}

/// Fetches prayer timings through the snapshot cache.
#[derive(Debug, Clone)]
pub struct PrayerTimeService {
    source: Arc<dyn PrayerTimesSource>,
    cache: Arc<CacheManager>,
    clock: Arc<dyn Clock>,
    ttl: chrono::Duration,
    /// One in-flight fetch per cache key.
    inflight: Arc<DashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

/// Membership in a key's fetch gate. Dropping it, also when the request is
/// abandoned mid-fetch, removes the gate once nobody else holds it.
struct GateTicket<'a> {
    inflight: &'a DashMap<String, Arc<tokio::sync::Mutex<()>>>,
    key: &'a str,
    gate: Arc<tokio::sync::Mutex<()>>,
}

impl Drop for GateTicket<'_> {
    fn drop(&mut self) {
        // Map entry plus ours: nobody else is waiting.
        self.inflight
            .remove_if(self.key, |_, gate| Arc::strong_count(gate) <= 2);
    }
}

impl PrayerTimeService {
    /// Creates the service.
    pub fn new(
        source: Arc<dyn PrayerTimesSource>,
        cache: Arc<CacheManager>,
        clock: Arc<dyn Clock>,
        config: &CacheConfig,
    ) -> Self {
        Self {
            source,
            cache,
            clock,
            ttl: chrono::Duration::seconds(config.prayer_ttl_seconds as i64),
            inflight: Arc::new(DashMap::new()),
        }
    }

    /// Today's timings for `location`, from cache when fresh.
    pub async fn timings(&self, location: &Location) -> TimingsLookup {
        let key = keys::prayer_timings(location);

        if let Some(snapshot) = self.fresh_snapshot(&key).await {
            debug!(%location, "Prayer timings served from cache");
            return TimingsLookup::Available(snapshot);
        }

        let ticket = self.enter_gate(&key);
        let _guard = ticket.gate.lock().await;
        // Another request may have filled the cache while we waited.
        match self.fresh_snapshot(&key).await {
            Some(snapshot) => TimingsLookup::Available(snapshot),
            None => self.fetch_and_store(&key, location).await,
        }
    }

    async fn fresh_snapshot(&self, key: &str) -> Option<PrayerTimings> {
        let cached: Option<PrayerTimings> = match self.cache.get_json(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Failed to read cached timings");
                None
            }
        };
        cached.filter(|snapshot| self.clock.now() - snapshot.fetched_at < self.ttl)
    }

    async fn fetch_and_store(&self, key: &str, location: &Location) -> TimingsLookup {
        match self.source.fetch_timings(location).await {
            Ok(mut snapshot) => {
                snapshot.fetched_at = self.clock.now();
                let ttl = Duration::from_secs(self.ttl.num_seconds().max(1) as u64);
                if let Err(e) = self.cache.set_json(key, &snapshot, ttl).await {
                    warn!(key, error = %e, "Failed to cache timings");
                }
                info!(%location, "Prayer timings fetched");
                TimingsLookup::Available(snapshot)
            }
            Err(e) => {
                warn!(%location, error = %e, "Prayer timings unavailable");
                TimingsLookup::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn enter_gate<'a>(&'a self, key: &'a str) -> GateTicket<'a> {
        let gate = self.inflight.entry(key.to_string()).or_default().clone();
        GateTicket {
            inflight: &self.inflight,
            key,
            gate,
        }
    }
}
