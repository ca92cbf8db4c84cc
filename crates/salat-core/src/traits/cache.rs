//! Key/value cache seam used for timing snapshots and revoked sessions.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// String-valued cache with per-entry expiry.
///
/// Expiry here only bounds memory; freshness of timing snapshots is judged
/// by the caller against its own clock.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Value under `key`, if present and not expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Stores `value`, evicting it after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// [`get`](Self::get) decoded from JSON.
    async fn get_json<T: serde::de::DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> AppResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key).await? {
            Some(value) => {
                let parsed = serde_json::from_str(&value)?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// [`set`](Self::set) with `value` encoded as JSON.
    async fn set_json<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()>
    where
        Self: Sized,
    {
        let json = serde_json::to_string(value)?;
        self.set(key, &json, ttl).await
    }

    /// Reported by `/api/health`.
    async fn health_check(&self) -> AppResult<bool>;
}
