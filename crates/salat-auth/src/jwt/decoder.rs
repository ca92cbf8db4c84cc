//! Session token validation and revocation.

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use uuid::Uuid;

use salat_cache::keys;
use salat_cache::provider::CacheManager;
use salat_core::error::AppError;
use salat_core::traits::CacheProvider;

use crate::credentials::CookieSettings;

use super::claims::Claims;

/// Validates session tokens and checks the revocation list.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC key derived from `cookie.key`.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    /// Holds revoked token ids.
    cache: Arc<CacheManager>,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a decoder from the cookie parameters of the credential file.
    pub fn new(cookie: &CookieSettings, cache: Arc<CacheManager>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(cookie.key.as_bytes()),
            validation,
            cache,
        }
    }

    /// Decodes a token, rejecting bad signatures, expired tokens and
    /// revoked token ids.
    pub async fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Session has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid session signature")
                }
                _ => AppError::authentication(format!("Invalid session token: {e}")),
            },
        )?;

        if self.is_revoked(&data.claims.jti).await {
            return Err(AppError::authentication("Session has been revoked"));
        }

        Ok(data.claims)
    }

    async fn is_revoked(&self, jti: &Uuid) -> bool {
        let key = keys::session_revoked(&jti.to_string());
        self.cache.exists(&key).await.unwrap_or(false)
    }

    /// Marks a token id as revoked for the rest of its lifetime.
    pub async fn revoke(&self, jti: Uuid, remaining_ttl_seconds: u64) -> Result<(), AppError> {
        let key = keys::session_revoked(&jti.to_string());
        // Keep short-lived entries around long enough to cover the validation leeway.
        let ttl = Duration::from_secs(remaining_ttl_seconds.max(60));
        self.cache
            .set(&key, "revoked", ttl)
            .await
            .map_err(|e| AppError::internal(format!("Failed to revoke session: {e}")))
    }
}
