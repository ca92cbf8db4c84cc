//! Session token creation.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use salat_core::error::AppError;

use crate::credentials::CookieSettings;
use crate::identity::Identity;

use super::claims::Claims;

/// Creates signed session tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC key derived from `cookie.key`.
    encoding_key: EncodingKey,
    /// Token lifetime in days.
    ttl_days: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("ttl_days", &self.ttl_days)
            .finish()
    }
}

/// A freshly issued token.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SessionToken {
    /// Encoded token, stored in the session cookie.
    pub token: String,
    /// Token id.
    pub token_id: Uuid,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates an encoder from the cookie parameters of the credential file.
    pub fn new(cookie: &CookieSettings) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(cookie.key.as_bytes()),
            ttl_days: i64::from(cookie.expiry_days),
        }
    }

    /// Issues a token for an authenticated identity.
    pub fn issue(&self, identity: &Identity) -> Result<SessionToken, AppError> {
        let now = Utc::now();
        let expires_at = chrono::Duration::try_days(self.ttl_days)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::internal(format!(
                    "Session lifetime of {} days is out of range",
                    self.ttl_days
                ))
            })?;
        let claims = Claims {
            sub: identity.username.clone(),
            name: identity.display_name.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))?;

        Ok(SessionToken {
            token,
            token_id: claims.jti,
            expires_at,
        })
    }
}
