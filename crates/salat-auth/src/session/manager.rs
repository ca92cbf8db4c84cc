//! Session lifecycle manager: login, token validation, logout.

use std::sync::Arc;

use tracing::{debug, info, warn};

use salat_cache::provider::CacheManager;
use salat_core::config::AuthConfig;
use salat_core::error::AppError;

use crate::credentials::{CookieSettings, CredentialStore};
use crate::identity::{Identity, Role};
use crate::jwt::{Claims, JwtDecoder, JwtEncoder, SessionToken};
use crate::password::PasswordHasher;

/// Message shown for any failed login, whatever the cause.
const INVALID_CREDENTIALS: &str = "Username/password is incorrect";

/// Outcome of checking a request's credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    /// A valid session exists.
    Authenticated(Identity),
    /// Credentials were submitted and did not match.
    Rejected,
    /// Nothing usable was presented yet.
    Pending,
}

impl AuthStatus {
    /// The identity, if authenticated.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The authenticated identity.
    pub identity: Identity,
    /// Token to hand back as cookie or bearer token.
    pub token: SessionToken,
}

/// Manages the complete session lifecycle.
#[derive(Clone)]
pub struct SessionManager {
    /// Known users and cookie parameters.
    credentials: Arc<CredentialStore>,
    /// Token creation.
    jwt_encoder: Arc<JwtEncoder>,
    /// Token validation and revocation.
    jwt_decoder: Arc<JwtDecoder>,
    /// Password verification.
    password_hasher: Arc<PasswordHasher>,
    /// Auth configuration.
    auth_config: AuthConfig,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("auth_config", &self.auth_config)
            .field("users", &self.credentials.len())
            .finish()
    }
}

impl SessionManager {
    /// Wires a session manager around a loaded credential store.
    pub fn new(
        credentials: Arc<CredentialStore>,
        cache: Arc<CacheManager>,
        auth_config: AuthConfig,
    ) -> Self {
        let cookie = credentials.cookie();
        Self {
            jwt_encoder: Arc::new(JwtEncoder::new(cookie)),
            jwt_decoder: Arc::new(JwtDecoder::new(cookie, cache)),
            password_hasher: Arc::new(PasswordHasher::new()),
            credentials,
            auth_config,
        }
    }

    /// Cookie parameters for the session cookie.
    pub fn cookie(&self) -> &CookieSettings {
        self.credentials.cookie()
    }

    /// Verifies a username/password pair and issues a session token.
    ///
    /// Unknown users and wrong passwords fail identically. Attempts are not
    /// throttled here.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AppError> {
        let Some(record) = self.credentials.find(username) else {
            warn!(username = %username.trim(), "Login rejected: unknown user");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !self
            .password_hasher
            .verify_password(password, &record.password_hash)?
        {
            warn!(username = %record.username, "Login rejected: wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        let identity = Identity {
            username: record.username.clone(),
            display_name: record.display_name.clone(),
            role: Role::for_username(&record.username, &self.auth_config.admin_username),
        };
        let token = self.jwt_encoder.issue(&identity)?;

        info!(
            username = %identity.username,
            role = %identity.role,
            token_id = %token.token_id,
            "Login successful"
        );

        Ok(LoginResult { identity, token })
    }

    /// Resolves the status of a request from its session token, if any.
    ///
    /// A missing, malformed, expired or revoked token yields
    /// [`AuthStatus::Pending`], so the caller is asked to log in again.
    pub async fn authenticate(&self, token: Option<&str>) -> AuthStatus {
        let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
            return AuthStatus::Pending;
        };

        match self.validate(token).await {
            Ok((identity, _)) => AuthStatus::Authenticated(identity),
            Err(e) => {
                debug!(error = %e, "Session token not accepted");
                AuthStatus::Pending
            }
        }
    }

    /// Decodes a token and maps it back to a current identity.
    ///
    /// Tokens for users no longer in the credential file are rejected.
    pub async fn validate(&self, token: &str) -> Result<(Identity, Claims), AppError> {
        let claims = self.jwt_decoder.decode(token).await?;
        let record = self
            .credentials
            .find(&claims.sub)
            .ok_or_else(|| AppError::authentication("Unknown session user"))?;

        let identity = Identity {
            username: record.username.clone(),
            display_name: record.display_name.clone(),
            role: Role::for_username(&record.username, &self.auth_config.admin_username),
        };
        Ok((identity, claims))
    }

    /// Revokes the session behind `token`. Invalid tokens are ignored.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        let claims = match self.jwt_decoder.decode(token).await {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Logout with an unusable token");
                return Ok(());
            }
        };

        self.jwt_decoder
            .revoke(claims.jti, claims.remaining_ttl_seconds())
            .await?;

        info!(username = %claims.sub, token_id = %claims.jti, "Logout completed");
        Ok(())
    }
}
