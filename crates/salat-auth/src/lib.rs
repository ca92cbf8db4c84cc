//! # salat-auth
//!
//! Authentication for Salat Board.
//!
//! ## Modules
//!
//! - `credentials`: the static credential file (users + cookie parameters)
//! - `password`: Argon2id password hashing and verification
//! - `identity`: the authenticated identity and its role
//! - `jwt`: signed session token creation, validation, and revocation
//! - `session`: login/logout flows and the tri-state authentication result

pub mod credentials;
pub mod identity;
pub mod jwt;
pub mod password;
pub mod session;

pub use credentials::{CookieSettings, CredentialRecord, CredentialStore};
pub use identity::{Identity, Role};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use session::{AuthStatus, LoginResult, SessionManager};
