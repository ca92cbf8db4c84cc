//! The credential file loaded once at startup.

pub mod store;

pub use store::{CookieSettings, CredentialRecord, CredentialStore};
