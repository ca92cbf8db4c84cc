//! Session lifecycle: login, validation, and logout.

pub mod manager;

pub use manager::{AuthStatus, LoginResult, SessionManager};
