//! Request handlers.
//!
//! `page` serves the HTML surface; the other modules serve the JSON API
//! mounted under `/api`.

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod offsets;
pub mod page;
