//! # salat-api
//!
//! HTTP layer for Salat Board built on Axum.
//!
//! Serves the server-rendered page (login form and dashboard), the JSON API
//! under `/api`, middleware (request logging, login rate limiting, CORS,
//! compression), session extractors, DTOs, and error mapping.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod views;

pub use app::{build_app, build_state};
pub use state::AppState;
