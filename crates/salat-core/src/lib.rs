//! # salat-core
//!
//! Core crate for Salat Board. Contains configuration schemas, the prayer
//! and offset domain types, the traits implemented by the cache and
//! upstream crates, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Salat Board crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
