//! # salat-cache
//!
//! Cache provider implementation for Salat Board, backed by an in-process
//! [moka](https://crates.io/crates/moka) cache with per-entry TTLs.
//!
//! Holds prayer timing snapshots and revoked session ids.

pub mod keys;
pub mod memory;
pub mod provider;

pub use provider::CacheManager;
