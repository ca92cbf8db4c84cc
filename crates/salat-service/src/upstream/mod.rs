//! HTTP clients for the external APIs.
//!
//! - [`AladhanClient`] implements both prayer timings and Hijri conversion.
//! - [`NominatimGeocoder`] implements reverse geocoding.
//!
//! Every client uses the same `reqwest` setup: a fixed timeout, an
//! identifying User-Agent and no retries.

pub mod aladhan;
pub mod client;
pub mod nominatim;

pub use aladhan::AladhanClient;
pub use client::build_http_client;
pub use nominatim::NominatimGeocoder;
