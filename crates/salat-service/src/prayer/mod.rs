//! Prayer timing lookup with a per-location freshness window.

pub mod service;

pub use service::{PrayerTimeService, TimingsLookup};
