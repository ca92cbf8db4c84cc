//! Core traits defined in `salat-core` and implemented by other crates.

pub mod cache;
pub mod clock;
pub mod upstream;

pub use cache::CacheProvider;
pub use clock::{Clock, ManualClock, SystemClock};
pub use upstream::{HijriDate, HijriDateSource, PrayerTimesSource, ReverseGeocoder, UpstreamError};
