//! # salat-service
//!
//! Business logic for Salat Board. Each service owns one concern and is
//! wired with constructor injection: upstream sources, the cache and the
//! clock are provided as `Arc` references so tests can swap in fakes.

pub mod calendar;
pub mod dashboard;
pub mod iqama;
pub mod location;
pub mod offsets;
pub mod prayer;
pub mod upstream;

pub use calendar::IslamicDateService;
pub use dashboard::{Dashboard, DashboardService, PrayerCard};
pub use location::{LocationMode, LocationRequest, LocationResolver, ResolvedLocation};
pub use offsets::{OffsetSnapshot, OffsetStore, OffsetUpdate};
pub use prayer::{PrayerTimeService, TimingsLookup};
pub use upstream::{AladhanClient, NominatimGeocoder};
