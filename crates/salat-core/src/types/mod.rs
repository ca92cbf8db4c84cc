//! Domain types shared across the Salat Board workspace.

pub mod location;
pub mod offsets;
pub mod prayer;
pub mod timings;

pub use location::{Coordinates, Location};
pub use offsets::{MAX_OFFSET_MINUTES, OffsetKind, OffsetTable};
pub use prayer::Prayer;
pub use timings::PrayerTimings;
