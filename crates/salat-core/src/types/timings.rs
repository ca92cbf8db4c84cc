//! Prayer timing snapshots.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Location, Prayer};

/// The five Adhan times for one location and day, as fetched upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerTimings {
    /// Location the timings were computed for.
    pub location: Location,
    /// When the snapshot was fetched.
    pub fetched_at: DateTime<Utc>,
    /// `HH:MM` local civil time per prayer.
    pub timings: BTreeMap<Prayer, String>,
}

impl PrayerTimings {
    /// The `HH:MM` string for a prayer, if present.
    pub fn get(&self, prayer: Prayer) -> Option<&str> {
        self.timings.get(&prayer).map(String::as_str)
    }
}
