//! Default Iqama and reminder offsets.

use serde::{Deserialize, Serialize};

use crate::types::OffsetTable;

/// Values the shared offset configuration starts from after every restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffsetDefaultsConfig {
    /// Minutes between Adhan and Iqama, per prayer.
    #[serde(default = "OffsetTable::default_iqama")]
    pub iqama: OffsetTable,
    /// Minutes before Adhan at which a reminder is due, per prayer.
    #[serde(default = "OffsetTable::default_reminder")]
    pub reminder: OffsetTable,
}

impl Default for OffsetDefaultsConfig {
    fn default() -> Self {
        Self {
            iqama: OffsetTable::default_iqama(),
            reminder: OffsetTable::default_reminder(),
        }
    }
}
