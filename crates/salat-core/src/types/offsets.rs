//! Per-prayer minute offset tables.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::types::Prayer;

/// Largest offset the editor accepts, in minutes.
pub const MAX_OFFSET_MINUTES: u8 = 60;

/// Which of the two offset tables an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetKind {
    /// Minutes after Adhan at which the congregation starts.
    Iqama,
    /// Minutes before Adhan at which a reminder is due.
    Reminder,
}

impl fmt::Display for OffsetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iqama => f.write_str("iqama"),
            Self::Reminder => f.write_str("reminder"),
        }
    }
}

/// Minute offsets for each of the five prayers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OffsetTable {
    pub fajr: u8,
    pub dhuhr: u8,
    pub asr: u8,
    pub maghrib: u8,
    pub isha: u8,
}

impl OffsetTable {
    /// Iqama defaults used at first start.
    pub fn default_iqama() -> Self {
        Self {
            fajr: 10,
            dhuhr: 5,
            asr: 5,
            maghrib: 5,
            isha: 10,
        }
    }

    /// Reminder lead-time defaults used at first start.
    pub fn default_reminder() -> Self {
        Self {
            fajr: 15,
            dhuhr: 10,
            asr: 10,
            maghrib: 10,
            isha: 15,
        }
    }

    /// Offset for the given prayer.
    pub fn get(&self, prayer: Prayer) -> u8 {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    /// Sets the offset for one prayer, rejecting values above [`MAX_OFFSET_MINUTES`].
    pub fn set(&mut self, prayer: Prayer, minutes: u8) -> Result<(), AppError> {
        check_range(prayer, minutes)?;
        let slot = match prayer {
            Prayer::Fajr => &mut self.fajr,
            Prayer::Dhuhr => &mut self.dhuhr,
            Prayer::Asr => &mut self.asr,
            Prayer::Maghrib => &mut self.maghrib,
            Prayer::Isha => &mut self.isha,
        };
        *slot = minutes;
        Ok(())
    }

    /// Checks every entry is within range.
    pub fn validate(&self) -> Result<(), AppError> {
        Prayer::ALL
            .iter()
            .try_for_each(|p| check_range(*p, self.get(*p)))
    }

    /// `(prayer, minutes)` pairs in display order.
    pub fn entries(&self) -> impl Iterator<Item = (Prayer, u8)> + '_ {
        Prayer::ALL.iter().map(move |p| (*p, self.get(*p)))
    }
}

fn check_range(prayer: Prayer, minutes: u8) -> Result<(), AppError> {
    if minutes > MAX_OFFSET_MINUTES {
        return Err(AppError::validation(format!(
            "{prayer} offset must be between 0 and {MAX_OFFSET_MINUTES} minutes, got {minutes}"
        )));
    }
    Ok(())
}
