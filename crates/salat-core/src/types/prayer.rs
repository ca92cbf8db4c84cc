//! The five canonical daily prayers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One of the five obligatory daily prayers, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Prayer {
    /// Dawn prayer.
    Fajr,
    /// Midday prayer.
    Dhuhr,
    /// Afternoon prayer.
    Asr,
    /// Sunset prayer.
    Maghrib,
    /// Night prayer.
    Isha,
}

impl Prayer {
    /// All prayers in display order.
    pub const ALL: [Prayer; 5] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// The key used by the timings API and in forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fajr => "Fajr",
            Self::Dhuhr => "Dhuhr",
            Self::Asr => "Asr",
            Self::Maghrib => "Maghrib",
            Self::Isha => "Isha",
        }
    }

    /// Position within [`Prayer::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Prayer {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fajr" => Ok(Self::Fajr),
            "dhuhr" | "zuhr" => Ok(Self::Dhuhr),
            "asr" => Ok(Self::Asr),
            "maghrib" => Ok(Self::Maghrib),
            "isha" => Ok(Self::Isha),
            _ => Err(AppError::validation(format!(
                "Unknown prayer '{s}'. Expected one of: Fajr, Dhuhr, Asr, Maghrib, Isha"
            ))),
        }
    }
}
