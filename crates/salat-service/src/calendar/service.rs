//! Hijri date lookup. Not cached; one upstream call per page render.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::warn;

use salat_core::traits::{Clock, HijriDateSource};

/// Shown when the conversion API fails.
pub const UNKNOWN_HIJRI_DATE: &str = "date unknown";

/// Converts today's date to its Hijri form.
#[derive(Debug, Clone)]
pub struct IslamicDateService {
    source: Arc<dyn HijriDateSource>,
    clock: Arc<dyn Clock>,
}

impl IslamicDateService {
    /// Creates the service.
    pub fn new(source: Arc<dyn HijriDateSource>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }

    /// Today's date according to the clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }

    /// Hijri form of `date`, or [`UNKNOWN_HIJRI_DATE`] on failure.
    pub async fn hijri_label(&self, date: NaiveDate) -> String {
        match self.source.to_hijri(date).await {
            Ok(hijri) => hijri.formatted(),
            Err(e) => {
                warn!(%date, error = %e, "Hijri date unavailable");
                UNKNOWN_HIJRI_DATE.to_string()
            }
        }
    }

    /// Gregorian display form, e.g. `"18 October 2026"`.
    pub fn gregorian_label(date: NaiveDate) -> String {
        date.format("%d %B %Y").to_string()
    }
}
