//! Traits for the external APIs the dashboard depends on.
//!
//! Implementations live in `salat-service::upstream`; tests substitute
//! in-memory fakes.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Coordinates, Location, PrayerTimings};

/// Why an upstream call produced no usable result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// Connection or protocol failure before a response arrived.
    #[error("transport error: {0}")]
    Transport(String),
    /// The request exceeded its timeout.
    #[error("request timed out")]
    Timeout,
    /// The upstream asked us to slow down (HTTP 429).
    #[error("rate limited by upstream")]
    RateLimited,
    /// Any other non-2xx status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
    /// The upstream answered but had nothing for the query.
    #[error("no result")]
    NoResult,
}

/// A Hijri calendar date as returned by the conversion API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HijriDate {
    /// Day of month.
    pub day: String,
    /// English month name.
    pub month: String,
    /// Hijri year.
    pub year: String,
}

impl HijriDate {
    /// Display form, e.g. `"16 Rabi' al-Thani 1448H"`.
    pub fn formatted(&self) -> String {
        format!("{} {} {}H", self.day, self.month, self.year)
    }
}

/// Daily prayer timings for a city.
#[async_trait]
pub trait PrayerTimesSource: Send + Sync + std::fmt::Debug + 'static {
    /// Fetches today's timings for `location`.
    async fn fetch_timings(&self, location: &Location) -> Result<PrayerTimings, UpstreamError>;
}

/// Gregorian to Hijri conversion.
#[async_trait]
pub trait HijriDateSource: Send + Sync + std::fmt::Debug + 'static {
    /// Converts a Gregorian date.
    async fn to_hijri(&self, date: NaiveDate) -> Result<HijriDate, UpstreamError>;
}

/// Coordinates to place-name lookup.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync + std::fmt::Debug + 'static {
    /// Resolves coordinates to a (city, country) pair.
    async fn reverse(&self, coordinates: Coordinates) -> Result<Location, UpstreamError>;
}
