//! Gregorian and Hijri dates for the page header.

pub mod service;

pub use service::{IslamicDateService, UNKNOWN_HIJRI_DATE};
