//! Composition of everything the page shows.

pub mod service;

pub use service::{Dashboard, DashboardService, PageHeader, PrayerCard};
