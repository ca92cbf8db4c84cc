//! Builds the dashboard view model shared by the HTML page and the JSON API.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use salat_auth::Identity;
use salat_core::config::PageConfig;
use salat_core::error::AppError;
use salat_core::types::{Location, Prayer, PrayerTimings};

use crate::calendar::IslamicDateService;
use crate::iqama;
use crate::location::{LocationRequest, LocationResolver, ResolvedLocation};
use crate::offsets::{OffsetSnapshot, OffsetStore};
use crate::prayer::{PrayerTimeService, TimingsLookup};

/// Title line plus dates, shown on every page including the login form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageHeader {
    /// Page title.
    pub title: String,
    /// Location displayed under the title.
    pub location: Location,
    /// e.g. `"18 October 2026"`.
    pub gregorian_date: String,
    /// e.g. `"6 Jumādá al-ūlá 1448H"`, or the unknown-date fallback.
    pub hijri_date: String,
}

/// One prayer with its computed Iqama and reminder times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrayerCard {
    /// Which prayer.
    pub prayer: Prayer,
    /// Adhan time, `HH:MM`.
    pub adhan: String,
    /// Adhan plus the Iqama offset.
    pub iqama: String,
    /// Iqama offset in minutes.
    pub iqama_offset: u8,
    /// Adhan minus the reminder lead.
    pub reminder: String,
    /// Reminder lead in minutes.
    pub reminder_lead: u8,
}

/// Everything an authenticated page render needs.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    /// Title and dates.
    pub header: PageHeader,
    /// Resolved location, with any fallback warning.
    pub location: ResolvedLocation,
    /// Cards in prayer order, absent when timings are unavailable.
    pub prayers: Option<Vec<PrayerCard>>,
    /// Why timings are unavailable.
    pub unavailable_reason: Option<String>,
    /// Current offsets, only for the administrator.
    pub offsets: Option<OffsetSnapshot>,
    /// Client re-poll interval; only set when timings are shown.
    pub refresh_interval_seconds: Option<u64>,
    /// Footer caption.
    pub footer: String,
    /// Who is looking.
    pub viewer: Identity,
}

/// Composes location, timings, dates and offsets.
#[derive(Debug, Clone)]
pub struct DashboardService {
    resolver: Arc<LocationResolver>,
    prayers: Arc<PrayerTimeService>,
    calendar: Arc<IslamicDateService>,
    offsets: Arc<OffsetStore>,
    page: PageConfig,
}

impl DashboardService {
    /// Creates the service.
    pub fn new(
        resolver: Arc<LocationResolver>,
        prayers: Arc<PrayerTimeService>,
        calendar: Arc<IslamicDateService>,
        offsets: Arc<OffsetStore>,
        page: PageConfig,
    ) -> Self {
        Self {
            resolver,
            prayers,
            calendar,
            offsets,
            page,
        }
    }

    /// Page settings.
    pub fn page(&self) -> &PageConfig {
        &self.page
    }

    /// The location resolver, for prefilling forms.
    pub fn resolver(&self) -> &LocationResolver {
        &self.resolver
    }

    /// Header for the default location, used on the login page.
    pub async fn header(&self) -> PageHeader {
        self.header_for(self.resolver.default_location().clone()).await
    }

    async fn header_for(&self, location: Location) -> PageHeader {
        let today = self.calendar.today();
        PageHeader {
            title: self.page.title.clone(),
            location,
            gregorian_date: IslamicDateService::gregorian_label(today),
            hijri_date: self.calendar.hijri_label(today).await,
        }
    }

    /// Builds the dashboard for an authenticated viewer.
    pub async fn build(&self, viewer: &Identity, request: &LocationRequest) -> Dashboard {
        let location = self.resolver.resolve(request).await;

        let (header, lookup, offsets) = tokio::join!(
            self.header_for(location.location.clone()),
            self.prayers.timings(&location.location),
            self.offsets.snapshot(),
        );

        let (prayers, unavailable_reason) = match lookup {
            TimingsLookup::Available(timings) => match prayer_cards(&timings, &offsets) {
                Ok(cards) => (Some(cards), None),
                Err(e) => {
                    warn!(location = %location.location, error = %e, "Unusable timings");
                    (None, Some(e.message))
                }
            },
            TimingsLookup::Unavailable { reason } => (None, Some(reason)),
        };

        let refresh_interval_seconds = prayers
            .as_ref()
            .map(|_| self.page.refresh_interval_seconds);

        Dashboard {
            header,
            location,
            prayers,
            unavailable_reason,
            offsets: viewer.is_admin().then_some(offsets),
            refresh_interval_seconds,
            footer: self.page.footer.clone(),
            viewer: viewer.clone(),
        }
    }
}

/// Computes the five cards from a snapshot and the current offsets.
pub fn prayer_cards(
    timings: &PrayerTimings,
    offsets: &OffsetSnapshot,
) -> Result<Vec<PrayerCard>, AppError> {
    Prayer::ALL
        .iter()
        .map(|prayer| {
            let adhan = timings
                .get(*prayer)
                .ok_or_else(|| AppError::validation(format!("Missing timing for {prayer}")))?;
            let iqama_offset = offsets.iqama.get(*prayer);
            let reminder_lead = offsets.reminder.get(*prayer);
            Ok(PrayerCard {
                prayer: *prayer,
                adhan: iqama::format_hhmm(iqama::parse_hhmm(adhan)?),
                iqama: iqama::iqama_time(adhan, iqama_offset)?,
                iqama_offset,
                reminder: iqama::reminder_time(adhan, reminder_lead)?,
                reminder_lead,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};

    use salat_auth::Role;
    use salat_cache::provider::CacheManager;
    use salat_core::config::{CacheConfig, LocationConfig, OffsetDefaultsConfig};
    use salat_core::traits::{
        HijriDate, HijriDateSource, ManualClock, PrayerTimesSource, ReverseGeocoder,
        UpstreamError,
    };
    use salat_core::types::Coordinates;

    use super::*;
    use crate::calendar::UNKNOWN_HIJRI_DATE;

    #[derive(Debug, Default)]
    struct Upstream {
        timing_calls: AtomicUsize,
        fail_timings: bool,
    }

    #[async_trait]
    impl PrayerTimesSource for Upstream {
        async fn fetch_timings(&self, location: &Location) -> Result<PrayerTimings, UpstreamError> {
            self.timing_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_timings {
                return Err(UpstreamError::Status(500));
            }
            let timings: BTreeMap<Prayer, String> = Prayer::ALL
                .iter()
                .zip(["05:10", "12:25", "15:40", "18:31", "23:55"])
                .map(|(p, t)| (*p, t.to_string()))
                .collect();
            Ok(PrayerTimings {
                location: location.clone(),
                fetched_at: Utc::now(),
                timings,
            })
        }
    }

    #[async_trait]
    impl HijriDateSource for Upstream {
        async fn to_hijri(&self, _date: NaiveDate) -> Result<HijriDate, UpstreamError> {
            Err(UpstreamError::Timeout)
        }
    }

    #[async_trait]
    impl ReverseGeocoder for Upstream {
        async fn reverse(&self, _coordinates: Coordinates) -> Result<Location, UpstreamError> {
            Err(UpstreamError::NoResult)
        }
    }

    fn service(upstream: Arc<Upstream>) -> DashboardService {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let cache_config = CacheConfig::default();
        DashboardService::new(
            Arc::new(LocationResolver::new(upstream.clone(), &LocationConfig::default()).unwrap()),
            Arc::new(PrayerTimeService::new(
                upstream.clone(),
                Arc::new(CacheManager::new(&cache_config)),
                clock.clone(),
                &cache_config,
            )),
            Arc::new(IslamicDateService::new(upstream, clock)),
            Arc::new(OffsetStore::new(&OffsetDefaultsConfig::default()).unwrap()),
            PageConfig::default(),
        )
    }

    fn viewer(role: Role) -> Identity {
        Identity {
            username: "someone".into(),
            display_name: "Someone".into(),
            role,
        }
    }

    #[tokio::test]
    async fn test_cards_and_refresh_when_available() {
        let service = service(Arc::new(Upstream::default()));
        let dashboard = service
            .build(&viewer(Role::Viewer), &LocationRequest::default())
            .await;

        let cards = dashboard.prayers.unwrap();
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0].iqama, "05:20");
        assert_eq!(cards[0].reminder, "04:55");
        assert_eq!(cards[4].iqama, "00:05");
        assert_eq!(dashboard.refresh_interval_seconds, Some(60));
        assert_eq!(dashboard.header.hijri_date, UNKNOWN_HIJRI_DATE);
        assert!(dashboard.offsets.is_none());
    }

    #[tokio::test]
    async fn test_unavailable_has_no_refresh() {
        let upstream = Arc::new(Upstream {
            fail_timings: true,
            ..Upstream::default()
        });
        let dashboard = service(upstream.clone())
            .build(&viewer(Role::Admin), &LocationRequest::default())
            .await;

        assert!(dashboard.prayers.is_none());
        assert!(dashboard.unavailable_reason.is_some());
        assert_eq!(dashboard.refresh_interval_seconds, None);
        assert_eq!(upstream.timing_calls.load(Ordering::SeqCst), 1);
        assert!(dashboard.offsets.is_some());
    }
}
