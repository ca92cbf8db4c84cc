//! AlAdhan API client: daily timings by city and Gregorian to Hijri
//! conversion.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use salat_core::config::UpstreamConfig;
use salat_core::traits::{HijriDate, HijriDateSource, PrayerTimesSource, UpstreamError};
use salat_core::types::{Location, Prayer, PrayerTimings};

use super::client::{classify, endpoint, ensure_success};
use crate::iqama::{format_hhmm, parse_hhmm};

/// `{ "code": 200, "status": "OK", "data": ... }`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct TimingsData {
    timings: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct HijriData {
    hijri: HijriPayload,
}

#[derive(Debug, Deserialize)]
struct HijriPayload {
    day: String,
    month: HijriMonth,
    year: String,
}

#[derive(Debug, Deserialize)]
struct HijriMonth {
    en: String,
}

/// Client for `api.aladhan.com`.
#[derive(Debug, Clone)]
pub struct AladhanClient {
    http: Client,
    base_url: String,
    method: u8,
}

impl AladhanClient {
    /// Creates a client sharing `http` with the other upstream clients.
    pub fn new(http: Client, config: &UpstreamConfig) -> Self {
        Self {
            http,
            base_url: config.aladhan_base_url.clone(),
            method: config.calculation_method,
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, UpstreamError> {
        let url = endpoint(&self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(classify)?;
        let response = ensure_success(response)?;
        response.json::<T>().await.map_err(classify)
    }
}

/// Extracts and normalizes the five canonical timings.
fn extract_timings(raw: &HashMap<String, String>) -> Result<BTreeMap<Prayer, String>, UpstreamError> {
    Prayer::ALL
        .iter()
        .map(|prayer| {
            let value = raw
                .get(prayer.as_str())
                .ok_or_else(|| UpstreamError::Malformed(format!("missing timing for {prayer}")))?;
            let minutes = parse_hhmm(value)
                .map_err(|_| UpstreamError::Malformed(format!("bad timing for {prayer}: '{value}'")))?;
            Ok((*prayer, format_hhmm(minutes)))
        })
        .collect()
}

#[async_trait]
impl PrayerTimesSource for AladhanClient {
    async fn fetch_timings(&self, location: &Location) -> Result<PrayerTimings, UpstreamError> {
        debug!(%location, method = self.method, "Fetching prayer timings");

        let envelope: Envelope<TimingsData> = self
            .get_json(
                "/v1/timingsByCity",
                &[
                    ("city", location.city.clone()),
                    ("country", location.country.clone()),
                    ("method", self.method.to_string()),
                ],
            )
            .await
            .inspect_err(|e| warn!(%location, error = %e, "Timings request failed"))?;

        Ok(PrayerTimings {
            location: location.clone(),
            fetched_at: Utc::now(),
            timings: extract_timings(&envelope.data.timings)?,
        })
    }
}

#[async_trait]
impl HijriDateSource for AladhanClient {
    async fn to_hijri(&self, date: NaiveDate) -> Result<HijriDate, UpstreamError> {
        let formatted = date.format("%d-%m-%Y").to_string();
        debug!(date = %formatted, "Converting to Hijri");

        let envelope: Envelope<HijriData> = self
            .get_json("/v1/gToH", &[("date", formatted.clone())])
            .await
            .inspect_err(|e| warn!(date = %formatted, error = %e, "Hijri conversion failed"))?;

        let hijri = envelope.data.hijri;
        Ok(HijriDate {
            day: hijri.day,
            month: hijri.month.en,
            year: hijri.year,
        })
    }
}
