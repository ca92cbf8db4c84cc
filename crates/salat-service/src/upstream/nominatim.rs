//! Nominatim reverse geocoder.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT_LANGUAGE;
use serde::Deserialize;
use tracing::{debug, warn};

use salat_core::config::UpstreamConfig;
use salat_core::traits::{ReverseGeocoder, UpstreamError};
use salat_core::types::{Coordinates, Location};

use super::client::{classify, endpoint, ensure_success};

#[derive(Debug, Default, Deserialize)]
struct ReverseResponse {
    error: Option<String>,
    #[serde(default)]
    address: Option<Address>,
}

#[derive(Debug, Default, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    country: Option<String>,
}

impl Address {
    /// First non-empty of city, town, village.
    fn locality(&self) -> Option<&str> {
        [&self.city, &self.town, &self.village]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }
}

/// Client for the Nominatim `/reverse` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    http: Client,
    base_url: String,
    language: String,
}

impl NominatimGeocoder {
    /// Creates a geocoder sharing `http` with the other upstream clients.
    pub fn new(http: Client, config: &UpstreamConfig) -> Self {
        Self {
            http,
            base_url: config.nominatim_base_url.clone(),
            language: config.geocoder_language.clone(),
        }
    }
}

fn to_location(body: ReverseResponse) -> Result<Location, UpstreamError> {
    if let Some(error) = body.error {
        debug!(error = %error, "Geocoder returned no result");
        return Err(UpstreamError::NoResult);
    }
    let address = body.address.ok_or(UpstreamError::NoResult)?;
    let city = address.locality().ok_or(UpstreamError::NoResult)?;
    let country = address
        .country
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(UpstreamError::NoResult)?;
    Ok(Location::new(city, country))
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse(&self, coordinates: Coordinates) -> Result<Location, UpstreamError> {
        let url = endpoint(&self.base_url, "/reverse");
        let response = self
            .http
            .get(&url)
            .header(ACCEPT_LANGUAGE, &self.language)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", coordinates.latitude.to_string()),
                ("lon", coordinates.longitude.to_string()),
            ])
            .send()
            .await
            .map_err(classify)?;
        let response = ensure_success(response)?;
        let body: ReverseResponse = response.json().await.map_err(classify)?;

        to_location(body).inspect_err(|e| {
            warn!(
                latitude = coordinates.latitude,
                longitude = coordinates.longitude,
                error = %e,
                "Reverse geocoding gave no usable place"
            )
        })
    }
}
