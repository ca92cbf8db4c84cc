//! Location resolution for manual and GPS input.
//!
//! Never fails: anything unusable falls back to the configured default
//! location and carries a warning for the page.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use salat_core::config::LocationConfig;
use salat_core::error::AppError;
use salat_core::traits::{ReverseGeocoder, UpstreamError};
use salat_core::types::{Coordinates, Location};

/// How the operator chose the location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationMode {
    /// Free-text city and country.
    #[default]
    Manual,
    /// Latitude and longitude, reverse geocoded.
    Gps,
}

impl fmt::Display for LocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => f.write_str("manual"),
            Self::Gps => f.write_str("gps"),
        }
    }
}

impl FromStr for LocationMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "manual" => Ok(Self::Manual),
            "gps" => Ok(Self::Gps),
            _ => Err(AppError::validation(format!(
                "Unknown location mode '{s}'. Expected 'manual' or 'gps'"
            ))),
        }
    }
}

/// Raw location input from the page or the JSON API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationRequest {
    /// Input mode.
    #[serde(default)]
    pub mode: LocationMode,
    /// City (manual mode).
    pub city: Option<String>,
    /// Country (manual mode).
    pub country: Option<String>,
    /// Latitude in degrees (GPS mode).
    pub latitude: Option<f64>,
    /// Longitude in degrees (GPS mode).
    pub longitude: Option<f64>,
}

/// Outcome of resolving a [`LocationRequest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLocation {
    /// Location to query timings for.
    pub location: Location,
    /// Mode the request used.
    pub mode: LocationMode,
    /// Coordinates used in GPS mode, for prefilling the form.
    pub coordinates: Option<Coordinates>,
    /// User-visible warning when a fallback happened.
    pub warning: Option<String>,
}

/// Resolves page input into a location.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    geocoder: Arc<dyn ReverseGeocoder>,
    default_location: Location,
    default_coordinates: Coordinates,
}

impl LocationResolver {
    /// Creates a resolver with the configured fallback.
    pub fn new(geocoder: Arc<dyn ReverseGeocoder>, config: &LocationConfig) -> Result<Self, AppError> {
        let default_location = Location::new(&config.city, &config.country);
        if default_location.city.is_empty() || default_location.country.is_empty() {
            return Err(AppError::configuration(
                "location.city and location.country must not be empty",
            ));
        }
        let default_coordinates = Coordinates::new(config.latitude, config.longitude)
            .map_err(|e| AppError::configuration(format!("Invalid default coordinates: {}", e.message)))?;

        Ok(Self {
            geocoder,
            default_location,
            default_coordinates,
        })
    }

    /// The fallback location.
    pub fn default_location(&self) -> &Location {
        &self.default_location
    }

    /// Coordinates prefilled in the GPS form.
    pub fn default_coordinates(&self) -> Coordinates {
        self.default_coordinates
    }

    /// Resolves a request. Never fails.
    pub async fn resolve(&self, request: &LocationRequest) -> ResolvedLocation {
        match request.mode {
            LocationMode::Manual => self.resolve_manual(request),
            LocationMode::Gps => self.resolve_gps(request).await,
        }
    }

    fn resolve_manual(&self, request: &LocationRequest) -> ResolvedLocation {
        let pick = |value: &Option<String>, fallback: &str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };
        ResolvedLocation {
            location: Location::new(
                pick(&request.city, &self.default_location.city),
                pick(&request.country, &self.default_location.country),
            ),
            mode: LocationMode::Manual,
            coordinates: None,
            warning: None,
        }
    }

    async fn resolve_gps(&self, request: &LocationRequest) -> ResolvedLocation {
        let latitude = request.latitude.unwrap_or(self.default_coordinates.latitude);
        let longitude = request.longitude.unwrap_or(self.default_coordinates.longitude);

        let coordinates = match Coordinates::new(latitude, longitude) {
            Ok(coordinates) => coordinates,
            Err(e) => {
                warn!(latitude, longitude, "Rejected coordinates out of range");
                return self.fallback(None, format!("{}. Showing {}.", e.message, self.default_location));
            }
        };

        match self.geocoder.reverse(coordinates).await {
            Ok(location) => {
                debug!(%location, "Coordinates resolved");
                ResolvedLocation {
                    location,
                    mode: LocationMode::Gps,
                    coordinates: Some(coordinates),
                    warning: None,
                }
            }
            Err(e) => {
                warn!(
                    latitude,
                    longitude,
                    error = %e,
                    "Geocoding failed, using default location"
                );
                let warning = format!("{} Showing {}.", describe(&e), self.default_location);
                self.fallback(Some(coordinates), warning)
            }
        }
    }

    fn fallback(&self, coordinates: Option<Coordinates>, warning: String) -> ResolvedLocation {
        ResolvedLocation {
            location: self.default_location.clone(),
            mode: LocationMode::Gps,
            coordinates,
            warning: Some(warning),
        }
    }
}

/// Page text for each class of geocoding failure.
fn describe(error: &UpstreamError) -> &'static str {
    match error {
        UpstreamError::NoResult => "No place was found at these coordinates.",
        UpstreamError::RateLimited => {
            "The geocoding service is rate limiting requests. Try again in a moment."
        }
        UpstreamError::Timeout | UpstreamError::Transport(_) => {
            "The geocoding service could not be reached."
        }
        UpstreamError::Status(_) => "The geocoding service returned an error.",
        UpstreamError::Malformed(_) => "The geocoding service returned an unreadable answer.",
    }
}
