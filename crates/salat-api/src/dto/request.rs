//! Request DTOs with validation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use salat_core::error::AppError;
use salat_core::types::{OffsetKind, Prayer};
use salat_service::{LocationMode, LocationRequest, OffsetUpdate};

/// Login request body, JSON or form encoded.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Location query string for the page and the dashboard API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationQuery {
    /// `manual` (default) or `gps`.
    pub mode: Option<String>,
    /// City, manual mode.
    pub city: Option<String>,
    /// Country, manual mode.
    pub country: Option<String>,
    /// Latitude, GPS mode.
    pub lat: Option<String>,
    /// Longitude, GPS mode.
    pub lon: Option<String>,
    /// Set after the admin form was saved.
    pub saved: Option<String>,
}

impl LocationQuery {
    /// Converts to a service request.
    ///
    /// Unparsable coordinates become NaN so the resolver rejects them with
    /// its usual fallback and warning.
    pub fn to_request(&self) -> Result<LocationRequest, AppError> {
        Ok(self.with_mode(self.mode()?))
    }

    /// The requested mode; empty means manual.
    pub fn mode(&self) -> Result<LocationMode, AppError> {
        self.mode.as_deref().unwrap_or_default().parse()
    }

    /// Converts to a service request with `mode` in place of the query's.
    pub fn with_mode(&self, mode: LocationMode) -> LocationRequest {
        let coordinate = |raw: &Option<String>| {
            raw.as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| v.parse::<f64>().unwrap_or(f64::NAN))
        };
        LocationRequest {
            mode,
            city: self.city.clone(),
            country: self.country.clone(),
            latitude: coordinate(&self.lat),
            longitude: coordinate(&self.lon),
        }
    }
}

/// Page URL to re-poll: the current query without the one-shot `saved` flag.
///
/// Pairs are kept as the client sent them, already percent-encoded.
pub fn refresh_target(raw_query: Option<&str>) -> String {
    let kept: Vec<&str> = raw_query
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty() && pair.split('=').next() != Some("saved"))
        .collect();
    if kept.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", kept.join("&"))
    }
}

/// JSON body of `PUT /api/offsets`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateOffsetsRequest {
    /// Edits applied together, or not at all.
    #[validate(length(min = 1, message = "At least one update is required"))]
    pub updates: Vec<OffsetUpdate>,
}

/// Form field name for one offset input, e.g. `iqama_fajr`.
pub fn offset_field(kind: OffsetKind, prayer: Prayer) -> String {
    format!("{kind}_{}", prayer.as_str().to_lowercase())
}

/// Reads the admin form. Absent fields are left unchanged.
pub fn parse_offset_form(form: &HashMap<String, String>) -> Result<Vec<OffsetUpdate>, AppError> {
    let mut updates = Vec::new();
    for kind in [OffsetKind::Iqama, OffsetKind::Reminder] {
        for prayer in Prayer::ALL {
            let field = offset_field(kind, prayer);
            let Some(raw) = form.get(&field).map(|v| v.trim()) else {
                continue;
            };
            let minutes = raw.parse::<u8>().map_err(|_| {
                AppError::validation(format!(
                    "{prayer} {kind} offset must be a whole number of minutes, got '{raw}'"
                ))
            })?;
            updates.push(OffsetUpdate {
                kind,
                prayer,
                minutes,
            });
        }
    }
    Ok(updates)
}
