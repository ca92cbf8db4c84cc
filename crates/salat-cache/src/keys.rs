//! Cache key builders for all Salat Board cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

use salat_core::types::Location;

/// Prefix applied to all Salat Board cache keys.
const PREFIX: &str = "salat";

// ── Prayer timing keys ─────────────────────────────────────

/// Cache key for the timing snapshot of a location.
///
/// City and country are trimmed and lowercased so `"Lomé"` and `" lomé "`
/// share one entry. The city's byte length prefixes the pair, so free text
/// containing the separator cannot make two locations collide.
pub fn prayer_timings(location: &Location) -> String {
    let city = location.city.trim().to_lowercase();
    let country = location.country.trim().to_lowercase();
    format!("{PREFIX}:timings:{}:{city}|{country}", city.len())
}

// ── Session keys ───────────────────────────────────────────

/// Cache key marking a session token id as revoked.
pub fn session_revoked(token_id: &str) -> String {
    format!("{PREFIX}:session:revoked:{token_id}")
}
