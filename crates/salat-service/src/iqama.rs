//! Wall-clock arithmetic on `HH:MM` strings.
//!
//! No timezone conversion happens here: timings are local civil times as
//! returned upstream, and results wrap around midnight.

use salat_core::error::AppError;

const MINUTES_PER_DAY: i32 = 24 * 60;

/// Parses the leading `HH:MM` token of a timing string into minutes since
/// midnight. Trailing annotations such as `"05:10 (WAT)"` are ignored.
pub fn parse_hhmm(timing: &str) -> Result<u16, AppError> {
    let token = timing.split_whitespace().next().unwrap_or_default();
    let invalid = || AppError::validation(format!("Invalid HH:MM timing '{timing}'"));

    let (hours, minutes) = token.split_once(':').ok_or_else(invalid)?;
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    let hours: u16 = hours.parse().map_err(|_| invalid())?;
    let minutes: u16 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// Formats minutes since midnight as zero-padded `HH:MM`.
pub fn format_hhmm(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn shift(timing: &str, delta: i32) -> Result<String, AppError> {
    let base = i32::from(parse_hhmm(timing)?);
    let shifted = (base + delta).rem_euclid(MINUTES_PER_DAY);
    Ok(format_hhmm(shifted as u16))
}

/// Iqama time: the timing plus `offset` minutes, wrapping past midnight.
pub fn iqama_time(timing: &str, offset: u8) -> Result<String, AppError> {
    shift(timing, i32::from(offset))
}

/// Reminder time: the timing minus `lead` minutes, wrapping before midnight.
pub fn reminder_time(timing: &str, lead: u8) -> Result<String, AppError> {
    shift(timing, -i32::from(lead))
}
