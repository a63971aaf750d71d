//! Date and clock helpers shared by the calendar, the enricher and the filters.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

use crate::{CoreError, CoreResult};

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Last minute of the day (23:59).
pub const LAST_MINUTE_OF_DAY: u32 = 1439;

/// Formats a calendar date as `YYYY-MM-DD`.
///
/// `NaiveDate` carries no timezone, so the output is always the day the user
/// picked, never a UTC-shifted neighbour.
pub fn to_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

pub fn parse_iso_date(text: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), ISO_DATE_FORMAT)
        .map_err(|_| CoreError::InvalidDate(text.to_string()))
}

/// Parses an `HH:MM` clock string into minutes since midnight.
///
/// Lenient on purpose: missing or malformed minutes count as 0 and malformed
/// hours make the whole value 0, so one bad upstream record never aborts a
/// filter pass. Values too large for `u32` minutes also give 0.
pub fn parse_clock_to_minutes(text: &str) -> u32 {
    let mut parts = text.trim().splitn(2, ':');
    let hours = match parts.next().and_then(|h| h.trim().parse::<u32>().ok()) {
        Some(h) => h,
        None => {
            tracing::trace!("Unparseable clock string {:?}, counting as 00:00", text);
            return 0;
        }
    };
    let minutes = parts
        .next()
        .and_then(|m| m.trim().parse::<u32>().ok())
        .unwrap_or(0);

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .unwrap_or_else(|| {
            tracing::trace!("Clock string {:?} out of range, counting as 00:00", text);
            0
        })
}

pub fn format_minutes_as_clock(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// `95` -> `1h 35m`
pub fn format_minutes_as_duration(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Same as [`format_minutes_as_duration`] but drops a zero minute part (`2h`).
pub fn format_duration_compact(minutes: u32) -> String {
    match minutes % 60 {
        0 => format!("{}h", minutes / 60),
        mins => format!("{}h {}m", minutes / 60, mins),
    }
}

/// Parses the date-time stamps the flights API sends.
///
/// Offset-carrying stamps keep their own wall clock; a bare date means
/// midnight.
pub fn parse_timestamp(stamp: &str) -> Option<NaiveDateTime> {
    let stamp = stamp.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(stamp) {
        return Some(dt.naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(stamp, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(stamp, ISO_DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `HH:MM` of a departure/arrival stamp.
pub fn clock_from_timestamp(stamp: &str) -> Option<String> {
    parse_timestamp(stamp).map(|dt| format_minutes_as_clock(dt.hour() * 60 + dt.minute()))
}

/// Short day label for result cards, e.g. `Fri 1 Mar`.
pub fn format_flight_date(stamp: &str) -> Option<String> {
    parse_timestamp(stamp).map(|dt| dt.format("%a %-d %b").to_string())
}
