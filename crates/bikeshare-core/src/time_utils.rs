use chrono::{Month, NaiveDate, NaiveDateTime, Weekday};
use tracing::debug;

use crate::error::{BikeshareError, Result};

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_DAY: u64 = 86_400;

// ── Timestamp parsing ─────────────────────────────────────────────────────────

/// Parse a trip start/end timestamp.
///
/// The published datasets use local wall-clock time without an offset, e.g.
/// `"2017-01-01 09:07:57"`. A fractional-seconds suffix and the ISO `T`
/// separator are accepted as well; a bare date maps to midnight.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(BikeshareError::TimestampParse(s.to_string()));
    }

    const FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt);
        }
    }

    if let Some(dt) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(dt);
    }

    debug!("could not parse timestamp \"{}\"", trimmed);
    Err(BikeshareError::TimestampParse(trimmed.to_string()))
}

// ── Calendar names ────────────────────────────────────────────────────────────

/// Full English name of a 1-based month, e.g. `3` → `"March"`.
pub fn month_name(month: u32) -> Option<&'static str> {
    let month = u8::try_from(month).ok()?;
    Month::try_from(month).ok().map(|m| m.name())
}

/// Full capitalised English weekday name, e.g. `"Monday"`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Inverse of [`weekday_name`], case-insensitive. Abbreviations are rejected.
pub fn parse_weekday_name(s: &str) -> Option<Weekday> {
    const WEEK: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
    let wanted = s.trim();
    WEEK.into_iter()
        .find(|d| weekday_name(*d).eq_ignore_ascii_case(wanted))
}

// ── Duration decomposition ────────────────────────────────────────────────────

/// A non-negative number of seconds split into days, hours, minutes and
/// seconds with exact integer arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayClock {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DayClock {
    pub fn from_seconds(total: u64) -> Self {
        let (days, rem) = (total / SECONDS_PER_DAY, total % SECONDS_PER_DAY);
        let (hours, rem) = (rem / SECONDS_PER_HOUR, rem % SECONDS_PER_HOUR);
        let (minutes, seconds) = (rem / SECONDS_PER_MINUTE, rem % SECONDS_PER_MINUTE);
        Self {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * SECONDS_PER_DAY
            + self.hours * SECONDS_PER_HOUR
            + self.minutes * SECONDS_PER_MINUTE
            + self.seconds
    }
}

/// A number of seconds split into hours, minutes and seconds. Hours are not
/// wrapped into days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HourClock {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl HourClock {
    pub fn from_seconds(total: u64) -> Self {
        let (hours, rem) = (total / SECONDS_PER_HOUR, total % SECONDS_PER_HOUR);
        Self {
            hours,
            minutes: rem / SECONDS_PER_MINUTE,
            seconds: rem % SECONDS_PER_MINUTE,
        }
    }

    /// Decompose a fractional second count, truncating the fraction.
    /// Negative and non-finite inputs clamp to zero.
    pub fn from_fractional_seconds(total: f64) -> Self {
        if !total.is_finite() || total <= 0.0 {
            return Self::default();
        }
        Self::from_seconds(total.trunc() as u64)
    }
}
