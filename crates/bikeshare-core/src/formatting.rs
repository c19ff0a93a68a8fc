use crate::time_utils::{DayClock, HourClock};

/// Format an integer count with thousands separators.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1234), "1,234");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::percentage;
///
/// assert!((percentage(50, 200, 1) - 25.0).abs() < 1e-9);
/// assert_eq!(percentage(3, 0, 2), 0.0);
/// ```
pub fn percentage(part: u64, whole: u64, decimal_places: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = (part as f64 / whole as f64) * 100.0;
    let factor = 10_f64.powi(decimal_places as i32);
    (raw * factor).round() / factor
}

/// `"12 days, 3 hours, 4 minutes, and 5 seconds"`.
pub fn format_day_clock(clock: &DayClock) -> String {
    format!(
        "{} {}, {} {}, {} {}, and {} {}",
        format_count(clock.days),
        plural(clock.days, "day"),
        clock.hours,
        plural(clock.hours, "hour"),
        clock.minutes,
        plural(clock.minutes, "minute"),
        clock.seconds,
        plural(clock.seconds, "second"),
    )
}

/// `"0 hours, 15 minutes, and 36 seconds"`.
pub fn format_hour_clock(clock: &HourClock) -> String {
    format!(
        "{} {}, {} {}, and {} {}",
        clock.hours,
        plural(clock.hours, "hour"),
        clock.minutes,
        plural(clock.minutes, "minute"),
        clock.seconds,
        plural(clock.seconds, "second"),
    )
}

/// Twelve-hour label for an hour of day, e.g. `17` → `"5 PM"`.
pub fn format_hour_of_day(hour: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let twelve = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{} {}", twelve, suffix)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        unit.to_string()
    } else {
        format!("{}s", unit)
    }
}

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let remainder = s.len() % 3;
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i != 0 && i % 3 == remainder {
            result.push(',');
        }
        result.push(c);
    }
    result
}
