//! Plain-text rendering of the four statistics reports.
//!
//! Each section starts with a "Calculating ..." banner and ends with the time
//! it took plus a 40-dash rule. A section over an empty selection prints
//! [`NO_DATA`] instead of figures.

use std::fmt::Write as _;
use std::time::Duration;

use bikeshare_core::formatting::{
    format_count, format_day_clock, format_hour_clock, format_hour_of_day, percentage,
};
use bikeshare_core::models::{FilterSelection, Presence};
use bikeshare_core::time_utils::weekday_name;
use bikeshare_data::analysis::{AnalysisResult, Timed};
use bikeshare_data::reporters::{DurationStats, StationStats, TimeStats, UserStats};

use crate::table_view::{Align, TextTable};

pub const NO_DATA: &str = "No data available for the selected filters.";
pub const RULE_WIDTH: usize = 40;

pub const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
pub const FAREWELL: &str =
    "Okay, bye, and please come back soon. The program is only getting better and we need to save the planet!";

/// Dashed separator printed after every section.
pub fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// Echo of the chosen filters shown before loading.
pub fn render_selection(selection: &FilterSelection) -> String {
    format!(
        "\nWe'll be exploring data from {} in month: {} and on day: {}\n{}\n",
        selection.city,
        selection.month,
        selection.day,
        rule()
    )
}

/// All four sections in report order.
pub fn render_analysis(result: &AnalysisResult) -> String {
    let mut out = String::new();
    out.push_str(&render_time_stats(&result.time));
    out.push_str(&render_station_stats(&result.stations));
    out.push_str(&render_duration_stats(&result.durations));
    out.push_str(&render_user_stats(&result.users));
    out
}

pub fn render_time_stats(report: &Timed<TimeStats>) -> String {
    let stats = &report.value;
    let mut body = String::new();
    match (stats.month_name(), &stats.weekday, &stats.hour) {
        (Some(month), Some(day), Some(hour)) => {
            let _ = writeln!(body, "The most common month for rides: {}", month);
            let _ = writeln!(body, "The most common day for rides: {}", weekday_name(day.value));
            let _ = writeln!(
                body,
                "The most common starting hour for rides: {} ({})",
                hour.value,
                format_hour_of_day(hour.value)
            );
        }
        _ => {
            let _ = writeln!(body, "{}", NO_DATA);
        }
    }
    section("Calculating The Most Frequent Times of Travel...", &body, report.elapsed)
}

pub fn render_station_stats(report: &Timed<StationStats>) -> String {
    let stats = &report.value;
    let mut body = String::new();
    match (&stats.start_station, &stats.end_station, &stats.popular_trip) {
        (Some(start), Some(end), Some(trip)) => {
            let _ = writeln!(body, "Most common station to start a trip: {}", start.value);
            let _ = writeln!(body, "Most common station to end a trip: {}", end.value);
            let _ = writeln!(
                body,
                "Most commonly taken trip is from {} with {} {}.\n",
                trip.value,
                format_count(trip.count),
                if trip.count == 1 { "occurrence" } else { "occurrences" }
            );
            let _ = writeln!(
                body,
                "Here are the {} most common trips taken and their frequencies:",
                stats.top_trips.len()
            );
            let mut table = TextTable::new(&[
                ("Start Station", Align::Left),
                ("End Station", Align::Left),
                ("Trips", Align::Right),
            ]);
            for (pair, count) in &stats.top_trips {
                table.push_row(vec![pair.start.clone(), pair.end.clone(), format_count(*count)]);
            }
            body.push_str(&table.render());
        }
        _ => {
            let _ = writeln!(body, "{}", NO_DATA);
        }
    }
    section("Calculating The Most Popular Stations and Trip...", &body, report.elapsed)
}

pub fn render_duration_stats(report: &Timed<DurationStats>) -> String {
    let stats = &report.value;
    let mut body = String::new();
    match (stats.total(), stats.mean()) {
        (Some(total), Some(mean)) => {
            let _ = writeln!(
                body,
                "Users spent a total of {} riding.",
                format_day_clock(&total)
            );
            let _ = writeln!(
                body,
                "Users spent an average of {} on each trip.",
                format_hour_clock(&mean)
            );
            let _ = writeln!(body, "({} trips)", format_count(stats.trip_count));
        }
        _ => {
            let _ = writeln!(body, "{}", NO_DATA);
        }
    }
    section("Calculating Trip Duration...", &body, report.elapsed)
}

pub fn render_user_stats(report: &Timed<UserStats>) -> String {
    let stats = &report.value;
    let mut body = String::new();

    let _ = writeln!(body, "A table showing the count for each user type.");
    if stats.user_types.is_empty() {
        let _ = writeln!(body, "{}", NO_DATA);
    } else {
        body.push_str(&count_table("User Type", &stats.user_types));
    }
    if stats.missing_user_type > 0 {
        let _ = writeln!(
            body,
            "{} trips have no user type recorded.",
            format_count(stats.missing_user_type)
        );
    }

    match &stats.gender {
        Presence::Present(gender) => {
            let _ = writeln!(body, "\nA table showing the count for each user gender.");
            let _ = writeln!(
                body,
                "{} people did not specify their gender.",
                format_count(gender.missing)
            );
            if gender.counts.is_empty() {
                let _ = writeln!(body, "{}", NO_DATA);
            } else {
                body.push_str(&count_table("Gender", &gender.counts));
            }
        }
        Presence::Absent => {
            let _ = writeln!(body, "\n{} does not have gender data.", stats.city);
        }
    }

    match &stats.birth_year {
        Presence::Present(Some(years)) => {
            let _ = writeln!(body, "\nBirth year statistics:");
            let _ = writeln!(
                body,
                "The most recent birth year on record is {}.",
                years.most_recent
            );
            let _ = writeln!(body, "The earliest birth year on record is {}.", years.earliest);
            let _ = writeln!(
                body,
                "The most common birth year among users is {}.",
                years.most_common
            );
        }
        Presence::Present(None) => {
            let _ = writeln!(body, "\nBirth year statistics:\n{}", NO_DATA);
        }
        Presence::Absent => {
            let _ = writeln!(body, "\n{} does not have birth year data.", stats.city);
        }
    }

    section("Calculating User Stats...", &body, report.elapsed)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn count_table(label: &str, counts: &[(String, u64)]) -> String {
    let total: u64 = counts.iter().map(|(_, n)| n).sum();
    let mut table = TextTable::new(&[
        (label, Align::Left),
        ("Count", Align::Right),
        ("Share", Align::Right),
    ]);
    for (value, count) in counts {
        table.push_row(vec![
            value.clone(),
            format_count(*count),
            format!("{:.1}%", percentage(*count, total, 1)),
        ]);
    }
    table.render()
}

fn section(title: &str, body: &str, elapsed: Duration) -> String {
    format!(
        "\n{}\n\n{}\nThis took {:.6} seconds.\n{}\n",
        title,
        body,
        elapsed.as_secs_f64(),
        rule()
    )
}
