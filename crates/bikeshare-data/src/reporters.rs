//! The four statistics reporters.
//!
//! Each reporter is a pure function of a [`FilteredTable`]. An empty table
//! yields `None` / empty figures rather than an error so the caller can print
//! "No data available".

use std::fmt;

use bikeshare_core::models::{City, OptionalColumn, Presence};
use bikeshare_core::time_utils::{month_name, DayClock, HourClock};
use chrono::Weekday;

use crate::aggregator::{FrequencyTable, Mode};
use crate::filter::FilteredTable;

/// How many (start, end) pairs the popularity report ranks.
pub const TOP_TRIPS: usize = 5;

// ── Time of travel ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    /// 1-based month.
    pub month: Option<Mode<u32>>,
    pub weekday: Option<Mode<Weekday>>,
    pub hour: Option<Mode<u32>>,
}

impl TimeStats {
    /// Name of the most common month, e.g. `"January"`.
    pub fn month_name(&self) -> Option<&'static str> {
        self.month.as_ref().and_then(|m| month_name(m.value))
    }
}

/// Most frequent month, weekday and start hour.
pub fn time_stats(table: &FilteredTable<'_>) -> TimeStats {
    let mut months = FrequencyTable::new();
    let mut weekdays = FrequencyTable::new();
    let mut hours = FrequencyTable::new();

    for trip in table.iter() {
        let cal = trip.calendar();
        months.add(cal.month);
        weekdays.add(cal.weekday);
        hours.add(cal.hour);
    }

    TimeStats {
        month: months.mode(),
        weekday: weekdays.mode(),
        hour: hours.mode(),
    }
}

// ── Station / trip popularity ─────────────────────────────────────────────────

/// A (start station, end station) combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TripPair {
    pub start: String,
    pub end: String,
}

impl fmt::Display for TripPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: Option<Mode<String>>,
    pub end_station: Option<Mode<String>>,
    pub popular_trip: Option<Mode<TripPair>>,
    /// Up to [`TOP_TRIPS`] pairs, highest count first.
    pub top_trips: Vec<(TripPair, u64)>,
}

/// Most popular start station, end station and trip.
pub fn station_stats(table: &FilteredTable<'_>) -> StationStats {
    let mut starts: FrequencyTable<&str> = FrequencyTable::new();
    let mut ends: FrequencyTable<&str> = FrequencyTable::new();
    let mut pairs: FrequencyTable<(&str, &str)> = FrequencyTable::new();

    for trip in table.iter() {
        starts.add(trip.start_station.as_str());
        ends.add(trip.end_station.as_str());
        pairs.add((trip.start_station.as_str(), trip.end_station.as_str()));
    }

    let to_pair = |(start, end): (&str, &str)| TripPair {
        start: start.to_string(),
        end: end.to_string(),
    };

    StationStats {
        start_station: starts.mode().map(|m| m.map(str::to_string)),
        end_station: ends.mode().map(|m| m.map(str::to_string)),
        popular_trip: pairs.mode().map(|m| m.map(to_pair)),
        top_trips: pairs
            .top(TOP_TRIPS)
            .into_iter()
            .map(|(pair, count)| (to_pair(pair), count))
            .collect(),
    }
}

// ── Trip duration ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationStats {
    pub trip_count: u64,
    /// Exact sum in whole seconds.
    pub total_seconds: u64,
}

impl DurationStats {
    pub fn is_empty(&self) -> bool {
        self.trip_count == 0
    }

    /// Total riding time; `None` when there were no trips.
    pub fn total(&self) -> Option<DayClock> {
        (!self.is_empty()).then(|| DayClock::from_seconds(self.total_seconds))
    }

    pub fn mean_seconds(&self) -> Option<f64> {
        (!self.is_empty()).then(|| self.total_seconds as f64 / self.trip_count as f64)
    }

    /// Mean trip time with fractional seconds truncated.
    pub fn mean(&self) -> Option<HourClock> {
        (!self.is_empty()).then(|| HourClock::from_seconds(self.total_seconds / self.trip_count))
    }
}

/// Sum and mean of trip durations.
pub fn duration_stats(table: &FilteredTable<'_>) -> DurationStats {
    DurationStats {
        trip_count: table.len() as u64,
        total_seconds: table
            .iter()
            .fold(0u64, |acc, t| acc.saturating_add(t.trip_duration)),
    }
}

// ── User demographics ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenderBreakdown {
    pub counts: Vec<(String, u64)>,
    /// Rows with no gender recorded.
    pub missing: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub city: City,
    /// Count per user type, highest first.
    pub user_types: Vec<(String, u64)>,
    pub missing_user_type: u64,
    pub gender: Presence<GenderBreakdown>,
    /// `Present(None)` when the column exists but holds no values.
    pub birth_year: Presence<Option<BirthYearStats>>,
}

/// User-type, gender and birth-year statistics. Columns the city does not
/// publish come back as [`Presence::Absent`].
pub fn user_stats(table: &FilteredTable<'_>, city: City) -> UserStats {
    let mut user_types: FrequencyTable<&str> = FrequencyTable::new();
    let mut missing_user_type = 0u64;
    for trip in table.iter() {
        match trip.user_type.as_deref() {
            Some(t) => user_types.add(t),
            None => missing_user_type += 1,
        }
    }

    let gender = table
        .schema()
        .presence(OptionalColumn::Gender)
        .map(|_| gender_breakdown(table));

    let birth_year = table
        .schema()
        .presence(OptionalColumn::BirthYear)
        .map(|_| birth_year_stats(table));

    UserStats {
        city,
        user_types: owned(user_types.ranked()),
        missing_user_type,
        gender,
        birth_year,
    }
}

fn gender_breakdown(table: &FilteredTable<'_>) -> GenderBreakdown {
    let mut genders: FrequencyTable<&str> = FrequencyTable::new();
    let mut missing = 0u64;
    for trip in table.iter() {
        match trip.gender.as_deref() {
            Some(g) => genders.add(g),
            None => missing += 1,
        }
    }
    GenderBreakdown {
        counts: owned(genders.ranked()),
        missing,
    }
}

fn birth_year_stats(table: &FilteredTable<'_>) -> Option<BirthYearStats> {
    let known: Vec<i32> = table.iter().filter_map(|t| t.birth_year).collect();
    let most_common = known.iter().copied().collect::<FrequencyTable<i32>>().mode()?.value;
    Some(BirthYearStats {
        earliest: *known.iter().min()?,
        most_recent: *known.iter().max()?,
        most_common,
    })
}

fn owned(ranked: Vec<(&str, u64)>) -> Vec<(String, u64)> {
    ranked
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect()
}
