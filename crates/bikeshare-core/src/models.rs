use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time_utils::{month_name, parse_weekday_name, weekday_name};

/// Header names every dataset file must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "Start Time",
    "Start Station",
    "End Station",
    "Trip Duration",
    "User Type",
];

/// Month names accepted by the month filter, in ordinal order.
///
/// The datasets only cover the first half of the year, so the list stops at
/// June.
pub const FILTER_MONTHS: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

/// A user answer that is not part of the enumeration being asked for.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("\"{input}\" is not a valid {kind}")]
pub struct InvalidChoice {
    pub kind: &'static str,
    pub input: String,
}

impl InvalidChoice {
    fn new(kind: &'static str, input: &str) -> Self {
        Self {
            kind,
            input: input.to_string(),
        }
    }
}

// ── City ──────────────────────────────────────────────────────────────────────

/// One of the three cities with published trip data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case name used for matching user input.
    pub fn key(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Title-cased name for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }

    /// Name of the CSV file holding this city's trips.
    pub fn file_name(&self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl FromStr for City {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|c| c.key() == wanted)
            .ok_or_else(|| InvalidChoice::new("city", s.trim()))
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ── MonthFilter ───────────────────────────────────────────────────────────────

/// Month selector: either every month or a single 1-based month ordinal
/// taken from [`FILTER_MONTHS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Month(u32),
}

impl MonthFilter {
    /// `true` when the row month passes this filter.
    pub fn matches(&self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(m) => *m == month,
        }
    }
}

impl FromStr for MonthFilter {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == "all" {
            return Ok(MonthFilter::All);
        }
        FILTER_MONTHS
            .iter()
            .position(|m| *m == wanted)
            .map(|i| MonthFilter::Month(i as u32 + 1))
            .ok_or_else(|| InvalidChoice::new("month", s.trim()))
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("All"),
            MonthFilter::Month(m) => f.write_str(month_name(*m).unwrap_or("Unknown")),
        }
    }
}

// ── DayFilter ─────────────────────────────────────────────────────────────────

/// Day-of-week selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayFilter {
    #[default]
    All,
    Day(Weekday),
}

impl DayFilter {
    /// `true` when the row weekday passes this filter.
    pub fn matches(&self, weekday: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(d) => *d == weekday,
        }
    }
}

impl FromStr for DayFilter {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == "all" {
            return Ok(DayFilter::All);
        }
        parse_weekday_name(&wanted)
            .map(DayFilter::Day)
            .ok_or_else(|| InvalidChoice::new("day", s.trim()))
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("All"),
            DayFilter::Day(d) => f.write_str(weekday_name(*d)),
        }
    }
}

// ── FilterSelection ───────────────────────────────────────────────────────────

/// The (city, month, day) triple chosen once per session iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSelection {
    pub fn new(city: City, month: MonthFilter, day: DayFilter) -> Self {
        Self { city, month, day }
    }
}

// ── CalendarFields ────────────────────────────────────────────────────────────

/// Month, weekday and hour derived from a trip's start timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFields {
    /// 1-based month.
    pub month: u32,
    pub weekday: Weekday,
    /// Hour of day, 0-23.
    pub hour: u32,
}

impl CalendarFields {
    pub fn from_timestamp(ts: &NaiveDateTime) -> Self {
        Self {
            month: ts.month(),
            weekday: ts.weekday(),
            hour: ts.hour(),
        }
    }
}

// ── TripRecord ────────────────────────────────────────────────────────────────

/// One bike trip read from a city dataset.
///
/// The calendar fields are computed in [`TripRecord::new`] and cannot drift
/// from the start timestamp afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// 0-based position of the row in the source file.
    pub index: usize,
    start_time: NaiveDateTime,
    calendar: CalendarFields,
    pub end_time: Option<NaiveDateTime>,
    /// Whole seconds.
    pub trip_duration: u64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
}

impl TripRecord {
    pub fn new(
        index: usize,
        start_time: NaiveDateTime,
        trip_duration: u64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
    ) -> Self {
        Self {
            index,
            start_time,
            calendar: CalendarFields::from_timestamp(&start_time),
            end_time: None,
            trip_duration,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: None,
            gender: None,
            birth_year: None,
        }
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn calendar(&self) -> CalendarFields {
        self.calendar
    }

    pub fn month(&self) -> u32 {
        self.calendar.month
    }

    pub fn weekday(&self) -> Weekday {
        self.calendar.weekday
    }

    pub fn hour(&self) -> u32 {
        self.calendar.hour
    }
}

// ── Schema ────────────────────────────────────────────────────────────────────

/// Columns that only some cities publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionalColumn {
    EndTime,
    Gender,
    BirthYear,
}

impl OptionalColumn {
    pub const ALL: [OptionalColumn; 3] = [
        OptionalColumn::EndTime,
        OptionalColumn::Gender,
        OptionalColumn::BirthYear,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            OptionalColumn::EndTime => "End Time",
            OptionalColumn::Gender => "Gender",
            OptionalColumn::BirthYear => "Birth Year",
        }
    }
}

/// Tagged result of an optional-data lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence<T> {
    Present(T),
    Absent,
}

impl<T> Presence<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Presence::Present(_))
    }

    pub fn as_ref(&self) -> Presence<&T> {
        match self {
            Presence::Present(v) => Presence::Present(v),
            Presence::Absent => Presence::Absent,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Presence<U> {
        match self {
            Presence::Present(v) => Presence::Present(f(v)),
            Presence::Absent => Presence::Absent,
        }
    }

    pub fn present(self) -> Option<T> {
        match self {
            Presence::Present(v) => Some(v),
            Presence::Absent => None,
        }
    }
}

/// Header row of a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    headers: Vec<String>,
}

impl Schema {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
        }
    }

    /// Schema carrying exactly the required columns plus `optional`.
    pub fn with_optional(optional: &[OptionalColumn]) -> Self {
        Self::new(
            REQUIRED_COLUMNS
                .iter()
                .copied()
                .chain(optional.iter().map(|c| c.header())),
        )
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Position of `name` in the header row, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Capability query for an optional column. The payload is the column's
    /// position in the source header.
    pub fn presence(&self, column: OptionalColumn) -> Presence<usize> {
        match self.position(column.header()) {
            Some(pos) => Presence::Present(pos),
            None => Presence::Absent,
        }
    }

    /// First required column missing from this schema, if any.
    pub fn missing_required(&self) -> Option<&'static str> {
        REQUIRED_COLUMNS
            .iter()
            .copied()
            .find(|c| self.position(c).is_none())
    }
}

// ── Dataset ───────────────────────────────────────────────────────────────────

/// Every trip for one city, in source order.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub city: City,
    pub schema: Schema,
    pub trips: Vec<TripRecord>,
}

impl Dataset {
    pub fn new(city: City, schema: Schema, trips: Vec<TripRecord>) -> Self {
        Self {
            city,
            schema,
            trips,
        }
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 15, 0)
            .unwrap()
    }

    #[test]
    fn test_city_parse_case_insensitive() {
        assert_eq!("Chicago".parse::<City>().unwrap(), City::Chicago);
        assert_eq!("NEW YORK CITY".parse::<City>().unwrap(), City::NewYorkCity);
        assert_eq!("  washington\n".parse::<City>().unwrap(), City::Washington);
    }

    #[test]
    fn test_city_parse_rejects_unknown() {
        let err = "boston".parse::<City>().unwrap_err();
        assert_eq!(err.kind, "city");
        assert_eq!(err.input, "boston");
        assert!("new york".parse::<City>().is_err());
    }

    #[test]
    fn test_city_file_names() {
        assert_eq!(City::Chicago.file_name(), "chicago.csv");
        assert_eq!(City::NewYorkCity.file_name(), "new_york_city.csv");
        assert_eq!(City::Washington.file_name(), "washington.csv");
        assert_eq!(City::NewYorkCity.to_string(), "New York City");
    }

    #[test]
    fn test_month_filter_parse() {
        assert_eq!("all".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!("January".parse::<MonthFilter>().unwrap(), MonthFilter::Month(1));
        assert_eq!("JUNE".parse::<MonthFilter>().unwrap(), MonthFilter::Month(6));
    }

    #[test]
    fn test_month_filter_rejects_second_half_and_abbreviations() {
        assert!("july".parse::<MonthFilter>().is_err());
        assert!("jan".parse::<MonthFilter>().is_err());
        assert!("".parse::<MonthFilter>().is_err());
    }

    #[test]
    fn test_month_filter_display() {
        assert_eq!(MonthFilter::All.to_string(), "All");
        assert_eq!(MonthFilter::Month(3).to_string(), "March");
    }

    #[test]
    fn test_day_filter_parse() {
        assert_eq!("all".parse::<DayFilter>().unwrap(), DayFilter::All);
        assert_eq!(
            "Friday".parse::<DayFilter>().unwrap(),
            DayFilter::Day(Weekday::Fri)
        );
        assert!("fri".parse::<DayFilter>().is_err());
        assert_eq!(DayFilter::Day(Weekday::Sun).to_string(), "Sunday");
    }

    #[test]
    fn test_filters_match() {
        assert!(MonthFilter::All.matches(11));
        assert!(MonthFilter::Month(2).matches(2));
        assert!(!MonthFilter::Month(2).matches(3));
        assert!(DayFilter::All.matches(Weekday::Mon));
        assert!(!DayFilter::Day(Weekday::Tue).matches(Weekday::Mon));
    }

    #[test]
    fn test_trip_record_derives_calendar_fields() {
        // 2017-01-02 was a Monday.
        let trip = TripRecord::new(0, ts(2017, 1, 2, 9), 600, "A", "B");
        assert_eq!(trip.month(), 1);
        assert_eq!(trip.weekday(), Weekday::Mon);
        assert_eq!(trip.hour(), 9);
        assert_eq!(trip.calendar(), CalendarFields::from_timestamp(&trip.start_time()));
    }

    #[test]
    fn test_schema_presence() {
        let schema = Schema::with_optional(&[OptionalColumn::Gender]);
        assert_eq!(schema.presence(OptionalColumn::Gender), Presence::Present(5));
        assert_eq!(schema.presence(OptionalColumn::BirthYear), Presence::Absent);
        assert!(schema.missing_required().is_none());
    }

    #[test]
    fn test_schema_missing_required() {
        let schema = Schema::new(["Start Time", "Start Station", "End Station", "User Type"]);
        assert_eq!(schema.missing_required(), Some("Trip Duration"));
    }

    #[test]
    fn test_presence_helpers() {
        let p: Presence<u32> = Presence::Present(4);
        assert!(p.is_present());
        assert_eq!(p.map(|v| v * 2), Presence::Present(8));
        assert_eq!(p.present(), Some(4));
        let a: Presence<u32> = Presence::Absent;
        assert_eq!(a.as_ref().present(), None);
    }
}
