//! CSV loading for the per-city trip datasets.
//!
//! Reads `chicago.csv`, `new_york_city.csv` or `washington.csv` from a data
//! directory and converts every row into a [`TripRecord`] with its calendar
//! fields attached.

use std::io::Read;
use std::path::{Path, PathBuf};

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{City, Dataset, OptionalColumn, Presence, Schema, TripRecord};
use bikeshare_core::time_utils::parse_timestamp;
use serde::Deserialize;
use tracing::{debug, warn};

// ── Row shape ─────────────────────────────────────────────────────────────────

/// One CSV row as published. Numeric columns are read as text so that
/// `"1001.557"` durations and `"1992.0"` birth years can be handled here.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration", default)]
    trip_duration: Option<String>,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Location of `city`'s dataset inside `data_dir`.
pub fn dataset_path(data_dir: &Path, city: City) -> PathBuf {
    data_dir.join(city.file_name())
}

/// Cities whose dataset file exists in `data_dir`.
pub fn available_cities(data_dir: &Path) -> Vec<City> {
    City::ALL
        .into_iter()
        .filter(|c| dataset_path(data_dir, *c).is_file())
        .collect()
}

/// Load `city`'s dataset from `data_dir`. The file is only read.
pub fn load_city(data_dir: &Path, city: City) -> Result<Dataset> {
    if !data_dir.is_dir() {
        return Err(BikeshareError::DataPathNotFound(data_dir.to_path_buf()));
    }

    let path = dataset_path(data_dir, city);
    let file = std::fs::File::open(&path).map_err(|source| BikeshareError::FileRead {
        path: path.clone(),
        source,
    })?;

    let dataset = read_dataset(file, city, &path)?;
    debug!(
        "Loaded {} trips for {} from {}",
        dataset.len(),
        city,
        path.display()
    );
    Ok(dataset)
}

/// Parse a dataset from any reader. `source` only labels error messages.
pub fn read_dataset<R: Read>(reader: R, city: City, source: &Path) -> Result<Dataset> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let schema = Schema::new(headers.iter());
    if let Some(column) = schema.missing_required() {
        return Err(BikeshareError::MissingColumn {
            path: source.to_path_buf(),
            column: column.to_string(),
        });
    }
    for column in OptionalColumn::ALL {
        if let Presence::Absent = schema.presence(column) {
            debug!("{} has no \"{}\" column", source.display(), column.header());
        }
    }

    let mut trips = Vec::new();
    let mut record = csv::StringRecord::new();
    while csv_reader.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let raw: RawTrip = record.deserialize(Some(&headers))?;
        trips.push(to_trip_record(trips.len(), line, raw)?);
    }

    if trips.is_empty() {
        warn!("{} contains a header but no trips", source.display());
    }

    Ok(Dataset::new(city, schema, trips))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn to_trip_record(index: usize, line: u64, raw: RawTrip) -> Result<TripRecord> {
    let start_time = parse_timestamp(&raw.start_time)?;

    let duration_text = non_blank(raw.trip_duration).ok_or_else(|| BikeshareError::MalformedRow {
        line,
        reason: "missing Trip Duration".to_string(),
    })?;
    let trip_duration = parse_whole_seconds(&duration_text).ok_or_else(|| {
        BikeshareError::MalformedRow {
            line,
            reason: format!("invalid Trip Duration \"{}\"", duration_text),
        }
    })?;

    let mut trip = TripRecord::new(
        index,
        start_time,
        trip_duration,
        raw.start_station.trim(),
        raw.end_station.trim(),
    );

    trip.end_time = match non_blank(raw.end_time) {
        Some(text) => Some(parse_timestamp(&text)?),
        None => None,
    };
    trip.user_type = non_blank(raw.user_type);
    trip.gender = non_blank(raw.gender);
    trip.birth_year = match non_blank(raw.birth_year) {
        Some(text) => Some(parse_year(&text).ok_or_else(|| BikeshareError::MalformedRow {
            line,
            reason: format!("invalid Birth Year \"{}\"", text),
        })?),
        None => None,
    };

    Ok(trip)
}

/// `None` for absent, empty or whitespace-only values.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Integer seconds, or a non-negative decimal truncated to whole seconds.
fn parse_whole_seconds(text: &str) -> Option<u64> {
    if let Ok(secs) = text.parse::<u64>() {
        return Some(secs);
    }
    let secs = text.parse::<f64>().ok()?;
    (secs.is_finite() && secs >= 0.0).then(|| secs.trunc() as u64)
}

/// Birth years are published as floats (`"1992.0"`) in some files.
fn parse_year(text: &str) -> Option<i32> {
    if let Ok(year) = text.parse::<i32>() {
        return Some(year);
    }
    let year = text.parse::<f64>().ok()?;
    (year.is_finite() && year.abs() < f64::from(i32::MAX)).then(|| year.trunc() as i32)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use tempfile::TempDir;

    const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
9031,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Customer,,
";

    const WASHINGTON: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
482740,2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,
";

    fn read(text: &str, city: City) -> Result<Dataset> {
        read_dataset(text.as_bytes(), city, Path::new("test.csv"))
    }

    #[test]
    fn test_read_full_schema() {
        let ds = read(CHICAGO, City::Chicago).unwrap();
        assert_eq!(ds.len(), 3);
        assert!(ds.schema.presence(OptionalColumn::Gender).is_present());
        assert!(ds.schema.presence(OptionalColumn::BirthYear).is_present());

        let first = &ds.trips[0];
        assert_eq!(first.index, 0);
        assert_eq!(first.trip_duration, 321);
        assert_eq!(first.start_station, "Wood St & Hubbard St");
        assert_eq!(first.month(), 6);
        assert_eq!(first.weekday(), Weekday::Fri);
        assert_eq!(first.hour(), 15);
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1992));
        assert!(first.end_time.is_some());
    }

    #[test]
    fn test_read_blank_optional_values_are_null() {
        let ds = read(CHICAGO, City::Chicago).unwrap();
        let last = &ds.trips[2];
        assert_eq!(last.gender, None);
        assert_eq!(last.birth_year, None);
        assert_eq!(last.user_type.as_deref(), Some("Customer"));
    }

    #[test]
    fn test_read_without_optional_columns() {
        let ds = read(WASHINGTON, City::Washington).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.schema.presence(OptionalColumn::Gender), Presence::Absent);
        assert_eq!(ds.schema.presence(OptionalColumn::BirthYear), Presence::Absent);
        assert_eq!(ds.trips[0].trip_duration, 489);
        assert_eq!(ds.trips[1].user_type, None);
        assert_eq!(ds.trips[1].gender, None);
    }

    #[test]
    fn test_read_preserves_source_order() {
        let ds = read(CHICAGO, City::Chicago).unwrap();
        let indices: Vec<usize> = ds.trips.iter().map(|t| t.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(ds.trips[2].start_station, "May St & Taylor St");
    }

    #[test]
    fn test_read_missing_required_column() {
        let text = "Start Time,Start Station,End Station,User Type\n2017-01-01 00:00:00,A,B,Subscriber\n";
        match read(text, City::Chicago) {
            Err(BikeshareError::MissingColumn { column, .. }) => {
                assert_eq!(column, "Trip Duration")
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_read_bad_timestamp_is_fatal() {
        let text = "Start Time,Trip Duration,Start Station,End Station,User Type\nyesterday,10,A,B,Customer\n";
        assert!(matches!(
            read(text, City::Chicago),
            Err(BikeshareError::TimestampParse(_))
        ));
    }

    #[test]
    fn test_read_bad_duration_reports_line() {
        let text = "Start Time,Trip Duration,Start Station,End Station,User Type\n\
                    2017-01-01 00:00:00,10,A,B,Customer\n\
                    2017-01-01 00:00:00,ten,A,B,Customer\n";
        match read(text, City::Chicago) {
            Err(BikeshareError::MalformedRow { line, reason }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("ten"));
            }
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn test_read_missing_duration_is_fatal() {
        let text = "Start Time,Trip Duration,Start Station,End Station,User Type\n2017-01-01 00:00:00,,A,B,Customer\n";
        assert!(matches!(
            read(text, City::Chicago),
            Err(BikeshareError::MalformedRow { .. })
        ));
    }

    #[test]
    fn test_read_header_only() {
        let text = "Start Time,Trip Duration,Start Station,End Station,User Type\n";
        let ds = read(text, City::NewYorkCity).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn test_parse_whole_seconds() {
        assert_eq!(parse_whole_seconds("321"), Some(321));
        assert_eq!(parse_whole_seconds("489.966"), Some(489));
        assert_eq!(parse_whole_seconds("-3"), None);
        assert_eq!(parse_whole_seconds("abc"), None);
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("1992"), Some(1992));
        assert_eq!(parse_year("1992.0"), Some(1992));
        assert_eq!(parse_year("n/a"), None);
    }

    // ── load_city ─────────────────────────────────────────────────────────────

    #[test]
    fn test_load_city_from_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("chicago.csv"), CHICAGO).unwrap();

        let ds = load_city(dir.path(), City::Chicago).unwrap();
        assert_eq!(ds.city, City::Chicago);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn test_load_city_is_deterministic_and_read_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("washington.csv");
        std::fs::write(&path, WASHINGTON).unwrap();

        let a = load_city(dir.path(), City::Washington).unwrap();
        let b = load_city(dir.path(), City::Washington).unwrap();
        assert_eq!(a.trips, b.trips);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), WASHINGTON);
    }

    #[test]
    fn test_load_city_missing_file() {
        let dir = TempDir::new().unwrap();
        match load_city(dir.path(), City::NewYorkCity) {
            Err(BikeshareError::FileRead { path, .. }) => {
                assert!(path.ends_with("new_york_city.csv"))
            }
            other => panic!("expected FileRead, got {other:?}"),
        }
    }

    #[test]
    fn test_load_city_missing_directory() {
        let missing = Path::new("/tmp/does-not-exist-bikeshare-test-xyz");
        assert!(matches!(
            load_city(missing, City::Chicago),
            Err(BikeshareError::DataPathNotFound(_))
        ));
    }

    #[test]
    fn test_available_cities() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("washington.csv"), WASHINGTON).unwrap();
        std::fs::write(dir.path().join("chicago.csv"), CHICAGO).unwrap();
        assert_eq!(
            available_cities(dir.path()),
            vec![City::Chicago, City::Washington]
        );
    }
}
