//! Full interactive sessions over CSV files in a temporary directory.

use std::io::Cursor;

use bikeshare_runtime::core::error::BikeshareError;
use bikeshare_runtime::session::{DirectorySource, Session};
use tempfile::TempDir;

const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
9031,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Subscriber,Male,1981.0
304487,2017-03-06 13:49:38,2017-03-06 13:55:28,350,Christiana Ave & Lawrence Ave,St. Louis Ave & Balmoral Ave,Subscriber,Male,1986.0
45207,2017-01-17 14:53:07,2017-01-17 15:02:01,534,Clark St & Randolph St,Desplaines St & Jackson Blvd,Subscriber,Male,1975.0
";

fn data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("chicago.csv"), CHICAGO).unwrap();
    dir
}

fn run(dir: &TempDir, input: &str, page_size: usize) -> (Result<(), BikeshareError>, String) {
    let mut session = Session::new(
        Cursor::new(input.as_bytes().to_vec()),
        Vec::new(),
        DirectorySource::new(dir.path()),
        page_size,
    );
    let result = session.run();
    (result, String::from_utf8(session.into_output()).unwrap())
}

#[test]
fn test_january_report_for_chicago() {
    let dir = data_dir();
    let (result, out) = run(&dir, "Chicago\njanuary\nall\nno\nno\n", 10);
    result.unwrap();

    assert!(out.contains("We'll be exploring data from Chicago in month: January and on day: All"));
    assert!(out.contains("The most common month for rides: January"));
    // 2017-01-04 was a Wednesday and 2017-01-17 a Tuesday; tie → first seen.
    assert!(out.contains("The most common day for rides: Wednesday"));
    assert!(out.contains("Users spent a total of 0 days, 0 hours, 15 minutes, and 50 seconds riding."));
    assert!(out.contains("Users spent an average of 0 hours, 7 minutes, and 55 seconds on each trip."));
    assert!(out.contains("0 people did not specify their gender."));
    assert!(out.contains("The most recent birth year on record is 1981."));
    assert_eq!(out.matches("This took ").count(), 4);
}

#[test]
fn test_invalid_answers_are_reprompted() {
    let dir = data_dir();
    let (result, out) = run(&dir, "paris\nchicago\ndecember\nall\nfri\nall\nno\nmaybe\nno\n", 10);
    result.unwrap();
    assert!(out.contains("\"paris\" is not a valid city."));
    assert!(out.contains("\"december\" is not a valid month."));
    assert!(out.contains("\"fri\" is not a valid day."));
    assert!(out.contains("Your input must be yes or no."));
}

#[test]
fn test_raw_rows_page_through_file() {
    let dir = data_dir();
    let (result, out) = run(&dir, "chicago\nall\nall\nyes\nyes\nyes\nno\n", 2);
    result.unwrap();
    assert!(out.contains("Would you like to see the first 2 rows of data?"));
    assert!(out.contains("Birth Year"));
    assert!(out.contains("Theater on the Lake"));
    assert!(out.contains("Clark St & Randolph St"));
    assert!(out.contains("There are no more rows to show."));
}

#[test]
fn test_missing_city_file_is_fatal() {
    let dir = data_dir();
    let (result, _) = run(&dir, "washington\nall\nall\n", 10);
    assert!(matches!(result, Err(BikeshareError::FileRead { .. })));
}
