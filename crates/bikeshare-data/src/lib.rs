//! Data layer for the bikeshare explorer.
//!
//! Loads a city's CSV into a [`bikeshare_core::models::Dataset`], narrows it
//! by month and weekday, and computes the time, station, duration and user
//! statistics.

pub mod aggregator;
pub mod analysis;
pub mod filter;
pub mod reader;
pub mod reporters;

pub use bikeshare_core as core;
