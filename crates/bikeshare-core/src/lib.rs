//! Core domain types for the bikeshare explorer.
//!
//! Cities, filter selectors, trip records and their derived calendar fields,
//! the dataset schema, the shared error type, CLI settings and text
//! formatting helpers.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;
