//! Text presentation layer for the bikeshare explorer.
//!
//! Turns analysis results and raw trip pages into aligned plain text for
//! stdout.

pub mod report_view;
pub mod table_view;

pub use bikeshare_core as core;
