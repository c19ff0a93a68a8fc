//! Analysis pipeline.
//!
//! Runs the four reporters over one filtered table and records how long each
//! took, returning an [`AnalysisResult`] ready for the presentation layer.

use std::time::{Duration, Instant};

use bikeshare_core::models::FilterSelection;
use tracing::debug;

use crate::filter::FilteredTable;
use crate::reporters::{
    duration_stats, station_stats, time_stats, user_stats, DurationStats, StationStats, TimeStats,
    UserStats,
};

// ── Public types ──────────────────────────────────────────────────────────────

/// A report together with the wall-clock time spent computing it.
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    pub fn measure(f: impl FnOnce() -> T) -> Self {
        let start = Instant::now();
        let value = f();
        Self {
            value,
            elapsed: start.elapsed(),
        }
    }
}

/// The complete output of [`analyze`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub selection: FilterSelection,
    /// Rows that survived the filter.
    pub rows_matched: usize,
    pub time: Timed<TimeStats>,
    pub stations: Timed<StationStats>,
    pub durations: Timed<DurationStats>,
    pub users: Timed<UserStats>,
}

impl AnalysisResult {
    pub fn is_empty(&self) -> bool {
        self.rows_matched == 0
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run every reporter over `table`.
pub fn analyze(table: &FilteredTable<'_>, selection: FilterSelection) -> AnalysisResult {
    let time = Timed::measure(|| time_stats(table));
    let stations = Timed::measure(|| station_stats(table));
    let durations = Timed::measure(|| duration_stats(table));
    let users = Timed::measure(|| user_stats(table, selection.city));

    debug!(
        "Analysis of {} rows took {:?} / {:?} / {:?} / {:?}",
        table.len(),
        time.elapsed,
        stations.elapsed,
        durations.elapsed,
        users.elapsed
    );

    AnalysisResult {
        selection,
        rows_matched: table.len(),
        time,
        stations,
        durations,
        users,
    }
}
