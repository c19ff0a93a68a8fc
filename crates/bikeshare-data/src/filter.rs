//! Month / weekday narrowing of a loaded dataset.

use bikeshare_core::models::{City, Dataset, DayFilter, MonthFilter, Schema, TripRecord};
use tracing::debug;

/// Read-only view over the trips of a [`Dataset`] that passed a month and day
/// filter. Rows stay in source order.
#[derive(Debug, Clone)]
pub struct FilteredTable<'a> {
    city: City,
    schema: &'a Schema,
    rows: Vec<&'a TripRecord>,
}

impl<'a> FilteredTable<'a> {
    /// View over every trip in `dataset`.
    pub fn all(dataset: &'a Dataset) -> Self {
        Self {
            city: dataset.city,
            schema: &dataset.schema,
            rows: dataset.trips.iter().collect(),
        }
    }

    /// Keep only the rows of this view that pass both filters.
    pub fn refine(&self, month: MonthFilter, day: DayFilter) -> FilteredTable<'a> {
        let rows: Vec<&'a TripRecord> = self
            .rows
            .iter()
            .copied()
            .filter(|t| month.matches(t.month()) && day.matches(t.weekday()))
            .collect();

        debug!(
            "Filter month={} day={} kept {} of {} rows",
            month,
            day,
            rows.len(),
            self.rows.len()
        );

        FilteredTable {
            city: self.city,
            schema: self.schema,
            rows,
        }
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn rows(&self) -> &[&'a TripRecord] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a TripRecord> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Up to `len` rows starting at `start`. Past the end yields an empty
    /// slice.
    pub fn window(&self, start: usize, len: usize) -> &[&'a TripRecord] {
        let begin = start.min(self.rows.len());
        let end = start.saturating_add(len).min(self.rows.len());
        &self.rows[begin..end]
    }
}

/// Narrow `dataset` to the trips matching `month` and `day`.
pub fn apply_filters(dataset: &Dataset, month: MonthFilter, day: DayFilter) -> FilteredTable<'_> {
    FilteredTable::all(dataset).refine(month, day)
}
