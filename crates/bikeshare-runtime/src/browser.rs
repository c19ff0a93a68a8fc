//! Paged access to the raw rows of a filtered table.

use bikeshare_core::models::TripRecord;
use bikeshare_data::filter::FilteredTable;

/// Pagination cursor over a [`FilteredTable`].
///
/// The first call to [`RowBrowser::next_page`] returns the window starting
/// at row 0; each later call moves forward by one page first. Windows past
/// the end are empty.
#[derive(Debug, Clone)]
pub struct RowBrowser {
    cursor: usize,
    page_size: usize,
    started: bool,
}

impl RowBrowser {
    pub fn new(page_size: usize) -> Self {
        Self {
            cursor: 0,
            page_size: page_size.max(1),
            started: false,
        }
    }

    /// Start of the most recently returned window.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn next_page<'t, 'a>(&mut self, table: &'t FilteredTable<'a>) -> &'t [&'a TripRecord] {
        if self.started {
            self.cursor = self.cursor.saturating_add(self.page_size);
        } else {
            self.started = true;
        }
        tracing::debug!(cursor = self.cursor, page = self.page_size, "raw row page");
        table.window(self.cursor, self.page_size)
    }

    /// `true` once the cursor has moved past the last row.
    pub fn exhausted(&self, table: &FilteredTable<'_>) -> bool {
        self.started && self.cursor.saturating_add(self.page_size) >= table.len()
    }
}
