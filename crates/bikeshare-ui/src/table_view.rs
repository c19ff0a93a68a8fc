//! Column-aligned plain-text tables.
//!
//! Used for the value-count tables in the reports and for raw-row pages.
//! Widths are measured in terminal columns so station names with wide
//! characters still line up.

use bikeshare_core::models::{OptionalColumn, Schema, TripRecord};
use unicode_width::UnicodeWidthStr;

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A header plus rows of pre-formatted cells.
#[derive(Debug, Clone, Default)]
pub struct TextTable {
    headers: Vec<String>,
    aligns: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new(columns: &[(&str, Align)]) -> Self {
        Self {
            headers: columns.iter().map(|(h, _)| h.to_string()).collect(),
            aligns: columns.iter().map(|(_, a)| *a).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Missing trailing cells render blank; extra cells are
    /// dropped.
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render header, dashed rule and rows, one line each, separated by two
    /// spaces. Trailing padding is trimmed.
    pub fn render(&self) -> String {
        let widths: Vec<usize> = (0..self.headers.len())
            .map(|col| {
                std::iter::once(&self.headers[col])
                    .chain(self.rows.iter().map(|r| &r[col]))
                    .map(|s| s.width())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        out.push_str(&self.render_line(&self.headers, &widths));
        out.push('\n');
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&self.render_line(&rule, &widths));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&self.render_line(row, &widths));
            out.push('\n');
        }
        out
    }

    fn render_line(&self, cells: &[String], widths: &[usize]) -> String {
        let parts: Vec<String> = cells
            .iter()
            .zip(widths)
            .zip(&self.aligns)
            .map(|((cell, width), align)| pad(cell, *width, *align))
            .collect();
        parts.join("  ").trim_end().to_string()
    }
}

fn pad(cell: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));
    match align {
        Align::Left => format!("{}{}", cell, fill),
        Align::Right => format!("{}{}", fill, cell),
    }
}

// ── Raw trip rows ─────────────────────────────────────────────────────────────

const MISSING: &str = "-";

/// Render a page of trips with every column the schema carries, prefixed by
/// the source row index.
pub fn render_trip_rows(schema: &Schema, rows: &[&TripRecord]) -> String {
    let has_end = schema.presence(OptionalColumn::EndTime).is_present();
    let has_gender = schema.presence(OptionalColumn::Gender).is_present();
    let has_birth = schema.presence(OptionalColumn::BirthYear).is_present();

    let mut columns: Vec<(&str, Align)> = vec![("", Align::Right), ("Start Time", Align::Left)];
    if has_end {
        columns.push(("End Time", Align::Left));
    }
    columns.extend([
        ("Trip Duration", Align::Right),
        ("Start Station", Align::Left),
        ("End Station", Align::Left),
        ("User Type", Align::Left),
    ]);
    if has_gender {
        columns.push(("Gender", Align::Left));
    }
    if has_birth {
        columns.push(("Birth Year", Align::Right));
    }

    let mut table = TextTable::new(&columns);
    for trip in rows {
        let mut cells = vec![
            trip.index.to_string(),
            trip.start_time().format("%Y-%m-%d %H:%M:%S").to_string(),
        ];
        if has_end {
            cells.push(
                trip.end_time
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| MISSING.to_string()),
            );
        }
        cells.push(trip.trip_duration.to_string());
        cells.push(trip.start_station.clone());
        cells.push(trip.end_station.clone());
        cells.push(optional_text(trip.user_type.as_deref()));
        if has_gender {
            cells.push(optional_text(trip.gender.as_deref()));
        }
        if has_birth {
            cells.push(
                trip.birth_year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| MISSING.to_string()),
            );
        }
        table.push_row(cells);
    }
    table.render()
}

fn optional_text(value: Option<&str>) -> String {
    value.unwrap_or(MISSING).to_string()
}
