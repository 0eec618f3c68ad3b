use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use super::{load_inputs, OutputFormat};
use crate::schedule::assign_columns;
use crate::timeparse;

#[derive(Debug, Serialize)]
pub struct LayoutEntry {
    pub id: String,
    pub court: String,
    pub start: String,
    pub end: String,
    pub column_index: usize,
    pub column_count: usize,
}

/// Column layout for one date's grid render
#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub date: NaiveDate,
    pub entries: Vec<LayoutEntry>,
}

impl std::fmt::Display for LayoutResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "No active bookings on {}.", self.date);
        }
        writeln!(f, "Column layout for {}:", self.date)?;
        for e in &self.entries {
            writeln!(
                f,
                "  {:<14} {}-{}  {}  column {}/{}",
                e.court, e.start, e.end, e.id, e.column_index + 1, e.column_count
            )?;
        }
        Ok(())
    }
}

/// Show the overlap-group column assignment the grid renderer would
/// use for a date, optionally limited to one court.
pub fn run_layout(
    snapshot_path: &Path,
    config_path: Option<&Path>,
    date: &str,
    court: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    let (snapshot, config) = load_inputs(snapshot_path, config_path)?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").context("Invalid date, use YYYY-MM-DD")?;

    let day_bookings: Vec<_> = snapshot
        .bookings
        .iter()
        .filter(|b| b.date == date && court.map_or(true, |c| b.court_id == c))
        .cloned()
        .collect();
    let columns = assign_columns(&day_bookings);

    let mut entries: Vec<LayoutEntry> = day_bookings
        .iter()
        .filter_map(|b| {
            let slot = columns.get(&b.id)?;
            Some(LayoutEntry {
                id: b.id.clone(),
                court: config.court_name(b.court_id),
                start: timeparse::to_hhmm(b.start),
                end: timeparse::to_hhmm(b.end),
                column_index: slot.column_index,
                column_count: slot.column_count,
            })
        })
        .collect();
    entries.sort_by(|a, b| {
        (&a.court, &a.start, a.column_index).cmp(&(&b.court, &b.start, b.column_index))
    });

    format.print(&LayoutResponse { date, entries });
    Ok(())
}
