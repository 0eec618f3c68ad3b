use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use super::{load_inputs, OutputFormat};
use crate::timeparse;

#[derive(Debug, Serialize)]
pub struct ConflictInfo {
    pub id: String,
    pub start: String,
    pub end: String,
}

/// Response for an availability check on a proposed booking
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub court: String,
    pub date: NaiveDate,
    pub start: String,
    pub end: String,
    pub available: bool,
    pub conflicts: Vec<ConflictInfo>,
    pub closures: Vec<String>,
}

impl std::fmt::Display for CheckResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} on {} {}-{}: {}",
            self.court,
            self.date,
            self.start,
            self.end,
            if self.available { "available" } else { "NOT available" }
        )?;
        for c in &self.conflicts {
            writeln!(f, "  conflicts with booking {} ({}-{})", c.id, c.start, c.end)?;
        }
        for reason in &self.closures {
            writeln!(f, "  closed: {}", reason)?;
        }
        Ok(())
    }
}

/// Check whether a proposed reservation is free of booking and closure
/// conflicts.
#[allow(clippy::too_many_arguments)]
pub fn run_check(
    snapshot_path: &Path,
    config_path: Option<&Path>,
    date: &str,
    court: u32,
    start: &str,
    end: &str,
    exclude: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let (snapshot, config) = load_inputs(snapshot_path, config_path)?;

    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").context("Invalid date, use YYYY-MM-DD")?;
    let start_min = timeparse::parse_clock(start)
        .with_context(|| format!("Invalid start time: {}", start))?;
    let end_min =
        timeparse::parse_clock(end).with_context(|| format!("Invalid end time: {}", end))?;
    if start_min >= end_min {
        anyhow::bail!("Start time must be before end time");
    }

    let conflicts = snapshot.conflicts(date, court, start_min, end_min, exclude);
    let closures = snapshot.closure_conflicts(date, court, start_min, end_min);
    let available = conflicts.is_empty() && closures.is_empty();

    let response = CheckResponse {
        court: config.court_name(court),
        date,
        start: timeparse::to_hhmm(start_min),
        end: timeparse::to_hhmm(end_min),
        available,
        conflicts: conflicts
            .iter()
            .map(|b| ConflictInfo {
                id: b.id.clone(),
                start: timeparse::to_hhmm(b.start),
                end: timeparse::to_hhmm(b.end),
            })
            .collect(),
        closures: closures.iter().map(|c| c.reason.clone()).collect(),
    };

    format.print(&response);
    Ok(())
}
