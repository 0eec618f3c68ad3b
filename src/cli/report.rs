use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use super::{load_inputs, OutputFormat};
use crate::report::{day_utilization, range_utilization, DayUtilization, RangeUtilization};

/// Single-date utilization report
#[derive(Debug, Serialize)]
pub struct DayReportResponse(pub DayUtilization);

impl std::fmt::Display for DayReportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let day = &self.0;
        writeln!(f, "Utilization for {}:", day.date)?;
        for period in &day.periods {
            writeln!(
                f,
                "  {:<10} booked {:>3}  available {:>3}  closed {:>3}  ({}%)",
                period.name,
                period.counts.booked,
                period.counts.available,
                period.counts.closed,
                period.counts.utilization_pct
            )?;
        }
        writeln!(
            f,
            "  {:<10} booked {:>3}  available {:>3}  closed {:>3}  ({}%)",
            "TOTAL",
            day.total.booked,
            day.total.available,
            day.total.closed,
            day.total.utilization_pct
        )
    }
}

/// Date-range utilization report
#[derive(Debug, Serialize)]
pub struct RangeReportResponse(pub RangeUtilization);

impl std::fmt::Display for RangeReportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let range = &self.0;
        writeln!(f, "Utilization {} to {}:", range.from, range.to)?;
        for period in &range.periods {
            writeln!(f, "  {:<10} {:.1} booked hours", period.name, period.booked_hours)?;
        }
        writeln!(f, "  {:<10} {:.1} booked hours", "TOTAL", range.total_booked_hours)?;
        writeln!(
            f,
            "  slots: booked {}  available {}  closed {}  ({}%)",
            range.total.booked,
            range.total.available,
            range.total.closed,
            range.total.utilization_pct
        )
    }
}

/// Report utilization for a date, or for an inclusive range when `to`
/// is given.
pub fn run_report(
    snapshot_path: &Path,
    config_path: Option<&Path>,
    date: &str,
    to: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let (snapshot, config) = load_inputs(snapshot_path, config_path)?;
    let from = NaiveDate::parse_from_str(date, "%Y-%m-%d").context("Invalid date, use YYYY-MM-DD")?;

    match to {
        Some(to) => {
            let to = NaiveDate::parse_from_str(to, "%Y-%m-%d")
                .context("Invalid end date, use YYYY-MM-DD")?;
            if to < from {
                anyhow::bail!("End date is before start date");
            }
            let report = range_utilization(&snapshot, &config, from, to)?;
            format.print(&RangeReportResponse(report));
        }
        None => {
            let report = day_utilization(&snapshot, &config, from)?;
            format.print(&DayReportResponse(report));
        }
    }
    Ok(())
}
