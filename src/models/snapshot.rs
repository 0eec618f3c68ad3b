use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Booking, BookingStatus, Closure, ResourceScope};
use crate::timeparse::{self, TimeValue};

/// An immutable view of all booking and closure records for the
/// facility. The refresh loop that re-fetches from the store replaces
/// the whole snapshot; nothing here is ever mutated in place, so
/// concurrent readers always see a consistent set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub bookings: Vec<Booking>,
    pub closures: Vec<Closure>,
}

/// A booking row as it comes off the upstream store, times still in
/// whatever shape the sheet produced.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBooking {
    pub id: String,
    pub court_id: u32,
    pub date: NaiveDate,
    pub start: serde_json::Value,
    pub end: serde_json::Value,
    pub status: String,
}

/// A closure row off the upstream store. Inactive rows are dropped
/// upstream, but `active` is honored here too in case they leak
/// through.
#[derive(Debug, Clone, Deserialize)]
pub struct RawClosure {
    pub scope: ResourceScope,
    pub date: NaiveDate,
    pub start: serde_json::Value,
    pub end: serde_json::Value,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub reason: String,
}

fn default_true() -> bool {
    true
}

/// Raw snapshot file shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSnapshot {
    #[serde(default)]
    pub bookings: Vec<RawBooking>,
    #[serde(default)]
    pub closures: Vec<RawClosure>,
}

impl Snapshot {
    pub fn new(bookings: Vec<Booking>, closures: Vec<Closure>) -> Self {
        for b in bookings.iter().filter(|b| b.is_degenerate()) {
            tracing::warn!(
                "Booking {} on {} has empty interval {}-{}; it will never conflict",
                b.id,
                b.date,
                timeparse::to_hhmm(b.start),
                timeparse::to_hhmm(b.end)
            );
        }
        Self { bookings, closures }
    }

    /// Normalize raw store rows into a snapshot. Rows whose times do
    /// not parse cannot be scheduled against and are skipped with a
    /// warning rather than failing the whole refresh.
    pub fn from_raw(raw: RawSnapshot) -> Self {
        let mut bookings = Vec::with_capacity(raw.bookings.len());
        for row in raw.bookings {
            let (Some(start), Some(end)) = (normalize_cell(&row.start), normalize_cell(&row.end))
            else {
                tracing::warn!("Skipping booking {}: unparseable time", row.id);
                continue;
            };
            let Some(status) = BookingStatus::parse(&row.status) else {
                tracing::warn!("Skipping booking {}: unknown status '{}'", row.id, row.status);
                continue;
            };
            bookings.push(Booking {
                id: row.id,
                court_id: row.court_id,
                date: row.date,
                start,
                end,
                status,
            });
        }

        let mut closures = Vec::with_capacity(raw.closures.len());
        for row in raw.closures {
            if !row.active {
                continue;
            }
            let (Some(start), Some(end)) = (normalize_cell(&row.start), normalize_cell(&row.end))
            else {
                tracing::warn!("Skipping closure on {} ({}): unparseable time", row.date, row.scope);
                continue;
            };
            closures.push(Closure {
                scope: row.scope,
                date: row.date,
                start,
                end,
                reason: row.reason,
            });
        }

        Self::new(bookings, closures)
    }

    /// Load a snapshot from a raw JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot file {}", path.display()))?;
        let raw: RawSnapshot =
            serde_json::from_str(&content).context("Failed to parse snapshot file")?;
        Ok(Self::from_raw(raw))
    }

    /// Bookings on one court and date, any status.
    pub fn bookings_on(&self, date: NaiveDate, court_id: u32) -> impl Iterator<Item = &Booking> {
        self.bookings
            .iter()
            .filter(move |b| b.date == date && b.court_id == court_id)
    }

    /// Active closures whose scope covers the court on the date.
    pub fn closures_on(&self, date: NaiveDate, court_id: u32) -> impl Iterator<Item = &Closure> {
        self.closures
            .iter()
            .filter(move |c| c.date == date && c.scope.matches(court_id))
    }
}

/// A time cell from the store: number (fractional day or minutes) or
/// text in any supported clock format.
fn normalize_cell(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Number(n) => timeparse::normalize(&TimeValue::Number(n.as_f64()?)),
        serde_json::Value::String(s) => timeparse::normalize(&TimeValue::Text(s.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn raw_json() -> &'static str {
        r#"{
            "bookings": [
                {"id": "b1", "court_id": 3, "date": "2026-06-01",
                 "start": "09:00", "end": "10:00", "status": "active"},
                {"id": "b2", "court_id": 3, "date": "2026-06-01",
                 "start": 0.4166666667, "end": 630, "status": "active"},
                {"id": "b3", "court_id": 3, "date": "2026-06-01",
                 "start": "whenever", "end": "10:00", "status": "active"},
                {"id": "b4", "court_id": 4, "date": "2026-06-01",
                 "start": "11:00", "end": "12:00", "status": "held"}
            ],
            "closures": [
                {"scope": "all", "date": "2026-06-01",
                 "start": "12:00", "end": "13:00", "reason": "Maintenance"},
                {"scope": 2, "date": "2026-06-01",
                 "start": "14:00", "end": "15:00", "active": false}
            ]
        }"#
    }

    #[test]
    fn test_from_raw_normalizes_and_skips() {
        let raw: RawSnapshot = serde_json::from_str(raw_json()).unwrap();
        let snapshot = Snapshot::from_raw(raw);

        // b3 (bad time) and b4 (unknown status) are skipped.
        assert_eq!(snapshot.bookings.len(), 2);
        assert_eq!(snapshot.bookings[0].start, 540);
        assert_eq!(snapshot.bookings[0].end, 600);
        // Fractional-day start and plain-minute end normalize the same way.
        assert_eq!(snapshot.bookings[1].start, 600);
        assert_eq!(snapshot.bookings[1].end, 630);

        // The inactive closure is dropped.
        assert_eq!(snapshot.closures.len(), 1);
        assert_eq!(snapshot.closures[0].scope, ResourceScope::All);
        assert_eq!(snapshot.closures[0].reason, "Maintenance");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(raw_json().as_bytes()).unwrap();

        let snapshot = Snapshot::load(file.path()).unwrap();
        assert_eq!(snapshot.bookings.len(), 2);
        assert_eq!(snapshot.closures.len(), 1);
    }

    #[test]
    fn test_filters_by_date_and_court() {
        let raw: RawSnapshot = serde_json::from_str(raw_json()).unwrap();
        let snapshot = Snapshot::from_raw(raw);
        let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();

        assert_eq!(snapshot.bookings_on(date, 3).count(), 2);
        assert_eq!(snapshot.bookings_on(date, 5).count(), 0);
        // The all-courts closure covers every court.
        assert_eq!(snapshot.closures_on(date, 9).count(), 1);
    }
}
