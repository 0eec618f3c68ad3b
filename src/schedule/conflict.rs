use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Booking, Closure, Snapshot};
use crate::schedule::overlaps;

/// Result of a point-in-time closure check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedCheck {
    pub is_closed: bool,
    /// The first matching closure's display reason.
    pub reason: Option<String>,
}

impl ClosedCheck {
    fn open() -> Self {
        Self {
            is_closed: false,
            reason: None,
        }
    }
}

impl Snapshot {
    /// True iff no active booking on the court and date overlaps the
    /// proposed `[start, end)` interval. `exclude_id` skips one booking
    /// by id, for validating edits to an existing reservation.
    pub fn is_slot_available(
        &self,
        date: NaiveDate,
        court_id: u32,
        start: u32,
        end: u32,
        exclude_id: Option<&str>,
    ) -> bool {
        self.conflicts(date, court_id, start, end, exclude_id)
            .is_empty()
    }

    /// The active bookings conflicting with a proposed interval, for
    /// user-facing conflict explanations.
    pub fn conflicts(
        &self,
        date: NaiveDate,
        court_id: u32,
        start: u32,
        end: u32,
        exclude_id: Option<&str>,
    ) -> Vec<&Booking> {
        self.bookings_on(date, court_id)
            .filter(|b| b.status.blocks_schedule())
            .filter(|b| exclude_id != Some(b.id.as_str()))
            .filter(|b| overlaps(b.start, b.end, start, end))
            .collect()
    }

    /// Whether some active closure covering the court contains the
    /// given minute of day.
    pub fn is_slot_closed(&self, date: NaiveDate, court_id: u32, minute: u32) -> ClosedCheck {
        for closure in self.closures_on(date, court_id) {
            if closure.start <= minute && minute < closure.end {
                return ClosedCheck {
                    is_closed: true,
                    reason: Some(closure.reason.clone()),
                };
            }
        }
        ClosedCheck::open()
    }

    /// All closures overlapping a proposed interval, for surfacing
    /// closure reasons during booking creation.
    pub fn closure_conflicts(
        &self,
        date: NaiveDate,
        court_id: u32,
        start: u32,
        end: u32,
    ) -> Vec<&Closure> {
        self.closures_on(date, court_id)
            .filter(|c| overlaps(c.start, c.end, start, end))
            .collect()
    }
}
