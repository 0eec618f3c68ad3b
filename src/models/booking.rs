use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Active,
    Cancelled,
    Completed,
    NoShow,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Active => "active",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
            BookingStatus::NoShow => "no_show",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(BookingStatus::Active),
            "cancelled" => Some(BookingStatus::Cancelled),
            "completed" => Some(BookingStatus::Completed),
            "no_show" => Some(BookingStatus::NoShow),
            _ => None,
        }
    }

    /// Whether a booking with this status occupies its court for
    /// conflict checking. Only active bookings block new reservations.
    pub fn blocks_schedule(&self) -> bool {
        matches!(self, BookingStatus::Active)
    }

    /// Whether a booking with this status counts as used court time in
    /// utilization reports. Completed and no-show bookings did hold the
    /// court; cancelled ones never did.
    pub fn counts_in_reports(&self) -> bool {
        matches!(
            self,
            BookingStatus::Active | BookingStatus::Completed | BookingStatus::NoShow
        )
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reservation of one court for one contiguous interval on one date.
///
/// Times are canonical minutes since midnight, half-open `[start, end)`.
/// Bookings are value snapshots: the engine never mutates them, status
/// transitions happen upstream and arrive with the next snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub court_id: u32,
    pub date: NaiveDate,
    pub start: u32,
    pub end: u32,
    pub status: BookingStatus,
}

impl Booking {
    pub fn duration_minutes(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// An empty or inverted interval never overlaps anything and is
    /// invisible to conflict checks.
    pub fn is_degenerate(&self) -> bool {
        self.start >= self.end
    }
}
