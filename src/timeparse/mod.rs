use chrono::{NaiveDateTime, Timelike};

use crate::MINUTES_PER_DAY;

/// A time-of-day value as it arrives from the upstream store, before
/// normalization. Spreadsheet-style sources hand back a mix of
/// fractional-day numbers, clock strings, and full date-times for what
/// is logically the same field.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeValue {
    /// Fractional day in `[0, 1)` or a minute count in `[0, 1440)`.
    Number(f64),
    /// "H:MM", "HH:MM", "HH:MM:SS", or "H:MM AM/PM".
    Text(String),
    /// A date-time cell; only the local hour and minute matter.
    DateTime(NaiveDateTime),
}

/// Normalize any supported representation to minutes since midnight.
///
/// Returns `None` for anything unparseable; malformed input is a
/// "cannot schedule" signal for the caller, never a panic. Resolution
/// is whole minutes.
pub fn normalize(value: &TimeValue) -> Option<u32> {
    match value {
        TimeValue::Number(n) => normalize_number(*n),
        TimeValue::Text(s) => parse_clock(s),
        TimeValue::DateTime(dt) => Some(dt.hour() * 60 + dt.minute()),
    }
}

/// Normalize a numeric cell: a fraction of a day in `[0, 1)` scales to
/// minutes, a whole number in `[0, 1440)` is already minutes.
pub fn normalize_number(n: f64) -> Option<u32> {
    if !n.is_finite() || n < 0.0 {
        return None;
    }
    if n < 1.0 {
        // Fractional day. Rounding can land on 1440 (e.g. 0.99999),
        // which wraps to midnight.
        let minutes = (n * MINUTES_PER_DAY as f64).round() as u32;
        return Some(minutes % MINUTES_PER_DAY);
    }
    if n.fract() == 0.0 && (n as u32) < MINUTES_PER_DAY {
        return Some(n as u32);
    }
    None
}

/// Parse a clock string to minutes since midnight.
///
/// Accepts "H:MM", "HH:MM", "HH:MM:SS", and 12-hour "H:MM AM"/"H:MM PM"
/// (with or without the space, any case). Falls back to date-time
/// strings, taking the time component.
pub fn parse_clock(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    parse_hm(s).or_else(|| parse_datetime_text(s))
}

fn parse_hm(s: &str) -> Option<u32> {
    let upper = s.to_ascii_uppercase();
    let (clock, meridiem) = if let Some(rest) = upper.strip_suffix("AM") {
        (rest.trim_end().to_string(), Some(false))
    } else if let Some(rest) = upper.strip_suffix("PM") {
        (rest.trim_end().to_string(), Some(true))
    } else {
        (upper, None)
    };

    let parts: Vec<&str> = clock.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }

    let hour: u32 = parts[0].trim().parse().ok()?;
    let minute: u32 = parts[1].trim().parse().ok()?;
    if parts.len() == 3 {
        let second: u32 = parts[2].trim().parse().ok()?;
        if second > 59 {
            return None;
        }
    }
    if minute > 59 {
        return None;
    }

    let hour = match meridiem {
        // 12-hour clock: 12 AM is midnight, 12 PM is noon.
        Some(pm) => {
            if hour == 0 || hour > 12 {
                return None;
            }
            match (hour, pm) {
                (12, false) => 0,
                (12, true) => 12,
                (h, false) => h,
                (h, true) => h + 12,
            }
        }
        None => {
            if hour > 23 {
                return None;
            }
            hour
        }
    };

    Some(hour * 60 + minute)
}

fn parse_datetime_text(s: &str) -> Option<u32> {
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.hour() * 60 + dt.minute());
        }
    }
    None
}

/// Canonical "HH:MM" form of a minute of day.
pub fn to_hhmm(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Canonical "HH:MM" form of any supported representation, or the
/// empty string when the input is unparseable.
pub fn normalize_to_hhmm(value: &TimeValue) -> String {
    match normalize(value) {
        Some(m) => to_hhmm(m),
        None => String::new(),
    }
}
