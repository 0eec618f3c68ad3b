//! The single interval-overlap predicate used by every component.
//! Intervals are half-open `[start, end)` minutes: a booking ending at
//! 10:00 and one starting at 10:00 do not touch.

/// True iff `[s1, e1)` and `[s2, e2)` share at least one instant.
///
/// Degenerate intervals (`start >= end`) never overlap anything.
pub fn overlaps(s1: u32, e1: u32, s2: u32, e2: u32) -> bool {
    if s1 >= e1 || s2 >= e2 {
        return false;
    }
    s1 < e2 && s2 < e1
}

/// Length in minutes of the intersection of `[s1, e1)` and `[s2, e2)`.
pub fn clipped_minutes(s1: u32, e1: u32, s2: u32, e2: u32) -> u32 {
    if !overlaps(s1, e1, s2, e2) {
        return 0;
    }
    e1.min(e2) - s1.max(s2)
}
