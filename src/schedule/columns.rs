use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Booking;
use crate::schedule::overlaps;

/// Grid placement for one booking: which column it renders in, and how
/// many columns its overlap group needs. Always `column_index <
/// column_count`, and any two overlapping bookings get distinct
/// columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSlot {
    pub column_index: usize,
    pub column_count: usize,
}

/// Assign display columns to every active booking.
///
/// Works on any slice of bookings; grouping is scoped per court and
/// date internally, so day and week views call this identically.
/// Within each scope, bookings joined by chained time overlap form one
/// group, the group's column count is the maximum number of bookings
/// simultaneously on court at any instant, and columns are assigned
/// greedily in (start, id) order: each booking takes the lowest column
/// not used by an overlapping booking already placed. The (start, id)
/// order makes the layout deterministic across renders regardless of
/// input order, and for interval overlap the greedy pass never needs
/// more than `column_count` columns.
///
/// Recompute from scratch whenever the booking set changes; output is
/// keyed by booking id.
pub fn assign_columns(bookings: &[Booking]) -> HashMap<String, ColumnSlot> {
    let mut scopes: HashMap<(u32, NaiveDate), Vec<&Booking>> = HashMap::new();
    for booking in bookings {
        if !booking.status.blocks_schedule() {
            continue;
        }
        scopes
            .entry((booking.court_id, booking.date))
            .or_default()
            .push(booking);
    }

    let mut out = HashMap::new();
    for scope in scopes.into_values() {
        assign_scope(&scope, &mut out);
    }
    out
}

fn assign_scope(bookings: &[&Booking], out: &mut HashMap<String, ColumnSlot>) {
    for group in overlap_groups(bookings) {
        let column_count = max_simultaneous(&group).max(1);

        // Greedy interval coloring in (start, id) order.
        let mut placed: Vec<(usize, &Booking)> = Vec::with_capacity(group.len());
        for &booking in &group {
            let mut column = 0;
            loop {
                let taken = placed.iter().any(|(col, other)| {
                    *col == column && overlaps(other.start, other.end, booking.start, booking.end)
                });
                if !taken {
                    break;
                }
                column += 1;
            }
            placed.push((column, booking));
        }

        for (column, booking) in placed {
            out.insert(
                booking.id.clone(),
                ColumnSlot {
                    column_index: column,
                    column_count,
                },
            );
        }
    }
}

/// Partition one court/date's bookings into connected components under
/// the overlap relation. Overlap chains group transitively: A-B and
/// B-C put A, B, C together even when A and C never touch. Each
/// component comes back sorted by (start, id).
fn overlap_groups<'a>(bookings: &[&'a Booking]) -> Vec<Vec<&'a Booking>> {
    let mut groups: Vec<Vec<&Booking>> = bookings.iter().map(|b| vec![*b]).collect();

    // Merge any two groups containing an overlapping pair until no
    // merge applies.
    loop {
        let mut merged = false;
        'outer: for i in 0..groups.len() {
            for j in (i + 1)..groups.len() {
                let touches = groups[i].iter().any(|a| {
                    groups[j]
                        .iter()
                        .any(|b| overlaps(a.start, a.end, b.start, b.end))
                });
                if touches {
                    let absorbed = groups.swap_remove(j);
                    groups[i].extend(absorbed);
                    merged = true;
                    break 'outer;
                }
            }
        }
        if !merged {
            break;
        }
    }

    for group in &mut groups {
        group.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
    }
    groups.sort_by_key(|g| g[0].start);
    groups
}

/// Maximum number of bookings active at a single instant, by sweeping
/// the interval endpoints. With half-open intervals an end and a start
/// at the same minute do not count together, so ends apply first.
fn max_simultaneous(group: &[&Booking]) -> usize {
    let mut events: Vec<(u32, i32)> = Vec::with_capacity(group.len() * 2);
    for booking in group {
        if booking.is_degenerate() {
            continue;
        }
        events.push((booking.start, 1));
        events.push((booking.end, -1));
    }
    events.sort_by_key(|&(time, delta)| (time, delta));

    let mut active = 0i32;
    let mut max = 0i32;
    for (_, delta) in events {
        active += delta;
        max = max.max(active);
    }
    max as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingStatus;

    fn booking(id: &str, start: u32, end: u32) -> Booking {
        booking_on(id, 5, 1, start, end)
    }

    fn booking_on(id: &str, court: u32, day: u32, start: u32, end: u32) -> Booking {
        Booking {
            id: id.to_string(),
            court_id: court,
            date: NaiveDate::from_ymd_opt(2026, 6, day).unwrap(),
            start,
            end,
            status: BookingStatus::Active,
        }
    }

    #[test]
    fn test_chain_grouping_two_columns() {
        // A 09:00-10:00, B 09:30-10:30, C 10:15-11:00: one chained
        // group, two bookings at most on court at once.
        let bookings = vec![
            booking("a", 540, 600),
            booking("b", 570, 630),
            booking("c", 615, 660),
        ];
        let columns = assign_columns(&bookings);

        assert_eq!(columns["a"], ColumnSlot { column_index: 0, column_count: 2 });
        assert_eq!(columns["b"], ColumnSlot { column_index: 1, column_count: 2 });
        assert_eq!(columns["c"], ColumnSlot { column_index: 0, column_count: 2 });
    }

    #[test]
    fn test_non_overlapping_share_column_zero() {
        let bookings = vec![booking("a", 540, 600), booking("b", 600, 660)];
        let columns = assign_columns(&bookings);
        assert_eq!(columns["a"], ColumnSlot { column_index: 0, column_count: 1 });
        assert_eq!(columns["b"], ColumnSlot { column_index: 0, column_count: 1 });
    }

    #[test]
    fn test_overlapping_pairs_get_distinct_columns() {
        let bookings = vec![
            booking("a", 540, 720),
            booking("b", 560, 620),
            booking("c", 600, 700),
            booking("d", 650, 710),
        ];
        let columns = assign_columns(&bookings);

        for b in &bookings {
            assert!(columns[&b.id].column_index < columns[&b.id].column_count);
        }
        for a in &bookings {
            for b in &bookings {
                if a.id != b.id && overlaps(a.start, a.end, b.start, b.end) {
                    assert_ne!(columns[&a.id].column_index, columns[&b.id].column_index);
                }
            }
        }
    }

    #[test]
    fn test_column_count_is_max_simultaneous() {
        // Star shape: the long booking overlaps both short ones, but
        // the short ones never coincide. Two columns suffice even
        // though three bookings overlap the long one pairwise.
        let bookings = vec![
            booking("long", 540, 720),
            booking("early", 550, 570),
            booking("late", 690, 710),
        ];
        let columns = assign_columns(&bookings);
        assert_eq!(columns["long"].column_count, 2);
        assert_eq!(columns["long"].column_index, 0);
        assert_eq!(columns["early"].column_index, 1);
        assert_eq!(columns["late"].column_index, 1);

        // Cross-check against a brute-force endpoint sweep.
        let mut peak = 0;
        for b in &bookings {
            for probe in [b.start, b.end.saturating_sub(1)] {
                let active = bookings
                    .iter()
                    .filter(|o| o.start <= probe && probe < o.end)
                    .count();
                peak = peak.max(active);
            }
        }
        assert_eq!(columns["long"].column_count, peak);
    }

    #[test]
    fn test_deterministic_tiebreak_on_equal_start() {
        // Equal starts take columns in id order, whatever the input order.
        let forward = vec![booking("a", 540, 600), booking("b", 540, 600)];
        let reversed = vec![booking("b", 540, 600), booking("a", 540, 600)];

        let cols_f = assign_columns(&forward);
        let cols_r = assign_columns(&reversed);
        assert_eq!(cols_f["a"].column_index, 0);
        assert_eq!(cols_f["b"].column_index, 1);
        assert_eq!(cols_f["a"], cols_r["a"]);
        assert_eq!(cols_f["b"], cols_r["b"]);
    }

    #[test]
    fn test_cancelled_bookings_are_skipped() {
        let mut cancelled = booking("x", 540, 600);
        cancelled.status = BookingStatus::Cancelled;
        let bookings = vec![cancelled, booking("a", 540, 600)];

        let columns = assign_columns(&bookings);
        assert!(!columns.contains_key("x"));
        assert_eq!(columns["a"], ColumnSlot { column_index: 0, column_count: 1 });
    }

    #[test]
    fn test_scoping_per_court_and_date() {
        // Same times on different courts and days never share a group.
        let bookings = vec![
            booking_on("a", 5, 1, 540, 600),
            booking_on("b", 6, 1, 540, 600),
            booking_on("c", 5, 2, 540, 600),
        ];
        let columns = assign_columns(&bookings);
        for id in ["a", "b", "c"] {
            assert_eq!(columns[id], ColumnSlot { column_index: 0, column_count: 1 });
        }
    }

    #[test]
    fn test_degenerate_booking_is_a_singleton() {
        let bookings = vec![booking("empty", 600, 600), booking("a", 540, 660)];
        let columns = assign_columns(&bookings);
        assert_eq!(columns["empty"], ColumnSlot { column_index: 0, column_count: 1 });
        assert_eq!(columns["a"], ColumnSlot { column_index: 0, column_count: 1 });
    }

    #[test]
    fn test_empty_input() {
        assert!(assign_columns(&[]).is_empty());
    }
}
