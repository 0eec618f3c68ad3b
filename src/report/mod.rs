use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, FacilityConfig};
use crate::models::Snapshot;
use crate::schedule::{clipped_minutes, day_slots, overlaps};
use crate::timeparse;

/// Slot counts for one period (or the whole day). Closed slots are
/// excluded from the utilization denominator: `total` is booked plus
/// available, and `utilization_pct = round(booked / total * 100)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounts {
    pub booked: u32,
    pub available: u32,
    pub closed: u32,
    pub total: u32,
    pub utilization_pct: u32,
}

impl UsageCounts {
    fn add_booked(&mut self) {
        self.booked += 1;
    }

    fn add_available(&mut self) {
        self.available += 1;
    }

    fn add_closed(&mut self) {
        self.closed += 1;
    }

    fn finish(&mut self) {
        self.total = self.booked + self.available;
        self.utilization_pct = if self.total == 0 {
            0
        } else {
            (self.booked as f64 / self.total as f64 * 100.0).round() as u32
        };
    }

    fn absorb(&mut self, other: &UsageCounts) {
        self.booked += other.booked;
        self.available += other.available;
        self.closed += other.closed;
    }
}

/// Usage for one named period of the day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodUsage {
    pub name: String,
    #[serde(flatten)]
    pub counts: UsageCounts,
}

/// Court-slot utilization for a single date, per period and overall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayUtilization {
    pub date: NaiveDate,
    pub periods: Vec<PeriodUsage>,
    pub total: UsageCounts,
}

/// Booked court-hours falling inside one period window, summed over a
/// date range by clipping each booking to the window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodHours {
    pub name: String,
    pub booked_hours: f64,
}

/// Utilization over an inclusive date range: summed per-slot counts
/// plus duration-based period buckets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeUtilization {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub periods: Vec<PeriodHours>,
    pub total_booked_hours: f64,
    pub total: UsageCounts,
}

/// Classify every court-slot on `date` as closed, booked, or
/// available, and aggregate per period and overall.
///
/// Closure wins over booking for a slot (a booking inside a closure
/// window is administrative, not member usage). Bookings count if
/// their status holds court time: active, completed, or no-show.
pub fn day_utilization(
    snapshot: &Snapshot,
    config: &FacilityConfig,
    date: NaiveDate,
) -> Result<DayUtilization, ConfigError> {
    config.validate()?;

    let slots = day_slots(config);
    let mut periods: Vec<PeriodUsage> = config
        .periods
        .iter()
        .map(|p| PeriodUsage {
            name: p.name.clone(),
            counts: UsageCounts::default(),
        })
        .collect();

    for court_id in config.court_ids() {
        let closures: Vec<_> = snapshot.closures_on(date, court_id).collect();
        let bookings: Vec<_> = snapshot
            .bookings_on(date, court_id)
            .filter(|b| b.status.counts_in_reports())
            .collect();

        for slot in &slots {
            // validate() guarantees period coverage; a miss here means
            // the config changed underneath us.
            let index = config
                .periods
                .iter()
                .position(|p| p.start <= slot.start && slot.start < p.end)
                .ok_or_else(|| ConfigError::PeriodGap(timeparse::to_hhmm(slot.start)))?;
            let counts = &mut periods[index].counts;

            if closures
                .iter()
                .any(|c| overlaps(c.start, c.end, slot.start, slot.end))
            {
                counts.add_closed();
            } else if bookings
                .iter()
                .any(|b| overlaps(b.start, b.end, slot.start, slot.end))
            {
                counts.add_booked();
            } else {
                counts.add_available();
            }
        }
    }

    let mut total = UsageCounts::default();
    for period in &mut periods {
        total.absorb(&period.counts);
        period.counts.finish();
    }
    total.finish();

    Ok(DayUtilization {
        date,
        periods,
        total,
    })
}

/// Aggregate an inclusive date range.
///
/// Slot counts sum the per-date classification. Booked hours clip each
/// counting booking's interval to every period window and sum the
/// clipped minutes; on a single day with slot-aligned bookings the two
/// views agree.
pub fn range_utilization(
    snapshot: &Snapshot,
    config: &FacilityConfig,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<RangeUtilization, ConfigError> {
    config.validate()?;

    let mut total = UsageCounts::default();
    let mut date = from;
    while date <= to {
        let day = day_utilization(snapshot, config, date)?;
        total.absorb(&day.total);
        date = date.succ_opt().expect("date overflow");
    }
    total.finish();

    let mut periods: Vec<PeriodHours> = config
        .periods
        .iter()
        .map(|p| PeriodHours {
            name: p.name.clone(),
            booked_hours: 0.0,
        })
        .collect();
    let mut total_booked_hours = 0.0;

    for booking in &snapshot.bookings {
        if !booking.status.counts_in_reports() || booking.date < from || booking.date > to {
            continue;
        }
        for (period, hours) in config.periods.iter().zip(periods.iter_mut()) {
            let minutes = clipped_minutes(booking.start, booking.end, period.start, period.end);
            let h = minutes as f64 / 60.0;
            hours.booked_hours += h;
            total_booked_hours += h;
        }
    }

    Ok(RangeUtilization {
        from,
        to,
        periods,
        total_booked_hours,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Booking, BookingStatus, Closure, ResourceScope};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    fn booking(id: &str, court: u32, start: u32, end: u32, status: BookingStatus) -> Booking {
        Booking {
            id: id.to_string(),
            court_id: court,
            date: date(),
            start,
            end,
            status,
        }
    }

    #[test]
    fn test_empty_facility_reports_zero_utilization() {
        let config = FacilityConfig::default();
        let report = day_utilization(&Snapshot::default(), &config, date()).unwrap();

        // 17 courts x 14 slots, nothing booked or closed.
        assert_eq!(report.total.total, 17 * 14);
        assert_eq!(report.total.booked, 0);
        assert_eq!(report.total.available, report.total.total);
        assert_eq!(report.total.utilization_pct, 0);

        let morning = &report.periods[0];
        assert_eq!(morning.name, "Morning");
        assert_eq!(morning.counts.booked, 0);
        assert_eq!(morning.counts.available, morning.counts.total);
        assert_eq!(morning.counts.total, 17 * 4);
    }

    #[test]
    fn test_booked_and_closed_classification() {
        let config = FacilityConfig::default();
        let snapshot = Snapshot::new(
            vec![booking("b1", 1, 540, 600, BookingStatus::Active)],
            vec![Closure {
                scope: ResourceScope::All,
                date: date(),
                start: 720,
                end: 780,
                reason: "Maintenance".to_string(),
            }],
        );

        let report = day_utilization(&snapshot, &config, date()).unwrap();

        // One 09:00-10:00 booking occupies exactly one slot.
        assert_eq!(report.total.booked, 1);
        // The 12:00-13:00 all-courts closure takes one slot per court,
        // excluded from the denominator.
        assert_eq!(report.total.closed, 17);
        assert_eq!(report.total.total, 17 * 14 - 17);
        assert_eq!(report.total.booked + report.total.available, report.total.total);

        // The closure lands entirely in the Afternoon period.
        let afternoon = &report.periods[1];
        assert_eq!(afternoon.counts.closed, 17);
        let prime = &report.periods[2];
        assert_eq!(prime.counts.closed, 0);
    }

    #[test]
    fn test_cancelled_excluded_completed_counted() {
        let config = FacilityConfig::default();
        let snapshot = Snapshot::new(
            vec![
                booking("gone", 1, 540, 600, BookingStatus::Cancelled),
                booking("done", 2, 540, 600, BookingStatus::Completed),
                booking("ghost", 3, 540, 600, BookingStatus::NoShow),
            ],
            vec![],
        );
        let report = day_utilization(&snapshot, &config, date()).unwrap();
        assert_eq!(report.total.booked, 2);
    }

    #[test]
    fn test_utilization_bounds() {
        let config = FacilityConfig::default();
        // Court 1 fully booked all day.
        let snapshot = Snapshot::new(
            vec![booking("all_day", 1, 510, 1320, BookingStatus::Active)],
            vec![],
        );
        let report = day_utilization(&snapshot, &config, date()).unwrap();

        for period in report.periods.iter() {
            assert!(period.counts.utilization_pct <= 100);
            assert_eq!(
                period.counts.booked + period.counts.available,
                period.counts.total
            );
        }
        // 14 of 238 slots booked.
        assert_eq!(report.total.booked, 14);
        assert_eq!(report.total.utilization_pct, 6);
    }

    #[test]
    fn test_partial_overlap_books_the_slot() {
        let config = FacilityConfig::default();
        // 09:30-10:30 touches both the 09:00 and 10:00 slots.
        let snapshot = Snapshot::new(
            vec![booking("b1", 1, 570, 630, BookingStatus::Active)],
            vec![],
        );
        let report = day_utilization(&snapshot, &config, date()).unwrap();
        assert_eq!(report.total.booked, 2);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = FacilityConfig::default();
        config.periods.pop();
        let err = day_utilization(&Snapshot::default(), &config, date()).unwrap_err();
        assert!(matches!(err, ConfigError::PeriodGap(_)));
    }

    #[test]
    fn test_range_hours_agree_with_day_slots() {
        let config = FacilityConfig::default();
        // 09:00-11:00 on court 1: two slots, two booked hours, Morning.
        let snapshot = Snapshot::new(
            vec![booking("b1", 1, 540, 660, BookingStatus::Active)],
            vec![],
        );

        let day = day_utilization(&snapshot, &config, date()).unwrap();
        assert_eq!(day.total.booked, 2);

        let range = range_utilization(&snapshot, &config, date(), date()).unwrap();
        assert_eq!(range.total_booked_hours, 2.0);
        assert_eq!(range.periods[0].name, "Morning");
        assert_eq!(range.periods[0].booked_hours, 2.0);
        assert_eq!(range.periods[1].booked_hours, 0.0);
        assert_eq!(range.total, day.total);
    }

    #[test]
    fn test_range_clips_across_period_boundary() {
        let config = FacilityConfig::default();
        // 11:00-13:30 spans Morning and Afternoon.
        let snapshot = Snapshot::new(
            vec![booking("b1", 1, 660, 810, BookingStatus::Active)],
            vec![],
        );
        let range = range_utilization(&snapshot, &config, date(), date()).unwrap();
        assert_eq!(range.periods[0].booked_hours, 1.0);
        assert_eq!(range.periods[1].booked_hours, 1.5);
        assert_eq!(range.total_booked_hours, 2.5);
    }

    #[test]
    fn test_range_sums_multiple_days() {
        let config = FacilityConfig::default();
        let day2 = date().succ_opt().unwrap();
        let mut b2 = booking("b2", 1, 540, 600, BookingStatus::Active);
        b2.date = day2;
        let snapshot = Snapshot::new(
            vec![booking("b1", 1, 540, 600, BookingStatus::Active), b2],
            vec![],
        );

        let range = range_utilization(&snapshot, &config, date(), day2).unwrap();
        assert_eq!(range.total.booked, 2);
        assert_eq!(range.total.total, 2 * 17 * 14);
        assert_eq!(range.total_booked_hours, 2.0);
    }
}
