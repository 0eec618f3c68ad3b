use serde::{Deserialize, Serialize};

use crate::config::FacilityConfig;
use crate::timeparse;

/// One tick of the scheduling grid, `[start, end)` minutes. Slots are
/// derived from config on demand and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: u32,
    pub end: u32,
}

impl TimeSlot {
    pub fn duration_minutes(&self) -> u32 {
        self.end - self.start
    }

    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            timeparse::to_hhmm(self.start),
            timeparse::to_hhmm(self.end)
        )
    }
}

/// The canonical slot sequence for one operating day.
///
/// Slots align to multiples of the slot width: a day start off the
/// grid produces one short leading slot up to the next grid boundary,
/// and the final slot is clipped to day end. The result is strictly
/// increasing and gap-free, so the configured periods can partition it
/// exactly.
pub fn day_slots(config: &FacilityConfig) -> Vec<TimeSlot> {
    let mut slots = Vec::new();
    if config.slot_minutes == 0 {
        return slots;
    }
    let mut cursor = config.day_start;
    while cursor < config.day_end {
        let next_boundary = if cursor % config.slot_minutes == 0 {
            cursor + config.slot_minutes
        } else {
            (cursor / config.slot_minutes + 1) * config.slot_minutes
        };
        let end = next_boundary.min(config.day_end);
        slots.push(TimeSlot { start: cursor, end });
        cursor = end;
    }
    slots
}
