use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::timeparse;

/// Configuration contract violations. These are caller-visible errors,
/// not data-quality warnings: a config that fails validation must be
/// fixed before any report is trusted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("day start {0} is not before day end {1}")]
    EmptyDay(String, String),
    #[error("slot width must be positive")]
    BadSlotWidth,
    #[error("facility must have at least one court")]
    NoCourts,
    #[error("no periods configured")]
    NoPeriods,
    #[error("periods must tile the day exactly; gap or overlap at {0}")]
    PeriodGap(String),
    #[error("period '{name}' boundary {at} does not land on a slot boundary")]
    PeriodMisaligned { name: String, at: String },
}

/// A named contiguous range of the operating day, `[start, end)` in
/// minutes. The configured periods must partition the day exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodConfig {
    pub name: String,
    #[serde(serialize_with = "ser_clock", deserialize_with = "de_clock")]
    pub start: u32,
    #[serde(serialize_with = "ser_clock", deserialize_with = "de_clock")]
    pub end: u32,
}

/// Facility-level scheduling configuration, owned by an external
/// collaborator and loaded read-only here. Clock fields accept any
/// representation the time normalizer understands and serialize back
/// as "HH:MM".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityConfig {
    #[serde(serialize_with = "ser_clock", deserialize_with = "de_clock")]
    pub day_start: u32,
    #[serde(serialize_with = "ser_clock", deserialize_with = "de_clock")]
    pub day_end: u32,
    pub slot_minutes: u32,
    pub court_count: u32,
    pub periods: Vec<PeriodConfig>,
    /// Courts with a special display name (e.g. a sponsored show court).
    #[serde(default)]
    pub court_names: HashMap<u32, String>,
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            day_start: 8 * 60 + 30,
            day_end: 22 * 60,
            slot_minutes: 60,
            court_count: 17,
            periods: vec![
                PeriodConfig {
                    name: "Morning".to_string(),
                    start: 8 * 60 + 30,
                    end: 12 * 60,
                },
                PeriodConfig {
                    name: "Afternoon".to_string(),
                    start: 12 * 60,
                    end: 17 * 60,
                },
                PeriodConfig {
                    name: "Prime".to_string(),
                    start: 17 * 60,
                    end: 22 * 60,
                },
            ],
            court_names: HashMap::new(),
        }
    }
}

impl FacilityConfig {
    /// Load configuration from a JSON file, falling back to defaults
    /// when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)
                    .with_context(|| format!("Failed to read config file {}", p.display()))?;
                serde_json::from_str(&content).context("Failed to parse config file")?
            }
            None => Self::default(),
        };
        Ok(config)
    }

    /// Check the structural invariants: a non-empty day, a positive
    /// slot width, and periods that tile `[day_start, day_end)` with
    /// every boundary on a slot boundary.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_minutes == 0 {
            return Err(ConfigError::BadSlotWidth);
        }
        if self.day_start >= self.day_end {
            return Err(ConfigError::EmptyDay(
                timeparse::to_hhmm(self.day_start),
                timeparse::to_hhmm(self.day_end),
            ));
        }
        if self.court_count == 0 {
            return Err(ConfigError::NoCourts);
        }
        if self.periods.is_empty() {
            return Err(ConfigError::NoPeriods);
        }

        let mut cursor = self.day_start;
        for period in &self.periods {
            if period.start != cursor {
                return Err(ConfigError::PeriodGap(timeparse::to_hhmm(period.start)));
            }
            if period.end <= period.start {
                return Err(ConfigError::PeriodGap(timeparse::to_hhmm(period.end)));
            }
            cursor = period.end;
        }
        if cursor != self.day_end {
            return Err(ConfigError::PeriodGap(timeparse::to_hhmm(cursor)));
        }

        for period in &self.periods {
            for at in [period.start, period.end] {
                if !self.is_slot_boundary(at) {
                    return Err(ConfigError::PeriodMisaligned {
                        name: period.name.clone(),
                        at: timeparse::to_hhmm(at),
                    });
                }
            }
        }
        Ok(())
    }

    /// The period containing `minute`, if any.
    pub fn period_for(&self, minute: u32) -> Option<&PeriodConfig> {
        self.periods
            .iter()
            .find(|p| p.start <= minute && minute < p.end)
    }

    /// Display name for a court: the configured special name, or
    /// "Court N".
    pub fn court_name(&self, court_id: u32) -> String {
        self.court_names
            .get(&court_id)
            .cloned()
            .unwrap_or_else(|| format!("Court {}", court_id))
    }

    /// All court ids in the facility, in display order.
    pub fn court_ids(&self) -> impl Iterator<Item = u32> {
        1..=self.court_count
    }

    /// Whether `minute` lands on a boundary of the slot sequence. The
    /// grid aligns to multiples of the slot width, with day start and
    /// day end always boundaries (the first and last slots may be
    /// partial).
    fn is_slot_boundary(&self, minute: u32) -> bool {
        if minute == self.day_start || minute == self.day_end {
            return true;
        }
        minute > self.day_start
            && minute < self.day_end
            && minute % self.slot_minutes == 0
    }
}

fn ser_clock<S: Serializer>(minutes: &u32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&timeparse::to_hhmm(*minutes))
}

fn de_clock<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    let parsed = match &value {
        serde_json::Value::String(s) => timeparse::parse_clock(s),
        serde_json::Value::Number(n) => n.as_f64().and_then(timeparse::normalize_number),
        _ => None,
    };
    parsed.ok_or_else(|| serde::de::Error::custom(format!("invalid clock value: {}", value)))
}
