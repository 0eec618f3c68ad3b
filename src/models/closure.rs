use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Which courts a closure applies to. Serialized as the string `"all"`
/// or a plain court number, matching the upstream records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceScope {
    /// Every court in the facility.
    All,
    /// One specific court.
    Court(u32),
}

impl ResourceScope {
    pub fn matches(&self, court_id: u32) -> bool {
        match self {
            ResourceScope::All => true,
            ResourceScope::Court(id) => *id == court_id,
        }
    }
}

impl Serialize for ResourceScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResourceScope::All => serializer.serialize_str("all"),
            ResourceScope::Court(id) => serializer.serialize_u32(*id),
        }
    }
}

impl<'de> Deserialize<'de> for ResourceScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match &value {
            serde_json::Value::String(s) if s.eq_ignore_ascii_case("all") => {
                Ok(ResourceScope::All)
            }
            serde_json::Value::String(s) => s
                .parse::<u32>()
                .map(ResourceScope::Court)
                .map_err(|_| serde::de::Error::custom(format!("invalid court scope: {}", s))),
            serde_json::Value::Number(n) => n
                .as_u64()
                .map(|id| ResourceScope::Court(id as u32))
                .ok_or_else(|| serde::de::Error::custom("invalid court number")),
            _ => Err(serde::de::Error::custom("expected court id or \"all\"")),
        }
    }
}

impl std::fmt::Display for ResourceScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceScope::All => write!(f, "all courts"),
            ResourceScope::Court(id) => write!(f, "court {}", id),
        }
    }
}

/// A facility-declared unavailability window overriding normal
/// bookability. Inactive closures are filtered out upstream and never
/// reach the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Closure {
    pub scope: ResourceScope,
    pub date: NaiveDate,
    pub start: u32,
    pub end: u32,
    /// Display string for staff and members; opaque to the engine.
    pub reason: String,
}

impl Closure {
    pub fn is_degenerate(&self) -> bool {
        self.start >= self.end
    }
}
