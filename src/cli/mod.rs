mod check;
mod layout;
mod report;

pub use check::*;
pub use layout::*;
pub use report::*;

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::config::FacilityConfig;
use crate::models::Snapshot;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn print<T: Serialize + std::fmt::Display>(&self, value: &T) {
        match self {
            OutputFormat::Human => println!("{}", value),
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(value).unwrap());
            }
        }
    }
}

/// Load the snapshot and facility config a command operates on. Every
/// command is read-only over these.
pub fn load_inputs(snapshot: &Path, config: Option<&Path>) -> Result<(Snapshot, FacilityConfig)> {
    let snapshot = Snapshot::load(snapshot)?;
    let config = FacilityConfig::load(config)?;
    config.validate()?;
    Ok((snapshot, config))
}
