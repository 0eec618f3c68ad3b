pub mod cli;
pub mod config;
pub mod models;
pub mod report;
pub mod schedule;
pub mod timeparse;

pub use models::*;

/// Minutes in a day; every time of day lives in `[0, MINUTES_PER_DAY)`.
pub const MINUTES_PER_DAY: u32 = 24 * 60;
