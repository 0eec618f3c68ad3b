mod booking;
mod closure;
mod snapshot;

pub use booking::*;
pub use closure::*;
pub use snapshot::*;
