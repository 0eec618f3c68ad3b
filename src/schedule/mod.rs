mod columns;
mod conflict;
mod overlap;
mod slots;

pub use columns::*;
pub use conflict::*;
pub use overlap::*;
pub use slots::*;
