//! Scheduling domain models.
//!
//! Canonical in-memory representation of the waiting list and the session
//! calendar. Entities are read once at model-build time and are immutable
//! thereafter; all derived fields (ordinal days, minute offsets) are
//! computed at construction.

mod case;
mod session;
pub mod time;

pub use case::Case;
pub use session::Session;
pub use time::{minutes_since_midnight, ordinal_day, MINUTES_PER_DAY};
