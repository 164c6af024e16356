//! Context derived from the student's records.
//!
//! - [`ContextSummary`]: digest of profile, calendar and tasks for routing
//! - [`time_window`]: UTC timestamp normalization, upcoming-event and
//!   active-task filters that skip malformed records

pub mod summary;
pub mod time_window;

pub use summary::{ContextSummary, StudentSummary};
pub use time_window::{
    Filtered, SkippedRecord, event_start, filter_active_tasks, filter_upcoming_events,
    parse_timestamp,
};
