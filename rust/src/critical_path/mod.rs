//! Critical path computation for Gantt highlighting.
//!
//! The result is advisory: it drives bar and arrow emphasis and is never used
//! to gate other scheduling logic, so bad input degrades the result instead of
//! producing an error.

mod calculation;
mod links;
mod types;

pub use calculation::{calculate_critical_path, dependency_slack};
pub use links::critical_links;
pub use types::{CriticalPathResult, ScheduleIssue};
