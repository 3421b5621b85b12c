//! Types for critical path computation.

use chrono::NaiveDate;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::models::{CriticalPathReport, DependencyLink};

/// Input the computation ignored rather than failed on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleIssue {
    #[error("Task {task_id}: unparseable {field} {value:?}")]
    InvalidDate {
        task_id: String,
        field: &'static str,
        value: String,
    },
    #[error("Task {task_id}: predecessor {predecessor_id} not found")]
    DanglingDependency {
        task_id: String,
        predecessor_id: String,
    },
}

/// Result of critical path computation over one task list.
#[derive(Clone, Debug, Default)]
pub struct CriticalPathResult {
    /// Task IDs on the zero-slack path, including propagated summaries.
    pub critical_task_ids: FxHashSet<String>,
    /// Latest valid end date in the list (the project's finish).
    pub project_end: Option<NaiveDate>,
    /// One entry per drawable dependency, in task then dependency order.
    pub links: Vec<DependencyLink>,
    pub issues: Vec<ScheduleIssue>,
}

impl CriticalPathResult {
    #[inline]
    pub fn is_critical(&self, task_id: &str) -> bool {
        self.critical_task_ids.contains(task_id)
    }
}

impl From<CriticalPathResult> for CriticalPathReport {
    fn from(result: CriticalPathResult) -> Self {
        Self {
            critical_task_ids: result.critical_task_ids.into_iter().collect(),
            project_end: result.project_end,
            links: result.links,
            issues: result.issues.iter().map(ToString::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_messages() {
        let issue = ScheduleIssue::DanglingDependency {
            task_id: "b".to_string(),
            predecessor_id: "ghost".to_string(),
        };
        assert_eq!(issue.to_string(), "Task b: predecessor ghost not found");

        let issue = ScheduleIssue::InvalidDate {
            task_id: "a".to_string(),
            field: "endDate",
            value: "2024-13-01".to_string(),
        };
        assert_eq!(issue.to_string(), "Task a: unparseable endDate \"2024-13-01\"");
    }

    #[test]
    fn test_report_conversion() {
        let mut result = CriticalPathResult::default();
        result.critical_task_ids.insert("a".to_string());
        result.issues.push(ScheduleIssue::DanglingDependency {
            task_id: "a".to_string(),
            predecessor_id: "x".to_string(),
        });

        assert!(result.is_critical("a"));
        let report = CriticalPathReport::from(result);
        assert!(report.critical_task_ids.contains("a"));
        assert_eq!(report.issues.len(), 1);
    }
}
