//! Core data types for the scheduling core.

use chrono::NaiveDate;
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::dates::parse_local_date;

// Note: We use std HashSet here for PyO3 interface compatibility

/// Precedence relation between a predecessor and its successor.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyType {
    #[default]
    #[serde(rename = "FS")]
    FinishToStart,
    #[serde(rename = "SS")]
    StartToStart,
    #[serde(rename = "FF")]
    FinishToFinish,
    /// Stored but never evaluated by critical path propagation.
    #[serde(rename = "SF")]
    StartToFinish,
}

impl DependencyType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FinishToStart => "FS",
            Self::StartToStart => "SS",
            Self::FinishToFinish => "FF",
            Self::StartToFinish => "SF",
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a dependency type code is not one of FS/SS/FF/SF.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown dependency type: {0}")]
pub struct UnknownDependencyType(pub String);

impl FromStr for DependencyType {
    type Err = UnknownDependencyType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FS" => Ok(Self::FinishToStart),
            "SS" => Ok(Self::StartToStart),
            "FF" => Ok(Self::FinishToFinish),
            "SF" => Ok(Self::StartToFinish),
            _ => Err(UnknownDependencyType(s.to_string())),
        }
    }
}

/// A typed dependency on a predecessor task.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    #[pyo3(get, set)]
    #[serde(rename = "taskId")]
    pub predecessor_id: String,
    #[pyo3(get, set)]
    #[serde(rename = "type", default)]
    pub kind: DependencyType,
}

#[pymethods]
impl Dependency {
    #[new]
    #[pyo3(signature = (predecessor_id, kind=DependencyType::FinishToStart))]
    fn new(predecessor_id: String, kind: DependencyType) -> Self {
        Self {
            predecessor_id,
            kind,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Dependency(predecessor_id={:?}, kind={})",
            self.predecessor_id, self.kind
        )
    }
}

/// A task record as supplied by the caller.
///
/// Dates are kept as `YYYY-MM-DD` strings and parsed on demand so that a
/// malformed record degrades to "no date" instead of failing the whole list.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub start_date: String,
    #[pyo3(get, set)]
    pub end_date: String,
    #[pyo3(get, set)]
    #[serde(default)]
    pub duration: i64,
    #[pyo3(get, set)]
    #[serde(default)]
    pub progress: i32,
    #[pyo3(get, set)]
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[pyo3(get, set)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[pyo3(get, set)]
    #[serde(default)]
    pub is_milestone: bool,
    #[pyo3(get, set)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i64>,
}

impl Task {
    #[inline]
    pub fn start(&self) -> Option<NaiveDate> {
        parse_local_date(&self.start_date)
    }

    #[inline]
    pub fn end(&self) -> Option<NaiveDate> {
        parse_local_date(&self.end_date)
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 100
    }

    /// Unfinished and past its end date; an unparseable end is never overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_complete() && self.end().is_some_and(|end| end < today)
    }
}

#[pymethods]
impl Task {
    #[new]
    #[pyo3(signature = (
        id,
        start_date,
        end_date,
        duration=0,
        progress=0,
        dependencies=Vec::new(),
        parent_id=None,
        is_milestone=false,
        order_index=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        id: String,
        start_date: String,
        end_date: String,
        duration: i64,
        progress: i32,
        dependencies: Vec<Dependency>,
        parent_id: Option<String>,
        is_milestone: bool,
        order_index: Option<i64>,
    ) -> Self {
        Self {
            id,
            start_date,
            end_date,
            duration,
            progress,
            dependencies,
            parent_id,
            is_milestone,
            order_index,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(id={:?}, start={}, end={}, deps={})",
            self.id,
            self.start_date,
            self.end_date,
            self.dependencies.len()
        )
    }
}

/// One dependency arrow with its emphasis flag.
#[pyclass(get_all)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencyLink {
    pub predecessor_id: String,
    pub successor_id: String,
    pub kind: DependencyType,
    pub is_critical: bool,
}

#[pymethods]
impl DependencyLink {
    fn __repr__(&self) -> String {
        format!(
            "DependencyLink({} -{}-> {}, critical={})",
            self.predecessor_id, self.kind, self.successor_id, self.is_critical
        )
    }
}

/// Critical path output handed across the Python boundary.
#[pyclass(get_all)]
#[derive(Clone, Debug, Default)]
pub struct CriticalPathReport {
    pub critical_task_ids: HashSet<String>,
    pub project_end: Option<NaiveDate>,
    pub links: Vec<DependencyLink>,
    pub issues: Vec<String>,
}

#[pymethods]
impl CriticalPathReport {
    fn __repr__(&self) -> String {
        format!(
            "CriticalPathReport(critical={}, project_end={:?}, links={}, issues={})",
            self.critical_task_ids.len(),
            self.project_end,
            self.links.len(),
            self.issues.len()
        )
    }
}

/// A task positioned in the flattened work-breakdown tree.
#[pyclass(get_all)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HierarchyRow {
    pub task: Task,
    /// Depth in the tree, roots are 0.
    pub level: u32,
    pub has_children: bool,
}

#[pymethods]
impl HierarchyRow {
    fn __repr__(&self) -> String {
        format!(
            "HierarchyRow(id={:?}, level={}, has_children={})",
            self.task.id, self.level, self.has_children
        )
    }
}

/// Candidate dates shown while a bar is being dragged.
#[pyclass(get_all)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragPreview {
    pub task_id: String,
    pub start_date: String,
    pub end_date: String,
    pub duration: i64,
}

#[pymethods]
impl DragPreview {
    fn __repr__(&self) -> String {
        format!(
            "DragPreview(task_id={:?}, start={}, end={}, duration={})",
            self.task_id, self.start_date, self.end_date, self.duration
        )
    }
}
