//! Rust implementation of the Gantt scheduling core.
//!
//! Provides the critical path engine, hierarchy flattening, the drag-to-
//! reschedule state machine and timeline arithmetic, with Python bindings.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::prelude::*;
use rustc_hash::FxHashSet;
use std::collections::HashSet;

mod config;
pub mod critical_path;
pub mod dates;
pub mod drag;
pub mod hierarchy;
pub mod logging;
mod models;
pub mod timeline;

pub use config::{CriticalPathConfig, DEFAULT_SLACK_THRESHOLD_DAYS};
pub use critical_path::{
    calculate_critical_path, critical_links, dependency_slack, CriticalPathResult, ScheduleIssue,
};
pub use dates::{add_days, days_diff, format_date, is_overdue, parse_local_date, task_duration};
pub use drag::{CommittedChange, DragError, DragMode, DragSession};
pub use hierarchy::flatten_hierarchy;
pub use models::{
    CriticalPathReport, Dependency, DependencyLink, DependencyType, DragPreview, HierarchyRow,
    Task, UnknownDependencyType,
};
pub use timeline::{timeline_bounds, TimelineBounds, TimelineScale, ViewMode};

fn value_error(err: impl std::fmt::Display) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

/// Compute the critical path of one project's tasks.
///
/// # Arguments
/// * `tasks` - Tasks of the project (any order)
/// * `config` - Slack threshold and verbosity; defaults when omitted
///
/// # Returns
/// * CriticalPathReport with critical task IDs, project end, arrow flags and
///   any ignored input
#[pyfunction]
#[pyo3(name = "critical_path", signature = (tasks, config=None))]
fn py_critical_path(tasks: Vec<Task>, config: Option<CriticalPathConfig>) -> CriticalPathReport {
    let config = config.unwrap_or_default();
    calculate_critical_path(&tasks, &config).into()
}

/// Flatten tasks into display rows, skipping the subtrees of collapsed tasks.
#[pyfunction]
#[pyo3(name = "flatten_hierarchy", signature = (tasks, collapsed=HashSet::new()))]
fn py_flatten_hierarchy(tasks: Vec<Task>, collapsed: HashSet<String>) -> Vec<HierarchyRow> {
    let collapsed: FxHashSet<String> = collapsed.into_iter().collect();
    flatten_hierarchy(&tasks, &collapsed)
}

/// Whether an unfinished task's end date is before `today`.
#[pyfunction]
#[pyo3(name = "is_overdue")]
fn py_is_overdue(end_date: String, progress: i32, today: NaiveDate) -> bool {
    is_overdue(&end_date, progress, today)
}

/// Duration in days of a task record (0 for milestones and bad spans).
#[pyfunction]
#[pyo3(name = "task_duration", signature = (start_date, end_date, is_milestone=false))]
fn py_task_duration(start_date: String, end_date: String, is_milestone: bool) -> i64 {
    task_duration(&start_date, &end_date, is_milestone)
}

/// Padded (start, end) date window for drawing `tasks`.
#[pyfunction]
#[pyo3(name = "timeline_bounds")]
fn py_timeline_bounds(tasks: Vec<Task>, day_width: f64, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let bounds = timeline_bounds(&tasks, day_width, today);
    (bounds.start, bounds.end)
}

/// Drag state machine (PyO3 wrapper).
#[pyclass(name = "DragSession")]
#[derive(Clone, Debug)]
pub struct PyDragSession {
    inner: DragSession,
}

#[pymethods]
impl PyDragSession {
    /// Scale from an explicit `day_width`, else from `view_mode`
    /// ("day", "week", "month", "year"), else the day preset.
    #[new]
    #[pyo3(signature = (day_width=None, view_mode=None, verbosity=0))]
    fn new(day_width: Option<f64>, view_mode: Option<String>, verbosity: u8) -> PyResult<Self> {
        let scale = match (day_width, view_mode) {
            (Some(width), _) => TimelineScale::with_day_width(width)
                .ok_or_else(|| value_error(format!("Invalid day width: {}", width)))?,
            (None, Some(mode)) => {
                TimelineScale::for_view_mode(mode.parse::<ViewMode>().map_err(value_error)?)
            }
            (None, None) => TimelineScale::default(),
        };
        Ok(Self {
            inner: DragSession::new(scale).with_verbosity(verbosity),
        })
    }

    /// Start dragging; mode is "move", "resize-left" or "resize-right".
    fn begin(&mut self, mode: String, task: Task, pointer_x: f64) -> PyResult<()> {
        let mode: DragMode = mode.parse().map_err(value_error)?;
        self.inner.begin(mode, &task, pointer_x).map_err(value_error)
    }

    fn update(&mut self, pointer_x: f64) -> Option<DragPreview> {
        self.inner.update(pointer_x).cloned()
    }

    /// Returns the rescheduled task, or None if the pointer never moved a day.
    fn commit(&mut self) -> Option<Task> {
        self.inner.commit().map(|change| change.task)
    }

    fn cancel(&mut self) {
        self.inner.cancel();
    }

    fn zoom_in(&mut self) {
        let mut scale = self.inner.scale();
        scale.zoom_in();
        self.inner.set_scale(scale);
    }

    fn zoom_out(&mut self) {
        let mut scale = self.inner.scale();
        scale.zoom_out();
        self.inner.set_scale(scale);
    }

    #[getter]
    fn day_width(&self) -> f64 {
        self.inner.scale().day_width()
    }

    #[getter]
    fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    fn __repr__(&self) -> String {
        format!(
            "DragSession(day_width={}, active={:?})",
            self.inner.scale().day_width(),
            self.inner.active_task_id()
        )
    }
}

/// The gantt.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<DependencyType>()?;
    m.add_class::<Dependency>()?;
    m.add_class::<Task>()?;
    m.add_class::<DependencyLink>()?;
    m.add_class::<CriticalPathReport>()?;
    m.add_class::<HierarchyRow>()?;
    m.add_class::<DragPreview>()?;

    // Config types
    m.add_class::<CriticalPathConfig>()?;

    // Algorithms
    m.add_class::<PyDragSession>()?;
    m.add_function(wrap_pyfunction!(py_critical_path, m)?)?;
    m.add_function(wrap_pyfunction!(py_flatten_hierarchy, m)?)?;
    m.add_function(wrap_pyfunction!(py_is_overdue, m)?)?;
    m.add_function(wrap_pyfunction!(py_task_duration, m)?)?;
    m.add_function(wrap_pyfunction!(py_timeline_bounds, m)?)?;

    Ok(())
}
