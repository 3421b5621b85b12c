//! Drag-to-move and drag-to-resize state machine for Gantt bars.
//!
//! A session is `Idle` until [`DragSession::begin`] and returns to `Idle` on
//! [`DragSession::commit`] or [`DragSession::cancel`]. Pointer movement only
//! updates a preview; the task record is replaced once, on commit.

use chrono::NaiveDate;
use std::str::FromStr;
use thiserror::Error;

use crate::dates::{add_days, days_diff, format_date};
use crate::models::{DragPreview, Task};
use crate::timeline::TimelineScale;
use crate::{log_changes, log_checks};

/// Errors that can occur when starting a drag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DragError {
    #[error("Task {0} is already being dragged")]
    AlreadyDragging(String),
    #[error("Task {0} has unparseable dates")]
    InvalidTaskDates(String),
    #[error("Task not found: {0}")]
    UnknownTask(String),
    #[error("Task {0} is a summary task and cannot be rescheduled directly")]
    SummaryTask(String),
    #[error("Unknown drag mode: {0}")]
    UnknownMode(String),
}

/// Which part of the bar is being dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragMode {
    /// Whole bar: start and end shift together.
    Move,
    /// Left handle: start only.
    ResizeLeft,
    /// Right handle: end only.
    ResizeRight,
}

impl FromStr for DragMode {
    type Err = DragError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "move" => Ok(Self::Move),
            "resize-left" => Ok(Self::ResizeLeft),
            "resize-right" => Ok(Self::ResizeRight),
            other => Err(DragError::UnknownMode(other.to_string())),
        }
    }
}

/// The record to hand to the persistence layer after a drag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommittedChange {
    /// Original task with new `start_date`, `end_date` and `duration`.
    pub task: Task,
    pub previous_start_date: String,
    pub previous_end_date: String,
}

#[derive(Clone, Debug)]
struct ActiveDrag {
    mode: DragMode,
    task: Task,
    origin_x: f64,
    start: NaiveDate,
    end: NaiveDate,
    preview: Option<DragPreview>,
}

#[derive(Clone, Debug, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

/// One pointer gesture at a time over the chart.
#[derive(Clone, Debug)]
pub struct DragSession {
    scale: TimelineScale,
    state: DragState,
    verbosity: u8,
}

impl DragSession {
    pub fn new(scale: TimelineScale) -> Self {
        Self {
            scale,
            state: DragState::Idle,
            verbosity: 0,
        }
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Change the zoom; applies to the next pointer update.
    pub fn set_scale(&mut self, scale: TimelineScale) {
        self.scale = scale;
    }

    pub fn scale(&self) -> TimelineScale {
        self.scale
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn active_task_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging(drag) => Some(drag.task.id.as_str()),
            DragState::Idle => None,
        }
    }

    pub fn preview(&self) -> Option<&DragPreview> {
        match &self.state {
            DragState::Dragging(drag) => drag.preview.as_ref(),
            DragState::Idle => None,
        }
    }

    /// Start dragging `task` from horizontal pointer position `pointer_x`.
    pub fn begin(&mut self, mode: DragMode, task: &Task, pointer_x: f64) -> Result<(), DragError> {
        if let DragState::Dragging(active) = &self.state {
            return Err(DragError::AlreadyDragging(active.task.id.clone()));
        }
        let (Some(start), Some(end)) = (task.start(), task.end()) else {
            log_checks!(self.verbosity, "Refuse drag of {}: unparseable dates", task.id);
            return Err(DragError::InvalidTaskDates(task.id.clone()));
        };

        self.state = DragState::Dragging(ActiveDrag {
            mode,
            task: task.clone(),
            origin_x: pointer_x,
            start,
            end,
            preview: None,
        });
        Ok(())
    }

    /// Look `task_id` up in `tasks` and start dragging it.
    ///
    /// Summary tasks (named as parent by another task) cannot be dragged.
    pub fn begin_in(
        &mut self,
        tasks: &[Task],
        task_id: &str,
        mode: DragMode,
        pointer_x: f64,
    ) -> Result<(), DragError> {
        let task = tasks
            .iter()
            .find(|t| t.id == task_id)
            .ok_or_else(|| DragError::UnknownTask(task_id.to_string()))?;
        if tasks
            .iter()
            .any(|t| t.parent_id.as_deref() == Some(task_id))
        {
            log_checks!(self.verbosity, "Refuse drag of summary task {}", task_id);
            return Err(DragError::SummaryTask(task_id.to_string()));
        }
        self.begin(mode, task, pointer_x)
    }

    /// Recompute the preview for the pointer now at `pointer_x`.
    ///
    /// Returns `None` while idle, and while the pointer has not yet moved a
    /// whole day away from where the drag began.
    pub fn update(&mut self, pointer_x: f64) -> Option<&DragPreview> {
        let DragState::Dragging(drag) = &mut self.state else {
            return None;
        };
        let delta = self.scale.days_for_pixels(pointer_x - drag.origin_x);
        if delta == 0 && drag.preview.is_none() {
            return None;
        }

        let (mut start, mut end) = (drag.start, drag.end);
        match drag.mode {
            DragMode::Move => {
                start = add_days(drag.start, delta);
                end = add_days(drag.end, delta);
            }
            DragMode::ResizeLeft => {
                start = add_days(drag.start, delta);
                if start > end {
                    log_checks!(self.verbosity, "Clamp {} start to end {}", drag.task.id, end);
                    start = end;
                }
            }
            DragMode::ResizeRight => {
                end = add_days(drag.end, delta);
                if end < start {
                    log_checks!(self.verbosity, "Clamp {} end to start {}", drag.task.id, start);
                    end = start;
                }
            }
        }

        drag.preview = Some(DragPreview {
            task_id: drag.task.id.clone(),
            start_date: format_date(start),
            end_date: format_date(end),
            duration: days_diff(start, end),
        });
        drag.preview.as_ref()
    }

    /// Finish the gesture. Returns the updated record if a preview was
    /// produced; the session is idle afterwards either way.
    pub fn commit(&mut self) -> Option<CommittedChange> {
        let DragState::Dragging(drag) = std::mem::take(&mut self.state) else {
            return None;
        };
        let preview = drag.preview?;

        log_changes!(
            self.verbosity,
            "Reschedule {}: {}..{} -> {}..{}",
            drag.task.id,
            drag.task.start_date,
            drag.task.end_date,
            preview.start_date,
            preview.end_date
        );
        let mut task = drag.task;
        let previous_start_date = std::mem::replace(&mut task.start_date, preview.start_date);
        let previous_end_date = std::mem::replace(&mut task.end_date, preview.end_date);
        task.duration = preview.duration;

        Some(CommittedChange {
            task,
            previous_start_date,
            previous_end_date,
        })
    }

    /// Abandon the gesture without producing a change.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new(TimelineScale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 40 px per day
    const DAY: f64 = 40.0;

    fn bar(id: &str, start: &str, end: &str) -> Task {
        Task {
            id: id.to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            duration: 4,
            progress: 30,
            ..Default::default()
        }
    }

    #[test]
    fn test_move_keeps_duration() {
        let task = bar("t", "2024-02-01", "2024-02-05");
        let mut session = DragSession::default();
        session.begin(DragMode::Move, &task, 100.0).unwrap();

        let preview = session.update(100.0 + 3.0 * DAY).unwrap();
        assert_eq!(preview.start_date, "2024-02-04");
        assert_eq!(preview.end_date, "2024-02-08");
        assert_eq!(preview.duration, 4);
    }

    #[test]
    fn test_resize_left_past_end_clamps() {
        let task = bar("t", "2024-02-01", "2024-02-05");
        let mut session = DragSession::default();
        session.begin(DragMode::ResizeLeft, &task, 0.0).unwrap();

        let preview = session.update(6.0 * DAY).unwrap();
        assert_eq!(preview.start_date, "2024-02-05");
        assert_eq!(preview.end_date, "2024-02-05");
        assert_eq!(preview.duration, 0);
    }

    #[test]
    fn test_resize_right_before_start_clamps() {
        let task = bar("t", "2024-02-01", "2024-02-05");
        let mut session = DragSession::default();
        session.begin(DragMode::ResizeRight, &task, 0.0).unwrap();

        let preview = session.update(-10.0 * DAY).unwrap();
        assert_eq!(preview.start_date, "2024-02-01");
        assert_eq!(preview.end_date, "2024-02-01");

        let preview = session.update(2.0 * DAY).unwrap();
        assert_eq!(preview.end_date, "2024-02-07");
        assert_eq!(preview.duration, 6);
    }

    #[test]
    fn test_sub_day_jitter_produces_nothing() {
        let task = bar("t", "2024-02-01", "2024-02-05");
        let mut session = DragSession::default();
        session.begin(DragMode::Move, &task, 0.0).unwrap();

        assert!(session.update(DAY * 0.4).is_none());
        assert!(session.preview().is_none());
        assert!(session.commit().is_none());
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_return_to_origin_after_preview() {
        let task = bar("t", "2024-02-01", "2024-02-05");
        let mut session = DragSession::default();
        session.begin(DragMode::Move, &task, 0.0).unwrap();
        session.update(2.0 * DAY);

        let preview = session.update(0.0).unwrap();
        assert_eq!(preview.start_date, "2024-02-01");
        assert_eq!(preview.end_date, "2024-02-05");
    }

    #[test]
    fn test_commit_replaces_dates_only() {
        let task = bar("t", "2024-02-01", "2024-02-05");
        let mut session = DragSession::default();
        session.begin(DragMode::ResizeRight, &task, 0.0).unwrap();
        session.update(DAY);

        let change = session.commit().unwrap();
        assert_eq!(change.task.start_date, "2024-02-01");
        assert_eq!(change.task.end_date, "2024-02-06");
        assert_eq!(change.task.duration, 5);
        assert_eq!(change.task.progress, 30);
        assert_eq!(change.previous_end_date, "2024-02-05");
        assert!(!session.is_dragging());
        assert!(session.commit().is_none());
    }

    #[test]
    fn test_only_one_drag_at_a_time() {
        let a = bar("a", "2024-02-01", "2024-02-05");
        let b = bar("b", "2024-02-01", "2024-02-05");
        let mut session = DragSession::default();
        session.begin(DragMode::Move, &a, 0.0).unwrap();

        assert_eq!(
            session.begin(DragMode::Move, &b, 0.0),
            Err(DragError::AlreadyDragging("a".to_string()))
        );
        assert_eq!(session.active_task_id(), Some("a"));
    }

    #[test]
    fn test_cancel_discards_preview() {
        let task = bar("t", "2024-02-01", "2024-02-05");
        let mut session = DragSession::default();
        session.begin(DragMode::Move, &task, 0.0).unwrap();
        session.update(5.0 * DAY);
        session.cancel();

        assert!(!session.is_dragging());
        assert!(session.commit().is_none());
    }

    #[test]
    fn test_begin_rejects_bad_input() {
        let mut session = DragSession::default();
        let broken = bar("x", "2024-02-01", "someday");
        assert_eq!(
            session.begin(DragMode::Move, &broken, 0.0),
            Err(DragError::InvalidTaskDates("x".to_string()))
        );

        let mut child = bar("child", "2024-02-01", "2024-02-03");
        child.parent_id = Some("phase".to_string());
        let tasks = vec![bar("phase", "2024-02-01", "2024-02-05"), child];
        assert_eq!(
            session.begin_in(&tasks, "phase", DragMode::Move, 0.0),
            Err(DragError::SummaryTask("phase".to_string()))
        );
        assert_eq!(
            session.begin_in(&tasks, "nope", DragMode::Move, 0.0),
            Err(DragError::UnknownTask("nope".to_string()))
        );
        assert!(session.begin_in(&tasks, "child", DragMode::Move, 0.0).is_ok());
    }

    #[test]
    fn test_scale_controls_day_delta() {
        let task = bar("t", "2024-02-01", "2024-02-05");
        let mut session = DragSession::new(TimelineScale::with_day_width(5.0).unwrap());
        session.begin(DragMode::Move, &task, 0.0).unwrap();

        let preview = session.update(50.0).unwrap();
        assert_eq!(preview.start_date, "2024-02-11");
    }

    #[test]
    fn test_mode_names() {
        assert_eq!("resize-left".parse(), Ok(DragMode::ResizeLeft));
        assert_eq!(
            "grab".parse::<DragMode>(),
            Err(DragError::UnknownMode("grab".to_string()))
        );
    }
}
