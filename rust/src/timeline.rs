//! Timeline scale (pixels per day) and padded date bounds.

use chrono::NaiveDate;
use std::str::FromStr;
use thiserror::Error;

use crate::dates::{add_days, days_diff};
use crate::models::Task;

const ZOOM_FACTOR: f64 = 1.2;
const MAX_DAY_WIDTH: f64 = 200.0;
const MIN_DAY_WIDTH: f64 = 0.5;

/// Days shown before the earliest task date.
const LEAD_DAYS: i64 = 5;
/// Minimum days shown after the latest task date.
const MIN_TRAIL_DAYS: i64 = 15;
/// Width in pixels the trailing margin should cover at least.
const TRAIL_PIXELS: f64 = 400.0;
/// Cap on the number of day columns produced for one timeline.
pub const MAX_TIMELINE_DAYS: i64 = 40_000;

/// Preset zoom levels for the chart header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewMode {
    Day,
    Week,
    Month,
    Year,
}

impl ViewMode {
    /// Default width of one day column in pixels.
    pub fn day_width(self) -> f64 {
        match self {
            Self::Day => 40.0,
            Self::Week => 15.0,
            Self::Month => 5.0,
            Self::Year => 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown view mode: {0}")]
pub struct UnknownViewMode(pub String);

impl FromStr for ViewMode {
    type Err = UnknownViewMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(UnknownViewMode(other.to_string())),
        }
    }
}

/// Horizontal scale of the chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineScale {
    day_width: f64,
}

impl Default for TimelineScale {
    fn default() -> Self {
        Self::for_view_mode(ViewMode::Day)
    }
}

impl TimelineScale {
    pub fn for_view_mode(mode: ViewMode) -> Self {
        Self {
            day_width: mode.day_width(),
        }
    }

    /// A scale with an explicit day width, clamped to the zoom range.
    ///
    /// Returns `None` for non-finite or non-positive widths.
    pub fn with_day_width(day_width: f64) -> Option<Self> {
        (day_width.is_finite() && day_width > 0.0).then(|| Self {
            day_width: day_width.clamp(MIN_DAY_WIDTH, MAX_DAY_WIDTH),
        })
    }

    #[inline]
    pub fn day_width(&self) -> f64 {
        self.day_width
    }

    pub fn zoom_in(&mut self) {
        self.day_width = (self.day_width * ZOOM_FACTOR).min(MAX_DAY_WIDTH);
    }

    pub fn zoom_out(&mut self) {
        self.day_width = (self.day_width / ZOOM_FACTOR).max(MIN_DAY_WIDTH);
    }

    /// Whole days covered by a horizontal pointer movement.
    pub fn days_for_pixels(&self, delta_x: f64) -> i64 {
        (delta_x / self.day_width).round() as i64
    }
}

/// Date window drawn by the chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimelineBounds {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimelineBounds {
    pub fn total_days(&self) -> i64 {
        days_diff(self.start, self.end)
    }

    /// Each day column from `start` to `end` inclusive, at most
    /// `MAX_TIMELINE_DAYS + 1` of them.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let count = self.total_days().clamp(-1, MAX_TIMELINE_DAYS);
        (0..=count).map(move |offset| add_days(self.start, offset))
    }
}

/// Padded window over every parseable start and end date in `tasks`.
///
/// With no usable dates the window collapses to `today`.
pub fn timeline_bounds(tasks: &[Task], day_width: f64, today: NaiveDate) -> TimelineBounds {
    let dates = || tasks.iter().flat_map(|t| [t.start(), t.end()]).flatten();
    let (min, max) = (dates().min(), dates().max());
    let (Some(min), Some(max)) = (min, max) else {
        return TimelineBounds {
            start: today,
            end: today,
        };
    };

    let trail_days = MIN_TRAIL_DAYS.max((TRAIL_PIXELS / day_width.max(0.1)).ceil() as i64);
    TimelineBounds {
        start: add_days(min, -LEAD_DAYS),
        end: add_days(max, trail_days),
    }
}
