//! Configuration types for the scheduling core.

use pyo3::prelude::*;

/// Default slack (in days) under which a predecessor counts as critical.
///
/// A one-day gap is tolerated so that weekends and holidays do not break the
/// highlighted path without a working-calendar model.
pub const DEFAULT_SLACK_THRESHOLD_DAYS: i64 = 1;

/// Configuration for critical path computation.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CriticalPathConfig {
    /// Maximum gap between predecessor and successor, in days, for the
    /// predecessor to be pulled onto the critical path.
    #[pyo3(get, set)]
    pub slack_threshold_days: i64,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for CriticalPathConfig {
    fn default() -> Self {
        Self {
            slack_threshold_days: DEFAULT_SLACK_THRESHOLD_DAYS,
            verbosity: 0,
        }
    }
}

#[pymethods]
impl CriticalPathConfig {
    #[new]
    #[pyo3(signature = (slack_threshold_days=None, verbosity=None))]
    fn new(slack_threshold_days: Option<i64>, verbosity: Option<u8>) -> Self {
        let defaults = Self::default();
        Self {
            slack_threshold_days: slack_threshold_days.unwrap_or(defaults.slack_threshold_days),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "CriticalPathConfig(slack_threshold_days={}, verbosity={})",
            self.slack_threshold_days, self.verbosity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = CriticalPathConfig::default();
        assert_eq!(config.slack_threshold_days, 1);
        assert_eq!(config.verbosity, 0);
    }

    #[test]
    fn test_new_fills_missing_from_defaults() {
        let config = CriticalPathConfig::new(Some(0), None);
        assert_eq!(config.slack_threshold_days, 0);
        assert_eq!(config.verbosity, 0);
    }
}
