//! Verbosity-gated logging for the scheduling core.
//!
//! Nothing is printed at verbosity 0. Levels:
//! - 0: SILENT
//! - 1: CHANGES (critical set size, committed drags)
//! - 2: CHECKS (skipped edges, clamped resizes, rejected gestures)
//! - 3: DEBUG (per-edge slack during propagation)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at CHANGES level (verbosity >= 1).
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            eprintln!("[gantt] {}", format_args!($($arg)*));
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
///
/// Used for input that was ignored: unparseable dates, dangling
/// predecessors, clamped resizes.
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!("[gantt]   {}", format_args!($($arg)*));
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!("[gantt]     {}", format_args!($($arg)*));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_constants() {
        assert_eq!(
            [VERBOSITY_SILENT, VERBOSITY_CHANGES, VERBOSITY_CHECKS, VERBOSITY_DEBUG],
            [0, 1, 2, 3]
        );
    }

    #[test]
    fn test_silent_macros_compile() {
        let verbosity = VERBOSITY_SILENT;
        log_changes!(verbosity, "critical tasks: {}", 3);
        log_checks!(verbosity, "skipped edge {} -> {}", "a", "b");
        log_debug!(verbosity, "slack={}", 1);
    }
}
