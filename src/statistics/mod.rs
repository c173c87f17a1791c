//! Process-wide statistic logging.
//!
//! Statistics are emitted as `{prefix} {name}={value}` lines on standard output so harnesses
//! can grep them out of a run. Logging is off until [`configure`] enables it, which the
//! binary does based on its command-line arguments.

use std::fmt::Display;

use once_cell::sync::OnceCell;

static STATISTIC_OPTIONS: OnceCell<StatisticOptions> = OnceCell::new();

#[derive(Debug)]
struct StatisticOptions {
    log_statistics: bool,
    statistic_prefix: &'static str,
    after_statistics: Option<&'static str>,
}

/// Configures whether statistic lines are logged, the prefix put in front of every line, and
/// an optional closing line emitted by [`log_statistic_postfix`].
///
/// Only the first call has any effect.
pub fn configure(log_statistics: bool, prefix: &'static str, after: Option<&'static str>) {
    let _ = STATISTIC_OPTIONS.set(StatisticOptions {
        log_statistics,
        statistic_prefix: prefix,
        after_statistics: after,
    });
}

/// Returns true when statistic lines are currently being logged.
pub fn should_log_statistics() -> bool {
    match STATISTIC_OPTIONS.get() {
        Some(options) => options.log_statistics,
        None => false,
    }
}

/// Logs one statistic line with the configured prefix.
pub fn log_statistic(name: impl Display, value: impl Display) {
    if let Some(options) = STATISTIC_OPTIONS.get() {
        if options.log_statistics {
            println!("{} {name}={value}", options.statistic_prefix);
        }
    }
}

/// Logs the configured closing line, marking the end of a statistic block.
pub fn log_statistic_postfix() {
    if let Some(options) = STATISTIC_OPTIONS.get() {
        if options.log_statistics {
            if let Some(after) = options.after_statistics {
                println!("{after}");
            }
        }
    }
}
