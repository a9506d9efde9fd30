//! Diagnostics setup: plain single-line events on stderr.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt;

/// Fixed verbosity. The environment is not consulted, so a successful run
/// stays silent and the fatal line is always printed.
const MAX_LEVEL: LevelFilter = LevelFilter::WARN;

/// Install the global subscriber. Container runtimes timestamp log lines
/// themselves, so events carry no time or color.
pub(crate) fn init_logging() {
    let _ = fmt()
        .with_max_level(MAX_LEVEL)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
