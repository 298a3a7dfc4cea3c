#![cfg(feature = "std")]

use log::{LevelFilter, Log, Metadata, Record};
use std::env;

/// Writes to stderr so stdout stays free for the board or JSON output.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let target = record.target().trim_start_matches("minesweeper::");
            eprintln!("[{:<5} {}] {}", record.level(), target, record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Environment variable holding the log level filter (`error`..`trace`, `off`).
pub const LOG_ENV: &str = "MINESWEEPER_LOG";

/// Level from `MINESWEEPER_LOG`, or `default` if unset or invalid.
pub fn log_level(default: LevelFilter) -> LevelFilter {
    env::var(LOG_ENV)
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(default)
}

/// Install the logger. Later calls keep the first logger and level.
pub fn init_logging(default: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log_level(default));
    }
}
