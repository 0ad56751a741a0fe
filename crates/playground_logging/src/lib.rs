#![deny(missing_docs)]
//! Shared logging utilities for the playground workspace.
//!
//! This crate provides the `pg_*` logging macros used across the codebase,
//! logger initialization for the terminal front end, and a minimal test
//! initializer for the global logger.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

#[doc(hidden)]
pub use log;

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! pg_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! pg_info {
    ($($arg:tt)*) => {{
        $crate::log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! pg_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! pg_error {
    ($($arg:tt)*) => {{
        $crate::log::error!($($arg)*);
    }};
}

/// Initialize the global logger writing to `log_file`.
///
/// Log lines go to a file so they never interleave with the rendered cards.
/// Silently keeps the existing logger if one was already installed. A log file
/// that cannot be created is reported on stderr and skipped.
pub fn initialize(log_file: &Path, level: LevelFilter) {
    if let Some(file_logger) = create_file_logger(log_file, level, build_config()) {
        let loggers: Vec<Box<dyn SharedLogger>> = vec![file_logger];
        let _ = CombinedLogger::init(loggers);
    }
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwritable_log_file_is_skipped() {
        let path = std::env::temp_dir().join("playground-missing-dir").join("nested").join("x.log");
        assert!(create_file_logger(&path, LevelFilter::Info, build_config()).is_none());
    }
}
