//! Global output configuration and utilities.
//!
//! This module provides centralized control over CLI output behavior,
//! including quiet mode, color support, and stderr/stdout routing.
//!
//! ## Design Principles
//!
//! - Status messages, progress, and logs go to stderr
//! - Errors always go to stderr
//! - Quiet mode suppresses non-essential output
//! - Colors can be disabled via flag or NO_COLOR environment variable

use indicatif::ProgressBar;
use std::sync::{Mutex, OnceLock};

/// Global output configuration.
static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

/// The progress bar currently drawing on stderr, if any. Messages printed
/// while it is active must go through its suspend hook or they garble the
/// spinner line.
static ACTIVE_PROGRESS: Mutex<Option<ProgressBar>> = Mutex::new(None);

/// Output configuration settings.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Disable colored output.
    pub no_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            // Check NO_COLOR environment variable (https://no-color.org/)
            no_color: std::env::var("NO_COLOR").is_ok(),
        }
    }
}

/// Initialize the global output configuration.
///
/// This should be called once at startup with the CLI flags.
/// If called multiple times, subsequent calls are ignored.
pub fn init(config: OutputConfig) {
    let _ = OUTPUT_CONFIG.set(config);
}

/// Get the current output configuration.
pub fn config() -> &'static OutputConfig {
    OUTPUT_CONFIG.get_or_init(OutputConfig::default)
}

/// Check if quiet mode is enabled.
pub fn is_quiet() -> bool {
    config().quiet
}

/// Check if colors are disabled.
pub fn is_no_color() -> bool {
    config().no_color
}

/// Registers (or clears) the progress bar that owns the stderr draw area.
pub fn set_progress(bar: Option<ProgressBar>) {
    if let Ok(mut guard) = ACTIVE_PROGRESS.lock() {
        *guard = bar;
    }
}

/// Prints one line to stderr, suspending the active progress bar around it.
pub fn emit(args: std::fmt::Arguments<'_>) {
    match ACTIVE_PROGRESS.lock() {
        Ok(guard) => match guard.as_ref() {
            Some(bar) => bar.suspend(|| eprintln!("{args}")),
            None => eprintln!("{args}"),
        },
        Err(_) => eprintln!("{args}"),
    }
}

/// Print a status message to stderr (respects quiet mode).
///
/// Use this for progress indicators, informational messages, etc.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            $crate::output::emit(format_args!($($arg)*));
        }
    };
}

/// Print a warning message to stderr (always shown, even in quiet mode).
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::output::emit(format_args!($($arg)*));
    };
}
