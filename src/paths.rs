//! XDG-style path utilities for the configuration directory.
//!
//! Prefers XDG Base Directory Specification conventions over OS-specific
//! locations.

use std::path::PathBuf;

/// Returns the configuration directory for xlate.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/xlate` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/xlate` otherwise
///
/// # Panics
///
/// Panics if the home directory cannot be determined.
pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME").map_or_else(
        |_| home_dir().join(".config").join("xlate"),
        |xdg| PathBuf::from(xdg).join("xlate"),
    )
}

/// Returns the user's home directory.
///
/// # Panics
///
/// Panics if the home directory cannot be determined.
#[allow(clippy::expect_used)]
fn home_dir() -> PathBuf {
    dirs::home_dir().expect("Failed to determine home directory")
}
