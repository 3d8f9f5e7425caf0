//! Configuration file management.

mod manager;

pub use manager::{ConfigFile, ConfigManager, DefaultsConfig};
