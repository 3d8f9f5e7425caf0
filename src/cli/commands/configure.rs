//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use std::path::PathBuf;

use crate::config::{ConfigFile, ConfigManager};
use crate::translation::validate_language;
use crate::ui::Style;

pub struct ConfigureOptions {
    pub show: bool,
    pub source: Option<String>,
    pub target: Option<String>,
    pub group_size: Option<usize>,
    pub dictionary: Option<String>,
}

/// Runs the configure command.
///
/// With setter flags, updates the stored defaults and saves the config
/// file. Without any, prints the current defaults.
pub fn run_configure(options: ConfigureOptions) -> Result<()> {
    let manager = ConfigManager::new();
    let mut config = manager.load_or_default();

    let has_updates = options.source.is_some()
        || options.target.is_some()
        || options.group_size.is_some()
        || options.dictionary.is_some();

    if has_updates {
        if let Some(source) = options.source {
            validate_language(&source)?;
            config.defaults.source = Some(source);
        }
        if let Some(target) = options.target {
            validate_language(&target)?;
            config.defaults.target = Some(target);
        }
        if let Some(group_size) = options.group_size {
            if group_size == 0 {
                bail!("Group size must be at least 1");
            }
            config.defaults.group_size = Some(group_size);
        }
        if let Some(dictionary) = options.dictionary {
            config.defaults.dictionary = Some(PathBuf::from(dictionary));
        }

        manager.save(&config)?;
        println!(
            "{} Configuration saved to {}",
            Style::success("✓"),
            Style::secondary(manager.config_path().display())
        );
    }

    if options.show || !has_updates {
        print_current_defaults(&config);
    }

    Ok(())
}

fn print_current_defaults(config: &ConfigFile) {
    println!("{}", Style::header("Current defaults"));
    println!(
        "  {}      {}",
        Style::label("source"),
        config
            .defaults
            .source
            .as_deref()
            .map_or_else(|| Style::secondary("(not set)"), Style::value)
    );
    println!(
        "  {}      {}",
        Style::label("target"),
        config
            .defaults
            .target
            .as_deref()
            .map_or_else(|| Style::secondary("(not set)"), Style::value)
    );
    println!(
        "  {}  {}",
        Style::label("group_size"),
        config
            .defaults
            .group_size
            .map_or_else(|| Style::secondary("(not set)"), Style::value)
    );
    println!(
        "  {}  {}",
        Style::label("dictionary"),
        config
            .defaults
            .dictionary
            .as_deref()
            .map_or_else(
                || Style::secondary("(not set)"),
                |path| Style::value(path.display())
            )
    );
}
