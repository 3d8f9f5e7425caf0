//! User override dictionary loading.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Loads a dictionary file: a JSON object mapping source phrase → target
/// phrase, used to seed each unit's cache before any network call.
///
/// A missing or malformed file is a fatal configuration error; the run
/// aborts before any translation work begins.
pub fn load_dictionary(path: &Path) -> Result<HashMap<String, String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dictionary file: {}", path.display()))?;

    serde_json::from_str(&contents).with_context(|| {
        format!(
            "Malformed dictionary file: {} (expected a JSON object of source → target phrases)",
            path.display()
        )
    })
}
