use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Computes the cache key for a piece of source text.
///
/// Keys are case-folded before hashing so duplicate detection does not
/// depend on the casing (or byte length) of the original strings.
pub fn cache_key(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.to_lowercase().as_bytes());
    hex::encode(hasher.finalize())
}

/// In-memory translation lookup table for one translation unit.
///
/// A fresh cache is created per unit (column, sheet, paragraph set) and
/// discarded once the unit's output is produced. Entries seeded from the
/// user dictionary are inserted first and are never overwritten by fetched
/// translations for the same key.
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: HashMap<String, String>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the cache from a user dictionary of source phrase → target
    /// phrase. Seeded entries are authoritative for the whole unit.
    pub fn seed(&mut self, dictionary: &HashMap<String, String>) {
        for (source, target) in dictionary {
            self.entries.insert(cache_key(source), target.clone());
        }
    }

    /// Records a fetched translation unless the key is already present.
    ///
    /// Insert-if-absent keeps dictionary entries (and earlier results)
    /// authoritative on conflict.
    pub fn record(&mut self, source: &str, translated: String) {
        self.entries.entry(cache_key(source)).or_insert(translated);
    }

    /// Looks up the translation for `text` via its normalized key.
    pub fn resolve(&self, text: &str) -> Option<&str> {
        self.entries.get(&cache_key(text)).map(String::as_str)
    }

    pub fn contains(&self, text: &str) -> bool {
        self.entries.contains_key(&cache_key(text))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
