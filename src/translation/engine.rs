//! The deduplicating parallel translator.
//!
//! One translation unit (a table column, a sheet, a paragraph list) is
//! processed by fan-out/fan-in: the distinct non-sentinel values are
//! partitioned round-robin across a bounded set of worker tasks, each group
//! is translated sequentially inside its task, results are merged into the
//! unit's cache after all tasks join, and the final output is produced by a
//! lookup pass over the original sequence. API calls therefore scale with
//! distinct content, not row count.

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;

use crate::cache::{TranslationCache, cache_key};

use super::{ChunkTranslator, Translator};

/// Default number of unique values per worker group.
pub const DEFAULT_GROUP_SIZE: usize = 16;

/// Cooperative throttle applied after each unit to reduce the chance of
/// upstream rate-limiting.
const UNIT_COOLDOWN: Duration = Duration::from_millis(250);

pub struct Engine<C> {
    translator: Arc<Translator<C>>,
    group_size: usize,
    cooldown: Duration,
}

impl<C: ChunkTranslator + 'static> Engine<C> {
    pub fn new(translator: Translator<C>, group_size: usize) -> Self {
        Self {
            translator: Arc::new(translator),
            group_size: group_size.max(1),
            cooldown: UNIT_COOLDOWN,
        }
    }

    /// Overrides the post-unit cooldown (tests use [`Duration::ZERO`]).
    pub const fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Translates one unit, returning outputs in input order.
    ///
    /// Values whose keys are already cached (dictionary-seeded or carried
    /// over within the unit) incur no network call. Null/NaN/"null"
    /// sentinels map to the empty string. A failed worker group leaves its
    /// values untranslated without affecting sibling groups.
    pub async fn translate_unit(
        &self,
        values: &[String],
        src: &str,
        dest: &str,
        cache: &mut TranslationCache,
    ) -> Vec<String> {
        let pending = pending_uniques(values, cache);

        if !pending.is_empty() {
            let mut tasks = JoinSet::new();

            for group in partition(pending, self.group_size) {
                let translator = Arc::clone(&self.translator);
                let src = src.to_string();
                let dest = dest.to_string();

                tasks.spawn(async move {
                    let mut results = Vec::with_capacity(group.len());
                    // Sequential within a group keeps the outbound request
                    // rate bounded by the group count.
                    for value in group {
                        let translated = translator.translate(&value, &src, &dest).await;
                        results.push((value, translated));
                    }
                    results
                });
            }

            // Merge after join; insert-if-absent keeps seeded dictionary
            // entries authoritative on conflict.
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(results) => {
                        for (value, translated) in results {
                            cache.record(&value, translated);
                        }
                    }
                    Err(err) => {
                        crate::warn!(
                            "{} a worker group failed ({err}); its values keep their original text",
                            crate::ui::Style::warning("Warning:")
                        );
                    }
                }
            }
        }

        let output = values
            .iter()
            .map(|value| {
                if is_sentinel(value) {
                    return String::new();
                }
                cache
                    .resolve(value)
                    .map_or_else(|| value.clone(), ToString::to_string)
            })
            .collect();

        tokio::time::sleep(self.cooldown).await;
        output
    }
}

/// Distinct values of the unit that still need a network call.
fn pending_uniques(values: &[String], cache: &TranslationCache) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut pending = Vec::new();

    for value in values {
        if is_sentinel(value) {
            continue;
        }
        if !cache.contains(value) && seen.insert(cache_key(value)) {
            pending.push(value.clone());
        }
    }

    pending
}

/// Round-robin partition into `ceil(n / group_size)` groups, bounded above
/// by the worker cap.
fn partition(pending: Vec<String>, group_size: usize) -> Vec<Vec<String>> {
    let group_count = pending
        .len()
        .div_ceil(group_size)
        .clamp(1, worker_cap());

    let mut groups = vec![Vec::new(); group_count];
    for (index, value) in pending.into_iter().enumerate() {
        groups[index % group_count].push(value);
    }
    groups
}

/// Never more than three quarters of the host's parallelism, never zero.
fn worker_cap() -> usize {
    let parallelism = std::thread::available_parallelism().map_or(4, NonZeroUsize::get);
    (parallelism * 3 / 4).max(1)
}

/// Null-ish markers map to the empty string in final output and are never
/// sent for translation. Whitespace-only values are content (a document may
/// carry significant spacing runs) and pass through unchanged.
fn is_sentinel(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    let trimmed = value.trim();
    trimmed.eq_ignore_ascii_case("null") || trimmed.eq_ignore_ascii_case("nan")
}
