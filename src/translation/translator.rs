use super::chunker::{self, MAX_CHUNK_LEN, MAX_TEXT_LEN};
use super::ChunkTranslator;

/// Composes the chunker with a provider chain.
///
/// `translate` never fails: oversized input and chunk-level provider errors
/// degrade to the original text so a single bad value cannot abort a batch.
pub struct Translator<C> {
    chain: C,
    chunk_len: usize,
}

impl<C: ChunkTranslator> Translator<C> {
    pub fn new(chain: C) -> Self {
        Self::with_chunk_len(chain, MAX_CHUNK_LEN)
    }

    pub fn with_chunk_len(chain: C, chunk_len: usize) -> Self {
        Self {
            chain,
            chunk_len: chunk_len.max(1),
        }
    }

    /// Translates one value, chunking when it exceeds the per-request limit.
    ///
    /// Chunk results are joined with a single space. A chunk whose
    /// translation fails on both providers keeps its original text.
    pub async fn translate(&self, text: &str, src: &str, dest: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let char_count = text.chars().count();
        if char_count > MAX_TEXT_LEN {
            crate::warn!(
                "{} skipping a {char_count}-character value (limit {MAX_TEXT_LEN}), keeping it unchanged",
                crate::ui::Style::warning("Warning:")
            );
            return text.to_string();
        }

        let chunks = chunker::split(text, self.chunk_len);
        let mut parts = Vec::with_capacity(chunks.len());

        for chunk in chunks {
            match self.chain.translate_chunk(&chunk, src, dest).await {
                Ok(translated) => parts.push(translated),
                Err(err) => {
                    crate::warn!(
                        "{} chunk translation failed, keeping original text: {err:#}",
                        crate::ui::Style::warning("Warning:")
                    );
                    parts.push(chunk);
                }
            }
        }

        parts.join(" ")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Upper(AtomicUsize);

    impl ChunkTranslator for Upper {
        async fn translate_chunk(&self, text: &str, _src: &str, _dest: &str) -> Result<String> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(text.to_uppercase())
        }
    }

    struct Broken;

    impl ChunkTranslator for Broken {
        async fn translate_chunk(&self, _text: &str, _src: &str, _dest: &str) -> Result<String> {
            Err(anyhow!("no network"))
        }
    }

    /// Fails on chunks containing a marker, succeeds otherwise.
    struct Flaky;

    impl ChunkTranslator for Flaky {
        async fn translate_chunk(&self, text: &str, _src: &str, _dest: &str) -> Result<String> {
            if text.contains('!') {
                Err(anyhow!("transient"))
            } else {
                Ok(text.to_uppercase())
            }
        }
    }

    #[tokio::test]
    async fn test_empty_input_passes_through() {
        let translator = Translator::new(Upper(AtomicUsize::new(0)));
        assert_eq!(translator.translate("", "en", "fr").await, "");
        assert_eq!(translator.translate("   ", "en", "fr").await, "   ");
        assert_eq!(translator.chain.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_short_input_translated_in_one_call() {
        let translator = Translator::new(Upper(AtomicUsize::new(0)));
        assert_eq!(translator.translate("hello", "en", "fr").await, "HELLO");
        assert_eq!(translator.chain.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_oversized_input_passes_through_untranslated() {
        let translator = Translator::new(Upper(AtomicUsize::new(0)));
        let huge = "a".repeat(MAX_TEXT_LEN + 1);

        assert_eq!(translator.translate(&huge, "en", "fr").await, huge);
        assert_eq!(translator.chain.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_long_input_chunked_and_rejoined() {
        let translator = Translator::with_chunk_len(Upper(AtomicUsize::new(0)), 5);
        let result = translator.translate("abcde.fghij", "en", "fr").await;

        assert_eq!(result, "ABCDE FGHIJ");
        assert_eq!(translator.chain.0.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_total_failure_degrades_to_original() {
        let translator = Translator::new(Broken);
        assert_eq!(translator.translate("hello", "en", "fr").await, "hello");
    }

    #[tokio::test]
    async fn test_failure_degrades_per_chunk_not_per_value() {
        let translator = Translator::with_chunk_len(Flaky, 5);
        // Second chunk fails; only that chunk keeps its original text.
        let result = translator.translate("abcde.fail!", "en", "fr").await;
        assert_eq!(result, "ABCDE fail!");
    }
}
