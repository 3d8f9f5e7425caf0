use anyhow::Result;
use std::future::Future;

pub mod chunker;
mod client;
mod engine;
mod fallback;
mod language;
mod translator;

/// A provider that can translate one bounded chunk of text.
///
/// Implementations are expected to be cheap to share behind an `Arc` and are
/// called concurrently from worker tasks.
pub trait ChunkTranslator: Send + Sync {
    fn translate_chunk(
        &self,
        text: &str,
        src: &str,
        dest: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}

pub use chunker::{MAX_CHUNK_LEN, MAX_TEXT_LEN};
pub use client::GtxClient;
pub use engine::{DEFAULT_GROUP_SIZE, Engine};
pub use fallback::{FallbackChain, MyMemoryClient, ProviderChain, default_chain};
pub use language::{SUPPORTED_LANGUAGES, print_languages, validate_language};
pub use translator::Translator;
