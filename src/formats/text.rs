//! Plain-text adapter: the whole file is one translation unit, one line
//! per value. The input's line endings and trailing-newline state are
//! preserved on write.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::cache::TranslationCache;
use crate::translation::{ChunkTranslator, Engine};

/// A text file split into lines, remembering how to put it back together.
pub struct TextDocument {
    pub lines: Vec<String>,
    crlf: bool,
    trailing_newline: bool,
}

pub fn read_text(path: &Path) -> Result<TextDocument> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;

    Ok(TextDocument {
        crlf: contents.contains("\r\n"),
        trailing_newline: contents.ends_with('\n'),
        lines: contents.lines().map(str::to_string).collect(),
    })
}

pub async fn translate_text<C: ChunkTranslator + 'static>(
    document: &mut TextDocument,
    engine: &Engine<C>,
    src: &str,
    dest: &str,
    dictionary: &HashMap<String, String>,
) {
    let mut cache = TranslationCache::new();
    cache.seed(dictionary);
    document.lines = engine
        .translate_unit(&document.lines, src, dest, &mut cache)
        .await;
}

pub fn write_text(document: &TextDocument) -> Vec<u8> {
    let ending = if document.crlf { "\r\n" } else { "\n" };
    let mut out = document.lines.join(ending).into_bytes();
    if document.trailing_newline {
        out.extend_from_slice(ending.as_bytes());
    }
    out
}
