//! DOCX adapter.
//!
//! A .docx file is a zip archive; the visible text lives in `<w:t>`
//! elements of `word/document.xml`. The adapter collects those texts as a
//! single translation unit, rewrites the XML with the translated values in
//! event order, and rebuilds the archive with every other entry copied
//! through untouched.

use anyhow::{Context, Result, anyhow};
use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};
use std::collections::HashMap;
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::cache::TranslationCache;
use crate::status;
use crate::translation::{ChunkTranslator, Engine};
use crate::ui::Style;

const DOCUMENT_ENTRY: &str = "word/document.xml";
const TEXT_TAG: &[u8] = b"w:t";

pub async fn translate_docx<C: ChunkTranslator + 'static>(
    path: &Path,
    engine: &Engine<C>,
    src: &str,
    dest: &str,
    dictionary: &HashMap<String, String>,
) -> Result<Vec<u8>> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to open input file: {}", path.display()))?;
    let mut archive = ZipArchive::new(Cursor::new(&bytes))
        .with_context(|| format!("Failed to read document archive: {}", path.display()))?;

    let mut document_xml = Vec::new();
    archive
        .by_name(DOCUMENT_ENTRY)
        .with_context(|| format!("Not a Word document (missing {DOCUMENT_ENTRY})"))?
        .read_to_end(&mut document_xml)
        .context("Failed to read document body")?;

    let texts = collect_texts(&document_xml, TEXT_TAG)?;
    status!(
        "{} {} text runs",
        Style::label("Translating document:"),
        texts.len()
    );

    let mut cache = TranslationCache::new();
    cache.seed(dictionary);
    let translated = engine.translate_unit(&texts, src, dest, &mut cache).await;

    let rewritten = rewrite_texts(&document_xml, TEXT_TAG, &translated)?;
    rebuild_archive(&mut archive, DOCUMENT_ENTRY, &rewritten)
}

/// Texts of `tag` elements in document order; one value per Text/CData
/// event, so rewriting can match by position.
fn collect_texts(xml: &[u8], tag: &[u8]) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut in_text = false;
    let mut texts = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == tag => in_text = true,
            Ok(Event::End(e)) if e.name().as_ref() == tag => in_text = false,
            Ok(Event::Text(e)) if in_text => {
                texts.push(e.unescape().context("Invalid XML text")?.into_owned());
            }
            Ok(Event::CData(e)) if in_text => {
                texts.push(String::from_utf8_lossy(e.into_inner().as_ref()).into_owned());
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(anyhow!("Failed to parse document XML: {err}")),
        }
        buf.clear();
    }

    Ok(texts)
}

/// Copies the XML through, substituting the nth `tag` text event with
/// `replacements[n]`. Everything outside text elements passes unchanged.
fn rewrite_texts(xml: &[u8], tag: &[u8], replacements: &[String]) -> Result<Vec<u8>> {
    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(Vec::new());
    let mut buf = Vec::new();
    let mut in_text = false;
    let mut index = 0;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if e.name().as_ref() == tag {
                    in_text = true;
                }
                writer.write_event(Event::Start(e.to_owned()))?;
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == tag {
                    in_text = false;
                }
                writer.write_event(Event::End(e.to_owned()))?;
            }
            Ok(Event::Text(e)) if in_text => {
                let replacement = replacements
                    .get(index)
                    .ok_or_else(|| anyhow!("Document changed during rewrite"))?;
                index += 1;
                writer.write_event(Event::Text(BytesText::new(replacement)))?;
            }
            Ok(Event::CData(_)) if in_text => {
                let replacement = replacements
                    .get(index)
                    .ok_or_else(|| anyhow!("Document changed during rewrite"))?;
                index += 1;
                writer.write_event(Event::Text(BytesText::new(replacement)))?;
            }
            Ok(Event::Eof) => break,
            Ok(event) => writer.write_event(event.to_owned())?,
            Err(err) => return Err(anyhow!("Failed to parse document XML: {err}")),
        }
        buf.clear();
    }

    Ok(writer.into_inner())
}

/// Rebuilds the archive with `entry` replaced by `contents`; all other
/// entries keep their bytes and compression method.
pub(super) fn rebuild_archive<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    entry: &str,
    contents: &[u8],
) -> Result<Vec<u8>> {
    rebuild_archive_with(archive, &HashMap::from([(entry.to_string(), contents.to_vec())]))
}

pub(super) fn rebuild_archive_with<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    replacements: &HashMap<String, Vec<u8>>,
) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for i in 0..archive.len() {
        let mut file = archive.by_index(i).context("Failed to read archive entry")?;
        let name = file.name().to_string();
        let options = SimpleFileOptions::default().compression_method(file.compression());

        if file.is_dir() {
            writer
                .add_directory(name, options)
                .context("Failed to write archive directory")?;
            continue;
        }

        writer
            .start_file(name.clone(), options)
            .context("Failed to write archive entry")?;
        if let Some(contents) = replacements.get(&name) {
            writer
                .write_all(contents)
                .context("Failed to write archive entry")?;
        } else {
            let mut data = Vec::new();
            file.read_to_end(&mut data)
                .context("Failed to read archive entry")?;
            writer
                .write_all(&data)
                .context("Failed to write archive entry")?;
        }
    }

    Ok(writer
        .finish()
        .context("Failed to finalize archive output")?
        .into_inner())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::translation::Translator;
    use std::time::Duration;

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>
<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>hello world</w:t></w:r></w:p>
<w:p><w:r><w:t xml:space="preserve">second run</w:t></w:r></w:p>
</w:body>
</w:document>"#;

    struct Upper;

    impl ChunkTranslator for Upper {
        async fn translate_chunk(&self, text: &str, _src: &str, _dest: &str) -> Result<String> {
            Ok(text.to_uppercase())
        }
    }

    fn sample_docx() -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        writer.start_file("[Content_Types].xml", options).unwrap();
        writer.write_all(b"<Types/>").unwrap();
        writer.start_file(DOCUMENT_ENTRY, options).unwrap();
        writer.write_all(DOCUMENT_XML.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_collect_texts_in_document_order() {
        let texts = collect_texts(DOCUMENT_XML.as_bytes(), TEXT_TAG).unwrap();
        assert_eq!(texts, vec!["hello world", "second run"]);
    }

    #[test]
    fn test_rewrite_preserves_markup() {
        let replacements = vec!["HELLO".to_string(), "SECOND".to_string()];
        let out = rewrite_texts(DOCUMENT_XML.as_bytes(), TEXT_TAG, &replacements).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("<w:t>HELLO</w:t>"));
        assert!(out.contains(r#"<w:t xml:space="preserve">SECOND</w:t>"#));
        assert!(out.contains("<w:b/>"));
        assert!(!out.contains("hello world"));
    }

    #[tokio::test]
    async fn test_translate_docx_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.docx");
        fs::write(&path, sample_docx()).unwrap();

        let engine = Engine::new(Translator::new(Upper), 16).with_cooldown(Duration::ZERO);
        let out = translate_docx(&path, &engine, "en", "fr", &HashMap::new())
            .await
            .unwrap();

        let mut archive = ZipArchive::new(Cursor::new(out)).unwrap();
        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_ENTRY)
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        assert!(xml.contains("HELLO WORLD"));
        assert!(xml.contains("SECOND RUN"));

        // Untouched entries survive the rebuild.
        let mut other = String::new();
        archive
            .by_name("[Content_Types].xml")
            .unwrap()
            .read_to_string(&mut other)
            .unwrap();
        assert_eq!(other, "<Types/>");
    }

    #[tokio::test]
    async fn test_translate_docx_honors_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.docx");
        fs::write(&path, sample_docx()).unwrap();

        let mut dictionary = HashMap::new();
        dictionary.insert("hello world".to_string(), "bonjour le monde".to_string());

        let engine = Engine::new(Translator::new(Upper), 16).with_cooldown(Duration::ZERO);
        let out = translate_docx(&path, &engine, "en", "fr", &dictionary)
            .await
            .unwrap();

        let mut archive = ZipArchive::new(Cursor::new(out)).unwrap();
        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_ENTRY)
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        assert!(xml.contains("bonjour le monde"));
    }

    #[tokio::test]
    async fn test_missing_document_entry_is_an_error() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("other.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<x/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.docx");
        fs::write(&path, bytes).unwrap();

        let engine = Engine::new(Translator::new(Upper), 16).with_cooldown(Duration::ZERO);
        let result = translate_docx(&path, &engine, "en", "fr", &HashMap::new()).await;
        assert!(result.is_err());
    }
}
