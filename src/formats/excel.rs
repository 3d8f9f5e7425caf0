//! XLSX adapter.
//!
//! Spreadsheet text lives in two places: the shared-string table
//! (`xl/sharedStrings.xml`, referenced by `<c t="s"><v>index</v></c>`
//! cells) and inline strings (`<is><t>` inside a worksheet). Each selected
//! sheet becomes one translation unit built from the shared strings it
//! references plus its inline strings. Rewriting goes through a map keyed
//! by cache key, so only strings that belong to a selected sheet change;
//! everything else keeps its original bytes.

use anyhow::{Context, Result, anyhow};
use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

use crate::cache::{TranslationCache, cache_key};
use crate::status;
use crate::translation::{ChunkTranslator, Engine};
use crate::ui::Style;

use super::SheetFilter;
use super::docx::rebuild_archive_with;

const WORKBOOK_ENTRY: &str = "xl/workbook.xml";
const WORKBOOK_RELS_ENTRY: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_ENTRY: &str = "xl/sharedStrings.xml";

pub async fn translate_workbook<C: ChunkTranslator + 'static>(
    path: &Path,
    engine: &Engine<C>,
    src: &str,
    dest: &str,
    dictionary: &HashMap<String, String>,
    filter: &SheetFilter,
) -> Result<Vec<u8>> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to open input file: {}", path.display()))?;
    let mut archive = ZipArchive::new(Cursor::new(&bytes))
        .with_context(|| format!("Failed to read workbook archive: {}", path.display()))?;

    let workbook_xml = read_entry(&mut archive, WORKBOOK_ENTRY)
        .with_context(|| format!("Not a workbook (missing {WORKBOOK_ENTRY})"))?;
    let rels_xml = read_entry(&mut archive, WORKBOOK_RELS_ENTRY)
        .context("Workbook has no relationship table")?;

    let sheets = workbook_sheets(&workbook_xml)?;
    let targets = relationship_targets(&rels_xml)?;
    let shared_xml = read_entry(&mut archive, SHARED_STRINGS_ENTRY).ok();
    let shared_items = match &shared_xml {
        Some(xml) => shared_string_items(xml)?,
        None => Vec::new(),
    };

    // One unit per selected sheet; translations accumulate in a single
    // replacement map keyed by cache key.
    let mut replacements: HashMap<String, String> = HashMap::new();
    let mut referenced: HashSet<usize> = HashSet::new();
    let mut rewritten: HashMap<String, Vec<u8>> = HashMap::new();

    for (name, rid) in &sheets {
        if !filter.selects(name) {
            continue;
        }
        let target = targets
            .get(rid)
            .ok_or_else(|| anyhow!("Workbook sheet '{name}' has no worksheet entry"))?;
        let entry = worksheet_entry(target);
        let sheet_xml = read_entry(&mut archive, &entry)
            .with_context(|| format!("Failed to read worksheet for sheet '{name}'"))?;

        let (refs, inline) = scan_worksheet(&sheet_xml)?;

        let mut unit: Vec<String> = Vec::new();
        let mut sorted_refs: Vec<usize> = refs.iter().copied().collect();
        sorted_refs.sort_unstable();
        for index in &sorted_refs {
            if let Some(texts) = shared_items.get(*index) {
                unit.extend(texts.iter().cloned());
            }
        }
        unit.extend(inline);

        status!(
            "{} {} ({} strings)",
            Style::label("Translating sheet:"),
            Style::value(name),
            unit.len()
        );

        let mut cache = TranslationCache::new();
        cache.seed(dictionary);
        let translated = engine.translate_unit(&unit, src, dest, &mut cache).await;
        for (original, output) in unit.iter().zip(translated) {
            replacements.insert(cache_key(original), output);
        }

        referenced.extend(refs);
        rewritten.insert(entry, rewrite_inline_strings(&sheet_xml, &replacements)?);
    }

    if let Some(xml) = &shared_xml {
        if !referenced.is_empty() {
            rewritten.insert(
                SHARED_STRINGS_ENTRY.to_string(),
                rewrite_shared_strings(xml, &referenced, &replacements)?,
            );
        }
    }

    rebuild_archive_with(&mut archive, &rewritten)
}

fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    archive
        .by_name(name)
        .with_context(|| format!("Missing archive entry: {name}"))?
        .read_to_end(&mut data)
        .with_context(|| format!("Failed to read archive entry: {name}"))?;
    Ok(data)
}

/// Sheet names with their relationship ids, in workbook order.
fn workbook_sheets(xml: &[u8]) -> Result<Vec<(String, String)>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) if e.local_name().as_ref() == b"sheet" => {
                let mut name = None;
                let mut rid = None;
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"name" => name = Some(attr.unescape_value()?.into_owned()),
                        b"r:id" => rid = Some(attr.unescape_value()?.into_owned()),
                        _ => {}
                    }
                }
                if let (Some(name), Some(rid)) = (name, rid) {
                    sheets.push((name, rid));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(anyhow!("Failed to parse workbook XML: {err}")),
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Relationship id to target path, from the workbook's .rels entry.
fn relationship_targets(xml: &[u8]) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut targets = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let mut id = None;
                let mut target = None;
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => id = Some(attr.unescape_value()?.into_owned()),
                        b"Target" => target = Some(attr.unescape_value()?.into_owned()),
                        _ => {}
                    }
                }
                if let (Some(id), Some(target)) = (id, target) {
                    targets.insert(id, target);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(anyhow!("Failed to parse workbook relationships: {err}")),
        }
        buf.clear();
    }

    Ok(targets)
}

/// Relationship targets are relative to `xl/` unless absolute.
fn worksheet_entry(target: &str) -> String {
    target
        .strip_prefix('/')
        .map_or_else(|| format!("xl/{target}"), str::to_string)
}

/// Shared-string items in table order; one item may carry several text
/// runs.
fn shared_string_items(xml: &[u8]) -> Result<Vec<Vec<String>>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut items = Vec::new();
    let mut current: Option<Vec<String>> = None;
    let mut in_t = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"si" => current = Some(Vec::new()),
                b"t" if current.is_some() => in_t = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"si" => {
                    if let Some(item) = current.take() {
                        items.push(item);
                    }
                }
                b"t" => in_t = false,
                _ => {}
            },
            Ok(Event::Text(e)) if in_t => {
                if let Some(item) = current.as_mut() {
                    item.push(e.unescape().context("Invalid XML text")?.into_owned());
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(anyhow!("Failed to parse shared strings: {err}")),
        }
        buf.clear();
    }

    Ok(items)
}

/// Shared-string indices referenced by the sheet's cells plus its inline
/// string texts.
fn scan_worksheet(xml: &[u8]) -> Result<(HashSet<usize>, Vec<String>)> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut refs = HashSet::new();
    let mut inline = Vec::new();
    let mut in_string_cell = false;
    let mut in_v = false;
    let mut is_depth = 0usize;
    let mut in_t = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"c" => {
                    in_string_cell = false;
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"t" && attr.unescape_value()?.as_ref() == "s" {
                            in_string_cell = true;
                        }
                    }
                }
                b"v" => in_v = true,
                b"is" => is_depth += 1,
                b"t" if is_depth > 0 => in_t = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"c" => in_string_cell = false,
                b"v" => in_v = false,
                b"is" => is_depth = is_depth.saturating_sub(1),
                b"t" => in_t = false,
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_string_cell && in_v {
                    let index: usize = e
                        .unescape()?
                        .trim()
                        .parse()
                        .context("Invalid shared-string reference")?;
                    refs.insert(index);
                } else if in_t {
                    inline.push(e.unescape().context("Invalid XML text")?.into_owned());
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(anyhow!("Failed to parse worksheet XML: {err}")),
        }
        buf.clear();
    }

    Ok((refs, inline))
}

/// Rewrites `<is><t>` texts through the replacement map; shared-string
/// references and everything else pass unchanged.
fn rewrite_inline_strings(xml: &[u8], replacements: &HashMap<String, String>) -> Result<Vec<u8>> {
    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(Vec::new());
    let mut buf = Vec::new();
    let mut is_depth = 0usize;
    let mut in_t = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                match e.local_name().as_ref() {
                    b"is" => is_depth += 1,
                    b"t" if is_depth > 0 => in_t = true,
                    _ => {}
                }
                writer.write_event(Event::Start(e.to_owned()))?;
            }
            Ok(Event::End(e)) => {
                match e.local_name().as_ref() {
                    b"is" => is_depth = is_depth.saturating_sub(1),
                    b"t" => in_t = false,
                    _ => {}
                }
                writer.write_event(Event::End(e.to_owned()))?;
            }
            Ok(Event::Text(e)) if in_t => {
                let original = e.unescape().context("Invalid XML text")?.into_owned();
                match replacements.get(&cache_key(&original)) {
                    Some(translated) => {
                        writer.write_event(Event::Text(BytesText::new(translated)))?;
                    }
                    None => writer.write_event(Event::Text(BytesText::new(&original)))?,
                }
            }
            Ok(Event::Eof) => break,
            Ok(event) => writer.write_event(event.to_owned())?,
            Err(err) => return Err(anyhow!("Failed to parse worksheet XML: {err}")),
        }
        buf.clear();
    }

    Ok(writer.into_inner())
}

/// Rewrites text runs of referenced shared-string items; items no selected
/// sheet references keep their original text.
fn rewrite_shared_strings(
    xml: &[u8],
    referenced: &HashSet<usize>,
    replacements: &HashMap<String, String>,
) -> Result<Vec<u8>> {
    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(Vec::new());
    let mut buf = Vec::new();
    let mut item_index = 0usize;
    let mut in_si = false;
    let mut in_t = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                match e.local_name().as_ref() {
                    b"si" => in_si = true,
                    b"t" if in_si => in_t = true,
                    _ => {}
                }
                writer.write_event(Event::Start(e.to_owned()))?;
            }
            Ok(Event::End(e)) => {
                match e.local_name().as_ref() {
                    b"si" => {
                        in_si = false;
                        item_index += 1;
                    }
                    b"t" => in_t = false,
                    _ => {}
                }
                writer.write_event(Event::End(e.to_owned()))?;
            }
            Ok(Event::Text(e)) if in_si && in_t && referenced.contains(&item_index) => {
                let original = e.unescape().context("Invalid XML text")?.into_owned();
                match replacements.get(&cache_key(&original)) {
                    Some(translated) => {
                        writer.write_event(Event::Text(BytesText::new(translated)))?;
                    }
                    None => writer.write_event(Event::Text(BytesText::new(&original)))?,
                }
            }
            Ok(Event::Eof) => break,
            Ok(event) => writer.write_event(event.to_owned())?,
            Err(err) => return Err(anyhow!("Failed to parse shared strings: {err}")),
        }
        buf.clear();
    }

    Ok(writer.into_inner())
}
