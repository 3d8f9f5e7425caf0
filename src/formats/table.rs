//! CSV/TSV adapter: one translation unit per selected column.

use anyhow::{Context, Result, anyhow};
use std::collections::HashMap;
use std::path::Path;

use crate::cache::TranslationCache;
use crate::status;
use crate::translation::{ChunkTranslator, Engine};
use crate::ui::Style;

use super::ColumnFilter;

/// A parsed delimited table. Ragged rows are padded to the header width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn read_table(path: &Path, delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read table header")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("Failed to read a table row")?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        // Pad short rows to the header width; over-wide rows keep their
        // extra fields.
        if row.len() < headers.len() {
            row.resize(headers.len(), String::new());
        }
        rows.push(row);
    }

    Ok(Table { headers, rows })
}

pub fn write_table(table: &Table, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_writer(Vec::new());

    writer
        .write_record(&table.headers)
        .context("Failed to write table header")?;
    for row in &table.rows {
        writer.write_record(row).context("Failed to write a table row")?;
    }

    writer
        .into_inner()
        .map_err(|err| anyhow!("Failed to flush table output: {err}"))
}

/// Translates every selected column in place, one unit (and one fresh
/// cache) per column. Headers are not translated.
pub async fn translate_table<C: ChunkTranslator + 'static>(
    table: &mut Table,
    engine: &Engine<C>,
    src: &str,
    dest: &str,
    dictionary: &HashMap<String, String>,
    filter: &ColumnFilter,
) {
    let headers = table.headers.clone();

    for (index, header) in headers.iter().enumerate() {
        if !filter.selects(header) {
            continue;
        }

        status!(
            "{} {}",
            Style::label("Translating column:"),
            Style::value(header)
        );

        let column: Vec<String> = table.rows.iter().map(|row| row[index].clone()).collect();

        let mut cache = TranslationCache::new();
        cache.seed(dictionary);

        let translated = engine.translate_unit(&column, src, dest, &mut cache).await;
        for (row, value) in table.rows.iter_mut().zip(translated) {
            row[index] = value;
        }
    }
}
