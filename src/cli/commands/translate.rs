//! Translation command handler.

use anyhow::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::ConfigManager;
use crate::dictionary::load_dictionary;
use crate::formats::{
    ColumnFilter, FileKind, Separator, SheetFilter, read_table, read_text, translate_docx,
    translate_table, translate_text, translate_workbook, write_table, write_text,
};
use crate::fs::atomic_write;
use crate::status;
use crate::translation::{
    DEFAULT_GROUP_SIZE, Engine, ProviderChain, Translator, default_chain, validate_language,
};
use crate::ui::{Spinner, Style};

pub struct TranslateOptions {
    pub file: String,
    pub source: Option<String>,
    pub target: Option<String>,
    pub sep: Option<Separator>,
    pub chunk_size: Option<usize>,
    pub output: Option<String>,
    pub dictionary: Option<String>,
    pub column: Option<Vec<String>>,
    pub skip: Option<Vec<String>>,
    pub sheet: Option<Vec<String>>,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let manager = ConfigManager::new();
    let defaults = manager.load_or_default().defaults;

    let source = options
        .source
        .clone()
        .or(defaults.source)
        .ok_or_else(|| missing_setting("source"))?;
    let target = options
        .target
        .clone()
        .or(defaults.target)
        .ok_or_else(|| missing_setting("target"))?;
    validate_language(&source)?;
    validate_language(&target)?;

    let group_size = options
        .chunk_size
        .or(defaults.group_size)
        .unwrap_or(DEFAULT_GROUP_SIZE);

    let input = Path::new(&options.file);
    let kind = FileKind::detect(input)?;

    // A broken dictionary aborts the run before any translation work.
    let dictionary = match options
        .dictionary
        .as_ref()
        .map(PathBuf::from)
        .or(defaults.dictionary)
    {
        Some(path) => load_dictionary(&path)?,
        None => HashMap::new(),
    };

    let engine: Engine<ProviderChain> = Engine::new(Translator::new(default_chain()?), group_size);

    status!(
        "{} {} ({} -> {})",
        Style::label("Translating:"),
        Style::value(input.display()),
        Style::code(&source),
        Style::code(&target)
    );

    let spinner = (!crate::output::is_quiet()).then(|| Spinner::new("Translating..."));

    let bytes = match kind {
        FileKind::Csv | FileKind::Tsv => {
            let delimiter = options.sep.map_or(kind.default_delimiter(), Separator::as_byte);
            let filter = ColumnFilter::new(options.column, options.skip);
            let mut table = read_table(input, delimiter)?;
            translate_table(&mut table, &engine, &source, &target, &dictionary, &filter).await;
            write_table(&table, delimiter)?
        }
        FileKind::Xlsx => {
            let filter = SheetFilter::new(options.sheet);
            translate_workbook(input, &engine, &source, &target, &dictionary, &filter).await?
        }
        FileKind::Docx => translate_docx(input, &engine, &source, &target, &dictionary).await?,
        FileKind::Text => {
            let mut document = read_text(input)?;
            translate_text(&mut document, &engine, &source, &target, &dictionary).await;
            write_text(&document)
        }
    };

    if let Some(spinner) = spinner {
        spinner.stop();
    }

    // The original file is never touched; output lands next to it unless
    // overridden.
    let output_path = options
        .output
        .map_or_else(|| default_output_path(input, &source, &target), PathBuf::from);
    atomic_write(&output_path, &bytes)?;

    status!(
        "{} Translated file written to {}",
        Style::success("✓"),
        Style::secondary(output_path.display())
    );

    Ok(())
}

fn missing_setting(name: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Missing required configuration: '{name}'\n\n\
         Please provide it via:\n  \
         - CLI option: xlate --{name} <lang> <file>\n  \
         - Config file: Run 'xlate configure --{name} <lang>'"
    )
}

/// `report.csv` translated en -> vi becomes `report_en_vi.csv`.
fn default_output_path(input: &Path, src: &str, dest: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "output".to_string(), |s| s.to_string_lossy().into_owned());
    let name = input.extension().map_or_else(
        || format!("{stem}_{src}_{dest}"),
        |ext| format!("{stem}_{src}_{dest}.{}", ext.to_string_lossy()),
    );
    input.with_file_name(name)
}
