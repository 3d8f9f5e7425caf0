//! Document adapters: each format turns a file into ordered translation
//! units, hands them to the engine, and reconstructs the file from the
//! engine's output.

use anyhow::Result;
use clap::ValueEnum;
use std::path::Path;

mod docx;
mod excel;
mod table;
mod text;

pub use docx::translate_docx;
pub use excel::translate_workbook;
pub use table::{Table, read_table, translate_table, write_table};
pub use text::{TextDocument, read_text, translate_text, write_text};

/// Supported input formats, sniffed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Tsv,
    Xlsx,
    Docx,
    Text,
}

impl FileKind {
    /// Rejects unsupported extensions before any translation work begins.
    pub fn detect(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "xlsx" => Ok(Self::Xlsx),
            "docx" => Ok(Self::Docx),
            "txt" => Ok(Self::Text),
            _ => anyhow::bail!(
                "Unsupported file extension: '{}'\n\n\
                 Supported formats: .csv, .tsv, .xlsx, .docx, .txt",
                path.display()
            ),
        }
    }

    /// Field delimiter used when no `--sep` is given.
    pub const fn default_delimiter(self) -> u8 {
        match self {
            Self::Tsv => b'\t',
            _ => b',',
        }
    }
}

/// Field separator names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Separator {
    Comma,
    Tab,
    Semicolon,
}

impl Separator {
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Tab => b'\t',
            Self::Semicolon => b';',
        }
    }
}

/// Column selection: an optional allow-list combined with a skip-list.
#[derive(Debug, Default)]
pub struct ColumnFilter {
    allow: Option<Vec<String>>,
    skip: Vec<String>,
}

impl ColumnFilter {
    pub fn new(allow: Option<Vec<String>>, skip: Option<Vec<String>>) -> Self {
        Self {
            allow,
            skip: skip.unwrap_or_default(),
        }
    }

    pub fn selects(&self, name: &str) -> bool {
        let allowed = self
            .allow
            .as_ref()
            .is_none_or(|allow| allow.iter().any(|a| a == name));
        allowed && !self.skip.iter().any(|s| s == name)
    }
}

/// Sheet selection: an optional allow-list of sheet names.
#[derive(Debug, Default)]
pub struct SheetFilter {
    allow: Option<Vec<String>>,
}

impl SheetFilter {
    pub const fn new(allow: Option<Vec<String>>) -> Self {
        Self { allow }
    }

    pub fn selects(&self, name: &str) -> bool {
        self.allow
            .as_ref()
            .is_none_or(|allow| allow.iter().any(|a| a == name))
    }
}
