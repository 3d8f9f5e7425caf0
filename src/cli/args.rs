use clap::{Parser, Subcommand};

use crate::formats::Separator;

#[derive(Parser, Debug)]
#[command(name = "xlate")]
#[command(about = "Deduplicating file translation CLI (CSV/TSV/XLSX/DOCX/TXT)")]
#[command(version)]
pub struct Args {
    /// File to translate (.csv, .tsv, .xlsx, .docx, .txt)
    pub file: Option<String>,

    /// Source language code (ISO 639-1, e.g., en, ja, zh)
    #[arg(short = 's', long)]
    pub source: Option<String>,

    /// Target language code (ISO 639-1, e.g., vi, en, fr)
    #[arg(short = 't', long)]
    pub target: Option<String>,

    /// Field separator for delimited files (defaults to the extension's)
    #[arg(long, value_enum)]
    pub sep: Option<Separator>,

    /// Unique values per worker group
    #[arg(short = 'c', long = "chunk-size")]
    pub chunk_size: Option<usize>,

    /// Output file path (defaults to <stem>_<source>_<target>.<ext>)
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// Override dictionary file (JSON object of source -> target phrases)
    #[arg(short = 'd', long)]
    pub dictionary: Option<String>,

    /// Columns to translate (comma-separated; all by default)
    #[arg(long, value_delimiter = ',')]
    pub column: Option<Vec<String>>,

    /// Columns to leave untranslated (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub skip: Option<Vec<String>>,

    /// Sheets to translate (comma-separated; all by default)
    #[arg(long, value_delimiter = ',')]
    pub sheet: Option<Vec<String>>,

    /// Suppress non-essential output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show or edit default settings
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set the default source language
        #[arg(long)]
        source: Option<String>,

        /// Set the default target language
        #[arg(long)]
        target: Option<String>,

        /// Set the default worker group size
        #[arg(long)]
        group_size: Option<usize>,

        /// Set the default dictionary path
        #[arg(long)]
        dictionary: Option<String>,
    },
    /// List supported language codes
    Languages,
}
