//! # xlate - Deduplicating File Translation CLI
//!
//! `xlate` translates structured files (CSV/TSV/XLSX/DOCX/TXT) between
//! languages using free machine-translation endpoints. Distinct values are
//! translated once per unit and reused, so API traffic scales with unique
//! content rather than file size.
//!
//! ## Features
//!
//! - **Deduplication**: One API call per distinct value per unit
//! - **Parallel workers**: Unique values fan out across bounded task groups
//! - **Dictionary overrides**: Seed exact translations that skip the network
//! - **Provider fallback**: A secondary endpoint covers primary failures;
//!   untranslatable values keep their original text
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate a CSV from English to Vietnamese
//! xlate -s en -t vi ./report.csv
//!
//! # Only some columns, with a custom separator
//! xlate -s en -t vi --sep semicolon --column name,description ./items.csv
//!
//! # A workbook, one sheet only
//! xlate -s ja -t en --sheet Summary ./book.xlsx
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/xlate/config.toml`:
//!
//! ```toml
//! [defaults]
//! source = "en"
//! target = "vi"
//! group_size = 16
//! dictionary = "/home/me/overrides.json"
//! ```

/// Per-unit translation cache keyed by hashed, case-folded source text.
pub mod cache;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management.
pub mod config;

/// User override dictionary loading.
pub mod dictionary;

/// Document adapters (CSV/TSV, XLSX, DOCX, plain text).
pub mod formats;

/// File system utilities.
pub mod fs;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Translation providers, chunking, and the deduplicating engine.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;
