//! Roster parser for student spreadsheet uploads
//!
//! This module turns an arbitrary CSV or Excel roster into an ordered list of
//! `{name, class}` records. The heuristics are best-effort: they follow the
//! conventions of French class lists (`Nom`, `Prénom`, `Classe`) and fall back
//! to column positions when no header row is present.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`reader`] - CSV / XLSX / XLS decoding into a [`RawGrid`](crate::RawGrid)
//! - [`header`] - Header row sniffing and column detection
//! - [`row_normalizer`] - Per-row name and class assembly
//! - [`validation`] - Name canonicalization and rejection rules
//! - [`parser`] - Import orchestration over one file
//! - [`stats`] - Import statistics and result structures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use roster_import::app::services::roster_parser::RosterImporter;
//! use roster_import::config::ImportConfig;
//!
//! # async fn example() -> roster_import::Result<()> {
//! let importer = RosterImporter::new(ImportConfig::default());
//! let result = importer.import_file(std::path::Path::new("classe.xlsx")).await?;
//!
//! println!("Imported {} students from {} rows",
//!          result.stats.students_accepted,
//!          result.stats.total_rows);
//! # Ok(())
//! # }
//! ```

pub mod header;
pub mod parser;
pub mod reader;
pub mod row_normalizer;
pub mod stats;
pub mod validation;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use header::{HeaderDetection, detect_columns, sniff_header};
pub use parser::RosterImporter;
pub use stats::{ImportOutcome, ImportResult, ImportStats};
