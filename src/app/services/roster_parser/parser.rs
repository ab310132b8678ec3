//! Roster import orchestration
//!
//! This module wires the reader, header sniffer, row normalizer and filter
//! together. Each import is a single stateless pass over one file.

use std::path::Path;
use tracing::{debug, info, warn};

use super::header::sniff_header;
use super::reader::read_grid;
use super::row_normalizer::normalize_row;
use super::stats::{ImportOutcome, ImportResult, ImportStats};
use super::validation::validate_candidate;
use crate::app::models::{RawGrid, SkippedRow, SourceFormat};
use crate::config::ImportConfig;
use crate::{Error, Result};

/// Roster importer for CSV and Excel class lists
///
/// Holds only configuration: running it twice on the same input yields the
/// same output.
#[derive(Debug, Clone, Default)]
pub struct RosterImporter {
    config: ImportConfig,
}

impl RosterImporter {
    /// Create a new importer with the given heuristics
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Read a roster file from disk and import it
    pub async fn import_file(&self, file_path: &Path) -> Result<ImportResult> {
        info!("Importing roster file: {}", file_path.display());

        let bytes = tokio::fs::read(file_path).await.map_err(|e| {
            Error::io(format!("Failed to read file {}", file_path.display()), e)
        })?;

        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.display().to_string());

        self.import_bytes(&bytes, &file_name)
    }

    /// Import an in-memory payload; the file name selects the decoder
    ///
    /// Fails with [`Error::NoStudentsFound`] when decoding worked but no row
    /// survived normalization.
    pub fn import_bytes(&self, bytes: &[u8], file_name: &str) -> Result<ImportResult> {
        let format = SourceFormat::from_file_name(file_name)?;
        let grid = read_grid(bytes, format, file_name)?;
        debug!("Decoded {} rows from '{}'", grid.len(), file_name);

        let outcome = self.normalize_grid(&grid);
        if outcome.is_empty() {
            warn!("No students found in '{}'", file_name);
            return Err(Error::no_students_found(file_name));
        }

        let result = ImportResult::from_outcome(file_name, format, outcome);
        info!("Imported {}", result.summary());
        Ok(result)
    }

    /// Run header detection, row normalization and filtering over a grid
    pub fn normalize_grid(&self, grid: &RawGrid) -> ImportOutcome {
        let detection = sniff_header(grid, self.config.header_policy);
        debug!(
            "Header detection: {:?} (start row {})",
            detection.columns, detection.start_row
        );

        let mut stats = ImportStats {
            total_rows: grid.len(),
            header_detected: detection.has_header(),
            ..ImportStats::new()
        };
        let mut students = Vec::new();
        let mut skipped = Vec::new();

        for (index, row) in grid.rows().iter().enumerate().skip(detection.start_row) {
            let source_row = index + 1;

            let accepted = normalize_row(row, &detection.columns, self.config.positional_order)
                .and_then(|candidate| validate_candidate(candidate, source_row));

            match accepted {
                Ok(student) => {
                    stats.students_accepted += 1;
                    students.push(student);
                }
                Err(reason) => {
                    debug!("Skipped row {}: {}", source_row, reason);
                    stats.record_skip(reason);
                    skipped.push(SkippedRow { source_row, reason });
                }
            }
        }

        ImportOutcome {
            students,
            skipped,
            detection,
            stats,
        }
    }
}
