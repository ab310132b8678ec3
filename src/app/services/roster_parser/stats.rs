//! Import statistics and result structures
//!
//! This module provides types for tracking how many rows were read, accepted
//! and skipped, and for carrying the normalized students to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::header::HeaderDetection;
use crate::app::models::{ImportedStudent, SkipReason, SkippedRow, SourceFormat};

/// Simple import statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportStats {
    /// Rows in the decoded grid, header included
    pub total_rows: usize,

    /// Whether row 0 was consumed as a header
    pub header_detected: bool,

    /// Number of students emitted
    pub students_accepted: usize,

    /// Rows with zero cells
    pub empty_rows: usize,

    /// Header lines caught under positional fallback
    pub stray_headers: usize,

    /// Names of one character or less
    pub too_short: usize,

    /// Names echoing the column labels
    pub header_echoes: usize,
}

impl ImportStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one skipped row under its reason
    pub fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::EmptyRow => self.empty_rows += 1,
            SkipReason::StrayHeader => self.stray_headers += 1,
            SkipReason::TooShort => self.too_short += 1,
            SkipReason::HeaderEcho => self.header_echoes += 1,
        }
    }

    /// Total rows dropped for any reason
    pub fn rows_skipped(&self) -> usize {
        self.empty_rows + self.stray_headers + self.too_short + self.header_echoes
    }

    /// Data rows considered, i.e. excluding the header row
    pub fn data_rows(&self) -> usize {
        self.total_rows - usize::from(self.header_detected && self.total_rows > 0)
    }

    /// Accepted share of data rows as a percentage
    pub fn acceptance_rate(&self) -> f64 {
        let data_rows = self.data_rows();
        if data_rows == 0 {
            0.0
        } else {
            (self.students_accepted as f64 / data_rows as f64) * 100.0
        }
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "{} students from {} data rows ({:.1}% accepted) | header: {} | skipped: {} empty, {} stray header, {} too short, {} header echo",
            self.students_accepted,
            self.data_rows(),
            self.acceptance_rate(),
            if self.header_detected { "yes" } else { "no" },
            self.empty_rows,
            self.stray_headers,
            self.too_short,
            self.header_echoes
        )
    }
}

/// Output of normalizing one grid, independent of where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    /// Accepted students in source order
    pub students: Vec<ImportedStudent>,

    /// Dropped rows with reasons, in source order
    pub skipped: Vec<SkippedRow>,

    /// Header detection result
    pub detection: HeaderDetection,

    pub stats: ImportStats,
}

impl ImportOutcome {
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

/// Import result for one file
#[derive(Debug, Clone)]
pub struct ImportResult {
    /// Name of the imported file
    pub file_name: String,

    /// Decode path that was used
    pub format: SourceFormat,

    /// When the import ran
    pub imported_at: DateTime<Utc>,

    /// Accepted students in source order
    pub students: Vec<ImportedStudent>,

    /// Dropped rows with reasons
    pub skipped: Vec<SkippedRow>,

    pub detection: HeaderDetection,

    pub stats: ImportStats,
}

impl ImportResult {
    /// Attach file metadata to a grid outcome
    pub fn from_outcome(
        file_name: impl Into<String>,
        format: SourceFormat,
        outcome: ImportOutcome,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            format,
            imported_at: Utc::now(),
            students: outcome.students,
            skipped: outcome.skipped,
            detection: outcome.detection,
            stats: outcome.stats,
        }
    }

    /// Get the number of imported students
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        format!("{} ({}): {}", self.file_name, self.format, self.stats.summary())
    }
}
