//! Data models for roster imports
//!
//! This module contains the core data structures that flow through the import
//! pipeline: the raw decoded grid, the detected column map, and the
//! normalized student records handed to the caller.

use crate::constants::{CSV_EXTENSIONS, XLS_EXTENSIONS, XLSX_EXTENSIONS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// =============================================================================
// Source Format
// =============================================================================

/// Decode path selected from the uploaded file's extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Plain text split on line breaks and `;`/`,`
    Csv,
    /// Office Open XML workbook
    Xlsx,
    /// Legacy BIFF workbook
    Xls,
}

impl SourceFormat {
    /// Pick the decode path from a file name (extension is case-insensitive)
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if CSV_EXTENSIONS.contains(&extension.as_str()) {
            Ok(Self::Csv)
        } else if XLSX_EXTENSIONS.contains(&extension.as_str()) {
            Ok(Self::Xlsx)
        } else if XLS_EXTENSIONS.contains(&extension.as_str()) {
            Ok(Self::Xls)
        } else {
            Err(Error::unsupported_format(file_name, extension))
        }
    }

    /// Whether this format goes through the spreadsheet decoder
    pub fn is_spreadsheet(&self) -> bool {
        !matches!(self, Self::Csv)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Xlsx => write!(f, "xlsx"),
            Self::Xls => write!(f, "xls"),
        }
    }
}

// =============================================================================
// Raw Grid
// =============================================================================

/// Rows x columns of raw text cells, as decoded from one uploaded file
///
/// Rows are ragged: a blank source line is a row with zero cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawGrid {
    rows: Vec<Vec<String>>,
}

impl RawGrid {
    /// Build a grid from already-decoded rows
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Convenience constructor for literal grids
    pub fn from_str_rows(rows: &[&[&str]]) -> Self {
        Self::new(
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
    }

    /// All rows in source order
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// A single row, if present
    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(|row| row.as_slice())
    }

    /// Number of rows, blank rows included
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Column Map
// =============================================================================

/// Column indices detected from the header row
///
/// Each index is either a valid 0-based position in row 0 or `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    /// Surname column (`Nom` / `Noms`)
    pub surname: Option<usize>,

    /// Given-name column (any cell containing `prenom`)
    pub given_name: Option<usize>,

    /// Class column (any cell containing `classe`, `groupe` or `section`)
    pub class: Option<usize>,
}

impl ColumnMap {
    /// Whether at least one name column was found
    pub fn has_name_column(&self) -> bool {
        self.surname.is_some() || self.given_name.is_some()
    }

    /// Whether any of the three columns was found
    pub fn has_any_column(&self) -> bool {
        self.has_name_column() || self.class.is_some()
    }

    /// Whether all three columns were found
    pub fn is_complete(&self) -> bool {
        self.surname.is_some() && self.given_name.is_some() && self.class.is_some()
    }
}

// =============================================================================
// Imported Student
// =============================================================================

/// One normalized roster entry, ready for the student-creation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedStudent {
    /// Upper-cased, single-spaced display name (more than one character)
    pub name: String,

    /// Class label, possibly empty
    pub class_name: String,

    /// 1-based row number in the source file; a local key, not an identity
    pub source_row: usize,
}

impl ImportedStudent {
    pub fn new(name: impl Into<String>, class_name: impl Into<String>, source_row: usize) -> Self {
        Self {
            name: name.into(),
            class_name: class_name.into(),
            source_row,
        }
    }

    pub fn has_class(&self) -> bool {
        !self.class_name.is_empty()
    }
}

impl fmt::Display for ImportedStudent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_class() {
            write!(f, "{} ({})", self.name, self.class_name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

// =============================================================================
// Skipped Rows
// =============================================================================

/// Why a source row produced no student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Row had zero cells
    EmptyRow,
    /// Header line detected under positional fallback
    StrayHeader,
    /// Canonical name had one character or none
    TooShort,
    /// Canonical name echoes the `NOM` / `PRENOM` column labels
    HeaderEcho,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::EmptyRow => "empty row",
            Self::StrayHeader => "stray header line",
            Self::TooShort => "name too short",
            Self::HeaderEcho => "header label in name",
        };
        write!(f, "{}", label)
    }
}

/// A source row that was dropped, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based row number in the source file
    pub source_row: usize,
    pub reason: SkipReason,
}

// =============================================================================
// Backend Records
// =============================================================================

/// Student record as returned by the backend after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedStudent {
    /// Persistent identity assigned by the backend
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

/// Counters returned by the backend class synchronization endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSyncReport {
    #[serde(default)]
    pub classes_created: usize,
    #[serde(default)]
    pub students_linked: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_format_from_file_name() {
        assert_eq!(SourceFormat::from_file_name("roster.csv").unwrap(), SourceFormat::Csv);
        assert_eq!(SourceFormat::from_file_name("ROSTER.XLSX").unwrap(), SourceFormat::Xlsx);
        assert_eq!(SourceFormat::from_file_name("old.xls").unwrap(), SourceFormat::Xls);
        assert_eq!(SourceFormat::from_file_name("macro.xlsm").unwrap(), SourceFormat::Xlsx);
        assert!(SourceFormat::Xls.is_spreadsheet());
        assert!(!SourceFormat::Csv.is_spreadsheet());
    }

    #[test]
    fn test_source_format_rejects_unknown_extension() {
        let err = SourceFormat::from_file_name("notes.txt").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { ref extension, .. } if extension == "txt"));

        let err = SourceFormat::from_file_name("no_extension").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_column_map_predicates() {
        let empty = ColumnMap::default();
        assert!(!empty.has_name_column());
        assert!(!empty.has_any_column());

        let class_only = ColumnMap {
            class: Some(2),
            ..Default::default()
        };
        assert!(!class_only.has_name_column());
        assert!(class_only.has_any_column());

        let full = ColumnMap {
            surname: Some(0),
            given_name: Some(1),
            class: Some(2),
        };
        assert!(full.is_complete());
    }

    #[test]
    fn test_imported_student_display() {
        let with_class = ImportedStudent::new("MOREAU CAMILLE", "BTS1A", 2);
        assert_eq!(with_class.to_string(), "MOREAU CAMILLE (BTS1A)");

        let without_class = ImportedStudent::new("DUPONT JEAN", "", 1);
        assert_eq!(without_class.to_string(), "DUPONT JEAN");
    }

    #[test]
    fn test_raw_grid_accessors() {
        let grid = RawGrid::from_str_rows(&[&["Nom", "Prénom"], &[]]);
        assert_eq!(grid.len(), 2);
        assert_eq!(grid.row(0).unwrap().len(), 2);
        assert!(grid.row(1).unwrap().is_empty());
        assert!(grid.row(2).is_none());
    }
}
