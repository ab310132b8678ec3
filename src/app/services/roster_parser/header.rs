//! Header row sniffing and column detection
//!
//! Row 0 is inspected once per import. Detection is a pure function of its
//! content: the first matching column wins and later duplicates are ignored.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::app::models::{ColumnMap, RawGrid};
use crate::config::HeaderPolicy;
use crate::constants::{CLASS_HEADERS, GIVEN_NAME_HEADER, SURNAME_HEADERS};

/// Detected columns and the first data row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderDetection {
    pub columns: ColumnMap,

    /// 1 when row 0 is a header, 0 otherwise
    pub start_row: usize,
}

impl HeaderDetection {
    pub fn has_header(&self) -> bool {
        self.start_row > 0
    }
}

/// Lowercase, strip diacritics (NFD + combining-mark removal) and trim
pub fn normalize_header_cell(cell: &str) -> String {
    cell.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// Locate surname, given-name and class columns in a header row
pub fn detect_columns(header_row: &[String]) -> ColumnMap {
    let normalized: Vec<String> = header_row
        .iter()
        .map(|cell| normalize_header_cell(cell))
        .collect();

    ColumnMap {
        surname: normalized
            .iter()
            .position(|cell| SURNAME_HEADERS.contains(&cell.as_str())),
        given_name: normalized
            .iter()
            .position(|cell| cell.contains(GIVEN_NAME_HEADER)),
        class: normalized
            .iter()
            .position(|cell| CLASS_HEADERS.iter().any(|label| cell.contains(label))),
    }
}

/// Inspect row 0 of a grid and decide whether it is a header
pub fn sniff_header(grid: &RawGrid, policy: HeaderPolicy) -> HeaderDetection {
    let Some(first_row) = grid.row(0) else {
        return HeaderDetection::default();
    };

    let columns = detect_columns(first_row);
    let is_header = match policy {
        HeaderPolicy::NameColumns => columns.has_name_column(),
        HeaderPolicy::AnyColumn => columns.has_any_column(),
    };

    HeaderDetection {
        columns,
        start_row: usize::from(is_header),
    }
}
