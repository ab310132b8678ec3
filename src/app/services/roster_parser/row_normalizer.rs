//! Per-row name and class assembly
//!
//! Detected columns take priority; without any name column the row is read
//! positionally. The resulting name is not yet canonical: casing and
//! whitespace are handled by [`validation`](super::validation).

use crate::app::models::{ColumnMap, SkipReason};
use crate::config::PositionalOrder;
use crate::constants::header_echo::STRAY_LINE_MARKERS;

/// Name and class assembled from one raw row, before canonicalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCandidate {
    pub name: String,
    pub class_name: String,
}

/// Trimmed cell at `index`, or `""` when the row is too short
fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(|c| c.trim()).unwrap_or("")
}

/// Build a candidate from one raw row, or say why it is skipped
pub fn normalize_row(
    row: &[String],
    columns: &ColumnMap,
    order: PositionalOrder,
) -> Result<RowCandidate, SkipReason> {
    if row.is_empty() {
        return Err(SkipReason::EmptyRow);
    }

    let mut class_name = String::new();

    let name = match (columns.surname, columns.given_name) {
        (Some(surname), Some(given)) => format!("{} {}", cell(row, surname), cell(row, given)),
        (Some(surname), None) => cell(row, surname).to_string(),
        (None, Some(given)) => cell(row, given).to_string(),
        (None, None) => {
            if is_stray_header_line(row) {
                return Err(SkipReason::StrayHeader);
            }

            if row.len() >= 2 {
                if row.len() >= 3 && columns.class.is_none() {
                    class_name = cell(row, 2).to_string();
                }
                match order {
                    PositionalOrder::GivenSurname => format!("{} {}", cell(row, 1), cell(row, 0)),
                    PositionalOrder::SurnameGiven => format!("{} {}", cell(row, 0), cell(row, 1)),
                }
            } else {
                cell(row, 0).to_string()
            }
        }
    };

    if let Some(class_index) = columns.class {
        class_name = cell(row, class_index).to_string();
    }

    Ok(RowCandidate { name, class_name })
}

/// A header line that slipped into data: joined text mentions both `prénom` and `nom`
pub fn is_stray_header_line(row: &[String]) -> bool {
    let joined = row.join(" ").to_lowercase();
    STRAY_LINE_MARKERS
        .iter()
        .all(|marker| joined.contains(marker))
}
