//! Import template generation
//!
//! The template documents the layout the header sniffer expects: a
//! `Nom` / `Prénom` / `Classe` header row followed by example students.

use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;
use tracing::info;

use crate::app::models::RawGrid;
use crate::constants::{TEMPLATE_EXAMPLE_ROWS, TEMPLATE_HEADERS, TEMPLATE_SHEET_NAME};
use crate::{Error, Result};

/// Column widths (in characters) for the three template columns
const COLUMN_WIDTHS: [f64; 3] = [24.0, 20.0, 16.0];

/// Template content as a grid: header row then example rows
pub fn template_grid() -> RawGrid {
    let mut rows = vec![TEMPLATE_HEADERS.iter().map(|h| h.to_string()).collect()];
    rows.extend(
        TEMPLATE_EXAMPLE_ROWS
            .iter()
            .map(|example| example.iter().map(|cell| cell.to_string()).collect()),
    );
    RawGrid::new(rows)
}

/// Build the template workbook in memory
fn build_workbook() -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(TEMPLATE_SHEET_NAME)
        .map_err(|e| Error::template_write("Failed to name template sheet", e))?;

    for (row_index, row) in template_grid().rows().iter().enumerate() {
        for (col_index, value) in row.iter().enumerate() {
            let (row_num, col_num) = (row_index as u32, col_index as u16);
            let written = if row_index == 0 {
                worksheet.write_string_with_format(row_num, col_num, value, &header_format)
            } else {
                worksheet.write_string(row_num, col_num, value)
            };
            written.map_err(|e| {
                Error::template_write(
                    format!("Failed to write template cell ({}, {})", row_index, col_index),
                    e,
                )
            })?;
        }
    }

    for (col_index, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet
            .set_column_width(col_index as u16, *width)
            .map_err(|e| Error::template_write("Failed to set template column width", e))?;
    }

    Ok(workbook)
}

/// Template workbook as XLSX bytes, e.g. for an HTTP download
pub fn template_bytes() -> Result<Vec<u8>> {
    let mut workbook = build_workbook()?;
    workbook
        .save_to_buffer()
        .map_err(|e| Error::template_write("Failed to serialize template workbook", e))
}

/// Write the template workbook to disk
pub fn write_template(path: &Path) -> Result<()> {
    let mut workbook = build_workbook()?;
    workbook.save(path).map_err(|e| {
        Error::template_write(format!("Failed to save template to {}", path.display()), e)
    })?;

    info!("Wrote import template: {}", path.display());
    Ok(())
}
