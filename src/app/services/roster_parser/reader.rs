//! Tabular decoding for roster uploads
//!
//! CSV text is split naively on line breaks and `;`/`,` separators. Quoted
//! fields are not supported: a name containing a separator splits that row.
//! Workbooks are decoded with calamine, first sheet only.

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use encoding_rs::WINDOWS_1252;
use std::io::Cursor;
use tracing::debug;

use crate::app::models::{RawGrid, SourceFormat};
use crate::constants::{CSV_SEPARATORS, UTF8_BOM};
use crate::{Error, Result};

/// Decode an uploaded payload into a raw grid along the path chosen for `format`
pub fn read_grid(bytes: &[u8], format: SourceFormat, file_name: &str) -> Result<RawGrid> {
    debug!("Decoding '{}' as {}", file_name, format);

    match format {
        SourceFormat::Csv => Ok(read_csv(&decode_text(bytes))),
        SourceFormat::Xlsx | SourceFormat::Xls => read_spreadsheet(bytes, file_name),
    }
}

/// Decode CSV bytes to text: UTF-8 (BOM stripped), falling back to Windows-1252
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string(),
        Err(_) => {
            debug!("Payload is not valid UTF-8, decoding as Windows-1252");
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text.into_owned()
        }
    }
}

/// Split CSV text into a grid of trimmed cells
pub fn read_csv(text: &str) -> RawGrid {
    let rows = text
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                Vec::new()
            } else {
                line.split(CSV_SEPARATORS)
                    .map(|cell| cell.trim().to_string())
                    .collect()
            }
        })
        .collect();

    RawGrid::new(rows)
}

/// Decode the first worksheet of an XLSX/XLS payload
pub fn read_spreadsheet(bytes: &[u8], file_name: &str) -> Result<RawGrid> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| Error::file_read(file_name, format!("Failed to open workbook: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::file_read(file_name, "Workbook contains no sheets"))?
        .map_err(|e| Error::file_read(file_name, format!("Failed to read first sheet: {}", e)))?;

    Ok(range_to_grid(&range))
}

/// Convert a calamine range to rows of text, dropping trailing empty cells
pub fn range_to_grid(range: &Range<Data>) -> RawGrid {
    let rows = range
        .rows()
        .map(|row| {
            let mut cells: Vec<String> = row.iter().map(cell_to_string).collect();
            while cells.last().is_some_and(|cell| cell.trim().is_empty()) {
                cells.pop();
            }
            cells
        })
        .collect();

    RawGrid::new(rows)
}

/// Render one spreadsheet cell as text
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(_) => String::new(),
        other => other.to_string(),
    }
}
