//! Test utilities for roster parser testing
//!
//! This module provides fixtures and helper functions used across the
//! different roster parser test modules.

use std::io::Write;
use tempfile::NamedTempFile;

use crate::app::models::RawGrid;

// Test modules
mod header_tests;
mod stats_tests;

/// Helper to build a grid from string literals
pub fn grid(rows: &[&[&str]]) -> RawGrid {
    RawGrid::from_str_rows(rows)
}

/// Helper to build an owned row from string literals
pub fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

/// Class list export as produced by a school information system
pub fn create_test_roster_csv() -> String {
    "Nom;Prénom;Classe\r\n\
     MOREAU;Camille;BTS1A\r\n\
     DUCHAMP;Julien;BTS1A\r\n\
     \r\n\
     LEFEBVRE;  Anne   Marie ;BTS2B\r\n\
     NOM;PRENOM;CLASSE\r\n\
     X;;BTS2B\r\n"
        .to_string()
}

/// Headerless two-column export (given name first)
pub fn create_headerless_csv() -> String {
    "Camille,Moreau\nJulien,Duchamp\n".to_string()
}

/// Helper to create a temporary file with the given suffix and content
pub fn create_temp_file(suffix: &str, content: &[u8]) -> NamedTempFile {
    let mut temp_file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}
