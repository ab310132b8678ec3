//! Application constants for the roster importer
//!
//! This module contains the header vocabulary, separators, template layout
//! and environment variable names used throughout the crate.

// =============================================================================
// Header Detection
// =============================================================================

/// Header cells that mark the surname column (exact match after normalization)
pub const SURNAME_HEADERS: &[&str] = &["nom", "noms"];

/// Substring that marks the given-name column after normalization
pub const GIVEN_NAME_HEADER: &str = "prenom";

/// Substrings that mark the class column after normalization
pub const CLASS_HEADERS: &[&str] = &["classe", "groupe", "section"];

/// Tokens that must never survive as a student name (accent-folded, upper case)
pub const HEADER_ECHO_TOKENS: &[&str] = &["NOM", "NOMS", "PRENOM", "PRENOMS"];

/// Substrings that together flag a header line leaking into data rows
pub mod header_echo {
    /// Surname label as it appears in an upper-cased name
    pub const SURNAME: &str = "NOM";
    /// Given-name label as it appears in an upper-cased, accent-folded name
    pub const GIVEN_NAME: &str = "PRENOM";
    /// Lower-case markers for a stray header line under positional fallback
    pub const STRAY_LINE_MARKERS: &[&str] = &["prénom", "nom"];
}

// =============================================================================
// Validation
// =============================================================================

/// Minimum number of characters a canonical name must have
pub const MIN_NAME_CHARS: usize = 2;

// =============================================================================
// Tabular Reader
// =============================================================================

/// Cell separators accepted in CSV uploads
pub const CSV_SEPARATORS: &[char] = &[';', ','];

/// UTF-8 byte order mark written by some spreadsheet exports
pub const UTF8_BOM: &str = "\u{feff}";

/// File extensions decoded as CSV text
pub const CSV_EXTENSIONS: &[&str] = &["csv"];

/// File extensions decoded as Office Open XML workbooks
pub const XLSX_EXTENSIONS: &[&str] = &["xlsx", "xlsm"];

/// File extensions decoded as legacy BIFF workbooks
pub const XLS_EXTENSIONS: &[&str] = &["xls"];

// =============================================================================
// Template
// =============================================================================

/// Default file name of the downloadable import template
pub const TEMPLATE_FILE_NAME: &str = "modele_import_etudiants.xlsx";

/// Worksheet name used in the template
pub const TEMPLATE_SHEET_NAME: &str = "Etudiants";

/// Template header row
pub const TEMPLATE_HEADERS: [&str; 3] = ["Nom", "Prénom", "Classe"];

/// Illustrative rows written below the template header
pub const TEMPLATE_EXAMPLE_ROWS: &[[&str; 3]] = &[
    ["DUPONT", "Jean", "BTS NDRC 1"],
    ["MARTIN", "Sophie", "BTS NDRC 1"],
    ["BERNARD", "Lucas", "BTS NDRC 2"],
];

// =============================================================================
// Backend
// =============================================================================

/// Student creation endpoint, relative to the API base URL
pub const STUDENTS_ENDPOINT: &str = "/api/students";

/// Class synchronization endpoint, relative to the API base URL
pub const CLASS_SYNC_ENDPOINT: &str = "/api/classes/sync";

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Configuration
// =============================================================================

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "roster-import";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the backend base URL
pub const ENV_API_URL: &str = "ROSTER_IMPORT_API_URL";

/// Environment variable carrying the backend bearer token
pub const ENV_API_TOKEN: &str = "ROSTER_IMPORT_API_TOKEN";
