//! Roster Import Library
//!
//! A Rust library for importing student rosters (BTS NDRC classes) from
//! CSV and Excel spreadsheets into clean `{name, class}` records.
//!
//! This library provides tools for:
//! - Decoding CSV, XLSX and XLS uploads into a raw grid of text cells
//! - Sniffing French header rows (`Nom`, `Prénom`, `Classe`...) to locate columns
//! - Normalizing each row into an upper-cased, single-spaced display name
//! - Rejecting blank, too-short and header-echo rows
//! - Emitting the downloadable import template
//! - Submitting records to the backend one at a time with per-record outcomes

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod roster;
        pub mod roster_parser;
        pub mod submission;
        pub mod template;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ColumnMap, ImportedStudent, RawGrid};
pub use app::services::roster_parser::RosterImporter;
pub use config::Config;

/// Result type alias for roster import operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for roster import operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not one the reader knows how to decode
    #[error("Unsupported file format for '{file}': .{extension} (expected .xlsx, .xls or .csv)")]
    UnsupportedFormat { file: String, extension: String },

    /// Spreadsheet payload could not be decoded
    #[error("File read error in '{file}': {message}")]
    FileRead { file: String, message: String },

    /// Decoding succeeded but no row survived normalization
    #[error("No students found in '{file}'")]
    NoStudentsFound { file: String },

    /// Template workbook could not be produced
    #[error("Template generation error: {message}")]
    TemplateWrite {
        message: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// Backend request failed or returned an error status
    #[error("Backend error: {message}")]
    Backend {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// JSON (de)serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(file: impl Into<String>, extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            file: file.into(),
            extension: extension.into(),
        }
    }

    /// Create a file read (decode) error
    pub fn file_read(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileRead {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a no-students-found error
    pub fn no_students_found(file: impl Into<String>) -> Self {
        Self::NoStudentsFound { file: file.into() }
    }

    /// Create a template generation error
    pub fn template_write(message: impl Into<String>, source: rust_xlsxwriter::XlsxError) -> Self {
        Self::TemplateWrite {
            message: message.into(),
            source,
        }
    }

    /// Create a backend error
    pub fn backend(message: impl Into<String>, source: Option<reqwest::Error>) -> Self {
        Self::Backend {
            message: message.into(),
            source,
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Whether this error means the file was read but held no usable rows
    pub fn is_empty_roster(&self) -> bool {
        matches!(self, Self::NoStudentsFound { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Backend {
            message: "HTTP request failed".to_string(),
            source: Some(error),
        }
    }
}
