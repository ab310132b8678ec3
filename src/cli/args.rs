//! Command-line argument definitions for the roster importer
//!
//! Defines the CLI surface using the clap derive API: an `import` command
//! that normalizes a roster file and optionally submits it, and a `template`
//! command that writes the blank import workbook.

use crate::config::{HeaderPolicy, PositionalOrder};
use crate::constants::TEMPLATE_FILE_NAME;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the student roster importer
///
/// Turns roster spreadsheets (CSV, XLSX, XLS) of arbitrary layout into clean
/// name/class records, ready for submission to the training-centre backend.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "roster-import",
    version,
    about = "Import student rosters from CSV/XLSX/XLS files into clean name/class records",
    long_about = "Reads a student roster spreadsheet of arbitrary layout, detects the surname, \
                  given-name and class columns (or falls back to positional columns), skips \
                  blank lines and stray header rows, and emits canonical uppercase \
                  \"SURNAME GIVEN\" names with their class labels. Records can then be \
                  submitted to the backend REST API one by one."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Normalize a roster file and optionally submit the students
    Import(ImportArgs),
    /// Write the blank import template workbook
    Template(TemplateArgs),
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// Roster file to import (.csv, .xlsx, .xlsm or .xls)
    #[arg(value_name = "FILE", help = "Roster file to import (.csv, .xlsx, .xls)")]
    pub file: PathBuf,

    /// Submit the imported students to the backend
    ///
    /// Each student is sent in its own request, in file order. A failing
    /// record is reported and the remaining records are still sent.
    #[arg(long = "submit", help = "Submit imported students to the backend API")]
    pub submit: bool,

    /// Backend base URL, overriding config file and environment
    #[arg(
        long = "api-url",
        value_name = "URL",
        help = "Backend base URL (overrides ROSTER_IMPORT_API_URL)"
    )]
    pub api_url: Option<String>,

    /// Bearer token for the backend
    #[arg(
        long = "api-token",
        value_name = "TOKEN",
        help = "Backend bearer token (overrides ROSTER_IMPORT_API_TOKEN)"
    )]
    pub api_token: Option<String>,

    /// Create classes from the imported class labels after submission
    #[arg(
        long = "sync-classes",
        requires = "submit",
        help = "Create and link classes after submitting students"
    )]
    pub sync_classes: bool,

    /// Merge the imported students into a local JSON roster
    ///
    /// Students whose canonical name is already in the roster are reported
    /// as duplicates and not added again. The file is created if missing.
    #[arg(
        long = "roster",
        value_name = "FILE",
        help = "Merge imported students into a local JSON roster file"
    )]
    pub roster_file: Option<PathBuf>,

    /// When row 0 counts as a header row
    #[arg(
        long = "header-policy",
        value_enum,
        value_name = "POLICY",
        help = "Header detection policy"
    )]
    pub header_policy: Option<HeaderPolicy>,

    /// Column order for headerless files
    #[arg(
        long = "positional-order",
        value_enum,
        value_name = "ORDER",
        help = "Column order assumed when the file has no header row"
    )]
    pub positional_order: Option<PositionalOrder>,

    /// Output format for the imported records
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// <config dir>/roster-import/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the template command
#[derive(Debug, Clone, Parser)]
pub struct TemplateArgs {
    /// Destination path for the template workbook
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Destination for the template workbook"
    )]
    pub output_path: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options for import results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format (`name;class`)
    Csv,
}

/// Map verbosity flags onto a tracing level name
fn log_level(quiet: bool, verbose: u8) -> &'static str {
    if quiet {
        return "error";
    }

    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Option<&Commands> {
        self.command.as_ref()
    }
}

impl ImportArgs {
    /// Validate the import arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.file.exists() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.file.display()
            )));
        }

        if !self.file.is_file() {
            return Err(Error::configuration(format!(
                "Input path is not a file: {}",
                self.file.display()
            )));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Get the log level based on verbosity and quiet flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.quiet, self.verbose)
    }

    /// Whether to display progress bars
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }
}

impl TemplateArgs {
    /// Destination path, defaulting to the template file name in the working directory
    pub fn get_output_path(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(TEMPLATE_FILE_NAME))
    }

    /// Get the log level based on verbosity
    pub fn get_log_level(&self) -> &'static str {
        log_level(false, self.verbose)
    }
}
