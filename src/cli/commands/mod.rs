//! Command implementations for the roster importer CLI
//!
//! Each command lives in its own module:
//! - `import`: normalize a roster file, then optionally merge and submit it
//! - `template`: write the blank import workbook

pub mod import;
pub mod shared;
pub mod template;

pub use shared::RunStats;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Dispatch to the selected subcommand, after setting up logging
pub async fn run(args: Args) -> Result<RunStats> {
    match args.command {
        Some(Commands::Import(import_args)) => {
            shared::setup_logging(import_args.get_log_level(), import_args.quiet)?;
            import::run_import(import_args).await
        }
        Some(Commands::Template(template_args)) => {
            shared::setup_logging(template_args.get_log_level(), false)?;
            template::run_template(template_args).await
        }
        None => Ok(RunStats::default()),
    }
}
