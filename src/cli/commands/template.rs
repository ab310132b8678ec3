//! Template command implementation

use colored::Colorize;
use std::time::Instant;

use super::shared::RunStats;
use crate::Result;
use crate::app::services::template::write_template;
use crate::cli::args::TemplateArgs;

/// Write the blank import workbook
pub async fn run_template(args: TemplateArgs) -> Result<RunStats> {
    let start = Instant::now();
    let output_path = args.get_output_path();

    write_template(&output_path)?;

    println!(
        "{} {}",
        "Template written to".green().bold(),
        output_path.display()
    );

    Ok(RunStats {
        files_written: 1,
        elapsed: start.elapsed(),
        ..RunStats::default()
    })
}
