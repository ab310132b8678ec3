use clap::Parser;
use roster_import::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    eprintln!("Failed to listen for CTRL+C: {}", e);
                }
                eprintln!("\nReceived CTRL+C, stopping...");
                Err(roster_import::Error::processing_interrupted(
                    "Import interrupted by user",
                ))
            }
        }
    });

    match result {
        Ok(_stats) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Roster Import - student roster normalizer");
    println!("=========================================");
    println!();
    println!("Turn CSV/XLSX/XLS student rosters of any layout into clean");
    println!("\"SURNAME GIVEN\" records with their class labels.");
    println!();
    println!("USAGE:");
    println!("    roster-import <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    import      Normalize a roster file and optionally submit it");
    println!("    template    Write the blank import template workbook");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Preview a roster file:");
    println!("    roster-import import classe.xlsx");
    println!();
    println!("    # Submit to the backend and create classes:");
    println!("    roster-import import classe.csv --submit --sync-classes \\");
    println!("                         --api-url https://ccf.example.org");
    println!();
    println!("    # Write the import template:");
    println!("    roster-import template -o modele_import_etudiants.xlsx");
    println!();
    println!("For detailed help on any command, use:");
    println!("    roster-import <COMMAND> --help");
}
