//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading with CLI overrides, the run
//! statistics returned to `main`, and progress bar styling.

use crate::cli::args::ImportArgs;
use crate::config::Config;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, info};

/// Statistics reported by a command run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    /// Students accepted by the importer
    pub students_imported: usize,
    /// Rows dropped by the importer
    pub rows_skipped: usize,
    /// Students the backend accepted
    pub students_submitted: usize,
    /// Students the backend rejected
    pub submission_failures: usize,
    /// Students newly added to the local roster
    pub roster_added: usize,
    /// Files written (template or roster)
    pub files_written: usize,
    /// Wall-clock time of the command
    pub elapsed: Duration,
}

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the level derived from the flags.
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("roster_import={}", log_level)));

    let result = if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load layered configuration and apply import command overrides
pub fn load_configuration(args: &ImportArgs) -> Result<Config> {
    match &args.config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => info!("Using default config location, environment and CLI flags"),
    }

    let mut config = Config::load_layered(args.config_file.as_deref())?;
    apply_cli_overrides(&mut config, args);
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, args: &ImportArgs) {
    if let Some(url) = &args.api_url {
        config.backend.api_url = Some(url.clone());
    }
    if let Some(token) = &args.api_token {
        config.backend.api_token = Some(token.clone());
    }
    if args.sync_classes {
        config.backend.sync_classes = true;
    }
    if let Some(policy) = args.header_policy {
        config.import.header_policy = policy;
    }
    if let Some(order) = args.positional_order {
        config.import.positional_order = order;
    }
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{Args, Commands};
    use crate::config::{HeaderPolicy, PositionalOrder};
    use clap::Parser;

    fn import_args(argv: &[&str]) -> ImportArgs {
        match Args::try_parse_from(argv).unwrap().command {
            Some(Commands::Import(args)) => args,
            other => panic!("Expected import command, got {:?}", other),
        }
    }

    #[test]
    fn test_run_stats_default() {
        let stats = RunStats::default();
        assert_eq!(stats.students_imported, 0);
        assert_eq!(stats.elapsed, Duration::ZERO);
    }

    #[test]
    fn test_cli_overrides() {
        let args = import_args(&[
            "roster-import",
            "import",
            "a.csv",
            "--submit",
            "--sync-classes",
            "--api-url",
            "https://backend.test",
            "--api-token",
            "secret",
            "--header-policy",
            "any-column",
            "--positional-order",
            "surname-given",
        ]);

        let mut config = Config::default();
        apply_cli_overrides(&mut config, &args);

        assert_eq!(config.backend.api_url.as_deref(), Some("https://backend.test"));
        assert_eq!(config.backend.api_token.as_deref(), Some("secret"));
        assert!(config.backend.sync_classes);
        assert_eq!(config.import.header_policy, HeaderPolicy::AnyColumn);
        assert_eq!(config.import.positional_order, PositionalOrder::SurnameGiven);
    }

    #[test]
    fn test_cli_overrides_keep_config_values() {
        let args = import_args(&["roster-import", "import", "a.csv"]);

        let mut config = Config::default().with_api_url("http://from-file.test");
        config.import.header_policy = HeaderPolicy::AnyColumn;
        apply_cli_overrides(&mut config, &args);

        assert_eq!(config.backend.api_url.as_deref(), Some("http://from-file.test"));
        assert_eq!(config.import.header_policy, HeaderPolicy::AnyColumn);
    }

    #[test]
    fn test_create_progress_bar() {
        let pb = create_progress_bar(5, "Submitting");
        assert_eq!(pb.length(), Some(5));
        assert_eq!(pb.message(), "Submitting");
    }
}
