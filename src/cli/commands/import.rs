//! Import command implementation
//!
//! Normalizes a roster file, optionally merges it into a local roster and
//! submits the students to the backend, then reports in the chosen format.

use colored::Colorize;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::shared::{RunStats, create_progress_bar, load_configuration};
use crate::Result;
use crate::app::models::{ClassSyncReport, ImportedStudent, SkippedRow, SourceFormat};
use crate::app::services::roster::{MergeReport, Roster};
use crate::app::services::roster_parser::{ImportResult, ImportStats, RosterImporter};
use crate::app::services::submission::{
    HttpStudentSink, StudentSink, StudentSubmitter, SubmissionSummary,
};
use crate::cli::args::{ImportArgs, OutputFormat};
use crate::config::Config;

/// Everything the import command reports
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub file_name: String,
    pub format: SourceFormat,
    pub header_detected: bool,
    pub students: Vec<ImportedStudent>,
    pub skipped: Vec<SkippedRow>,
    pub stats: ImportStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roster: Option<MergeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<SubmissionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_sync: Option<ClassSyncReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_sync_error: Option<String>,
}

impl ImportReport {
    fn from_result(result: ImportResult) -> Self {
        Self {
            file_name: result.file_name,
            format: result.format,
            header_detected: result.detection.has_header(),
            students: result.students,
            skipped: result.skipped,
            stats: result.stats,
            roster: None,
            submission: None,
            class_sync: None,
            class_sync_error: None,
        }
    }

    fn to_run_stats(&self) -> RunStats {
        RunStats {
            students_imported: self.students.len(),
            rows_skipped: self.skipped.len(),
            students_submitted: self.submission.as_ref().map_or(0, |s| s.added()),
            submission_failures: self.submission.as_ref().map_or(0, |s| s.failed()),
            roster_added: self.roster.as_ref().map_or(0, |r| r.added.len()),
            files_written: usize::from(self.roster.is_some()),
            ..RunStats::default()
        }
    }
}

/// Run the import command
pub async fn run_import(args: ImportArgs) -> Result<RunStats> {
    let start = Instant::now();
    args.validate()?;

    let config = load_configuration(&args)?;

    let sink: Option<Arc<dyn StudentSink>> = if args.submit {
        Some(Arc::new(HttpStudentSink::from_config(&config.backend)?))
    } else {
        None
    };

    let report = execute_import(&args, &config, sink).await?;
    println!("{}", render_report(&report, args.output_format)?);

    let mut stats = report.to_run_stats();
    stats.elapsed = start.elapsed();
    Ok(stats)
}

/// Import, merge and submit without printing anything
pub async fn execute_import(
    args: &ImportArgs,
    config: &Config,
    sink: Option<Arc<dyn StudentSink>>,
) -> Result<ImportReport> {
    let importer = RosterImporter::new(config.import.clone());
    let result = importer.import_file(&args.file).await?;
    info!("{}", result.summary());

    let mut report = ImportReport::from_result(result);

    if let Some(roster_path) = &args.roster_file {
        let mut roster = Roster::load(roster_path)?;
        let merge = roster.merge(&report.students);
        roster.save(roster_path)?;
        info!("Roster {}: {}", roster_path.display(), merge.summary());
        report.roster = Some(merge);
    }

    if let Some(sink) = sink {
        let mut submitter = StudentSubmitter::new(sink);
        if args.show_progress() {
            submitter = submitter.with_progress(create_progress_bar(
                report.students.len() as u64,
                "Submitting students",
            ));
        }

        report.submission = Some(submitter.submit_all(&report.students).await);

        if config.backend.sync_classes {
            match submitter.sync_classes().await {
                Ok(sync) => report.class_sync = Some(sync),
                Err(e) => {
                    warn!("Class synchronization failed: {}", e);
                    report.class_sync_error = Some(e.to_string());
                }
            }
        }
    }

    Ok(report)
}

/// Render the report in the requested output format
pub fn render_report(report: &ImportReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(render_human(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => Ok(render_csv(report)),
    }
}

fn render_human(report: &ImportReport) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "{} {} ({})",
        "Imported".green().bold(),
        report.file_name,
        report.format
    ));
    lines.push(format!("   {}", report.stats.summary()));
    lines.push(String::new());

    for student in &report.students {
        lines.push(format!("   • {}", student));
    }

    if !report.skipped.is_empty() {
        lines.push(String::new());
        lines.push(format!("{}", "Skipped rows:".yellow()));
        for skipped in &report.skipped {
            lines.push(format!("   • row {}: {}", skipped.source_row, skipped.reason));
        }
    }

    if let Some(merge) = &report.roster {
        lines.push(String::new());
        lines.push(format!("{} {}", "Roster:".bold(), merge.summary()));
    }

    if let Some(submission) = &report.submission {
        lines.push(String::new());
        let summary = submission.summary();
        if submission.is_complete() {
            lines.push(format!("{} {}", "Submission:".bold(), summary.green()));
        } else {
            lines.push(format!("{} {}", "Submission:".bold(), summary.red()));
            for (student, reason) in submission.failures() {
                lines.push(format!("   ✗ {}: {}", student.name, reason));
            }
        }
    }

    if let Some(sync) = &report.class_sync {
        lines.push(format!(
            "{} {} classes created, {} students linked",
            "Classes:".bold(),
            sync.classes_created,
            sync.students_linked
        ));
    }
    if let Some(error) = &report.class_sync_error {
        lines.push(format!("{} {}", "Classes:".bold(), error.red()));
    }

    lines.join("\n")
}

fn render_csv(report: &ImportReport) -> String {
    let mut lines = vec!["name;class_name".to_string()];
    lines.extend(
        report
            .students
            .iter()
            .map(|s| format!("{};{}", csv_field(&s.name), csv_field(&s.class_name))),
    );
    lines.join("\n")
}

/// Quote a field when it contains the separator or quotes
fn csv_field(value: &str) -> String {
    if value.contains([';', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{CreatedStudent, SkipReason};
    use crate::app::services::submission::RecordOutcome;
    use crate::cli::args::{Args, Commands};
    use clap::Parser;
    use tempfile::TempDir;

    fn import_args(argv: &[&str]) -> ImportArgs {
        match Args::try_parse_from(argv).unwrap().command {
            Some(Commands::Import(args)) => args,
            other => panic!("Expected import command, got {:?}", other),
        }
    }

    fn sample_report() -> ImportReport {
        let mut submission = SubmissionSummary::new();
        submission.push(RecordOutcome {
            student: ImportedStudent::new("MOREAU CAMILLE", "BTS1A", 2),
            result: Ok(CreatedStudent {
                id: 1,
                name: "MOREAU CAMILLE".to_string(),
                class_name: Some("BTS1A".to_string()),
            }),
        });
        submission.push(RecordOutcome {
            student: ImportedStudent::new("DUCHAMP JULIEN", "", 3),
            result: Err("HTTP 500".to_string()),
        });

        ImportReport {
            file_name: "classe.csv".to_string(),
            format: SourceFormat::Csv,
            header_detected: true,
            students: vec![
                ImportedStudent::new("MOREAU CAMILLE", "BTS1A", 2),
                ImportedStudent::new("DUCHAMP JULIEN", "", 3),
            ],
            skipped: vec![SkippedRow {
                source_row: 4,
                reason: SkipReason::EmptyRow,
            }],
            stats: ImportStats::new(),
            roster: None,
            submission: Some(submission),
            class_sync: None,
            class_sync_error: None,
        }
    }

    #[test]
    fn test_render_csv() {
        let output = render_csv(&sample_report());
        assert_eq!(
            output,
            "name;class_name\nMOREAU CAMILLE;BTS1A\nDUCHAMP JULIEN;"
        );
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("BTS1A"), "BTS1A");
        assert_eq!(csv_field("A;B"), "\"A;B\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_render_json() {
        let output = render_report(&sample_report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["file_name"], "classe.csv");
        assert_eq!(value["students"][0]["name"], "MOREAU CAMILLE");
        assert_eq!(value["submission"]["outcomes"][1]["result"]["Err"], "HTTP 500");
        assert!(value.get("roster").is_none());
    }

    #[test]
    fn test_render_human() {
        colored::control::set_override(false);
        let output = render_human(&sample_report());

        assert!(output.contains("Imported classe.csv (csv)"));
        assert!(output.contains("• MOREAU CAMILLE (BTS1A)"));
        assert!(output.contains("row 4: empty row"));
        assert!(output.contains("Submission: 1 added, 1 failed"));
        assert!(output.contains("✗ DUCHAMP JULIEN: HTTP 500"));
    }

    #[test]
    fn test_run_stats_from_report() {
        let stats = sample_report().to_run_stats();
        assert_eq!(stats.students_imported, 2);
        assert_eq!(stats.rows_skipped, 1);
        assert_eq!(stats.students_submitted, 1);
        assert_eq!(stats.submission_failures, 1);
        assert_eq!(stats.files_written, 0);
    }

    #[tokio::test]
    async fn test_execute_import_with_roster() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("classe.csv");
        std::fs::write(&file, "Nom;Prénom;Classe\nMoreau;Camille;BTS1A\n\nDuchamp;Julien;BTS1B\n")
            .unwrap();
        let roster_path = temp_dir.path().join("roster.json");

        let args = import_args(&[
            "roster-import",
            "import",
            file.to_str().unwrap(),
            "--roster",
            roster_path.to_str().unwrap(),
        ]);

        let report = execute_import(&args, &Config::default(), None).await.unwrap();
        assert_eq!(report.students.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.roster.as_ref().unwrap().added.len(), 2);
        assert!(report.submission.is_none());

        // A second run finds everything already present
        let report = execute_import(&args, &Config::default(), None).await.unwrap();
        assert_eq!(report.roster.as_ref().unwrap().duplicates.len(), 2);
        assert_eq!(Roster::load(&roster_path).unwrap().len(), 2);
    }
}
