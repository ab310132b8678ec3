//! Sequential submission loop

use indicatif::ProgressBar;
use std::sync::Arc;
use tracing::{info, warn};

use super::client::StudentSink;
use super::stats::{RecordOutcome, SubmissionSummary};
use crate::Result;
use crate::app::models::{ClassSyncReport, ImportedStudent};

/// Submits imported students to a [`StudentSink`], one request in flight at a time
pub struct StudentSubmitter {
    sink: Arc<dyn StudentSink>,
    progress: Option<ProgressBar>,
}

impl StudentSubmitter {
    pub fn new(sink: Arc<dyn StudentSink>) -> Self {
        Self {
            sink,
            progress: None,
        }
    }

    /// Report progress on the given bar while submitting
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Submit every student in order, continuing past failures
    pub async fn submit_all(&self, students: &[ImportedStudent]) -> SubmissionSummary {
        let mut summary = SubmissionSummary::new();

        if let Some(pb) = &self.progress {
            pb.set_length(students.len() as u64);
            pb.set_position(0);
        }

        for student in students {
            if let Some(pb) = &self.progress {
                pb.set_message(student.name.clone());
            }

            let result = match self.sink.create_student(student).await {
                Ok(created) => Ok(created),
                Err(e) => {
                    warn!("Failed to add student {} (row {}): {}", student.name, student.source_row, e);
                    Err(e.to_string())
                }
            };

            summary.push(RecordOutcome {
                student: student.clone(),
                result,
            });

            if let Some(pb) = &self.progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = &self.progress {
            pb.finish_with_message(summary.summary());
        }

        info!("Submission complete: {}", summary.summary());
        summary
    }

    /// Ask the backend to build classes from the submitted class labels
    pub async fn sync_classes(&self) -> Result<ClassSyncReport> {
        let report = self.sink.sync_classes().await?;
        info!(
            "Class sync: {} classes created, {} students linked",
            report.classes_created, report.students_linked
        );
        Ok(report)
    }
}
