//! Per-record submission outcomes and the aggregated summary

use serde::Serialize;

use crate::app::models::{CreatedStudent, ImportedStudent};

/// Result of submitting one imported student
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordOutcome {
    pub student: ImportedStudent,

    /// Backend record on success, failure reason otherwise
    pub result: Result<CreatedStudent, String>,
}

impl RecordOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Aggregated outcome of a submission run, in submission order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubmissionSummary {
    pub outcomes: Vec<RecordOutcome>,
}

impl SubmissionSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: RecordOutcome) {
        self.outcomes.push(outcome);
    }

    /// Number of records the backend accepted
    pub fn added(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    /// Number of records that failed
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.added()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether every record was accepted
    pub fn is_complete(&self) -> bool {
        self.failed() == 0
    }

    /// Failed records with their reasons
    pub fn failures(&self) -> impl Iterator<Item = (&ImportedStudent, &str)> {
        self.outcomes.iter().filter_map(|o| match &o.result {
            Ok(_) => None,
            Err(reason) => Some((&o.student, reason.as_str())),
        })
    }

    /// "N added, M failed" style summary
    pub fn summary(&self) -> String {
        format!("{} added, {} failed", self.added(), self.failed())
    }
}
