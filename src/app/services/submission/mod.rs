//! Backend submission for imported students
//!
//! Imported records are sent to the student-creation endpoint one at a time,
//! in source order. A failure on one record is recorded and the loop moves
//! on; nothing is retried.
//!
//! - [`client`] - The [`StudentSink`] seam and its HTTP implementation
//! - [`submitter`] - The sequential submission loop
//! - [`stats`] - Per-record outcomes and the aggregated summary

pub mod client;
pub mod stats;
pub mod submitter;

#[cfg(test)]
pub mod tests;

pub use client::{HttpStudentSink, StudentSink};
pub use stats::{RecordOutcome, SubmissionSummary};
pub use submitter::StudentSubmitter;
