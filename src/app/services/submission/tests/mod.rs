//! Tests for the submission loop and summary


use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

use super::client::StudentSink;
use crate::app::models::{ClassSyncReport, CreatedStudent, ImportedStudent};
use crate::{Error, Result};

/// In-memory sink that records calls and fails for selected names
#[derive(Debug, Default)]
pub struct MockStudentSink {
    failing_names: HashSet<String>,
    pub received: Mutex<Vec<String>>,
    pub sync_calls: Mutex<usize>,
}

impl MockStudentSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(names: &[&str]) -> Self {
        Self {
            failing_names: names.iter().map(|n| n.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn received_names(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl StudentSink for MockStudentSink {
    async fn create_student(&self, student: &ImportedStudent) -> Result<CreatedStudent> {
        let mut received = self.received.lock().unwrap();
        received.push(student.name.clone());

        if self.failing_names.contains(&student.name) {
            return Err(Error::backend("Student creation failed with HTTP 400: duplicate email", None));
        }

        Ok(CreatedStudent {
            id: received.len() as i64,
            name: student.name.clone(),
            class_name: Some(student.class_name.clone()).filter(|c| !c.is_empty()),
        })
    }

    async fn sync_classes(&self) -> Result<ClassSyncReport> {
        *self.sync_calls.lock().unwrap() += 1;
        Ok(ClassSyncReport {
            classes_created: 1,
            students_linked: 2,
        })
    }
}

/// Helper to build a small roster
pub fn create_test_students() -> Vec<ImportedStudent> {
    vec![
        ImportedStudent::new("MOREAU CAMILLE", "BTS1A", 2),
        ImportedStudent::new("DUCHAMP JULIEN", "BTS1A", 3),
        ImportedStudent::new("LEFEBVRE ANNE", "", 4),
    ]
}
