//! Local roster store
//!
//! Keeps imported students in a JSON file so repeated imports only add names
//! that are not already present. Duplicate detection compares canonical names
//! exactly, which is sufficient because the importer already canonicalizes.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

use crate::app::models::ImportedStudent;
use crate::{Error, Result};

/// One stored student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    #[serde(default)]
    pub class_name: String,
}

impl From<&ImportedStudent> for RosterEntry {
    fn from(student: &ImportedStudent) -> Self {
        Self {
            name: student.name.clone(),
            class_name: student.class_name.clone(),
        }
    }
}

/// Result of merging an import into the roster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Names appended to the roster, in import order
    pub added: Vec<String>,

    /// Names already present (or repeated within the import)
    pub duplicates: Vec<String>,
}

impl MergeReport {
    pub fn summary(&self) -> String {
        format!(
            "{} added to roster, {} already present",
            self.added.len(),
            self.duplicates.len()
        )
    }
}

/// Persistent list of students
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub students: Vec<RosterEntry>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a roster file; a missing file yields an empty roster
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Roster file {} not found, starting empty", path.display());
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read roster {}", path.display()), e))?;

        serde_json::from_str(&content).map_err(|e| {
            Error::serialization(format!("Invalid roster file {}", path.display()), e)
        })
    }

    /// Write the roster as pretty-printed JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::io(format!("Failed to create directory {}", parent.display()), e)
            })?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::serialization("Failed to serialize roster", e))?;
        std::fs::write(path, json)
            .map_err(|e| Error::io(format!("Failed to write roster {}", path.display()), e))?;

        info!("Saved roster with {} students to {}", self.len(), path.display());
        Ok(())
    }

    /// Append students whose canonical name is not yet present
    pub fn merge(&mut self, students: &[ImportedStudent]) -> MergeReport {
        let mut known: HashSet<String> = self.students.iter().map(|s| s.name.clone()).collect();
        let mut report = MergeReport::default();

        for student in students {
            if known.insert(student.name.clone()) {
                self.students.push(RosterEntry::from(student));
                report.added.push(student.name.clone());
            } else {
                report.duplicates.push(student.name.clone());
            }
        }

        debug!("Roster merge: {}", report.summary());
        report
    }

    /// Distinct non-empty class labels in first-seen order
    pub fn class_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.students
            .iter()
            .filter(|s| !s.class_name.is_empty())
            .filter(|s| seen.insert(s.class_name.as_str()))
            .map(|s| s.class_name.clone())
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.students.iter().any(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn students() -> Vec<ImportedStudent> {
        vec![
            ImportedStudent::new("MOREAU CAMILLE", "BTS1A", 2),
            ImportedStudent::new("DUCHAMP JULIEN", "BTS1B", 3),
            ImportedStudent::new("LEFEBVRE ANNE", "", 4),
            ImportedStudent::new("PETIT LEA", "BTS1A", 5),
        ]
    }

    #[test]
    fn test_merge_into_empty_roster() {
        let mut roster = Roster::new();
        let report = roster.merge(&students());

        assert_eq!(report.added.len(), 4);
        assert!(report.duplicates.is_empty());
        assert_eq!(roster.len(), 4);
        assert_eq!(roster.students[0].name, "MOREAU CAMILLE");
    }

    #[test]
    fn test_merge_skips_existing_names() {
        let mut roster = Roster::new();
        roster.merge(&students()[..2]);

        let report = roster.merge(&students());
        assert_eq!(report.added, vec!["LEFEBVRE ANNE", "PETIT LEA"]);
        assert_eq!(report.duplicates, vec!["MOREAU CAMILLE", "DUCHAMP JULIEN"]);
        assert_eq!(roster.len(), 4);
        assert_eq!(report.summary(), "2 added to roster, 2 already present");
    }

    #[test]
    fn test_merge_dedups_within_one_import() {
        let mut roster = Roster::new();
        let import = vec![
            ImportedStudent::new("MOREAU CAMILLE", "BTS1A", 2),
            ImportedStudent::new("MOREAU CAMILLE", "BTS1B", 7),
        ];

        let report = roster.merge(&import);
        assert_eq!(report.added.len(), 1);
        assert_eq!(report.duplicates.len(), 1);
        assert_eq!(roster.students[0].class_name, "BTS1A");
    }

    #[test]
    fn test_class_names_first_seen_order() {
        let mut roster = Roster::new();
        roster.merge(&students());

        assert_eq!(roster.class_names(), vec!["BTS1A", "BTS1B"]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let roster = Roster::load(&temp_dir.path().join("missing.json")).unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("roster.json");

        let mut roster = Roster::new();
        roster.merge(&students());
        roster.save(&path).unwrap();

        let loaded = Roster::load(&path).unwrap();
        assert_eq!(loaded, roster);
        assert!(loaded.contains("PETIT LEA"));
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("roster.json");
        std::fs::write(&path, "not json").unwrap();

        let err = Roster::load(&path).unwrap_err();
        assert!(matches!(err, Error::Serialization { .. }));
    }
}
