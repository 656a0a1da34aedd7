//! Subject roster: JSON import/export and data-entry validation.
//!
//! The roster is the flat, versioned subject collection that the CLI edits
//! and hands to the grade engine. Range checks happen here, at the boundary,
//! so the engine can assume well-formed input.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::model::{Subject, MAX_ASSESSMENT_SCORE, MAX_EXAM_SCORE};

/// Version tag written into exported rosters.
pub const ROSTER_VERSION: &str = "1.0";

/// A versioned list of subjects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub subjects: Vec<Subject>,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    ROSTER_VERSION.to_string()
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            subjects: Vec::new(),
            version: default_version(),
        }
    }
}

/// Fields supplied when creating a subject.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectDraft {
    pub name: String,
    pub assessment_score: f64,
    pub credits: u32,
    pub exam_score: Option<f64>,
}

/// Partial edit of an existing subject. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectUpdate {
    pub name: Option<String>,
    pub assessment_score: Option<f64>,
    pub credits: Option<u32>,
    /// `Some(None)` clears the exam estimate.
    pub exam_score: Option<Option<f64>>,
}

/// Check one subject's fields against the data-entry rules.
pub fn validate_fields(
    name: &str,
    assessment_score: f64,
    credits: u32,
    exam_score: Option<f64>,
) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !(0.0..=MAX_ASSESSMENT_SCORE).contains(&assessment_score) {
        return Err(ValidationError::AssessmentOutOfRange(assessment_score));
    }
    if credits == 0 {
        return Err(ValidationError::ZeroCredits);
    }
    if let Some(exam) = exam_score {
        validate_exam_score(exam)?;
    }
    Ok(())
}

fn validate_exam_score(exam_score: f64) -> Result<(), ValidationError> {
    if (0.0..=MAX_EXAM_SCORE).contains(&exam_score) {
        Ok(())
    } else {
        Err(ValidationError::ExamOutOfRange(exam_score))
    }
}

impl Roster {
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self {
            subjects,
            version: default_version(),
        }
    }

    /// Parse a roster export. Any object with a `subjects` array is accepted.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("failed to parse roster JSON")
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize roster")
    }

    /// Load a roster from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read roster from {}", path.display()))?;
        let roster = Self::from_json_str(&content)
            .with_context(|| format!("invalid roster file: {}", path.display()))?;
        if roster.version != ROSTER_VERSION {
            tracing::warn!(
                "{} has roster version '{}', expected {ROSTER_VERSION}",
                path.display(),
                roster.version
            );
        }
        tracing::debug!(
            "loaded {} subjects from {}",
            roster.subjects.len(),
            path.display()
        );
        Ok(roster)
    }

    /// Load a roster, or start an empty one if the file does not exist yet.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_json(path)
        } else {
            tracing::debug!("{} not found, starting an empty roster", path.display());
            Ok(Self::default())
        }
    }

    /// Save the roster as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json_string()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write roster to {}", path.display()))?;
        Ok(())
    }

    /// Find a subject by id, falling back to a case-insensitive name match.
    pub fn find(&self, key: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == key).or_else(|| {
            self.subjects
                .iter()
                .find(|s| s.name.eq_ignore_ascii_case(key))
        })
    }

    /// Resolve an id-or-name key to the subject's id.
    pub fn resolve_id(&self, key: &str) -> Result<String, ValidationError> {
        self.find(key)
            .map(|s| s.id.clone())
            .ok_or_else(|| ValidationError::UnknownSubject(key.to_string()))
    }

    fn position(&self, id: &str) -> Result<usize, ValidationError> {
        self.subjects
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| ValidationError::UnknownSubject(id.to_string()))
    }

    /// Validate and append a new subject with a freshly assigned id.
    pub fn add_subject(&mut self, draft: SubjectDraft) -> Result<&Subject, ValidationError> {
        validate_fields(
            &draft.name,
            draft.assessment_score,
            draft.credits,
            draft.exam_score,
        )?;

        self.subjects.push(Subject {
            id: Uuid::new_v4().to_string(),
            name: draft.name.trim().to_string(),
            assessment_score: draft.assessment_score,
            credits: draft.credits,
            exam_score: draft.exam_score,
        });
        Ok(&self.subjects[self.subjects.len() - 1])
    }

    /// Append a subject that already carries an id.
    pub fn insert_subject(&mut self, subject: Subject) -> Result<(), ValidationError> {
        validate_fields(
            &subject.name,
            subject.assessment_score,
            subject.credits,
            subject.exam_score,
        )?;
        if self.subjects.iter().any(|s| s.id == subject.id) {
            return Err(ValidationError::DuplicateId(subject.id));
        }
        self.subjects.push(subject);
        Ok(())
    }

    /// Apply a partial edit. The id never changes.
    pub fn update_subject(
        &mut self,
        id: &str,
        update: SubjectUpdate,
    ) -> Result<&Subject, ValidationError> {
        let idx = self.position(id)?;
        let current = &self.subjects[idx];

        let name = update.name.unwrap_or_else(|| current.name.clone());
        let assessment_score = update.assessment_score.unwrap_or(current.assessment_score);
        let credits = update.credits.unwrap_or(current.credits);
        let exam_score = update.exam_score.unwrap_or(current.exam_score);
        validate_fields(&name, assessment_score, credits, exam_score)?;

        let subject = &mut self.subjects[idx];
        subject.name = name.trim().to_string();
        subject.assessment_score = assessment_score;
        subject.credits = credits;
        subject.exam_score = exam_score;
        Ok(&self.subjects[idx])
    }

    /// Set or clear a subject's exam estimate.
    pub fn set_exam_score(
        &mut self,
        id: &str,
        exam_score: Option<f64>,
    ) -> Result<&Subject, ValidationError> {
        self.update_subject(
            id,
            SubjectUpdate {
                exam_score: Some(exam_score),
                ..Default::default()
            },
        )
    }

    pub fn remove_subject(&mut self, id: &str) -> Result<Subject, ValidationError> {
        let idx = self.position(id)?;
        Ok(self.subjects.remove(idx))
    }

    /// Drop every subject.
    pub fn reset(&mut self) {
        self.subjects.clear();
    }
}

/// A warning from roster validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The subject id (if applicable).
    pub subject_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a loaded roster for problems the importer let through.
pub fn validate_roster(roster: &Roster) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if roster.version != ROSTER_VERSION {
        warnings.push(ValidationWarning {
            subject_id: None,
            message: format!(
                "unexpected roster version '{}' (expected {ROSTER_VERSION})",
                roster.version
            ),
        });
    }

    let mut seen_ids = HashSet::new();
    for subject in &roster.subjects {
        if !seen_ids.insert(subject.id.as_str()) {
            warnings.push(ValidationWarning {
                subject_id: Some(subject.id.clone()),
                message: format!("duplicate subject ID: {}", subject.id),
            });
        }
    }

    for subject in &roster.subjects {
        if let Err(e) = validate_fields(
            &subject.name,
            subject.assessment_score,
            subject.credits,
            subject.exam_score,
        ) {
            warnings.push(ValidationWarning {
                subject_id: Some(subject.id.clone()),
                message: e.to_string(),
            });
        }
    }

    warnings
}
