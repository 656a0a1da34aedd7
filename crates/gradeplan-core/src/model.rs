//! Core data model types for gradeplan.
//!
//! A [`Subject`] is the only domain entity. The engine borrows subject lists
//! and never mutates them; editing happens in the [`roster`](crate::roster)
//! layer.

use serde::{Deserialize, Serialize};

/// Highest assessment (IA) score a subject can carry.
pub const MAX_ASSESSMENT_SCORE: f64 = 50.0;

/// Highest exam (SEE) score on the raw 0–100 scale.
pub const MAX_EXAM_SCORE: f64 = 100.0;

/// A single enrolled subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Opaque identifier, assigned once at creation.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Internal assessment score on the 0–50 scale.
    #[serde(alias = "iaMarks")]
    pub assessment_score: f64,
    /// Credit weight of the subject.
    pub credits: u32,
    /// Final-exam score on the 0–100 scale; `None` until estimated.
    #[serde(default, alias = "seeScore", skip_serializing_if = "Option::is_none")]
    pub exam_score: Option<f64>,
}

impl Subject {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        assessment_score: f64,
        credits: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            assessment_score,
            credits,
            exam_score: None,
        }
    }

    /// Builder-style setter for the exam score.
    #[must_use]
    pub fn with_exam_score(mut self, exam_score: f64) -> Self {
        self.exam_score = Some(exam_score);
        self
    }

    /// Whether this subject counts towards the current GPA.
    pub fn is_estimated(&self) -> bool {
        self.exam_score.is_some()
    }
}

/// Target GPA and locked subjects for one planning session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSettings {
    /// GPA the student wants to reach.
    #[serde(default = "default_target_gpa")]
    pub target_gpa: f64,
    /// Subjects whose exam score is treated as fixed.
    #[serde(default)]
    pub locked_subjects: Vec<String>,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            target_gpa: default_target_gpa(),
            locked_subjects: Vec::new(),
        }
    }
}

pub(crate) fn default_target_gpa() -> f64 {
    8.0
}
