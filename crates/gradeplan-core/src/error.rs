//! Data-entry validation errors.
//!
//! The grade engine itself never fails; these errors are raised by the
//! roster layer before a subject is accepted.

use thiserror::Error;

/// Reasons a subject edit is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The subject name is blank.
    #[error("subject name must not be empty")]
    EmptyName,

    /// Assessment score outside 0–50.
    #[error("assessment score {0} is outside 0-50")]
    AssessmentOutOfRange(f64),

    /// Exam score outside 0–100.
    #[error("exam score {0} is outside 0-100")]
    ExamOutOfRange(f64),

    /// Credits must be a positive integer.
    #[error("credits must be at least 1")]
    ZeroCredits,

    /// Another subject already uses this id.
    #[error("duplicate subject id: {0}")]
    DuplicateId(String),

    /// No subject matches the given id or name.
    #[error("subject not found: {0}")]
    UnknownSubject(String),
}

impl ValidationError {
    /// Returns `true` if the error concerns a score value rather than identity.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            ValidationError::AssessmentOutOfRange(_) | ValidationError::ExamOutOfRange(_)
        )
    }
}
