//! gradeplan-core: grade engine, GPA aggregation, and threshold solver.
//!
//! The engine modules (`grading`, `aggregate`, `threshold`, `difficulty`)
//! are pure functions over borrowed subject lists. `roster`, `config`,
//! `report`, and `strategy` build on them for the CLI.

pub mod aggregate;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod grading;
pub mod model;
pub mod report;
pub mod roster;
pub mod strategy;
pub mod threshold;

pub use aggregate::{exam_contribution, final_score, gpa, impact, predicted_gpa};
pub use difficulty::{difficulty, Difficulty, RiskStatus};
pub use error::ValidationError;
pub use grading::{grade_letter, grade_point, Grade};
pub use model::{PlanSettings, Subject};
pub use threshold::{
    required_exam_score, required_exam_scores_for_target, Requirement, ThresholdPlan,
};
