//! Plan report assembly with JSON persistence and markdown output.
//!
//! The report is built purely from engine calls; rendering beyond markdown
//! is left to callers.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::{final_score, gpa, predicted_gpa};
use crate::difficulty::{difficulty, Difficulty};
use crate::grading::{grade_letter, grade_point, Grade, GRADE_SCALE};
use crate::model::{PlanSettings, Subject};
use crate::threshold::{required_exam_scores_for_target, Requirement};

/// Longest subject name printed before truncation.
const MAX_NAME_LEN: usize = 25;

/// What to put in a report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Whether to solve for required exam scores.
    pub include_predictions: bool,
    /// Target and locked subjects used when predicting.
    pub settings: PlanSettings,
}

impl ReportOptions {
    /// Plain report of the recorded scores.
    pub fn current_only() -> Self {
        Self {
            include_predictions: false,
            settings: PlanSettings::default(),
        }
    }

    /// Prediction report that locks every subject already estimated.
    pub fn predictions(subjects: &[Subject], target_gpa: f64) -> Self {
        Self {
            include_predictions: true,
            settings: PlanSettings {
                target_gpa,
                locked_subjects: subjects
                    .iter()
                    .filter(|s| s.is_estimated())
                    .map(|s| s.id.clone())
                    .collect(),
            },
        }
    }
}

/// A complete plan report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub generated_at: DateTime<Utc>,
    /// GPA from recorded exam scores.
    pub current_gpa: f64,
    /// Whether required scores were computed.
    pub include_predictions: bool,
    /// Target GPA; only set when a prediction was made.
    pub target_gpa: Option<f64>,
    /// GPA if every subject scores exactly what the plan requires.
    pub predicted_gpa: Option<f64>,
    /// One row per subject, in roster order.
    pub rows: Vec<ReportRow>,
}

/// A single subject line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub subject_id: String,
    pub name: String,
    pub assessment_score: f64,
    pub exam_score: Option<f64>,
    pub credits: u32,
    pub final_score: Option<f64>,
    pub grade: Option<Grade>,
    pub locked: bool,
    pub requirement: Option<Requirement>,
    pub difficulty: Option<Difficulty>,
    pub predicted_grade: Option<Grade>,
}

impl PlanReport {
    /// Assemble a report for `subjects`.
    pub fn build(subjects: &[Subject], options: &ReportOptions) -> Self {
        let settings = &options.settings;
        let plan = options.include_predictions.then(|| {
            required_exam_scores_for_target(
                subjects,
                settings.target_gpa,
                &settings.locked_subjects,
            )
        });

        let predicted = plan
            .as_ref()
            .filter(|_| !subjects.is_empty())
            .map(|p| predicted_gpa(subjects, &p.exam_scores()))
            .filter(|g| *g > 0.0);

        let rows = subjects
            .iter()
            .map(|s| {
                let total = s.exam_score.map(|e| final_score(s.assessment_score, e));
                let requirement = plan.as_ref().and_then(|p| p.get(&s.id)).copied();
                let predicted_grade = requirement
                    .and_then(|r| r.exam_score())
                    .map(|e| grade_letter(grade_point(final_score(s.assessment_score, e))));

                ReportRow {
                    subject_id: s.id.clone(),
                    name: s.name.clone(),
                    assessment_score: s.assessment_score,
                    exam_score: s.exam_score,
                    credits: s.credits,
                    final_score: total,
                    grade: total.map(|t| grade_letter(grade_point(t))),
                    locked: settings.locked_subjects.contains(&s.id),
                    requirement,
                    difficulty: requirement
                        .filter(|r| !r.is_locked())
                        .map(|r| difficulty(r.exam_score())),
                    predicted_grade,
                }
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            current_gpa: gpa(subjects),
            include_predictions: options.include_predictions,
            target_gpa: predicted.map(|_| settings.target_gpa),
            predicted_gpa: predicted,
            rows,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: PlanReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("# Grade Plan Report\n\n");
        md.push_str(&format!(
            "_Generated on: {}_\n\n",
            self.generated_at.format("%B %-d, %Y")
        ));

        md.push_str("## GPA Summary\n\n");
        let current = if self.current_gpa > 0.0 {
            format!("{:.2}", self.current_gpa)
        } else {
            "N/A".to_string()
        };
        md.push_str(&format!(
            "- Current GPA (from entered exam scores): {current}\n"
        ));
        if let (Some(target), Some(predicted)) = (self.target_gpa, self.predicted_gpa) {
            md.push_str(&format!("- **Target GPA: {target:.2}**\n"));
            md.push_str(&format!(
                "- Predicted GPA (with required exam scores): {predicted:.2}\n"
            ));
        }
        md.push('\n');

        md.push_str("## Subject Details\n\n");
        if self.include_predictions {
            md.push_str("| Subject | IA | Exam | Req. Exam | Grade | Credits |\n");
        } else {
            md.push_str("| Subject | IA | Exam | Total | Grade | Credits |\n");
        }
        md.push_str("|---------|----|------|-----------|-------|---------|\n");

        for row in &self.rows {
            let exam = row
                .exam_score
                .map(|e| e.to_string())
                .unwrap_or_else(|| "-".to_string());
            let (fourth, grade) = if self.include_predictions {
                let required = match row.requirement {
                    _ if row.locked => "(Locked)".to_string(),
                    Some(Requirement::Required(score)) => format!("{score:.0}"),
                    _ => "N/A".to_string(),
                };
                (required, row.predicted_grade)
            } else {
                let total = row
                    .final_score
                    .map(|t| format!("{t:.1}"))
                    .unwrap_or_else(|| "-".to_string());
                (total, row.grade)
            };
            let grade = grade
                .map(|g| g.to_string())
                .unwrap_or_else(|| "-".to_string());

            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                display_name(&row.name),
                row.assessment_score,
                exam,
                fourth,
                grade,
                row.credits
            ));
        }
        md.push('\n');

        md.push_str("## Grade Scale Reference\n\n");
        for band in GRADE_SCALE {
            md.push_str(&format!(
                "- {} ({} points): {} marks\n",
                band.grade,
                band.grade.grade_point(),
                band.marks
            ));
        }

        if let (Some(target), Some(_)) = (self.target_gpa, self.predicted_gpa) {
            md.push_str("\n**Note:**\n\n");
            md.push_str(&format!(
                "This report includes predicted exam scores required to achieve a target GPA of {target:.2}.\n"
            ));
            md.push_str(
                "Locked subjects keep their current exam scores. Flexible subjects show required scores.\n",
            );
        }

        md
    }
}

/// Truncate long names and keep table cells intact.
fn display_name(name: &str) -> String {
    let name = if name.chars().count() > MAX_NAME_LEN {
        let head: String = name.chars().take(MAX_NAME_LEN - 3).collect();
        format!("{head}...")
    } else {
        name.to_string()
    };
    name.replace('|', "\\|")
}
