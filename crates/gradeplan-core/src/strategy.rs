//! Study recommendations derived from the current subject list.

use serde::{Deserialize, Serialize};

use crate::aggregate::{gpa, impact, subject_grade_point};
use crate::model::Subject;
use crate::threshold::required_exam_score;

/// Subjects above this share of the credit load are flagged as high impact.
pub const HIGH_IMPACT_PERCENT: f64 = 20.0;

/// Recommendation category, in display priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Success,
    Info,
    Warning,
}

/// A single piece of advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
}

impl Recommendation {
    fn new(kind: RecommendationKind, title: String, description: String) -> Self {
        Self {
            kind,
            title,
            description,
        }
    }
}

/// Build recommendations for `subjects`, successes first and warnings last.
pub fn recommendations(subjects: &[Subject]) -> Vec<Recommendation> {
    if subjects.is_empty() {
        return Vec::new();
    }

    let current_gpa = gpa(subjects);
    let mut recs = Vec::new();

    for subject in subjects {
        let share = impact(subject, subjects);
        if share > HIGH_IMPACT_PERCENT {
            recs.push(Recommendation::new(
                RecommendationKind::Info,
                format!("High Impact: {}", subject.name),
                format!(
                    "This subject carries {} credits ({share:.0}% impact on GPA). \
                     Performance here significantly affects your overall grade.",
                    subject.credits
                ),
            ));
        }

        let Some(exam_score) = subject.exam_score else {
            continue;
        };
        let gp = subject_grade_point(subject, exam_score);

        if subject.assessment_score >= 40.0 && exam_score < 50.0 {
            let next = required_exam_score(subject.assessment_score, gp as f64 + 1.0);
            if let Some(required) = next.filter(|r| *r <= 80.0) {
                recs.push(Recommendation::new(
                    RecommendationKind::Success,
                    format!("Easy Upgrade: {}", subject.name),
                    format!(
                        "Strong assessment score ({}/50)! You need only {required:.0}/100 \
                         in the exam to improve to the next grade level.",
                        subject.assessment_score
                    ),
                ));
            }
        }

        if subject.assessment_score < 30.0 && exam_score > 70.0 {
            recs.push(Recommendation::new(
                RecommendationKind::Warning,
                format!("Compensating: {}", subject.name),
                format!(
                    "Low assessment score ({}/50) requires high exam performance. \
                     Current estimate: {exam_score}/100.",
                    subject.assessment_score
                ),
            ));
        }
    }

    let missing = subjects.iter().filter(|s| !s.is_estimated()).count();
    if missing > 0 {
        recs.push(Recommendation::new(
            RecommendationKind::Info,
            "Complete Your Estimates".into(),
            format!(
                "You have {missing} subject(s) without exam estimates. \
                 Complete them for accurate GPA prediction."
            ),
        ));
    }

    if current_gpa >= 9.0 {
        recs.push(Recommendation::new(
            RecommendationKind::Success,
            "Excellent Performance!".into(),
            format!("Your current GPA of {current_gpa:.2} is outstanding. Keep up the great work!"),
        ));
    } else if current_gpa >= 7.0 {
        recs.push(Recommendation::new(
            RecommendationKind::Info,
            "Good Standing".into(),
            format!(
                "Your GPA of {current_gpa:.2} is solid. \
                 Focus on high-credit subjects to boost it further."
            ),
        ));
    } else if current_gpa > 0.0 {
        recs.push(Recommendation::new(
            RecommendationKind::Warning,
            "Room for Improvement".into(),
            format!(
                "Current GPA: {current_gpa:.2}. \
                 Prioritize subjects with high credits and review weak areas."
            ),
        ));
    }

    // stable: keeps insertion order within a kind
    recs.sort_by_key(|r| r.kind);
    recs
}
