//! Threshold solver: the exam scores needed to reach a target GPA.
//!
//! Locked subjects keep their current exam score. The grade points still
//! missing after them are split evenly over the credits of the flexible
//! subjects, so every flexible subject is asked for the same average grade
//! point. Each subject's own assessment score then decides whether that is
//! cheap, expensive, or out of reach.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::aggregate::{exam_contribution, subject_grade_point, total_credits};
use crate::model::{Subject, MAX_EXAM_SCORE};

/// Grade points with their minimum totals, best first.
const BREAKPOINTS: [(u8, f64); 6] = [
    (10, 90.0),
    (9, 80.0),
    (8, 70.0),
    (7, 60.0),
    (6, 50.0),
    (5, 40.0),
];

/// Slack allowed when comparing an averaged target against a breakpoint.
const GRADE_POINT_EPSILON: f64 = 1e-9;

/// Minimum total marks needed to earn at least `target_grade_point`.
///
/// Fractional targets round up to the next grade point that exists, so 6.5
/// needs the grade-7 total. Targets above 10 are capped at the top band.
pub fn min_total_for_grade_point(target_grade_point: f64) -> f64 {
    if target_grade_point <= GRADE_POINT_EPSILON {
        return 0.0;
    }

    BREAKPOINTS
        .iter()
        .rev()
        .find(|(gp, _)| target_grade_point <= *gp as f64 + GRADE_POINT_EPSILON)
        .map(|&(_, total)| total)
        .unwrap_or(BREAKPOINTS[0].1)
}

/// Exam score (0–100) needed for `target_grade_point`.
///
/// Returns `Some(0.0)` when the assessment score already clears the bar and
/// `None` when even a perfect exam cannot.
pub fn required_exam_score(assessment_score: f64, target_grade_point: f64) -> Option<f64> {
    let needed_contribution = min_total_for_grade_point(target_grade_point) - assessment_score;

    if needed_contribution < 0.0 {
        return Some(0.0);
    }
    if needed_contribution > exam_contribution(MAX_EXAM_SCORE) {
        return None;
    }

    let required = needed_contribution / exam_contribution(MAX_EXAM_SCORE) * MAX_EXAM_SCORE;
    Some(required.clamp(0.0, MAX_EXAM_SCORE))
}

/// Outcome of planning for one subject.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "exam_score", rename_all = "snake_case")]
pub enum Requirement {
    /// The subject was locked; carries the exam score it was held at.
    Locked(Option<f64>),
    /// The subject must score this much in the exam.
    Required(f64),
    /// No exam score reaches the required grade point.
    Infeasible,
}

impl Requirement {
    /// The exam score this outcome stands for, if any.
    pub fn exam_score(&self) -> Option<f64> {
        match self {
            Requirement::Locked(score) => *score,
            Requirement::Required(score) => Some(*score),
            Requirement::Infeasible => None,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Requirement::Locked(_))
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, Requirement::Infeasible)
    }
}

impl From<Option<f64>> for Requirement {
    fn from(score: Option<f64>) -> Self {
        match score {
            Some(score) => Requirement::Required(score),
            None => Requirement::Infeasible,
        }
    }
}

/// Result of [`required_exam_scores_for_target`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPlan {
    /// GPA the plan aims for.
    pub target_gpa: f64,
    /// Outcome per subject id.
    pub requirements: HashMap<String, Requirement>,
    /// Grade point every flexible subject has to hit; `None` when every
    /// subject was locked and nothing was distributed.
    pub average_required_grade_point: Option<f64>,
}

impl ThresholdPlan {
    pub fn get(&self, subject_id: &str) -> Option<&Requirement> {
        self.requirements.get(subject_id)
    }

    /// Flatten to the id -> exam score view that
    /// [`predicted_gpa`](crate::aggregate::predicted_gpa) consumes.
    pub fn exam_scores(&self) -> HashMap<String, Option<f64>> {
        self.requirements
            .iter()
            .map(|(id, req)| (id.clone(), req.exam_score()))
            .collect()
    }
}

/// Solve for the exam score each flexible subject needs to reach `target_gpa`.
pub fn required_exam_scores_for_target(
    subjects: &[Subject],
    target_gpa: f64,
    locked_ids: &[String],
) -> ThresholdPlan {
    let locked: HashSet<&str> = locked_ids.iter().map(String::as_str).collect();
    let (locked_subjects, flexible_subjects): (Vec<&Subject>, Vec<&Subject>) = subjects
        .iter()
        .partition(|s| locked.contains(s.id.as_str()));

    let mut requirements = HashMap::with_capacity(subjects.len());

    if flexible_subjects.is_empty() {
        tracing::debug!("all {} subjects locked, nothing to distribute", subjects.len());
        for subject in subjects {
            requirements.insert(subject.id.clone(), Requirement::Locked(subject.exam_score));
        }
        return ThresholdPlan {
            target_gpa,
            requirements,
            average_required_grade_point: None,
        };
    }

    let mut locked_grade_points = 0.0;
    let mut locked_credits = 0u64;
    for subject in &locked_subjects {
        let exam_score = subject.exam_score.unwrap_or(0.0);
        let gp = subject_grade_point(subject, exam_score);
        locked_grade_points += gp as f64 * subject.credits as f64;
        locked_credits += subject.credits as u64;
        requirements.insert(subject.id.clone(), Requirement::Locked(Some(exam_score)));
    }

    let total_credits = total_credits(subjects);
    let required_flexible_grade_points = target_gpa * total_credits as f64 - locked_grade_points;
    let flexible_credits = total_credits - locked_credits;
    let average_required_grade_point = if flexible_credits > 0 {
        required_flexible_grade_points / flexible_credits as f64
    } else {
        0.0
    };

    tracing::debug!(
        target_gpa,
        locked_grade_points,
        flexible_credits,
        average_required_grade_point,
        "distributing required grade points"
    );

    for subject in &flexible_subjects {
        let required =
            required_exam_score(subject.assessment_score, average_required_grade_point);
        requirements.insert(subject.id.clone(), Requirement::from(required));
    }

    ThresholdPlan {
        target_gpa,
        requirements,
        average_required_grade_point: Some(average_required_grade_point),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::predicted_gpa;

    fn subject(id: &str, assessment: f64, credits: u32, exam: Option<f64>) -> Subject {
        Subject {
            id: id.into(),
            name: id.into(),
            assessment_score: assessment,
            credits,
            exam_score: exam,
        }
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn min_total_rounds_target_up() {
        assert_eq!(min_total_for_grade_point(10.0), 90.0);
        assert_eq!(min_total_for_grade_point(12.0), 90.0);
        assert_eq!(min_total_for_grade_point(9.0), 80.0);
        assert_eq!(min_total_for_grade_point(8.0), 70.0);
        assert_eq!(min_total_for_grade_point(6.5), 60.0);
        assert_eq!(min_total_for_grade_point(6.0), 50.0);
        assert_eq!(min_total_for_grade_point(5.0), 40.0);
        assert_eq!(min_total_for_grade_point(3.0), 40.0);
        assert_eq!(min_total_for_grade_point(0.0), 0.0);
        assert_eq!(min_total_for_grade_point(-4.0), 0.0);
    }

    #[test]
    fn min_total_ignores_float_noise() {
        assert_eq!(min_total_for_grade_point(7.000_000_000_000_1), 60.0);
        assert_eq!(min_total_for_grade_point(7.01), 70.0);
    }

    #[test]
    fn exactly_feasible_target() {
        // needs 70 total, 50 from the exam
        assert_eq!(required_exam_score(20.0, 8.0), Some(100.0));
    }

    #[test]
    fn infeasible_target() {
        // needs 90 total, 80 from the exam
        assert_eq!(required_exam_score(10.0, 10.0), None);
    }

    #[test]
    fn assessment_alone_clears_the_bar() {
        assert_eq!(required_exam_score(45.0, 5.0), Some(0.0));
        assert_eq!(required_exam_score(45.0, 8.0), Some(50.0));
        assert_eq!(required_exam_score(30.0, 0.0), Some(0.0));
    }

    #[test]
    fn required_score_is_rescaled() {
        assert_eq!(required_exam_score(30.0, 5.0), Some(20.0));
        assert_eq!(required_exam_score(35.0, 7.0), Some(50.0));
        // exact bar: nothing more needed
        assert_eq!(required_exam_score(40.0, 5.0), Some(0.0));
    }

    #[test]
    fn locked_and_flexible_distribution() {
        // A: 40 + 40 = 80 -> gp 9
        let subjects = vec![
            subject("a", 40.0, 3, Some(80.0)),
            subject("b", 30.0, 1, None),
        ];
        let plan = required_exam_scores_for_target(&subjects, 8.0, &ids(&["a"]));

        assert_eq!(plan.average_required_grade_point, Some(5.0));
        assert_eq!(plan.get("a"), Some(&Requirement::Locked(Some(80.0))));
        assert_eq!(plan.get("b"), Some(&Requirement::Required(20.0)));
    }

    #[test]
    fn flexible_subjects_share_the_same_average() {
        let subjects = vec![
            subject("strong", 45.0, 2, None),
            subject("middling", 30.0, 2, None),
            subject("weak", 10.0, 2, None),
        ];
        let plan = required_exam_scores_for_target(&subjects, 9.0, &[]);

        assert_eq!(plan.average_required_grade_point, Some(9.0));
        // 80 total needed from each
        assert_eq!(plan.get("strong"), Some(&Requirement::Required(70.0)));
        assert_eq!(plan.get("middling"), Some(&Requirement::Required(100.0)));
        assert_eq!(plan.get("weak"), Some(&Requirement::Infeasible));
    }

    #[test]
    fn unestimated_locked_subject_counts_as_zero() {
        // locked with no exam: 40 + 0 -> gp 5, recorded as 0
        let subjects = vec![
            subject("a", 40.0, 2, None),
            subject("b", 30.0, 2, None),
        ];
        let plan = required_exam_scores_for_target(&subjects, 6.0, &ids(&["a"]));

        assert_eq!(plan.get("a"), Some(&Requirement::Locked(Some(0.0))));
        assert_eq!(plan.average_required_grade_point, Some(7.0));
        assert_eq!(plan.get("b"), Some(&Requirement::Required(60.0)));
    }

    #[test]
    fn all_locked_returns_current_scores() {
        let subjects = vec![
            subject("a", 40.0, 3, Some(72.0)),
            subject("b", 30.0, 1, None),
        ];
        let plan = required_exam_scores_for_target(&subjects, 9.5, &ids(&["a", "b"]));

        assert_eq!(plan.average_required_grade_point, None);
        assert_eq!(plan.get("a"), Some(&Requirement::Locked(Some(72.0))));
        assert_eq!(plan.get("b"), Some(&Requirement::Locked(None)));
        assert!(plan
            .exam_scores()
            .values()
            .all(|v| v.map_or(true, f64::is_finite)));
    }

    #[test]
    fn empty_subject_list() {
        let plan = required_exam_scores_for_target(&[], 8.0, &[]);
        assert!(plan.requirements.is_empty());
        assert_eq!(plan.average_required_grade_point, None);
    }

    #[test]
    fn zero_credit_flexible_subjects_do_not_divide_by_zero() {
        let subjects = vec![
            subject("a", 40.0, 3, Some(80.0)),
            subject("b", 30.0, 0, None),
        ];
        let plan = required_exam_scores_for_target(&subjects, 8.0, &ids(&["a"]));

        assert_eq!(plan.average_required_grade_point, Some(0.0));
        assert_eq!(plan.get("b"), Some(&Requirement::Required(0.0)));
    }

    #[test]
    fn unknown_locked_ids_are_ignored() {
        let subjects = vec![subject("a", 30.0, 4, None)];
        let plan = required_exam_scores_for_target(&subjects, 8.0, &ids(&["ghost"]));
        assert_eq!(plan.get("a"), Some(&Requirement::Required(80.0)));
        assert!(plan.get("ghost").is_none());
    }

    #[test]
    fn plan_feeds_predicted_gpa() {
        let subjects = vec![
            subject("a", 40.0, 3, Some(80.0)),
            subject("b", 30.0, 1, None),
        ];
        let plan = required_exam_scores_for_target(&subjects, 8.0, &ids(&["a"]));
        // a: gp 9 x 3, b: 30 + 10 = 40 -> gp 5 x 1
        assert_eq!(predicted_gpa(&subjects, &plan.exam_scores()), 8.0);
    }

    #[test]
    fn requirement_views() {
        assert_eq!(Requirement::Locked(None).exam_score(), None);
        assert_eq!(Requirement::Required(42.0).exam_score(), Some(42.0));
        assert_eq!(Requirement::Infeasible.exam_score(), None);
        assert!(Requirement::Locked(Some(1.0)).is_locked());
        assert!(Requirement::Infeasible.is_infeasible());
        assert_eq!(Requirement::from(None), Requirement::Infeasible);
    }
}
