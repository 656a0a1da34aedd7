//! Final-score aggregation, credit-weighted GPA, and subject impact.
//!
//! A subject's total is its assessment score plus the exam score rescaled
//! onto the same 0–50 range. Only subjects with an exam score take part in
//! the GPA; the others neither add grade points nor dilute the credits.

use std::collections::HashMap;

use crate::grading::grade_point;
use crate::model::Subject;

/// Rescale a 0–100 exam score onto the 0–50 assessment scale.
pub fn exam_contribution(exam_score: f64) -> f64 {
    (exam_score / 100.0) * 50.0
}

/// Total marks out of 100.
pub fn final_score(assessment_score: f64, exam_score: f64) -> f64 {
    assessment_score + exam_contribution(exam_score)
}

/// Grade point a subject earns with the given exam score.
pub fn subject_grade_point(subject: &Subject, exam_score: f64) -> u8 {
    grade_point(final_score(subject.assessment_score, exam_score))
}

/// Credit-weighted GPA over the subjects that have an exam score.
///
/// Returns 0 when no subject has been estimated yet.
pub fn gpa(subjects: &[Subject]) -> f64 {
    weighted_gpa(subjects.iter().filter_map(|s| s.exam_score.map(|e| (s, e))))
}

/// GPA using externally supplied exam scores instead of the recorded ones.
///
/// Subjects missing from `predicted`, or mapped to `None`, are left out
/// exactly like unestimated subjects in [`gpa`].
pub fn predicted_gpa(subjects: &[Subject], predicted: &HashMap<String, Option<f64>>) -> f64 {
    if subjects.is_empty() {
        return 0.0;
    }

    weighted_gpa(
        subjects
            .iter()
            .filter_map(|s| predicted.get(&s.id).copied().flatten().map(|e| (s, e))),
    )
}

fn weighted_gpa<'a>(scored: impl Iterator<Item = (&'a Subject, f64)>) -> f64 {
    let mut total_credits = 0u64;
    let mut total_grade_points = 0u64;

    for (subject, exam_score) in scored {
        let gp = subject_grade_point(subject, exam_score) as u64;
        total_credits += subject.credits as u64;
        total_grade_points += gp * subject.credits as u64;
    }

    if total_credits == 0 {
        0.0
    } else {
        total_grade_points as f64 / total_credits as f64
    }
}

/// Sum of credits over every subject, estimated or not.
pub fn total_credits(subjects: &[Subject]) -> u64 {
    subjects.iter().map(|s| s.credits as u64).sum()
}

/// A subject's share of the total credit load, as a percentage.
pub fn impact(subject: &Subject, all_subjects: &[Subject]) -> f64 {
    let total = total_credits(all_subjects);
    if total == 0 {
        return 0.0;
    }
    subject.credits as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(id: &str, assessment: f64, credits: u32, exam: Option<f64>) -> Subject {
        Subject {
            id: id.into(),
            name: id.to_uppercase(),
            assessment_score: assessment,
            credits,
            exam_score: exam,
        }
    }

    #[test]
    fn contribution_and_final_score() {
        assert_eq!(exam_contribution(0.0), 0.0);
        assert_eq!(exam_contribution(100.0), 50.0);
        assert_eq!(exam_contribution(70.0), 35.0);

        for a in [0.0, 12.5, 33.0, 50.0] {
            for e in [0.0, 1.0, 49.5, 77.0, 100.0] {
                assert_eq!(final_score(a, e), a + (e / 100.0) * 50.0);
            }
        }
    }

    #[test]
    fn gpa_of_nothing_is_zero() {
        assert_eq!(gpa(&[]), 0.0);

        let unestimated = vec![subject("a", 45.0, 4, None), subject("b", 30.0, 3, None)];
        assert_eq!(gpa(&unestimated), 0.0);
    }

    #[test]
    fn gpa_is_credit_weighted() {
        // 30 + 40 = 70 -> 8; 20 + 30 = 50 -> 6
        let subjects = vec![
            subject("a", 30.0, 3, Some(80.0)),
            subject("b", 20.0, 1, Some(60.0)),
        ];
        assert_eq!(gpa(&subjects), 7.5);
    }

    #[test]
    fn unestimated_credits_do_not_dilute() {
        let subjects = vec![
            subject("a", 45.0, 3, Some(90.0)),
            subject("b", 10.0, 5, None),
        ];
        assert_eq!(gpa(&subjects), 10.0);
    }

    #[test]
    fn zero_exam_score_still_counts() {
        let subjects = vec![
            subject("a", 45.0, 2, Some(100.0)),
            subject("b", 10.0, 2, Some(0.0)),
        ];
        assert_eq!(gpa(&subjects), 5.0);
    }

    #[test]
    fn gpa_is_idempotent() {
        let subjects = vec![
            subject("a", 37.0, 4, Some(66.0)),
            subject("b", 21.0, 3, Some(48.0)),
            subject("c", 44.0, 1, None),
        ];
        assert_eq!(gpa(&subjects), gpa(&subjects));
    }

    #[test]
    fn predicted_gpa_reads_the_mapping() {
        let subjects = vec![
            subject("a", 30.0, 3, None),
            subject("b", 20.0, 1, Some(100.0)),
            subject("c", 10.0, 2, None),
        ];
        let predicted = HashMap::from([
            ("a".to_string(), Some(80.0)),
            ("b".to_string(), Some(60.0)),
            ("c".to_string(), None),
        ]);
        // the recorded 100 for "b" is ignored in favour of the mapped 60
        assert_eq!(predicted_gpa(&subjects, &predicted), 7.5);
    }

    #[test]
    fn predicted_gpa_empty_cases() {
        assert_eq!(predicted_gpa(&[], &HashMap::new()), 0.0);

        let subjects = vec![subject("a", 30.0, 3, Some(80.0))];
        assert_eq!(predicted_gpa(&subjects, &HashMap::new()), 0.0);
    }

    #[test]
    fn impact_is_credit_share() {
        let subjects = vec![
            subject("a", 30.0, 3, None),
            subject("b", 20.0, 1, None),
        ];
        assert_eq!(impact(&subjects[0], &subjects), 75.0);
        assert_eq!(impact(&subjects[1], &subjects), 25.0);
    }

    #[test]
    fn impact_with_no_credits_is_zero() {
        let lone = subject("a", 30.0, 0, None);
        assert_eq!(impact(&lone, &[]), 0.0);
        assert_eq!(impact(&lone, std::slice::from_ref(&lone)), 0.0);
    }
}
