//! Qualitative difficulty of a required exam score, and overall plan risk.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::threshold::{Requirement, ThresholdPlan};

/// How hard a required exam score is to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
    Impossible,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Hard => "Hard",
            Difficulty::Impossible => "Impossible",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a required exam score. `None` means no score is enough.
pub fn difficulty(required_score: Option<f64>) -> Difficulty {
    match required_score {
        None => Difficulty::Impossible,
        Some(score) if score <= 30.0 => Difficulty::Easy,
        Some(score) if score <= 60.0 => Difficulty::Moderate,
        Some(_) => Difficulty::Hard,
    }
}

/// Risk of a whole plan, judged over its flexible subjects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskStatus {
    LowRisk,
    ModerateRisk,
    HighRisk,
}

impl RiskStatus {
    /// Any infeasible subject makes the plan high risk; otherwise the
    /// average required score decides.
    pub fn assess(plan: &ThresholdPlan) -> Self {
        let flexible: Vec<&Requirement> = plan
            .requirements
            .values()
            .filter(|r| !r.is_locked())
            .collect();

        if flexible.iter().any(|r| r.is_infeasible()) {
            return RiskStatus::HighRisk;
        }

        let avg_required = flexible
            .iter()
            .map(|r| r.exam_score().unwrap_or(0.0))
            .sum::<f64>()
            / flexible.len().max(1) as f64;

        if avg_required <= 40.0 {
            RiskStatus::LowRisk
        } else if avg_required <= 70.0 {
            RiskStatus::ModerateRisk
        } else {
            RiskStatus::HighRisk
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskStatus::LowRisk => "Low Risk",
            RiskStatus::ModerateRisk => "Moderate Risk",
            RiskStatus::HighRisk => "High Risk",
        }
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn plan(reqs: &[(&str, Requirement)]) -> ThresholdPlan {
        ThresholdPlan {
            target_gpa: 8.0,
            requirements: reqs
                .iter()
                .map(|(id, r)| (id.to_string(), *r))
                .collect::<HashMap<_, _>>(),
            average_required_grade_point: Some(8.0),
        }
    }

    #[test]
    fn difficulty_boundaries() {
        assert_eq!(difficulty(Some(0.0)), Difficulty::Easy);
        assert_eq!(difficulty(Some(30.0)), Difficulty::Easy);
        assert_eq!(difficulty(Some(30.01)), Difficulty::Moderate);
        assert_eq!(difficulty(Some(60.0)), Difficulty::Moderate);
        assert_eq!(difficulty(Some(60.01)), Difficulty::Hard);
        assert_eq!(difficulty(Some(100.0)), Difficulty::Hard);
        assert_eq!(difficulty(None), Difficulty::Impossible);
    }

    #[test]
    fn difficulty_display_and_serde() {
        assert_eq!(Difficulty::Moderate.to_string(), "Moderate");
        assert_eq!(
            serde_json::to_string(&Difficulty::Impossible).unwrap(),
            "\"impossible\""
        );
    }

    #[test]
    fn infeasible_subject_is_high_risk() {
        let p = plan(&[
            ("a", Requirement::Required(5.0)),
            ("b", Requirement::Infeasible),
        ]);
        assert_eq!(RiskStatus::assess(&p), RiskStatus::HighRisk);
    }

    #[test]
    fn risk_follows_average_requirement() {
        let low = plan(&[
            ("a", Requirement::Required(20.0)),
            ("b", Requirement::Required(60.0)),
            ("c", Requirement::Locked(Some(100.0))),
        ]);
        assert_eq!(RiskStatus::assess(&low), RiskStatus::LowRisk);

        let moderate = plan(&[
            ("a", Requirement::Required(50.0)),
            ("b", Requirement::Required(90.0)),
        ]);
        assert_eq!(RiskStatus::assess(&moderate), RiskStatus::ModerateRisk);

        let high = plan(&[("a", Requirement::Required(70.5))]);
        assert_eq!(RiskStatus::assess(&high), RiskStatus::HighRisk);
    }

    #[test]
    fn fully_locked_plan_is_low_risk() {
        let p = plan(&[
            ("a", Requirement::Locked(None)),
            ("b", Requirement::Locked(Some(10.0))),
        ]);
        assert_eq!(RiskStatus::assess(&p), RiskStatus::LowRisk);
        assert_eq!(RiskStatus::LowRisk.to_string(), "Low Risk");
    }
}
