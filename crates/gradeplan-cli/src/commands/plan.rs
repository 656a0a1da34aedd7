//! The `gradeplan plan` command.

use anyhow::Result;
use comfy_table::{Cell, Table};
use serde_json::json;

use gradeplan_core::aggregate::predicted_gpa;
use gradeplan_core::difficulty::{difficulty, RiskStatus};
use gradeplan_core::threshold::{required_exam_scores_for_target, Requirement};

use super::{fmt_score, Paths, Session};

pub fn execute(
    paths: &Paths,
    target: Option<f64>,
    lock: Option<String>,
    format: String,
) -> Result<()> {
    let session = Session::open(paths)?;
    let target_gpa = session.target_gpa(target)?;
    let locked = session.resolve_locks(lock.as_deref())?;
    let subjects = &session.roster.subjects;

    anyhow::ensure!(!subjects.is_empty(), "the roster has no subjects to plan");

    let plan = required_exam_scores_for_target(subjects, target_gpa, &locked);
    let predicted = predicted_gpa(subjects, &plan.exam_scores());
    let risk = RiskStatus::assess(&plan);

    tracing::debug!(
        "planned {} subject(s) for target {target_gpa}, {} locked",
        subjects.len(),
        locked.len()
    );

    match format.as_str() {
        "json" => {
            let out = json!({
                "plan": plan,
                "predicted_gpa": predicted,
                "risk": risk,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        _ => {
            // text format
            let mut table = Table::new();
            table.set_header(vec!["Subject", "IA", "Credits", "Required exam", "Difficulty"]);

            for subject in subjects {
                let (required, level) = match plan.get(&subject.id) {
                    Some(Requirement::Locked(score)) => {
                        (format!("{} (locked)", fmt_score(*score)), "-".to_string())
                    }
                    Some(Requirement::Required(score)) => (
                        format!("{score:.0}"),
                        difficulty(Some(*score)).to_string(),
                    ),
                    Some(Requirement::Infeasible) | None => {
                        ("N/A".to_string(), difficulty(None).to_string())
                    }
                };
                table.add_row(vec![
                    Cell::new(&subject.name),
                    Cell::new(format!("{:.1}", subject.assessment_score)),
                    Cell::new(subject.credits),
                    Cell::new(required),
                    Cell::new(level),
                ]);
            }

            println!("{table}");
            println!("\nTarget GPA: {target_gpa:.2}");
            match plan.average_required_grade_point {
                Some(avg) => println!("Average grade point needed: {avg:.2}"),
                None => println!("Every subject is locked; nothing to distribute."),
            }
            println!("Predicted GPA: {predicted:.2}");
            println!("Risk: {risk}");
        }
    }

    Ok(())
}
