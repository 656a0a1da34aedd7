//! The `gradeplan report` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use gradeplan_core::report::{PlanReport, ReportOptions};
use gradeplan_core::threshold::Requirement;

use super::{fmt_score, Paths, Session};

pub fn execute(
    paths: &Paths,
    predictions: bool,
    target: Option<f64>,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let session = Session::open(paths)?;
    let subjects = &session.roster.subjects;

    let options = if predictions {
        ReportOptions::predictions(subjects, session.target_gpa(target)?)
    } else {
        ReportOptions::current_only()
    };
    let report = PlanReport::build(subjects, &options);

    let rendered = match format.as_str() {
        "markdown" | "md" => report.to_markdown(),
        "json" => {
            if let Some(path) = &output {
                report.save_json(path)?;
                eprintln!("Report saved to: {}", path.display());
                return Ok(());
            }
            serde_json::to_string_pretty(&report)?
        }
        _ => render_text(&report),
    };

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            eprintln!("Report saved to: {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

fn render_text(report: &PlanReport) -> String {
    let mut table = Table::new();
    let mut header = vec!["Subject", "IA", "Exam", "Total", "Grade", "Credits"];
    if report.include_predictions {
        header.extend(["Required exam", "Difficulty", "Predicted"]);
    }
    table.set_header(header);

    for row in &report.rows {
        let mut cells = vec![
            Cell::new(&row.name),
            Cell::new(format!("{:.1}", row.assessment_score)),
            Cell::new(fmt_score(row.exam_score)),
            Cell::new(fmt_score(row.final_score)),
            Cell::new(row.grade.map(|g| g.to_string()).unwrap_or_else(|| "-".into())),
            Cell::new(row.credits),
        ];
        if report.include_predictions {
            let required = match row.requirement {
                Some(Requirement::Locked(_)) => "(locked)".to_string(),
                Some(Requirement::Required(score)) => format!("{score:.0}"),
                Some(Requirement::Infeasible) | None => "N/A".to_string(),
            };
            cells.push(Cell::new(required));
            cells.push(Cell::new(
                row.difficulty
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".into()),
            ));
            cells.push(Cell::new(
                row.predicted_grade
                    .map(|g| g.to_string())
                    .unwrap_or_else(|| "-".into()),
            ));
        }
        table.add_row(cells);
    }

    let mut out = format!("{table}\n\nCurrent GPA: {:.2}", report.current_gpa);
    if let (Some(target), Some(predicted)) = (report.target_gpa, report.predicted_gpa) {
        out.push_str(&format!("\nTarget GPA: {target:.2}"));
        out.push_str(&format!("\nPredicted GPA: {predicted:.2}"));
    }
    out
}
