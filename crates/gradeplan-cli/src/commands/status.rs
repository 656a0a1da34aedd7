//! The `gradeplan status` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradeplan_core::aggregate::{exam_contribution, final_score, gpa, impact, total_credits};
use gradeplan_core::grading::{grade_letter, grade_point};

use super::{fmt_score, Paths, Session};

pub fn execute(paths: &Paths) -> Result<()> {
    let session = Session::open(paths)?;
    let subjects = &session.roster.subjects;

    if subjects.is_empty() {
        println!("No subjects yet. Add one with `gradeplan add`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Subject", "IA", "Exam", "Exam→50", "Total", "GP", "Grade", "Credits", "Impact",
    ]);

    for subject in subjects {
        let total = subject
            .exam_score
            .map(|e| final_score(subject.assessment_score, e));
        let gp = total.map(grade_point);
        table.add_row(vec![
            Cell::new(&subject.name),
            Cell::new(format!("{:.1}", subject.assessment_score)),
            Cell::new(fmt_score(subject.exam_score)),
            Cell::new(fmt_score(subject.exam_score.map(exam_contribution))),
            Cell::new(fmt_score(total)),
            Cell::new(gp.map(|g| g.to_string()).unwrap_or_else(|| "-".into())),
            Cell::new(gp.map(|g| grade_letter(g).to_string()).unwrap_or_else(|| "-".into())),
            Cell::new(subject.credits),
            Cell::new(format!("{:.1}%", impact(subject, subjects))),
        ]);
    }

    println!("{table}");

    let estimated = subjects.iter().filter(|s| s.is_estimated()).count();
    println!(
        "\nCurrent GPA: {:.2} ({estimated} of {} subject(s) estimated, {} total credits)",
        gpa(subjects),
        subjects.len(),
        total_credits(subjects)
    );

    Ok(())
}
