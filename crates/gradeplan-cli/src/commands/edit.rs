//! Roster editing commands: `add`, `estimate`, `remove`, `reset`.

use anyhow::Result;

use gradeplan_core::roster::SubjectDraft;

use super::{fmt_score, Paths, Session};

pub fn add(
    paths: &Paths,
    name: String,
    assessment_score: f64,
    credits: u32,
    exam_score: Option<f64>,
) -> Result<()> {
    let mut session = Session::open_or_create(paths)?;

    let subject = session.roster.add_subject(SubjectDraft {
        name,
        assessment_score,
        credits,
        exam_score,
    })?;
    println!(
        "Added {} [{}]: IA {:.1}, exam {}, {} credit(s)",
        subject.name,
        subject.id,
        subject.assessment_score,
        fmt_score(subject.exam_score),
        subject.credits
    );

    session.save()
}

pub fn estimate(paths: &Paths, key: &str, exam_score: Option<f64>) -> Result<()> {
    let mut session = Session::open(paths)?;

    let id = session.roster.resolve_id(key)?;
    let subject = session.roster.set_exam_score(&id, exam_score)?;
    match subject.exam_score {
        Some(score) => println!("{}: exam estimate set to {score:.1}", subject.name),
        None => println!("{}: exam estimate cleared", subject.name),
    }

    session.save()
}

pub fn remove(paths: &Paths, key: &str) -> Result<()> {
    let mut session = Session::open(paths)?;

    let id = session.roster.resolve_id(key)?;
    let removed = session.roster.remove_subject(&id)?;
    println!("Removed {}", removed.name);

    session.save()
}

pub fn reset(paths: &Paths) -> Result<()> {
    let mut session = Session::open_or_create(paths)?;

    let count = session.roster.subjects.len();
    session.roster.reset();
    println!("Removed {count} subject(s)");

    session.save()
}
