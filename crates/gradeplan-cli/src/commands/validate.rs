//! The `gradeplan validate` command.

use anyhow::Result;

use gradeplan_core::roster::validate_roster;

use super::{Paths, Session};

pub fn execute(paths: &Paths) -> Result<()> {
    let session = Session::open(paths)?;
    let roster = &session.roster;

    println!(
        "Roster: {} ({} subjects)",
        session.roster_path.display(),
        roster.subjects.len()
    );

    let warnings = validate_roster(roster);
    for w in &warnings {
        let prefix = w
            .subject_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Roster valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
