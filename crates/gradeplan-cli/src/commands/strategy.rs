//! The `gradeplan strategy` command.

use anyhow::Result;

use gradeplan_core::strategy::{recommendations, RecommendationKind};

use super::{Paths, Session};

pub fn execute(paths: &Paths) -> Result<()> {
    let session = Session::open(paths)?;
    let recs = recommendations(&session.roster.subjects);

    if recs.is_empty() {
        println!("No recommendations. Add subjects to get started.");
        return Ok(());
    }

    for rec in &recs {
        let tag = match rec.kind {
            RecommendationKind::Success => "[+]",
            RecommendationKind::Info => "[i]",
            RecommendationKind::Warning => "[!]",
        };
        println!("{tag} {}", rec.title);
        println!("    {}", rec.description);
    }

    Ok(())
}
