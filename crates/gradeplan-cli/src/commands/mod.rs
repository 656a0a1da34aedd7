//! Subcommand implementations.

use std::path::PathBuf;

use anyhow::Result;

use gradeplan_core::config::{load_config_from, GradeplanConfig};
use gradeplan_core::roster::Roster;

pub mod edit;
pub mod init;
pub mod plan;
pub mod report;
pub mod status;
pub mod strategy;
pub mod validate;

/// Paths given on the command line.
pub struct Paths {
    pub roster: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Loaded config plus the roster it points at.
pub struct Session {
    pub config: GradeplanConfig,
    pub roster_path: PathBuf,
    pub roster: Roster,
}

impl Session {
    /// Load config and an existing roster file.
    pub fn open(paths: &Paths) -> Result<Self> {
        let (config, roster_path) = resolve(paths)?;
        let roster = Roster::load_json(&roster_path)?;
        Ok(Self {
            config,
            roster_path,
            roster,
        })
    }

    /// Like [`Session::open`], but a missing roster starts out empty.
    pub fn open_or_create(paths: &Paths) -> Result<Self> {
        let (config, roster_path) = resolve(paths)?;
        let roster = Roster::load_or_default(&roster_path)?;
        Ok(Self {
            config,
            roster_path,
            roster,
        })
    }

    pub fn save(&self) -> Result<()> {
        self.roster.save_json(&self.roster_path)?;
        tracing::debug!("saved roster to {}", self.roster_path.display());
        Ok(())
    }

    /// Turn comma-separated ids or names into subject ids.
    pub fn resolve_locks(&self, lock: Option<&str>) -> Result<Vec<String>> {
        let keys: Vec<String> = match lock {
            Some(list) => list
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => self.config.plan.locked_subjects.clone(),
        };

        keys.iter()
            .map(|key| self.roster.resolve_id(key).map_err(anyhow::Error::from))
            .collect()
    }

    /// Pick the target GPA from the flag or the config.
    pub fn target_gpa(&self, target: Option<f64>) -> Result<f64> {
        let target = target.unwrap_or(self.config.plan.target_gpa);
        anyhow::ensure!(
            (0.0..=10.0).contains(&target),
            "target GPA must be between 0 and 10"
        );
        Ok(target)
    }
}

fn resolve(paths: &Paths) -> Result<(GradeplanConfig, PathBuf)> {
    let config = load_config_from(paths.config.as_deref())?;
    let roster_path = paths
        .roster
        .clone()
        .unwrap_or_else(|| config.roster.clone());
    Ok((config, roster_path))
}

/// Format an optional score, `-` when absent.
pub fn fmt_score(score: Option<f64>) -> String {
    score
        .map(|s| format!("{s:.1}"))
        .unwrap_or_else(|| "-".to_string())
}
