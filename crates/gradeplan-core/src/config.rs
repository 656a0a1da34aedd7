//! gradeplan configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::PlanSettings;

/// Top-level gradeplan configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeplanConfig {
    /// Roster file the CLI reads and writes.
    #[serde(default = "default_roster")]
    pub roster: PathBuf,
    /// Default planning target and locked subjects.
    #[serde(default)]
    pub plan: PlanSettings,
}

fn default_roster() -> PathBuf {
    PathBuf::from("subjects.json")
}

impl Default for GradeplanConfig {
    fn default() -> Self {
        Self {
            roster: default_roster(),
            plan: PlanSettings::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when `path` is `None`:
/// 1. `gradeplan.toml` in the current directory
/// 2. `~/.config/gradeplan/config.toml`
///
/// Environment variable overrides: `GRADEPLAN_ROSTER`, `GRADEPLAN_TARGET_GPA`.
pub fn load_config_from(path: Option<&Path>) -> Result<GradeplanConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradeplan.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradeplanConfig::default(),
    };

    if let Ok(roster) = std::env::var("GRADEPLAN_ROSTER") {
        config.roster = PathBuf::from(roster);
    }

    if let Ok(target) = std::env::var("GRADEPLAN_TARGET_GPA") {
        config.plan.target_gpa = target
            .trim()
            .parse()
            .with_context(|| format!("GRADEPLAN_TARGET_GPA is not a number: '{target}'"))?;
    }

    config.roster = PathBuf::from(resolve_env_vars(&config.roster.to_string_lossy()));

    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config_str(content: &str) -> Result<GradeplanConfig> {
    let config: GradeplanConfig = toml::from_str(content)?;
    anyhow::ensure!(
        (0.0..=10.0).contains(&config.plan.target_gpa),
        "plan.target_gpa must be between 0 and 10, got {}",
        config.plan.target_gpa
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradeplan"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_GRADEPLAN_TEST_VAR", "term2");
        assert_eq!(resolve_env_vars("${_GRADEPLAN_TEST_VAR}"), "term2");
        assert_eq!(
            resolve_env_vars("data/${_GRADEPLAN_TEST_VAR}/subjects.json"),
            "data/term2/subjects.json"
        );
        std::env::remove_var("_GRADEPLAN_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_rescan_values() {
        std::env::set_var("_GRADEPLAN_SELF_REF", "a/${_GRADEPLAN_SELF_REF}");
        assert_eq!(
            resolve_env_vars("${_GRADEPLAN_SELF_REF}.json"),
            "a/${_GRADEPLAN_SELF_REF}.json"
        );
        std::env::remove_var("_GRADEPLAN_SELF_REF");
    }

    #[test]
    fn resolve_env_vars_unterminated() {
        assert_eq!(resolve_env_vars("${OPEN"), "${OPEN");
    }

    #[test]
    fn default_config() {
        let config = GradeplanConfig::default();
        assert_eq!(config.roster, PathBuf::from("subjects.json"));
        assert_eq!(config.plan.target_gpa, 8.0);
        assert!(config.plan.locked_subjects.is_empty());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
roster = "semester-3.json"

[plan]
target_gpa = 8.5
locked_subjects = ["maths", "physics"]
"#;
        let config = parse_config_str(toml_str).unwrap();
        assert_eq!(config.roster, PathBuf::from("semester-3.json"));
        assert_eq!(config.plan.target_gpa, 8.5);
        assert_eq!(config.plan.locked_subjects, vec!["maths", "physics"]);
    }

    #[test]
    fn parse_partial_config_uses_defaults() {
        let config = parse_config_str("[plan]\nlocked_subjects = [\"a\"]\n").unwrap();
        assert_eq!(config.roster, PathBuf::from("subjects.json"));
        assert_eq!(config.plan.target_gpa, 8.0);
    }

    #[test]
    fn parse_rejects_out_of_range_target() {
        assert!(parse_config_str("[plan]\ntarget_gpa = 11.0\n").is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradeplan.toml");
        std::fs::write(&path, "roster = \"mine.json\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert!(config.roster.ends_with("mine.json"));
    }
}
