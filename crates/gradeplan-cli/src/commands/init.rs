//! The `gradeplan init` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::Paths;

pub fn execute(paths: &Paths) -> Result<()> {
    let config_path = paths
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("gradeplan.toml"));
    let roster_path = paths
        .roster
        .clone()
        .unwrap_or_else(|| PathBuf::from("subjects.json"));

    write_if_missing(&config_path, &render_config(&roster_path))?;
    write_if_missing(&roster_path, EXAMPLE_ROSTER)?;

    println!("\nNext steps:");
    println!("  1. Replace the example subjects: gradeplan reset && gradeplan add --name ...");
    println!("  2. Record exam estimates: gradeplan estimate <subject> --exam 70");
    println!("  3. Plan towards a target: gradeplan plan --target 8.5");

    Ok(())
}

/// Sample config pointing at `roster`, quoted as a TOML string.
fn render_config(roster: &Path) -> String {
    let roster = toml::Value::String(roster.to_string_lossy().into_owned());
    SAMPLE_CONFIG.replace("{roster}", &roster.to_string())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradeplan configuration

roster = {roster}

[plan]
target_gpa = 8.0
# Subjects (ids or names) whose exam score is treated as fixed when planning.
locked_subjects = []
"#;

const EXAMPLE_ROSTER: &str = r#"{
  "subjects": [
    {
      "id": "example-maths",
      "name": "Engineering Mathematics",
      "assessmentScore": 42.0,
      "credits": 4,
      "examScore": 68.0
    },
    {
      "id": "example-dsa",
      "name": "Data Structures",
      "assessmentScore": 38.0,
      "credits": 4
    },
    {
      "id": "example-os",
      "name": "Operating Systems",
      "assessmentScore": 31.0,
      "credits": 3
    },
    {
      "id": "example-lab",
      "name": "Systems Lab",
      "assessmentScore": 46.0,
      "credits": 1,
      "examScore": 85.0
    }
  ],
  "version": "1.0"
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    use gradeplan_core::config::parse_config_str;

    #[test]
    fn sample_config_parses() {
        let config = parse_config_str(&render_config(Path::new("subjects.json"))).unwrap();
        assert_eq!(config.roster, PathBuf::from("subjects.json"));
        assert_eq!(config.plan.target_gpa, 8.0);
    }

    #[test]
    fn roster_path_is_escaped() {
        for raw in [r#"my"roster.json"#, r"C:\Users\me\subjects.json", "it's.json"] {
            let config = parse_config_str(&render_config(Path::new(raw))).unwrap();
            assert_eq!(config.roster, PathBuf::from(raw));
        }
    }
}
