//! The `gradeplan` command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "gradeplan",
    version,
    about = "GPA calculator and exam threshold planner"
)]
struct Cli {
    /// Roster JSON file (overrides the config)
    #[arg(long, global = true)]
    roster: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and example roster
    Init,

    /// Add a subject to the roster
    Add {
        /// Subject name
        #[arg(long)]
        name: String,

        /// Internal assessment score (0-50)
        #[arg(long)]
        assessment: f64,

        /// Credit weight
        #[arg(long, default_value = "3")]
        credits: u32,

        /// Estimated exam score (0-100)
        #[arg(long)]
        exam: Option<f64>,
    },

    /// Set or clear a subject's estimated exam score
    Estimate {
        /// Subject id or name
        subject: String,

        /// Estimated exam score (0-100)
        #[arg(long, required_unless_present = "clear", conflicts_with = "clear")]
        exam: Option<f64>,

        /// Remove the estimate
        #[arg(long)]
        clear: bool,
    },

    /// Remove a subject from the roster
    Remove {
        /// Subject id or name
        subject: String,
    },

    /// Show grades and the current GPA
    Status,

    /// Solve for the exam scores needed to reach a target GPA
    Plan {
        /// Target GPA (defaults to the config value)
        #[arg(long)]
        target: Option<f64>,

        /// Locked subjects, comma-separated ids or names
        #[arg(long)]
        lock: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Suggest where to focus study effort
    Strategy,

    /// Produce a report of grades and, optionally, required exam scores
    Report {
        /// Include required exam scores for the target GPA
        #[arg(long)]
        predictions: bool,

        /// Target GPA (defaults to the config value)
        #[arg(long)]
        target: Option<f64>,

        /// Output format: text, markdown, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Check a roster file for invalid subjects
    Validate,

    /// Remove every subject from the roster
    Reset,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradeplan=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = commands::Paths {
        roster: cli.roster,
        config: cli.config,
    };

    let result = match cli.command {
        Commands::Init => commands::init::execute(&paths),
        Commands::Add {
            name,
            assessment,
            credits,
            exam,
        } => commands::edit::add(&paths, name, assessment, credits, exam),
        Commands::Estimate {
            subject,
            exam,
            clear,
        } => commands::edit::estimate(&paths, &subject, if clear { None } else { exam }),
        Commands::Remove { subject } => commands::edit::remove(&paths, &subject),
        Commands::Status => commands::status::execute(&paths),
        Commands::Plan {
            target,
            lock,
            format,
        } => commands::plan::execute(&paths, target, lock, format),
        Commands::Strategy => commands::strategy::execute(&paths),
        Commands::Report {
            predictions,
            target,
            format,
            output,
        } => commands::report::execute(&paths, predictions, target, format, output),
        Commands::Validate => commands::validate::execute(&paths),
        Commands::Reset => commands::edit::reset(&paths),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
