use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use fingering_core::Difficulty;

use crate::format::OutputFormat;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "fingering <command> [options]",
    long_about = "Piano fingering planner: pattern recognition and per-hand fingering assignment."
)]
pub struct Cli {
    /// Output format for the selected command.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Run the full pipeline and report per-note fingerings")]
    Plan(PlanArgs),
    #[command(about = "Run only the pattern recognizer and report segments")]
    Segments(SegmentsArgs),
}

#[derive(Args)]
pub struct PlanArgs {
    /// Path to a JSON file holding an array of notes.
    #[arg(long, value_name = "PATH")]
    pub notes: PathBuf,

    /// Difficulty profile to plan for.
    #[arg(long, value_enum, default_value_t = DifficultyArg::Intermediate)]
    pub difficulty: DifficultyArg,
}

#[derive(Args)]
pub struct SegmentsArgs {
    /// Path to a JSON file holding an array of notes.
    #[arg(long, value_name = "PATH")]
    pub notes: PathBuf,

    /// Restrict the report to one hand, or show both.
    #[arg(long, value_enum, default_value_t = HandFilter::Both)]
    pub hand: HandFilter,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum DifficultyArg {
    Beginner,
    Intermediate,
    Advanced,
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Beginner => Difficulty::Beginner,
            DifficultyArg::Intermediate => Difficulty::Intermediate,
            DifficultyArg::Advanced => Difficulty::Advanced,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum HandFilter {
    Rh,
    Lh,
    Both,
}
