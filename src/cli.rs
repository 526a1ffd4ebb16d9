use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "papercheck", version, about = "Heuristic document trustworthiness review")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "TOML file overriding weights, thresholds, and uncertainty"
    )]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full review pipeline and print the verdict summary.
    Review {
        input: PathBuf,
        #[arg(long, help = "Display name for the paper (defaults to the file stem)")]
        name: Option<String>,
        #[arg(long, help = "Write a markdown report into this directory")]
        report_dir: Option<PathBuf>,
    },
    /// Run a single analyzer and print its full record.
    Analyze {
        #[arg(value_enum)]
        analyzer: AnalyzerKind,
        input: PathBuf,
    },
    /// Run the full pipeline and print the reasoning trace.
    Trace {
        input: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerKind {
    Bias,
    Statistics,
    Methodology,
    Citations,
    Plagiarism,
    Fraud,
    Ethics,
    Replication,
}
