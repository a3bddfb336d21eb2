use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "triage",
    version,
    about = "Offline evaluation harness for symptom-check endpoints"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Record one run: issue one check request per test case
    Run(RunArgs),
    /// Score recorded raw results into per-case and summary files
    Score(ScoreArgs),
    /// Render charts from a summary file
    Visualize(VisualizeArgs),
    /// Write sample config and case files
    Init(InitArgs),
    Version,
}

#[derive(Parser, Clone)]
pub struct RunArgs {
    #[arg(long, default_value = "eval.yaml")]
    pub config: PathBuf,
    #[arg(long, default_value = "test_cases.json")]
    pub cases: PathBuf,
    #[arg(long, default_value = "case_meta.json")]
    pub meta: PathBuf,
    #[arg(long, default_value = ".eval/triage.db")]
    pub db: PathBuf,

    /// raw results CSV path (default: <results-dir>/raw_results_<ts>.csv)
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, default_value = "results")]
    pub results_dir: PathBuf,

    /// subset of case ids to run
    #[arg(long, num_args = 1..)]
    pub only: Vec<String>,

    /// endpoint base URL override
    #[arg(long, env = "TRIAGE_ENDPOINT")]
    pub endpoint: Option<String>,
}

#[derive(Parser, Clone)]
pub struct ScoreArgs {
    /// raw results CSV produced by `triage run`
    #[arg(long)]
    pub input: PathBuf,
    #[arg(long, default_value = "eval.yaml")]
    pub config: PathBuf,
    #[arg(long, default_value = "test_cases.json")]
    pub cases: PathBuf,
    #[arg(long, default_value = "case_meta.json")]
    pub meta: PathBuf,
    #[arg(long, default_value = "results")]
    pub out_dir: PathBuf,
}

#[derive(Parser, Clone)]
pub struct VisualizeArgs {
    /// summary CSV produced by `triage score`
    #[arg(long)]
    pub summary: PathBuf,
    #[arg(long, default_value = "charts")]
    pub out_dir: PathBuf,
}

#[derive(Parser, Clone)]
pub struct InitArgs {
    #[arg(long, default_value = "eval.yaml")]
    pub config: PathBuf,
    #[arg(long, default_value = "test_cases.json")]
    pub cases: PathBuf,
    #[arg(long, default_value = "case_meta.json")]
    pub meta: PathBuf,

    /// generate .gitignore for artifacts/db
    #[arg(long)]
    pub gitignore: bool,
}
