use crate::commands::{run_batch, run_score, BatchArgs, ScoreArgs};
use clap::{Parser, Subcommand};
use creativehub_risk::config::AppConfig;
use creativehub_risk::error::AppError;
use creativehub_risk::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "CreativeHub Scorer",
    about = "Score CreativeHub funding applications from the command line",
    version
)]
struct Cli {
    /// Override APP_LOG_LEVEL for this run (RUST_LOG still wins)
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one application or a JSON array of applications
    Score(ScoreArgs),
    /// Score a CSV export and summarize the portfolio
    Batch(BatchArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if let Some(level) = cli.log_level {
        config.telemetry.log_level = level;
    }
    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, "configuration loaded");

    match cli.command {
        Command::Score(args) => run_score(args, &config.intake),
        Command::Batch(args) => run_batch(args, &config.intake),
    }
}
