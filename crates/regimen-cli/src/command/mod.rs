use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use regimen_analysis::{analyzer, baseline::Baseline};
use regimen_core::GameStatRecord;
use regimen_forest::config::RegimenConfig;

use self::{analyze::AnalyzeArg, recommend::RecommendArg};
use crate::{logging, util};

mod analyze;
mod recommend;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Report attention areas for each athlete
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// Recommend a drill regimen for each athlete
    Recommend(#[clap(flatten)] RecommendArg),
}

/// Options shared by every mode that reads game records.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GamesArg {
    /// Game stat records (JSON array)
    #[arg(long)]
    games: PathBuf,
    /// Athletes to process; every athlete in the games file when omitted
    #[arg(long = "athlete", value_name = "ID")]
    athletes: Vec<String>,
    /// Number of most recent games to analyze
    #[arg(long)]
    lookback: Option<usize>,
    /// What the athlete is compared against (reference or history)
    #[arg(long)]
    baseline: Option<Baseline>,
    /// Configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl GamesArg {
    /// Loads the configuration file, if any, and applies command-line overrides.
    fn load_config(&self) -> anyhow::Result<RegimenConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_config_file(path)?,
            None => RegimenConfig::default(),
        };
        if let Some(lookback) = self.lookback {
            config.analyzer.lookback = lookback;
        }
        if let Some(baseline) = self.baseline {
            config.analyzer.baseline = baseline;
        }
        Ok(config)
    }

    fn load_games(&self) -> anyhow::Result<Vec<GameStatRecord>> {
        util::read_games_file(&self.games)
    }

    fn select_athletes(&self, records: &[GameStatRecord]) -> Vec<String> {
        if self.athletes.is_empty() {
            analyzer::athlete_ids(records)
        } else {
            self.athletes.clone()
        }
    }
}

fn validate_config(config: &RegimenConfig) -> anyhow::Result<()> {
    config.validate().context("Invalid configuration")
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init(args.verbose);
    match args.mode {
        Mode::Analyze(arg) => analyze::run(&arg)?,
        Mode::Recommend(arg) => recommend::run(&arg)?,
    }
    Ok(())
}
