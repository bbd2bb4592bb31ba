use std::path::PathBuf;

use anyhow::Context as _;
use rand::{RngCore, SeedableRng as _};
use rand_pcg::Pcg32;
use regimen_forest::regimen::RegimenPlanner;
use tracing::info;

use super::GamesArg;
use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct RecommendArg {
    #[clap(flatten)]
    pub(super) games: GamesArg,
    /// Drill catalog (JSON array)
    #[arg(long)]
    pub(super) drills: PathBuf,
    /// Maximum number of drills per athlete
    #[arg(long)]
    pub(super) max_drills: Option<usize>,
    /// Seed for reproducible recommendations
    #[arg(long)]
    pub(super) seed: Option<u64>,
}

pub(crate) fn run(arg: &RecommendArg) -> anyhow::Result<()> {
    let RecommendArg {
        games,
        drills,
        max_drills,
        seed,
    } = arg;

    let mut config = games.load_config()?;
    if let Some(max_drills) = *max_drills {
        config.max_drills = max_drills;
    }
    let mut planner = RegimenPlanner::new(config).context("Invalid configuration")?;

    let records = games.load_games()?;
    let catalog = util::read_drills_file(drills)?;
    let athletes = games.select_athletes(&records);
    info!(
        athletes = athletes.len(),
        games = records.len(),
        drills = catalog.len(),
        "planning regimens"
    );

    let mut rng: Box<dyn RngCore> = match seed {
        Some(seed) => Box::new(Pcg32::seed_from_u64(*seed)),
        None => Box::new(rand::rng()),
    };
    let regimens = planner.plan_batch(&athletes, &records, &catalog, &mut *rng);

    Output::save_json(&regimens, games.output.as_deref())
}
