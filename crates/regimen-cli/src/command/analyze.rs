use tracing::info;

use super::GamesArg;
use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeArg {
    #[clap(flatten)]
    pub(super) games: GamesArg,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let AnalyzeArg { games } = arg;
    let config = games.load_config()?;
    super::validate_config(&config)?;
    let records = games.load_games()?;
    let athletes = games.select_athletes(&records);

    let reports = athletes
        .iter()
        .map(|athlete_id| config.analyzer.analyze(athlete_id, &records))
        .collect::<Vec<_>>();
    for report in &reports {
        info!(
            athlete_id = report.athlete_id.as_str(),
            games = report.games_analyzed,
            "Focus: {}",
            report.focus_labels().join(", ")
        );
    }

    Output::save_json(&reports, games.output.as_deref())
}
