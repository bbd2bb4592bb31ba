//! Planning per-athlete drill regimens.

use rand::Rng;
use regimen_analysis::{analyzer::PerformanceReport, attention::AttentionArea};
use regimen_core::{Drill, DrillId, GameStatRecord, StatKey};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    cache::ForestCache,
    config::{InvalidConfigError, RegimenConfig},
    predict,
};

/// A recommended set of drills for one athlete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Regimen {
    pub athlete_id: String,
    /// Human labels of the attention areas, most deficient first.
    pub focus: Vec<String>,
    pub attention_areas: Vec<AttentionArea>,
    /// Recommended drills, most relevant first, at most `max_drills` long.
    pub drill_ids: Vec<DrillId>,
}

/// Runs analysis and drill recommendation for one or many athletes.
///
/// The planner owns a [`ForestCache`], so consecutive plans against the same
/// catalog train a single forest.
#[derive(Debug, Clone)]
pub struct RegimenPlanner {
    config: RegimenConfig,
    cache: ForestCache,
}

impl RegimenPlanner {
    pub fn new(config: RegimenConfig) -> Result<Self, InvalidConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            cache: ForestCache::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &RegimenConfig {
        &self.config
    }

    #[must_use]
    pub fn cache(&self) -> &ForestCache {
        &self.cache
    }

    /// Analyzes one athlete without recommending drills.
    #[must_use]
    pub fn analyze(&self, athlete_id: &str, records: &[GameStatRecord]) -> PerformanceReport {
        self.config.analyzer.analyze(athlete_id, records)
    }

    /// Builds the regimen for `athlete_id`.
    ///
    /// An athlete with no attention areas gets an empty drill list and no
    /// forest is trained for them.
    pub fn plan<R>(
        &mut self,
        athlete_id: &str,
        records: &[GameStatRecord],
        drills: &[Drill],
        rng: &mut R,
    ) -> Regimen
    where
        R: Rng + ?Sized,
    {
        let report = self.analyze(athlete_id, records);
        let performance_map = report.performance_map();

        let drill_ids = if performance_map.is_empty() {
            debug!(athlete_id, "no attention areas, skipping recommendation");
            vec![]
        } else {
            let forest = self
                .cache
                .get_or_build(drills, &StatKey::ALL, &self.config.forest, rng);
            let mut ids = predict::predict_forest_weighted(forest, &performance_map, drills);
            ids.truncate(self.config.max_drills);
            ids
        };

        let focus = report
            .focus_labels()
            .into_iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();
        info!(
            athlete_id,
            games = report.games_analyzed,
            focus = ?focus,
            drills = ?drill_ids.iter().map(|id| id.0).collect::<Vec<_>>(),
            "planned regimen"
        );

        Regimen {
            athlete_id: report.athlete_id,
            focus,
            attention_areas: report.attention_areas,
            drill_ids,
        }
    }

    /// Plans every athlete in `athlete_ids`, in order.
    pub fn plan_batch<I, R>(
        &mut self,
        athlete_ids: I,
        records: &[GameStatRecord],
        drills: &[Drill],
        rng: &mut R,
    ) -> Vec<Regimen>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        R: Rng + ?Sized,
    {
        athlete_ids
            .into_iter()
            .map(|athlete_id| self.plan(athlete_id.as_ref(), records, drills, rng))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn game(athlete: &str, day: u32) -> GameStatRecord {
        let mut g = GameStatRecord::new(athlete, NaiveDate::from_ymd_opt(2025, 2, day).unwrap());
        g.fg_made = 10;
        g.fg_attempted = 20;
        g.two_made = 7;
        g.two_attempted = 12;
        g.three_made = 3;
        g.three_attempted = 8;
        g.ft_made = 8;
        g.ft_attempted = 10;
        g.off_rebounds = 2;
        g.def_rebounds = 5;
        g.assists = 4;
        g.steals = 2;
        g.blocks = 1;
        g.turnovers = 1;
        g.points = 31;
        g
    }

    fn free_throw_slump(athlete: &str) -> Vec<GameStatRecord> {
        (1..=5)
            .map(|day| {
                let mut g = game(athlete, day);
                g.ft_made = 4;
                g.ft_attempted = 10;
                g
            })
            .collect()
    }

    fn catalog() -> Vec<Drill> {
        vec![
            Drill::new(1, "Free throw ladder", [StatKey::FreeThrowPct]),
            Drill::new(2, "Box out", [StatKey::Rebounds]),
            Drill::new(3, "Ball security", [StatKey::Turnovers, StatKey::Assists]),
            Drill::new(4, "Corner threes", [StatKey::ThreePointPct]),
            Drill::new(5, "Routine at the line", [StatKey::FreeThrowPct]),
        ]
    }

    #[test]
    fn test_free_throw_slump_gets_free_throw_drills() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut planner = RegimenPlanner::new(RegimenConfig::default()).unwrap();
        let drills = catalog();
        let regimen = planner.plan("a", &free_throw_slump("a"), &drills, &mut rng);

        assert_eq!(regimen.focus.first().map(String::as_str), Some("FT%"));
        assert_eq!(regimen.attention_areas[0].stat, StatKey::FreeThrowPct);
        assert!(!regimen.drill_ids.is_empty());
        assert!(regimen.drill_ids.len() <= planner.config().max_drills);
        let ft_drills = drills
            .iter()
            .filter(|d| d.addresses(StatKey::FreeThrowPct))
            .filter_map(|d| d.id)
            .collect::<Vec<_>>();
        assert!(
            regimen.drill_ids.iter().any(|id| ft_drills.contains(id)),
            "{regimen:?}"
        );
    }

    #[test]
    fn test_no_attention_means_no_forest() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut planner = RegimenPlanner::new(RegimenConfig::default()).unwrap();
        let records = (1..=3).map(|day| game("a", day)).collect::<Vec<_>>();

        let regimen = planner.plan("a", &records, &catalog(), &mut rng);
        assert!(regimen.attention_areas.is_empty());
        assert!(regimen.drill_ids.is_empty());

        let regimen = planner.plan("unknown", &records, &catalog(), &mut rng);
        assert!(regimen.focus.is_empty());
        assert!(regimen.drill_ids.is_empty());
        assert_eq!(planner.cache().misses(), 0);
    }

    #[test]
    fn test_empty_catalog_recommends_nothing() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut planner = RegimenPlanner::new(RegimenConfig::default()).unwrap();
        let regimen = planner.plan("a", &free_throw_slump("a"), &[], &mut rng);
        assert!(!regimen.attention_areas.is_empty());
        assert!(regimen.drill_ids.is_empty());
    }

    #[test]
    fn test_batch_trains_once_and_truncates() {
        let mut rng = Pcg32::seed_from_u64(7);
        let config = RegimenConfig {
            max_drills: 1,
            ..RegimenConfig::default()
        };
        let mut planner = RegimenPlanner::new(config).unwrap();
        let mut records = free_throw_slump("a");
        records.extend(free_throw_slump("b"));
        records.extend(free_throw_slump("c"));

        let regimens = planner.plan_batch(["a", "b", "c"], &records, &catalog(), &mut rng);
        assert_eq!(
            regimens.iter().map(|r| r.athlete_id.as_str()).collect::<Vec<_>>(),
            ["a", "b", "c"]
        );
        assert!(regimens.iter().all(|r| r.drill_ids.len() == 1));
        assert_eq!(planner.cache().misses(), 1);
        assert_eq!(planner.cache().hits(), 2);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = RegimenConfig {
            max_drills: 0,
            ..RegimenConfig::default()
        };
        assert_eq!(
            RegimenPlanner::new(config).unwrap_err(),
            InvalidConfigError::ZeroMaxDrills
        );
    }

    #[test]
    fn test_regimen_serializes_labels() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut planner = RegimenPlanner::new(RegimenConfig::default()).unwrap();
        let regimen = planner.plan("a", &free_throw_slump("a"), &catalog(), &mut rng);
        let json = serde_json::to_value(&regimen).unwrap();
        assert_eq!(json["athlete_id"], "a");
        assert_eq!(json["focus"][0], "FT%");
        assert_eq!(json["attention_areas"][0]["key"], "FT_PCT");
        assert!(json["drill_ids"].is_array());
    }
}
