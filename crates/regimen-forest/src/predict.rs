//! Severity-weighted drill ranking.
//!
//! For every deficient stat in the performance map, a one-hot query isolating
//! that stat is run through each tree. The drill a tree predicts earns
//! `magnitude / tree_count` points, so a stat twice as deficient carries twice
//! the voting weight. Points are summed across stats and drills are ranked by
//! total, highest first.

use std::collections::{BTreeMap, BTreeSet};

use regimen_core::{Drill, DrillId, PerformanceMap, StatVector};
use serde::Serialize;
use tracing::debug;

use crate::forest::Forest;

/// A recommended drill with its accumulated weighted vote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrillScore {
    pub drill_id: DrillId,
    pub score: f32,
}

/// Ranks catalog drills by severity-weighted forest votes.
///
/// Only ids present in `drills` are returned. Stats with a non-positive or
/// non-finite magnitude, and stats the forest was not trained on, are skipped.
/// An empty forest or an empty map yields an empty ranking. Ties are broken by
/// ascending drill id.
#[must_use]
pub fn rank_drills(
    forest: &Forest,
    performance_map: &PerformanceMap,
    drills: &[Drill],
) -> Vec<DrillScore> {
    if forest.is_empty() {
        return vec![];
    }
    let catalog = drills
        .iter()
        .filter_map(|drill| drill.id)
        .collect::<BTreeSet<_>>();
    #[expect(clippy::cast_precision_loss)]
    let tree_count = forest.len() as f32;

    let mut totals = BTreeMap::<DrillId, f32>::new();
    for (&stat, &magnitude) in performance_map {
        if !(magnitude.is_finite() && magnitude > 0.0) {
            continue;
        }
        if !forest.stat_keys().contains(&stat) {
            debug!(stat = stat.key(), "stat not covered by forest, skipped");
            continue;
        }
        let query = StatVector::one_hot(stat);
        for (drill_id, votes) in forest.votes(&query) {
            if !catalog.contains(&drill_id) {
                continue;
            }
            #[expect(clippy::cast_precision_loss)]
            let weight = magnitude * votes as f32 / tree_count;
            *totals.entry(drill_id).or_insert(0.0) += weight;
        }
    }

    let mut ranked = totals
        .into_iter()
        .map(|(drill_id, score)| DrillScore { drill_id, score })
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.drill_id.cmp(&b.drill_id))
    });
    ranked
}

/// Drill ids ordered by severity-weighted relevance, most relevant first.
#[must_use]
pub fn predict_forest_weighted(
    forest: &Forest,
    performance_map: &PerformanceMap,
    drills: &[Drill],
) -> Vec<DrillId> {
    rank_drills(forest, performance_map, drills)
        .into_iter()
        .map(|scored| scored.drill_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;
    use regimen_core::StatKey;

    use super::*;
    use crate::{
        forest::build_forest, params::ForestParams, sample::generate_synthetic_samples,
    };

    fn train(drills: &[Drill], seed: u64) -> Forest {
        let mut rng = Pcg32::seed_from_u64(seed);
        let params = ForestParams::default();
        let samples = generate_synthetic_samples(
            drills,
            &StatKey::ALL,
            params.sample_count,
            params.noise_sigma,
            &mut rng,
        );
        build_forest(&samples, &StatKey::ALL, &params, &mut rng)
    }

    fn catalog() -> Vec<Drill> {
        vec![
            Drill::new(10, "Free throw ladder", [StatKey::FreeThrowPct]),
            Drill::new(20, "Ball security", [StatKey::Turnovers]),
            Drill::new(30, "Box out", [StatKey::Rebounds]),
        ]
    }

    #[test]
    fn test_empty_map_or_forest_yields_nothing() {
        let drills = catalog();
        let forest = train(&drills, 1);
        assert!(predict_forest_weighted(&forest, &PerformanceMap::new(), &drills).is_empty());

        let map = PerformanceMap::from([(StatKey::FreeThrowPct, 2.0)]);
        assert!(predict_forest_weighted(&Forest::default(), &map, &drills).is_empty());
    }

    #[test]
    fn test_non_positive_magnitudes_are_ignored() {
        let drills = catalog();
        let forest = train(&drills, 2);
        let map = PerformanceMap::from([
            (StatKey::FreeThrowPct, 0.0),
            (StatKey::Turnovers, f32::NAN),
        ]);
        assert!(rank_drills(&forest, &map, &drills).is_empty());
    }

    #[test]
    fn test_only_catalog_ids_are_returned() {
        let drills = catalog();
        let forest = train(&drills, 3);
        let map = PerformanceMap::from([
            (StatKey::FreeThrowPct, 2.0),
            (StatKey::Turnovers, 1.0),
            (StatKey::Rebounds, 0.5),
        ]);
        // the forest knows drills 10, 20 and 30; the catalog now only has 20
        let narrowed = vec![drills[1].clone()];
        let ids = predict_forest_weighted(&forest, &map, &narrowed);
        assert!(ids.iter().all(|id| *id == DrillId(20)));

        let ids = predict_forest_weighted(&forest, &map, &drills);
        let known = regimen_core::catalog_ids(&drills);
        assert!(ids.iter().all(|id| known.contains(id)));
    }

    #[test]
    fn test_scores_are_sorted_descending() {
        let drills = catalog();
        let forest = train(&drills, 4);
        let map = PerformanceMap::from([
            (StatKey::FreeThrowPct, 3.0),
            (StatKey::Turnovers, 2.0),
            (StatKey::Rebounds, 1.0),
        ]);
        let ranked = rank_drills(&forest, &map, &drills);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        let total = ranked.iter().map(|r| r.score).sum::<f32>();
        assert!((total - 6.0).abs() < 1e-3, "{total}");
    }

    #[test]
    fn test_more_severe_stat_ranks_its_drill_higher() {
        let drills = vec![
            Drill::new(1, "Free throw ladder", [StatKey::FreeThrowPct]),
            Drill::new(2, "Ball security", [StatKey::Turnovers]),
        ];
        let map = PerformanceMap::from([(StatKey::FreeThrowPct, 3.0), (StatKey::Turnovers, 1.0)]);

        let trials = 20;
        let wins = (0..trials)
            .filter(|&seed| {
                let forest = train(&drills, seed);
                let ids = predict_forest_weighted(&forest, &map, &drills);
                let ft = ids.iter().position(|id| *id == DrillId(1));
                let to = ids.iter().position(|id| *id == DrillId(2));
                match (ft, to) {
                    (Some(ft), Some(to)) => ft < to,
                    (Some(_), None) => true,
                    _ => false,
                }
            })
            .count();
        assert!(wins * 2 > usize::try_from(trials).unwrap(), "{wins}/{trials}");
    }
}
