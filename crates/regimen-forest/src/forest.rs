//! Random forest construction.
//!
//! Each tree is trained on a bootstrap sample (drawn with replacement, same size
//! as the input) and considers a random subset of stat categories at every split.
//! The two sources of randomness decorrelate the trees so that their majority
//! vote is robust to the noise injected into the synthetic samples.
//!
//! # Parallelization
//!
//! Trees are independent and are split into contiguous batches, one scoped
//! thread per batch, with no more batches than the available parallelism. Every
//! tree owns a [`Pcg32`] seeded from the caller's generator; nothing random is
//! shared between threads, and a seeded caller generator makes the whole forest
//! reproducible regardless of how trees are batched.

use std::{collections::BTreeMap, num::NonZeroUsize, thread};

use arrayvec::ArrayVec;
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use regimen_core::{DrillId, STAT_COUNT, StatKey, StatVector};
use tracing::debug;

use crate::{params::ForestParams, sample::SyntheticSample, tree::DecisionTree};

/// An ensemble of decision trees over a fixed set of stat categories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest {
    trees: Vec<DecisionTree>,
    stat_keys: ArrayVec<StatKey, STAT_COUNT>,
}

/// `stat_keys` without duplicates, in first-seen order.
pub(crate) fn distinct_keys(stat_keys: &[StatKey]) -> ArrayVec<StatKey, STAT_COUNT> {
    let mut keys = ArrayVec::new();
    for &stat in stat_keys {
        if !keys.contains(&stat) {
            keys.push(stat);
        }
    }
    keys
}

fn bootstrap<'a, R>(samples: &'a [SyntheticSample], rng: &mut R) -> Vec<&'a SyntheticSample>
where
    R: Rng + ?Sized,
{
    let n = samples.len();
    (0..n).map(|_| &samples[rng.random_range(0..n)]).collect()
}

/// Builds a forest of `params.tree_count` trees from `samples`.
///
/// Returns an empty forest when `samples` or `stat_keys` is empty.
pub fn build_forest<R>(
    samples: &[SyntheticSample],
    stat_keys: &[StatKey],
    params: &ForestParams,
    rng: &mut R,
) -> Forest
where
    R: Rng + ?Sized,
{
    let stat_keys = distinct_keys(stat_keys);
    if samples.is_empty() || stat_keys.is_empty() {
        debug!(
            samples = samples.len(),
            stat_keys = stat_keys.len(),
            "nothing to train on, forest left empty"
        );
        return Forest::default();
    }

    let mut tree_rngs = (0..params.tree_count)
        .map(|_| Pcg32::seed_from_u64(rng.random()))
        .collect::<Vec<_>>();
    let mut slots = (0..params.tree_count)
        .map(|_| None)
        .collect::<Vec<Option<DecisionTree>>>();

    let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    let batch_size = params.tree_count.div_ceil(workers).max(1);
    let keys = stat_keys.as_slice();
    thread::scope(|s| {
        for (batch, batch_rngs) in slots
            .chunks_mut(batch_size)
            .zip(tree_rngs.chunks_mut(batch_size))
        {
            s.spawn(move || {
                for (slot, tree_rng) in batch.iter_mut().zip(batch_rngs) {
                    let bag = bootstrap(samples, tree_rng);
                    *slot = DecisionTree::fit(&bag, keys, params, tree_rng);
                }
            });
        }
    });

    let trees = slots.into_iter().flatten().collect::<Vec<_>>();
    debug!(
        trees = trees.len(),
        samples = samples.len(),
        max_depth = trees.iter().map(DecisionTree::depth).max().unwrap_or(0),
        leaves = trees.iter().map(DecisionTree::leaf_count).sum::<usize>(),
        "built forest"
    );
    Forest { trees, stat_keys }
}

impl Forest {
    #[must_use]
    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    /// Stat categories the trees were allowed to split on.
    #[must_use]
    pub fn stat_keys(&self) -> &[StatKey] {
        &self.stat_keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Number of trees voting for each label on `features`.
    #[must_use]
    pub fn votes(&self, features: &StatVector) -> BTreeMap<DrillId, usize> {
        let mut votes = BTreeMap::new();
        for tree in &self.trees {
            *votes.entry(tree.predict(features)).or_insert(0) += 1;
        }
        votes
    }
}

#[cfg(test)]
mod tests {
    use regimen_core::Drill;

    use super::*;
    use crate::sample::generate_synthetic_samples;

    fn catalog() -> Vec<Drill> {
        vec![
            Drill::new(1, "Free throw ladder", [StatKey::FreeThrowPct]),
            Drill::new(2, "Box out", [StatKey::Rebounds]),
            Drill::new(3, "Closeouts", [StatKey::Steals]),
        ]
    }

    #[test]
    fn test_empty_samples_build_empty_forest() {
        let mut rng = Pcg32::seed_from_u64(0);
        let forest = build_forest(&[], &StatKey::ALL, &ForestParams::default(), &mut rng);
        assert!(forest.is_empty());
        assert!(forest.votes(&StatVector::zeros()).is_empty());
    }

    #[test]
    fn test_builds_requested_tree_count() {
        let mut rng = Pcg32::seed_from_u64(3);
        let params = ForestParams {
            tree_count: 12,
            ..ForestParams::default()
        };
        let samples = generate_synthetic_samples(&catalog(), &StatKey::ALL, 120, 0.15, &mut rng);
        let forest = build_forest(&samples, &StatKey::ALL, &params, &mut rng);
        assert_eq!(forest.len(), 12);
        assert!(forest.trees().iter().all(|t| t.depth() <= params.max_depth));
    }

    #[test]
    fn test_more_trees_than_threads() {
        let mut rng = Pcg32::seed_from_u64(6);
        let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        let params = ForestParams {
            tree_count: workers * 8 + 3,
            max_depth: 2,
            ..ForestParams::default()
        };
        let samples = generate_synthetic_samples(&catalog(), &StatKey::ALL, 30, 0.15, &mut rng);
        let forest = build_forest(&samples, &StatKey::ALL, &params, &mut rng);
        assert_eq!(forest.len(), params.tree_count);
    }

    #[test]
    fn test_empty_stat_keys_build_empty_forest() {
        let mut rng = Pcg32::seed_from_u64(3);
        let samples = generate_synthetic_samples(&catalog(), &StatKey::ALL, 30, 0.15, &mut rng);
        let forest = build_forest(&samples, &[], &ForestParams::default(), &mut rng);
        assert!(forest.is_empty());
    }

    #[test]
    fn test_seeded_builds_are_reproducible() {
        let build = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            let samples =
                generate_synthetic_samples(&catalog(), &StatKey::ALL, 90, 0.15, &mut rng);
            build_forest(&samples, &StatKey::ALL, &ForestParams::default(), &mut rng)
        };
        assert_eq!(build(17), build(17));
    }

    #[test]
    fn test_one_hot_queries_vote_for_tagged_drill() {
        let mut rng = Pcg32::seed_from_u64(5);
        let samples = generate_synthetic_samples(&catalog(), &StatKey::ALL, 300, 0.15, &mut rng);
        let forest = build_forest(&samples, &StatKey::ALL, &ForestParams::default(), &mut rng);
        let votes = forest.votes(&StatVector::one_hot(StatKey::Rebounds));
        let (winner, _) = votes.iter().max_by_key(|(_, count)| **count).unwrap();
        assert_eq!(*winner, DrillId(2));
    }

    #[test]
    fn test_distinct_keys() {
        let keys = distinct_keys(&[
            StatKey::Points,
            StatKey::Steals,
            StatKey::Points,
            StatKey::Steals,
        ]);
        assert_eq!(keys.as_slice(), &[StatKey::Points, StatKey::Steals]);
    }
}
