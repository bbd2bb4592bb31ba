//! Reusing a forest across athletes while the catalog is unchanged.
//!
//! A forest depends only on the eligible drills (ids and `good_for` tags), the
//! stat categories and the forest parameters. [`ForestCache`] remembers the last
//! forest together with a fingerprint of those inputs, so planning a batch of
//! athletes trains once. Any change to the catalog changes the fingerprint and
//! triggers a rebuild.

use std::hash::{DefaultHasher, Hash as _, Hasher as _};

use rand::Rng;
use regimen_core::{Drill, StatKey};
use tracing::debug;

use crate::{
    forest::{self, Forest},
    params::ForestParams,
    sample,
};

/// Fingerprint of everything a forest is trained from.
#[must_use]
pub fn catalog_fingerprint(drills: &[Drill], stat_keys: &[StatKey], params: &ForestParams) -> u64 {
    let mut hasher = DefaultHasher::new();
    forest::distinct_keys(stat_keys).as_slice().hash(&mut hasher);
    for drill in drills {
        if let Some(id) = drill.id {
            id.hash(&mut hasher);
            drill.good_for.hash(&mut hasher);
        }
    }
    let ForestParams {
        tree_count,
        max_depth,
        min_samples_split,
        min_samples_leaf,
        features_per_split,
        sample_count,
        noise_sigma,
    } = *params;
    (
        tree_count,
        max_depth,
        min_samples_split,
        min_samples_leaf,
        features_per_split,
        sample_count,
        noise_sigma.to_bits(),
    )
        .hash(&mut hasher);
    hasher.finish()
}

#[derive(Debug, Clone)]
struct CacheEntry {
    fingerprint: u64,
    forest: Forest,
}

/// Holds the most recently built forest.
#[derive(Debug, Clone, Default)]
pub struct ForestCache {
    entry: Option<CacheEntry>,
    hits: usize,
    misses: usize,
}

impl ForestCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached forest for this catalog, training a new one on a miss.
    pub fn get_or_build<R>(
        &mut self,
        drills: &[Drill],
        stat_keys: &[StatKey],
        params: &ForestParams,
        rng: &mut R,
    ) -> &Forest
    where
        R: Rng + ?Sized,
    {
        let fingerprint = catalog_fingerprint(drills, stat_keys, params);
        let entry = match self.entry.take() {
            Some(entry) if entry.fingerprint == fingerprint => {
                self.hits += 1;
                debug!(fingerprint, "forest cache hit");
                entry
            }
            _ => {
                self.misses += 1;
                debug!(fingerprint, "forest cache miss, training");
                let samples = sample::generate_synthetic_samples(
                    drills,
                    stat_keys,
                    params.sample_count,
                    params.noise_sigma,
                    rng,
                );
                CacheEntry {
                    fingerprint,
                    forest: forest::build_forest(&samples, stat_keys, params, rng),
                }
            }
        };
        &self.entry.insert(entry).forest
    }

    /// Drops the cached forest.
    pub fn clear(&mut self) {
        self.entry = None;
    }

    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits
    }

    #[must_use]
    pub fn misses(&self) -> usize {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn catalog() -> Vec<Drill> {
        vec![
            Drill::new(1, "Free throw ladder", [StatKey::FreeThrowPct]),
            Drill::new(2, "Box out", [StatKey::Rebounds]),
        ]
    }

    #[test]
    fn test_fingerprint_tracks_catalog_changes() {
        let params = ForestParams::default();
        let drills = catalog();
        let base = catalog_fingerprint(&drills, &StatKey::ALL, &params);
        assert_eq!(base, catalog_fingerprint(&catalog(), &StatKey::ALL, &params));

        let mut retagged = catalog();
        retagged[1].good_for.insert(StatKey::Blocks);
        assert_ne!(base, catalog_fingerprint(&retagged, &StatKey::ALL, &params));

        let mut grown = catalog();
        grown.push(Drill::new(3, "Closeouts", [StatKey::Steals]));
        assert_ne!(base, catalog_fingerprint(&grown, &StatKey::ALL, &params));

        let mut renamed = catalog();
        renamed[0].name = "FT routine".to_owned();
        assert_eq!(base, catalog_fingerprint(&renamed, &StatKey::ALL, &params));
    }

    #[test]
    fn test_second_request_hits() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut cache = ForestCache::new();
        let params = ForestParams {
            tree_count: 5,
            ..ForestParams::default()
        };
        let drills = catalog();
        let first = cache
            .get_or_build(&drills, &StatKey::ALL, &params, &mut rng)
            .clone();
        let second = cache
            .get_or_build(&drills, &StatKey::ALL, &params, &mut rng)
            .clone();
        assert_eq!(first, second);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn test_catalog_change_rebuilds() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut cache = ForestCache::new();
        let params = ForestParams {
            tree_count: 5,
            ..ForestParams::default()
        };
        let _ = cache.get_or_build(&catalog(), &StatKey::ALL, &params, &mut rng);
        let mut grown = catalog();
        grown.push(Drill::new(3, "Closeouts", [StatKey::Steals]));
        let _ = cache.get_or_build(&grown, &StatKey::ALL, &params, &mut rng);
        assert_eq!(cache.misses(), 2);

        cache.clear();
        let _ = cache.get_or_build(&grown, &StatKey::ALL, &params, &mut rng);
        assert_eq!(cache.misses(), 3);
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn test_alternating_catalogs_keep_the_latest_forest() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut cache = ForestCache::new();
        let params = ForestParams {
            tree_count: 3,
            ..ForestParams::default()
        };
        let mut grown = catalog();
        grown.push(Drill::new(3, "Closeouts", [StatKey::Steals]));

        let small = cache
            .get_or_build(&catalog(), &StatKey::ALL, &params, &mut rng)
            .clone();
        let large = cache
            .get_or_build(&grown, &StatKey::ALL, &params, &mut rng)
            .clone();
        assert_eq!(small.len(), 3);
        assert_eq!(large.len(), 3);
        let again = cache.get_or_build(&grown, &StatKey::ALL, &params, &mut rng);
        assert_eq!(*again, large);
        assert_eq!((cache.hits(), cache.misses()), (1, 2));
    }
}
