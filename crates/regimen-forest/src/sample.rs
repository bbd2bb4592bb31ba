//! Synthetic training samples derived from the live drill catalog.
//!
//! Each sample pairs a feature vector ("how much does this drill help each stat")
//! with the drill's id as its label. Generating samples from the catalog on every
//! request means newly added drills are recommendable immediately.
//!
//! # Feature Construction
//!
//! For every stat in the requested key set the feature is `1.0` when the drill is
//! tagged `good_for` that stat and `0.0` otherwise, plus Gaussian noise
//! `N(0, sigma)`, clamped to `[0, 1]`. Stats outside the key set stay `0.0`.
//! The noise keeps trees from memorizing exact tag sets.
//!
//! # Label Balance
//!
//! Drills are drawn in round-robin passes over a freshly shuffled catalog, so with
//! `k` eligible drills every drill appears `floor(N / k)` or `ceil(N / k)` times.

use rand::{Rng, seq::SliceRandom as _};
use rand_distr::Normal;
use regimen_core::{Drill, DrillId, StatKey, StatVector};
use serde::Serialize;

/// One generated training example.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SyntheticSample {
    pub features: StatVector,
    pub label: DrillId,
}

fn synthesize<R>(
    drill: &Drill,
    label: DrillId,
    stat_keys: &[StatKey],
    noise: Option<&Normal<f32>>,
    rng: &mut R,
) -> SyntheticSample
where
    R: Rng + ?Sized,
{
    let features = StatVector::from_fn(|stat| {
        if !stat_keys.contains(&stat) {
            return 0.0;
        }
        let signal = if drill.addresses(stat) { 1.0 } else { 0.0 };
        let jitter = noise.map_or(0.0, |normal| rng.sample(normal));
        (signal + jitter).clamp(0.0, 1.0)
    });
    SyntheticSample { features, label }
}

/// Generates `sample_count` labeled samples from `drills`.
///
/// Only drills with an id are used. Returns an empty vector when no drill is
/// eligible, never samples with missing labels.
///
/// # Arguments
///
/// * `drills` - The drill catalog
/// * `stat_keys` - Stat categories that carry signal in the features
/// * `sample_count` - Number of samples to produce
/// * `noise_sigma` - Standard deviation of feature noise (`0.0` disables noise)
/// * `rng` - Request-scoped random number generator
pub fn generate_synthetic_samples<R>(
    drills: &[Drill],
    stat_keys: &[StatKey],
    sample_count: usize,
    noise_sigma: f32,
    rng: &mut R,
) -> Vec<SyntheticSample>
where
    R: Rng + ?Sized,
{
    let mut eligible = drills
        .iter()
        .filter_map(|drill| drill.id.map(|id| (id, drill)))
        .collect::<Vec<_>>();
    if eligible.is_empty() {
        return vec![];
    }

    let noise = (noise_sigma > 0.0)
        .then(|| Normal::new(0.0, noise_sigma).ok())
        .flatten();

    let mut samples = Vec::with_capacity(sample_count);
    while samples.len() < sample_count {
        eligible.shuffle(rng);
        let remaining = sample_count - samples.len();
        for (id, drill) in eligible.iter().take(remaining) {
            samples.push(synthesize(drill, *id, stat_keys, noise.as_ref(), rng));
        }
    }
    samples
}
