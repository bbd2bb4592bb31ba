use serde::{Deserialize, Serialize};

/// Tuning knobs for sample synthesis and forest construction.
///
/// The defaults suit a catalog of a few dozen drills over the ten stat
/// categories: enough trees to smooth out bootstrap noise, shallow enough to
/// stay cheap to rebuild on every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestParams {
    /// Number of trees in the ensemble.
    pub tree_count: usize,
    /// Maximum depth of a tree (the root is depth 0).
    pub max_depth: usize,
    /// Nodes with fewer samples than this become leaves.
    pub min_samples_split: usize,
    /// Minimum number of samples on each side of a split.
    pub min_samples_leaf: usize,
    /// Number of stat categories considered at each split.
    pub features_per_split: usize,
    /// Number of synthetic samples generated from the catalog.
    pub sample_count: usize,
    /// Standard deviation of the Gaussian noise added to sample features.
    pub noise_sigma: f32,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            tree_count: 25,
            max_depth: 6,
            min_samples_split: 4,
            min_samples_leaf: 1,
            features_per_split: 4,
            sample_count: 300,
            noise_sigma: 0.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidParamsError {
    #[display("tree_count must be at least 1")]
    ZeroTreeCount,
    #[display("features_per_split must be at least 1")]
    ZeroFeaturesPerSplit,
    #[display("min_samples_leaf must be at least 1")]
    ZeroMinSamplesLeaf,
    #[display("noise_sigma must be finite and non-negative, got {sigma}")]
    InvalidNoiseSigma { sigma: f32 },
}

impl ForestParams {
    pub fn validate(&self) -> Result<(), InvalidParamsError> {
        if self.tree_count == 0 {
            return Err(InvalidParamsError::ZeroTreeCount);
        }
        if self.features_per_split == 0 {
            return Err(InvalidParamsError::ZeroFeaturesPerSplit);
        }
        if self.min_samples_leaf == 0 {
            return Err(InvalidParamsError::ZeroMinSamplesLeaf);
        }
        if !self.noise_sigma.is_finite() || self.noise_sigma < 0.0 {
            return Err(InvalidParamsError::InvalidNoiseSigma {
                sigma: self.noise_sigma,
            });
        }
        Ok(())
    }
}
