//! CART-style classification trees over stat feature vectors.
//!
//! Trees are grown greedily top-down. At each node a random subset of the
//! allowed stat categories is examined, every midpoint between consecutive
//! distinct feature values is tried as a threshold, and the split with the lowest
//! weighted Gini impurity wins. A node becomes a leaf when it is pure, when it is
//! at maximum depth, when it holds fewer than `min_samples_split` samples, or when
//! no candidate split strictly lowers impurity.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use rand::{Rng, seq::IndexedRandom as _};
use regimen_core::{DrillId, STAT_COUNT, StatKey, StatVector};

use crate::{params::ForestParams, sample::SyntheticSample};

/// Label distribution at a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    /// Majority label (smallest id on ties).
    pub label: DrillId,
    /// Number of training samples per label that reached this leaf.
    pub distribution: BTreeMap<DrillId, usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(Leaf),
    Split {
        stat: StatKey,
        /// Samples with `features[stat] <= threshold` go left.
        threshold: f32,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A single trained decision tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    root: Node,
}

type LabelCounts = BTreeMap<DrillId, usize>;

fn label_counts(samples: &[&SyntheticSample]) -> LabelCounts {
    let mut counts = LabelCounts::new();
    for sample in samples {
        *counts.entry(sample.label).or_insert(0) += 1;
    }
    counts
}

fn sum_of_squares(counts: &LabelCounts) -> usize {
    counts.values().map(|c| c * c).sum()
}

/// Gini impurity `1 - Σ p²` from the sum of squared label counts.
#[expect(clippy::cast_precision_loss)]
fn gini(sum_sq: usize, n: usize) -> f32 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f32;
    1.0 - sum_sq as f32 / (n * n)
}

fn majority_leaf(counts: LabelCounts) -> Leaf {
    let mut label = DrillId(0);
    let mut best = 0;
    // ascending id order, so ties keep the smallest id
    for (&id, &count) in &counts {
        if count > best {
            best = count;
            label = id;
        }
    }
    Leaf {
        label,
        distribution: counts,
    }
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    stat: StatKey,
    threshold: f32,
    impurity: f32,
}

/// Minimum impurity decrease for a split to count as an improvement.
const MIN_IMPURITY_DECREASE: f32 = 1e-6;

struct TreeGrower<'a, R: ?Sized> {
    stat_keys: &'a [StatKey],
    params: &'a ForestParams,
    rng: &'a mut R,
}

impl<R> TreeGrower<'_, R>
where
    R: Rng + ?Sized,
{
    fn grow(&mut self, samples: Vec<&SyntheticSample>, depth: usize) -> Node {
        let counts = label_counts(&samples);
        if counts.len() <= 1
            || depth >= self.params.max_depth
            || samples.len() < self.params.min_samples_split
        {
            return Node::Leaf(majority_leaf(counts));
        }

        let parent_impurity = gini(sum_of_squares(&counts), samples.len());
        let Some(split) = self.best_split(&samples, &counts) else {
            return Node::Leaf(majority_leaf(counts));
        };
        if split.impurity > parent_impurity - MIN_IMPURITY_DECREASE {
            return Node::Leaf(majority_leaf(counts));
        }

        let (left, right): (Vec<_>, Vec<_>) = samples
            .into_iter()
            .partition(|s| s.features[split.stat] <= split.threshold);
        Node::Split {
            stat: split.stat,
            threshold: split.threshold,
            left: Box::new(self.grow(left, depth + 1)),
            right: Box::new(self.grow(right, depth + 1)),
        }
    }

    fn best_split(
        &mut self,
        samples: &[&SyntheticSample],
        counts: &LabelCounts,
    ) -> Option<SplitCandidate> {
        let amount = self
            .params
            .features_per_split
            .min(self.stat_keys.len())
            .min(STAT_COUNT);
        let candidates = self
            .stat_keys
            .choose_multiple(self.rng, amount)
            .copied()
            .collect::<ArrayVec<StatKey, STAT_COUNT>>();

        let mut best: Option<SplitCandidate> = None;
        for stat in candidates {
            if let Some(candidate) = self.best_threshold(stat, samples, counts)
                && best.is_none_or(|b| candidate.impurity < b.impurity)
            {
                best = Some(candidate);
            }
        }
        best
    }

    /// Scans all thresholds on `stat`, updating child label counts incrementally.
    #[expect(clippy::cast_precision_loss)]
    fn best_threshold(
        &self,
        stat: StatKey,
        samples: &[&SyntheticSample],
        counts: &LabelCounts,
    ) -> Option<SplitCandidate> {
        let n = samples.len();
        let min_leaf = self.params.min_samples_leaf;
        let mut sorted = samples
            .iter()
            .map(|s| (s.features[stat], s.label))
            .collect::<Vec<_>>();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left_counts = LabelCounts::new();
        let mut left_sq = 0;
        let mut right_sq = sum_of_squares(counts);
        let mut best: Option<SplitCandidate> = None;

        for i in 0..n.saturating_sub(1) {
            let (value, label) = sorted[i];
            let left_count = left_counts.entry(label).or_insert(0);
            let right_count = counts.get(&label).copied().unwrap_or(0) - *left_count;
            // moving one sample of `label` from right to left
            left_sq += 2 * *left_count + 1;
            right_sq -= 2 * right_count - 1;
            *left_count += 1;

            let next = sorted[i + 1].0;
            if next <= value {
                continue;
            }
            let n_left = i + 1;
            let n_right = n - n_left;
            if n_left < min_leaf || n_right < min_leaf {
                continue;
            }

            let impurity = (n_left as f32 * gini(left_sq, n_left)
                + n_right as f32 * gini(right_sq, n_right))
                / n as f32;
            if best.is_none_or(|b| impurity < b.impurity) {
                let mid = value + (next - value) / 2.0;
                let threshold = if mid < next { mid } else { value };
                best = Some(SplitCandidate {
                    stat,
                    threshold,
                    impurity,
                });
            }
        }
        best
    }
}

impl DecisionTree {
    /// Grows a tree on `samples`, considering only `stat_keys` for splits.
    ///
    /// Returns `None` when `samples` is empty.
    pub fn fit<R>(
        samples: &[&SyntheticSample],
        stat_keys: &[StatKey],
        params: &ForestParams,
        rng: &mut R,
    ) -> Option<Self>
    where
        R: Rng + ?Sized,
    {
        if samples.is_empty() {
            return None;
        }
        let mut grower = TreeGrower {
            stat_keys,
            params,
            rng,
        };
        let root = grower.grow(samples.to_vec(), 0);
        Some(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The leaf reached by `features`.
    #[must_use]
    pub fn leaf(&self, features: &StatVector) -> &Leaf {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf(leaf) => return leaf,
                Node::Split {
                    stat,
                    threshold,
                    left,
                    right,
                } => {
                    node = if features[*stat] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    /// Majority label of the leaf reached by `features`.
    #[must_use]
    pub fn predict(&self, features: &StatVector) -> DrillId {
        self.leaf(features).label
    }

    /// Length of the longest root-to-leaf path.
    #[must_use]
    pub fn depth(&self) -> usize {
        fn depth_of(node: &Node) -> usize {
            match node {
                Node::Leaf(_) => 0,
                Node::Split { left, right, .. } => 1 + depth_of(left).max(depth_of(right)),
            }
        }
        depth_of(&self.root)
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        fn leaves_of(node: &Node) -> usize {
            match node {
                Node::Leaf(_) => 1,
                Node::Split { left, right, .. } => leaves_of(left) + leaves_of(right),
            }
        }
        leaves_of(&self.root)
    }
}
