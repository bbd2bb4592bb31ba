//! Reference values that athlete metrics are scored against.
//!
//! A deficiency score is a z-score against a fixed per-category reference:
//!
//! ```text
//! score = direction * (metric - expected) / spread
//! ```
//!
//! `direction` is `+1` when a higher metric is better and `-1` otherwise
//! (turnovers), so a negative score always means "below expectation". Dividing by
//! a per-category `spread` puts percentages (0..1) and per-game counts on the same
//! scale, which is what makes scores comparable across categories.
//!
//! # Default Table
//!
//! | key         | expected | spread |
//! |-------------|----------|--------|
//! | `FG_PCT`    | 0.45     | 0.08   |
//! | `_2PTS_PCT` | 0.50     | 0.08   |
//! | `_3PTS_PCT` | 0.33     | 0.08   |
//! | `FT_PCT`    | 0.75     | 0.10   |
//! | `REB`       | 6.0      | 3.0    |
//! | `assists`   | 3.0      | 2.0    |
//! | `steals`    | 1.5      | 1.0    |
//! | `blocks`    | 0.8      | 0.8    |
//! | `turnovers` | 2.0      | 1.5    |
//! | `points`    | 12.0     | 6.0    |

use std::collections::BTreeMap;

use regimen_core::{STAT_COUNT, StatKey};
use regimen_stats::ratio;
use serde::{Deserialize, Serialize};

/// Expected value and typical spread for one stat category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceValue {
    pub expected: f32,
    pub spread: f32,
}

impl ReferenceValue {
    #[must_use]
    pub const fn new(expected: f32, spread: f32) -> Self {
        Self { expected, spread }
    }
}

const DEFAULT_REFERENCES: [ReferenceValue; STAT_COUNT] = [
    ReferenceValue::new(0.45, 0.08),
    ReferenceValue::new(0.50, 0.08),
    ReferenceValue::new(0.33, 0.08),
    ReferenceValue::new(0.75, 0.10),
    ReferenceValue::new(6.0, 3.0),
    ReferenceValue::new(3.0, 2.0),
    ReferenceValue::new(1.5, 1.0),
    ReferenceValue::new(0.8, 0.8),
    ReferenceValue::new(2.0, 1.5),
    ReferenceValue::new(12.0, 6.0),
];

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
#[display("reference spread for '{}' must be positive and finite, got {spread}", stat.key())]
pub struct InvalidReferenceError {
    pub stat: StatKey,
    pub spread: f32,
}

/// Reference values for every stat category.
///
/// Deserializes from a (possibly partial) map keyed by raw stat key; categories
/// missing from the map keep their default reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<StatKey, ReferenceValue>",
    into = "BTreeMap<StatKey, ReferenceValue>"
)]
pub struct ReferenceTable {
    values: [ReferenceValue; STAT_COUNT],
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self {
            values: DEFAULT_REFERENCES,
        }
    }
}

impl From<BTreeMap<StatKey, ReferenceValue>> for ReferenceTable {
    fn from(overrides: BTreeMap<StatKey, ReferenceValue>) -> Self {
        let mut table = Self::default();
        for (stat, value) in overrides {
            table.values[stat.index()] = value;
        }
        table
    }
}

impl From<ReferenceTable> for BTreeMap<StatKey, ReferenceValue> {
    fn from(table: ReferenceTable) -> Self {
        StatKey::ALL.into_iter().zip(table.values).collect()
    }
}

impl ReferenceTable {
    #[must_use]
    pub fn get(&self, stat: StatKey) -> ReferenceValue {
        self.values[stat.index()]
    }

    pub fn set(&mut self, stat: StatKey, value: ReferenceValue) {
        self.values[stat.index()] = value;
    }

    /// Checks that every spread is positive and finite.
    pub fn validate(&self) -> Result<(), InvalidReferenceError> {
        for stat in StatKey::ALL {
            let spread = self.get(stat).spread;
            if !spread.is_finite() || spread <= 0.0 {
                return Err(InvalidReferenceError { stat, spread });
            }
        }
        Ok(())
    }

    /// Deficiency score of `metric` for `stat` against an explicit expected value.
    ///
    /// The table's spread is always used, so scores computed against the
    /// athlete's own history stay comparable with scores against the table.
    #[must_use]
    pub fn score_against(&self, stat: StatKey, metric: f32, expected: f32) -> f32 {
        let z = ratio::zscore(metric, expected, self.get(stat).spread);
        if stat.higher_is_better() { z } else { -z }
    }

    /// Deficiency score of `metric` for `stat` against the table's expected value.
    #[must_use]
    pub fn score(&self, stat: StatKey, metric: f32) -> f32 {
        self.score_against(stat, metric, self.get(stat).expected)
    }
}

/// What an athlete's recent metrics are compared with.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::FromStr,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Baseline {
    /// Expected values from the [`ReferenceTable`].
    #[default]
    #[display("reference")]
    Reference,
    /// The athlete's own metrics over their full recorded history.
    #[display("history")]
    History,
}
