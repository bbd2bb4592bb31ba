//! Scoring an athlete's recent games into ranked attention areas.

use std::collections::BTreeSet;

use regimen_core::{GameStatRecord, PerformanceMap, StatVector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    attention::{self, AttentionArea},
    baseline::{Baseline, InvalidReferenceError, ReferenceTable},
    metrics,
};

/// Number of most recent games analyzed when not configured otherwise.
pub const DEFAULT_LOOKBACK: usize = 5;

/// Result of analyzing one athlete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceReport {
    pub athlete_id: String,
    /// Games inside the lookback window.
    pub games_analyzed: usize,
    /// Metrics over the window; `None` when no game was analyzed.
    pub metrics: Option<StatVector>,
    /// Deficiency score of every category; `None` when no game was analyzed.
    pub scores: Option<StatVector>,
    /// Categories with a negative score, most deficient first.
    pub attention_areas: Vec<AttentionArea>,
}

impl PerformanceReport {
    fn empty(athlete_id: &str) -> Self {
        Self {
            athlete_id: athlete_id.to_owned(),
            games_analyzed: 0,
            metrics: None,
            scores: None,
            attention_areas: vec![],
        }
    }

    /// Human labels of the attention areas, for a "Focus: ..." line.
    #[must_use]
    pub fn focus_labels(&self) -> Vec<&'static str> {
        self.attention_areas.iter().map(AttentionArea::label).collect()
    }

    /// Voting weights for the drill recommender.
    #[must_use]
    pub fn performance_map(&self) -> PerformanceMap {
        attention::performance_map(&self.attention_areas)
    }
}

/// Scores athletes' recent games against a baseline.
///
/// # Examples
///
/// ```
/// use regimen_analysis::analyzer::PerformanceAnalyzer;
///
/// let analyzer = PerformanceAnalyzer::default();
/// let report = analyzer.analyze("nobody", &[]);
/// assert!(report.attention_areas.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceAnalyzer {
    /// How many of the most recent games to analyze.
    pub lookback: usize,
    pub baseline: Baseline,
    pub references: ReferenceTable,
}

impl Default for PerformanceAnalyzer {
    fn default() -> Self {
        Self {
            lookback: DEFAULT_LOOKBACK,
            baseline: Baseline::default(),
            references: ReferenceTable::default(),
        }
    }
}

impl PerformanceAnalyzer {
    #[must_use]
    pub fn new(lookback: usize) -> Self {
        Self {
            lookback,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), InvalidReferenceError> {
        self.references.validate()
    }

    /// Analyzes `athlete_id` using the relevant rows of `records`.
    ///
    /// Records of other athletes are ignored. The athlete's games are ordered by
    /// date, most recent first, and the first `lookback` of them are scored (all
    /// of them when fewer exist). An athlete without games, or a `lookback` of
    /// zero, yields a report with no attention areas.
    #[must_use]
    pub fn analyze(&self, athlete_id: &str, records: &[GameStatRecord]) -> PerformanceReport {
        let mut history = records
            .iter()
            .filter(|record| record.athlete_id == athlete_id)
            .collect::<Vec<_>>();
        history.sort_by(|a, b| b.game_date.cmp(&a.game_date));

        let window = &history[..self.lookback.min(history.len())];
        let Some(window_metrics) = metrics::compute_metrics(window) else {
            debug!(athlete_id, "no games to analyze");
            return PerformanceReport::empty(athlete_id);
        };

        let expected = match self.baseline {
            Baseline::Reference => {
                StatVector::from_fn(|stat| self.references.get(stat).expected)
            }
            Baseline::History => {
                // `history` is non-empty here because `window` is
                metrics::compute_metrics(&history).unwrap_or(window_metrics)
            }
        };
        let scores = StatVector::from_fn(|stat| {
            self.references
                .score_against(stat, window_metrics[stat], expected[stat])
        });
        let attention_areas = attention::rank_attention_areas(&scores);

        debug!(
            athlete_id,
            games = window.len(),
            baseline = %self.baseline,
            attention = ?attention_areas.iter().map(|a| a.stat.key()).collect::<Vec<_>>(),
            "analyzed performance"
        );

        PerformanceReport {
            athlete_id: athlete_id.to_owned(),
            games_analyzed: window.len(),
            metrics: Some(window_metrics),
            scores: Some(scores),
            attention_areas,
        }
    }
}

/// Analyzes `athlete_id` against the default reference table.
#[must_use]
pub fn analyze_player_performance(
    athlete_id: &str,
    records: &[GameStatRecord],
    lookback: usize,
) -> PerformanceReport {
    PerformanceAnalyzer::new(lookback).analyze(athlete_id, records)
}

/// Distinct athlete ids appearing in `records`, sorted.
#[must_use]
pub fn athlete_ids(records: &[GameStatRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.athlete_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
