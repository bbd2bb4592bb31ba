//! Attention areas and their conversion into recommender weights.

use std::cmp::Ordering;

use regimen_core::{ParseStatKeyError, PerformanceMap, StatKey, StatVector};
use serde::{Serialize, Serializer, ser::SerializeStruct as _};

/// A stat category where an athlete falls below their baseline.
///
/// `score` is the signed deficiency score; attention areas always carry a
/// negative score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttentionArea {
    pub stat: StatKey,
    pub score: f32,
}

impl AttentionArea {
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.stat.label()
    }

    /// Deficiency magnitude used as a voting weight.
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        self.score.abs()
    }
}

/// Serialized as `{"stat": "FT%", "key": "FT_PCT", "score": -3.5}`.
impl Serialize for AttentionArea {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("AttentionArea", 3)?;
        s.serialize_field("stat", self.stat.label())?;
        s.serialize_field("key", self.stat.key())?;
        s.serialize_field("score", &self.score)?;
        s.end()
    }
}

fn most_deficient_first(a: &AttentionArea, b: &AttentionArea) -> Ordering {
    a.score
        .total_cmp(&b.score)
        .then_with(|| a.stat.index().cmp(&b.stat.index()))
}

/// Picks the categories with a strictly negative score, most deficient first.
///
/// Ties are broken by the fixed category order so the result is deterministic.
#[must_use]
pub fn rank_attention_areas(scores: &StatVector) -> Vec<AttentionArea> {
    let mut areas = scores
        .iter()
        .filter(|(_, score)| *score < 0.0)
        .map(|(stat, score)| AttentionArea { stat, score })
        .collect::<Vec<_>>();
    areas.sort_by(most_deficient_first);
    areas
}

/// Deficiency magnitudes keyed by category, for the forest predictor.
#[must_use]
pub fn performance_map(areas: &[AttentionArea]) -> PerformanceMap {
    areas
        .iter()
        .map(|area| (area.stat, area.magnitude()))
        .collect()
}

/// Like [`performance_map`], but from `(human label, score)` pairs as shown in
/// the UI (`"FT%"`, `"Turnovers"`, ...).
pub fn performance_map_from_labels<'a, I>(labeled: I) -> Result<PerformanceMap, ParseStatKeyError>
where
    I: IntoIterator<Item = (&'a str, f32)>,
{
    labeled
        .into_iter()
        .map(|(label, score)| {
            StatKey::from_label(label)
                .map(|stat| (stat, score.abs()))
                .ok_or_else(|| ParseStatKeyError {
                    input: label.to_owned(),
                })
        })
        .collect()
}
