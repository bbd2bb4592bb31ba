//! The fixed stat-category vocabulary shared by the analyzer and the recommender.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of stat categories.
pub const STAT_COUNT: usize = 10;

/// A stat category tracked for athletes and targeted by drills.
///
/// The serialized form is the raw key (`FG_PCT`, `_2PTS_PCT`, ..., `points`),
/// and [`Display`](std::fmt::Display) produces the human label (`FG%`, `2PT%`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum StatKey {
    #[serde(rename = "FG_PCT")]
    #[display("FG%")]
    FieldGoalPct,
    #[serde(rename = "_2PTS_PCT")]
    #[display("2PT%")]
    TwoPointPct,
    #[serde(rename = "_3PTS_PCT")]
    #[display("3PT%")]
    ThreePointPct,
    #[serde(rename = "FT_PCT")]
    #[display("FT%")]
    FreeThrowPct,
    #[serde(rename = "REB")]
    #[display("Rebounds")]
    Rebounds,
    #[serde(rename = "assists")]
    #[display("Assists")]
    Assists,
    #[serde(rename = "steals")]
    #[display("Steals")]
    Steals,
    #[serde(rename = "blocks")]
    #[display("Blocks")]
    Blocks,
    #[serde(rename = "turnovers")]
    #[display("Turnovers")]
    Turnovers,
    #[serde(rename = "points")]
    #[display("Points")]
    Points,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown stat category '{input}'")]
pub struct ParseStatKeyError {
    pub input: String,
}

impl StatKey {
    /// All categories in their fixed order.
    pub const ALL: [StatKey; STAT_COUNT] = [
        StatKey::FieldGoalPct,
        StatKey::TwoPointPct,
        StatKey::ThreePointPct,
        StatKey::FreeThrowPct,
        StatKey::Rebounds,
        StatKey::Assists,
        StatKey::Steals,
        StatKey::Blocks,
        StatKey::Turnovers,
        StatKey::Points,
    ];

    /// Position of this category in [`StatKey::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Raw key as stored in stat tables and drill tags.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            StatKey::FieldGoalPct => "FG_PCT",
            StatKey::TwoPointPct => "_2PTS_PCT",
            StatKey::ThreePointPct => "_3PTS_PCT",
            StatKey::FreeThrowPct => "FT_PCT",
            StatKey::Rebounds => "REB",
            StatKey::Assists => "assists",
            StatKey::Steals => "steals",
            StatKey::Blocks => "blocks",
            StatKey::Turnovers => "turnovers",
            StatKey::Points => "points",
        }
    }

    /// Human label shown to coaches and athletes.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            StatKey::FieldGoalPct => "FG%",
            StatKey::TwoPointPct => "2PT%",
            StatKey::ThreePointPct => "3PT%",
            StatKey::FreeThrowPct => "FT%",
            StatKey::Rebounds => "Rebounds",
            StatKey::Assists => "Assists",
            StatKey::Steals => "Steals",
            StatKey::Blocks => "Blocks",
            StatKey::Turnovers => "Turnovers",
            StatKey::Points => "Points",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stat| stat.key() == key)
    }

    /// Reverse label lookup (`"FT%"` -> [`StatKey::FreeThrowPct`]).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stat| stat.label() == label)
    }

    /// Whether the metric is a made/attempted ratio rather than a per-game count.
    #[must_use]
    pub const fn is_percentage(self) -> bool {
        matches!(
            self,
            StatKey::FieldGoalPct
                | StatKey::TwoPointPct
                | StatKey::ThreePointPct
                | StatKey::FreeThrowPct
        )
    }

    /// Whether a larger metric means better performance.
    ///
    /// Turnovers are the only category where less is better.
    #[must_use]
    pub const fn higher_is_better(self) -> bool {
        !matches!(self, StatKey::Turnovers)
    }
}

impl FromStr for StatKey {
    type Err = ParseStatKeyError;

    /// Accepts either the raw key or the human label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
            .or_else(|| Self::from_label(s))
            .ok_or_else(|| ParseStatKeyError {
                input: s.to_owned(),
            })
    }
}
