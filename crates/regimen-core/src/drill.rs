use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::StatKey;

/// Catalog identifier of a drill.
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
    derive_more::From,
)]
#[serde(transparent)]
pub struct DrillId(pub u64);

/// A practice drill from the catalog.
///
/// Drills without an `id` are kept in the catalog type (the catalog may hold
/// drafts) but are never used for training or returned as recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drill {
    #[serde(default)]
    pub id: Option<DrillId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub steps: Vec<String>,
    /// Stat categories this drill improves.
    #[serde(default)]
    pub good_for: BTreeSet<StatKey>,
}

impl Drill {
    #[must_use]
    pub fn new<I>(id: u64, name: impl Into<String>, good_for: I) -> Self
    where
        I: IntoIterator<Item = StatKey>,
    {
        Self {
            id: Some(DrillId::from(id)),
            name: name.into(),
            description: String::new(),
            steps: vec![],
            good_for: good_for.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn addresses(&self, stat: StatKey) -> bool {
        self.good_for.contains(&stat)
    }
}

/// Ids of every drill in `drills` that has one, in catalog order.
#[must_use]
pub fn catalog_ids(drills: &[Drill]) -> Vec<DrillId> {
    drills.iter().filter_map(|drill| drill.id).collect()
}
