//! Shared vocabulary and input records for drill regimen planning.
//!
//! Both the performance analyzer and the drill recommender speak in terms of the
//! same ten stat categories ([`StatKey`]). This crate defines that vocabulary,
//! the dense per-category vector type ([`StatVector`]), and the plain records the
//! surrounding application hands to the core: [`GameStatRecord`] rows and the
//! [`Drill`] catalog.
//!
//! Nothing here performs I/O; records are (de)serialized with `serde` by callers.

use std::collections::BTreeMap;

pub use self::{
    drill::{Drill, DrillId, catalog_ids},
    game::GameStatRecord,
    stat_key::{ParseStatKeyError, STAT_COUNT, StatKey},
    stat_vector::StatVector,
};

pub mod drill;
pub mod game;
pub mod stat_key;
pub mod stat_vector;

/// Non-negative deficiency magnitude per stat category.
///
/// Produced from an athlete's attention areas and consumed by the forest
/// predictor as voting weights.
pub type PerformanceMap = BTreeMap<StatKey, f32>;
