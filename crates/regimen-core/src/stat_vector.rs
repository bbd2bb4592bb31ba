use std::ops::{Index, IndexMut};

use serde::{Serialize, Serializer, ser::SerializeMap as _};

use crate::{STAT_COUNT, StatKey};

/// One `f32` per stat category, indexed by [`StatKey`].
///
/// Used for per-category metrics, deficiency scores and decision-tree feature
/// vectors. Serializes as a map from raw key to value.
///
/// # Examples
///
/// ```
/// use regimen_core::{StatKey, StatVector};
///
/// let mut v = StatVector::zeros();
/// v[StatKey::FreeThrowPct] = 0.4;
/// assert_eq!(v[StatKey::FreeThrowPct], 0.4);
/// assert_eq!(StatVector::one_hot(StatKey::Steals)[StatKey::Steals], 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatVector([f32; STAT_COUNT]);

impl StatVector {
    #[must_use]
    pub const fn zeros() -> Self {
        Self([0.0; STAT_COUNT])
    }

    #[must_use]
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(StatKey) -> f32,
    {
        Self(StatKey::ALL.map(&mut f))
    }

    /// A vector with `1.0` at `stat` and `0.0` everywhere else.
    #[must_use]
    pub fn one_hot(stat: StatKey) -> Self {
        let mut v = Self::zeros();
        v[stat] = 1.0;
        v
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKey, f32)> + '_ {
        StatKey::ALL.into_iter().zip(self.0.iter().copied())
    }
}

impl Index<StatKey> for StatVector {
    type Output = f32;

    fn index(&self, stat: StatKey) -> &f32 {
        &self.0[stat.index()]
    }
}

impl IndexMut<StatKey> for StatVector {
    fn index_mut(&mut self, stat: StatKey) -> &mut f32 {
        &mut self.0[stat.index()]
    }
}

impl Serialize for StatVector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(STAT_COUNT))?;
        for (stat, value) in self.iter() {
            map.serialize_entry(stat.key(), &value)?;
        }
        map.end()
    }
}
