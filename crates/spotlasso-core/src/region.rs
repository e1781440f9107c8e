//! Region records.

use crate::color::SerializableColor;
use crate::geometry::Ring;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Session-scoped region identifier. Minted in increasing order, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub u64);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A committed region.
///
/// `owned` is always the containment query of `vertices` at the time of the
/// last commit or reshape; it is never edited on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub(crate) id: RegionId,
    pub(crate) name: String,
    pub(crate) color: SerializableColor,
    pub(crate) vertices: Ring,
    pub(crate) owned: Vec<u32>,
}

impl Region {
    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> SerializableColor {
        self.color
    }

    pub fn vertices(&self) -> &Ring {
        &self.vertices
    }

    /// Spot ids selected by this region, ascending.
    pub fn owned_ids(&self) -> &[u32] {
        &self.owned
    }
}
