//! Single-slot highlight state.

use crate::region::RegionId;

/// Tracks which region, if any, is emphasized.
///
/// Liveness checks happen in [`crate::RegionSet::highlight`]; this type only
/// holds the slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightController {
    highlighted: Option<RegionId>,
}

impl HighlightController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emphasize `id`, returning the region that lost emphasis.
    pub fn set(&mut self, id: RegionId) -> Option<RegionId> {
        self.highlighted.replace(id).filter(|&prev| prev != id)
    }

    /// Clear the slot, returning the region that lost emphasis.
    pub fn clear(&mut self) -> Option<RegionId> {
        self.highlighted.take()
    }

    /// Clear the slot only if it holds `id`.
    pub fn forget(&mut self, id: RegionId) {
        if self.highlighted == Some(id) {
            self.highlighted = None;
        }
    }

    pub fn highlighted(&self) -> Option<RegionId> {
        self.highlighted
    }

    pub fn is_highlighted(&self, id: RegionId) -> bool {
        self.highlighted == Some(id)
    }
}
