//! Spot positions and which region currently claims each spot.

mod grid;

pub use grid::{DEFAULT_CELL_SIZE, SpatialGrid};

use crate::color::SerializableColor;
use crate::geometry::Ring;
use crate::region::RegionId;
use crate::style::{MarkerShape, PointStyle};
use crate::template::SpotTemplate;

/// Owns the spot template and the per-spot region claims.
///
/// A spot is claimed by at most one region; a later claim replaces an
/// earlier one.
#[derive(Debug, Clone)]
pub struct PointSet {
    template: Option<SpotTemplate>,
    grid: SpatialGrid,
    origins: Vec<Option<RegionId>>,
}

impl Default for PointSet {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

impl PointSet {
    /// Create an empty point set with no template loaded.
    pub fn new(cell_size: f64) -> Self {
        Self {
            template: None,
            grid: SpatialGrid::empty(cell_size),
            origins: Vec::new(),
        }
    }

    /// Replace the template and drop every claim.
    ///
    /// Templates are validated on construction, so this cannot fail.
    pub fn load(&mut self, template: SpotTemplate) {
        self.grid = SpatialGrid::build(template.spots(), self.grid.cell_size());
        self.origins = vec![None; template.len()];
        self.template = Some(template);
    }

    /// Forget the template (e.g. after a failed fetch).
    pub fn unload(&mut self) {
        self.template = None;
        self.grid = SpatialGrid::empty(self.grid.cell_size());
        self.origins.clear();
    }

    pub fn is_ready(&self) -> bool {
        self.template.is_some()
    }

    pub fn template(&self) -> Option<&SpotTemplate> {
        self.template.as_ref()
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// Ids of spots whose position falls in the envelope of `ring`, ascending.
    ///
    /// Empty for an empty ring or when no template is loaded.
    pub fn query(&self, ring: &Ring) -> Vec<u32> {
        let (Some(template), Some(extent)) = (&self.template, ring.extent()) else {
            return Vec::new();
        };
        self.grid.query(template.spots(), extent)
    }

    /// Mark `ids` as owned by `region`. Out-of-range ids are ignored.
    pub fn claim(&mut self, ids: &[u32], region: RegionId) {
        for &id in ids {
            if let Some(origin) = self.origins.get_mut(id as usize) {
                *origin = Some(region);
            }
        }
    }

    /// Clear every claim held by `region`. Returns how many spots were freed.
    pub fn release(&mut self, region: RegionId) -> usize {
        let mut released = 0;
        for origin in self.origins.iter_mut().filter(|o| **o == Some(region)) {
            *origin = None;
            released += 1;
        }
        released
    }

    /// Drop all claims, keeping the template.
    pub fn release_all(&mut self) {
        self.origins.fill(None);
    }

    /// The region currently claiming spot `id`.
    pub fn origin(&self, id: u32) -> Option<RegionId> {
        self.origins.get(id as usize).copied().flatten()
    }

    /// Ids currently claimed by `region`, ascending.
    pub fn claimed_by(&self, region: RegionId) -> Vec<u32> {
        self.origins
            .iter()
            .enumerate()
            .filter(|(_, o)| **o == Some(region))
            .map(|(i, _)| i as u32)
            .collect()
    }

    /// Render attributes for a claimed spot.
    ///
    /// `color_of` resolves the owning region's fill. Unclaimed spots have no
    /// overlay style.
    pub fn style_for(
        &self,
        id: u32,
        marker: MarkerShape,
        color_of: impl FnOnce(RegionId) -> Option<SerializableColor>,
    ) -> Option<PointStyle> {
        let region = self.origin(id)?;
        Some(PointStyle {
            shape: marker,
            fill: color_of(region)?,
        })
    }
}
