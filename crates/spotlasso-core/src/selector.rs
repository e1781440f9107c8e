//! Region lifecycle and spot selection.

use crate::color::SerializableColor;
use crate::config::SelectorConfig;
use crate::error::{SelectError, SelectResult};
use crate::geometry::Ring;
use crate::highlight::HighlightController;
use crate::points::PointSet;
use crate::region::{Region, RegionId};
use crate::style::{PointStyle, RegionStyle};
use crate::template::{Spot, SpotTemplate, TemplateSource};
use kurbo::Point;

/// Drawing state of the session. At most one region is drafted at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DraftState {
    #[default]
    Idle,
    /// Vertices are being placed and nothing is selected yet.
    Drafting { vertices: Ring },
}

/// The live regions of a session and the spots they select.
#[derive(Debug, Clone)]
pub struct RegionSet {
    config: SelectorConfig,
    points: PointSet,
    /// Live regions in creation order.
    regions: Vec<Region>,
    draft: DraftState,
    highlight: HighlightController,
    next_id: u64,
}

impl Default for RegionSet {
    fn default() -> Self {
        Self::with_config(SelectorConfig::default())
    }
}

impl RegionSet {
    /// Create an empty session, rejecting an invalid `config`.
    pub fn new(config: SelectorConfig) -> SelectResult<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: SelectorConfig) -> Self {
        Self {
            points: PointSet::new(config.grid_cell_size),
            config,
            regions: Vec::new(),
            draft: DraftState::Idle,
            highlight: HighlightController::new(),
            next_id: 1,
        }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    /// Whether a spot template is loaded and regions may be committed.
    pub fn is_ready(&self) -> bool {
        self.points.is_ready()
    }

    /// Replace the spot template, tearing down every region.
    pub fn load_template(&mut self, template: SpotTemplate) {
        self.clear();
        log::info!("Loaded spot template with {} spots", template.len());
        self.points.load(template);
    }

    /// Validate raw spots and load them as the template.
    pub fn load_spots(&mut self, spots: Vec<Spot>) -> SelectResult<()> {
        let template = SpotTemplate::new(spots)?;
        self.load_template(template);
        Ok(())
    }

    /// Fetch a template and load it.
    ///
    /// The session is emptied before the fetch; if the fetch fails it stays
    /// empty and not ready until the caller tries again.
    pub async fn load_template_from(&mut self, source: &dyn TemplateSource) -> SelectResult<()> {
        self.clear();
        self.points.unload();
        match source.fetch().await {
            Ok(template) => {
                self.load_template(template);
                Ok(())
            }
            Err(e) => {
                log::warn!("Spot template fetch failed: {}", e);
                Err(e)
            }
        }
    }

    /// Remove every region and abandon any draft. The template is kept.
    pub fn clear(&mut self) {
        if !self.regions.is_empty() {
            log::info!("Clearing {} regions", self.regions.len());
        }
        self.regions.clear();
        self.points.release_all();
        self.highlight.clear();
        self.draft = DraftState::Idle;
    }

    // --- Drafting ---

    /// Start drawing a new region.
    pub fn begin_draw(&mut self) -> SelectResult<()> {
        if self.is_drafting() {
            return Err(SelectError::AlreadyDrafting);
        }
        self.draft = DraftState::Drafting {
            vertices: Ring::default(),
        };
        Ok(())
    }

    /// Append a vertex to the region being drawn.
    pub fn add_draft_vertex(&mut self, point: Point) -> SelectResult<()> {
        match &mut self.draft {
            DraftState::Drafting { vertices } => {
                vertices.push(point);
                Ok(())
            }
            DraftState::Idle => Err(SelectError::InvalidState(
                "no region is being drawn".to_string(),
            )),
        }
    }

    /// Abandon the current draft. Returns false if nothing was being drawn.
    pub fn cancel_draw(&mut self) -> bool {
        let was_drafting = self.is_drafting();
        self.draft = DraftState::Idle;
        was_drafting
    }

    pub fn is_drafting(&self) -> bool {
        matches!(self.draft, DraftState::Drafting { .. })
    }

    pub fn draft(&self) -> &DraftState {
        &self.draft
    }

    /// Commit the region being drawn with `vertices` as its outline.
    ///
    /// The new region gets a fresh id, the next palette color and an empty
    /// name, and claims every spot inside its envelope. On error the draft is
    /// kept so the commit can be retried.
    pub fn commit(&mut self, vertices: impl Into<Ring>) -> SelectResult<RegionId> {
        if !self.is_drafting() {
            return Err(SelectError::InvalidState(
                "commit without a region being drawn".to_string(),
            ));
        }
        let vertices = vertices.into();
        vertices.validate()?;
        if !self.is_ready() {
            return Err(SelectError::NotReady);
        }

        let id = RegionId(self.next_id);
        self.next_id += 1;
        let color = self.config.palette.pick(self.regions.len());
        let owned = self.points.query(&vertices);
        self.points.claim(&owned, id);
        log::debug!("Committed region {} selecting {} spots", id, owned.len());

        self.regions.push(Region {
            id,
            name: String::new(),
            color,
            vertices,
            owned,
        });
        self.draft = DraftState::Idle;
        Ok(id)
    }

    /// Commit using the vertices accumulated with [`Self::add_draft_vertex`].
    pub fn commit_draft(&mut self) -> SelectResult<RegionId> {
        let vertices = match &self.draft {
            DraftState::Drafting { vertices } => vertices.clone(),
            DraftState::Idle => {
                return Err(SelectError::InvalidState(
                    "commit without a region being drawn".to_string(),
                ));
            }
        };
        self.commit(vertices)
    }

    // --- Editing committed regions ---

    /// Index of a live region. Ids minted earlier but no longer live are
    /// reported as a state error, ids never minted as not found.
    fn live_index(&self, id: RegionId) -> SelectResult<usize> {
        match self.regions.iter().position(|r| r.id == id) {
            Some(i) => Ok(i),
            None if id.0 > 0 && id.0 < self.next_id => Err(SelectError::InvalidState(format!(
                "region {} is no longer live",
                id
            ))),
            None => Err(SelectError::NotFound(id)),
        }
    }

    /// Replace a region's outline and recompute its selection.
    ///
    /// The old claim is released before the new one is made, so spots left
    /// outside the new outline lose their owner.
    pub fn reshape(&mut self, id: RegionId, vertices: impl Into<Ring>) -> SelectResult<()> {
        let index = self.live_index(id)?;
        let vertices = vertices.into();
        vertices.validate()?;

        self.points.release(id);
        let owned = self.points.query(&vertices);
        self.points.claim(&owned, id);
        log::debug!("Reshaped region {} now selecting {} spots", id, owned.len());

        let region = &mut self.regions[index];
        region.vertices = vertices;
        region.owned = owned;
        Ok(())
    }

    pub fn rename(&mut self, id: RegionId, name: impl Into<String>) -> SelectResult<()> {
        let index = self.live_index(id)?;
        self.regions[index].name = name.into();
        Ok(())
    }

    pub fn recolor(&mut self, id: RegionId, color: SerializableColor) -> SelectResult<()> {
        let index = self.live_index(id)?;
        self.regions[index].color = color;
        Ok(())
    }

    /// Delete a region and free its spots.
    pub fn delete(&mut self, id: RegionId) -> SelectResult<Region> {
        let index = self
            .regions
            .iter()
            .position(|r| r.id == id)
            .ok_or(SelectError::NotFound(id))?;
        let released = self.points.release(id);
        self.highlight.forget(id);
        log::debug!("Deleted region {} releasing {} spots", id, released);
        Ok(self.regions.remove(index))
    }

    // --- Highlight ---

    /// Emphasize one region; any previous emphasis is dropped.
    pub fn highlight(&mut self, id: RegionId) -> SelectResult<()> {
        if self.region(id).is_none() {
            return Err(SelectError::NotFound(id));
        }
        self.highlight.set(id);
        Ok(())
    }

    pub fn unhighlight(&mut self) {
        self.highlight.clear();
    }

    pub fn highlighted(&self) -> Option<RegionId> {
        self.highlight.highlighted()
    }

    // --- Queries ---

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    /// The region at `index` in creation order.
    pub fn region_at(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    pub fn index_of(&self, id: RegionId) -> Option<usize> {
        self.regions.iter().position(|r| r.id == id)
    }

    /// Live regions in creation order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Names of live regions in creation order.
    pub fn region_names(&self) -> Vec<String> {
        self.regions.iter().map(|r| r.name.clone()).collect()
    }

    /// Per-spot name of the owning region, `""` for unclaimed spots.
    pub fn selection_labels(&self) -> Vec<String> {
        (0..self.points.len() as u32)
            .map(|id| {
                self.points
                    .origin(id)
                    .and_then(|r| self.region(r))
                    .map(|r| r.name.clone())
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Overlay style for spot `id`, `None` if unclaimed.
    pub fn point_style(&self, id: u32) -> Option<PointStyle> {
        self.points
            .style_for(id, self.config.marker, |r| self.region(r).map(|r| r.color))
    }

    /// Outline style for a region, taking the highlight into account.
    pub fn region_style(&self, id: RegionId) -> Option<RegionStyle> {
        let region = self.region(id)?;
        let style = if self.highlight.is_highlighted(id) {
            RegionStyle {
                stroke: self.config.highlight_stroke,
                stroke_width: self.config.stroke_width,
                fill: Some(self.config.highlight_fill),
                label: region.name.clone(),
            }
        } else {
            RegionStyle {
                stroke: region.color,
                stroke_width: self.config.stroke_width,
                fill: None,
                label: region.name.clone(),
            }
        };
        Some(style)
    }
}
