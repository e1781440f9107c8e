//! Spot templates and the sources they are fetched from.

use crate::error::{SelectError, SelectResult};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// One sample location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

impl Spot {
    pub fn new(id: u32, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// The immutable set of spot positions for one sample.
///
/// Ids are dense: the spot at index `i` has id `i`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Spot>", into = "Vec<Spot>")]
pub struct SpotTemplate {
    spots: Vec<Spot>,
}

impl SpotTemplate {
    /// Build a template, checking ids are `0..N` in order and positions are finite.
    pub fn new(spots: Vec<Spot>) -> SelectResult<Self> {
        if u32::try_from(spots.len()).is_err() {
            return Err(SelectError::InvalidTemplate(format!(
                "{} spots exceed the id range",
                spots.len()
            )));
        }
        for (i, spot) in spots.iter().enumerate() {
            if spot.id as usize != i {
                return Err(SelectError::InvalidTemplate(format!(
                    "spot at index {} has id {}",
                    i, spot.id
                )));
            }
            if !spot.x.is_finite() || !spot.y.is_finite() {
                return Err(SelectError::InvalidTemplate(format!(
                    "spot {} has a non-finite position ({}, {})",
                    spot.id, spot.x, spot.y
                )));
            }
        }
        Ok(Self { spots })
    }

    /// Build from raw pixel coordinates, scaled to map units.
    ///
    /// The y axis is flipped so image rows grow downwards on the canvas.
    pub fn from_pixel_coords(coords: &[[f64; 2]], m_per_px: f64) -> SelectResult<Self> {
        if !m_per_px.is_finite() || m_per_px <= 0.0 {
            return Err(SelectError::InvalidTemplate(format!(
                "meters per pixel must be positive, got {}",
                m_per_px
            )));
        }
        let spots = coords
            .iter()
            .enumerate()
            .map(|(i, &[x, y])| Spot::new(i as u32, x * m_per_px, -y * m_per_px))
            .collect();
        Self::new(spots)
    }

    pub fn spots(&self) -> &[Spot] {
        &self.spots
    }

    pub fn get(&self, id: u32) -> Option<&Spot> {
        self.spots.get(id as usize)
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    pub fn from_json(json: &str) -> SelectResult<Self> {
        serde_json::from_str(json).map_err(|e| SelectError::InvalidTemplate(e.to_string()))
    }
}

impl TryFrom<Vec<Spot>> for SpotTemplate {
    type Error = SelectError;

    fn try_from(spots: Vec<Spot>) -> SelectResult<Self> {
        Self::new(spots)
    }
}

impl From<SpotTemplate> for Vec<Spot> {
    fn from(template: SpotTemplate) -> Self {
        template.spots
    }
}

/// Where a spot template comes from.
///
/// Fetching is the only asynchronous step of a selection session.
pub trait TemplateSource {
    fn fetch(&self) -> BoxFuture<'_, SelectResult<SpotTemplate>>;
}

/// A template that is already in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticTemplate {
    template: SpotTemplate,
}

impl StaticTemplate {
    pub fn new(template: SpotTemplate) -> Self {
        Self { template }
    }
}

impl TemplateSource for StaticTemplate {
    fn fetch(&self) -> BoxFuture<'_, SelectResult<SpotTemplate>> {
        let template = self.template.clone();
        Box::pin(async move { Ok(template) })
    }
}

/// A JSON file holding `[{"id": 0, "x": .., "y": ..}, ...]`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileTemplate {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileTemplate {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TemplateSource for JsonFileTemplate {
    fn fetch(&self) -> BoxFuture<'_, SelectResult<SpotTemplate>> {
        let path = self.path.clone();
        Box::pin(async move {
            let json = std::fs::read_to_string(&path).map_err(|e| {
                SelectError::InvalidTemplate(format!("Failed to read {}: {}", path.display(), e))
            })?;
            SpotTemplate::from_json(&json)
        })
    }
}
