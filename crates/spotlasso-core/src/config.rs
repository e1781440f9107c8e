//! Engine configuration.

use crate::color::{ACCENT, Palette, SerializableColor};
use crate::error::{SelectError, SelectResult};
use crate::points::DEFAULT_CELL_SIZE;
use crate::style::MarkerShape;
use serde::{Deserialize, Serialize};

/// Tunables for a selection session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Colors assigned to new regions in creation order.
    pub palette: Palette,
    /// Edge length of the spatial index cells, in map units.
    pub grid_cell_size: f64,
    /// Marker drawn over claimed spots.
    pub marker: MarkerShape,
    /// Outline width for regions.
    pub stroke_width: f64,
    /// Outline color of the emphasized region.
    pub highlight_stroke: SerializableColor,
    /// Fill of the emphasized region.
    pub highlight_fill: SerializableColor,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            grid_cell_size: DEFAULT_CELL_SIZE,
            marker: MarkerShape::Diamond { radius: 5.0 },
            stroke_width: 2.0,
            highlight_stroke: ACCENT,
            highlight_fill: SerializableColor::white().with_alpha(26),
        }
    }
}

impl SelectorConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> SelectResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SelectError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SelectResult<()> {
        if !self.grid_cell_size.is_finite() || self.grid_cell_size <= 0.0 {
            return Err(SelectError::InvalidConfig(format!(
                "grid cell size must be positive, got {}",
                self.grid_cell_size
            )));
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(SelectError::InvalidConfig(format!(
                "stroke width must be non-negative, got {}",
                self.stroke_width
            )));
        }
        Ok(())
    }
}
