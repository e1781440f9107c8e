//! Render attributes handed to the drawing surface.

use crate::color::SerializableColor;
use serde::{Deserialize, Serialize};

/// Marker drawn over a claimed spot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MarkerShape {
    /// A square rotated by a quarter turn.
    Diamond { radius: f64 },
    Circle { radius: f64 },
}

/// How a single claimed spot is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointStyle {
    pub shape: MarkerShape,
    pub fill: SerializableColor,
}

/// How a region outline is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStyle {
    pub stroke: SerializableColor,
    pub stroke_width: f64,
    /// Fill color (None = no fill).
    pub fill: Option<SerializableColor>,
    pub label: String,
}
