//! Vertex rings and bounding extents.

use crate::error::{SelectError, SelectResult};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// The ordered outline of a region.
///
/// Serializes as `[[x, y], ...]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<[f64; 2]>", into = "Vec<[f64; 2]>")]
pub struct Ring {
    vertices: Vec<Point>,
}

impl Ring {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn push(&mut self, point: Point) {
        self.vertices.push(point);
    }

    /// Reject rings carrying NaN or infinite coordinates.
    pub fn validate(&self) -> SelectResult<()> {
        match self.vertices.iter().position(|p| !p.is_finite()) {
            Some(i) => Err(SelectError::InvalidRing(format!(
                "vertex {} is not finite: ({}, {})",
                i, self.vertices[i].x, self.vertices[i].y
            ))),
            None => Ok(()),
        }
    }

    /// Axis-aligned envelope of all vertices, `None` for an empty ring.
    pub fn extent(&self) -> Option<Rect> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .skip(1)
                .fold(Rect::from_points(first, first), |r, &p| r.union_pt(p)),
        )
    }
}

impl From<Vec<Point>> for Ring {
    fn from(vertices: Vec<Point>) -> Self {
        Self::new(vertices)
    }
}

impl From<Vec<[f64; 2]>> for Ring {
    fn from(coords: Vec<[f64; 2]>) -> Self {
        Self::new(coords.into_iter().map(|[x, y]| Point::new(x, y)).collect())
    }
}

impl From<Ring> for Vec<[f64; 2]> {
    fn from(ring: Ring) -> Self {
        ring.vertices.into_iter().map(|p| [p.x, p.y]).collect()
    }
}

/// Whether `point` lies inside `extent`, borders included.
///
/// This is an extent-against-extent test: the point's own extent is
/// degenerate, so `Rect::intersect(..).area()` would always be zero.
pub fn extent_contains(extent: Rect, point: Point) -> bool {
    extent.x0 <= point.x && point.x <= extent.x1 && extent.y0 <= point.y && point.y <= extent.y1
}
