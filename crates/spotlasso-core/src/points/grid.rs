//! Uniform grid over spot positions.

use crate::geometry::extent_contains;
use crate::template::Spot;
use kurbo::{Point, Rect};
use std::collections::HashMap;

/// Default grid cell edge length, in map units.
pub const DEFAULT_CELL_SIZE: f64 = 64.0;

type Cell = (i64, i64);

/// Buckets spot ids by the grid cell their position falls in.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f64,
    cells: HashMap<Cell, Vec<u32>>,
}

impl SpatialGrid {
    /// Build a grid over `spots`. `cell_size` must be finite and positive.
    pub fn build(spots: &[Spot], cell_size: f64) -> Self {
        let mut grid = Self {
            cell_size,
            cells: HashMap::new(),
        };
        for spot in spots {
            let cell = grid.cell_of(spot.position());
            grid.cells.entry(cell).or_default().push(spot.id);
        }
        grid
    }

    pub fn empty(cell_size: f64) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    fn cell_of(&self, p: Point) -> Cell {
        (
            (p.x / self.cell_size).floor() as i64,
            (p.y / self.cell_size).floor() as i64,
        )
    }

    /// Ids of spots inside `extent` (borders included), ascending.
    pub fn query(&self, spots: &[Spot], extent: Rect) -> Vec<u32> {
        let (cx0, cy0) = self.cell_of(Point::new(extent.x0, extent.y0));
        let (cx1, cy1) = self.cell_of(Point::new(extent.x1, extent.y1));
        let covered = (cx1 as i128 - cx0 as i128 + 1) * (cy1 as i128 - cy0 as i128 + 1);

        let mut ids: Vec<u32> = if covered > self.cells.len() as i128 {
            // Extent is large relative to the populated area: scan instead.
            spots
                .iter()
                .filter(|s| extent_contains(extent, s.position()))
                .map(|s| s.id)
                .collect()
        } else {
            let mut ids = Vec::new();
            for cx in cx0..=cx1 {
                for cy in cy0..=cy1 {
                    let Some(bucket) = self.cells.get(&(cx, cy)) else {
                        continue;
                    };
                    ids.extend(bucket.iter().copied().filter(|&id| {
                        spots
                            .get(id as usize)
                            .is_some_and(|s| extent_contains(extent, s.position()))
                    }));
                }
            }
            ids
        };
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spots(coords: &[(f64, f64)]) -> Vec<Spot> {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Spot::new(i as u32, x, y))
            .collect()
    }

    fn linear(spots: &[Spot], extent: Rect) -> Vec<u32> {
        spots
            .iter()
            .filter(|s| extent_contains(extent, s.position()))
            .map(|s| s.id)
            .collect()
    }

    #[test]
    fn test_query_matches_linear_scan() {
        let mut coords = Vec::new();
        for i in 0..40 {
            for j in 0..40 {
                coords.push((i as f64 * 3.7 - 50.0, j as f64 * 2.3 - 20.0));
            }
        }
        let spots = spots(&coords);
        let grid = SpatialGrid::build(&spots, 8.0);

        let extents = [
            Rect::new(-10.0, -10.0, 10.0, 10.0),
            Rect::new(-50.0, -20.0, -50.0, -20.0),
            Rect::new(0.0, 0.0, 1000.0, 1000.0),
            Rect::new(-3.7, 2.3, 7.4, 4.6),
            Rect::new(500.0, 500.0, 600.0, 600.0),
        ];
        for extent in extents {
            assert_eq!(grid.query(&spots, extent), linear(&spots, extent), "{:?}", extent);
        }
    }

    #[test]
    fn test_query_on_cell_borders() {
        let spots = spots(&[(0.0, 0.0), (8.0, 8.0), (16.0, 0.0)]);
        let grid = SpatialGrid::build(&spots, 8.0);
        assert_eq!(grid.query(&spots, Rect::new(0.0, 0.0, 8.0, 8.0)), vec![0, 1]);
        assert_eq!(grid.query(&spots, Rect::new(8.0, 0.0, 16.0, 0.0)), vec![2]);
    }

    #[test]
    fn test_empty_grid() {
        let grid = SpatialGrid::empty(DEFAULT_CELL_SIZE);
        assert!(grid.query(&[], Rect::new(0.0, 0.0, 1.0, 1.0)).is_empty());
    }
}
