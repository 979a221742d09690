//! # Spatial Index for Fast Box and Ray Queries
//!
//! Spatial hashing over axis-aligned boxes. The union indexes polygon
//! bounds to find the faces of one operand near a face of the other, and
//! vertex positions to find the vertices lying on an open edge.
//!
//! ## Example
//!
//! ```rust,ignore
//! let index = SpatialIndex::from_boxes(&boxes);
//! let near = index.query_box(min, max);
//! let along = index.query_ray(origin, direction);
//! ```

use glam::DVec3;
use std::collections::HashMap;

/// Cell size multiplier for spatial hashing.
/// Larger values = fewer cells but more entries per cell.
const CELL_SIZE_FACTOR: f64 = 2.0;

/// Minimum cell size to avoid too many cells.
const MIN_CELL_SIZE: f64 = 0.05;

/// 3D cell coordinate for spatial hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CellCoord {
    x: i32,
    y: i32,
    z: i32,
}

impl CellCoord {
    /// Creates a cell coordinate from 3D position.
    fn from_position(pos: DVec3, cell_size: f64) -> Self {
        Self {
            x: (pos.x / cell_size).floor() as i32,
            y: (pos.y / cell_size).floor() as i32,
            z: (pos.z / cell_size).floor() as i32,
        }
    }
}

/// Axis-aligned box as `(min, max)` corners.
pub type Aabb = (DVec3, DVec3);

/// Grows a box by `margin` on every side.
pub fn expand((min, max): Aabb, margin: f64) -> Aabb {
    (min - DVec3::splat(margin), max + DVec3::splat(margin))
}

/// True if two boxes share at least one point.
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.0.cmple(b.1).all() && b.0.cmple(a.1).all()
}

/// Smallest box holding every point.
pub fn bounds_of(points: impl IntoIterator<Item = DVec3>) -> Aabb {
    points.into_iter().fold(
        (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
        |(min, max), p| (min.min(p), max.max(p)),
    )
}

/// Spatial index over a fixed list of boxes.
///
/// Uses a hash grid to map 3D space to entry indices. Query results are
/// sorted and free of duplicates.
#[derive(Debug)]
pub struct SpatialIndex {
    /// Hash grid: cell -> entry indices
    grid: HashMap<CellCoord, Vec<usize>>,
    /// Cell size for hashing
    cell_size: f64,
    /// Bounds of all entries
    bounds: Aabb,
}

impl SpatialIndex {
    /// Creates a spatial index over `boxes`.
    ///
    /// The cell size follows the overall extent and the entry count.
    pub fn from_boxes(boxes: &[Aabb]) -> Self {
        let bounds = if boxes.is_empty() {
            (DVec3::ZERO, DVec3::ZERO)
        } else {
            bounds_of(boxes.iter().flat_map(|&(min, max)| [min, max]))
        };

        let extent = bounds.1 - bounds.0;
        let avg_extent = (extent.x + extent.y + extent.z) / 3.0;
        let count = boxes.len().max(1) as f64;
        let cell_size = (avg_extent / count.cbrt() * CELL_SIZE_FACTOR).max(MIN_CELL_SIZE);

        let mut grid: HashMap<CellCoord, Vec<usize>> = HashMap::new();

        for (i, &(min, max)) in boxes.iter().enumerate() {
            let cell_min = CellCoord::from_position(min, cell_size);
            let cell_max = CellCoord::from_position(max, cell_size);

            for cx in cell_min.x..=cell_max.x {
                for cy in cell_min.y..=cell_max.y {
                    for cz in cell_min.z..=cell_max.z {
                        let cell = CellCoord { x: cx, y: cy, z: cz };
                        grid.entry(cell).or_default().push(i);
                    }
                }
            }
        }

        Self {
            grid,
            cell_size,
            bounds,
        }
    }

    /// Creates a spatial index over points.
    pub fn from_points(points: &[DVec3]) -> Self {
        let boxes: Vec<Aabb> = points.iter().map(|&p| (p, p)).collect();
        Self::from_boxes(&boxes)
    }

    /// Bounds of everything indexed.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Entries whose cells touch the box `min..=max`.
    ///
    /// Candidates only: callers test the actual boxes.
    pub fn query_box(&self, min: DVec3, max: DVec3) -> Vec<usize> {
        let (min, max) = (min.max(self.bounds.0), max.min(self.bounds.1));
        if min.cmpgt(max).any() {
            return Vec::new();
        }

        let cell_min = CellCoord::from_position(min, self.cell_size);
        let cell_max = CellCoord::from_position(max, self.cell_size);

        let mut result = Vec::new();
        for cx in cell_min.x..=cell_max.x {
            for cy in cell_min.y..=cell_max.y {
                for cz in cell_min.z..=cell_max.z {
                    let cell = CellCoord { x: cx, y: cy, z: cz };
                    if let Some(entries) = self.grid.get(&cell) {
                        result.extend_from_slice(entries);
                    }
                }
            }
        }

        result.sort_unstable();
        result.dedup();
        result
    }

    /// Entries whose cells the ray `origin + t * direction`, `t >= 0`,
    /// passes through before leaving the indexed bounds.
    ///
    /// Uses a 3D DDA walk over the grid.
    pub fn query_ray(&self, origin: DVec3, direction: DVec3) -> Vec<usize> {
        let mut result = Vec::new();

        let inv_dir = DVec3::new(
            if direction.x.abs() > 1e-10 { 1.0 / direction.x } else { 1e10 },
            if direction.y.abs() > 1e-10 { 1.0 / direction.y } else { 1e10 },
            if direction.z.abs() > 1e-10 { 1.0 / direction.z } else { 1e10 },
        );

        // Slab test against the indexed bounds
        let (lo, hi) = expand(self.bounds, self.cell_size);
        let t0 = (lo - origin) * inv_dir;
        let t1 = (hi - origin) * inv_dir;
        let t_enter = t0.min(t1).max_element().max(0.0);
        let t_exit = t0.max(t1).min_element();
        if t_enter > t_exit {
            return result;
        }

        let start = origin + direction * t_enter;
        let mut current = CellCoord::from_position(start, self.cell_size);

        let step = DVec3::new(
            if direction.x >= 0.0 { 1.0 } else { -1.0 },
            if direction.y >= 0.0 { 1.0 } else { -1.0 },
            if direction.z >= 0.0 { 1.0 } else { -1.0 },
        );

        let t_delta = (inv_dir * self.cell_size).abs();

        let cell_boundary = DVec3::new(
            (current.x as f64 + if step.x > 0.0 { 1.0 } else { 0.0 }) * self.cell_size,
            (current.y as f64 + if step.y > 0.0 { 1.0 } else { 0.0 }) * self.cell_size,
            (current.z as f64 + if step.z > 0.0 { 1.0 } else { 0.0 }) * self.cell_size,
        );

        let mut t_max = (cell_boundary - origin) * inv_dir;

        loop {
            if let Some(entries) = self.grid.get(&current) {
                result.extend_from_slice(entries);
            }

            if t_max.min_element() > t_exit {
                break;
            }

            // Move to next cell
            if t_max.x < t_max.y && t_max.x < t_max.z {
                current.x += step.x as i32;
                t_max.x += t_delta.x;
            } else if t_max.y < t_max.z {
                current.y += step.y as i32;
                t_max.y += t_delta.y;
            } else {
                current.z += step.z as i32;
                t_max.z += t_delta.z;
            }
        }

        result.sort_unstable();
        result.dedup();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_boxes_along_x(count: usize) -> Vec<Aabb> {
        (0..count)
            .map(|i| {
                let min = DVec3::new(i as f64 * 2.0, 0.0, 0.0);
                (min, min + DVec3::ONE)
            })
            .collect()
    }

    #[test]
    fn test_query_box_finds_overlapping_entries() {
        let boxes = unit_boxes_along_x(10);
        let index = SpatialIndex::from_boxes(&boxes);

        let hits = index.query_box(DVec3::new(4.2, 0.2, 0.2), DVec3::new(4.8, 0.8, 0.8));
        assert!(hits.contains(&2));
        assert!(!hits.contains(&9));
    }

    #[test]
    fn test_query_box_outside_bounds_is_empty() {
        let index = SpatialIndex::from_boxes(&unit_boxes_along_x(4));
        assert!(index
            .query_box(DVec3::splat(50.0), DVec3::splat(51.0))
            .is_empty());
    }

    #[test]
    fn test_query_ray_visits_every_box_on_the_line() {
        let boxes = unit_boxes_along_x(10);
        let index = SpatialIndex::from_boxes(&boxes);

        let hits = index.query_ray(DVec3::new(-5.0, 0.5, 0.5), DVec3::X);
        for i in 0..10 {
            assert!(hits.contains(&i), "missed box {i}");
        }

        let behind = index.query_ray(DVec3::new(-5.0, 0.5, 0.5), -DVec3::X);
        assert!(behind.is_empty());
    }

    #[test]
    fn test_query_ray_diagonal_reaches_far_corner() {
        let mut boxes = Vec::new();
        for i in 0..6 {
            let p = DVec3::splat(i as f64);
            boxes.push((p, p + DVec3::splat(0.5)));
        }
        let index = SpatialIndex::from_boxes(&boxes);

        let hits = index.query_ray(DVec3::splat(0.25), DVec3::ONE.normalize());
        assert!(hits.contains(&5));
    }

    #[test]
    fn test_from_points_indexes_positions() {
        let points = [DVec3::ZERO, DVec3::new(3.0, 0.0, 0.0)];
        let index = SpatialIndex::from_points(&points);
        assert_eq!(index.query_box(DVec3::splat(-0.1), DVec3::splat(0.1)), vec![0]);
    }

    #[test]
    fn test_overlaps_counts_touching_boxes() {
        let a = (DVec3::ZERO, DVec3::ONE);
        let b = (DVec3::new(1.0, 0.0, 0.0), DVec3::new(2.0, 1.0, 1.0));
        let c = (DVec3::new(1.5, 0.0, 0.0), DVec3::new(2.0, 1.0, 1.0));
        assert!(overlaps(&a, &b));
        assert!(!overlaps(&a, &c));
        assert!(overlaps(&expand(a, 0.6), &c));
    }
}
