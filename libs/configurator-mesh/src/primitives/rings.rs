//! # Ring Stitching
//!
//! Helpers shared by the revolved primitives. A ring is a closed loop of
//! vertex indices ordered by increasing angle; a single-index ring is a pole.
//!
//! Angles run from +Z towards +X (`x = r sin θ`, `z = r cos θ`), so rings of
//! equal radius, height and segment count coincide exactly across primitives.

use crate::mesh::Mesh;
use glam::DVec3;
use std::f64::consts::TAU;

/// Which way a flat cap faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Up,
    Down,
}

/// Position at angle `theta` on a circle of `radius` at height `y`.
#[inline]
pub fn ring_point(radius: f64, theta: f64, y: f64) -> DVec3 {
    DVec3::new(radius * theta.sin(), y, radius * theta.cos())
}

/// Adds a ring of `segments` evenly spaced vertices.
pub fn add_ring(mesh: &mut Mesh, radius: f64, y: f64, segments: u32) -> Vec<u32> {
    (0..segments)
        .map(|j| {
            let theta = TAU * f64::from(j) / f64::from(segments);
            mesh.add_vertex(ring_point(radius, theta, y))
        })
        .collect()
}

/// Connects two rings with outward-facing triangles.
///
/// `lower` sits below `upper`. Either ring may be a pole.
pub fn stitch_band(mesh: &mut Mesh, lower: &[u32], upper: &[u32]) {
    let n = lower.len().max(upper.len());

    for j in 0..n {
        let k = (j + 1) % n;
        match (lower.len(), upper.len()) {
            (_, 1) => mesh.add_triangle(lower[j], lower[k], upper[0]),
            (1, _) => mesh.add_triangle(lower[0], upper[k], upper[j]),
            _ => {
                mesh.add_triangle(lower[j], lower[k], upper[k]);
                mesh.add_triangle(lower[j], upper[k], upper[j]);
            }
        }
    }
}

/// Closes a convex ring with a triangle fan anchored at its first vertex.
pub fn fan_cap(mesh: &mut Mesh, ring: &[u32], facing: Facing) {
    for j in 1..ring.len().saturating_sub(1) {
        match facing {
            Facing::Up => mesh.add_triangle(ring[0], ring[j], ring[j + 1]),
            Facing::Down => mesh.add_triangle(ring[0], ring[j + 1], ring[j]),
        }
    }
}

/// Closes any star-shaped ring with a fan around a new center vertex.
pub fn center_cap(mesh: &mut Mesh, ring: &[u32], y: f64, facing: Facing) {
    let center = mesh.add_vertex(DVec3::new(0.0, y, 0.0));
    let n = ring.len();

    for j in 0..n {
        let k = (j + 1) % n;
        match facing {
            Facing::Up => mesh.add_triangle(center, ring[j], ring[k]),
            Facing::Down => mesh.add_triangle(center, ring[k], ring[j]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_normal(mesh: &Mesh, index: usize) -> DVec3 {
        let [a, b, c] = mesh.triangle_positions(index);
        (b - a).cross(c - a)
    }

    #[test]
    fn test_ring_starts_on_positive_z() {
        let mut mesh = Mesh::new();
        let ring = add_ring(&mut mesh, 2.0, 1.0, 4);
        assert_eq!(ring.len(), 4);
        assert!((mesh.vertex(ring[0]) - DVec3::new(0.0, 1.0, 2.0)).length() < 1e-12);
        assert!((mesh.vertex(ring[1]) - DVec3::new(2.0, 1.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_band_faces_outward() {
        let mut mesh = Mesh::new();
        let lower = add_ring(&mut mesh, 1.0, 0.0, 8);
        let upper = add_ring(&mut mesh, 1.0, 1.0, 8);
        stitch_band(&mut mesh, &lower, &upper);

        assert_eq!(mesh.triangle_count(), 16);
        for t in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle_positions(t);
            let centroid = (a + b + c) / 3.0;
            let radial = DVec3::new(centroid.x, 0.0, centroid.z);
            assert!(triangle_normal(&mesh, t).dot(radial) > 0.0);
        }
    }

    #[test]
    fn test_band_to_pole_has_one_triangle_per_segment() {
        let mut mesh = Mesh::new();
        let lower = add_ring(&mut mesh, 1.0, 0.0, 6);
        let pole = vec![mesh.add_vertex(DVec3::Y)];
        stitch_band(&mut mesh, &lower, &pole);
        assert_eq!(mesh.triangle_count(), 6);
        assert!(mesh.validate());
    }

    #[test]
    fn test_fan_cap_facing() {
        let mut mesh = Mesh::new();
        let ring = add_ring(&mut mesh, 1.0, 0.0, 6);
        fan_cap(&mut mesh, &ring, Facing::Up);
        fan_cap(&mut mesh, &ring, Facing::Down);

        assert_eq!(mesh.triangle_count(), 8);
        assert!(triangle_normal(&mesh, 0).y > 0.0);
        assert!(triangle_normal(&mesh, 4).y < 0.0);
    }

    #[test]
    fn test_center_cap_covers_every_edge() {
        let mut mesh = Mesh::new();
        let ring = add_ring(&mut mesh, 1.0, 0.0, 5);
        center_cap(&mut mesh, &ring, 0.0, Facing::Down);
        assert_eq!(mesh.triangle_count(), 5);
        assert!(triangle_normal(&mesh, 0).y < 0.0);
    }
}
