//! # Union Operand
//!
//! One side of a union: its faces as polygons, indexed by bounds.
//!
//! Two queries drive the union:
//! - `slice`: cut a face of the other operand along every plane of this
//!   operand that could cross it, so no piece straddles this surface
//! - `contains`: point-in-solid test by ray crossing parity

use super::plane::{Classification, Plane};
use super::polygon::{Polygon, Split};
use super::spatial_index::{expand, overlaps, Aabb, SpatialIndex};
use super::vertex::Vertex;
use crate::mesh::Mesh;
use config::constants::{EPSILON, PLANE_EPSILON};
use glam::DVec3;

/// Ray directions for parity tests, tried in order until one misses every
/// edge. Skewed so they are never parallel to the axis-aligned faces the
/// primitives produce.
const RAY_DIRECTIONS: [DVec3; 3] = [
    DVec3::new(0.301_511_344, 0.904_534_034, 0.301_511_344),
    DVec3::new(-0.613_940_4, 0.236_918_7, 0.752_937_6),
    DVec3::new(0.426_401_4, -0.639_602_1, -0.639_602_1),
];

/// Barycentric margin below which a hit counts as grazing an edge.
const EDGE_MARGIN: f64 = 1e-9;

// =============================================================================
// OPERAND
// =============================================================================

/// Faces of a closed mesh prepared for slicing and inside tests.
#[derive(Debug)]
pub struct Operand {
    polygons: Vec<Polygon>,
    boxes: Vec<Aabb>,
    index: SpatialIndex,
}

/// Outcome of one ray against one polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Crossing {
    Miss,
    Hit,
    /// Too close to an edge or too parallel to count reliably
    Graze,
}

impl Operand {
    /// Converts a mesh into polygons, skipping zero-area triangles.
    pub fn new(mesh: &Mesh) -> Self {
        let polygons: Vec<Polygon> = (0..mesh.triangle_count())
            .filter_map(|t| {
                let corners = mesh.triangle_positions(t).map(Vertex::new);
                Polygon::from_vertices(corners.to_vec())
            })
            .collect();

        let boxes: Vec<Aabb> = polygons.iter().map(Polygon::bounds).collect();
        let index = SpatialIndex::from_boxes(&boxes);

        Self {
            polygons,
            boxes,
            index,
        }
    }

    /// Faces of this operand.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Bounds of all faces.
    pub fn bounds(&self) -> Aabb {
        self.index.bounds()
    }

    /// Indices of faces whose bounds touch `bounds` grown by the plane band.
    fn near(&self, bounds: Aabb) -> impl Iterator<Item = usize> + '_ {
        let reach = expand(bounds, PLANE_EPSILON);
        self.index
            .query_box(reach.0, reach.1)
            .into_iter()
            .filter(move |&i| overlaps(&self.boxes[i], &reach))
    }

    /// Cuts `polygon` so that no piece crosses this operand's surface.
    ///
    /// A nearby face that reaches the polygon's plane contributes its own
    /// plane. A coplanar face contributes the planes through its edges,
    /// which separates the overlapping part from the rest.
    pub fn slice(&self, polygon: Polygon) -> Vec<Polygon> {
        let plane = *polygon.plane();
        let candidates: Vec<usize> = self.near(polygon.bounds()).collect();

        let mut pieces = vec![polygon];
        for i in candidates {
            let other = &self.polygons[i];
            if other.classify(&plane) == Classification::Coplanar {
                for edge in other.edge_planes() {
                    pieces = split_all(pieces, &edge);
                }
            } else if other.meets(&plane) {
                pieces = split_all(pieces, other.plane());
            }
        }

        pieces
    }

    /// True if `point` lies inside the closed surface.
    ///
    /// Counts crossings of a ray leaving `point`; a ray that grazes an edge
    /// is replaced by the next direction.
    pub fn contains(&self, point: DVec3) -> bool {
        if !overlaps(&(point, point), &expand(self.bounds(), PLANE_EPSILON)) {
            return false;
        }

        let mut crossings = 0;
        for direction in RAY_DIRECTIONS {
            let (count, clean) = self.cast(point, direction);
            crossings = count;
            if clean {
                break;
            }
        }

        crossings % 2 == 1
    }

    /// Counts crossings along one ray; `false` if any hit grazed.
    fn cast(&self, origin: DVec3, direction: DVec3) -> (usize, bool) {
        let mut count = 0;
        let mut clean = true;

        for i in self.index.query_ray(origin, direction) {
            match crossing(&self.polygons[i], origin, direction) {
                Crossing::Hit => count += 1,
                Crossing::Graze => {
                    count += 1;
                    clean = false;
                }
                Crossing::Miss => {}
            }
        }

        (count, clean)
    }
}

/// Splits every piece by `plane`, keeping pieces from all sides.
fn split_all(pieces: Vec<Polygon>, plane: &Plane) -> Vec<Polygon> {
    let mut out = Split::default();
    for piece in pieces {
        piece.split(plane, &mut out);
    }

    let mut result = Vec::new();
    out.drain_into(&mut result);
    result
}

/// Ray against a convex polygon, fan-triangulated (Möller-Trumbore).
fn crossing(polygon: &Polygon, origin: DVec3, direction: DVec3) -> Crossing {
    let plane = polygon.plane();
    let facing = plane.normal.dot(direction);
    if facing.abs() < EPSILON {
        let near_plane = plane.signed_distance(&Vertex::new(origin)).abs() < PLANE_EPSILON;
        return if near_plane { Crossing::Graze } else { Crossing::Miss };
    }

    let vertices = polygon.vertices();
    let apex = vertices[0].pos;
    let mut result = Crossing::Miss;

    for pair in vertices[1..].windows(2) {
        match crossing_triangle([apex, pair[0].pos, pair[1].pos], origin, direction) {
            Crossing::Miss => {}
            Crossing::Hit => return Crossing::Hit,
            Crossing::Graze => result = Crossing::Graze,
        }
    }

    result
}

fn crossing_triangle([a, b, c]: [DVec3; 3], origin: DVec3, direction: DVec3) -> Crossing {
    let e1 = b - a;
    let e2 = c - a;
    let p = direction.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPSILON * e1.length() * e2.length() {
        return Crossing::Miss;
    }

    let inv = 1.0 / det;
    let s = origin - a;
    let u = s.dot(p) * inv;
    if !(-EDGE_MARGIN..=1.0 + EDGE_MARGIN).contains(&u) {
        return Crossing::Miss;
    }

    let q = s.cross(e1);
    let v = direction.dot(q) * inv;
    if v < -EDGE_MARGIN || u + v > 1.0 + EDGE_MARGIN {
        return Crossing::Miss;
    }

    if e2.dot(q) * inv <= 0.0 {
        return Crossing::Miss;
    }

    if u < EDGE_MARGIN || v < EDGE_MARGIN || u + v > 1.0 - EDGE_MARGIN {
        Crossing::Graze
    } else {
        Crossing::Hit
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Closed axis-aligned box from `min` to `max`, wound outward.
    fn box_mesh(min: DVec3, max: DVec3) -> Mesh {
        let mut mesh = Mesh::new();
        for i in 0..8 {
            mesh.add_vertex(DVec3::new(
                if i & 1 == 0 { min.x } else { max.x },
                if i & 2 == 0 { min.y } else { max.y },
                if i & 4 == 0 { min.z } else { max.z },
            ));
        }
        for [a, b, c] in [
            [0, 2, 3],
            [0, 3, 1],
            [4, 5, 7],
            [4, 7, 6],
            [0, 4, 6],
            [0, 6, 2],
            [1, 3, 7],
            [1, 7, 5],
            [0, 1, 5],
            [0, 5, 4],
            [2, 6, 7],
            [2, 7, 3],
        ] {
            mesh.add_triangle(a, b, c);
        }
        mesh
    }

    fn square_at_y(y: f64, half: f64) -> Polygon {
        Polygon::from_vertices(vec![
            Vertex::new(DVec3::new(-half, y, -half)),
            Vertex::new(DVec3::new(-half, y, half)),
            Vertex::new(DVec3::new(half, y, half)),
            Vertex::new(DVec3::new(half, y, -half)),
        ])
        .unwrap()
    }

    #[test]
    fn test_box_fixture_is_closed() {
        assert!(box_mesh(DVec3::ZERO, DVec3::ONE).is_closed());
    }

    #[test]
    fn test_contains_inside_and_outside() {
        let solid = Operand::new(&box_mesh(DVec3::splat(-1.0), DVec3::ONE));

        assert!(solid.contains(DVec3::ZERO));
        assert!(solid.contains(DVec3::new(0.99, -0.99, 0.5)));
        assert!(!solid.contains(DVec3::new(1.01, 0.0, 0.0)));
        assert!(!solid.contains(DVec3::new(0.0, 5.0, 0.0)));
    }

    #[test]
    fn test_contains_on_face_diagonal() {
        // Points whose rays start right under a face diagonal
        let solid = Operand::new(&box_mesh(DVec3::splat(-1.0), DVec3::ONE));
        for t in [-0.5, 0.0, 0.5] {
            assert!(solid.contains(DVec3::new(t, t, 0.0)));
            assert!(solid.contains(DVec3::new(t, 0.999, t)));
        }
    }

    #[test]
    fn test_slice_cuts_along_crossing_faces() {
        // Horizontal square crossing a unit box: the part inside the box is
        // separated from the part outside it.
        let solid = Operand::new(&box_mesh(DVec3::ZERO, DVec3::ONE));
        let pieces = solid.slice(square_at_y(0.5, 2.0));

        assert!(pieces.len() > 1);
        for piece in &pieces {
            let (min, max) = piece.bounds();
            let inside_x = min.x >= -1e-9 && max.x <= 1.0 + 1e-9;
            let outside_x = max.x <= 1e-9 || min.x >= 1.0 - 1e-9;
            assert!(inside_x || outside_x, "piece straddles x faces: {min} {max}");
        }
    }

    #[test]
    fn test_slice_separates_coplanar_overlap() {
        // Square lying on the box top is cut along the box's top edges
        let solid = Operand::new(&box_mesh(DVec3::ZERO, DVec3::ONE));
        let pieces = solid.slice(square_at_y(1.0, 2.0));

        let covered: Vec<&Polygon> = pieces
            .iter()
            .filter(|piece| {
                let c = piece.centroid().pos;
                (0.0..=1.0).contains(&c.x) && (0.0..=1.0).contains(&c.z)
            })
            .collect();
        assert!(!covered.is_empty());
        for piece in covered {
            let (min, max) = piece.bounds();
            assert!(min.x >= -1e-9 && max.x <= 1.0 + 1e-9);
            assert!(min.z >= -1e-9 && max.z <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn test_slice_leaves_distant_polygon_whole() {
        let solid = Operand::new(&box_mesh(DVec3::ZERO, DVec3::ONE));
        let pieces = solid.slice(square_at_y(3.0, 0.5));
        assert_eq!(pieces.len(), 1);
    }
}
