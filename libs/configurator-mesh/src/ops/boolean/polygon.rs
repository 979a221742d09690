//! # Polygon for Plane Slicing
//!
//! Convex polygon with plane and splitting support.

use super::plane::{Classification, Plane};
use super::spatial_index::{bounds_of, Aabb};
use super::vertex::Vertex;
use config::constants::EPSILON;

// =============================================================================
// SPLIT OUTPUT
// =============================================================================

/// Destination buckets of [`Polygon::split`].
#[derive(Debug, Default)]
pub struct Split {
    /// Coplanar, facing the same way as the plane
    pub coplanar_front: Vec<Polygon>,
    /// Coplanar, facing the opposite way
    pub coplanar_back: Vec<Polygon>,
    pub front: Vec<Polygon>,
    pub back: Vec<Polygon>,
}

impl Split {
    /// Moves every piece, whatever its side, into `out`.
    pub fn drain_into(mut self, out: &mut Vec<Polygon>) {
        out.append(&mut self.coplanar_front);
        out.append(&mut self.coplanar_back);
        out.append(&mut self.front);
        out.append(&mut self.back);
    }
}

// =============================================================================
// POLYGON
// =============================================================================

/// A convex polygon with associated plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Vertices in counter-clockwise order.
    vertices: Vec<Vertex>,
    /// Plane containing this polygon.
    plane: Plane,
}

impl Polygon {
    /// Create polygon from vertices.
    ///
    /// Returns `None` if the first three vertices are collinear.
    pub fn from_vertices(vertices: Vec<Vertex>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }

        let plane = Plane::from_points(&vertices[0], &vertices[1], &vertices[2])?;
        Some(Self { vertices, plane })
    }

    /// Get polygon vertices.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Get polygon plane.
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Axis-aligned bounds of the vertices.
    pub fn bounds(&self) -> Aabb {
        bounds_of(self.vertices.iter().map(|v| v.pos))
    }

    /// Vertex average, inside the polygon since it is convex.
    pub fn centroid(&self) -> Vertex {
        let sum = self
            .vertices
            .iter()
            .fold(glam::DVec3::ZERO, |acc, v| acc + v.pos);
        Vertex::new(sum / self.vertices.len() as f64)
    }

    /// True unless every vertex lies clearly on one side of `plane`.
    ///
    /// Touching the plane with a vertex or an edge counts as meeting it.
    pub fn meets(&self, plane: &Plane) -> bool {
        let mut front = false;
        let mut back = false;

        for v in &self.vertices {
            match plane.classify_point(v) {
                Classification::Front => front = true,
                Classification::Back => back = true,
                _ => return true,
            }
        }

        front && back
    }

    /// Planes through each edge, perpendicular to this polygon.
    ///
    /// Slicing a coplanar polygon by all of them separates the part
    /// covered by this polygon from the rest. Edges too short to define a
    /// direction are skipped.
    pub fn edge_planes(&self) -> impl Iterator<Item = Plane> + '_ {
        let n = self.vertices.len();
        (0..n).filter_map(move |i| {
            let start = self.vertices[i].pos;
            let edge = self.vertices[(i + 1) % n].pos - start;
            let normal = self.plane.normal.cross(edge);
            let length = normal.length();
            (length > EPSILON).then(|| {
                let normal = normal / length;
                Plane::new(normal, normal.dot(start))
            })
        })
    }

    /// Classify this polygon relative to a plane.
    pub fn classify(&self, plane: &Plane) -> Classification {
        let mut front_count = 0;
        let mut back_count = 0;

        for v in &self.vertices {
            match plane.classify_point(v) {
                Classification::Front => front_count += 1,
                Classification::Back => back_count += 1,
                _ => {}
            }
        }

        match (front_count > 0, back_count > 0) {
            (true, true) => Classification::Spanning,
            (true, false) => Classification::Front,
            (false, true) => Classification::Back,
            (false, false) => Classification::Coplanar,
        }
    }

    /// Split polygon by a plane into the matching buckets of `out`.
    ///
    /// Spanning polygons are cut along the plane; both halves keep this
    /// polygon's plane. Pieces with fewer than three vertices are dropped.
    pub fn split(self, plane: &Plane, out: &mut Split) {
        match self.classify(plane) {
            Classification::Coplanar => {
                if self.plane.normal.dot(plane.normal) > 0.0 {
                    out.coplanar_front.push(self);
                } else {
                    out.coplanar_back.push(self);
                }
            }
            Classification::Front => out.front.push(self),
            Classification::Back => out.back.push(self),
            Classification::Spanning => {
                let n = self.vertices.len();
                let mut front_verts = Vec::with_capacity(n + 1);
                let mut back_verts = Vec::with_capacity(n + 1);

                for i in 0..n {
                    let j = (i + 1) % n;
                    let vi = &self.vertices[i];
                    let vj = &self.vertices[j];

                    let ti = plane.classify_point(vi);
                    let tj = plane.classify_point(vj);

                    if ti != Classification::Back {
                        front_verts.push(*vi);
                    }
                    if ti != Classification::Front {
                        back_verts.push(*vi);
                    }

                    // Edge crosses the plane
                    if (ti == Classification::Front && tj == Classification::Back)
                        || (ti == Classification::Back && tj == Classification::Front)
                    {
                        let di = plane.signed_distance(vi);
                        let dj = plane.signed_distance(vj);
                        let intersection = vi.lerp(vj, di / (di - dj));
                        front_verts.push(intersection);
                        back_verts.push(intersection);
                    }
                }

                if front_verts.len() >= 3 {
                    out.front.push(Polygon {
                        vertices: front_verts,
                        plane: self.plane,
                    });
                }
                if back_verts.len() >= 3 {
                    out.back.push(Polygon {
                        vertices: back_verts,
                        plane: self.plane,
                    });
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
