//! # Boolean Operations (CSG)
//!
//! Constructive Solid Geometry addition by plane slicing.
//!
//! ## Algorithm
//!
//! Faces of one operand that lie outside the other operand's bounding box
//! cannot touch it and pass through untouched. Faces in the overlap band are
//! sliced along every nearby plane of the other operand, then each piece is
//! kept or dropped by testing a point just off its surface against the
//! other solid (ray crossing parity, accelerated by a spatial hash):
//!
//! - a piece of A survives if the point in front of it is outside B
//! - a piece of B survives if the points on both sides are outside A
//!
//! So coincident faces pointing the same way are kept once, and touching
//! faces of the two operands that face opposite ways are removed: sealed
//! volumes stacked end to end merge into one surface. After welding, open
//! edges are split at the vertices lying on them so the result has no
//! T-junction cracks.
//!
//! ## Example
//!
//! ```rust
//! use configurator_mesh::ops::boolean::union;
//! use configurator_mesh::primitives::create_shell;
//! use glam::DVec3;
//!
//! let a = create_shell(1.0, 2.0, 8, true).unwrap();
//! let mut b = a.clone();
//! b.translate(DVec3::new(0.5, 0.0, 0.0));
//! let merged = union(&a, &b);
//! assert!(merged.is_closed());
//! ```

mod operand;
mod plane;
mod polygon;
mod repair;
mod spatial_index;
mod vertex;


use crate::error::MeshError;
use crate::mesh::Mesh;
use crate::primitives::Volume;
use config::constants::PLANE_EPSILON;
use glam::DVec3;
use operand::Operand;
use polygon::Polygon;
use repair::repair_t_junctions;
use spatial_index::{expand, overlaps};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Distance from a piece at which its sides are sampled.
const SAMPLE_OFFSET: f64 = 10.0 * PLANE_EPSILON;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Compute union of two meshes.
///
/// Both meshes should be closed and consistently wound. Degenerate input
/// never panics but may produce a visually wrong surface.
///
/// ## Fast paths
///
/// - An empty operand yields a copy of the other
/// - An operand without thickness encloses no volume and contributes nothing
/// - Operands with disjoint bounding boxes are concatenated
pub fn union(a: &Mesh, b: &Mesh) -> Mesh {
    if a.triangle_count() == 0 {
        return b.clone();
    }
    if b.triangle_count() == 0 {
        return a.clone();
    }

    match (is_flat(a), is_flat(b)) {
        (true, false) => {
            trace!("union operand A has no thickness, keeping B");
            return b.clone();
        }
        (false, true) => {
            trace!("union operand B has no thickness, keeping A");
            return a.clone();
        }
        (true, true) | (false, false) => {}
    }

    if boxes_disjoint(a, b) {
        trace!("union operands are disjoint, concatenating");
        let mut result = a.clone();
        result.merge(b);
        return result;
    }

    let lhs = Operand::new(a);
    let rhs = Operand::new(b);
    let mut kept = Vec::with_capacity(lhs.polygons().len() + rhs.polygons().len());

    let band_a = carve(&lhs, &rhs, &mut kept, |centroid, normal| {
        !rhs.contains(centroid + normal * SAMPLE_OFFSET)
    });
    let band_b = carve(&rhs, &lhs, &mut kept, |centroid, normal| {
        !lhs.contains(centroid + normal * SAMPLE_OFFSET)
            && !lhs.contains(centroid - normal * SAMPLE_OFFSET)
    });

    trace!(
        band_a,
        band_b,
        faces_a = lhs.polygons().len(),
        faces_b = rhs.polygons().len(),
        "sliced overlap band"
    );

    repair_t_junctions(polygons_to_mesh(&kept))
}

/// Merges an ordered list of volumes by left-folding [`union`]:
/// `((v0 ∪ v1) ∪ v2) ∪ ...`.
///
/// A single volume is returned unchanged.
///
/// # Errors
///
/// Returns [`MeshError::EmptyComposition`] for an empty list.
pub fn compose(volumes: Vec<Volume>) -> Result<Mesh, MeshError> {
    let count = volumes.len();
    let mut iter = volumes.into_iter();
    let first = iter.next().ok_or(MeshError::EmptyComposition)?;

    let composite = iter.fold(first.mesh, |acc, volume| union(&acc, &volume.mesh));

    debug!(
        volumes = count,
        triangles = composite.triangle_count(),
        "composed volumes"
    );

    Ok(composite)
}

// =============================================================================
// SLICING
// =============================================================================

/// Moves the faces of `source` that survive against `other` into `kept`.
///
/// Faces clear of `other`'s bounds are kept whole. Faces in the overlap
/// band are sliced by `other` and each piece is kept when `keep` accepts
/// its centroid and normal. Returns the number of faces in the band.
fn carve(
    source: &Operand,
    other: &Operand,
    kept: &mut Vec<Polygon>,
    keep: impl Fn(DVec3, DVec3) -> bool,
) -> usize {
    let reach = expand(other.bounds(), PLANE_EPSILON);
    let mut band = 0;

    for polygon in source.polygons() {
        if !overlaps(&polygon.bounds(), &reach) {
            kept.push(polygon.clone());
            continue;
        }

        band += 1;
        for piece in other.slice(polygon.clone()) {
            if keep(piece.centroid().pos, piece.plane().normal) {
                kept.push(piece);
            }
        }
    }

    band
}

// =============================================================================
// CONVERSION HELPERS
// =============================================================================

/// Convert list of polygons back to an indexed mesh.
///
/// Polygons are fan-triangulated and vertices welded on the
/// [`WELD_SCALE`](config::constants::WELD_SCALE) grid. Triangles that
/// collapse during welding are dropped.
fn polygons_to_mesh(polygons: &[Polygon]) -> Mesh {
    let mut mesh = Mesh::new();
    let mut welded: HashMap<[i64; 3], u32> = HashMap::new();

    for poly in polygons {
        let indices: Vec<u32> = poly
            .vertices()
            .iter()
            .map(|v| {
                *welded
                    .entry(v.weld_key())
                    .or_insert_with(|| mesh.add_vertex(v.pos))
            })
            .collect();

        // Fan triangulation
        for i in 1..indices.len().saturating_sub(1) {
            let tri = [indices[0], indices[i], indices[i + 1]];
            if tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2] {
                mesh.add_triangle(tri[0], tri[1], tri[2]);
            }
        }
    }

    mesh
}

/// True if the mesh has no extent along some axis.
fn is_flat(mesh: &Mesh) -> bool {
    let (min, max) = mesh.bounding_box();
    (max - min).min_element() < PLANE_EPSILON
}

/// True if the bounding boxes are separated by more than the coplanar band.
fn boxes_disjoint(a: &Mesh, b: &Mesh) -> bool {
    let (a_min, a_max) = a.bounding_box();
    let (b_min, b_max) = b.bounding_box();
    (a_min - b_max).max_element() > PLANE_EPSILON || (b_min - a_max).max_element() > PLANE_EPSILON
}
