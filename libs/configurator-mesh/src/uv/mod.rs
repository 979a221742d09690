//! # UV Unwrapping
//!
//! Cylindrical (angle, height) texture projection around the Y axis.
//!
//! ## Projection
//!
//! ```text
//! u = (atan2(z, x) + π) / 2π      seam on the -X axis
//! v = (y - min_y) / height * 0.98 + 0.01
//! ```
//!
//! The mesh is unwrapped non-indexed so triangles on either side of the seam
//! never share a vertex, and therefore never share a UV.


use crate::mesh::Mesh;
use config::constants::{approx_zero, UV_FLAT_V, UV_SEAM_THRESHOLD, UV_V_OFFSET, UV_V_SCALE};
use glam::{DVec2, DVec3};
use std::f64::consts::{PI, TAU};
use tracing::debug;

/// Triangles whose U coordinates differ by more than this wrap around the seam.
const SEAM_SPAN: f64 = 0.5;

/// Projects a single point.
///
/// `min_y` and `height` describe the vertical extent of the whole mesh.
/// A collapsed extent (`approx_zero(height)`) maps every point to `v = 0.5`.
///
/// # Example
///
/// ```rust
/// use configurator_mesh::uv::cylindrical_uv;
/// use glam::DVec3;
///
/// let uv = cylindrical_uv(DVec3::new(1.0, 5.0, 0.0), 0.0, 10.0);
/// assert_eq!(uv.x, 0.5);
/// assert!((uv.y - 0.5).abs() < 1e-12);
/// ```
pub fn cylindrical_uv(point: DVec3, min_y: f64, height: f64) -> DVec2 {
    let theta = point.z.atan2(point.x);

    let mut u = (theta + PI) / TAU;
    if u < UV_SEAM_THRESHOLD {
        u += 1.0;
    }
    u %= 1.0;

    let v = if approx_zero(height) {
        UV_FLAT_V
    } else {
        (point.y - min_y) / height * UV_V_SCALE + UV_V_OFFSET
    };

    DVec2::new(u, v)
}

/// Returns a non-indexed copy of `mesh` carrying cylindrical UVs.
///
/// Vertex `3 * t + k` of the result is corner `k` of triangle `t`.
pub fn apply_cylindrical_uvs(mesh: &Mesh) -> Mesh {
    let mut unwrapped = mesh.to_non_indexed();

    let (min, max) = unwrapped.bounding_box();
    let height = max.y - min.y;

    let uvs = unwrapped
        .vertices()
        .iter()
        .map(|v| cylindrical_uv(*v, min.y, height))
        .collect();
    unwrapped.set_uvs(uvs);

    debug!(
        vertices = unwrapped.vertex_count(),
        height, "applied cylindrical uvs"
    );

    unwrapped
}

/// Indices of the triangles whose U range wraps across the seam.
///
/// Returns an empty list for a mesh without UVs.
pub fn seam_straddling_triangles(mesh: &Mesh) -> Vec<usize> {
    let Some(uvs) = mesh.uvs() else {
        return Vec::new();
    };

    mesh.triangles()
        .iter()
        .enumerate()
        .filter(|(_, tri)| {
            let us = tri.map(|i| uvs[i as usize].x);
            let lo = us.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = us.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            hi - lo > SEAM_SPAN
        })
        .map(|(t, _)| t)
        .collect()
}
