//! # T-Junction Repair
//!
//! Slicing leaves vertices in the middle of a neighbour's edge. The edge on
//! the other side then has no matching half-edge and the surface shows a
//! hairline crack. Each open edge is split at the vertices lying on it.

use super::spatial_index::SpatialIndex;
use crate::mesh::Mesh;
use config::constants::PLANE_EPSILON;
use glam::DVec3;
use std::collections::HashSet;
use tracing::trace;

/// Splitting one edge can open another; a few passes settle every case the
/// union produces.
const MAX_PASSES: usize = 4;

/// Splits open edges at the welded vertices lying on them.
///
/// A triangle with one open edge is fanned from its opposite corner; one
/// with several gets a new vertex at its centroid. Winding is preserved and
/// a closed mesh is returned unchanged.
pub fn repair_t_junctions(mut mesh: Mesh) -> Mesh {
    for pass in 0..MAX_PASSES {
        let (repaired, changed) = split_open_edges(mesh);
        mesh = repaired;
        if changed == 0 {
            break;
        }
        trace!(pass, changed, "split triangles at T-junctions");
    }
    mesh
}

/// Directed edges without an opposite half-edge.
fn open_edges(mesh: &Mesh) -> HashSet<(u32, u32)> {
    let mut edges = HashSet::with_capacity(mesh.triangle_count() * 3);
    for tri in mesh.triangles() {
        for k in 0..3 {
            edges.insert((tri[k], tri[(k + 1) % 3]));
        }
    }

    edges
        .iter()
        .filter(|(a, b)| !edges.contains(&(*b, *a)))
        .copied()
        .collect()
}

/// One repair pass; returns the new mesh and the number of triangles split.
fn split_open_edges(mesh: Mesh) -> (Mesh, usize) {
    let open = open_edges(&mesh);
    if open.is_empty() {
        return (mesh, 0);
    }

    let index = SpatialIndex::from_points(mesh.vertices());
    let mut result = Mesh::with_capacity(mesh.vertex_count(), mesh.triangle_count());
    for &v in mesh.vertices() {
        result.add_vertex(v);
    }

    let mut changed = 0;
    for &tri in mesh.triangles() {
        let mut ring = Vec::with_capacity(3);
        let mut split_edges = Vec::new();

        for k in 0..3 {
            let (u, v) = (tri[k], tri[(k + 1) % 3]);
            ring.push(u);
            if open.contains(&(u, v)) {
                let inner = vertices_on_edge(&mesh, &index, u, v, tri);
                if !inner.is_empty() {
                    split_edges.push(k);
                    ring.extend(inner);
                }
            }
        }

        match split_edges.as_slice() {
            [] => result.add_triangle(tri[0], tri[1], tri[2]),
            [k] => {
                // Fan from the corner opposite the split edge
                let apex = tri[(k + 2) % 3];
                let start = ring.iter().position(|&i| i == apex).unwrap_or(0);
                let n = ring.len();
                for i in 1..n - 1 {
                    result.add_triangle(apex, ring[(start + i) % n], ring[(start + i + 1) % n]);
                }
                changed += 1;
            }
            _ => {
                let [a, b, c] = tri.map(|i| mesh.vertex(i));
                let center = result.add_vertex((a + b + c) / 3.0);
                for i in 0..ring.len() {
                    result.add_triangle(center, ring[i], ring[(i + 1) % ring.len()]);
                }
                changed += 1;
            }
        }
    }

    (result, changed)
}

/// Vertices strictly inside segment `u`-`v`, ordered from `u` to `v`.
fn vertices_on_edge(mesh: &Mesh, index: &SpatialIndex, u: u32, v: u32, tri: [u32; 3]) -> Vec<u32> {
    let start = mesh.vertex(u);
    let end = mesh.vertex(v);
    let along = end - start;
    let length_sq = along.length_squared();
    if length_sq <= PLANE_EPSILON * PLANE_EPSILON {
        return Vec::new();
    }

    let margin = DVec3::splat(PLANE_EPSILON);
    let mut inner: Vec<(f64, u32)> = index
        .query_box(start.min(end) - margin, start.max(end) + margin)
        .into_iter()
        .filter_map(|i| {
            let i = u32::try_from(i).ok()?;
            if tri.contains(&i) {
                return None;
            }
            let p = mesh.vertex(i);
            let t = (p - start).dot(along) / length_sq;
            let foot = start + along * t;
            let clear_of_ends = (p - start).length() > PLANE_EPSILON && (p - end).length() > PLANE_EPSILON;
            (t > 0.0 && t < 1.0 && clear_of_ends && (p - foot).length() < PLANE_EPSILON)
                .then_some((t, i))
        })
        .collect();

    inner.sort_by(|a, b| a.0.total_cmp(&b.0));
    inner.into_iter().map(|(_, i)| i).collect()
}

// =============================================================================
// TESTS
// =============================================================================
