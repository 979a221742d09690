//! # Polygon Prism
//!
//! Extrudes a star-shaped polygon with per-vertex radii along Y.

use super::rings::{center_cap, ring_point, stitch_band, Facing};
use crate::error::MeshError;
use crate::mesh::Mesh;
use config::constants::MIN_SEGMENTS;
use std::f64::consts::TAU;

/// Creates a prism whose cross-section vertex `i` sits at angle
/// `i * 2π / n` and distance `radii[i]` from the Y axis.
///
/// The prism spans `[-height/2, height/2]`. Caps are fanned around the
/// axis, which handles any positive radii since the outline is star-shaped
/// about the origin.
///
/// # Example
///
/// ```rust
/// use configurator_mesh::primitives::create_prism;
///
/// let mesh = create_prism(&[2.0, 3.0, 2.0, 3.0, 2.0, 3.0, 2.0, 3.0], 4.0, true).unwrap();
/// assert!(mesh.is_closed());
/// ```
pub fn create_prism(radii: &[f64], height: f64, sealed: bool) -> Result<Mesh, MeshError> {
    if radii.len() < MIN_SEGMENTS as usize {
        return Err(MeshError::degenerate(format!(
            "Prism needs at least {} sides: {}",
            MIN_SEGMENTS,
            radii.len()
        )));
    }

    if let Some(bad) = radii.iter().find(|r| !r.is_finite() || **r <= 0.0) {
        return Err(MeshError::degenerate(format!(
            "Prism radii must be positive: {}",
            bad
        )));
    }

    if height <= 0.0 {
        return Err(MeshError::degenerate(format!(
            "Prism height must be positive: {}",
            height
        )));
    }

    let sides = radii.len();
    let half = height / 2.0;
    let mut mesh = Mesh::with_capacity(2 * sides + 2, 4 * sides);

    let mut outline = |y: f64| -> Vec<u32> {
        radii
            .iter()
            .enumerate()
            .map(|(i, &r)| {
                let theta = TAU * i as f64 / sides as f64;
                mesh.add_vertex(ring_point(r, theta, y))
            })
            .collect()
    };
    let bottom = outline(-half);
    let top = outline(half);

    stitch_band(&mut mesh, &bottom, &top);

    if sealed {
        center_cap(&mut mesh, &top, half, Facing::Up);
        center_cap(&mut mesh, &bottom, -half, Facing::Down);
    }

    Ok(mesh)
}
