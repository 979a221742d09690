//! # Dome Caps
//!
//! Hemispherical caps using latitude/longitude tessellation, plus the
//! squash-and-place transform that seats them on a body.

use super::rings::{add_ring, fan_cap, stitch_band, Facing};
use crate::error::MeshError;
use crate::mesh::Mesh;
use config::constants::MIN_SEGMENTS;
use glam::{DMat4, DVec3};
use std::f64::consts::FRAC_PI_2;

/// Which half of the sphere a dome covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    /// `y >= 0`, pole at `+radius`
    Upper,
    /// `y <= 0`, pole at `-radius`
    Lower,
}

/// Creates a hemispherical dome with its rim on the plane `y = 0`.
///
/// # Arguments
///
/// * `radius` - Sphere radius
/// * `width_segments` - Segments around the Y axis
/// * `height_segments` - Latitude bands from the pole to the rim
/// * `hemisphere` - Upper or lower half
/// * `sealed` - Close the rim with a flat disc
///
/// # Algorithm
///
/// - Ring 0 is the single pole vertex
/// - Ring k sits at polar angle `k * (π/2) / height_segments`
/// - The last ring lies exactly on `y = 0` with the full radius
///
/// # Example
///
/// ```rust
/// use configurator_mesh::primitives::{create_dome, Hemisphere};
///
/// let dome = create_dome(5.0, 64, 32, Hemisphere::Upper, true).unwrap();
/// assert!(dome.is_closed());
/// assert_eq!(dome.bounding_box().1.y, 5.0);
/// ```
pub fn create_dome(
    radius: f64,
    width_segments: u32,
    height_segments: u32,
    hemisphere: Hemisphere,
    sealed: bool,
) -> Result<Mesh, MeshError> {
    if radius <= 0.0 {
        return Err(MeshError::degenerate(format!(
            "Dome radius must be positive: {}",
            radius
        )));
    }

    if width_segments < MIN_SEGMENTS || height_segments < 1 {
        return Err(MeshError::degenerate(format!(
            "Dome segments out of range: {}x{}",
            width_segments, height_segments
        )));
    }

    let sign = match hemisphere {
        Hemisphere::Upper => 1.0,
        Hemisphere::Lower => -1.0,
    };

    let mut mesh = Mesh::with_capacity(
        (width_segments * height_segments + 1) as usize,
        (2 * width_segments * height_segments) as usize,
    );

    let mut rings: Vec<Vec<u32>> = Vec::with_capacity(height_segments as usize + 1);
    rings.push(vec![mesh.add_vertex(DVec3::new(0.0, sign * radius, 0.0))]);

    for k in 1..=height_segments {
        let (ring_radius, y) = if k == height_segments {
            (radius, 0.0)
        } else {
            let polar = f64::from(k) * FRAC_PI_2 / f64::from(height_segments);
            (radius * polar.sin(), sign * radius * polar.cos())
        };
        rings.push(add_ring(&mut mesh, ring_radius, y, width_segments));
    }

    for pair in rings.windows(2) {
        let (near_pole, near_rim) = (&pair[0], &pair[1]);
        match hemisphere {
            Hemisphere::Upper => stitch_band(&mut mesh, near_rim, near_pole),
            Hemisphere::Lower => stitch_band(&mut mesh, near_pole, near_rim),
        }
    }

    if sealed {
        let rim = &rings[height_segments as usize];
        match hemisphere {
            Hemisphere::Upper => fan_cap(&mut mesh, rim, Facing::Down),
            Hemisphere::Lower => fan_cap(&mut mesh, rim, Facing::Up),
        }
    }

    Ok(mesh)
}

/// Squashes a dome vertically and moves its rim to `rim_y`.
///
/// A squash of 0 flattens the dome onto the rim plane; 1 keeps it a full
/// hemisphere.
pub fn seat_dome(mesh: &mut Mesh, squash: f64, rim_y: f64) {
    let matrix = DMat4::from_translation(DVec3::new(0.0, rim_y, 0.0))
        * DMat4::from_scale(DVec3::new(1.0, squash, 1.0));
    mesh.transform(&matrix);
}
