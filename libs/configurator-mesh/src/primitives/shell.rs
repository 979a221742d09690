//! # Cylindrical Shell
//!
//! Generates the side wall of a revolved body.

use super::rings::{add_ring, fan_cap, stitch_band, Facing};
use crate::error::MeshError;
use crate::mesh::Mesh;
use config::constants::MIN_SEGMENTS;

/// Creates a cylindrical shell centered on the origin.
///
/// # Arguments
///
/// * `radius` - Distance of the ring vertices from the Y axis
/// * `height` - Extent along Y, spanning `[-height/2, height/2]`
/// * `segments` - Number of facets around the axis
/// * `sealed` - Close both ends with flat discs
///
/// With few segments the shell is a faceted prism: 4 segments give a
/// square whose corners lie on the X and Z axes.
///
/// # Example
///
/// ```rust
/// use configurator_mesh::primitives::create_shell;
///
/// let open = create_shell(5.0, 10.0, 64, false).unwrap();
/// assert_eq!(open.triangle_count(), 128);
///
/// let sealed = create_shell(5.0, 10.0, 64, true).unwrap();
/// assert!(sealed.is_closed());
/// ```
pub fn create_shell(
    radius: f64,
    height: f64,
    segments: u32,
    sealed: bool,
) -> Result<Mesh, MeshError> {
    if radius <= 0.0 {
        return Err(MeshError::degenerate(format!(
            "Shell radius must be positive: {}",
            radius
        )));
    }

    if height <= 0.0 {
        return Err(MeshError::degenerate(format!(
            "Shell height must be positive: {}",
            height
        )));
    }

    if segments < MIN_SEGMENTS {
        return Err(MeshError::degenerate(format!(
            "Shell segments must be at least {}: {}",
            MIN_SEGMENTS, segments
        )));
    }

    let cap_triangles = if sealed { 2 * (segments - 2) } else { 0 };
    let mut mesh = Mesh::with_capacity(
        2 * segments as usize,
        (2 * segments + cap_triangles) as usize,
    );

    let half = height / 2.0;
    let bottom = add_ring(&mut mesh, radius, -half, segments);
    let top = add_ring(&mut mesh, radius, half, segments);

    stitch_band(&mut mesh, &bottom, &top);

    if sealed {
        fan_cap(&mut mesh, &top, Facing::Up);
        fan_cap(&mut mesh, &bottom, Facing::Down);
    }

    Ok(mesh)
}
