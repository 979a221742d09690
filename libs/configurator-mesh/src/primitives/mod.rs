//! # Primitives
//!
//! Mesh generation for the revolved building blocks (shell, dome, prism)
//! and the per-shape recipes that turn typed parameters into volumes.
//!
//! ## Layout
//!
//! ```text
//!        top cap     (dome, squashed, rim at +height/2)
//!   ───────────────
//!        body        (shell or prism, centered on the origin)
//!   ───────────────
//!      bottom cap    (dome, squashed, rim at -height/2)
//! ```
//!
//! Volumes that are later merged by a union are sealed into closed solids.
//! Their touching end discs face opposite ways and cancel in the union.

pub mod dome;
pub mod prism;
pub mod rings;
pub mod shell;

#[cfg(test)]
mod tests;

pub use dome::{create_dome, seat_dome, Hemisphere};
pub use prism::create_prism;
pub use shell::create_shell;

use crate::catalog::{ParameterValues, ShapeKind, ShapeParams};
use crate::error::MeshError;
use crate::mesh::Mesh;
use config::constants::{
    DEFAULT_SPHERE_HEIGHT_SEGMENTS, DEFAULT_SPHERE_WIDTH_SEGMENTS, OCTAGON_SEGMENTS,
    SQUARE_SEGMENTS,
};
use std::f64::consts::SQRT_2;
use tracing::{debug, warn};

/// Role of a volume within its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lobe {
    Body,
    TopCap,
    BottomCap,
}

/// A primitive surface tagged with its lobe.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    pub lobe: Lobe,
    pub mesh: Mesh,
}

impl Volume {
    pub fn new(lobe: Lobe, mesh: Mesh) -> Self {
        Self { lobe, mesh }
    }
}

/// Dome settings shared by both caps of a shape.
struct Caps {
    radius: f64,
    height: f64,
    top_squash: f64,
    bottom_squash: f64,
    width_segments: u32,
    height_segments: u32,
}

impl Caps {
    fn volumes(&self) -> Result<[Volume; 2], MeshError> {
        let half = self.height / 2.0;

        let mut top = create_dome(
            self.radius,
            self.width_segments,
            self.height_segments,
            Hemisphere::Upper,
            true,
        )?;
        seat_dome(&mut top, self.top_squash, half);

        let mut bottom = create_dome(
            self.radius,
            self.width_segments,
            self.height_segments,
            Hemisphere::Lower,
            true,
        )?;
        seat_dome(&mut bottom, self.bottom_squash, -half);

        Ok([
            Volume::new(Lobe::TopCap, top),
            Volume::new(Lobe::BottomCap, bottom),
        ])
    }
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Generates the ordered volume list of a shape: body first, then the top
/// and bottom caps.
///
/// # Example
///
/// ```rust
/// use configurator_mesh::catalog::{ShapeKind, ShapeParams};
/// use configurator_mesh::primitives::{generate_volumes, Lobe};
///
/// let params = ShapeParams::defaults(ShapeKind::CappedSquare).unwrap();
/// let volumes = generate_volumes(&params).unwrap();
/// assert_eq!(volumes.len(), 1);
/// assert_eq!(volumes[0].lobe, Lobe::Body);
/// ```
pub fn generate_volumes(params: &ShapeParams) -> Result<Vec<Volume>, MeshError> {
    let volumes = match params {
        ShapeParams::Cylinder(p) => {
            let body = create_shell(p.radius, p.height, p.radial_segments, true)?;
            let caps = Caps {
                radius: p.radius,
                height: p.height,
                top_squash: p.top_squash,
                bottom_squash: p.bottom_squash,
                width_segments: p.sphere_width_segments,
                height_segments: p.sphere_height_segments,
            };
            with_caps(body, &caps)?
        }
        ShapeParams::Octagon(p) => {
            let body = create_shell(p.radius, p.height, OCTAGON_SEGMENTS, true)?;
            let caps = Caps {
                radius: p.radius,
                height: p.height,
                top_squash: p.top_squash,
                bottom_squash: p.bottom_squash,
                width_segments: p.sphere_width_segments,
                height_segments: p.sphere_height_segments,
            };
            with_caps(body, &caps)?
        }
        ShapeParams::Square(p) => {
            // `width` is the distance between opposite flat faces, so the
            // shell gets circumradius `width / SQRT_2`. Passing `width` as the
            // radius instead would make the square `SQRT_2 * width` across.
            let body = create_shell(p.width / SQRT_2, p.height, SQUARE_SEGMENTS, false)?;
            vec![Volume::new(Lobe::Body, body)]
        }
        ShapeParams::CustomPolygon(p) => {
            let body = create_prism(&p.side_radii, p.height, true)?;
            let caps = Caps {
                radius: p.radius,
                height: p.height,
                top_squash: p.top_squash,
                bottom_squash: p.bottom_squash,
                width_segments: DEFAULT_SPHERE_WIDTH_SEGMENTS,
                height_segments: DEFAULT_SPHERE_HEIGHT_SEGMENTS,
            };
            with_caps(body, &caps)?
        }
    };

    debug!(
        shape = %params.kind(),
        volumes = volumes.len(),
        "generated primitive volumes"
    );

    Ok(volumes)
}

/// Generates volumes from a shape name and a string-keyed store.
///
/// An unknown name is not an error here: it is logged and yields an empty
/// list, which the assembler turns into "no mesh".
pub fn shape_volumes(
    shape_type: &str,
    values: &ParameterValues,
) -> Result<Vec<Volume>, MeshError> {
    let kind = match shape_type.parse::<ShapeKind>() {
        Ok(kind) => kind,
        Err(_) => {
            warn!(shape_type, "unknown shape type, no volumes generated");
            return Ok(Vec::new());
        }
    };

    let params = ShapeParams::from_values(kind, values)?;
    generate_volumes(&params)
}

fn with_caps(body: Mesh, caps: &Caps) -> Result<Vec<Volume>, MeshError> {
    let [top, bottom] = caps.volumes()?;
    Ok(vec![Volume::new(Lobe::Body, body), top, bottom])
}
