//! # Typed Shape Parameters
//!
//! Validated, per-variant parameter structs built from a [`ParameterValues`]
//! store. Every value is clamped and snapped into its schema range, so the
//! primitive generator can rely on the invariants below:
//!
//! - all lengths are positive
//! - segment counts are integers `>= 3`
//! - squash factors lie in `[0, 1]`

use super::schema::{find, ParamSpec};
use super::{default_values, ParameterValues, ShapeKind};
use crate::error::MeshError;
use config::constants::POLYGON_SIDES;
use serde::Serialize;

const SIDE_NAMES: [&str; POLYGON_SIDES] = [
    "side0Radius",
    "side1Radius",
    "side2Radius",
    "side3Radius",
    "side4Radius",
    "side5Radius",
    "side6Radius",
    "side7Radius",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CylinderParams {
    pub radius: f64,
    pub height: f64,
    pub top_squash: f64,
    pub bottom_squash: f64,
    pub radial_segments: u32,
    pub sphere_width_segments: u32,
    pub sphere_height_segments: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OctagonParams {
    pub radius: f64,
    pub height: f64,
    pub top_squash: f64,
    pub bottom_squash: f64,
    pub sphere_width_segments: u32,
    pub sphere_height_segments: u32,
}

/// Parameters of the square shell.
///
/// `roundness` is carried for the panel but does not change the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SquareParams {
    pub width: f64,
    pub height: f64,
    pub roundness: f64,
}

/// Parameters of the custom polygon prism.
///
/// `side_radii[i]` is the distance of polygon vertex `i` from the axis.
/// The caps use `radius`, independent of the side radii.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CustomPolygonParams {
    pub height: f64,
    pub top_squash: f64,
    pub bottom_squash: f64,
    pub radius: f64,
    pub side_radii: [f64; POLYGON_SIDES],
}

/// Typed parameters of any shape kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ShapeParams {
    Cylinder(CylinderParams),
    Octagon(OctagonParams),
    Square(SquareParams),
    CustomPolygon(CustomPolygonParams),
}

// =============================================================================
// CONVERSION
// =============================================================================

/// Reads values of one shape out of a store, checking each against the schema.
struct Reader<'a> {
    kind: ShapeKind,
    values: &'a ParameterValues,
}

impl Reader<'_> {
    fn spec(&self, name: &str) -> Result<&'static ParamSpec, MeshError> {
        find(self.kind, name).ok_or_else(|| MeshError::missing(self.kind.name(), name))
    }

    fn real(&self, name: &str) -> Result<f64, MeshError> {
        let spec = self.spec(name)?;
        let value = self
            .values
            .get(name)
            .ok_or_else(|| MeshError::missing(self.kind.name(), name))?;
        if !value.is_finite() {
            return Err(MeshError::invalid(name, value));
        }
        Ok(spec.clamp_snap(value))
    }

    fn count(&self, name: &str) -> Result<u32, MeshError> {
        Ok(self.real(name)?.round() as u32)
    }
}

impl ShapeParams {
    /// Builds typed parameters from a string-keyed store.
    ///
    /// # Errors
    ///
    /// - [`MeshError::MissingParameter`] if a required key is absent
    /// - [`MeshError::InvalidParameter`] if a value is NaN or infinite
    ///
    /// # Example
    ///
    /// ```rust
    /// use configurator_mesh::catalog::{default_values, ShapeKind, ShapeParams};
    ///
    /// let mut values = default_values(ShapeKind::CappedCylinder);
    /// values.set("radius", 500.0);
    /// let params = ShapeParams::from_values(ShapeKind::CappedCylinder, &values).unwrap();
    /// match params {
    ///     ShapeParams::Cylinder(p) => assert_eq!(p.radius, 20.0),
    ///     _ => unreachable!(),
    /// }
    /// ```
    pub fn from_values(kind: ShapeKind, values: &ParameterValues) -> Result<Self, MeshError> {
        let r = Reader { kind, values };

        let params = match kind {
            ShapeKind::CappedCylinder => ShapeParams::Cylinder(CylinderParams {
                radius: r.real("radius")?,
                height: r.real("height")?,
                top_squash: r.real("topSquash")?,
                bottom_squash: r.real("bottomSquash")?,
                radial_segments: r.count("radialSegments")?,
                sphere_width_segments: r.count("sphereWidthSegments")?,
                sphere_height_segments: r.count("sphereHeightSegments")?,
            }),
            ShapeKind::CappedOctagon => ShapeParams::Octagon(OctagonParams {
                radius: r.real("radius")?,
                height: r.real("height")?,
                top_squash: r.real("topSquash")?,
                bottom_squash: r.real("bottomSquash")?,
                sphere_width_segments: r.count("sphereWidthSegments")?,
                sphere_height_segments: r.count("sphereHeightSegments")?,
            }),
            ShapeKind::CappedSquare => ShapeParams::Square(SquareParams {
                width: r.real("width")?,
                height: r.real("height")?,
                roundness: r.real("roundness")?,
            }),
            ShapeKind::CustomPolygon => {
                let mut side_radii = [0.0; POLYGON_SIDES];
                for (radius, name) in side_radii.iter_mut().zip(SIDE_NAMES) {
                    *radius = r.real(name)?;
                }
                ShapeParams::CustomPolygon(CustomPolygonParams {
                    height: r.real("height")?,
                    top_squash: r.real("topSquash")?,
                    bottom_squash: r.real("bottomSquash")?,
                    radius: r.real("radius")?,
                    side_radii,
                })
            }
        };

        Ok(params)
    }

    /// Typed defaults of a shape kind.
    pub fn defaults(kind: ShapeKind) -> Result<Self, MeshError> {
        Self::from_values(kind, &default_values(kind))
    }

    /// Returns the shape kind of these parameters.
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeParams::Cylinder(_) => ShapeKind::CappedCylinder,
            ShapeParams::Octagon(_) => ShapeKind::CappedOctagon,
            ShapeParams::Square(_) => ShapeKind::CappedSquare,
            ShapeParams::CustomPolygon(_) => ShapeKind::CustomPolygon,
        }
    }

    /// Converts back into a string-keyed store.
    pub fn to_values(&self) -> ParameterValues {
        let mut values = ParameterValues::new();
        match self {
            ShapeParams::Cylinder(p) => {
                values.set("radius", p.radius);
                values.set("height", p.height);
                values.set("topSquash", p.top_squash);
                values.set("bottomSquash", p.bottom_squash);
                values.set("radialSegments", f64::from(p.radial_segments));
                values.set("sphereWidthSegments", f64::from(p.sphere_width_segments));
                values.set("sphereHeightSegments", f64::from(p.sphere_height_segments));
            }
            ShapeParams::Octagon(p) => {
                values.set("radius", p.radius);
                values.set("height", p.height);
                values.set("topSquash", p.top_squash);
                values.set("bottomSquash", p.bottom_squash);
                values.set("sphereWidthSegments", f64::from(p.sphere_width_segments));
                values.set("sphereHeightSegments", f64::from(p.sphere_height_segments));
            }
            ShapeParams::Square(p) => {
                values.set("width", p.width);
                values.set("height", p.height);
                values.set("roundness", p.roundness);
            }
            ShapeParams::CustomPolygon(p) => {
                values.set("height", p.height);
                values.set("topSquash", p.top_squash);
                values.set("bottomSquash", p.bottom_squash);
                values.set("radius", p.radius);
                for (name, radius) in SIDE_NAMES.iter().zip(p.side_radii) {
                    values.set(*name, radius);
                }
            }
        }
        values
    }
}
