//! # Shape Catalog
//!
//! Declarative description of every shape the configurator can build:
//! names, parameter schemas (min/max/step) and default values.
//!
//! ## Flow
//!
//! ```text
//! ParameterValues (string keyed) → ShapeParams (typed, clamped) → primitives
//! ```

pub mod options;
pub mod params;
pub mod schema;
pub mod values;


use crate::error::MeshError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use options::BuildOptions;
pub use params::{CustomPolygonParams, CylinderParams, OctagonParams, ShapeParams, SquareParams};
pub use schema::{schema, ParamSpec};
pub use values::ParameterValues;

// =============================================================================
// SHAPE KIND
// =============================================================================

/// The closed set of buildable shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Cylinder body with two dome caps.
    #[serde(rename = "capped cylinder")]
    CappedCylinder,
    /// Eight-facet body with two dome caps.
    #[serde(rename = "capped octagon")]
    CappedOctagon,
    /// Four-facet open shell.
    #[serde(rename = "capped square")]
    CappedSquare,
    /// Eight-sided prism with per-side radii and two dome caps.
    #[serde(rename = "custom polygon")]
    CustomPolygon,
}

impl ShapeKind {
    /// All shape kinds in menu order.
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::CappedCylinder,
        ShapeKind::CappedOctagon,
        ShapeKind::CappedSquare,
        ShapeKind::CustomPolygon,
    ];

    /// Display name used by the parameter panel and the host.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::CappedCylinder => "capped cylinder",
            ShapeKind::CappedOctagon => "capped octagon",
            ShapeKind::CappedSquare => "capped square",
            ShapeKind::CustomPolygon => "custom polygon",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| MeshError::unknown_shape(s))
    }
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Returns the names of all shapes, in menu order.
///
/// # Example
///
/// ```rust
/// use configurator_mesh::catalog::shape_options;
///
/// assert_eq!(shape_options()[0], "capped cylinder");
/// ```
pub fn shape_options() -> Vec<&'static str> {
    ShapeKind::ALL.iter().map(|kind| kind.name()).collect()
}

/// Returns a fresh copy of the default parameter values of a shape.
///
/// Mutating the returned store never affects later calls.
pub fn default_values(kind: ShapeKind) -> ParameterValues {
    schema(kind)
        .iter()
        .map(|spec| (spec.name.to_string(), spec.default))
        .collect()
}
