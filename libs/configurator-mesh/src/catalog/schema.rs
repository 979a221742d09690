//! # Parameter Schemas
//!
//! Static min/max/step/default tables for each shape kind.

use super::ShapeKind;
use config::constants::{
    approx_equal, DEFAULT_RADIAL_SEGMENTS, DEFAULT_SPHERE_HEIGHT_SEGMENTS,
    DEFAULT_SPHERE_WIDTH_SEGMENTS, MIN_SEGMENTS,
};
use serde::Serialize;

/// Range, step and default of a single shape parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl ParamSpec {
    const fn new(name: &'static str, min: f64, max: f64, step: f64, default: f64) -> Self {
        Self {
            name,
            min,
            max,
            step,
            default,
        }
    }

    /// Clamps a value into `[min, max]` and snaps it onto the step grid
    /// anchored at `min`.
    ///
    /// Values already on the grid come back unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use configurator_mesh::catalog::schema;
    /// use configurator_mesh::catalog::ShapeKind;
    ///
    /// let radius = &schema(ShapeKind::CappedCylinder)[0];
    /// assert_eq!(radius.clamp_snap(5.0), 5.0);
    /// assert_eq!(radius.clamp_snap(100.0), 20.0);
    /// assert_eq!(radius.clamp_snap(-3.0), 1.0);
    /// ```
    pub fn clamp_snap(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }

        let steps = ((clamped - self.min) / self.step).round();
        let snapped = (self.min + steps * self.step).clamp(self.min, self.max);
        if approx_equal(snapped, clamped) {
            clamped
        } else {
            snapped
        }
    }

    /// Returns true if the value lies inside `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

// =============================================================================
// TABLES
// =============================================================================

const RADIUS: ParamSpec = ParamSpec::new("radius", 1.0, 20.0, 0.1, 5.0);
const HEIGHT: ParamSpec = ParamSpec::new("height", 1.0, 50.0, 0.1, 10.0);
const TOP_SQUASH: ParamSpec = ParamSpec::new("topSquash", 0.0, 1.0, 0.01, 0.5);
const BOTTOM_SQUASH: ParamSpec = ParamSpec::new("bottomSquash", 0.0, 1.0, 0.01, 1.0);
const SPHERE_WIDTH_SEGMENTS: ParamSpec = ParamSpec::new(
    "sphereWidthSegments",
    MIN_SEGMENTS as f64,
    128.0,
    1.0,
    DEFAULT_SPHERE_WIDTH_SEGMENTS as f64,
);
const SPHERE_HEIGHT_SEGMENTS: ParamSpec = ParamSpec::new(
    "sphereHeightSegments",
    MIN_SEGMENTS as f64,
    64.0,
    1.0,
    DEFAULT_SPHERE_HEIGHT_SEGMENTS as f64,
);

const fn side(name: &'static str) -> ParamSpec {
    ParamSpec::new(name, 0.5, 20.0, 0.1, 5.0)
}

static CYLINDER: [ParamSpec; 7] = [
    RADIUS,
    HEIGHT,
    TOP_SQUASH,
    BOTTOM_SQUASH,
    ParamSpec::new(
        "radialSegments",
        MIN_SEGMENTS as f64,
        128.0,
        1.0,
        DEFAULT_RADIAL_SEGMENTS as f64,
    ),
    SPHERE_WIDTH_SEGMENTS,
    SPHERE_HEIGHT_SEGMENTS,
];

static OCTAGON: [ParamSpec; 6] = [
    RADIUS,
    HEIGHT,
    TOP_SQUASH,
    BOTTOM_SQUASH,
    SPHERE_WIDTH_SEGMENTS,
    SPHERE_HEIGHT_SEGMENTS,
];

static SQUARE: [ParamSpec; 3] = [
    ParamSpec::new("width", 1.0, 20.0, 0.1, 5.0),
    ParamSpec::new("height", 1.0, 20.0, 0.1, 10.0),
    ParamSpec::new("roundness", 0.0, 1.0, 0.05, 0.2),
];

static CUSTOM_POLYGON: [ParamSpec; 12] = [
    HEIGHT,
    TOP_SQUASH,
    BOTTOM_SQUASH,
    RADIUS,
    side("side0Radius"),
    side("side1Radius"),
    side("side2Radius"),
    side("side3Radius"),
    side("side4Radius"),
    side("side5Radius"),
    side("side6Radius"),
    side("side7Radius"),
];

/// Returns the parameter schema of a shape kind.
pub fn schema(kind: ShapeKind) -> &'static [ParamSpec] {
    match kind {
        ShapeKind::CappedCylinder => &CYLINDER,
        ShapeKind::CappedOctagon => &OCTAGON,
        ShapeKind::CappedSquare => &SQUARE,
        ShapeKind::CustomPolygon => &CUSTOM_POLYGON,
    }
}

/// Looks up a single parameter spec by name.
pub fn find(kind: ShapeKind, name: &str) -> Option<&'static ParamSpec> {
    schema(kind).iter().find(|spec| spec.name == name)
}
