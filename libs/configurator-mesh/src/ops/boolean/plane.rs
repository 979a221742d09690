//! # Plane for Slicing
//!
//! Plane representation with point classification.

use super::vertex::Vertex;
use config::constants::{EPSILON, PLANE_EPSILON};
use glam::DVec3;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classification of a point or polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// In front of the plane (positive side).
    Front,
    /// Behind the plane (negative side).
    Back,
    /// Within the epsilon band around the plane.
    Coplanar,
    /// Polygon has vertices on both sides.
    Spanning,
}

// =============================================================================
// PLANE
// =============================================================================

/// A plane in 3D space defined by a unit normal and its offset from origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Normal vector (unit length).
    pub normal: DVec3,
    /// Distance from origin along normal.
    pub w: f64,
}

impl Plane {
    /// Create plane from normal and distance.
    pub fn new(normal: DVec3, w: f64) -> Self {
        Self { normal, w }
    }

    /// Create plane from three points.
    ///
    /// Points should be in counter-clockwise order when viewed from front.
    /// Returns `None` for collinear points.
    pub fn from_points(a: &Vertex, b: &Vertex, c: &Vertex) -> Option<Self> {
        let cross = (b.pos - a.pos).cross(c.pos - a.pos);
        let length = cross.length();

        if !(length > EPSILON) {
            return None;
        }

        let normal = cross / length;
        Some(Self {
            normal,
            w: normal.dot(a.pos),
        })
    }

    /// Signed distance from point to plane.
    ///
    /// Positive = front, negative = back, zero = on plane.
    #[inline]
    pub fn signed_distance(&self, point: &Vertex) -> f64 {
        self.normal.dot(point.pos) - self.w
    }

    /// Classify a point relative to this plane.
    pub fn classify_point(&self, point: &Vertex) -> Classification {
        let dist = self.signed_distance(point);
        if dist > PLANE_EPSILON {
            Classification::Front
        } else if dist < -PLANE_EPSILON {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
