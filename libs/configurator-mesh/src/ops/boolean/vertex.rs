//! # Vertex for Slicing
//!
//! Position wrapper with interpolation and weld-grid quantization.

use config::constants::WELD_SCALE;
use glam::DVec3;

// =============================================================================
// VERTEX
// =============================================================================

/// Vertex of a slicing polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in object space.
    pub pos: DVec3,
}

impl Vertex {
    /// Create new vertex.
    pub fn new(pos: DVec3) -> Self {
        Self { pos }
    }

    /// Linear interpolation between two vertices.
    ///
    /// ## Parameters
    ///
    /// - `other`: Target vertex
    /// - `t`: Interpolation factor (0.0 = self, 1.0 = other)
    pub fn lerp(&self, other: &Vertex, t: f64) -> Vertex {
        Vertex {
            pos: self.pos.lerp(other.pos, t),
        }
    }

    /// Weld-grid cell containing this vertex.
    ///
    /// Vertices closer than `1 / WELD_SCALE` usually share a cell.
    pub fn weld_key(&self) -> [i64; 3] {
        let q = (self.pos * WELD_SCALE).round();
        [q.x as i64, q.y as i64, q.z as i64]
    }
}

// =============================================================================
// TESTS
// =============================================================================
