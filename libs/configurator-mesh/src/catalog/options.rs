//! # Build Options
//!
//! Presentation settings that apply to every shape kind.

use crate::error::MeshError;
use config::constants::{DEFAULT_MESH_SCALE, MAX_MESH_SCALE, MIN_MESH_SCALE};
use serde::{Deserialize, Serialize};

/// Non-shape settings of a rebuild.
///
/// Deserializes from the host's `{"meshScale": 1.0, "useUVTest": false}`;
/// absent keys take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Uniform scale applied to the rendered object.
    #[serde(rename = "meshScale")]
    pub mesh_scale: f64,
    /// Show the UV checker texture instead of the environment texture.
    #[serde(rename = "useUVTest")]
    pub use_uv_test: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            mesh_scale: DEFAULT_MESH_SCALE,
            use_uv_test: false,
        }
    }
}

impl BuildOptions {
    /// Returns a copy with `mesh_scale` clamped into its accepted range.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidParameter`] for a non-finite scale.
    pub fn normalized(self) -> Result<Self, MeshError> {
        if !self.mesh_scale.is_finite() {
            return Err(MeshError::invalid("meshScale", self.mesh_scale));
        }
        Ok(Self {
            mesh_scale: self.mesh_scale.clamp(MIN_MESH_SCALE, MAX_MESH_SCALE),
            ..self
        })
    }
}
