//! # Mesh Errors
//!
//! Error types for shape generation and mesh assembly.

use thiserror::Error;

/// Errors that can occur while turning shape parameters into a mesh.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// Shape name not present in the catalog
    #[error("Unknown shape type: {name}")]
    UnknownShape { name: String },

    /// Parameter store lacks a key the shape requires
    #[error("Missing parameter '{name}' for {shape}")]
    MissingParameter { shape: &'static str, name: String },

    /// Parameter value is not usable (NaN or infinite)
    #[error("Invalid value for '{name}': {value}")]
    InvalidParameter { name: String, value: f64 },

    /// Degenerate geometry
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Boolean composition called without volumes
    #[error("Boolean composition requires at least one volume")]
    EmptyComposition,

    /// Too many triangles
    #[error("Too many triangles: {count} (max: {max})")]
    TooManyTriangles { count: usize, max: usize },
}

impl MeshError {
    /// Creates an unknown shape error.
    pub fn unknown_shape(name: impl Into<String>) -> Self {
        Self::UnknownShape { name: name.into() }
    }

    /// Creates a missing parameter error.
    pub fn missing(shape: &'static str, name: impl Into<String>) -> Self {
        Self::MissingParameter {
            shape,
            name: name.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid(name: impl Into<String>, value: f64) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value,
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }
}
