//! # Configurator Mesh
//!
//! Parametric solids of revolution for the shape configurator.
//! Builds a textured, render-ready mesh from a shape name and a set of
//! numeric parameters.
//!
//! ## Architecture
//!
//! ```text
//! catalog (schemas, defaults) → primitives (shell, domes, prism)
//!     → ops::boolean (union) → uv (cylindrical unwrap)
//!     → assembler (material, scale, bounds) → scene (single mesh slot)
//! ```
//!
//! ## Algorithms
//!
//! Everything is pure Rust and runs unchanged in the browser:
//! - **Boolean union**: Plane slicing of the overlap band with ray-parity reclassification
//! - **UV unwrap**: Cylindrical projection with a seam nudge
//! - **Primitives**: Ring-stitched shells, hemispherical domes, polygon prisms
//!
//! ## Usage
//!
//! ```rust
//! use configurator_mesh::{build_named, catalog, BuildOptions, TextureCache};
//!
//! let values = catalog::default_values(catalog::ShapeKind::CappedSquare);
//! let built = build_named(
//!     "capped square",
//!     &values,
//!     &BuildOptions::default(),
//!     &TextureCache::new(),
//! )
//! .unwrap();
//! assert!(built.is_some());
//! ```

pub mod assembler;
pub mod catalog;
pub mod error;
pub mod mesh;
pub mod ops;
pub mod primitives;
pub mod scene;
pub mod texture;
pub mod uv;

pub use assembler::{build, build_named, build_with_config, Bounds, Material, RenderableMesh};
pub use catalog::{BuildOptions, ParameterValues, ShapeKind, ShapeParams};
pub use error::MeshError;
pub use mesh::Mesh;
pub use ops::{compose, union};
pub use scene::{ParametersChanged, RenderBackend, SceneContext};
pub use texture::{TextureCache, TextureHandle, TextureRole};
