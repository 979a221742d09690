//! # Config Crate
//!
//! Centralized configuration constants for the shape configurator pipeline.
//! Tolerances, tessellation defaults, UV projection constants and safety
//! limits live here so the mesh and WASM crates stay free of literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{approx_zero, UV_SEAM_THRESHOLD, MIN_SEGMENTS};
//!
//! assert!(approx_zero(1e-11));
//! assert!(UV_SEAM_THRESHOLD < 0.5);
//! assert_eq!(MIN_SEGMENTS, 3);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Browser-Safe**: No platform-specific values
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
