//! # Mesh Operations
//!
//! Operations on meshes: boolean composition (CSG union).

pub mod boolean;

pub use boolean::{compose, union};
