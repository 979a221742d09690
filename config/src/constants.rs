//! # Configuration Constants
//!
//! Centralized constants for the shape configurator pipeline. Geometry
//! tolerances, tessellation defaults, UV projection parameters and safety
//! limits are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Tessellation**: Segment counts for the shape variants
//! - **UV Projection**: Cylindrical unwrap constants
//! - **Limits**: Maximum values for safety bounds
//! - **Presentation**: Mesh scale, fallback color, texture sources

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used to detect collapsed extents (for example a zero-height mesh during
/// UV unwrapping) without comparing floats for exact equality.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Thickness of the "on plane" band used when slicing faces during a union.
///
/// Points closer to a plane than this are treated as coplanar. Also the
/// tolerance for a vertex to count as lying on an open edge.
pub const PLANE_EPSILON: f64 = 1e-5;

/// Grid resolution used when welding vertices after boolean operations.
///
/// Coordinates are multiplied by this factor and rounded; vertices landing
/// in the same cell are merged.
///
/// # Example
///
/// ```rust
/// use config::constants::WELD_SCALE;
///
/// fn weld_key(value: f64) -> i64 {
///     (value * WELD_SCALE).round() as i64
/// }
///
/// assert_eq!(weld_key(1.0), weld_key(1.0 + 1e-9));
/// ```
pub const WELD_SCALE: f64 = 1e6;

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Minimum angular segment count for any revolved primitive.
pub const MIN_SEGMENTS: u32 = 3;

/// Default radial segment count of the cylinder body.
pub const DEFAULT_RADIAL_SEGMENTS: u32 = 64;

/// Default number of segments around a dome cap.
pub const DEFAULT_SPHERE_WIDTH_SEGMENTS: u32 = 64;

/// Default number of latitude bands between a dome's pole and its rim.
pub const DEFAULT_SPHERE_HEIGHT_SEGMENTS: u32 = 32;

/// Facet count of the octagon body shell.
pub const OCTAGON_SEGMENTS: u32 = 8;

/// Facet count of the square body shell.
pub const SQUARE_SEGMENTS: u32 = 4;

/// Number of independently sized sides of the custom polygon body.
pub const POLYGON_SIDES: usize = 8;

// =============================================================================
// UV PROJECTION CONSTANTS
// =============================================================================

/// U values below this threshold are pushed past 1.0 before wrapping.
///
/// # Example
///
/// ```rust
/// use config::constants::UV_SEAM_THRESHOLD;
///
/// let mut u: f64 = 0.01;
/// if u < UV_SEAM_THRESHOLD {
///     u += 1.0;
/// }
/// assert!(u > 1.0);
/// ```
pub const UV_SEAM_THRESHOLD: f64 = 0.05;

/// Fraction of the texture height covered by the V coordinate.
pub const UV_V_SCALE: f64 = 0.98;

/// Offset applied to V so the projection stays clear of the texture edges.
///
/// Together with [`UV_V_SCALE`] this maps heights onto `[0.01, 0.99]`.
pub const UV_V_OFFSET: f64 = 0.01;

/// V coordinate assigned to every vertex of a mesh without vertical extent.
pub const UV_FLAT_V: f64 = 0.5;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of triangles a single rebuilt mesh may contain.
///
/// The largest schema values (128 radial x 128 x 64 dome segments) stay far
/// below this; it guards hosts that bypass the schema clamps.
pub const MAX_TRIANGLES: usize = 2_000_000;

// =============================================================================
// PRESENTATION CONSTANTS
// =============================================================================

/// Smallest accepted uniform mesh scale.
pub const MIN_MESH_SCALE: f64 = 0.01;

/// Largest accepted uniform mesh scale.
pub const MAX_MESH_SCALE: f64 = 10.0;

/// Default uniform mesh scale.
pub const DEFAULT_MESH_SCALE: f64 = 1.0;

/// Base color of a material whose texture has not been loaded (light gray).
///
/// RGBA values in range [0.0, 1.0].
pub const DEFAULT_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

/// Diagnostic checker texture used when the UV test flag is set.
pub const UV_TEST_TEXTURE_URL: &str = "https://threejs.org/examples/textures/uv_grid_opengl.jpg";

/// Equirectangular studio HDRI used as the default surface texture.
pub const HDRI_TEXTURE_URL: &str =
    "https://dl.polyhaven.org/file/ph-assets/HDRIs/hdr/2k/studio_small_03_2k.hdr";

// =============================================================================
// PIPELINE CONFIGURATION
// =============================================================================

/// Validated runtime settings for the mesh pipeline.
///
/// # Examples
/// ```
/// use config::constants::PipelineConfig;
/// let config = PipelineConfig::default();
/// assert!(config.max_triangles > 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Upper bound on the triangle count of an assembled mesh.
    pub max_triangles: usize,
}

impl PipelineConfig {
    /// Builds a configuration, rejecting a zero triangle budget.
    ///
    /// # Examples
    /// ```
    /// use config::constants::PipelineConfig;
    /// let cfg = PipelineConfig::new(10_000).expect("valid config");
    /// assert_eq!(cfg.max_triangles, 10_000);
    /// assert!(PipelineConfig::new(0).is_err());
    /// ```
    pub fn new(max_triangles: usize) -> Result<Self, ConfigError> {
        if max_triangles == 0 {
            return Err(ConfigError::InvalidTriangleBudget(max_triangles));
        }
        Ok(Self { max_triangles })
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_triangles: MAX_TRIANGLES,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the triangle budget is zero.
    InvalidTriangleBudget(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTriangleBudget(value) => {
                write!(f, "max_triangles must be positive: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
