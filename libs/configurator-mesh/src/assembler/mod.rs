//! # Mesh Assembler
//!
//! Turns shape parameters into a [`RenderableMesh`]: generated volumes are
//! composed, unwrapped, given a material, scaled and measured.
//!
//! ## Pipeline
//!
//! ```text
//! ShapeParams → volumes → union → cylindrical UVs → material + scale + bounds
//! ```
//!
//! Assembly touches no shared state. The caller owns the result and is
//! responsible for disposing the mesh it replaces.


use crate::catalog::{BuildOptions, ParameterValues, ShapeKind, ShapeParams};
use crate::error::MeshError;
use crate::mesh::Mesh;
use crate::ops::compose;
use crate::primitives::{generate_volumes, shape_volumes, Volume};
use crate::texture::{TextureCache, TextureHandle, TextureRole};
use crate::uv::apply_cylindrical_uvs;
use config::constants::{PipelineConfig, DEFAULT_COLOR};
use glam::DVec3;
use serde::Serialize;
use tracing::debug;

// =============================================================================
// MATERIAL
// =============================================================================

/// Surface description handed to the render backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Render both faces; open shells are seen from inside.
    pub double_sided: bool,
    /// Texture the material asks for.
    pub texture_role: TextureRole,
    /// Resolved texture, `None` until it has been loaded.
    pub texture: Option<TextureHandle>,
    /// RGBA color used while no texture is bound.
    pub base_color: [f32; 4],
}

impl Material {
    /// Material for a rebuild with the given options.
    pub fn for_options(options: &BuildOptions, textures: &TextureCache) -> Self {
        let texture_role = if options.use_uv_test {
            TextureRole::UvTest
        } else {
            TextureRole::Environment
        };

        Self {
            double_sided: true,
            texture_role,
            texture: textures.get(texture_role),
            base_color: DEFAULT_COLOR,
        }
    }
}

// =============================================================================
// BOUNDS
// =============================================================================

/// World-space extent of a scaled mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: DVec3,
    pub max: DVec3,
    pub center: DVec3,
    pub size: DVec3,
    /// Largest distance from `center` to any vertex.
    pub radius: f64,
}

impl Bounds {
    /// Measures `mesh` after a uniform `scale` about the origin.
    pub fn of_scaled(mesh: &Mesh, scale: f64) -> Self {
        let (local_min, local_max) = mesh.bounding_box();
        let min = local_min * scale;
        let max = local_max * scale;
        let center = (min + max) * 0.5;

        let radius = mesh
            .vertices()
            .iter()
            .map(|v| (*v * scale).distance(center))
            .fold(0.0, f64::max);

        Self {
            min,
            max,
            center,
            size: max - min,
            radius,
        }
    }
}

// =============================================================================
// RENDERABLE MESH
// =============================================================================

/// A fully assembled shape, ready to hand to a render backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableMesh {
    pub kind: ShapeKind,
    /// Non-indexed geometry in local coordinates, with UVs.
    pub mesh: Mesh,
    pub material: Material,
    /// Uniform scale of the object transform.
    pub scale: f64,
    pub bounds: Bounds,
}

impl RenderableMesh {
    /// Vertex positions with the object scale applied.
    pub fn world_positions(&self) -> Vec<DVec3> {
        self.mesh.vertices().iter().map(|v| *v * self.scale).collect()
    }
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Builds a shape with the default pipeline configuration.
///
/// Returns `Ok(None)` when the shape generates no volumes.
///
/// # Example
///
/// ```rust
/// use configurator_mesh::assembler::build;
/// use configurator_mesh::catalog::{BuildOptions, ShapeKind, ShapeParams};
/// use configurator_mesh::texture::TextureCache;
///
/// let params = ShapeParams::defaults(ShapeKind::CappedSquare).unwrap();
/// let built = build(&params, &BuildOptions::default(), &TextureCache::new()).unwrap();
/// let renderable = built.expect("square has a body");
/// assert_eq!(renderable.scale, 1.0);
/// assert!(renderable.material.double_sided);
/// ```
pub fn build(
    params: &ShapeParams,
    options: &BuildOptions,
    textures: &TextureCache,
) -> Result<Option<RenderableMesh>, MeshError> {
    build_with_config(params, options, textures, &PipelineConfig::default())
}

/// Builds a shape, enforcing the triangle budget of `config`.
pub fn build_with_config(
    params: &ShapeParams,
    options: &BuildOptions,
    textures: &TextureCache,
    config: &PipelineConfig,
) -> Result<Option<RenderableMesh>, MeshError> {
    let volumes = generate_volumes(params)?;
    assemble(params.kind(), volumes, options, textures, config)
}

/// Builds a shape from its name and a string-keyed parameter store.
///
/// Unknown names are logged and produce `Ok(None)`.
pub fn build_named(
    shape_type: &str,
    values: &ParameterValues,
    options: &BuildOptions,
    textures: &TextureCache,
) -> Result<Option<RenderableMesh>, MeshError> {
    let volumes = shape_volumes(shape_type, values)?;
    if volumes.is_empty() {
        return Ok(None);
    }

    let kind = shape_type.parse::<ShapeKind>()?;
    assemble(
        kind,
        volumes,
        options,
        textures,
        &PipelineConfig::default(),
    )
}

fn assemble(
    kind: ShapeKind,
    volumes: Vec<Volume>,
    options: &BuildOptions,
    textures: &TextureCache,
    config: &PipelineConfig,
) -> Result<Option<RenderableMesh>, MeshError> {
    if volumes.is_empty() {
        return Ok(None);
    }

    let options = options.normalized()?;
    let composite = compose(volumes)?;

    let count = composite.triangle_count();
    if count > config.max_triangles {
        return Err(MeshError::TooManyTriangles {
            count,
            max: config.max_triangles,
        });
    }

    let mesh = apply_cylindrical_uvs(&composite);
    let material = Material::for_options(&options, textures);
    let bounds = Bounds::of_scaled(&mesh, options.mesh_scale);

    debug!(
        shape = %kind,
        triangles = count,
        scale = options.mesh_scale,
        textured = material.texture.is_some(),
        "assembled renderable mesh"
    );

    Ok(Some(RenderableMesh {
        kind,
        mesh,
        material,
        scale: options.mesh_scale,
        bounds,
    }))
}
