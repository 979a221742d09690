//! # Mesh Handle
//!
//! WASM-friendly wrapper for an assembled shape that can be transferred to
//! JavaScript.

use configurator_mesh::{RenderableMesh, TextureRole};
use wasm_bindgen::prelude::*;

/// A built shape, flattened into typed-array friendly buffers.
///
/// Geometry is non-indexed: every three vertices form one triangle.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const mesh = build_shape("capped cylinder", JSON.stringify(params), "{}");
///
/// const geometry = new THREE.BufferGeometry();
/// geometry.setAttribute('position', new THREE.BufferAttribute(mesh.positions(), 3));
/// geometry.setAttribute('uv', new THREE.BufferAttribute(mesh.uvs(), 2));
///
/// const object = new THREE.Mesh(geometry, material);
/// object.scale.setScalar(mesh.scale);
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct MeshHandle {
    /// Vertex positions as [x, y, z, x, y, z, ...]
    positions: Vec<f32>,
    /// Texture coordinates as [u, v, u, v, ...]
    uvs: Vec<f32>,
    vertex_count: u32,
    triangle_count: u32,
    scale: f64,
    center: [f64; 3],
    size: [f64; 3],
    radius: f64,
    double_sided: bool,
    texture_role: String,
    texture_url: String,
}

#[wasm_bindgen]
impl MeshHandle {
    /// Returns the number of vertices.
    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Returns the number of triangles.
    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> u32 {
        self.triangle_count
    }

    /// Uniform scale the object should be rendered with.
    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the vertex positions as a Float32Array.
    ///
    /// Length: vertex_count * 3
    #[wasm_bindgen]
    pub fn positions(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.positions[..])
    }

    /// Returns the texture coordinates as a Float32Array.
    ///
    /// Length: vertex_count * 2
    #[wasm_bindgen]
    pub fn uvs(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.uvs[..])
    }

    /// World-space bounding box center as [x, y, z].
    #[wasm_bindgen]
    pub fn bounds_center(&self) -> Vec<f64> {
        self.center.to_vec()
    }

    /// World-space bounding box size as [x, y, z].
    #[wasm_bindgen]
    pub fn bounds_size(&self) -> Vec<f64> {
        self.size.to_vec()
    }

    /// Radius of the bounding sphere around the bounds center.
    #[wasm_bindgen(getter)]
    pub fn bounds_radius(&self) -> f64 {
        self.radius
    }

    #[wasm_bindgen(getter)]
    pub fn double_sided(&self) -> bool {
        self.double_sided
    }

    /// Texture the material wants, `"uvTest"` or `"environment"`.
    #[wasm_bindgen(getter)]
    pub fn texture_role(&self) -> String {
        self.texture_role.clone()
    }

    /// Where the host should load the requested texture from.
    #[wasm_bindgen(getter)]
    pub fn texture_url(&self) -> String {
        self.texture_url.clone()
    }

    /// Returns true if the mesh is empty.
    #[wasm_bindgen]
    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }
}

impl MeshHandle {
    /// Creates a MeshHandle from an assembled shape.
    pub fn from_renderable(renderable: &RenderableMesh) -> Self {
        let mesh = &renderable.mesh;
        let bounds = &renderable.bounds;
        let role = renderable.material.texture_role;

        Self {
            positions: mesh.vertices_f32(),
            uvs: mesh.uvs_f32().unwrap_or_default(),
            vertex_count: u32::try_from(mesh.vertex_count()).unwrap_or(u32::MAX),
            triangle_count: u32::try_from(mesh.triangle_count()).unwrap_or(u32::MAX),
            scale: renderable.scale,
            center: bounds.center.to_array(),
            size: bounds.size.to_array(),
            radius: bounds.radius,
            double_sided: renderable.material.double_sided,
            texture_role: role_name(role).to_string(),
            texture_url: role.source_url().to_string(),
        }
    }

    /// Position buffer without crossing into JavaScript.
    pub fn position_slice(&self) -> &[f32] {
        &self.positions
    }

    /// UV buffer without crossing into JavaScript.
    pub fn uv_slice(&self) -> &[f32] {
        &self.uvs
    }
}

fn role_name(role: TextureRole) -> &'static str {
    match role {
        TextureRole::UvTest => "uvTest",
        TextureRole::Environment => "environment",
    }
}
