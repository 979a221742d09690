//! # Mesh Data Structure
//!
//! Core mesh representation with vertices, triangles, and an optional UV
//! attribute.

use config::constants::EPSILON;
use glam::{DMat4, DVec2, DVec3};
use std::collections::HashSet;

/// A triangle mesh with vertices and indices.
///
/// All geometry calculations use f64 internally. Export to f32 only
/// happens at the WASM boundary for GPU rendering.
///
/// # Example
///
/// ```rust
/// use configurator_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions (f64 for precision)
    vertices: Vec<DVec3>,
    /// Triangle indices (3 indices per triangle)
    triangles: Vec<[u32; 3]>,
    /// Optional texture coordinates, one per vertex
    uvs: Option<Vec<DVec2>>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
            uvs: None,
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the triangle at the given index.
    #[inline]
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        self.triangles[index]
    }

    /// Returns the three corner positions of a triangle.
    #[inline]
    pub fn triangle_positions(&self, index: usize) -> [DVec3; 3] {
        let [a, b, c] = self.triangles[index];
        [self.vertex(a), self.vertex(b), self.vertex(c)]
    }

    /// Sets the texture coordinate attribute.
    pub fn set_uvs(&mut self, uvs: Vec<DVec2>) {
        self.uvs = Some(uvs);
    }

    /// Returns the texture coordinates.
    pub fn uvs(&self) -> Option<&[DVec2]> {
        self.uvs.as_deref()
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }

    /// Transforms all vertices by a 4x4 matrix.
    ///
    /// Texture coordinates are left untouched.
    pub fn transform(&mut self, matrix: &DMat4) {
        for v in &mut self.vertices {
            *v = matrix.transform_point3(*v);
        }
    }

    /// Translates the mesh by a vector.
    ///
    /// # Example
    ///
    /// ```rust
    /// use configurator_mesh::Mesh;
    /// use glam::DVec3;
    ///
    /// let mut mesh = Mesh::new();
    /// mesh.add_vertex(DVec3::ZERO);
    /// mesh.translate(DVec3::new(10.0, 0.0, 0.0));
    /// assert_eq!(mesh.vertex(0).x, 10.0);
    /// ```
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Merges another mesh into this one.
    ///
    /// The UV attribute survives only if both meshes carry one.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&other.vertices);

        for tri in &other.triangles {
            self.triangles
                .push([tri[0] + offset, tri[1] + offset, tri[2] + offset]);
        }

        self.uvs = match (self.uvs.take(), &other.uvs) {
            (Some(mut own), Some(theirs)) => {
                own.extend_from_slice(theirs);
                Some(own)
            }
            _ => None,
        };
    }

    /// Returns a copy in which every triangle corner owns its vertex.
    ///
    /// Vertex `3 * t + k` is corner `k` of triangle `t`. Existing UVs are
    /// duplicated along with their positions.
    pub fn to_non_indexed(&self) -> Mesh {
        let corner_count = self.triangles.len() * 3;
        let mut result = Mesh::with_capacity(corner_count, self.triangles.len());
        let mut uvs = self.uvs.as_ref().map(|_| Vec::with_capacity(corner_count));

        for tri in &self.triangles {
            let base = result.vertices.len() as u32;
            for &index in tri {
                result.vertices.push(self.vertex(index));
                if let (Some(out), Some(source)) = (uvs.as_mut(), self.uvs.as_ref()) {
                    out.push(source[index as usize]);
                }
            }
            result.add_triangle(base, base + 1, base + 2);
        }

        result.uvs = uvs;
        result
    }

    /// Counts directed edges whose opposite edge is missing.
    ///
    /// A closed, consistently wound surface has no such edges.
    pub fn boundary_edge_count(&self) -> usize {
        let mut edges = HashSet::with_capacity(self.triangles.len() * 3);
        for tri in &self.triangles {
            for k in 0..3 {
                edges.insert((tri[k], tri[(k + 1) % 3]));
            }
        }

        edges
            .iter()
            .filter(|(a, b)| !edges.contains(&(*b, *a)))
            .count()
    }

    /// Returns true if every edge is shared by a pair of opposite half-edges.
    pub fn is_closed(&self) -> bool {
        !self.triangles.is_empty() && self.boundary_edge_count() == 0
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle indices are valid
    /// - No triangle repeats an index
    /// - All positions are finite
    /// - The UV attribute, if present, has one entry per vertex
    ///
    /// Zero-area triangles are allowed; squashed caps produce them.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        let indices_ok = self.triangles.iter().all(|tri| {
            tri.iter().all(|&i| i < vertex_count)
                && tri[0] != tri[1]
                && tri[1] != tri[2]
                && tri[0] != tri[2]
        });

        let positions_ok = self.vertices.iter().all(|v| v.is_finite());

        let uvs_ok = self
            .uvs
            .as_ref()
            .map_or(true, |uvs| uvs.len() == self.vertices.len());

        indices_ok && positions_ok && uvs_ok
    }

    /// Returns the total surface area.
    pub fn surface_area(&self) -> f64 {
        (0..self.triangles.len())
            .map(|t| {
                let [a, b, c] = self.triangle_positions(t);
                (b - a).cross(c - a).length() * 0.5
            })
            .filter(|area| *area > EPSILON)
            .sum()
    }

    /// Exports vertices as f32 array for GPU.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn vertices_f32(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.vertices.len() * 3);
        for v in &self.vertices {
            result.push(v.x as f32);
            result.push(v.y as f32);
            result.push(v.z as f32);
        }
        result
    }

    /// Exports triangle indices as u32 array for GPU.
    ///
    /// Returns flattened [i0, i1, i2, i0, i1, i2, ...] array.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// Exports texture coordinates as f32 array for GPU.
    ///
    /// Returns flattened [u, v, u, v, ...] array, or `None` without UVs.
    pub fn uvs_f32(&self) -> Option<Vec<f32>> {
        self.uvs.as_ref().map(|uvs| {
            let mut result = Vec::with_capacity(uvs.len() * 2);
            for uv in uvs {
                result.push(uv.x as f32);
                result.push(uv.y as f32);
            }
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::Y);
        mesh.add_triangle(0, 1, 2);
        mesh
    }

    /// Tetrahedron with outward winding.
    fn tetrahedron() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::Y);
        mesh.add_vertex(DVec3::Z);
        mesh.add_triangle(0, 2, 1);
        mesh.add_triangle(0, 1, 3);
        mesh.add_triangle(0, 3, 2);
        mesh.add_triangle(1, 2, 3);
        mesh
    }

    #[test]
    fn test_mesh_new() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.uvs().is_none());
    }

    #[test]
    fn test_mesh_add_vertex() {
        let mut mesh = Mesh::new();
        let idx = mesh.add_vertex(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(idx, 0);
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.vertex(0), DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_mesh_bounding_box() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(-1.0, -2.0, -3.0));
        mesh.add_vertex(DVec3::new(4.0, 5.0, 6.0));
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, DVec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_mesh_transform_scale_y() {
        let mut mesh = unit_triangle();
        mesh.transform(&DMat4::from_scale(DVec3::new(1.0, 0.5, 1.0)));
        assert_eq!(mesh.vertex(2), DVec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_mesh_validate_valid() {
        assert!(unit_triangle().validate());
    }

    #[test]
    fn test_mesh_validate_invalid_index() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_triangle(0, 1, 2);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_mesh_validate_uv_length_mismatch() {
        let mut mesh = unit_triangle();
        mesh.set_uvs(vec![DVec2::ZERO]);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_mesh_merge_offsets_indices() {
        let mut mesh1 = unit_triangle();
        let mut mesh2 = unit_triangle();
        mesh2.translate(DVec3::Z);

        mesh1.merge(&mesh2);
        assert_eq!(mesh1.vertex_count(), 6);
        assert_eq!(mesh1.triangle_count(), 2);
        assert_eq!(mesh1.triangle(1), [3, 4, 5]);
    }

    #[test]
    fn test_mesh_merge_drops_partial_uvs() {
        let mut mesh1 = unit_triangle();
        mesh1.set_uvs(vec![DVec2::ZERO; 3]);
        mesh1.merge(&unit_triangle());
        assert!(mesh1.uvs().is_none());
    }

    #[test]
    fn test_to_non_indexed_duplicates_corners() {
        let mesh = tetrahedron();
        let flat = mesh.to_non_indexed();
        assert_eq!(flat.vertex_count(), 12);
        assert_eq!(flat.triangle_count(), 4);
        assert_eq!(flat.triangle(3), [9, 10, 11]);
        assert_eq!(flat.triangle_positions(3), mesh.triangle_positions(3));
    }

    #[test]
    fn test_closed_tetrahedron() {
        let mesh = tetrahedron();
        assert_eq!(mesh.boundary_edge_count(), 0);
        assert!(mesh.is_closed());
    }

    #[test]
    fn test_open_triangle_has_boundary() {
        let mesh = unit_triangle();
        assert_eq!(mesh.boundary_edge_count(), 3);
        assert!(!mesh.is_closed());
    }

    #[test]
    fn test_surface_area() {
        let mesh = unit_triangle();
        assert!((mesh.surface_area() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_mesh_export_buffers() {
        let mut mesh = unit_triangle();
        mesh.set_uvs(vec![DVec2::new(0.25, 0.75); 3]);
        assert_eq!(mesh.vertices_f32().len(), 9);
        assert_eq!(mesh.indices_u32(), vec![0, 1, 2]);
        assert_eq!(mesh.uvs_f32(), Some(vec![0.25, 0.75, 0.25, 0.75, 0.25, 0.75]));
    }
}
