//! Upload-ready vertex and index buffers
//!
//! These types mirror what a graphics API expects: an interleaved vertex
//! array of `Pod` structs and a tightly packed index array. All types derive
//! Pod and Zeroable so they can be viewed as raw bytes with `bytemuck`.

use bytemuck::{Pod, Zeroable};

use crate::mesh::Mesh;

/// Index buffers switch to 32-bit indices above this many vertices
pub const MAX_U16_VERTICES: usize = 65_536;

/// An interleaved mesh vertex
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Object-space position
    pub position: [f32; 3],
    /// Unit normal, or zero when the mesh has none
    pub normal: [f32; 3],
    /// Texture coordinate
    pub tex_coord: [f32; 2],
    /// Linear RGBA color
    pub color: [f32; 4],
}

impl Vertex {
    /// Size of one vertex in bytes
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Triangle indices, narrowed to 16 bits when they fit
#[derive(Clone, Debug, PartialEq)]
pub enum IndexBuffer {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl IndexBuffer {
    /// Pack triangle indices for a mesh with `vertex_count` vertices
    pub fn from_triangles(triangles: &[[u32; 3]], vertex_count: usize) -> Self {
        let flat = triangles.iter().flatten().copied();
        if vertex_count <= MAX_U16_VERTICES {
            IndexBuffer::U16(flat.map(|i| i as u16).collect())
        } else {
            IndexBuffer::U32(flat.collect())
        }
    }

    pub fn len(&self) -> usize {
        match self {
            IndexBuffer::U16(v) => v.len(),
            IndexBuffer::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index at position `i`, widened to u32
    pub fn get(&self, i: usize) -> Option<u32> {
        match self {
            IndexBuffer::U16(v) => v.get(i).map(|&x| x as u32),
            IndexBuffer::U32(v) => v.get(i).copied(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            IndexBuffer::U16(v) => bytemuck::cast_slice(v),
            IndexBuffer::U32(v) => bytemuck::cast_slice(v),
        }
    }
}

/// A mesh packed for drawing
#[derive(Clone, Debug)]
pub struct MeshBuffers {
    pub vertices: Vec<Vertex>,
    pub indices: IndexBuffer,
}

impl MeshBuffers {
    /// Interleave the mesh attributes
    ///
    /// Missing normals and texture coordinates become zero; missing colors
    /// become opaque white.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let vertices = mesh
            .positions
            .iter()
            .enumerate()
            .map(|(i, p)| Vertex {
                position: p.to_array(),
                normal: mesh.normals.get(i).map_or([0.0; 3], |n| n.to_array()),
                tex_coord: mesh.tex_coords.get(i).copied().unwrap_or([0.0; 2]),
                color: mesh.colors.get(i).copied().unwrap_or([1.0; 4]),
            })
            .collect::<Vec<_>>();

        let indices = IndexBuffer::from_triangles(&mesh.triangles, vertices.len());
        log::debug!(
            "Packed mesh: {} vertices ({} bytes), {} indices ({} bytes)",
            vertices.len(),
            vertices.len() * Vertex::STRIDE,
            indices.len(),
            indices.as_bytes().len()
        );

        Self { vertices, indices }
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        self.indices.as_bytes()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex indices of triangle `i`
    pub fn triangle(&self, i: usize) -> Option<[u32; 3]> {
        let base = i * 3;
        Some([
            self.indices.get(base)?,
            self.indices.get(base + 1)?,
            self.indices.get(base + 2)?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfx_math::Vec3;

    fn triangle_mesh() -> Mesh {
        Mesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![[0, 1, 2]],
        )
        .unwrap()
    }

    #[test]
    fn test_vertex_layout() {
        // 3 + 3 + 2 + 4 floats
        assert_eq!(Vertex::STRIDE, 48);
    }

    #[test]
    fn test_defaults_for_missing_attributes() {
        let buffers = MeshBuffers::from_mesh(&triangle_mesh());
        let v = buffers.vertices[1];
        assert_eq!(v.position, [1.0, 0.0, 0.0]);
        assert_eq!(v.normal, [0.0; 3]);
        assert_eq!(v.tex_coord, [0.0; 2]);
        assert_eq!(v.color, [1.0; 4]);
    }

    #[test]
    fn test_small_mesh_uses_u16() {
        let buffers = MeshBuffers::from_mesh(&triangle_mesh());
        assert!(matches!(buffers.indices, IndexBuffer::U16(_)));
        assert_eq!(buffers.index_bytes().len(), 6);
        assert_eq!(buffers.vertex_bytes().len(), 3 * Vertex::STRIDE);
        assert_eq!(buffers.triangle(0), Some([0, 1, 2]));
        assert_eq!(buffers.triangle(1), None);
    }

    #[test]
    fn test_index_width_threshold() {
        let tris = [[0, 1, 2]];
        assert!(matches!(
            IndexBuffer::from_triangles(&tris, MAX_U16_VERTICES),
            IndexBuffer::U16(_)
        ));
        let wide = IndexBuffer::from_triangles(&tris, MAX_U16_VERTICES + 1);
        assert!(matches!(wide, IndexBuffer::U32(_)));
        assert_eq!(wide.as_bytes().len(), 12);
    }
}
