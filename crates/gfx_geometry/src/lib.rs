//! Geometry for the gfx demos
//!
//! This crate builds triangle meshes and packs them for drawing:
//! - [`Mesh`] with per-vertex normals, texture coordinates and colors
//! - Sphere generators (icosphere, UV sphere)
//! - Fault-method procedural terrain
//! - The procedural block-I logo
//! - [`MeshBuffers`]: interleaved `Pod` vertices plus a 16/32-bit index buffer

pub mod buffers;
pub mod error;
pub mod logo;
pub mod mesh;
pub mod sphere;
pub mod terrain;

pub use buffers::{IndexBuffer, MeshBuffers, Vertex};
pub use error::GeometryError;
pub use logo::block_i_logo;
pub use mesh::{Aabb, Mesh};
pub use sphere::{icosphere, uv_sphere};
pub use terrain::{build_terrain, FaultTerrainParams, Heightmap, TERRAIN_MODEL};
