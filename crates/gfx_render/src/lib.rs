//! Software rendering library
//!
//! This crate draws [`MeshBuffers`](gfx_geometry::MeshBuffers) into an
//! in-memory framebuffer the way a GPU pipeline would: per-frame and
//! per-draw uniforms, a vertex and fragment stage, scan conversion with
//! perspective-correct interpolation, depth testing and alpha blending.
//!
//! ## Key Components
//!
//! - [`uniforms`] - `Pod` uniform blocks filled each frame
//! - [`shading::Shader`] - Vertex/fragment programs as Rust types
//! - [`raster`] - DDA scanline conversion
//! - [`pipeline::draw_mesh`] - Runs a shader over a mesh into a framebuffer
//! - [`framebuffer::Framebuffer`] - Color and depth targets, PNG export
//! - [`camera`] - Orbit camera and perspective projection

pub mod camera;
pub mod error;
pub mod framebuffer;
pub mod pipeline;
pub mod raster;
pub mod shading;
pub mod uniforms;

pub use camera::{OrbitCamera, Projection};
pub use error::RenderError;
pub use framebuffer::Framebuffer;
pub use pipeline::{draw_mesh, DrawStats, RenderState};
pub use shading::{FlatShader, LambertShader, Shader, TerrainShader, Varyings};
pub use uniforms::{DrawUniforms, FrameUniforms, ShadingFlags, TerrainUniforms};
