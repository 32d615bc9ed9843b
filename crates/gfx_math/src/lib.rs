//! Math library for the gfx demos
//!
//! Small, `Copy`-friendly types for per-frame vector arithmetic.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector (positions, velocities, normals)
//! - [`Vec4`] - Homogeneous 4D vector (clip-space positions)
//! - [`Mat4`] - 4x4 column-major matrix, laid out the way graphics APIs expect
//! - [`Plane`] - Infinite plane defined by a point and a normal
//!
//! Colors live in [`color`] as plain `[f32; 4]` arrays.

mod vec3;
mod vec4;
pub mod mat4;
pub mod plane;
pub mod color;

pub use vec3::Vec3;
pub use vec4::Vec4;
pub use mat4::Mat4;
pub use plane::Plane;
pub use color::Rgba;
