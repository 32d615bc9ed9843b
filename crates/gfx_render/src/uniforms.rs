//! Uniform blocks
//!
//! These types are laid out the way a shader uniform buffer expects:
//! `repr(C)`, 16-byte rows, explicit padding. All types derive Pod and
//! Zeroable so a frame's uniforms can be viewed as raw bytes.

use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};
use gfx_math::color::{BLUE, CLIFF_BROWN, GREEN, RED};
use gfx_math::{mat4, Mat4, Rgba, Vec3};

bitflags! {
    /// Per-frame shading switches, stored in [`FrameUniforms::flags`]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ShadingFlags: u32 {
        /// Cycle hues over time in the flat shader
        const PSYCHEDELIC = 1 << 0;
        /// Add the Blinn-Phong specular term
        const SHINY = 1 << 1;
        /// Blend in linear space and store sRGB-encoded colors
        const SRGB = 1 << 2;
    }
}

/// Uniforms shared by every draw in a frame
/// Layout: 176 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    /// Projection matrix (64 bytes)
    pub projection: [[f32; 4]; 4],
    /// View matrix (64 bytes)
    pub view: [[f32; 4]; 4],
    /// View-space direction toward the light + seconds since start (16 bytes)
    pub light_dir: [f32; 3],
    pub seconds: f32,
    /// Light color + shading flag bits (16 bytes)
    pub light_color: [f32; 3],
    pub flags: u32,
    /// Blinn-Phong halfway vector + padding (16 bytes)
    pub halfway: [f32; 3],
    pub _padding: f32,
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self::new(mat4::IDENTITY, mat4::IDENTITY, 0.0)
    }
}

impl FrameUniforms {
    /// Uniforms with a white light shining down the view direction
    pub fn new(projection: Mat4, view: Mat4, seconds: f32) -> Self {
        let mut uniforms = Self {
            projection,
            view,
            light_dir: [0.0, 0.0, 1.0],
            seconds,
            light_color: [1.0, 1.0, 1.0],
            flags: 0,
            halfway: [0.0, 0.0, 1.0],
            _padding: 0.0,
        };
        uniforms.set_view_light(Vec3::Z);
        uniforms
    }

    /// Set the light from a world-space direction pointing at the light
    pub fn with_light(mut self, world_dir: Vec3, color: [f32; 3]) -> Self {
        self.set_view_light(mat4::transform_direction(self.view, world_dir));
        self.light_color = color;
        self
    }

    pub fn with_flags(mut self, flags: ShadingFlags) -> Self {
        self.flags = flags.bits();
        self
    }

    pub fn shading_flags(&self) -> ShadingFlags {
        ShadingFlags::from_bits_truncate(self.flags)
    }

    /// Set the view-space light and recompute the halfway vector
    ///
    /// The eye looks down -Z, so the direction toward the viewer is +Z.
    fn set_view_light(&mut self, dir: Vec3) {
        let l = dir.normalized();
        self.light_dir = l.to_array();
        self.halfway = (l + Vec3::Z).normalized().to_array();
    }

    pub fn light_dir(&self) -> Vec3 {
        self.light_dir.into()
    }

    pub fn halfway(&self) -> Vec3 {
        self.halfway.into()
    }

    pub fn view_projection(&self) -> Mat4 {
        mat4::mul(self.projection, self.view)
    }
}

/// Uniforms for a single draw call
/// Layout: 144 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct DrawUniforms {
    /// Object to world (64 bytes)
    pub model: [[f32; 4]; 4],
    /// Object to view: view · model (64 bytes)
    pub model_view: [[f32; 4]; 4],
    /// Tint multiplied onto vertex colors (16 bytes)
    pub color: [f32; 4],
}

impl Default for DrawUniforms {
    fn default() -> Self {
        Self::new(mat4::IDENTITY, mat4::IDENTITY)
    }
}

impl DrawUniforms {
    pub fn new(model: Mat4, view: Mat4) -> Self {
        Self {
            model,
            model_view: mat4::mul(view, model),
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }
}

/// Uniforms for the terrain shader
/// Layout: 80 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TerrainUniforms {
    /// Low, middle and high gradient stops (48 bytes)
    pub color1: [f32; 4],
    pub color2: [f32; 4],
    pub color3: [f32; 4],
    /// Used where the surface is steep (16 bytes)
    pub cliff_color: [f32; 4],
    /// Height range of the mesh + specular parameters (16 bytes)
    pub min_height: f32,
    pub max_height: f32,
    pub blinn_amount: f32,
    pub shininess: f32,
}

impl Default for TerrainUniforms {
    fn default() -> Self {
        Self {
            color1: BLUE,
            color2: RED,
            color3: GREEN,
            cliff_color: CLIFF_BROWN,
            min_height: 0.0,
            max_height: 1.0,
            blinn_amount: 0.0,
            shininess: 32.0,
        }
    }
}

impl TerrainUniforms {
    /// Gradient over the given height range
    pub fn for_heights(min_height: f32, max_height: f32) -> Self {
        Self {
            min_height,
            max_height,
            ..Default::default()
        }
    }

    /// Turn the specular highlight on or off
    pub fn with_shiny(mut self, shiny: bool) -> Self {
        self.blinn_amount = if shiny { 1.0 } else { 0.0 };
        self
    }
}
