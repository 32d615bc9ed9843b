//! Shader programs
//!
//! A [`Shader`] plays the role of a compiled vertex + fragment program. The
//! vertex stage turns a [`Vertex`] into a clip-space position and a set of
//! [`Varyings`]; the rasterizer interpolates the varyings across the
//! triangle and the fragment stage turns them into a color.

use gfx_geometry::Vertex;
use gfx_math::{color, mat4, Rgba, Vec3, Vec4};

use crate::uniforms::{DrawUniforms, FrameUniforms, ShadingFlags, TerrainUniforms};

/// Number of floats in a packed [`Varyings`]
pub const VARYING_COUNT: usize = 16;

/// Ambient light added by the lit shaders
pub const AMBIENT: f32 = 0.1;

/// Values passed from the vertex stage to the fragment stage
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Varyings {
    /// View-space position
    pub position: Vec3,
    /// View-space normal (not renormalized after interpolation)
    pub normal: Vec3,
    /// Object-space normal
    pub object_normal: Vec3,
    pub color: Rgba,
    pub tex_coord: [f32; 2],
    /// Object-space height
    pub height: f32,
}

impl Varyings {
    pub fn to_array(&self) -> [f32; VARYING_COUNT] {
        let [px, py, pz] = self.position.to_array();
        let [nx, ny, nz] = self.normal.to_array();
        let [ox, oy, oz] = self.object_normal.to_array();
        let [r, g, b, a] = self.color;
        let [u, v] = self.tex_coord;
        [px, py, pz, nx, ny, nz, ox, oy, oz, r, g, b, a, u, v, self.height]
    }

    pub fn from_array(a: &[f32; VARYING_COUNT]) -> Self {
        Self {
            position: Vec3::new(a[0], a[1], a[2]),
            normal: Vec3::new(a[3], a[4], a[5]),
            object_normal: Vec3::new(a[6], a[7], a[8]),
            color: [a[9], a[10], a[11], a[12]],
            tex_coord: [a[13], a[14]],
            height: a[15],
        }
    }
}

/// Output of the vertex stage
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadedVertex {
    pub clip: Vec4,
    pub varyings: Varyings,
}

/// The standard vertex transform shared by every shader here
pub fn transform_vertex(v: &Vertex, frame: &FrameUniforms, draw: &DrawUniforms) -> ShadedVertex {
    let p = Vec3::from(v.position);
    let n = Vec3::from(v.normal);
    let view_pos = mat4::transform(draw.model_view, Vec4::point(p));
    ShadedVertex {
        clip: mat4::transform(frame.projection, view_pos),
        varyings: Varyings {
            position: view_pos.xyz(),
            normal: mat4::transform_direction(draw.model_view, n).normalized(),
            object_normal: n,
            color: v.color,
            tex_coord: v.tex_coord,
            height: p.y,
        },
    }
}

/// A vertex + fragment program
pub trait Shader {
    fn vertex(&self, v: &Vertex, frame: &FrameUniforms, draw: &DrawUniforms) -> ShadedVertex {
        transform_vertex(v, frame, draw)
    }

    fn fragment(&self, v: &Varyings, frame: &FrameUniforms, draw: &DrawUniforms) -> Rgba;
}

/// Unlit: vertex color times the draw tint
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatShader;

impl Shader for FlatShader {
    fn fragment(&self, v: &Varyings, frame: &FrameUniforms, draw: &DrawUniforms) -> Rgba {
        let c = color::modulate(v.color, draw.color);
        if frame.shading_flags().contains(ShadingFlags::PSYCHEDELIC) {
            hue_rotate(c, frame.seconds)
        } else {
            c
        }
    }
}

/// Diffuse lighting with an optional Blinn-Phong highlight
#[derive(Clone, Copy, Debug)]
pub struct LambertShader {
    pub ambient: f32,
    pub blinn_amount: f32,
    pub shininess: f32,
}

impl Default for LambertShader {
    fn default() -> Self {
        Self {
            ambient: AMBIENT,
            blinn_amount: 0.0,
            shininess: 32.0,
        }
    }
}

impl LambertShader {
    pub fn shiny(shininess: f32) -> Self {
        Self {
            blinn_amount: 1.0,
            shininess,
            ..Default::default()
        }
    }
}

impl Shader for LambertShader {
    fn fragment(&self, v: &Varyings, frame: &FrameUniforms, draw: &DrawUniforms) -> Rgba {
        let base = color::modulate(v.color, draw.color);
        let blinn = if frame.shading_flags().contains(ShadingFlags::SHINY) {
            self.blinn_amount.max(1.0)
        } else {
            self.blinn_amount
        };
        light(base, v.normal, frame, self.ambient, blinn, self.shininess)
    }
}

/// Height gradient with cliffs, lit like [`LambertShader`]
#[derive(Clone, Copy, Debug, Default)]
pub struct TerrainShader {
    pub uniforms: TerrainUniforms,
}

impl TerrainShader {
    pub fn new(uniforms: TerrainUniforms) -> Self {
        Self { uniforms }
    }

    /// Surface color before lighting
    pub fn albedo(&self, height: f32, object_normal: Vec3) -> Rgba {
        let u = &self.uniforms;
        if object_normal.normalized().y < 0.7 {
            return u.cliff_color;
        }
        let range = u.max_height - u.min_height;
        let t = if range > 0.0 {
            ((height - u.min_height) / range).clamp(0.0, 1.0)
        } else {
            0.5
        };
        if t < 0.5 {
            color::lerp(u.color1, u.color2, 2.0 * t)
        } else {
            color::lerp(u.color2, u.color3, 2.0 * t - 1.0)
        }
    }
}

impl Shader for TerrainShader {
    fn fragment(&self, v: &Varyings, frame: &FrameUniforms, _draw: &DrawUniforms) -> Rgba {
        let base = self.albedo(v.height, v.object_normal);
        light(
            base,
            v.normal,
            frame,
            AMBIENT,
            self.uniforms.blinn_amount,
            self.uniforms.shininess,
        )
    }
}

/// Ambient + diffuse + Blinn-Phong specular
fn light(base: Rgba, normal: Vec3, frame: &FrameUniforms, ambient: f32, blinn: f32, shininess: f32) -> Rgba {
    let n = normal.normalized();
    let diffuse = n.dot(frame.light_dir()).max(0.0);
    let specular = if blinn > 0.0 {
        blinn * n.dot(frame.halfway()).max(0.0).powf(shininess)
    } else {
        0.0
    };
    let lc = frame.light_color;
    [
        base[0] * (ambient + diffuse * lc[0]) + specular * lc[0],
        base[1] * (ambient + diffuse * lc[1]) + specular * lc[1],
        base[2] * (ambient + diffuse * lc[2]) + specular * lc[2],
        base[3],
    ]
}

/// Rotate a color's hue by `angle` radians around the grey axis
pub fn hue_rotate(c: Rgba, angle: f32) -> Rgba {
    let (s, cos) = angle.sin_cos();
    let k = (1.0 - cos) / 3.0;
    let q = s / 3.0_f32.sqrt();
    let (a, b, d) = (cos + k, k - q, k + q);
    [
        c[0] * a + c[1] * b + c[2] * d,
        c[0] * d + c[1] * a + c[2] * b,
        c[0] * b + c[1] * d + c[2] * a,
        c[3],
    ]
}
