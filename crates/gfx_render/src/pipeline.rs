//! Draw calls
//!
//! [`draw_mesh`] is the software equivalent of binding a vertex array and
//! issuing an indexed draw: every vertex goes through the shader's vertex
//! stage once, then each triangle is projected, scan converted, depth
//! tested, shaded and blended into the framebuffer.

use gfx_geometry::MeshBuffers;
use gfx_math::{color, Rgba};

use crate::framebuffer::Framebuffer;
use crate::raster::{scanline, RasterVertex};
use crate::shading::Shader;
use crate::uniforms::{DrawUniforms, FrameUniforms};

/// Fixed-function state for a draw
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderState {
    /// Discard fragments not nearer than the stored depth
    pub depth_test: bool,
    /// src-alpha / one-minus-src-alpha blending
    pub blend: bool,
    /// Blend in linear space and store sRGB-encoded colors
    pub srgb: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            depth_test: true,
            blend: true,
            srgb: false,
        }
    }
}

impl RenderState {
    pub fn with_depth_test(mut self, enabled: bool) -> Self {
        self.depth_test = enabled;
        self
    }

    pub fn with_blend(mut self, enabled: bool) -> Self {
        self.blend = enabled;
        self
    }

    pub fn with_srgb(mut self, enabled: bool) -> Self {
        self.srgb = enabled;
        self
    }
}

/// Counters from one draw call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub triangles_submitted: usize,
    /// Triangles with a vertex at or behind the eye
    pub triangles_dropped: usize,
    pub fragments_written: usize,
}

impl std::ops::AddAssign for DrawStats {
    fn add_assign(&mut self, other: Self) {
        self.triangles_submitted += other.triangles_submitted;
        self.triangles_dropped += other.triangles_dropped;
        self.fragments_written += other.fragments_written;
    }
}

/// Draw indexed triangles with `shader`
pub fn draw_mesh<S: Shader + ?Sized>(
    fb: &mut Framebuffer,
    buffers: &MeshBuffers,
    shader: &S,
    frame: &FrameUniforms,
    draw: &DrawUniforms,
    state: RenderState,
) -> DrawStats {
    let (width, height) = (fb.width(), fb.height());
    let shaded: Vec<_> = buffers
        .vertices
        .iter()
        .map(|v| shader.vertex(v, frame, draw))
        .collect();

    let mut stats = DrawStats::default();
    for t in 0..buffers.triangle_count() {
        let Some(indices) = buffers.triangle(t) else {
            continue;
        };
        stats.triangles_submitted += 1;

        let mut tri = Vec::with_capacity(3);
        for i in indices {
            let projected = shaded
                .get(i as usize)
                .and_then(|v| RasterVertex::from_clip(v.clip, &v.varyings, width, height));
            if let Some(rv) = projected {
                tri.push(rv);
            }
        }
        let Ok(tri) = <[RasterVertex; 3]>::try_from(tri) else {
            stats.triangles_dropped += 1;
            continue;
        };

        scanline(tri, width, height, |x, y, frag| {
            if !(-1.0..=1.0).contains(&frag.z) {
                return;
            }
            if state.depth_test && !fb.depth_test(x, y, frag.z) {
                return;
            }
            let src = shader.fragment(&frag.varyings(), frame, draw);
            let dst = fb.pixel(x, y).unwrap_or(color::BLACK);
            fb.set_pixel(x, y, blend(src, dst, state));
            stats.fragments_written += 1;
        });
    }
    log::trace!(
        "draw: {} triangles, {} dropped, {} fragments",
        stats.triangles_submitted,
        stats.triangles_dropped,
        stats.fragments_written
    );
    stats
}

/// Combine a fragment with the stored color
///
/// In sRGB mode the stored color is sRGB-encoded: it is decoded, blended
/// in linear space and encoded again.
pub fn blend(src: Rgba, dst: Rgba, state: RenderState) -> Rgba {
    let src = clamp(src);
    if state.srgb {
        let dst = color::map_rgb(dst, color::srgb_to_linear);
        let mixed = if state.blend { over(src, dst) } else { src };
        color::map_rgb(mixed, color::linear_to_srgb)
    } else if state.blend {
        over(src, dst)
    } else {
        src
    }
}

fn over(src: Rgba, dst: Rgba) -> Rgba {
    let a = src[3];
    [
        src[0] * a + dst[0] * (1.0 - a),
        src[1] * a + dst[1] * (1.0 - a),
        src[2] * a + dst[2] * (1.0 - a),
        a + dst[3] * (1.0 - a),
    ]
}

fn clamp(c: Rgba) -> Rgba {
    c.map(|v| v.clamp(0.0, 1.0))
}
