//! Software rendering system
//!
//! Owns the framebuffer and the per-frame uniforms. Demos open a frame with
//! a view matrix, issue draws, and the runner saves the result.

use std::path::Path;

use gfx_geometry::MeshBuffers;
use gfx_math::{Mat4, Rgba, Vec3};
use gfx_render::{
    draw_mesh, DrawStats, DrawUniforms, Framebuffer, FrameUniforms, RenderError,
    RenderState, Shader, ShadingFlags,
};

use crate::config::{CameraConfig, OutputConfig, RenderingConfig};

/// Draws demo frames into an in-memory framebuffer
pub struct RenderSystem {
    framebuffer: Framebuffer,
    projection: Mat4,
    state: RenderState,
    flags: ShadingFlags,
    background: Rgba,
    light_dir: Vec3,
    light_color: [f32; 3],
    frame: FrameUniforms,
    stats: DrawStats,
}

impl RenderSystem {
    /// Create render system from config
    pub fn new(
        output: &OutputConfig,
        camera: &CameraConfig,
        rendering: &RenderingConfig,
    ) -> Result<Self, RenderError> {
        let framebuffer = Framebuffer::new(output.width, output.height)?;
        let projection = camera.to_projection().matrix(output.width, output.height);
        Ok(Self {
            framebuffer,
            projection,
            state: rendering.to_render_state(),
            flags: rendering.shading_flags(),
            background: rendering.background_color,
            light_dir: rendering.light_dir(),
            light_color: rendering.light_color,
            frame: FrameUniforms::new(projection, gfx_math::mat4::IDENTITY, 0.0),
            stats: DrawStats::default(),
        })
    }

    /// Replace the projection used by later frames
    pub fn set_projection_matrix(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    /// Clear the targets and fill this frame's uniforms
    pub fn begin_frame(&mut self, view: Mat4, seconds: f32, extra_flags: ShadingFlags) {
        self.framebuffer.clear(self.background);
        self.frame = FrameUniforms::new(self.projection, view, seconds)
            .with_light(self.light_dir, self.light_color)
            .with_flags(self.flags | extra_flags);
        self.stats = DrawStats::default();
    }

    /// Draw one mesh with the current frame's uniforms
    pub fn draw<S: Shader + ?Sized>(
        &mut self,
        buffers: &MeshBuffers,
        shader: &S,
        model: Mat4,
        color: Rgba,
    ) -> DrawStats {
        let draw = DrawUniforms::new(model, self.frame.view).with_color(color);
        let stats = draw_mesh(&mut self.framebuffer, buffers, shader, &self.frame, &draw, self.state);
        self.stats += stats;
        stats
    }

    pub fn frame_uniforms(&self) -> &FrameUniforms {
        &self.frame
    }

    /// Totals for the draws since [`begin_frame`](Self::begin_frame)
    pub fn frame_stats(&self) -> DrawStats {
        self.stats
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        self.framebuffer.save_png(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfx_geometry::icosphere;
    use gfx_math::mat4;
    use gfx_render::FlatShader;

    fn small_system() -> RenderSystem {
        let output = OutputConfig {
            width: 32,
            height: 32,
            ..Default::default()
        };
        RenderSystem::new(&output, &CameraConfig::default(), &RenderingConfig::default()).unwrap()
    }

    #[test]
    fn test_zero_size_output_rejected() {
        let output = OutputConfig {
            width: 0,
            ..Default::default()
        };
        let result = RenderSystem::new(&output, &CameraConfig::default(), &RenderingConfig::default());
        assert!(matches!(result, Err(RenderError::InvalidViewport { .. })));
    }

    #[test]
    fn test_begin_frame_clears_to_background() {
        let mut render = small_system();
        render.begin_frame(mat4::IDENTITY, 0.0, ShadingFlags::empty());
        let bg = RenderingConfig::default().background_color;
        assert_eq!(render.framebuffer().pixel(0, 0), Some(bg));
        assert_eq!(render.frame_stats(), DrawStats::default());
    }

    #[test]
    fn test_sphere_in_front_of_camera_is_drawn() {
        let mut render = small_system();
        let view = mat4::look_at(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y);
        render.begin_frame(view, 0.0, ShadingFlags::SHINY);
        assert!(render.frame_uniforms().shading_flags().contains(ShadingFlags::SHINY));

        let buffers = MeshBuffers::from_mesh(&icosphere(1.0, 1));
        let stats = render.draw(&buffers, &FlatShader, mat4::IDENTITY, [1.0, 0.0, 0.0, 1.0]);
        assert!(stats.fragments_written > 0);
        assert_eq!(render.frame_stats(), stats);
        assert_eq!(render.framebuffer().pixel(16, 16), Some([1.0, 0.0, 0.0, 1.0]));
    }
}
