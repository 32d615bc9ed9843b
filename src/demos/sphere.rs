use gfx_geometry::{uv_sphere, MeshBuffers};
use gfx_math::mat4;
use gfx_render::{LambertShader, OrbitCamera, ShadingFlags};

use super::Demo;
use crate::config::{CameraConfig, SphereDemoConfig};
use crate::error::AppError;
use crate::systems::{FrameTiming, RenderSystem};

/// A lit UV sphere seen from an orbiting camera
pub struct SphereDemo {
    sphere: MeshBuffers,
    shader: LambertShader,
    camera: OrbitCamera,
    flags: ShadingFlags,
    seconds: f32,
}

impl SphereDemo {
    pub fn new(config: &SphereDemoConfig, camera: &CameraConfig) -> Result<Self, AppError> {
        let mesh = uv_sphere(config.rings, config.radius)?.with_color(config.color);
        log::info!(
            "Sphere: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        let (shader, flags) = if config.shiny {
            (LambertShader::shiny(config.shininess), ShadingFlags::SHINY)
        } else {
            (LambertShader::default(), ShadingFlags::empty())
        };
        Ok(Self {
            sphere: MeshBuffers::from_mesh(&mesh),
            shader,
            camera: camera.to_orbit_camera(),
            flags,
            seconds: 0.0,
        })
    }
}

impl Demo for SphereDemo {
    fn name(&self) -> &'static str {
        "sphere"
    }

    fn update(&mut self, timing: &FrameTiming) {
        self.seconds = timing.seconds();
    }

    fn draw(&self, render: &mut RenderSystem) {
        render.begin_frame(self.camera.view(self.seconds), self.seconds, self.flags);
        render.draw(&self.sphere, &self.shader, mat4::IDENTITY, [1.0; 4]);
    }
}
