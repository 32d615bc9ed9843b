use gfx_geometry::{build_terrain, MeshBuffers, TERRAIN_MODEL};
use gfx_render::{OrbitCamera, ShadingFlags, TerrainShader, TerrainUniforms};
use rand::Rng;

use super::Demo;
use crate::config::{CameraConfig, TerrainDemoConfig};
use crate::error::AppError;
use crate::systems::{FrameTiming, RenderSystem};

/// Fault-method terrain colored by height
pub struct TerrainDemo {
    terrain: MeshBuffers,
    shader: TerrainShader,
    camera: OrbitCamera,
    flags: ShadingFlags,
    seconds: f32,
}

impl TerrainDemo {
    pub fn new<R: Rng + ?Sized>(
        config: &TerrainDemoConfig,
        camera: &CameraConfig,
        rng: &mut R,
    ) -> Result<Self, AppError> {
        let mesh = build_terrain(&config.to_terrain_params(), rng)?;
        let (min, max) = mesh.height_range();
        let mut uniforms = TerrainUniforms::for_heights(min, max).with_shiny(config.shiny);
        uniforms.shininess = config.shininess;

        let flags = if config.shiny {
            ShadingFlags::SHINY
        } else {
            ShadingFlags::empty()
        };
        Ok(Self {
            terrain: MeshBuffers::from_mesh(&mesh),
            shader: TerrainShader::new(uniforms),
            camera: camera.to_orbit_camera(),
            flags,
            seconds: 0.0,
        })
    }

    pub fn uniforms(&self) -> &TerrainUniforms {
        &self.shader.uniforms
    }
}

impl Demo for TerrainDemo {
    fn name(&self) -> &'static str {
        "terrain"
    }

    fn update(&mut self, timing: &FrameTiming) {
        self.seconds = timing.seconds();
    }

    fn draw(&self, render: &mut RenderSystem) {
        render.begin_frame(self.camera.view(self.seconds), self.seconds, self.flags);
        render.draw(&self.terrain, &self.shader, TERRAIN_MODEL, [1.0; 4]);
    }
}
