use gfx_geometry::{build_terrain, MeshBuffers, TERRAIN_MODEL};
use gfx_input::{FlightController, InputScript};
use gfx_math::{mat4, Mat4, Vec3};
use gfx_render::{ShadingFlags, TerrainShader, TerrainUniforms};
use rand::Rng;

use super::Demo;
use crate::config::FlightDemoConfig;
use crate::error::AppError;
use crate::systems::{FrameTiming, RenderSystem};

/// Flying over fault terrain, steered by a key script
pub struct FlightDemo {
    terrain: MeshBuffers,
    shader: TerrainShader,
    controller: FlightController,
    script: InputScript,
    view: Mat4,
    seconds: f32,
}

impl FlightDemo {
    pub fn new<R: Rng + ?Sized>(config: &FlightDemoConfig, rng: &mut R) -> Result<Self, AppError> {
        let mesh = build_terrain(&config.to_terrain_params(), rng)?;
        let (min, max) = mesh.height_range();
        Ok(Self {
            terrain: MeshBuffers::from_mesh(&mesh),
            shader: TerrainShader::new(TerrainUniforms::for_heights(min, max)),
            controller: FlightController::new(config.speed),
            script: config.script.clone(),
            view: Self::start_view(),
            seconds: 0.0,
        })
    }

    pub fn start_view() -> Mat4 {
        mat4::look_at(Vec3::new(1.0, 3.0, 2.0), Vec3::ZERO, Vec3::Y)
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }
}

impl Demo for FlightDemo {
    fn name(&self) -> &'static str {
        "flight"
    }

    fn update(&mut self, timing: &FrameTiming) {
        self.seconds = timing.seconds();
        let keys = self.script.keys_at(self.seconds);
        self.view = self.controller.apply(self.view, &keys, timing.dt());
    }

    fn draw(&self, render: &mut RenderSystem) {
        render.begin_frame(self.view, self.seconds, ShadingFlags::empty());
        render.draw(&self.terrain, &self.shader, TERRAIN_MODEL, [1.0; 4]);
    }
}
