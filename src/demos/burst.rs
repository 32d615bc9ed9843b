use gfx_geometry::{icosphere, MeshBuffers};
use gfx_math::{mat4, Mat4, Vec3};
use gfx_physics::BurstWorld;
use gfx_render::{LambertShader, ShadingFlags};
use rand::Rng;

use super::Demo;
use crate::config::BurstDemoConfig;
use crate::systems::{FrameTiming, RenderSystem};

/// Random spheres bouncing around the unit box
pub struct BurstDemo {
    world: BurstWorld,
    sphere: MeshBuffers,
    view: Mat4,
    seconds: f32,
}

impl BurstDemo {
    pub fn new<R: Rng + ?Sized>(config: &BurstDemoConfig, rng: &mut R) -> Self {
        let mut world = BurstWorld::with_config(config.to_burst_config());
        world.populate(rng);
        let sphere = MeshBuffers::from_mesh(&icosphere(1.0, config.subdivisions));
        log::info!(
            "Burst: {} particles, {} triangles per sphere",
            world.len(),
            sphere.triangle_count()
        );
        Self {
            world,
            sphere,
            view: mat4::look_at(Vec3::new(3.0, 1.0, 0.0), Vec3::ZERO, Vec3::Y),
            seconds: 0.0,
        }
    }

    pub fn world(&self) -> &BurstWorld {
        &self.world
    }
}

impl Demo for BurstDemo {
    fn name(&self) -> &'static str {
        "burst"
    }

    fn update(&mut self, timing: &FrameTiming) {
        self.seconds = timing.seconds();
        self.world.step(timing.dt());
    }

    fn draw(&self, render: &mut RenderSystem) {
        render.begin_frame(self.view, self.seconds, ShadingFlags::empty());
        let shader = LambertShader::default();
        for (_, p) in self.world.iter() {
            // scale to the radius, then move into place
            let model = mat4::mul(
                mat4::translation(p.position.x, p.position.y, p.position.z),
                mat4::uniform_scale(p.radius),
            );
            render.draw(&self.sphere, &shader, model, p.color);
        }
    }
}
