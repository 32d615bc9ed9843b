use gfx_geometry::{icosphere, MeshBuffers};
use gfx_math::{mat4, Mat4, Vec3};
use gfx_physics::Flock;
use gfx_render::{LambertShader, ShadingFlags};
use rand::Rng;

use super::Demo;
use crate::config::BoidsDemoConfig;
use crate::systems::{FrameTiming, RenderSystem};

/// A flock in the XZ plane, seen from above
pub struct BoidsDemo {
    flock: Flock,
    sphere: MeshBuffers,
    view: Mat4,
    view_projection: Mat4,
    seconds: f32,
}

impl BoidsDemo {
    /// `projection` must match the one used to draw, since boids bounce
    /// off the edges of the screen
    pub fn new<R: Rng + ?Sized>(config: &BoidsDemoConfig, projection: Mat4, rng: &mut R) -> Self {
        let flock = Flock::spawn(config.to_boid_config(), rng);
        let view = mat4::look_at(Vec3::new(0.0, 3.0, 0.0), Vec3::ZERO, Vec3::Z);
        log::info!("Boids: {} boids", flock.len());
        Self {
            flock,
            sphere: MeshBuffers::from_mesh(&icosphere(1.0, 1)),
            view,
            view_projection: mat4::mul(projection, view),
            seconds: 0.0,
        }
    }

    pub fn flock(&self) -> &Flock {
        &self.flock
    }
}

impl Demo for BoidsDemo {
    fn name(&self) -> &'static str {
        "boids"
    }

    fn update(&mut self, timing: &FrameTiming) {
        self.seconds = timing.seconds();
        self.flock.step(timing.dt(), self.view_projection);
    }

    fn draw(&self, render: &mut RenderSystem) {
        render.begin_frame(self.view, self.seconds, ShadingFlags::empty());
        let shader = LambertShader::default();
        let size = self.flock.config.size;
        for boid in self.flock.boids() {
            let p = boid.position;
            let model = mat4::mul(mat4::translation(p.x, p.y, p.z), mat4::uniform_scale(size));
            render.draw(&self.sphere, &shader, model, boid.color);
        }
    }
}
