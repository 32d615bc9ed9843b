use gfx_core::{Animation, Entity, Rect, World};
use gfx_geometry::{block_i_logo, MeshBuffers};
use gfx_math::{mat4, Mat4};
use gfx_render::{FlatShader, ShadingFlags};

use super::Demo;
use crate::config::LogoDemoConfig;
use crate::systems::{FrameTiming, RenderSystem};

/// Looks down -Z with x and y already in clip space; the z flip keeps
/// nearer geometry at smaller depth
const LOGO_PROJECTION: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, -1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Block-I logos bouncing around the screen
pub struct LogoDemo {
    world: World,
    logo: MeshBuffers,
    seconds: f32,
}

impl LogoDemo {
    pub fn new(config: &LogoDemoConfig) -> Self {
        let mesh = block_i_logo();
        let local = Rect::from_points(&mesh.positions).unwrap_or_default();
        let mut world = World::with_logo_systems(Rect::new(-1.0, -1.0, 1.0, 1.0));

        for (i, (&x, &velocity)) in config.start_x.iter().zip(&config.velocities).enumerate() {
            let model = mat4::mul(mat4::translation(x, 0.0, 0.0), mat4::uniform_scale(config.scale));
            world.add_entity(
                Entity::new(model)
                    .with_name(format!("logo{}", i))
                    .with_velocity(velocity)
                    .with_local_bounds(local),
            );
        }

        if config.animated {
            let dancer = Animation::Compose(vec![
                Animation::GrowAndShrink {
                    min: 0.5,
                    max: 1.5,
                    rate: 4.0,
                },
                Animation::Rotation,
            ]);
            world.add_entity(
                Entity::new(mat4::uniform_scale(config.scale * 0.5))
                    .with_name("dancer")
                    .with_animation(dancer),
            );
        }
        log::info!("Logo: {} entities", world.len());

        Self {
            world,
            logo: MeshBuffers::from_mesh(&mesh),
            seconds: 0.0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }
}

impl Demo for LogoDemo {
    fn name(&self) -> &'static str {
        "logo"
    }

    fn update(&mut self, timing: &FrameTiming) {
        self.seconds = timing.seconds();
        self.world.update(timing.dt(), self.seconds);
    }

    fn draw(&self, render: &mut RenderSystem) {
        render.set_projection_matrix(LOGO_PROJECTION);
        render.begin_frame(mat4::IDENTITY, self.seconds, ShadingFlags::empty());
        for (_, entity) in self.world.iter() {
            render.draw(&self.logo, &FlatShader, entity.model_view, entity.color);
        }
    }
}
