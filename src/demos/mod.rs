//! The demo scenes
//!
//! Each demo owns its simulation state and meshes. The runner calls
//! [`Demo::update`] with the frame's timing and then [`Demo::draw`].

mod boids;
mod burst;
mod flight;
mod logo;
mod sphere;
mod terrain;

pub use boids::BoidsDemo;
pub use burst::BurstDemo;
pub use flight::FlightDemo;
pub use logo::LogoDemo;
pub use sphere::SphereDemo;
pub use terrain::TerrainDemo;

use clap::ValueEnum;
use rand::rngs::StdRng;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::systems::{FrameTiming, RenderSystem};

/// A runnable scene
pub trait Demo {
    fn name(&self) -> &'static str;

    /// Advance the simulation to this frame
    fn update(&mut self, timing: &FrameTiming);

    /// Draw the current state
    fn draw(&self, render: &mut RenderSystem);
}

/// Demos selectable from the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DemoKind {
    /// Spheres bouncing inside a box
    #[default]
    Burst,
    /// A flock seen from above
    Boids,
    /// Fault-method terrain under an orbiting camera
    Terrain,
    /// A lit UV sphere under an orbiting camera
    Sphere,
    /// Block-I logos bouncing off the screen and each other
    Logo,
    /// Scripted WASD flight over terrain
    Flight,
}

impl DemoKind {
    pub const ALL: [DemoKind; 6] = [
        DemoKind::Burst,
        DemoKind::Boids,
        DemoKind::Terrain,
        DemoKind::Sphere,
        DemoKind::Logo,
        DemoKind::Flight,
    ];

    /// Build the demo from config, drawing randomness from `rng`
    pub fn build(self, config: &AppConfig, rng: &mut StdRng) -> Result<Box<dyn Demo>, AppError> {
        let demo: Box<dyn Demo> = match self {
            DemoKind::Burst => Box::new(BurstDemo::new(&config.burst, rng)),
            DemoKind::Boids => {
                let projection = config
                    .camera
                    .to_projection()
                    .matrix(config.output.width, config.output.height);
                Box::new(BoidsDemo::new(&config.boids, projection, rng))
            }
            DemoKind::Terrain => Box::new(TerrainDemo::new(&config.terrain, &config.camera, rng)?),
            DemoKind::Sphere => Box::new(SphereDemo::new(&config.sphere, &config.camera)?),
            DemoKind::Logo => Box::new(LogoDemo::new(&config.logo)),
            DemoKind::Flight => Box::new(FlightDemo::new(&config.flight, rng)?),
        };
        log::info!("Built {} demo", demo.name());
        Ok(demo)
    }
}
