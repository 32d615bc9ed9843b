//! gfx_demos - headless real-time rendering exercises
//!
//! Particle bursts, boids, fault terrain, spheres, bouncing logos and
//! terrain flight, drawn by a software pipeline and written out as PNG
//! frames.

pub mod config;
pub mod demos;
pub mod error;
pub mod runner;
pub mod systems;

pub use config::{AppConfig, ConfigError};
pub use demos::{Demo, DemoKind};
pub use error::AppError;
pub use runner::{run_demo, run_frames, RunSummary};
