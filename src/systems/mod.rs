//! Application systems
//!
//! Frame timing and rendering, shared by every demo.

mod render;
mod simulation;

pub use render::RenderSystem;
pub use simulation::{FrameClock, FrameTiming, MAX_DELTA_MS};
