//! Physics simulation for the gfx demos
//!
//! This crate provides the per-frame simulation steps, including:
//! - Elastic bounce against planes and axis-aligned boxes
//! - A particle burst world with gravity and damping
//! - A boids flock steered by rotating velocities
//! - Bouncing off the edges of the view frustum
//! - Planar hit boxes for bouncing 2D logos

pub mod boids;
pub mod burst;
pub mod planar;
pub mod view_bounds;
pub mod walls;

// Re-export commonly used types
pub use boids::{Boid, BoidConfig, Flock};
pub use burst::{BurstConfig, BurstWorld, Particle, ParticleKey};
pub use planar::{PlanarBody, Rect};
pub use view_bounds::bounce_into_view;
pub use walls::{bounce_off_wall, BoxBounds, Wall, WallSet};
