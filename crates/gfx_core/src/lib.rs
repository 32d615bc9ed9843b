//! Core types for the gfx demos
//!
//! This crate provides the fundamental types for the animated logo scenes:
//! - [`Animation`] - Time-driven model transforms
//! - [`Entity`] - A drawable object with placement, motion and an optional planar body
//! - [`World`] - Container for entities, updated by an ordered list of systems

mod animation;
mod entity;
mod world;

pub use animation::Animation;
pub use entity::{Entity, Motion};
pub use world::{EntityKey, LogoSystem, World};

// Re-export the math and physics types entities are built from
pub use gfx_math::{Mat4, Rgba, Vec3};
pub use gfx_physics::{PlanarBody, Rect};
