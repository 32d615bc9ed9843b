//! Entity types for the logo scenes

use gfx_math::{mat4, Mat4, Rgba};
use gfx_physics::{PlanarBody, Rect};
use serde::{Deserialize, Serialize};

use crate::Animation;

/// How an entity's model-view matrix is derived each frame
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// The model matrix is used as-is
    #[default]
    Static,
    /// The animation is evaluated and multiplied onto the model matrix
    Animated(Animation),
}

/// A drawable object in the world
///
/// Entities with a `body` move under the world's systems; the body's model
/// matrix is copied back into `model` after every update.
#[derive(Clone, Debug)]
pub struct Entity {
    /// Optional name for lookup
    pub name: Option<String>,
    /// Placement before animation
    pub model: Mat4,
    pub motion: Motion,
    /// Planar physics body, if the entity bounces around
    pub body: Option<PlanarBody>,
    /// Local-space extents of the entity's mesh, used for hit boxes
    pub local: Rect,
    /// Tint applied when drawing
    pub color: Rgba,
    /// Matrix to draw with this frame
    pub model_view: Mat4,
}

impl Default for Entity {
    fn default() -> Self {
        Self::new(mat4::IDENTITY)
    }
}

impl Entity {
    /// Create a static entity at `model`
    pub fn new(model: Mat4) -> Self {
        Self {
            name: None,
            model,
            motion: Motion::Static,
            body: None,
            local: Rect::new(-0.5, -0.5, 0.5, 0.5),
            color: [1.0, 1.0, 1.0, 1.0],
            model_view: model,
        }
    }

    /// Set the name of this entity
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.motion = Motion::Animated(animation);
        self
    }

    /// Attach a planar body starting at the entity's model matrix
    pub fn with_velocity(mut self, velocity: [f32; 2]) -> Self {
        self.body = Some(PlanarBody::new(self.model, velocity));
        self
    }

    pub fn with_local_bounds(mut self, local: Rect) -> Self {
        self.local = local;
        self
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Copy the body's placement into `model`
    pub fn sync_from_body(&mut self) {
        if let Some(body) = &self.body {
            self.model = body.model;
        }
    }

    /// Compute `model_view` for this frame
    pub fn process_frame(&mut self, seconds: f32) {
        self.model_view = match &self.motion {
            Motion::Static => self.model,
            Motion::Animated(animation) => mat4::mul(animation.evaluate(seconds), self.model),
        };
    }
}
