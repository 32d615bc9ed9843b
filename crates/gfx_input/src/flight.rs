//! WASD flight over a scene
//!
//! Controls:
//! - W/S: toward/away along view-space Z
//! - A/D: sideways along view-space X
//!
//! Movement is added straight onto the view matrix's translation column, so
//! the camera slides in its own frame without turning.

use gfx_math::{mat4, Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::keys::{Key, KeyState};

/// Moves a view matrix from the held WASD keys
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlightController {
    /// Units per second
    pub speed: f32,
}

impl Default for FlightController {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

impl FlightController {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }

    /// View-space direction requested by the held keys (not normalized)
    pub fn direction(keys: &KeyState) -> Vec3 {
        let mut delta = Vec3::ZERO;
        if keys.is_pressed(Key::W) {
            delta.z += 1.0;
        }
        if keys.is_pressed(Key::S) {
            delta.z -= 1.0;
        }
        if keys.is_pressed(Key::A) {
            delta.x += 1.0;
        }
        if keys.is_pressed(Key::D) {
            delta.x -= 1.0;
        }
        delta
    }

    /// Move `view` for `dt` seconds of held keys
    ///
    /// Opposite keys cancel; diagonal movement is as fast as straight
    /// movement.
    pub fn apply(&self, view: Mat4, keys: &KeyState, dt: f32) -> Mat4 {
        let delta = Self::direction(keys);
        if delta == Vec3::ZERO {
            return view;
        }
        let step = delta.normalized() * (self.speed * dt);
        mat4::with_translation(view, mat4::get_translation(view) + step)
    }
}

/// One key held over a time span, in seconds
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyHold {
    pub key: Key,
    pub from: f32,
    pub to: f32,
}

/// Scripted key presses for headless runs
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    #[serde(default)]
    pub holds: Vec<KeyHold>,
}

impl InputScript {
    pub fn new(holds: Vec<KeyHold>) -> Self {
        Self { holds }
    }

    /// Hold `key` from `from` until `to`
    pub fn with_hold(mut self, key: Key, from: f32, to: f32) -> Self {
        self.holds.push(KeyHold { key, from, to });
        self
    }

    /// Keys held at time `t`; a hold covers `[from, to)`
    pub fn keys_at(&self, t: f32) -> KeyState {
        self.holds
            .iter()
            .filter(|h| h.from <= t && t < h.to)
            .map(|h| h.key)
            .collect()
    }

    /// Time at which the last hold ends
    pub fn duration(&self) -> f32 {
        self.holds.iter().map(|h| h.to).fold(0.0, f32::max)
    }
}
