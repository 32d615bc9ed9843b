//! Input handling for the gfx demos
//!
//! Keyboard state and the WASD flight controller. Input is supplied either
//! by a host window or by an [`InputScript`] when running headless.

mod flight;
mod keys;

pub use flight::{FlightController, InputScript, KeyHold};
pub use keys::{Key, KeyState, ParseKeyError};
