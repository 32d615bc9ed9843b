//! Keys and pressed-key state

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Keys the demos respond to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    Space,
    Shift,
    Escape,
}

impl Key {
    pub const ALL: [Key; 9] = [
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::Q,
        Key::E,
        Key::Space,
        Key::Shift,
        Key::Escape,
    ];

    fn flag(self) -> KeyFlags {
        match self {
            Key::W => KeyFlags::W,
            Key::A => KeyFlags::A,
            Key::S => KeyFlags::S,
            Key::D => KeyFlags::D,
            Key::Q => KeyFlags::Q,
            Key::E => KeyFlags::E,
            Key::Space => KeyFlags::SPACE,
            Key::Shift => KeyFlags::SHIFT,
            Key::Escape => KeyFlags::ESCAPE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Key::W => "w",
            Key::A => "a",
            Key::S => "s",
            Key::D => "d",
            Key::Q => "q",
            Key::E => "e",
            Key::Space => "space",
            Key::Shift => "shift",
            Key::Escape => "escape",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a key name is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeyError(pub String);

impl fmt::Display for ParseKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown key: {}", self.0)
    }
}

impl std::error::Error for ParseKeyError {}

impl FromStr for Key {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Key::ALL
            .into_iter()
            .find(|k| k.name() == lower)
            .ok_or_else(|| ParseKeyError(s.to_string()))
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    struct KeyFlags: u16 {
        const W = 1 << 0;
        const A = 1 << 1;
        const S = 1 << 2;
        const D = 1 << 3;
        const Q = 1 << 4;
        const E = 1 << 5;
        const SPACE = 1 << 6;
        const SHIFT = 1 << 7;
        const ESCAPE = 1 << 8;
    }
}

/// Set of currently held keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    held: KeyFlags,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key.flag());
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(key.flag());
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.held.contains(key.flag())
    }

    /// Release every key
    pub fn clear(&mut self) {
        self.held = KeyFlags::empty();
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Held keys in a fixed order
    pub fn pressed(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.into_iter().filter(move |k| self.is_pressed(*k))
    }
}

impl FromIterator<Key> for KeyState {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut state = KeyState::new();
        for key in iter {
            state.press(key);
        }
        state
    }
}
