//! Input vocabulary: the keys the simulation understands.

use serde::{Deserialize, Serialize};

/// Abstract game keys; the host maps physical input onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameKey {
    Up,
    Down,
    Left,
    Right,
    Fire,
    /// Starts a run when the engine is stopped (Enter on a keyboard)
    Start,
}

/// Desired state of the five in-game keys, as produced by a pilot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySet {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl KeySet {
    /// Key/state pairs in a fixed order, ready to feed to the engine.
    pub fn entries(&self) -> [(GameKey, bool); 5] {
        [
            (GameKey::Up, self.up),
            (GameKey::Down, self.down),
            (GameKey::Left, self.left),
            (GameKey::Right, self.right),
            (GameKey::Fire, self.fire),
        ]
    }
}
