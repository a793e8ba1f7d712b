//! Key-state input for the ship
//!
//! Key events only flip flags here. The simulation reads them once per tick,
//! so holding a key has the same effect regardless of event repeat rate.

use serde::{Deserialize, Serialize};

/// The four logical keys the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,
}

/// A discrete key transition from the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Down(Key),
    Up(Key),
}

/// Single-shot fire debounce
///
/// Press moves `Idle -> Requested`, the tick that consumes the request moves
/// it to `Held`, and only a release of a `Held` latch returns it to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FireLatch {
    #[default]
    Idle,
    Requested,
    Held,
}

impl FireLatch {
    fn press(self) -> Self {
        match self {
            FireLatch::Idle => FireLatch::Requested,
            other => other,
        }
    }

    fn release(self) -> Self {
        match self {
            FireLatch::Held => FireLatch::Idle,
            other => other,
        }
    }
}

/// Current control state sampled by each tick
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
    pub fire: FireLatch,
}

impl Controls {
    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::RotateLeft => self.left = true,
            Key::RotateRight => self.right = true,
            Key::Thrust => self.thrust = true,
            Key::Fire => self.fire = self.fire.press(),
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::RotateLeft => self.left = false,
            Key::RotateRight => self.right = false,
            Key::Thrust => self.thrust = false,
            Key::Fire => self.fire = self.fire.release(),
        }
    }

    pub fn apply(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Down(key) => self.key_down(key),
            KeyEvent::Up(key) => self.key_up(key),
        }
    }

    /// Take a pending fire request, latching it as held
    ///
    /// Returns true exactly once per press.
    pub fn take_fire_request(&mut self) -> bool {
        if self.fire == FireLatch::Requested {
            self.fire = FireLatch::Held;
            true
        } else {
            false
        }
    }
}
