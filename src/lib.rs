//! Asteroid Belt - a frame-stepped asteroid shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, input, collisions, game state)
//! - `render`: Draw-command generation and the renderer seam
//! - `settings`: Runner configuration loaded from JSON
//! - `pilot`: Scripted ship control for headless runs

pub mod pilot;
pub mod render;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::DVec2;

/// Game configuration constants, grouped per component
pub mod consts {
    /// Screen dimensions
    pub const SCREEN_WIDTH: f64 = 800.0;
    pub const SCREEN_HEIGHT: f64 = 600.0;
    /// How far past an edge an entity may travel before wrapping/despawning
    pub const SCREEN_MARGIN: f64 = 10.0;

    /// Ship handling
    pub const SHIP_TURN_RATE: f64 = 180.0; // degrees per second
    pub const SHIP_THRUST: f64 = 250.0;
    pub const SHIP_MAX_AXIS_SPEED: f64 = 100.0;
    pub const SHIP_COLLISION_RADIUS: f64 = 5.0;

    /// Asteroids
    pub const ASTEROID_SPEED: f64 = 50.0;
    pub const ASTEROID_MAX_SPIN: f64 = 45.0; // degrees per second, either direction
    pub const ASTEROID_CORNERS: usize = 9;
    pub const ASTEROID_SIZE_MULTIPLIER: f64 = 10.0;
    pub const ASTEROID_SIZE_VARIATION: u32 = 20;
    pub const ASTEROID_INITIAL_SIZE: u32 = 4;
    /// Children fly off faster than their parent
    pub const ASTEROID_SPLIT_SPEEDUP: f64 = 1.5;

    /// Projectiles
    pub const PROJECTILE_SPEED: f64 = 400.0;
    pub const MAX_PROJECTILES: usize = 20;
    /// Hit test is (size * multiplier)^2 scaled by this
    pub const PROJECTILE_HIT_TOLERANCE: f64 = 1.2;

    /// Session
    pub const INITIAL_ASTEROIDS: usize = 6;
    pub const INITIAL_LIVES: i32 = 3;
    pub const EXPLOSION_DURATION: f64 = 0.5;
}

/// Unit heading for a rotation in degrees (0 = up, clockwise positive)
#[inline]
pub fn heading(degrees: f64) -> DVec2 {
    let radians = degrees.to_radians();
    DVec2::new(radians.sin(), -radians.cos())
}

/// Normalize an angle in degrees to [-180, 180)
#[inline]
pub fn normalize_degrees(mut angle: f64) -> f64 {
    while angle >= 180.0 {
        angle -= 360.0;
    }
    while angle < -180.0 {
        angle += 360.0;
    }
    angle
}

/// Heading in degrees that points from `from` toward `to`
#[inline]
pub fn bearing(from: DVec2, to: DVec2) -> f64 {
    let d = to - from;
    d.x.atan2(-d.y).to_degrees()
}

/// Wrap a position around the screen edges with the margin tolerance
#[inline]
pub fn wrap_to_screen(mut pos: DVec2) -> DVec2 {
    use consts::{SCREEN_HEIGHT, SCREEN_MARGIN, SCREEN_WIDTH};

    if pos.x < -SCREEN_MARGIN {
        pos.x = SCREEN_WIDTH + SCREEN_MARGIN;
    }
    if pos.x > SCREEN_WIDTH + SCREEN_MARGIN {
        pos.x = -SCREEN_MARGIN;
    }
    if pos.y < -SCREEN_MARGIN {
        pos.y = SCREEN_HEIGHT + SCREEN_MARGIN;
    }
    if pos.y > SCREEN_HEIGHT + SCREEN_MARGIN {
        pos.y = -SCREEN_MARGIN;
    }
    pos
}

/// Whether a position is outside the screen plus margin on any side
#[inline]
pub fn is_off_screen(pos: DVec2) -> bool {
    use consts::{SCREEN_HEIGHT, SCREEN_MARGIN, SCREEN_WIDTH};

    pos.x < -SCREEN_MARGIN
        || pos.x > SCREEN_WIDTH + SCREEN_MARGIN
        || pos.y < -SCREEN_MARGIN
        || pos.y > SCREEN_HEIGHT + SCREEN_MARGIN
}

/// Center of the screen
#[inline]
pub fn screen_center() -> DVec2 {
    DVec2::new(consts::SCREEN_WIDTH / 2.0, consts::SCREEN_HEIGHT / 2.0)
}
