//! Shape generation for 2D primitives

use glam::DVec2;

use crate::consts::ASTEROID_CORNERS;
use crate::heading;

/// Nose distance from the ship's center
pub const SHIP_NOSE_LENGTH: f64 = 30.0;
/// Distance of the two rear corners
pub const SHIP_TAIL_LENGTH: f64 = 15.0;
/// Rear corners sit this many degrees either side of the heading
pub const SHIP_TAIL_ANGLE: f64 = 120.0;

/// Outward speed of ship debris, units per second
pub const SHIP_DEBRIS_SPEED: f64 = 120.0;

/// Triangle for a ship: nose first, then left and right tail corners
pub fn ship_triangle(pos: DVec2, rotation: f64) -> [DVec2; 3] {
    [
        pos + heading(rotation) * SHIP_NOSE_LENGTH,
        pos + heading(rotation - SHIP_TAIL_ANGLE) * SHIP_TAIL_LENGTH,
        pos + heading(rotation + SHIP_TAIL_ANGLE) * SHIP_TAIL_LENGTH,
    ]
}

/// Ring of debris dots flying out from `center`
///
/// Dot `i` sits at `i * 40` degrees, `distance(i)` away.
pub fn burst(center: DVec2, distance: impl Fn(usize) -> f64) -> [DVec2; ASTEROID_CORNERS] {
    let step = 360.0 / ASTEROID_CORNERS as f64;
    std::array::from_fn(|i| center + heading(i as f64 * step) * distance(i))
}

/// Outward speed of one asteroid debris dot; bumpier corners fly faster
#[inline]
pub fn asteroid_debris_speed(corner_offset: f64) -> f64 {
    100.0 + 20.0 * corner_offset
}
