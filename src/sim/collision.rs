//! Collision detection between ship, projectiles and asteroids
//!
//! Everything is a circle test on squared distances. The scans return the
//! first overlapping pair in collection order; callers resolve at most one
//! pair per category per tick.

use glam::DVec2;

use super::state::{Asteroid, Projectile, Ship};
use crate::consts::{PROJECTILE_HIT_TOLERANCE, SHIP_COLLISION_RADIUS};

/// Whether a projectile at `pos` is inside the asteroid's hit circle
///
/// Exploding asteroids have size 0 and therefore a zero hit circle.
#[inline]
pub fn projectile_hits_asteroid(pos: DVec2, asteroid: &Asteroid) -> bool {
    let reach = asteroid.radius();
    pos.distance_squared(asteroid.pos) < reach * reach * PROJECTILE_HIT_TOLERANCE
}

/// Whether a ship at `pos` overlaps the asteroid
#[inline]
pub fn ship_hits_asteroid(pos: DVec2, asteroid: &Asteroid) -> bool {
    if asteroid.is_exploding() {
        return false;
    }
    let reach = asteroid.radius() + SHIP_COLLISION_RADIUS;
    pos.distance_squared(asteroid.pos) < reach * reach
}

/// First (asteroid, projectile) index pair that overlaps
///
/// Asteroids form the outer loop and projectiles the inner one, both
/// ascending.
pub fn first_projectile_hit(
    asteroids: &[Asteroid],
    projectiles: &[Projectile],
) -> Option<(usize, usize)> {
    asteroids.iter().enumerate().find_map(|(i, asteroid)| {
        projectiles
            .iter()
            .position(|p| projectile_hits_asteroid(p.pos, asteroid))
            .map(|j| (i, j))
    })
}

/// Index of the first asteroid the ship overlaps, if the ship is alive
pub fn first_ship_hit(ship: &Ship, asteroids: &[Asteroid]) -> Option<usize> {
    if ship.exploded {
        return None;
    }
    asteroids.iter().position(|a| ship_hits_asteroid(ship.pos, a))
}
