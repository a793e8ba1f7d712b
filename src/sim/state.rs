//! Game state and core simulation types
//!
//! Entities own their pose and know how to advance themselves. `GameState`
//! owns every entity collection and is the only thing `tick` mutates.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::{Controls, Key, KeyEvent};
use crate::consts::*;
use crate::{heading, is_off_screen, screen_center, wrap_to_screen};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Every asteroid destroyed (terminal)
    Won,
    /// Ran out of lives (terminal)
    Lost,
}

/// The player's ship, also used for the life indicators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Heading in degrees, 0 = up, clockwise positive
    pub rotation: f64,
    pub exploded: bool,
    pub explosion_elapsed: f64,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            pos: screen_center(),
            vel: DVec2::ZERO,
            rotation: 0.0,
            exploded: false,
            explosion_elapsed: 0.0,
        }
    }
}

impl Ship {
    /// A display-only ship for the lives row in the top-left corner
    pub fn life_indicator(slot: usize) -> Self {
        Self {
            pos: DVec2::new(30.0 + slot as f64 * 30.0, 40.0),
            ..Self::default()
        }
    }

    pub fn apply_left_rotation(&mut self, dt: f64) {
        self.rotation -= dt * SHIP_TURN_RATE;
    }

    pub fn apply_right_rotation(&mut self, dt: f64) {
        self.rotation += dt * SHIP_TURN_RATE;
    }

    /// Thrust along the heading; each axis is capped on its own
    pub fn apply_acceleration(&mut self, dt: f64) {
        self.vel += heading(self.rotation) * SHIP_THRUST * dt;
        self.vel = self
            .vel
            .clamp(DVec2::splat(-SHIP_MAX_AXIS_SPEED), DVec2::splat(SHIP_MAX_AXIS_SPEED));
    }

    pub fn advance(&mut self, dt: f64) {
        self.pos = wrap_to_screen(self.pos + self.vel * dt);
        if self.exploded {
            self.explosion_elapsed += dt;
        }
    }

    pub fn explode(&mut self) {
        self.exploded = true;
        self.explosion_elapsed = 0.0;
    }

    /// Back to the center, at rest, facing up
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Explosion animation has finished
    pub fn explosion_done(&self) -> bool {
        self.exploded && self.explosion_elapsed > EXPLOSION_DURATION
    }
}

/// A jagged rock. `size == 0` means it is exploding and about to be removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Degrees
    pub rotation: f64,
    /// Degrees per second
    pub rotation_speed: f64,
    pub size: u32,
    pub explosion_elapsed: f64,
    /// Per-corner radius perturbation, fixed for the asteroid's lifetime
    pub corner_offsets: [f64; ASTEROID_CORNERS],
}

impl Asteroid {
    /// A full-size asteroid somewhere on screen drifting in a random direction
    pub fn random(rng: &mut impl Rng) -> Self {
        let pos = DVec2::new(
            rng.random_range(0.0..SCREEN_WIDTH),
            rng.random_range(0.0..SCREEN_HEIGHT),
        );
        let direction = rng.random_range(0.0..360.0);
        let vel = heading(direction) * ASTEROID_SPEED;
        Self::split_child(rng, pos, ASTEROID_INITIAL_SIZE, vel)
    }

    /// An asteroid with an explicit pose; spin and shape are re-rolled
    pub fn split_child(rng: &mut impl Rng, pos: DVec2, size: u32, vel: DVec2) -> Self {
        let rotation_speed = rng.random_range(-ASTEROID_MAX_SPIN..ASTEROID_MAX_SPIN);

        let variation = (ASTEROID_SIZE_VARIATION * size / 4) as f64;
        let half = variation / 2.0;
        let mut corner_offsets = [0.0; ASTEROID_CORNERS];
        if half > 0.0 {
            for offset in corner_offsets.iter_mut() {
                *offset = rng.random_range(-half..half);
            }
        }

        Self {
            pos,
            vel,
            rotation: 0.0,
            rotation_speed,
            size,
            explosion_elapsed: 0.0,
            corner_offsets,
        }
    }

    /// Move and spin while intact; debris stays put and counts down
    pub fn advance(&mut self, dt: f64) {
        if self.size > 0 {
            self.pos = wrap_to_screen(self.pos + self.vel * dt);
            self.rotation += self.rotation_speed * dt;
        } else {
            self.explosion_elapsed += dt;
        }
    }

    pub fn explode(&mut self) {
        self.size = 0;
        self.explosion_elapsed = 0.0;
    }

    #[inline]
    pub fn is_exploding(&self) -> bool {
        self.size == 0
    }

    /// Explosion animation has finished and the asteroid can be dropped
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.is_exploding() && self.explosion_elapsed > EXPLOSION_DURATION
    }

    /// Nominal radius used by collision tests
    #[inline]
    pub fn radius(&self) -> f64 {
        self.size as f64 * ASTEROID_SIZE_MULTIPLIER
    }

    /// Corner positions of the outline polygon in screen space
    pub fn outline(&self) -> [DVec2; ASTEROID_CORNERS] {
        jagged_outline(self.pos, self.rotation, self.radius(), &self.corner_offsets)
    }
}

/// Corners of a jagged polygon: corner `i` sits at `rotation + i * 40` degrees,
/// `radius + offsets[i]` away from `center`
pub fn jagged_outline(
    center: DVec2,
    rotation: f64,
    radius: f64,
    offsets: &[f64; ASTEROID_CORNERS],
) -> [DVec2; ASTEROID_CORNERS] {
    let step = 360.0 / ASTEROID_CORNERS as f64;
    let mut corners = [DVec2::ZERO; ASTEROID_CORNERS];
    for (i, corner) in corners.iter_mut().enumerate() {
        *corner = center + heading(rotation + i as f64 * step) * (radius + offsets[i]);
    }
    corners
}

/// A shot fired from the ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: DVec2,
    pub vel: DVec2,
}

impl Projectile {
    /// Fire from `pos` along `rotation` degrees
    pub fn new(pos: DVec2, rotation: f64) -> Self {
        Self {
            pos,
            vel: heading(rotation) * PROJECTILE_SPEED,
        }
    }

    /// Straight line, no wrap
    pub fn advance(&mut self, dt: f64) {
        self.pos += self.vel * dt;
    }

    pub fn is_out(&self) -> bool {
        is_off_screen(self.pos)
    }
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Lives left; the session is lost once this drops below zero
    pub lives: i32,
    pub phase: GamePhase,
    pub controls: Controls,
    pub ship: Ship,
    /// Live asteroids, in collision scan order
    pub asteroids: Vec<Asteroid>,
    /// Live projectiles, in collision scan order
    pub projectiles: Vec<Projectile>,
    /// Display-only ships for the lives row
    pub life_indicators: Vec<Ship>,
    /// Ticks simulated so far
    pub frame: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let asteroids: Vec<Asteroid> = (0..INITIAL_ASTEROIDS)
            .map(|_| Asteroid::random(&mut rng))
            .collect();
        let life_indicators: Vec<Ship> = (0..INITIAL_LIVES as usize)
            .map(Ship::life_indicator)
            .collect();

        Self {
            seed,
            lives: INITIAL_LIVES,
            phase: GamePhase::Playing,
            controls: Controls::default(),
            ship: Ship::default(),
            asteroids,
            projectiles: Vec::with_capacity(MAX_PROJECTILES),
            life_indicators,
            frame: 0,
            rng,
        }
    }

    pub fn game_over(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    pub fn game_won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    /// Ship control is live while playing, and still after a win
    pub fn accepts_input(&self) -> bool {
        !self.game_over() || self.game_won()
    }

    pub fn key_down(&mut self, key: Key) {
        if self.accepts_input() {
            self.controls.key_down(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.accepts_input() {
            self.controls.key_up(key);
        }
    }

    pub fn handle_key(&mut self, event: KeyEvent) {
        if self.accepts_input() {
            self.controls.apply(event);
        }
    }

    /// Fire from the ship if it is alive and under the projectile cap
    ///
    /// Returns whether a projectile was spawned.
    pub fn try_fire(&mut self) -> bool {
        if self.ship.exploded || self.projectiles.len() >= MAX_PROJECTILES {
            return false;
        }
        self.projectiles
            .push(Projectile::new(self.ship.pos, self.ship.rotation));
        true
    }

    /// Replace asteroid `index` by two half-size children appended at the end
    ///
    /// Children take the parent's velocity with x/y swapped, scaled up, and
    /// mirrored for the second child.
    pub fn split_asteroid(&mut self, index: usize) {
        let parent = self.asteroids.remove(index);
        let size = parent.size / 2;
        let swapped = DVec2::new(parent.vel.y, parent.vel.x) * ASTEROID_SPLIT_SPEEDUP;

        let first = Asteroid::split_child(&mut self.rng, parent.pos, size, swapped);
        let second = Asteroid::split_child(&mut self.rng, parent.pos, size, -swapped);
        self.asteroids.push(first);
        self.asteroids.push(second);
    }
}
