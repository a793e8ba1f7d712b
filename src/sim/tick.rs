//! Per-frame simulation step
//!
//! Advances the game state by one variable timestep. Phases run in a fixed
//! order so that a seed plus a sequence of inputs and frame times always
//! produces the same session.

use super::collision::{first_projectile_hit, first_ship_hit};
use super::state::{GamePhase, GameState};

/// Advance the game state by `dt` seconds
///
/// `dt` must be positive; the caller is responsible for clamping large
/// frame gaps.
pub fn tick(state: &mut GameState, dt: f64) {
    state.frame += 1;

    // Once lost, the ship is gone; the field keeps drifting behind the banner
    if state.phase != GamePhase::Lost {
        apply_controls(state, dt);
        advance_ship(state, dt);
    }

    advance_projectiles(state, dt);
    advance_asteroids(state, dt);
    resolve_projectile_hits(state);

    if state.phase != GamePhase::Lost {
        resolve_ship_hit(state);
    }
}

/// Rotation, thrust and fire from the current controls
fn apply_controls(state: &mut GameState, dt: f64) {
    let alive = !state.ship.exploded;
    if alive {
        if state.controls.left {
            state.ship.apply_left_rotation(dt);
        }
        if state.controls.right {
            state.ship.apply_right_rotation(dt);
        }
        if state.controls.thrust {
            state.ship.apply_acceleration(dt);
        }
    }

    // The request is consumed even when the shot is refused
    if state.controls.take_fire_request() && !state.try_fire() {
        log::trace!(
            "Shot refused (exploded: {}, live projectiles: {})",
            state.ship.exploded,
            state.projectiles.len()
        );
    }
}

fn advance_ship(state: &mut GameState, dt: f64) {
    state.ship.advance(dt);

    if state.ship.explosion_done() {
        state.ship.reset();
        state.lives -= 1;
        log::debug!("Ship respawned, {} lives left", state.lives.max(0));

        if state.lives < 0 && state.phase == GamePhase::Playing {
            state.phase = GamePhase::Lost;
            log::info!("Game over after {} frames", state.frame);
        }
    }
}

fn advance_projectiles(state: &mut GameState, dt: f64) {
    for projectile in &mut state.projectiles {
        projectile.advance(dt);
    }
    state.projectiles.retain(|p| !p.is_out());
}

fn advance_asteroids(state: &mut GameState, dt: f64) {
    for asteroid in &mut state.asteroids {
        asteroid.advance(dt);
    }

    let before = state.asteroids.len();
    state.asteroids.retain(|a| !a.is_expired());
    let removed = before - state.asteroids.len();
    if removed == 0 {
        return;
    }
    log::debug!("Cleared {} exploded asteroid(s)", removed);

    if state.asteroids.is_empty() && state.phase == GamePhase::Playing {
        state.phase = GamePhase::Won;
        log::info!("Field cleared after {} frames", state.frame);
    }
}

fn resolve_projectile_hits(state: &mut GameState) {
    let Some((asteroid_idx, projectile_idx)) =
        first_projectile_hit(&state.asteroids, &state.projectiles)
    else {
        return;
    };

    state.projectiles.remove(projectile_idx);

    let size = state.asteroids[asteroid_idx].size;
    if size > 1 {
        state.split_asteroid(asteroid_idx);
        log::debug!(
            "Asteroid split into two of size {}, {} on field",
            size / 2,
            state.asteroids.len()
        );
    } else {
        state.asteroids[asteroid_idx].explode();
        log::debug!("Asteroid destroyed, {} on field", state.asteroids.len());
    }
}

fn resolve_ship_hit(state: &mut GameState) {
    if let Some(idx) = first_ship_hit(&state.ship, &state.asteroids) {
        state.ship.explode();
        log::debug!(
            "Ship hit asteroid {} at ({:.1}, {:.1})",
            idx,
            state.ship.pos.x,
            state.ship.pos.y
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::{FireLatch, Key};
    use crate::sim::state::Asteroid;
    use glam::DVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f64 = 1.0 / 60.0;

    fn still_asteroid(x: f64, y: f64, size: u32) -> Asteroid {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut asteroid = Asteroid::split_child(&mut rng, DVec2::new(x, y), size, DVec2::ZERO);
        asteroid.rotation_speed = 0.0;
        asteroid
    }

    /// Parked asteroids well away from the ship and its line of fire
    fn parked_field() -> Vec<Asteroid> {
        vec![
            still_asteroid(60.0, 540.0, 4),
            still_asteroid(160.0, 540.0, 4),
            still_asteroid(640.0, 540.0, 4),
            still_asteroid(740.0, 540.0, 4),
            still_asteroid(740.0, 60.0, 4),
        ]
    }

    fn state_with(asteroids: Vec<Asteroid>) -> GameState {
        let mut state = GameState::new(2024);
        state.asteroids = asteroids;
        state
    }

    /// Tap fire whenever the latch allows it
    fn autofire(state: &mut GameState) {
        match state.controls.fire {
            FireLatch::Idle => state.key_down(Key::Fire),
            FireLatch::Held => state.key_up(Key::Fire),
            FireLatch::Requested => {}
        }
    }

    #[test]
    fn test_one_projectile_per_press() {
        let mut state = state_with(parked_field());
        state.key_down(Key::Fire);
        for _ in 0..30 {
            state.key_down(Key::Fire); // key repeat
            tick(&mut state, DT);
        }
        assert_eq!(state.projectiles.len(), 1);

        state.key_up(Key::Fire);
        state.key_down(Key::Fire);
        tick(&mut state, DT);
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_projectile_flies_straight_up() {
        let mut state = state_with(parked_field());
        state.key_down(Key::Fire);
        tick(&mut state, 0.1);

        let p = &state.projectiles[0];
        assert!((p.vel - DVec2::new(0.0, -400.0)).length() < 1e-9);
        assert!((p.pos - DVec2::new(400.0, 260.0)).length() < 1e-9);
    }

    #[test]
    fn test_out_of_bounds_projectiles_are_removed() {
        let mut state = state_with(parked_field());
        state.key_down(Key::Fire);
        for _ in 0..120 {
            tick(&mut state, DT);
        }
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_exploded_ship_ignores_controls() {
        let mut state = state_with(parked_field());
        state.ship.explode();
        state.key_down(Key::Thrust);
        state.key_down(Key::RotateLeft);
        state.key_down(Key::Fire);
        tick(&mut state, DT);

        assert_eq!(state.ship.vel, DVec2::ZERO);
        assert_eq!(state.ship.rotation, 0.0);
        assert!(state.projectiles.is_empty());
        // The press was still consumed
        assert_eq!(state.controls.fire, FireLatch::Held);
    }

    #[test]
    fn test_thrust_moves_ship() {
        let mut state = state_with(parked_field());
        state.key_down(Key::Thrust);
        for _ in 0..10 {
            tick(&mut state, DT);
        }
        assert!(state.ship.vel.y < 0.0);
        assert!(state.ship.pos.y < 300.0);
    }

    #[test]
    fn test_shot_splits_asteroid() {
        let mut asteroids = parked_field();
        asteroids.insert(0, still_asteroid(400.0, 150.0, 4));
        let mut state = state_with(asteroids);
        assert_eq!(state.asteroids.len(), 6);

        state.key_down(Key::Fire);
        tick(&mut state, DT);
        assert_eq!(state.projectiles.len(), 1);

        for _ in 0..60 {
            if state.asteroids.len() != 6 {
                break;
            }
            tick(&mut state, DT);
        }

        assert_eq!(state.asteroids.len(), 7);
        assert!(state.projectiles.is_empty());
        // Children replace the parent at the end of the list
        assert_eq!(state.asteroids[5].size, 2);
        assert_eq!(state.asteroids[6].size, 2);
        assert_eq!(state.asteroids[5].pos, DVec2::new(400.0, 150.0));
        assert!(state.asteroids[..5].iter().all(|a| a.size == 4));
    }

    #[test]
    fn test_smallest_asteroid_explodes_instead_of_splitting() {
        let mut asteroids = parked_field();
        asteroids.insert(0, still_asteroid(400.0, 200.0, 1));
        let mut state = state_with(asteroids);

        state.key_down(Key::Fire);
        for _ in 0..30 {
            tick(&mut state, DT);
            if state.asteroids[0].is_exploding() {
                break;
            }
        }
        assert_eq!(state.asteroids.len(), 6);
        assert_eq!(state.asteroids[0].size, 0);

        // Debris is removed after the explosion animation
        for _ in 0..40 {
            tick(&mut state, DT);
        }
        assert_eq!(state.asteroids.len(), 5);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_one_projectile_hit_per_tick() {
        let mut state = state_with(vec![
            still_asteroid(100.0, 100.0, 1),
            still_asteroid(600.0, 100.0, 1),
        ]);
        state.projectiles = vec![
            crate::sim::state::Projectile {
                pos: DVec2::new(600.0, 100.0),
                vel: DVec2::ZERO,
            },
            crate::sim::state::Projectile {
                pos: DVec2::new(100.0, 100.0),
                vel: DVec2::ZERO,
            },
        ];

        tick(&mut state, DT);
        assert_eq!(state.projectiles.len(), 1);
        assert!(state.asteroids[0].is_exploding());
        assert!(!state.asteroids[1].is_exploding());
        assert_eq!(state.projectiles[0].pos, DVec2::new(600.0, 100.0));

        tick(&mut state, DT);
        assert!(state.projectiles.is_empty());
        assert!(state.asteroids[1].is_exploding());
    }

    #[test]
    fn test_ship_collision_explodes_ship_once() {
        let mut state = state_with(vec![
            still_asteroid(400.0, 300.0, 4),
            still_asteroid(410.0, 300.0, 4),
        ]);
        tick(&mut state, DT);
        assert!(state.ship.exploded);
        assert_eq!(state.lives, 3);

        tick(&mut state, DT);
        assert!(state.ship.exploded);
        assert!(state.ship.explosion_elapsed > 0.0);
    }

    #[test]
    fn test_losing_all_lives_ends_game() {
        // A rock parked on the spawn point kills the ship on every respawn
        let mut state = state_with(vec![still_asteroid(400.0, 300.0, 4)]);
        let mut deaths = 0;

        for _ in 0..200 {
            let lives_before = state.lives;
            tick(&mut state, 0.1);
            if state.lives < lives_before {
                deaths += 1;
                if deaths == 3 {
                    assert_eq!(state.lives, 0);
                    assert_eq!(state.phase, GamePhase::Playing);
                }
            }
            if state.game_over() {
                break;
            }
        }

        assert_eq!(deaths, 4);
        assert_eq!(state.lives, -1);
        assert!(state.game_over());
        assert!(!state.game_won());

        // Terminal: more ticks change nothing about the outcome
        state.key_down(Key::Fire);
        for asteroid in &mut state.asteroids {
            asteroid.explode();
        }
        for _ in 0..20 {
            tick(&mut state, 0.1);
        }
        assert!(state.asteroids.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.phase, GamePhase::Lost);
        assert_eq!(state.lives, -1);
    }

    #[test]
    fn test_clearing_field_wins() {
        let mut state = state_with(vec![still_asteroid(400.0, 150.0, 2)]);

        for _ in 0..600 {
            autofire(&mut state);
            tick(&mut state, DT);
            if state.game_over() {
                break;
            }
        }

        assert!(state.asteroids.is_empty());
        assert!(state.game_over());
        assert!(state.game_won());
        assert_eq!(state.lives, 3);

        // The ship still flies after a win
        state.key_down(Key::Thrust);
        tick(&mut state, DT);
        assert!(state.ship.vel.y < 0.0);
        assert_eq!(state.phase, GamePhase::Won);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        for frame in 0..600 {
            for state in [&mut state1, &mut state2] {
                if frame % 90 == 0 {
                    state.key_down(Key::RotateRight);
                }
                if frame % 90 == 45 {
                    state.key_up(Key::RotateRight);
                }
                state.key_down(Key::Thrust);
                autofire(state);
                tick(state, DT);
            }
        }

        let a = serde_json::to_string(&state1.snapshot()).unwrap();
        let b = serde_json::to_string(&state2.snapshot()).unwrap();
        assert_eq!(a, b);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.phase, state2.phase);
    }
}
