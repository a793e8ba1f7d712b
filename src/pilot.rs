//! Scripted pilot for headless runs
//!
//! Turns toward the nearest intact asteroid and taps fire whenever the nose
//! is roughly on target. It never thrusts, so the ship holds the center and
//! waits for rocks to drift into its line of fire.

use crate::sim::{FireLatch, GameState, Key, KeyEvent};
use crate::{bearing, normalize_degrees};

/// Widest half-angle of the firing cone, degrees
pub const AIM_TOLERANCE: f64 = 4.0;
/// Narrowest half-angle; at 3 degrees of turn per frame a 3 degree cone can't be skipped
pub const MIN_AIM_TOLERANCE: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    None,
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct Pilot {
    turning: Turn,
}

impl Default for Pilot {
    fn default() -> Self {
        Self { turning: Turn::None }
    }
}

impl Pilot {
    /// Key transitions to apply before the next tick
    pub fn steer(&mut self, state: &GameState) -> Vec<KeyEvent> {
        let mut events = Vec::new();

        let ship = &state.ship;
        let target = state
            .asteroids
            .iter()
            .filter(|a| !a.is_exploding())
            .min_by(|a, b| {
                a.pos
                    .distance_squared(ship.pos)
                    .partial_cmp(&b.pos.distance_squared(ship.pos))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let (error, tolerance) = target
            .map(|a| {
                let error = normalize_degrees(bearing(ship.pos, a.pos) - ship.rotation);
                // Stay well inside the hit circle at this range
                let distance = a.pos.distance(ship.pos).max(1.0);
                let cone = (0.7 * a.radius() / distance).atan().to_degrees();
                (error, cone.clamp(MIN_AIM_TOLERANCE, AIM_TOLERANCE))
            })
            .unwrap_or((0.0, AIM_TOLERANCE));

        let wanted = if target.is_none() || error.abs() <= tolerance {
            Turn::None
        } else if error > 0.0 {
            Turn::Right
        } else {
            Turn::Left
        };
        self.set_turn(wanted, &mut events);

        // Tap: press when idle and on target, release as soon as it latched
        match state.controls.fire {
            FireLatch::Idle if target.is_some() && wanted == Turn::None => {
                events.push(KeyEvent::Down(Key::Fire));
            }
            FireLatch::Held => events.push(KeyEvent::Up(Key::Fire)),
            _ => {}
        }

        events
    }

    fn set_turn(&mut self, wanted: Turn, events: &mut Vec<KeyEvent>) {
        if wanted == self.turning {
            return;
        }
        match self.turning {
            Turn::Left => events.push(KeyEvent::Up(Key::RotateLeft)),
            Turn::Right => events.push(KeyEvent::Up(Key::RotateRight)),
            Turn::None => {}
        }
        match wanted {
            Turn::Left => events.push(KeyEvent::Down(Key::RotateLeft)),
            Turn::Right => events.push(KeyEvent::Down(Key::RotateRight)),
            Turn::None => {}
        }
        self.turning = wanted;
    }
}
