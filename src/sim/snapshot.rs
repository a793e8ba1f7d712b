//! Read-only views of the simulation for renderers
//!
//! A snapshot is an owned copy, so it can be handed to a renderer on another
//! thread without sharing engine state.

use glam::DVec2;
use serde::Serialize;

use super::state::{Asteroid, GameState, Ship};
use crate::consts::ASTEROID_CORNERS;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipView {
    pub pos: DVec2,
    pub rotation: f64,
    pub exploded: bool,
    pub explosion_elapsed: f64,
}

impl From<&Ship> for ShipView {
    fn from(ship: &Ship) -> Self {
        Self {
            pos: ship.pos,
            rotation: ship.rotation,
            exploded: ship.exploded,
            explosion_elapsed: ship.explosion_elapsed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsteroidView {
    pub pos: DVec2,
    pub rotation: f64,
    /// 0 while exploding
    pub size: u32,
    pub corner_offsets: [f64; ASTEROID_CORNERS],
    pub explosion_elapsed: f64,
}

impl From<&Asteroid> for AsteroidView {
    fn from(asteroid: &Asteroid) -> Self {
        Self {
            pos: asteroid.pos,
            rotation: asteroid.rotation,
            size: asteroid.size,
            corner_offsets: asteroid.corner_offsets,
            explosion_elapsed: asteroid.explosion_elapsed,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub frame: u64,
    /// `None` once the ship has been lost
    pub ship: Option<ShipView>,
    pub asteroids: Vec<AsteroidView>,
    pub projectiles: Vec<DVec2>,
    /// One indicator per remaining life
    pub life_indicators: Vec<ShipView>,
    pub lives: i32,
    pub game_over: bool,
    pub game_won: bool,
}

impl GameState {
    /// Copy out the drawable state
    pub fn snapshot(&self) -> Snapshot {
        let remaining = self.lives.max(0) as usize;
        Snapshot {
            frame: self.frame,
            ship: self.accepts_input().then(|| ShipView::from(&self.ship)),
            asteroids: self.asteroids.iter().map(AsteroidView::from).collect(),
            projectiles: self.projectiles.iter().map(|p| p.pos).collect(),
            life_indicators: self
                .life_indicators
                .iter()
                .take(remaining)
                .map(ShipView::from)
                .collect(),
            lives: self.lives,
            game_over: self.game_over(),
            game_won: self.game_won(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;

    #[test]
    fn test_snapshot_of_new_game() {
        let state = GameState::new(7);
        let snap = state.snapshot();
        assert_eq!(snap.asteroids.len(), 6);
        assert!(snap.projectiles.is_empty());
        assert_eq!(snap.life_indicators.len(), 3);
        assert_eq!(snap.lives, 3);
        assert!(!snap.game_over);
        let ship = snap.ship.expect("ship is drawn while playing");
        assert_eq!(ship.pos, DVec2::new(400.0, 300.0));
    }

    #[test]
    fn test_life_indicators_track_lives() {
        let mut state = GameState::new(7);
        state.lives = 1;
        assert_eq!(state.snapshot().life_indicators.len(), 1);

        state.lives = -1;
        state.phase = GamePhase::Lost;
        let snap = state.snapshot();
        assert!(snap.life_indicators.is_empty());
        assert!(snap.ship.is_none());
        assert!(snap.game_over && !snap.game_won);
    }

    #[test]
    fn test_ship_drawn_after_win() {
        let mut state = GameState::new(7);
        state.phase = GamePhase::Won;
        let snap = state.snapshot();
        assert!(snap.ship.is_some());
        assert!(snap.game_over && snap.game_won);
    }

    #[test]
    fn test_snapshot_serializes() {
        let json = serde_json::to_string(&GameState::new(7).snapshot()).unwrap();
        assert!(json.contains("\"asteroids\""));
        assert!(json.contains("\"game_won\":false"));
    }
}
