//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Stable iteration order (collection order decides collision ties)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{first_projectile_hit, first_ship_hit};
pub use input::{Controls, FireLatch, Key, KeyEvent};
pub use snapshot::{AsteroidView, ShipView, Snapshot};
pub use state::{Asteroid, GamePhase, GameState, Projectile, Ship};
pub use tick::tick;
