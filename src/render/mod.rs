//! Rendering seam
//!
//! The simulation never draws. Each frame a `Snapshot` is turned into a flat
//! list of backend-agnostic `DrawCommand`s which a `Renderer` consumes.

pub mod headless;
pub mod shapes;

pub use headless::HeadlessRenderer;

use std::path::PathBuf;

use glam::DVec2;
use serde::Serialize;
use thiserror::Error;

use crate::consts::{ASTEROID_SIZE_MULTIPLIER, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::Snapshot;

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [0.0, 0.0, 0.0, 1.0];
    pub const SHIP: Color = [0.0, 0.5, 0.0, 1.0];
    pub const SHIP_EXPLOSION: Color = [1.0, 0.65, 0.0, 1.0];
    pub const ASTEROID: Color = [0.0, 0.0, 1.0, 1.0];
    pub const ASTEROID_EXPLOSION: Color = [1.0, 1.0, 0.0, 1.0];
    pub const PROJECTILE: Color = [1.0, 0.0, 0.0, 1.0];
    pub const TEXT: Color = [1.0, 1.0, 1.0, 1.0];
}

/// Visual sizes
pub const PROJECTILE_DOT_RADIUS: f64 = 5.0;
pub const DEBRIS_DOT_RADIUS: f64 = 4.0;
pub const ASTEROID_STROKE_WIDTH: f64 = 4.0;
pub const BANNER_FONT_SIZE: f64 = 60.0;

pub const WIN_TEXT: &str = "You Win!";
pub const LOSE_TEXT: &str = "Game Over!";

/// One primitive for a backend to draw, in screen coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        color: Color,
    },
    FillPolygon {
        points: Vec<DVec2>,
        color: Color,
    },
    StrokePolygon {
        points: Vec<DVec2>,
        width: f64,
        color: Color,
    },
    FillCircle {
        center: DVec2,
        radius: f64,
        color: Color,
    },
    Text {
        text: &'static str,
        center: DVec2,
        size: f64,
        color: Color,
    },
}

/// Renderer failures
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to initialize renderer output {path:?}: {source}")]
    Init {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to submit frame: {0}")]
    Submit(#[from] std::io::Error),

    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A drawing backend
pub trait Renderer {
    /// Draw one complete frame
    fn draw(&mut self, commands: &[DrawCommand]) -> Result<(), RenderError>;
}

/// Build the draw list for a snapshot
///
/// Order matches the painter's order: background, projectiles, ship,
/// asteroids, lives row, then the end-of-game banner on top.
pub fn build_frame(snapshot: &Snapshot) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(
        2 + snapshot.projectiles.len() + snapshot.asteroids.len() + snapshot.life_indicators.len() + 9,
    );

    commands.push(DrawCommand::Clear {
        color: colors::BACKGROUND,
    });

    for &center in &snapshot.projectiles {
        commands.push(DrawCommand::FillCircle {
            center,
            radius: PROJECTILE_DOT_RADIUS,
            color: colors::PROJECTILE,
        });
    }

    if let Some(ship) = &snapshot.ship {
        if ship.exploded {
            let distance = ship.explosion_elapsed * shapes::SHIP_DEBRIS_SPEED;
            push_debris(
                &mut commands,
                shapes::burst(ship.pos, |_| distance),
                colors::SHIP_EXPLOSION,
            );
        } else {
            commands.push(DrawCommand::FillPolygon {
                points: shapes::ship_triangle(ship.pos, ship.rotation).to_vec(),
                color: colors::SHIP,
            });
        }
    }

    for asteroid in &snapshot.asteroids {
        if asteroid.size > 0 {
            let radius = asteroid.size as f64 * ASTEROID_SIZE_MULTIPLIER;
            let outline = crate::sim::state::jagged_outline(
                asteroid.pos,
                asteroid.rotation,
                radius,
                &asteroid.corner_offsets,
            );
            commands.push(DrawCommand::StrokePolygon {
                points: outline.to_vec(),
                width: ASTEROID_STROKE_WIDTH,
                color: colors::ASTEROID,
            });
        } else {
            let t = asteroid.explosion_elapsed;
            let offsets = asteroid.corner_offsets;
            push_debris(
                &mut commands,
                shapes::burst(asteroid.pos, |i| t * shapes::asteroid_debris_speed(offsets[i])),
                colors::ASTEROID_EXPLOSION,
            );
        }
    }

    for indicator in &snapshot.life_indicators {
        commands.push(DrawCommand::FillPolygon {
            points: shapes::ship_triangle(indicator.pos, indicator.rotation).to_vec(),
            color: colors::SHIP,
        });
    }

    if snapshot.game_over {
        commands.push(DrawCommand::Text {
            text: if snapshot.game_won { WIN_TEXT } else { LOSE_TEXT },
            center: DVec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
            size: BANNER_FONT_SIZE,
            color: colors::TEXT,
        });
    }

    commands
}

fn push_debris(commands: &mut Vec<DrawCommand>, dots: impl IntoIterator<Item = DVec2>, color: Color) {
    commands.extend(dots.into_iter().map(|center| DrawCommand::FillCircle {
        center,
        radius: DEBRIS_DOT_RADIUS,
        color,
    }));
}
