//! Asteroid Belt entry point
//!
//! Native headless runner: loads settings, runs the frame loop with the
//! scripted pilot, and prints the final snapshot as JSON.
//!
//! Usage: `asteroid-belt [settings.json]`, verbosity via `RUST_LOG`.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use asteroid_belt::pilot::Pilot;
use asteroid_belt::render::{HeadlessRenderer, RenderError, Renderer, build_frame};
use asteroid_belt::sim::{GamePhase, GameState, tick};
use asteroid_belt::{Settings, SettingsError};

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to encode final snapshot: {0}")]
    Output(#[from] serde_json::Error),
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), RunError> {
    let settings = match std::env::args_os().nth(1) {
        Some(path) => Settings::load(Path::new(&path))?,
        None => {
            log::info!("No settings file given, using defaults");
            Settings::default()
        }
    };

    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Asteroid Belt (headless) starting with seed {seed}");

    // Renderer comes up before the first tick; failing here aborts the run
    let mut renderer = match &settings.record_path {
        Some(path) => HeadlessRenderer::recording(path)?,
        None => HeadlessRenderer::new(),
    };

    if settings.frame_dt > settings.max_frame_dt {
        log::warn!(
            "frame_dt {} exceeds max_frame_dt {}, clamping",
            settings.frame_dt,
            settings.max_frame_dt
        );
    }
    let dt = settings.effective_dt();

    let mut state = GameState::new(seed);
    let mut pilot = Pilot::default();
    let mut linger = settings.linger_frames;

    for _ in 0..settings.max_frames {
        if settings.autopilot {
            for event in pilot.steer(&state) {
                state.handle_key(event);
            }
        }

        tick(&mut state, dt);
        renderer.draw(&build_frame(&state.snapshot()))?;

        if state.game_over() {
            if linger == 0 {
                break;
            }
            linger -= 1;
        }
    }
    renderer.finish()?;

    match state.phase {
        GamePhase::Won => log::info!("You win! ({} frames, {} lives left)", state.frame, state.lives),
        GamePhase::Lost => log::info!("Game over after {} frames", state.frame),
        GamePhase::Playing => log::info!(
            "Stopped after {} frames with {} asteroids left",
            state.frame,
            state.asteroids.len()
        ),
    }
    log::info!(
        "Rendered {} frames ({} draw commands)",
        renderer.frames(),
        renderer.commands()
    );

    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
