//! Runner settings
//!
//! Loaded from an optional JSON file; every field has a default so a partial
//! file (or none at all) is fine. Gameplay constants are not configurable and
//! live in `crate::consts`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings loading failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// How the native runner drives the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed; `None` picks one from the clock
    pub seed: Option<u64>,

    // === Frame loop ===
    /// Simulated seconds per frame
    pub frame_dt: f64,
    /// Upper bound for a single step, guards against runaway frame gaps
    pub max_frame_dt: f64,
    /// Stop after this many frames even if the game is still running
    pub max_frames: u64,
    /// Keep simulating this long after the game ends so explosions finish
    pub linger_frames: u64,

    // === Pilot ===
    /// Drive the ship with the built-in scripted pilot
    pub autopilot: bool,

    // === Output ===
    /// Write each frame's draw list as JSON lines to this file
    pub record_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            frame_dt: 1.0 / 60.0,
            max_frame_dt: 0.1,
            max_frames: 36_000,
            linger_frames: 60,
            autopilot: true,
            record_path: None,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.frame_dt.is_finite() && self.frame_dt > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "frame_dt must be a positive number, got {}",
                self.frame_dt
            )));
        }
        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "max_frame_dt must be a positive number, got {}",
                self.max_frame_dt
            )));
        }
        Ok(())
    }

    /// The step actually fed to the simulation
    pub fn effective_dt(&self) -> f64 {
        self.frame_dt.min(self.max_frame_dt)
    }
}
