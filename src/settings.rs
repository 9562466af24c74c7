//! Driver settings
//!
//! Gameplay constants are fixed (see [`crate::consts`]); these settings only
//! control how the frame driver paces ticks and how the autopilot plays.
//! Stored as JSON.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::consts::TICK_INTERVAL_MS;

/// Frame driver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Milliseconds between ticks
    pub tick_interval_ms: u64,
    /// Sleep between ticks (false runs as fast as possible)
    pub realtime: bool,
    /// Log a HUD line every N ticks (0 logs only state changes)
    pub hud_every: u64,

    // === Autopilot ===
    /// Seed for the autopilot's RNG
    pub autopilot_seed: u64,
    /// Chance per tick that the autopilot fires
    pub autopilot_fire_chance: f32,
    /// Chance that a shot uses the targeted alien's letter
    pub autopilot_accuracy: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            realtime: false,
            hud_every: 600,

            autopilot_seed: 1,
            autopilot_fire_chance: 0.05,
            autopilot_accuracy: 0.8,
        }
    }
}

impl Settings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file: {}", path.display()))?;
        let settings = serde_json::from_str(&json)
            .with_context(|| format!("parsing settings file: {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e:#}; using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serializing settings")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing settings file: {}", path.display()))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
