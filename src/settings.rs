//! Game settings
//!
//! Loaded from an optional JSON file; every field has a default so a file
//! only needs the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena & loop ===
    pub arena_width: f32,
    pub arena_height: f32,
    pub target_fps: u32,
    /// Fixed RNG seed; random per process when absent
    pub seed: Option<u64>,

    // === Gameplay ===
    pub player_velocity: f32,
    pub walk_cooldown_ticks: u32,
    pub initial_projectile_speed: f32,
    pub speed_increment: f32,
    pub ramp_interval_secs: f32,
    pub projectile_count: usize,
    pub catch_register_secs: f32,
    pub catch_hold_secs: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            target_fps: TARGET_FPS,
            seed: None,

            player_velocity: PLAYER_VELOCITY,
            walk_cooldown_ticks: WALK_COOLDOWN_TICKS,
            initial_projectile_speed: INITIAL_PROJECTILE_SPEED,
            speed_increment: SPEED_INCREMENT,
            ramp_interval_secs: RAMP_INTERVAL_SECS,
            projectile_count: PROJECTILE_COUNT,
            catch_register_secs: CATCH_REGISTER_SECS,
            catch_hold_secs: CATCH_HOLD_SECS,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Pretty JSON, suitable as a starting settings file
    pub fn to_json_pretty(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every value is usable by the game
    pub fn validate(&self) -> Result<(), SettingsError> {
        let min_dim = 2.0 * PLAYER_SPAWN_MARGIN;
        if !(self.arena_width >= min_dim) {
            return Err(invalid("arena_width", format!("must be at least {min_dim}")));
        }
        if !(self.arena_height >= min_dim) {
            return Err(invalid("arena_height", format!("must be at least {min_dim}")));
        }
        if self.target_fps == 0 {
            return Err(invalid("target_fps", "must be positive"));
        }
        if !(self.player_velocity > 0.0) {
            return Err(invalid("player_velocity", "must be positive"));
        }
        if !(self.initial_projectile_speed > 0.0) {
            return Err(invalid("initial_projectile_speed", "must be positive"));
        }
        if !(self.speed_increment >= 0.0) {
            return Err(invalid("speed_increment", "must not be negative"));
        }
        if !(self.ramp_interval_secs > 0.0) {
            return Err(invalid("ramp_interval_secs", "must be positive"));
        }
        if self.projectile_count == 0 {
            return Err(invalid("projectile_count", "must be at least 1"));
        }
        if !(self.catch_register_secs >= 0.0) || !(self.catch_hold_secs >= 0.0) {
            return Err(invalid("catch delays", "must not be negative"));
        }
        for (field, value) in [
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
            ("music_volume", self.music_volume),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, format!("{value} is outside 0.0 - 1.0")));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
    SettingsError::Invalid {
        field,
        reason: reason.into(),
    }
}
