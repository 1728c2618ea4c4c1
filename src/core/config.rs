//=========================================================================
// Settings
//=========================================================================
//
// Tunable constants of the drill, loaded once at startup.
//
// Sources (later wins):
//   Settings::default()  →  optional TOML file  →  CLI overrides
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use serde::Deserialize;

//=== Internal Dependencies ===============================================

use crate::core::error::{GameError, GameResult};

//=== Settings ============================================================

/// Runtime configuration.
///
/// Every field has a default, so a TOML file only needs the keys it
/// changes:
///
/// ```toml
/// tick_interval_ms = 20
/// decay_step = 0.01
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Render loop period in milliseconds.
    pub tick_interval_ms: u64,

    /// Opacity lost by every glyph per tick.
    pub decay_step: f32,

    /// Glyph velocity is sampled from `[-max_speed, max_speed]` per axis.
    pub max_speed: f32,

    /// Initial drawing surface width in pixels.
    pub surface_width: u32,

    /// Initial drawing surface height in pixels.
    pub surface_height: u32,

    /// Pixel scale of the block font used for glyphs.
    pub glyph_scale: u32,

    /// File holding the reference digits.
    pub digits_path: PathBuf,

    /// File holding the best score.
    pub best_path: PathBuf,

    /// Fixed RNG seed for glyph velocities (entropy when absent).
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 15,
            decay_step: 0.008,
            max_speed: 2.0,
            surface_width: 500,
            surface_height: 500,
            glyph_scale: 12,
            digits_path: PathBuf::from("resources/pi.dat"),
            best_path: PathBuf::from("resources/pb.dat"),
            seed: None,
        }
    }
}

impl Settings {
    /// Parses settings from TOML text and validates them.
    pub fn from_toml_str(text: &str) -> GameResult<Self> {
        let settings: Settings =
            toml::from_str(text).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads and parses a TOML settings file.
    pub fn load(path: &Path) -> GameResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| GameError::PersistenceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text)?;
        info!("Settings loaded from {}", path.display());
        Ok(settings)
    }

    /// Rejects values the render loop or particle model cannot work with.
    pub fn validate(&self) -> GameResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidConfig(
                "tick_interval_ms must be positive".into(),
            ));
        }
        check_decay_step(self.decay_step)?;
        check_max_speed(self.max_speed)?;
        if self.surface_width == 0 || self.surface_height == 0 {
            return Err(GameError::InvalidConfig("surface size must be non-zero".into()));
        }
        if self.glyph_scale == 0 {
            return Err(GameError::InvalidConfig("glyph_scale must be positive".into()));
        }
        Ok(())
    }

    /// Render loop period.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Default glyph origin: the middle of the initial surface.
    pub fn surface_center(&self) -> (f32, f32) {
        (
            self.surface_width as f32 / 2.0,
            self.surface_height as f32 / 2.0,
        )
    }
}

//=== Particle Constants ==================================================

/// Opacity lost per tick must be positive so every glyph eventually dies.
pub(crate) fn check_decay_step(decay_step: f32) -> GameResult<()> {
    if decay_step > 0.0 && decay_step <= 1.0 {
        return Ok(());
    }
    Err(GameError::InvalidConfig(format!(
        "decay_step must be in (0, 1], got {}",
        decay_step
    )))
}

pub(crate) fn check_max_speed(max_speed: f32) -> GameResult<()> {
    if max_speed >= 0.0 && max_speed.is_finite() {
        return Ok(());
    }
    Err(GameError::InvalidConfig(format!(
        "max_speed must be a non-negative number, got {}",
        max_speed
    )))
}

//=========================================================================
// Unit Tests
//=========================================================================
