use egui::Color32;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};

/// Tuning for the wavy pen's width computation.
///
/// A builder copies this at construction, so edits only affect strokes
/// started afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WavyPenConfig {
    /// Peak deviation the sine term adds to or subtracts from the width.
    pub amplitude: f32,
    /// Oscillations per unit of arc length (radians per canvas unit).
    pub frequency: f32,
    /// How strongly pointer speed thins the envelope width.
    pub speed_reduction_factor: f32,
    /// Speeds above this have no additional thinning effect.
    pub max_speed_for_tapering: f32,
    /// Floor for the envelope width while the stylus is touching.
    pub min_stroke_width: f32,
}

impl Default for WavyPenConfig {
    fn default() -> Self {
        Self {
            amplitude: 20.0,
            frequency: 0.01,
            speed_reduction_factor: 0.02,
            max_speed_for_tapering: 200.0,
            min_stroke_width: 0.0,
        }
    }
}

impl WavyPenConfig {
    /// A config with no wave and no speed taper: width follows pressure only.
    pub fn flat() -> Self {
        Self {
            amplitude: 0.0,
            frequency: 0.0,
            speed_reduction_factor: 0.0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        finite("amplitude", self.amplitude)?;
        finite("frequency", self.frequency)?;
        non_negative("speed_reduction_factor", self.speed_reduction_factor)?;
        non_negative("max_speed_for_tapering", self.max_speed_for_tapering)?;
        non_negative("min_stroke_width", self.min_stroke_width)?;
        Ok(())
    }
}

/// Everything the pen tool needs to turn pointer input into samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenSettings {
    pub color: Color32,
    /// Width at full pressure, in canvas units.
    pub base_width: f32,
    pub wave: WavyPenConfig,
}

impl Default for PenSettings {
    fn default() -> Self {
        Self {
            color: Color32::from_rgb(30, 30, 60),
            base_width: 8.0,
            wave: WavyPenConfig::default(),
        }
    }
}

impl PenSettings {
    pub fn validate(&self) -> ConfigResult<()> {
        non_negative("base_width", self.base_width)?;
        self.wave.validate()
    }

    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Sample width for a given pressure in `[0, 1]`.
    pub fn width_for_pressure(&self, pressure: f32) -> f32 {
        self.base_width * pressure.clamp(0.0, 1.0)
    }
}

fn finite(field: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> ConfigResult<()> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::InvalidValue { field, value });
    }
    Ok(())
}
