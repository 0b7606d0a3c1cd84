//! Session configuration
//!
//! Loaded from a JSON file by the host, or built in code. Validated once
//! when a session is created; the simulation trusts it afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    /// Play-field dimensions must be positive and finite
    #[error("invalid play-field {width}x{height}: dimensions must be positive")]
    InvalidPlayfield { width: f32, height: f32 },

    /// Tick rate must be non-zero
    #[error("invalid tick rate {0}: must be at least 1")]
    InvalidTickRate(u32),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play-field width in pixels
    pub playfield_width: f32,
    /// Play-field height in pixels
    pub playfield_height: f32,
    /// RNG seed; identical seeds and inputs replay identically
    pub seed: u64,
    /// Frame rate the host drives `tick` at
    pub tick_rate: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield_width: DEFAULT_PLAYFIELD_WIDTH,
            playfield_height: DEFAULT_PLAYFIELD_HEIGHT,
            seed: 0,
            tick_rate: DEFAULT_TICK_RATE,
        }
    }
}

impl Settings {
    /// Default settings with the given seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Reject dimensions the spawn/clamp/wrap math cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if !ok(self.playfield_width) || !ok(self.playfield_height) {
            return Err(SettingsError::InvalidPlayfield {
                width: self.playfield_width,
                height: self.playfield_height,
            });
        }
        if self.tick_rate == 0 {
            return Err(SettingsError::InvalidTickRate(self.tick_rate));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json_str(&json)?;
        log::info!(
            "Loaded settings from {}: {}x{} seed={}",
            path.as_ref().display(),
            settings.playfield_width,
            settings.playfield_height,
            settings.seed
        );
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.playfield_width, 1280.0);
        assert_eq!(settings.playfield_height, 720.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let settings = Settings {
            playfield_width: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidPlayfield { .. })
        ));

        let settings = Settings {
            playfield_height: -720.0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            playfield_width: f32::NAN,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_tick_rate() {
        let settings = Settings {
            tick_rate: 0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidTickRate(0))
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json_str(r#"{ "seed": 7, "playfield_width": 800 }"#).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.playfield_width, 800.0);
        assert_eq!(settings.playfield_height, 720.0);
        assert_eq!(settings.tick_rate, 60);
    }

    #[test]
    fn test_json_with_bad_dimensions_is_rejected() {
        let err = Settings::from_json_str(r#"{ "playfield_height": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidPlayfield { .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Settings::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Settings::load("/definitely/not/here/astro.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
