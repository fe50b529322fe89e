//! Runtime settings
//!
//! Read from a JSON file named on the command line or in `SERPENT_SETTINGS`.
//! Physics tuning is not configurable; only the run itself is.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::POISON_DESPAWN_MARGIN;
use crate::sim::LevelId;

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "SERPENT_SETTINGS";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Level the demo player selects (1 or 2)
    pub level: LevelId,
    /// Seed for the demo player
    pub autopilot_seed: u64,
    /// Headless runs end as timed out after this many ticks
    pub max_ticks: u64,
    /// Slack around the screen before a stray bolt is dropped
    pub despawn_margin: f32,
    /// Pace the loop to wall-clock 60 Hz instead of running flat out
    pub realtime: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: LevelId::One,
            autopilot_seed: 0x5eed,
            max_ticks: 60 * 60 * 5,
            despawn_margin: POISON_DESPAWN_MARGIN,
            realtime: false,
        }
    }
}

/// Failure to read a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "cannot read settings: {e}"),
            SettingsError::Parse(e) => write!(f, "invalid settings: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path`, else from `SERPENT_SETTINGS`, else defaults
    ///
    /// A file that exists but cannot be used is reported and replaced by
    /// defaults; the game still starts.
    pub fn load(path: Option<&str>) -> Self {
        let path = path
            .map(str::to_owned)
            .or_else(|| std::env::var(SETTINGS_ENV).ok());
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, path);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "level": 2, "max_ticks": 10 }"#).unwrap();
        assert_eq!(settings.level, LevelId::Two);
        assert_eq!(settings.max_ticks, 10);
        assert_eq!(settings.autopilot_seed, Settings::default().autopilot_seed);
    }

    #[test]
    fn test_bad_level_is_parse_error() {
        let err = Settings::from_json(r#"{ "level": 9 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load_from("/nonexistent/serpent.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
        assert!(err.to_string().starts_with("cannot read settings"));
    }

    #[test]
    fn test_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("serpent-settings-{}.json", std::process::id()));
        let settings = Settings {
            level: LevelId::Two,
            realtime: true,
            ..Default::default()
        };
        std::fs::write(&path, serde_json::to_string(&settings).unwrap()).unwrap();
        let loaded = Settings::load(path.to_str());
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
