//! # Settings
//!
//! Everything a headless run or an embedding host can tune, loaded from
//! one TOML file. Every table and every key is optional.
//!
//! ```toml
//! [scene]
//! shape = "flower"
//! particle_count = 8000
//! color = "#ff66cc"
//!
//! [frame]
//! target_fps = 60
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use nebula_shared::{MotionTuning, SceneConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{SettingsError, SettingsResult};
use crate::tracker::TrackerSettings;

/// Frame pacing and scheduling.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSettings {
    /// Frames per second the driver aims for.
    pub target_fps: u32,
    /// Generate shaped targets on the worker thread instead of inline.
    pub async_regeneration: bool,
    /// Frames slower than this are logged.
    pub budget_warn_ms: u64,
}

impl FrameSettings {
    /// Time between frames at `target_fps` (a zero rate is treated as 1).
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.target_fps.max(1)))
    }

    /// Frame time above which a warning is logged.
    #[must_use]
    pub fn budget(&self) -> Duration {
        Duration::from_millis(self.budget_warn_ms)
    }
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            target_fps: 60,
            async_regeneration: true,
            budget_warn_ms: 33,
        }
    }
}

/// Top-level settings file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial scene.
    pub scene: SceneConfig,
    /// Motion constants.
    pub motion: MotionTuning,
    /// Frame pacing.
    pub frame: FrameSettings,
    /// Landmark estimator calibration.
    pub tracker: TrackerSettings,
}

impl Settings {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or does not parse.
    pub fn load<P: AsRef<Path>>(path: P) -> SettingsResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let settings = Self::from_toml_str(&text)?;
        info!(path = %path.display(), shape = %settings.scene.shape, "settings loaded");
        Ok(settings)
    }

    /// Parses settings from TOML text. The scene is normalized.
    ///
    /// # Errors
    ///
    /// Returns error if the text is not valid TOML for `Settings`.
    pub fn from_toml_str(text: &str) -> SettingsResult<Self> {
        let mut settings: Self = toml::from_str(text)?;
        settings.scene = settings.scene.normalized();
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_shared::{ColorRgb, ShapeKind, MAX_PARTICLE_COUNT};

    #[test]
    fn test_empty_file_is_all_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_tables() {
        let settings = Settings::from_toml_str(
            r##"
            [scene]
            shape = "flower"
            color = "#ff0000"

            [frame]
            target_fps = 30
            "##,
        )
        .unwrap();

        assert_eq!(settings.scene.shape, ShapeKind::Flower);
        assert_eq!(settings.scene.color, ColorRgb::hex(0xff0000));
        assert_eq!(settings.frame.target_fps, 30);
        assert!(settings.frame.async_regeneration);
        assert_eq!(settings.motion, MotionTuning::default());
    }

    #[test]
    fn test_scene_is_normalized() {
        let settings = Settings::from_toml_str(
            r#"
            [scene]
            particle_count = 1000000
            text = "ABCDEFGHIJKLMNOP"
            "#,
        )
        .unwrap();

        assert_eq!(settings.scene.particle_count, MAX_PARTICLE_COUNT);
        assert_eq!(settings.scene.text.chars().count(), 12);
    }

    #[test]
    fn test_bad_color_is_rejected() {
        let err = Settings::from_toml_str("[scene]\ncolor = \"blue\"").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load("/nonexistent/nebula.toml").unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }

    #[test]
    fn test_frame_duration() {
        let frame = FrameSettings { target_fps: 50, ..FrameSettings::default() };
        assert_eq!(frame.frame_duration(), Duration::from_millis(20));

        let zero = FrameSettings { target_fps: 0, ..FrameSettings::default() };
        assert_eq!(zero.frame_duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_bundled_default_settings_parse() {
        let text = include_str!("../settings/default.toml");
        let settings = Settings::from_toml_str(text).unwrap();
        assert_eq!(settings.scene.particle_count, 8000);
    }
}
