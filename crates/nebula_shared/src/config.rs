//! # Scene Configuration
//!
//! `SceneConfig` is replaced wholesale whenever any UI field changes. The core
//! treats every delivered config as authoritative and diffs it against the
//! previous one to decide between an expensive regeneration and a cheap
//! parameter update.
//!
//! Invalid values are clamped here, at the boundary. Nothing downstream ever
//! sees a negative count, a non-positive speed or an over-long text.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::constants::{
    DEFAULT_COLOR, DEFAULT_PARTICLE_COUNT, DEFAULT_PARTICLE_SIZE, DEFAULT_SPEED_FACTOR,
    DEFAULT_TEXT, MAX_PARTICLE_COUNT, MAX_PARTICLE_SIZE, MAX_TEXT_CHARS, MIN_PARTICLE_SIZE,
    MIN_SPEED_FACTOR,
};
use crate::math::Vec3;

// =============================================================================
// ERRORS
// =============================================================================

/// Errors raised while parsing configuration values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Color string was not `#rrggbb` / `rrggbb`.
    #[error("invalid color {0:?}: expected #rrggbb")]
    InvalidColor(String),
}

/// Result type for configuration parsing.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// SHAPE KIND
// =============================================================================

/// Target shape families.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShapeKind {
    /// Uniform cube, half-width 20. Also the idle/dispersed reference.
    #[default]
    Random,
    /// Fibonacci-spiral sphere surface, radius 12.
    Sphere,
    /// Uniform cube fill, half-width 10.
    Cube,
    /// Double helix, radius 8, height 30.
    Helix,
    /// Rasterized text.
    Text,
    /// Vertical cylinder fill.
    Rain,
    /// Centrally concentrated burst.
    Star,
    /// Cone widening toward the base.
    Fire,
    /// Upright cone, apex on top.
    Tree,
    /// Polar rose.
    Flower,
    /// Butterfly curve.
    Butterfly,
}

impl ShapeKind {
    /// Every shape, in UI order.
    pub const ALL: [Self; 11] = [
        Self::Random,
        Self::Sphere,
        Self::Cube,
        Self::Helix,
        Self::Text,
        Self::Rain,
        Self::Star,
        Self::Fire,
        Self::Tree,
        Self::Flower,
        Self::Butterfly,
    ];

    /// Lowercase name used in settings files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Sphere => "sphere",
            Self::Cube => "cube",
            Self::Helix => "helix",
            Self::Text => "text",
            Self::Rain => "rain",
            Self::Star => "star",
            Self::Fire => "fire",
            Self::Tree => "tree",
            Self::Flower => "flower",
            Self::Butterfly => "butterfly",
        }
    }

    /// Parses a shape name (case-insensitive). Unknown names resolve to `Random`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let trimmed = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
            .unwrap_or_else(|| {
                warn!(shape = trimmed, "unknown shape kind, falling back to random");
                Self::Random
            })
    }

    /// Resolves a numeric tag (UI order). Out-of-range tags resolve to `Random`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(Self::Random)
    }
}

impl From<String> for ShapeKind {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<ShapeKind> for String {
    fn from(kind: ShapeKind) -> Self {
        kind.name().to_owned()
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// COLOR
// =============================================================================

/// RGB color, components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorRgb {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
}

impl ColorRgb {
    /// Creates a color from components (0-1).
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from a hex value (0xRRGGBB).
    #[must_use]
    pub fn hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Parses `#rrggbb` (leading `#` optional).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidColor` if the string is not six hex digits.
    pub fn parse(s: &str) -> ConfigResult<Self> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidColor(s.to_owned()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::hex)
            .map_err(|_| ConfigError::InvalidColor(s.to_owned()))
    }

    /// Formats as `#rrggbb`.
    #[must_use]
    pub fn to_hex_string(self) -> String {
        let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", to_byte(self.r), to_byte(self.g), to_byte(self.b))
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for ColorRgb {
    fn default() -> Self {
        Self::hex(DEFAULT_COLOR)
    }
}

impl TryFrom<String> for ColorRgb {
    type Error = ConfigError;

    fn try_from(s: String) -> ConfigResult<Self> {
        Self::parse(&s)
    }
}

impl From<ColorRgb> for String {
    fn from(color: ColorRgb) -> Self {
        color.to_hex_string()
    }
}

// =============================================================================
// ROTATION OFFSETS
// =============================================================================

/// Per-axis rotation offsets in degrees, each in `[0, 360)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationOffsets {
    /// Rotation about X (degrees).
    pub x: f32,
    /// Rotation about Y (degrees).
    pub y: f32,
    /// Rotation about Z (degrees).
    pub z: f32,
}

impl RotationOffsets {
    /// Creates offsets from degrees.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Offsets converted to radians.
    #[must_use]
    pub fn to_radians(self) -> Vec3 {
        Vec3::new(self.x.to_radians(), self.y.to_radians(), self.z.to_radians())
    }

    /// Wraps every axis into `[0, 360)`; non-finite axes become 0.
    #[must_use]
    pub fn wrapped(self) -> Self {
        let wrap = |deg: f32| {
            if deg.is_finite() {
                let w = deg.rem_euclid(360.0);
                // rem_euclid can round up to exactly 360.0 for tiny negatives
                if w >= 360.0 {
                    0.0
                } else {
                    w
                }
            } else {
                0.0
            }
        };
        Self::new(wrap(self.x), wrap(self.y), wrap(self.z))
    }
}

// =============================================================================
// SCENE CONFIG
// =============================================================================

/// Complete scene configuration, delivered wholesale by the configuration UI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Target shape.
    pub shape: ShapeKind,
    /// Number of particles in the live buffer.
    #[serde(deserialize_with = "count_from_signed")]
    pub particle_count: usize,
    /// Point sprite size.
    pub particle_size: f32,
    /// Responsiveness multiplier (> 0).
    pub speed_factor: f32,
    /// Particle color.
    pub color: ColorRgb,
    /// Content for the TEXT shape (at most 12 characters).
    pub text: String,
    /// Extra rotation applied to the shaped target.
    pub rotation_offset: RotationOffsets,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            shape: ShapeKind::Random,
            particle_count: DEFAULT_PARTICLE_COUNT,
            particle_size: DEFAULT_PARTICLE_SIZE,
            speed_factor: DEFAULT_SPEED_FACTOR,
            color: ColorRgb::default(),
            text: DEFAULT_TEXT.to_owned(),
            rotation_offset: RotationOffsets::default(),
        }
    }
}

impl SceneConfig {
    /// Restores every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns a copy with every field clamped into its accepted range.
    ///
    /// Never fails: degenerate values become valid degenerate outputs
    /// (an empty buffer, the minimum speed, a truncated text).
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut out = self.clone();

        if out.particle_count > MAX_PARTICLE_COUNT {
            warn!(
                requested = out.particle_count,
                max = MAX_PARTICLE_COUNT,
                "particle count clamped"
            );
            out.particle_count = MAX_PARTICLE_COUNT;
        }

        if !out.particle_size.is_finite() {
            warn!("non-finite particle size, using default");
            out.particle_size = DEFAULT_PARTICLE_SIZE;
        }
        out.particle_size = out.particle_size.clamp(MIN_PARTICLE_SIZE, MAX_PARTICLE_SIZE);

        if !out.speed_factor.is_finite() {
            warn!("non-finite speed factor, using default");
            out.speed_factor = DEFAULT_SPEED_FACTOR;
        } else if out.speed_factor < MIN_SPEED_FACTOR {
            warn!(requested = out.speed_factor, "speed factor raised to minimum");
            out.speed_factor = MIN_SPEED_FACTOR;
        }

        if out.text.chars().count() > MAX_TEXT_CHARS {
            warn!(len = out.text.chars().count(), "text truncated to {MAX_TEXT_CHARS} chars");
            out.text = out.text.chars().take(MAX_TEXT_CHARS).collect();
        }

        out.rotation_offset = out.rotation_offset.wrapped();
        out
    }

    /// Sets the particle count from a signed UI value (negatives become 0).
    pub fn set_particle_count(&mut self, count: i64) {
        self.particle_count = usize::try_from(count.max(0)).unwrap_or(MAX_PARTICLE_COUNT);
    }

    /// Classifies what changed relative to `previous`.
    #[must_use]
    pub fn diff(&self, previous: &Self) -> ConfigDelta {
        if self.particle_count != previous.particle_count {
            ConfigDelta::Reallocate
        } else if self.shape != previous.shape || self.text != previous.text {
            ConfigDelta::Regenerate
        } else if self != previous {
            ConfigDelta::Parameters
        } else {
            ConfigDelta::Unchanged
        }
    }
}

fn count_from_signed<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(usize::try_from(raw.max(0)).unwrap_or(MAX_PARTICLE_COUNT))
}

/// What a config change requires from the motion integrator.
///
/// Variants are ordered by cost; each implies the work of the ones before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigDelta {
    /// Nothing changed.
    Unchanged,
    /// Size/speed/color/rotation only: applies next frame, no regeneration.
    Parameters,
    /// Shape or text changed: the shaped target must be regenerated.
    Regenerate,
    /// Count changed: live buffer reallocated, both target sets regenerated.
    Reallocate,
}

impl ConfigDelta {
    /// True if the shaped target set must be regenerated.
    #[must_use]
    pub const fn needs_regeneration(self) -> bool {
        matches!(self, Self::Regenerate | Self::Reallocate)
    }

    /// True if the live buffer must be reallocated.
    #[must_use]
    pub const fn needs_reallocation(self) -> bool {
        matches!(self, Self::Reallocate)
    }
}

// =============================================================================
// MOTION TUNING
// =============================================================================

/// Empirical visual constants of the motion integrator.
///
/// None of these have a derivation; they are tuned by eye and exposed so a
/// settings file can override them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTuning {
    /// Scale applied to the idle set to form the dispersed (open hand) target.
    pub disperse_scale: f32,
    /// Amplitude of the idle breathing oscillation.
    pub idle_amplitude: f32,
    /// Amplitude of the interactive per-particle jitter.
    pub jitter_amplitude: f32,
    /// World units per unit of normalized hand offset.
    pub offset_scale: f32,
    /// Per-frame smoothing factor at `speed_factor = 1`.
    pub base_smoothing: f32,
    /// Half-width of the cube the live buffer is seeded in.
    pub seed_half_width: f32,
}

impl MotionTuning {
    /// Smoothing factor for a given speed. Deliberately unclamped.
    #[inline]
    #[must_use]
    pub fn smoothing_factor(&self, speed_factor: f32) -> f32 {
        self.base_smoothing * speed_factor
    }
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            disperse_scale: 1.5,
            idle_amplitude: 2.0,
            jitter_amplitude: 0.1,
            offset_scale: 20.0,
            base_smoothing: 0.08,
            seed_half_width: 25.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_names_round_trip() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_name(kind.name()), kind);
        }
        assert_eq!(ShapeKind::from_name("  HeLiX "), ShapeKind::Helix);
    }

    #[test]
    fn test_unknown_shape_falls_back_to_random() {
        assert_eq!(ShapeKind::from_name("dodecahedron"), ShapeKind::Random);
        assert_eq!(ShapeKind::from_index(99), ShapeKind::Random);
        assert_eq!(ShapeKind::from_index(3), ShapeKind::Helix);
    }

    #[test]
    fn test_color_parse() {
        let c = ColorRgb::parse("#3b82f6").unwrap();
        assert_eq!(c, ColorRgb::hex(0x3B82F6));
        assert_eq!(c.to_hex_string(), "#3b82f6");
        assert_eq!(ColorRgb::parse("ff0000").unwrap(), ColorRgb::rgb(1.0, 0.0, 0.0));
        assert!(matches!(ColorRgb::parse("#12345"), Err(ConfigError::InvalidColor(_))));
        assert!(ColorRgb::parse("#zzzzzz").is_err());
    }

    #[test]
    fn test_defaults() {
        let cfg = SceneConfig::default();
        assert_eq!(cfg.particle_count, 8000);
        assert_eq!(cfg.shape, ShapeKind::Random);
        assert_eq!(cfg.text, "MAGIC");
        assert_eq!(cfg.color.to_hex_string(), "#3b82f6");
    }

    #[test]
    fn test_normalize_clamps_everything() {
        let cfg = SceneConfig {
            particle_count: 10_000_000,
            particle_size: -1.0,
            speed_factor: 0.0,
            text: "ABCDEFGHIJKLMNOP".to_owned(),
            rotation_offset: RotationOffsets::new(-90.0, 720.0, f32::NAN),
            ..SceneConfig::default()
        }
        .normalized();

        assert_eq!(cfg.particle_count, MAX_PARTICLE_COUNT);
        assert_eq!(cfg.particle_size, MIN_PARTICLE_SIZE);
        assert_eq!(cfg.speed_factor, MIN_SPEED_FACTOR);
        assert_eq!(cfg.text, "ABCDEFGHIJKL");
        assert_eq!(cfg.rotation_offset, RotationOffsets::new(270.0, 0.0, 0.0));
    }

    #[test]
    fn test_negative_count_clamps_to_empty() {
        let mut cfg = SceneConfig::default();
        cfg.set_particle_count(-50);
        assert_eq!(cfg.particle_count, 0);
    }

    #[test]
    fn test_diff_classification() {
        let base = SceneConfig::default();

        assert_eq!(base.diff(&base), ConfigDelta::Unchanged);

        let mut speed = base.clone();
        speed.speed_factor = 2.0;
        assert_eq!(speed.diff(&base), ConfigDelta::Parameters);

        let mut rotated = base.clone();
        rotated.rotation_offset.y = 45.0;
        assert_eq!(rotated.diff(&base), ConfigDelta::Parameters);

        let mut shaped = base.clone();
        shaped.shape = ShapeKind::Sphere;
        assert_eq!(shaped.diff(&base), ConfigDelta::Regenerate);

        let mut texted = base.clone();
        texted.text = "HI".to_owned();
        assert_eq!(texted.diff(&base), ConfigDelta::Regenerate);

        let mut counted = shaped.clone();
        counted.particle_count = 4000;
        assert_eq!(counted.diff(&base), ConfigDelta::Reallocate);
        assert!(ConfigDelta::Reallocate.needs_regeneration());
        assert!(!ConfigDelta::Parameters.needs_regeneration());
    }

    #[test]
    fn test_scene_from_toml() {
        let cfg: SceneConfig = toml::from_str(
            r##"
            shape = "butterfly"
            particle_count = -3
            color = "#ff8800"
            [rotation_offset]
            z = 90.0
            "##,
        )
        .unwrap();

        assert_eq!(cfg.shape, ShapeKind::Butterfly);
        assert_eq!(cfg.particle_count, 0);
        assert_eq!(cfg.color, ColorRgb::hex(0xFF8800));
        assert_eq!(cfg.rotation_offset, RotationOffsets::new(0.0, 0.0, 90.0));
        assert_eq!(cfg.text, "MAGIC");
    }

    #[test]
    fn test_unknown_shape_in_toml_is_random() {
        let cfg: SceneConfig = toml::from_str(r#"shape = "teapot""#).unwrap();
        assert_eq!(cfg.shape, ShapeKind::Random);
    }

    #[test]
    fn test_smoothing_factor_is_unclamped() {
        let tuning = MotionTuning::default();
        assert!((tuning.smoothing_factor(1.0) - 0.08).abs() < 1e-7);
        assert!(tuning.smoothing_factor(25.0) > 1.0);
    }
}
