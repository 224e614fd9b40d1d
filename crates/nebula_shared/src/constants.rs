//! # Bounds & Defaults
//!
//! Values the configuration boundary clamps against, and the defaults a
//! fresh session starts from.

// =============================================================================
// PARTICLE BUDGET
// =============================================================================

/// Particle count a fresh scene starts with.
pub const DEFAULT_PARTICLE_COUNT: usize = 8_000;

/// Hard ceiling on the live buffer size.
///
/// The configuration UI offers 1,000..=15,000; anything above this is clamped.
pub const MAX_PARTICLE_COUNT: usize = 50_000;

// =============================================================================
// SCENE PARAMETERS
// =============================================================================

/// Default point sprite size (world units).
pub const DEFAULT_PARTICLE_SIZE: f32 = 0.2;

/// Smallest accepted point size.
pub const MIN_PARTICLE_SIZE: f32 = 0.01;

/// Largest accepted point size.
pub const MAX_PARTICLE_SIZE: f32 = 5.0;

/// Default responsiveness multiplier.
pub const DEFAULT_SPEED_FACTOR: f32 = 1.0;

/// Smallest accepted responsiveness multiplier (must stay > 0).
pub const MIN_SPEED_FACTOR: f32 = 0.01;

/// Default particle color (`#3b82f6`).
pub const DEFAULT_COLOR: u32 = 0x003B_82F6;

/// Text shown when the TEXT shape is first selected.
pub const DEFAULT_TEXT: &str = "MAGIC";

/// Maximum characters accepted for TEXT content.
pub const MAX_TEXT_CHARS: usize = 12;

// =============================================================================
// HAND SIGNAL RANGES
// =============================================================================

/// Smallest relative hand scale.
pub const MIN_HAND_SCALE: f32 = 0.5;

/// Largest relative hand scale.
pub const MAX_HAND_SCALE: f32 = 3.0;
