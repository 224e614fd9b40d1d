//! # Particle Effects
//!
//! This module provides:
//! - `MotionIntegrator` - owns and advances the live particle buffer
//! - `TargetCache` - the shaped + idle point sets, keyed by configuration
//! - `Regenerator` - off-thread shape regeneration, latest request wins
//! - `PointMaterial` / `SpriteTexture` - what the renderer draws with
//!
//! Performance target: 15,000 particles stepped well inside one frame

mod material;
mod motion;
mod regen;
mod targets;

pub use material::{
    BlendFactor, BlendOp, BlendStateConfig, PointMaterial, SpriteTexture, DEFAULT_OPACITY,
    SPRITE_RADIUS, SPRITE_SIZE,
};
pub use motion::{idle_target, jitter, MotionIntegrator, Pose};
pub use regen::{RegenError, RegenResult, Regenerator};
pub use targets::{ShapeKey, ShapeTargets, TargetCache};
