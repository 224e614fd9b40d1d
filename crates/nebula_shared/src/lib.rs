//! # NEBULA Shared
//!
//! The data model every other crate speaks.
//!
//! ## Contents
//!
//! - `math`: `Vec3`, `Vec2`, `Mat3` and the per-frame `RigidTransform`
//! - `signal`: `HandSignal`, the single control value produced by hand tracking
//! - `config`: `SceneConfig`, `ShapeKind`, `MotionTuning` and config diffing
//! - `constants`: bounds and defaults
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on threading or generation code.
//! If you need a channel, put it in `nebula_core`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod constants;
pub mod math;
pub mod signal;

pub use config::{
    ColorRgb, ConfigDelta, ConfigError, ConfigResult, MotionTuning, RotationOffsets, SceneConfig,
    ShapeKind,
};
pub use constants::{DEFAULT_PARTICLE_COUNT, MAX_PARTICLE_COUNT, MAX_TEXT_CHARS};
pub use math::{Mat3, RigidTransform, Vec2, Vec3};
pub use signal::HandSignal;
