//! # NEBULA Rendering Boundary
//!
//! Everything between the control signal and the renderer's vertex buffer.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       PER FRAME                               │
//! ├──────────────────────────────────────────────────────────────┤
//! │  HandSignal ─► effective() ─► Pose ─┐                         │
//! │                                     ▼                         │
//! │  TargetCache (shaped + idle) ─► blend/idle target ─► live +=  │
//! │                                                      │        │
//! │               positions (x,y,z floats) + PointMaterial ◄─────┘ │
//! └──────────────────────────────────────────────────────────────┘
//!                ▲
//!   Regenerator ─┘ (off-thread, latest generation wins)
//! ```
//!
//! ## MANDATE
//!
//! - The integrator is the only writer of the live buffer
//! - No allocation in the frame step
//! - Regeneration never blocks the frame unless the count changed

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod effects;
pub mod overlay;

pub use effects::{
    BlendFactor, BlendOp, BlendStateConfig, MotionIntegrator, PointMaterial, Pose, RegenError,
    RegenResult, Regenerator, ShapeKey, ShapeTargets, SpriteTexture, TargetCache,
};
pub use overlay::{GripIndicator, IndicatorState, NullOverlay, OverlaySink};
