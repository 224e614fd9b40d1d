//! # NEBULA
//!
//! Hand-driven particle morphing, wired end to end.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐   HandSignal    ┌──────────────┐
//! │ tracking thread  │──(LatestSlot)──►│              │   positions
//! │ SignalEstimator  │                 │  MorphLoop   │──────────────► renderer
//! └──────────────────┘                 │  (per tick)  │   material
//! ┌──────────────────┐   SceneConfig   │              │
//! │ configuration UI │──(LatestSlot)──►│              │──► OverlaySink
//! └──────────────────┘                 └──────┬───────┘
//!                                             │ request / poll
//!                                      ┌──────▼───────┐
//!                                      │ Regenerator  │
//!                                      └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - `game_loop`: frame orchestration and timing
//! - `tracker`: hand landmarks to `HandSignal`
//! - `synthetic`: a scripted hand for headless runs and tests
//! - `settings`: TOML settings
//! - `error`: error types

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod game_loop;
pub mod settings;
pub mod synthetic;
pub mod tracker;

// Re-export the layers
pub use nebula_core as core;
pub use nebula_procedural as procedural;
pub use nebula_rendering as rendering;
pub use nebula_shared as shared;

pub use error::{NebulaError, NebulaResult, SettingsError, SettingsResult};
pub use game_loop::{FrameOutput, FrameStats, FrameStatsAccumulator, MorphLoop};
pub use settings::{FrameSettings, Settings};
pub use synthetic::SyntheticHand;
pub use tracker::{HandLandmarks, Landmark, SignalEstimator, TrackerSettings};
