//! # NEBULA Frame Loop
//!
//! One `tick` per display refresh:
//! ```text
//! Frame N:
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. CONFIG                                                           │
//! │    ├─ Read the config slot if it changed                            │
//! │    ├─ Count change: reallocate + regenerate inline                  │
//! │    └─ Shape/text change: request targets from the worker            │
//! │                                                                     │
//! │ 2. TARGETS                                                          │
//! │    └─ Poll the worker; install only the latest generation           │
//! │                                                                     │
//! │ 3. STEP                                                             │
//! │    ├─ Read the latest hand signal (stale or skipped is fine)        │
//! │    └─ Move every particle a fraction toward its target              │
//! │                                                                     │
//! │ 4. OVERLAY                                                          │
//! │    └─ Push the grip indicator state to the sink                     │
//! │                                                                     │
//! │ 5. PUBLISH                                                          │
//! │    └─ Hand buffer, material, sprite to the renderer, record stats   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in a tick blocks. The worker is optional; without it shape
//! changes are regenerated inline.

use std::time::{Duration, Instant};

use nebula_core::{FrameClock, FrameTime, SlotReader};
use nebula_procedural::ShapeSeed;
use nebula_rendering::{
    GripIndicator, IndicatorState, MotionIntegrator, NullOverlay, OverlaySink, PointMaterial,
    Regenerator, SpriteTexture,
};
use nebula_shared::{ConfigDelta, HandSignal, SceneConfig};
use tracing::{debug, info, warn};

use crate::error::NebulaResult;
use crate::settings::{FrameSettings, Settings};

/// Sub-seed purpose for the regeneration worker's stream.
const REGEN_STREAM: u64 = 0x7265_6765_6e;

/// Timing and bookkeeping for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Frame number.
    pub frame: u64,
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Integrator step time in microseconds.
    pub step_us: u64,
    /// Whole tick time in microseconds.
    pub total_us: u64,
    /// Hand signals overwritten before any frame read them (cumulative).
    pub dropped_signals: u64,
    /// Shaped-set regenerations triggered by config changes (cumulative).
    pub regenerations: u64,
}

/// What the renderer receives each frame.
#[derive(Debug)]
pub struct FrameOutput<'a> {
    /// `count * 3` floats, `x, y, z` per particle.
    pub positions: &'a [f32],
    /// The same buffer as raw bytes.
    pub bytes: &'a [u8],
    /// Pass-through material.
    pub material: PointMaterial,
    /// Soft circular sprite every point is drawn with.
    pub sprite: &'a SpriteTexture,
    /// Grip indicator pushed this frame.
    pub indicator: IndicatorState,
    /// Always true: the buffer changes every frame and must be re-uploaded.
    pub dirty: bool,
    /// Timing for this frame.
    pub stats: FrameStats,
}

/// Drives the integrator from the latest config and hand signal.
pub struct MorphLoop<O: OverlaySink = NullOverlay> {
    integrator: MotionIntegrator,
    signal: SlotReader<HandSignal>,
    config: SlotReader<SceneConfig>,
    regenerator: Option<Regenerator>,
    overlay: O,
    sprite: SpriteTexture,
    clock: FrameClock,
    frame_settings: FrameSettings,
    stats: FrameStatsAccumulator,
    regenerations: u64,
}

impl<O: OverlaySink> MorphLoop<O> {
    /// Creates a loop seeded from OS entropy.
    ///
    /// The initial scene is whatever the config slot currently holds.
    ///
    /// # Errors
    ///
    /// Returns error if the regeneration worker cannot be started.
    pub fn new(
        settings: &Settings,
        signal: SlotReader<HandSignal>,
        config: SlotReader<SceneConfig>,
        overlay: O,
    ) -> NebulaResult<Self> {
        Self::with_seed(settings, signal, config, overlay, ShapeSeed::from_entropy())
    }

    /// Creates a loop with fixed random streams.
    ///
    /// # Errors
    ///
    /// Returns error if the regeneration worker cannot be started.
    pub fn with_seed(
        settings: &Settings,
        signal: SlotReader<HandSignal>,
        mut config: SlotReader<SceneConfig>,
        overlay: O,
        seed: ShapeSeed,
    ) -> NebulaResult<Self> {
        let scene = config.read();
        let integrator = MotionIntegrator::with_seed(&scene, settings.motion, seed);

        let regenerator = if settings.frame.async_regeneration {
            Some(Regenerator::spawn(seed.derive(REGEN_STREAM))?)
        } else {
            None
        };

        info!(
            shape = %integrator.config().shape,
            count = integrator.len(),
            async_regeneration = regenerator.is_some(),
            "morph loop ready"
        );

        Ok(Self {
            integrator,
            signal,
            config,
            regenerator,
            overlay,
            sprite: SpriteTexture::soft_circle(),
            clock: FrameClock::new(),
            frame_settings: settings.frame,
            stats: FrameStatsAccumulator::new(),
            regenerations: 0,
        })
    }

    /// Runs one frame against the wall clock.
    pub fn tick(&mut self) -> FrameOutput<'_> {
        let time = self.clock.tick();
        self.tick_at(time)
    }

    /// Runs one frame at an explicit time.
    pub fn tick_at(&mut self, time: FrameTime) -> FrameOutput<'_> {
        let started = Instant::now();

        self.apply_latest_config();
        self.install_ready_targets();

        let signal = self.signal.read();
        let step_started = Instant::now();
        self.integrator.step(&signal, time.elapsed);
        let step_us = micros(step_started.elapsed());

        let indicator = GripIndicator::push(&signal, &mut self.overlay);

        let total = started.elapsed();
        let stats = FrameStats {
            frame: time.frame,
            delta: time.delta,
            step_us,
            total_us: micros(total),
            dropped_signals: self.signal.dropped(),
            regenerations: self.regenerations,
        };

        let budget = self.frame_settings.budget();
        self.stats.record(stats, micros(budget));
        if total > budget {
            warn!(
                frame = time.frame,
                total_ms = total.as_secs_f64() * 1000.0,
                budget_ms = budget.as_secs_f64() * 1000.0,
                "frame exceeded budget"
            );
        }

        FrameOutput {
            positions: self.integrator.positions_flat(),
            bytes: self.integrator.as_bytes(),
            material: self.integrator.material(),
            sprite: &self.sprite,
            indicator,
            dirty: true,
            stats,
        }
    }

    /// Blocks up to `timeout` for a pending shaped set and installs it.
    ///
    /// Returns true if the installed set matches the current config. Meant
    /// for startup and tests; never called from `tick`.
    pub fn flush_regeneration(&mut self, timeout: Duration) -> bool {
        self.apply_latest_config();
        if !self.integrator.needs_targets() {
            return true;
        }
        if let Some(targets) = self
            .regenerator
            .as_mut()
            .and_then(|regen| regen.wait_latest(timeout))
        {
            self.integrator.install_targets(targets);
        }
        !self.integrator.needs_targets()
    }

    /// The integrator (read-only; the loop is its only writer).
    #[must_use]
    pub fn integrator(&self) -> &MotionIntegrator {
        &self.integrator
    }

    /// The overlay sink.
    #[must_use]
    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    /// Accumulated statistics.
    #[must_use]
    pub fn stats(&self) -> &FrameStatsAccumulator {
        &self.stats
    }

    /// Frame pacing settings.
    #[must_use]
    pub fn frame_settings(&self) -> &FrameSettings {
        &self.frame_settings
    }

    /// True while shape changes go to the worker thread.
    #[must_use]
    pub fn is_async(&self) -> bool {
        self.regenerator.is_some()
    }

    /// Worker results dropped because a newer request superseded them.
    #[must_use]
    pub fn discarded_results(&self) -> u64 {
        self.regenerator.as_ref().map_or(0, Regenerator::discarded)
    }

    fn apply_latest_config(&mut self) {
        let Some(config) = self.config.read_if_changed() else {
            return;
        };

        let delta = if self.regenerator.is_some() {
            self.integrator.apply_config_deferred(&config)
        } else {
            self.integrator.apply_config(&config)
        };

        if delta.needs_regeneration() {
            self.regenerations += 1;
        }
        if delta == ConfigDelta::Regenerate && self.integrator.needs_targets() {
            self.request_targets();
        }
    }

    fn request_targets(&mut self) {
        let key = self.integrator.shaped_key();
        let Some(regenerator) = self.regenerator.as_mut() else {
            self.integrator.regenerate_targets();
            return;
        };

        match regenerator.request(key) {
            Ok(generation) => debug!(generation, "shaped set requested"),
            Err(err) => {
                warn!(%err, "regeneration worker unavailable, regenerating inline");
                self.regenerator = None;
                self.integrator.regenerate_targets();
            }
        }
    }

    fn install_ready_targets(&mut self) {
        if let Some(targets) = self.regenerator.as_mut().and_then(Regenerator::poll) {
            self.integrator.install_targets(targets);
        }
    }
}

#[inline]
fn micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}

/// Accumulator for frame statistics.
#[derive(Clone, Debug)]
pub struct FrameStatsAccumulator {
    /// Total frames recorded.
    pub frames_recorded: u64,
    /// Sum of total frame times.
    pub total_us_sum: u64,
    /// Sum of integrator step times.
    pub step_us_sum: u64,
    /// Min frame time.
    pub min_frame_us: u64,
    /// Max frame time.
    pub max_frame_us: u64,
    /// Frames that exceeded budget.
    pub frames_over_budget: u64,
    /// Dropped signals as of the last recorded frame.
    pub dropped_signals: u64,
    /// Regenerations as of the last recorded frame.
    pub regenerations: u64,
}

impl FrameStatsAccumulator {
    /// Creates a new accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames_recorded: 0,
            total_us_sum: 0,
            step_us_sum: 0,
            min_frame_us: u64::MAX,
            max_frame_us: 0,
            frames_over_budget: 0,
            dropped_signals: 0,
            regenerations: 0,
        }
    }

    /// Records a frame's statistics against a budget in microseconds.
    pub fn record(&mut self, stats: FrameStats, budget_us: u64) {
        self.frames_recorded += 1;
        self.total_us_sum += stats.total_us;
        self.step_us_sum += stats.step_us;
        self.min_frame_us = self.min_frame_us.min(stats.total_us);
        self.max_frame_us = self.max_frame_us.max(stats.total_us);
        self.dropped_signals = stats.dropped_signals;
        self.regenerations = stats.regenerations;

        if stats.total_us > budget_us {
            self.frames_over_budget += 1;
        }
    }

    /// Returns average frame time in milliseconds.
    #[must_use]
    pub fn avg_frame_ms(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        (self.total_us_sum as f64 / self.frames_recorded as f64) / 1000.0
    }

    /// Returns average integrator step time in milliseconds.
    #[must_use]
    pub fn avg_step_ms(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        (self.step_us_sum as f64 / self.frames_recorded as f64) / 1000.0
    }

    /// Returns the fraction of frames over budget.
    #[must_use]
    pub fn over_budget_ratio(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        self.frames_over_budget as f64 / self.frames_recorded as f64
    }

    /// Logs a summary of the statistics.
    pub fn log_summary(&self) {
        if self.frames_recorded == 0 {
            info!("no frames recorded");
            return;
        }
        info!(
            frames = self.frames_recorded,
            avg_frame_ms = self.avg_frame_ms(),
            avg_step_ms = self.avg_step_ms(),
            min_frame_ms = self.min_frame_us as f64 / 1000.0,
            max_frame_ms = self.max_frame_us as f64 / 1000.0,
            over_budget = self.frames_over_budget,
            over_budget_pct = self.over_budget_ratio() * 100.0,
            dropped_signals = self.dropped_signals,
            regenerations = self.regenerations,
            "frame statistics"
        );
    }
}

impl Default for FrameStatsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
