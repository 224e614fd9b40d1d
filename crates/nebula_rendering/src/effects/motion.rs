//! # Motion Integrator
//!
//! Owns the live particle buffer and advances it once per frame.
//!
//! ## Per-frame step
//!
//! ```text
//! signal absent:   target = idle[i] + breathing(i, t)
//! signal present:  shaped    = R·s·shape[i] + offset
//!                  dispersed = 1.5·idle[i]  + offset
//!                  target    = lerp(dispersed, shaped, grip) + jitter(i, t)
//!
//! live[i] += (target - live[i]) · 0.08 · speed
//! ```
//!
//! The smoothing factor is not clamped. Above 1 particles overshoot their
//! target; a warning is logged when a configuration produces that.

use nebula_procedural::{generate, ShapeRng, ShapeSeed};
use nebula_shared::{
    ConfigDelta, HandSignal, MotionTuning, RigidTransform, SceneConfig, ShapeKind, Vec3,
};
use rand::Rng;
use tracing::{debug, info, warn};

use super::material::PointMaterial;
use super::targets::{ShapeKey, ShapeTargets, TargetCache};

/// Rotation, scale, planar offset and grip for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// Rotation (config offset + hand roll) with the hand scale folded in.
    pub transform: RigidTransform,
    /// Planar offset in world units; depth is never translated.
    pub offset: Vec3,
    /// Interpolation weight from dispersed (0) to shaped (1).
    pub grip: f32,
}

impl Pose {
    /// Builds the pose for a signal. The signal is sanitized first.
    #[must_use]
    pub fn new(signal: &HandSignal, config: &SceneConfig, tuning: &MotionTuning) -> Self {
        let signal = signal.effective();

        let mut rotation = config.rotation_offset.to_radians();
        if signal.present {
            rotation.z += signal.rotation_z;
        }

        Self {
            transform: RigidTransform::new(rotation, signal.scale),
            offset: Vec3::new(
                signal.position.x * tuning.offset_scale,
                signal.position.y * tuning.offset_scale,
                0.0,
            ),
            grip: signal.grip,
        }
    }

    /// Shape point under the pose.
    #[inline]
    #[must_use]
    pub fn shaped(&self, point: Vec3) -> Vec3 {
        self.transform.apply(point) + self.offset
    }

    /// Idle point pushed outward, under the planar offset only.
    #[inline]
    #[must_use]
    pub fn dispersed(&self, idle: Vec3, tuning: &MotionTuning) -> Vec3 {
        idle * tuning.disperse_scale + self.offset
    }

    /// Grip-weighted blend of the dispersed and shaped targets, without jitter.
    #[inline]
    #[must_use]
    pub fn blend(&self, shape: Vec3, idle: Vec3, tuning: &MotionTuning) -> Vec3 {
        self.dispersed(idle, tuning)
            .lerp(self.shaped(shape), self.grip)
    }
}

/// Resting target: the idle point plus a slow per-particle oscillation.
#[inline]
#[must_use]
pub fn idle_target(idle: Vec3, index: usize, time: f32, tuning: &MotionTuning) -> Vec3 {
    let i = index as f32;
    let phase = time + 0.1 * i;
    let amp = tuning.idle_amplitude;

    Vec3::new(
        idle.x + amp * phase.sin(),
        idle.y + amp * phase.cos(),
        idle.z + amp * (0.5 * time + 0.05 * i).sin(),
    )
}

/// Interactive jitter, added identically to every axis.
#[inline]
#[must_use]
pub fn jitter(index: usize, time: f32, tuning: &MotionTuning) -> f32 {
    tuning.jitter_amplitude * (2.0 * time + index as f32).sin()
}

#[inline]
fn interactive_target(
    pose: &Pose,
    shape: Vec3,
    idle: Vec3,
    index: usize,
    time: f32,
    tuning: &MotionTuning,
) -> Vec3 {
    pose.blend(shape, idle, tuning) + Vec3::splat(jitter(index, time, tuning))
}

/// The live particle buffer and everything needed to advance it.
///
/// This is the only writer of the buffer.
#[derive(Debug)]
pub struct MotionIntegrator {
    config: SceneConfig,
    tuning: MotionTuning,
    live: Vec<Vec3>,
    targets: TargetCache,
    rng: ShapeRng,
}

impl MotionIntegrator {
    /// Creates an integrator seeded from OS entropy.
    #[must_use]
    pub fn new(config: &SceneConfig, tuning: MotionTuning) -> Self {
        Self::with_seed(config, tuning, ShapeSeed::from_entropy())
    }

    /// Creates an integrator with a fixed random stream.
    ///
    /// The live buffer is seeded and both target sets are generated before
    /// this returns.
    #[must_use]
    pub fn with_seed(config: &SceneConfig, tuning: MotionTuning, seed: ShapeSeed) -> Self {
        let mut integrator = Self {
            config: config.normalized(),
            tuning,
            live: Vec::new(),
            targets: TargetCache::new(),
            rng: seed.rng(),
        };
        integrator.reallocate();
        integrator.regenerate_targets();
        integrator.warn_if_unstable();
        integrator
    }

    /// Current (normalized) configuration.
    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Current tuning constants.
    #[must_use]
    pub fn tuning(&self) -> &MotionTuning {
        &self.tuning
    }

    /// Replaces the tuning constants. Takes effect on the next step.
    pub fn set_tuning(&mut self, tuning: MotionTuning) {
        self.tuning = tuning;
        self.warn_if_unstable();
    }

    /// Number of live particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// True if there are no particles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Cached target sets.
    #[must_use]
    pub fn targets(&self) -> &TargetCache {
        &self.targets
    }

    /// Applies a configuration, regenerating synchronously if needed.
    pub fn apply_config(&mut self, config: &SceneConfig) -> ConfigDelta {
        self.apply(config, true)
    }

    /// Applies a configuration but leaves the shaped set of a shape/text
    /// change to the caller (see `Regenerator`). The idle set is still
    /// redrawn here, and a count change rebuilds the buffer and both target
    /// sets before returning.
    pub fn apply_config_deferred(&mut self, config: &SceneConfig) -> ConfigDelta {
        self.apply(config, false)
    }

    fn apply(&mut self, config: &SceneConfig, regenerate_now: bool) -> ConfigDelta {
        let next = config.normalized();
        let delta = next.diff(&self.config);
        if delta == ConfigDelta::Unchanged {
            return delta;
        }
        self.config = next;

        match delta {
            ConfigDelta::Reallocate => {
                self.reallocate();
                self.regenerate_targets();
            }
            ConfigDelta::Regenerate => {
                // Every cached set is invalidated; only the live buffer survives.
                self.regenerate_idle();
                if regenerate_now {
                    self.regenerate_targets();
                } else {
                    debug!(shape = %self.config.shape, "shaped set regeneration deferred");
                }
            }
            ConfigDelta::Parameters | ConfigDelta::Unchanged => {}
        }

        info!(?delta, shape = %self.config.shape, count = self.config.particle_count, "config applied");
        self.warn_if_unstable();
        delta
    }

    /// Key of the shaped set the current configuration needs.
    #[must_use]
    pub fn shaped_key(&self) -> ShapeKey {
        ShapeKey::for_config(&self.config)
    }

    /// True if the installed shaped set is not the one the config needs.
    #[must_use]
    pub fn needs_targets(&self) -> bool {
        !self.targets.is_current(&self.shaped_key())
    }

    /// Installs an externally generated shaped set.
    ///
    /// Rejected (returns false) unless it was generated for the current
    /// configuration.
    pub fn install_targets(&mut self, targets: ShapeTargets) -> bool {
        if targets.key != self.shaped_key() {
            debug!(generation = targets.generation, "discarding shaped set for a stale config");
            return false;
        }
        let installed = self.targets.install_shaped(targets.key, targets.points);
        if installed {
            debug!(generation = targets.generation, "shaped set installed");
        }
        installed
    }

    /// Advances every particle one frame toward its target.
    ///
    /// `time` is seconds since the loop started.
    pub fn step(&mut self, signal: &HandSignal, time: f32) {
        let signal = signal.effective();
        let tuning = self.tuning;
        let factor = tuning.smoothing_factor(self.config.speed_factor);
        let idle = self.targets.idle().as_slice();

        if signal.present {
            let pose = Pose::new(&signal, &self.config, &tuning);
            let shaped = self.targets.shaped().as_slice();

            for (i, ((live, &shape), &rest)) in
                self.live.iter_mut().zip(shaped).zip(idle).enumerate()
            {
                let target = interactive_target(&pose, shape, rest, i, time, &tuning);
                *live += (target - *live) * factor;
            }
        } else {
            for (i, (live, &rest)) in self.live.iter_mut().zip(idle).enumerate() {
                let target = idle_target(rest, i, time, &tuning);
                *live += (target - *live) * factor;
            }
        }
    }

    /// The target particle `index` moves toward this frame.
    #[must_use]
    pub fn target_for(&self, index: usize, signal: &HandSignal, time: f32) -> Option<Vec3> {
        let signal = signal.effective();
        let rest = self.targets.idle().get(index)?;

        if signal.present {
            let shape = self.targets.shaped().get(index)?;
            let pose = Pose::new(&signal, &self.config, &self.tuning);
            Some(interactive_target(&pose, shape, rest, index, time, &self.tuning))
        } else {
            Some(idle_target(rest, index, time, &self.tuning))
        }
    }

    /// Grip-blended target for `index` before jitter. `None` for an absent
    /// signal, which has no blend.
    #[must_use]
    pub fn blend_target(&self, index: usize, signal: &HandSignal) -> Option<Vec3> {
        let signal = signal.effective();
        if !signal.present {
            return None;
        }
        let shape = self.targets.shaped().get(index)?;
        let rest = self.targets.idle().get(index)?;
        let pose = Pose::new(&signal, &self.config, &self.tuning);
        Some(pose.blend(shape, rest, &self.tuning))
    }

    /// Live positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.live
    }

    /// Live positions as `count * 3` floats, `x, y, z` per particle.
    #[must_use]
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.live)
    }

    /// Live positions as raw bytes for upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.live)
    }

    /// Material for the current configuration.
    #[must_use]
    pub fn material(&self) -> PointMaterial {
        PointMaterial::from_config(&self.config)
    }

    /// Reseeds the live buffer and regenerates the idle set at the current count.
    fn reallocate(&mut self) {
        let count = self.config.particle_count;
        let span = 2.0 * self.tuning.seed_half_width;
        let rng = &mut self.rng;

        self.live = (0..count)
            .map(|_| {
                Vec3::new(
                    (rng.gen::<f32>() - 0.5) * span,
                    (rng.gen::<f32>() - 0.5) * span,
                    (rng.gen::<f32>() - 0.5) * span,
                )
            })
            .collect();
        self.regenerate_idle();

        info!(count, "live buffer reallocated");
    }

    /// Draws a fresh idle (dispersed reference) set at the current count.
    fn regenerate_idle(&mut self) {
        let count = self.config.particle_count;
        self.targets
            .install_idle(generate(ShapeKind::Random, count, "", &mut self.rng));
        debug!(count, "idle set regenerated");
    }

    /// Regenerates the shaped set for the current configuration inline.
    ///
    /// Used when a deferred regeneration cannot be handed to a worker.
    pub fn regenerate_targets(&mut self) {
        let key = self.shaped_key();
        let points = generate(key.kind, key.count, &key.text, &mut self.rng);
        debug!(shape = %key.kind, count = key.count, "shaped set regenerated");
        self.targets.install_shaped(key, points);
    }

    fn warn_if_unstable(&self) {
        let factor = self.tuning.smoothing_factor(self.config.speed_factor);
        if factor > 1.0 {
            warn!(
                factor,
                speed = self.config.speed_factor,
                "smoothing factor above 1, particles will overshoot"
            );
        }
    }
}
