//! # Hand Signal
//!
//! The single continuous control value that drives the whole particle cloud.
//!
//! The tracking collaborator produces one `HandSignal` per detection tick and
//! overwrites the latest-value slot with it. The consumer never trusts the
//! producer's fields directly: `effective()` is the only view the motion
//! code reads.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_HAND_SCALE, MIN_HAND_SCALE};
use crate::math::Vec2;

/// Normalized hand pose + grip, as emitted by the tracking collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandSignal {
    /// Whether a hand is currently tracked.
    pub present: bool,
    /// Grip strength: 0 = open hand, 1 = closed fist. Continuous.
    pub grip: f32,
    /// Planar offset in `[-1, 1]²`.
    pub position: Vec2,
    /// Roll about the viewing axis (radians).
    pub rotation_z: f32,
    /// Hand size relative to the reference distance, `[0.5, 3.0]`.
    pub scale: f32,
}

impl HandSignal {
    /// The "no hand" signal: every field inert.
    pub const ABSENT: Self = Self {
        present: false,
        grip: 0.0,
        position: Vec2::ZERO,
        rotation_z: 0.0,
        scale: 1.0,
    };

    /// Creates a present signal.
    #[must_use]
    pub const fn tracked(grip: f32, position: Vec2, rotation_z: f32, scale: f32) -> Self {
        Self {
            present: true,
            grip,
            position,
            rotation_z,
            scale,
        }
    }

    /// The consumer's view of this signal.
    ///
    /// - absent: every other field forced inert (grip 0, offsets 0, scale 1)
    /// - present: fields clamped into their documented ranges; non-finite
    ///   values fall back to the inert value for that field
    #[must_use]
    pub fn effective(&self) -> Self {
        if !self.present {
            return Self::ABSENT;
        }

        Self {
            present: true,
            grip: finite_or(self.grip, 0.0).clamp(0.0, 1.0),
            position: Vec2::new(
                finite_or(self.position.x, 0.0).clamp(-1.0, 1.0),
                finite_or(self.position.y, 0.0).clamp(-1.0, 1.0),
            ),
            rotation_z: finite_or(self.rotation_z, 0.0),
            scale: finite_or(self.scale, 1.0).clamp(MIN_HAND_SCALE, MAX_HAND_SCALE),
        }
    }
}

impl Default for HandSignal {
    fn default() -> Self {
        Self::ABSENT
    }
}

#[inline]
fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_signal_is_inert_regardless_of_fields() {
        let garbage = HandSignal {
            present: false,
            grip: 0.9,
            position: Vec2::new(0.7, -0.3),
            rotation_z: 1.2,
            scale: 2.5,
        };

        assert_eq!(garbage.effective(), HandSignal::ABSENT);
    }

    #[test]
    fn test_present_signal_is_clamped() {
        let wild = HandSignal::tracked(1.7, Vec2::new(-4.0, 2.0), 0.5, 9.0);
        let eff = wild.effective();

        assert!(eff.present);
        assert_eq!(eff.grip, 1.0);
        assert_eq!(eff.position, Vec2::new(-1.0, 1.0));
        assert_eq!(eff.rotation_z, 0.5);
        assert_eq!(eff.scale, MAX_HAND_SCALE);
    }

    #[test]
    fn test_non_finite_fields_fall_back() {
        let nan = HandSignal::tracked(f32::NAN, Vec2::new(f32::INFINITY, 0.2), f32::NAN, f32::NAN);
        let eff = nan.effective();

        assert_eq!(eff.grip, 0.0);
        assert_eq!(eff.position, Vec2::new(0.0, 0.2));
        assert_eq!(eff.rotation_z, 0.0);
        assert_eq!(eff.scale, 1.0);
    }

    #[test]
    fn test_in_range_signal_passes_through() {
        let s = HandSignal::tracked(0.4, Vec2::new(0.1, -0.2), -0.3, 1.25);
        assert_eq!(s.effective(), s);
    }
}
