//! # Synthetic Hand
//!
//! A scripted hand that produces plausible landmarks without a camera.
//! The headless driver publishes it from its own thread; tests use
//! `HandPose` to build landmarks with known grip, tilt and size.

use std::f32::consts::{FRAC_PI_2, TAU};

use crate::tracker::{
    HandLandmarks, Landmark, TrackerSettings, FINGERS, LANDMARK_COUNT, WRIST,
};

/// Angular spread of the four fingers around the middle finger (radians).
const FINGER_SPREAD: [f32; 4] = [-0.2, 0.0, 0.2, 0.4];

/// Thumb direction relative to the hand axis.
const THUMB_ANGLE: f32 = -0.9;

/// A static hand pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandPose {
    /// Target grip: 0 open, 1 fist.
    pub grip: f32,
    /// Wrist in normalized image coordinates.
    pub wrist: (f32, f32),
    /// Roll the estimator should report (radians, 0 = upright).
    pub tilt: f32,
    /// Wrist-to-knuckle length in image units.
    pub size: f32,
}

impl Default for HandPose {
    fn default() -> Self {
        Self {
            grip: 0.5,
            wrist: (0.5, 0.6),
            tilt: 0.0,
            size: 0.15,
        }
    }
}

impl HandPose {
    /// Landmarks for this pose as seen by a camera with `settings`.
    #[must_use]
    pub fn landmarks(&self, settings: &TrackerSettings) -> HandLandmarks {
        let mut points = [Landmark::default(); LANDMARK_COUNT];
        let (wx, wy) = self.wrist;
        let wrist = Landmark::new(wx, wy, 0.0);
        points[WRIST] = wrist;

        // Hand axis in aspect-corrected screen space.
        let axis = -self.tilt - FRAC_PI_2;
        let reach = 1.0 + settings.openness_span * (1.0 - self.grip);
        let at = |angle: f32, length: f32| {
            Landmark::new(
                wx + length * angle.cos() / settings.aspect_ratio,
                wy + length * angle.sin(),
                0.0,
            )
        };

        for (&(mcp, tip), spread) in FINGERS.iter().zip(FINGER_SPREAD) {
            let angle = axis + spread;
            points[mcp] = at(angle, self.size);
            points[mcp + 1] = at(angle, self.size * (1.0 + (reach - 1.0) / 3.0));
            points[mcp + 2] = at(angle, self.size * (1.0 + 2.0 * (reach - 1.0) / 3.0));
            points[tip] = at(angle, self.size * reach);
        }

        let thumb = axis + THUMB_ANGLE;
        for (joint, length) in [(1, 0.35), (2, 0.65), (3, 0.85), (4, 1.05)] {
            points[joint] = at(thumb, self.size * length);
        }

        HandLandmarks::new(points)
    }
}

/// A hand that opens and closes, drifts, tilts and periodically leaves
/// the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SyntheticHand {
    /// Seconds for one open-close cycle.
    pub grip_period: f32,
    /// Seconds for one present-then-absent cycle.
    pub presence_period: f32,
    /// Seconds of each presence cycle with no hand in view.
    pub absent_for: f32,
}

impl Default for SyntheticHand {
    fn default() -> Self {
        Self {
            grip_period: 4.0,
            presence_period: 12.0,
            absent_for: 2.0,
        }
    }
}

impl SyntheticHand {
    /// Pose at `time` seconds, or `None` while the hand is out of view.
    #[must_use]
    pub fn pose_at(&self, time: f32) -> Option<HandPose> {
        if time.rem_euclid(self.presence_period) >= self.presence_period - self.absent_for {
            return None;
        }

        Some(HandPose {
            grip: 0.5 - 0.5 * (TAU * time / self.grip_period).cos(),
            wrist: (
                0.5 + 0.15 * (0.5 * time).sin(),
                0.55 + 0.1 * (0.7 * time).cos(),
            ),
            tilt: 0.4 * (0.3 * time).sin(),
            size: 0.15 * (1.0 + 0.3 * (0.2 * time).sin()),
        })
    }

    /// Landmarks at `time` seconds.
    #[must_use]
    pub fn landmarks_at(&self, time: f32, settings: &TrackerSettings) -> Option<HandLandmarks> {
        self.pose_at(time).map(|pose| pose.landmarks(settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_leaves_frame_each_cycle() {
        let hand = SyntheticHand::default();
        assert!(hand.pose_at(1.0).is_some());
        assert!(hand.pose_at(10.5).is_none());
        assert!(hand.pose_at(12.5).is_some());
    }

    #[test]
    fn test_grip_cycles_between_open_and_fist() {
        let hand = SyntheticHand::default();
        let open = hand.pose_at(0.0).map(|p| p.grip);
        let fist = hand.pose_at(2.0).map(|p| p.grip);
        assert!(open.is_some_and(|g| g.abs() < 1e-6));
        assert!(fist.is_some_and(|g| (g - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_landmarks_stay_near_frame() {
        let hand = SyntheticHand::default();
        let settings = TrackerSettings::default();
        for step in 0..600 {
            if let Some(lm) = hand.landmarks_at(step as f32 * 0.02, &settings) {
                for p in lm.points() {
                    assert!(p.x > -0.5 && p.x < 1.5 && p.y > -0.5 && p.y < 1.5);
                }
            }
        }
    }
}
