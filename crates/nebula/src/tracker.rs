//! # Landmark Signal Estimator
//!
//! Turns the 21 normalized hand landmarks produced by a hand-tracking model
//! into the one `HandSignal` the particle cloud consumes. The model itself
//! is an external collaborator; this is everything after it.
//!
//! Landmark coordinates are normalized image coordinates (`x` right, `y`
//! down, both in `[0, 1]`) from a mirrored camera feed.

use std::f32::consts::FRAC_PI_2;

use nebula_shared::constants::{MAX_HAND_SCALE, MIN_HAND_SCALE};
use nebula_shared::{HandSignal, Vec2};
use serde::{Deserialize, Serialize};

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

/// Number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

/// Wrist.
pub const WRIST: usize = 0;
/// Thumb tip.
pub const THUMB_TIP: usize = 4;
/// Index finger knuckle.
pub const INDEX_MCP: usize = 5;
/// Index finger tip.
pub const INDEX_TIP: usize = 8;
/// Middle finger knuckle.
pub const MIDDLE_MCP: usize = 9;
/// Middle finger tip.
pub const MIDDLE_TIP: usize = 12;
/// Ring finger knuckle.
pub const RING_MCP: usize = 13;
/// Ring finger tip.
pub const RING_TIP: usize = 16;
/// Pinky knuckle.
pub const PINKY_MCP: usize = 17;
/// Pinky tip.
pub const PINKY_TIP: usize = 20;

/// `(knuckle, tip)` for the four fingers that define grip.
pub const FINGERS: [(usize, usize); 4] = [
    (INDEX_MCP, INDEX_TIP),
    (MIDDLE_MCP, MIDDLE_TIP),
    (RING_MCP, RING_TIP),
    (PINKY_MCP, PINKY_TIP),
];

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// One normalized landmark.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal, 0 = left edge.
    pub x: f32,
    /// Vertical, 0 = top edge.
    pub y: f32,
    /// Depth relative to the wrist.
    pub z: f32,
}

impl Landmark {
    /// Creates a landmark.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in all three axes.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// The 21 landmarks of one detected hand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandLandmarks {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    /// Wraps a full landmark array.
    #[must_use]
    pub const fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Builds from a slice; `None` unless it holds exactly 21 landmarks.
    #[must_use]
    pub fn from_slice(points: &[Landmark]) -> Option<Self> {
        let points: [Landmark; LANDMARK_COUNT] = points.try_into().ok()?;
        Some(Self { points })
    }

    /// Landmark at `index` (see the index constants); `None` past the last.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Landmark> {
        self.points.get(index).copied()
    }

    /// Landmark for one of the index constants, all of which are in range.
    #[inline]
    fn at(&self, index: usize) -> Landmark {
        self.points[index]
    }

    /// All landmarks.
    #[must_use]
    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }
}

/// Estimator calibration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Camera frame width / height.
    pub aspect_ratio: f32,
    /// Wrist-to-knuckle distance that maps to scale 1.
    pub reference_size: f32,
    /// Tip/knuckle ratio above 1 that counts as a fully open hand.
    pub openness_span: f32,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: 4.0 / 3.0,
            reference_size: 0.15,
            openness_span: 1.2,
        }
    }
}

/// Landmarks in, `HandSignal` out.
#[derive(Clone, Copy, Debug, Default)]
pub struct SignalEstimator {
    settings: TrackerSettings,
}

impl SignalEstimator {
    /// Creates an estimator.
    #[must_use]
    pub const fn new(settings: TrackerSettings) -> Self {
        Self { settings }
    }

    /// Calibration in use.
    #[must_use]
    pub const fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    /// Signal for one detection tick. No hand means the absent signal.
    #[must_use]
    pub fn estimate(&self, hand: Option<&HandLandmarks>) -> HandSignal {
        let Some(hand) = hand else {
            return HandSignal::ABSENT;
        };

        HandSignal::tracked(
            self.grip(hand),
            Self::position(hand),
            self.roll(hand),
            self.scale(hand),
        )
    }

    /// Grip strength from how far the fingertips reach past the knuckles.
    ///
    /// A curled finger has its tip about as far from the wrist as its
    /// knuckle (ratio 1, grip 1); a straight one reaches `1 + span` (grip 0).
    #[must_use]
    pub fn grip(&self, hand: &HandLandmarks) -> f32 {
        let wrist = hand.at(WRIST);
        let total: f32 = FINGERS
            .iter()
            .map(|&(mcp, tip)| {
                let knuckle = wrist.distance(hand.at(mcp));
                if knuckle > f32::EPSILON {
                    wrist.distance(hand.at(tip)) / knuckle
                } else {
                    1.0
                }
            })
            .sum();
        let ratio = total / FINGERS.len() as f32;

        (1.0 - (ratio - 1.0) / self.settings.openness_span).clamp(0.0, 1.0)
    }

    /// Roll about the viewing axis; 0 for an upright hand.
    #[must_use]
    pub fn roll(&self, hand: &HandLandmarks) -> f32 {
        let wrist = hand.at(WRIST);
        let middle = hand.at(MIDDLE_MCP);
        let dx = (middle.x - wrist.x) * self.settings.aspect_ratio;
        let dy = middle.y - wrist.y;

        -dy.atan2(dx) - FRAC_PI_2
    }

    /// Wrist position mapped to `[-1, 1]²`, Y up.
    #[must_use]
    pub fn position(hand: &HandLandmarks) -> Vec2 {
        let wrist = hand.at(WRIST);
        Vec2::new((wrist.x - 0.5) * 2.0, -(wrist.y * 2.0 - 1.0))
    }

    /// Hand size relative to the reference distance, clamped.
    #[must_use]
    pub fn scale(&self, hand: &HandLandmarks) -> f32 {
        let size = hand.at(WRIST).distance(hand.at(MIDDLE_MCP));
        (size / self.settings.reference_size).clamp(MIN_HAND_SCALE, MAX_HAND_SCALE)
    }

    /// Thumb-to-index distance.
    #[must_use]
    pub fn pinch_distance(hand: &HandLandmarks) -> f32 {
        hand.at(THUMB_TIP).distance(hand.at(INDEX_TIP))
    }
}
