//! # Grip Indicator Overlay
//!
//! Immediate-mode feedback for the grip value. The frame loop computes an
//! `IndicatorState` every tick and pushes it straight to an `OverlaySink`;
//! nothing is diffed or retained between frames.

use nebula_shared::HandSignal;

/// Lowest opacity of a visible indicator.
pub const MIN_INDICATOR_OPACITY: f32 = 0.2;

/// Extra scale at full grip.
pub const GRIP_SCALE_GAIN: f32 = 0.5;

/// What the indicator should look like this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorState {
    /// Whether the indicator is drawn at all.
    pub visible: bool,
    /// Opacity in `[0.2, 1]` while visible.
    pub opacity: f32,
    /// Scale multiplier, `1 + 0.5 * grip`.
    pub scale: f32,
}

impl IndicatorState {
    /// The hidden indicator.
    pub const HIDDEN: Self = Self {
        visible: false,
        opacity: 0.0,
        scale: 1.0,
    };
}

/// Receives the indicator state once per frame.
pub trait OverlaySink {
    /// Draws (or hides) the indicator.
    fn update_indicator(&mut self, state: IndicatorState);
}

/// Sink that ignores every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOverlay;

impl OverlaySink for NullOverlay {
    fn update_indicator(&mut self, _state: IndicatorState) {}
}

/// Maps a hand signal to indicator state.
#[derive(Debug, Default, Clone, Copy)]
pub struct GripIndicator;

impl GripIndicator {
    /// Indicator state for `signal`.
    #[must_use]
    pub fn state(signal: &HandSignal) -> IndicatorState {
        let signal = signal.effective();
        if !signal.present {
            return IndicatorState::HIDDEN;
        }
        IndicatorState {
            visible: true,
            opacity: signal.grip.max(MIN_INDICATOR_OPACITY),
            scale: 1.0 + GRIP_SCALE_GAIN * signal.grip,
        }
    }

    /// Computes the state and pushes it to `sink`.
    pub fn push(signal: &HandSignal, sink: &mut dyn OverlaySink) -> IndicatorState {
        let state = Self::state(signal);
        sink.update_indicator(state);
        state
    }
}
