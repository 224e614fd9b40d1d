//! End-to-end frame loop behavior: slots in, buffer and overlay out.

use std::time::Duration;

use nebula::core::{FrameTime, LatestSlot};
use nebula::procedural::ShapeSeed;
use nebula::rendering::{IndicatorState, OverlaySink};
use nebula::shared::{HandSignal, SceneConfig, ShapeKind, Vec2};
use nebula::{MorphLoop, Settings, SignalEstimator, SyntheticHand};

const WAIT: Duration = Duration::from_secs(5);

#[derive(Default)]
struct RecordingOverlay {
    states: Vec<IndicatorState>,
}

impl OverlaySink for RecordingOverlay {
    fn update_indicator(&mut self, state: IndicatorState) {
        self.states.push(state);
    }
}

fn settings(count: usize, async_regeneration: bool) -> Settings {
    let mut settings = Settings::default();
    settings.scene.particle_count = count;
    settings.frame.async_regeneration = async_regeneration;
    settings
}

fn frame(n: u64) -> FrameTime {
    FrameTime {
        elapsed: n as f32 / 60.0,
        delta: 1.0 / 60.0,
        frame: n,
    }
}

#[test]
fn test_overlay_receives_one_update_per_tick() {
    let settings = settings(200, false);
    let signal = LatestSlot::new(HandSignal::ABSENT);
    let config = LatestSlot::new(settings.scene.clone());
    let mut morph = MorphLoop::with_seed(
        &settings,
        signal.reader(),
        config.reader(),
        RecordingOverlay::default(),
        ShapeSeed::new(10),
    )
    .unwrap();

    morph.tick_at(frame(0));
    signal.publish(HandSignal::tracked(1.0, Vec2::ZERO, 0.0, 1.0));
    morph.tick_at(frame(1));
    signal.publish(HandSignal::ABSENT);
    morph.tick_at(frame(2));

    let states = &morph.overlay().states;
    assert_eq!(states.len(), 3);
    assert!(!states[0].visible);
    assert!(states[1].visible);
    assert!((states[1].opacity - 1.0).abs() < 1e-6);
    assert!((states[1].scale - 1.5).abs() < 1e-6);
    assert!(!states[2].visible);
}

#[test]
fn test_skipped_signals_are_counted_not_queued() {
    let settings = settings(100, false);
    let signal = LatestSlot::new(HandSignal::ABSENT);
    let config = LatestSlot::new(settings.scene.clone());
    let mut morph = MorphLoop::with_seed(
        &settings,
        signal.reader(),
        config.reader(),
        RecordingOverlay::default(),
        ShapeSeed::new(11),
    )
    .unwrap();

    for grip in [0.1, 0.2, 0.3, 0.9] {
        signal.publish(HandSignal::tracked(grip, Vec2::ZERO, 0.0, 1.0));
    }
    let stats = morph.tick_at(frame(0)).stats;

    assert_eq!(stats.dropped_signals, 3);
    // Only the latest grip reached the overlay
    assert!((morph.overlay().states[0].opacity - 0.9).abs() < 1e-6);
}

#[test]
fn test_count_change_applies_in_the_same_frame() {
    let settings = settings(8000, true);
    let signal = LatestSlot::new(HandSignal::ABSENT);
    let config = LatestSlot::new(settings.scene.clone());
    let mut morph = MorphLoop::with_seed(
        &settings,
        signal.reader(),
        config.reader(),
        RecordingOverlay::default(),
        ShapeSeed::new(12),
    )
    .unwrap();

    let mut next = settings.scene.clone();
    next.particle_count = 4000;
    config.publish(next);

    let out = morph.tick_at(frame(0));
    assert_eq!(out.positions.len(), 12_000);
    assert!(!morph.integrator().needs_targets());
}

#[test]
fn test_async_shape_change_installs_latest_only() {
    let settings = settings(2000, true);
    let signal = LatestSlot::new(HandSignal::tracked(1.0, Vec2::ZERO, 0.0, 1.0));
    let config = LatestSlot::new(settings.scene.clone());
    let mut morph = MorphLoop::with_seed(
        &settings,
        signal.reader(),
        config.reader(),
        RecordingOverlay::default(),
        ShapeSeed::new(13),
    )
    .unwrap();
    assert!(morph.is_async());

    // Rapid switching: each change lands on its own frame
    let mut scene = settings.scene.clone();
    for (n, shape) in [ShapeKind::Cube, ShapeKind::Helix, ShapeKind::Sphere]
        .into_iter()
        .enumerate()
    {
        scene.shape = shape;
        config.publish(scene.clone());
        morph.tick_at(frame(n as u64));
    }

    assert!(morph.flush_regeneration(WAIT));
    let installed = morph.integrator().targets().shaped_key().cloned();
    assert_eq!(installed.map(|key| key.kind), Some(ShapeKind::Sphere));

    // Frames keep running with the new targets in place
    let out = morph.tick_at(frame(3));
    assert_eq!(out.positions.len(), 6000);
    assert_eq!(out.stats.regenerations, 3);
}

#[test]
fn test_frames_never_wait_for_the_worker() {
    let settings = settings(15_000, true);
    let signal = LatestSlot::new(HandSignal::tracked(0.5, Vec2::ZERO, 0.0, 1.0));
    let config = LatestSlot::new(settings.scene.clone());
    let mut morph = MorphLoop::with_seed(
        &settings,
        signal.reader(),
        config.reader(),
        RecordingOverlay::default(),
        ShapeSeed::new(14),
    )
    .unwrap();

    let mut scene = settings.scene.clone();
    scene.shape = ShapeKind::Text;
    scene.text = "HELLO WORLD".to_owned();
    config.publish(scene);

    // The old targets stay in use until the new set arrives
    let out = morph.tick_at(frame(0));
    assert_eq!(out.positions.len(), 45_000);
    assert!(out.positions.iter().all(|v| v.is_finite()));

    assert!(morph.flush_regeneration(WAIT));
    assert!(!morph.integrator().needs_targets());
}

#[test]
fn test_synthetic_hand_drives_the_loop() {
    let settings = settings(1000, false);
    let estimator = SignalEstimator::new(settings.tracker);
    let hand = SyntheticHand::default();
    let signal = LatestSlot::new(HandSignal::ABSENT);
    let config = LatestSlot::new(SceneConfig {
        shape: ShapeKind::Sphere,
        ..settings.scene.clone()
    });
    let mut morph = MorphLoop::with_seed(
        &settings,
        signal.reader(),
        config.reader(),
        RecordingOverlay::default(),
        ShapeSeed::new(15),
    )
    .unwrap();

    for n in 0..240 {
        let time = frame(n);
        let landmarks = hand.landmarks_at(time.elapsed, estimator.settings());
        signal.publish(estimator.estimate(landmarks.as_ref()));
        let out = morph.tick_at(time);
        assert!(out.positions.iter().all(|v| v.is_finite()));
    }

    assert_eq!(morph.stats().frames_recorded, 240);
    assert!(morph.overlay().states.iter().any(|s| s.visible));
}
