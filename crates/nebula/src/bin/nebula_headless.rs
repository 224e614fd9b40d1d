//! # NEBULA Headless Driver
//!
//! Runs the whole pipeline without a window: a synthetic hand on its own
//! thread feeds the signal slot, shapes are cycled through the config
//! slot, and the frame loop runs at the target rate.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=debug nebula_headless settings.toml --frames 600 --color "#ff66cc"
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use nebula::core::{LatestSlot, SlotWriter};
use nebula::rendering::NullOverlay;
use nebula::shared::{ColorRgb, HandSignal, SceneConfig, ShapeKind};
use nebula::{MorphLoop, NebulaResult, SettingsError, Settings, SignalEstimator, SyntheticHand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Detection rate of the synthetic tracker.
const TRACKER_HZ: u64 = 30;

/// Frames between shape changes.
const FRAMES_PER_SHAPE: u64 = 180;

/// Command line options.
struct Options {
    settings: Option<PathBuf>,
    frames: u64,
    color: Option<String>,
}

impl Options {
    fn parse() -> Option<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut options = Self {
            settings: None,
            frames: 600,
            color: None,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--frames" | "-n" => {
                    if i + 1 < args.len() {
                        options.frames = args[i + 1].parse().unwrap_or(options.frames);
                        i += 1;
                    }
                }
                "--color" | "-c" => {
                    if i + 1 < args.len() {
                        options.color = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--help" | "-h" => {
                    println!("Usage: nebula_headless [SETTINGS] [OPTIONS]");
                    println!();
                    println!("Options:");
                    println!("  -n, --frames <N>       Frames to run (default: 600)");
                    println!("  -c, --color <#RRGGBB>  Override the particle color");
                    println!("  -h, --help             Show this help");
                    return None;
                }
                path => options.settings = Some(PathBuf::from(path)),
            }
            i += 1;
        }
        Some(options)
    }
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    let Some(options) = Options::parse() else {
        return ExitCode::SUCCESS;
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "headless run failed");
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> NebulaResult<()> {
    let mut settings = match &options.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(color) = &options.color {
        settings.scene.color = ColorRgb::parse(color).map_err(SettingsError::from)?;
    }

    let signal = LatestSlot::new(HandSignal::ABSENT);
    let config = LatestSlot::new(settings.scene.clone());

    let running = Arc::new(AtomicBool::new(true));
    let producer = spawn_tracker(signal.writer(), SignalEstimator::new(settings.tracker), &running);

    let mut morph = MorphLoop::new(&settings, signal.reader(), config.reader(), NullOverlay)?;
    let frame_duration = settings.frame.frame_duration();
    let mut scene = settings.scene.clone();

    info!(
        frames = options.frames,
        fps = settings.frame.target_fps,
        shape = %scene.shape,
        count = scene.particle_count,
        "headless run started"
    );

    for frame in 0..options.frames {
        let started = Instant::now();

        if frame > 0 && frame % FRAMES_PER_SHAPE == 0 {
            cycle_shape(&mut scene);
            config.publish(scene.clone());
        }

        let output = morph.tick();
        if frame % u64::from(settings.frame.target_fps.max(1)) == 0 {
            info!(
                frame,
                particles = output.positions.len() / 3,
                grip_visible = output.indicator.visible,
                step_us = output.stats.step_us,
                "tick"
            );
        }

        if let Some(rest) = frame_duration.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }

    running.store(false, Ordering::Release);
    if producer.join().is_err() {
        error!("tracker thread panicked");
    }

    morph.stats().log_summary();
    info!(discarded = morph.discarded_results(), "headless run finished");
    Ok(())
}

fn cycle_shape(scene: &mut SceneConfig) {
    let index = ShapeKind::ALL
        .iter()
        .position(|&kind| kind == scene.shape)
        .unwrap_or(0);
    scene.shape = ShapeKind::from_index((index + 1) % ShapeKind::ALL.len());
    info!(shape = %scene.shape, "switching shape");
}

fn spawn_tracker(
    writer: SlotWriter<HandSignal>,
    estimator: SignalEstimator,
    running: &Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    let running = Arc::clone(running);
    let hand = SyntheticHand::default();
    let period = Duration::from_millis(1000 / TRACKER_HZ);

    thread::spawn(move || {
        let start = Instant::now();
        while running.load(Ordering::Acquire) {
            let t = start.elapsed().as_secs_f32();
            let landmarks = hand.landmarks_at(t, estimator.settings());
            writer.publish(estimator.estimate(landmarks.as_ref()));
            thread::sleep(period);
        }
    })
}
