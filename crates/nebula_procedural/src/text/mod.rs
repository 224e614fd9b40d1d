//! # Text Shape
//!
//! TEXT targets are sampled from an offscreen raster of the text:
//!
//! ```text
//! text ──► fit font ──► 512² canvas ──► 2 px grid, brightness > 128
//!                                            │
//!                   world (x, y, jitter z) ◄─┘  sampled with replacement
//! ```
//!
//! The raster is scratch state; nothing survives the call.

mod canvas;
pub mod font;

pub use canvas::{measure, TextCanvas, FONT_UNITS_PER_CELL};

use nebula_shared::Vec3;
use rand::{Rng, RngCore};
use tracing::trace;

use crate::points::PointSet;

/// Edge length of the offscreen canvas in pixels.
pub const CANVAS_SIZE: usize = 512;

/// Font size tried first.
pub const BASE_FONT_SIZE: f32 = 300.0;

/// Horizontal margin kept free when fitting the text.
pub const CANVAS_MARGIN: f32 = 40.0;

/// Sampling grid step in pixels.
pub const SAMPLE_STEP: usize = 2;

/// Pixels brighter than this are foreground.
pub const FOREGROUND_THRESHOLD: u8 = 128;

/// World-space extent covered by the full canvas width.
pub const WORLD_EXTENT: f32 = 40.0;

/// Depth jitter range of text points.
const TEXT_DEPTH: f32 = 2.0;

/// Font size that fits `text` inside the canvas margin.
///
/// Starts at 300 and, if too wide, shrinks proportionally (floored).
#[must_use]
pub fn fit_font_size(text: &str) -> f32 {
    let max_width = CANVAS_SIZE as f32 - CANVAS_MARGIN;
    let width = measure(text, BASE_FONT_SIZE);
    if width > max_width {
        (BASE_FONT_SIZE * max_width / width).floor()
    } else {
        BASE_FONT_SIZE
    }
}

/// Renders `text` onto a fresh canvas at its fitted size.
#[must_use]
pub fn render(text: &str) -> TextCanvas {
    let mut canvas = TextCanvas::new(CANVAS_SIZE);
    canvas.draw_text(text, fit_font_size(text));
    canvas
}

/// Maps a canvas pixel to world XY (Y up), centered on the canvas.
#[inline]
#[must_use]
pub fn pixel_to_world(px: usize, py: usize) -> (f32, f32) {
    let half = CANVAS_SIZE as f32 / 2.0;
    let size = CANVAS_SIZE as f32;
    (
        (px as f32 - half) / size * WORLD_EXTENT,
        -(py as f32 - half) / size * WORLD_EXTENT,
    )
}

/// Samples `count` world positions from the rendered text.
///
/// Each output independently picks a random foreground pixel (with
/// replacement). Returns `None` when the text renders no foreground, so the
/// caller can fall back to another shape.
pub fn rasterize_text(text: &str, count: usize, rng: &mut dyn RngCore) -> Option<PointSet> {
    let canvas = render(text);
    let pixels = canvas.foreground(SAMPLE_STEP, FOREGROUND_THRESHOLD);
    if pixels.is_empty() {
        return None;
    }
    trace!(text, candidates = pixels.len(), "text rasterized");

    Some(PointSet::from_fn(count, |_| {
        let (px, py) = pixels[rng.gen_range(0..pixels.len())];
        let (x, y) = pixel_to_world(px, py);
        Vec3::new(x, y, (rng.gen::<f32>() - 0.5) * TEXT_DEPTH)
    }))
}
