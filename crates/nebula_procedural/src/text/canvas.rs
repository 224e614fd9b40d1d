//! Offscreen grayscale canvas with anti-aliased glyph rendering.

use super::font::{self, ADVANCE_COLS, GLYPH_COLS, GLYPH_ROWS};

/// Font size units per glyph cell (a 300 px font has 30 px cells).
pub const FONT_UNITS_PER_CELL: f32 = 10.0;

/// Square grayscale raster, black background, white ink.
#[derive(Clone, Debug)]
pub struct TextCanvas {
    size: usize,
    pixels: Vec<u8>,
}

impl TextCanvas {
    /// Creates a black `size x size` canvas.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            pixels: vec![0; size * size],
        }
    }

    /// Edge length in pixels.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Brightness at `(x, y)`; 0 outside the canvas.
    #[inline]
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        if x < self.size && y < self.size {
            self.pixels[y * self.size + x]
        } else {
            0
        }
    }

    /// Adds white ink over the rectangle `[x0, x1) x [y0, y1)`.
    ///
    /// Edge pixels receive ink in proportion to the area covered, so
    /// abutting rectangles sum to full brightness along their shared edge.
    pub fn fill_rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
        let limit = self.size as f32;
        let (x0, x1) = (x0.max(0.0), x1.min(limit));
        let (y0, y1) = (y0.max(0.0), y1.min(limit));
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for py in (y0.floor() as usize)..(y1.ceil() as usize) {
            let cover_y = overlap(py as f32, y0, y1);
            for px in (x0.floor() as usize)..(x1.ceil() as usize) {
                let coverage = cover_y * overlap(px as f32, x0, x1);
                let ink = (coverage * 255.0).round() as u8;
                let cell = &mut self.pixels[py * self.size + px];
                *cell = cell.saturating_add(ink);
            }
        }
    }

    /// Draws `text` centered both ways at `font_size`.
    pub fn draw_text(&mut self, text: &str, font_size: f32) {
        let cell = font_size / FONT_UNITS_PER_CELL;
        let center = self.size as f32 / 2.0;
        let mut x = center - measure(text, font_size) / 2.0;
        let top = center - GLYPH_ROWS as f32 * cell / 2.0;

        for ch in text.chars() {
            if let Some(glyph) = font::glyph(ch) {
                for row in 0..GLYPH_ROWS {
                    for col in 0..GLYPH_COLS {
                        if font::is_set(&glyph, col, row) {
                            let gx = x + col as f32 * cell;
                            let gy = top + row as f32 * cell;
                            self.fill_rect(gx, gy, gx + cell, gy + cell);
                        }
                    }
                }
            }
            x += ADVANCE_COLS as f32 * cell;
        }
    }

    /// Pixel coordinates on a `step` grid whose brightness exceeds
    /// `threshold`, in row-major order.
    #[must_use]
    pub fn foreground(&self, step: usize, threshold: u8) -> Vec<(usize, usize)> {
        let step = step.max(1);
        let mut out = Vec::new();
        for y in (0..self.size).step_by(step) {
            for x in (0..self.size).step_by(step) {
                if self.pixels[y * self.size + x] > threshold {
                    out.push((x, y));
                }
            }
        }
        out
    }
}

/// Rendered width of `text` at `font_size`, in pixels.
///
/// Every character advances by one glyph plus a one-cell gap; the trailing
/// gap is not counted.
#[must_use]
pub fn measure(text: &str, font_size: f32) -> f32 {
    let chars = text.chars().count();
    if chars == 0 {
        return 0.0;
    }
    let cell = font_size / FONT_UNITS_PER_CELL;
    (chars * ADVANCE_COLS - 1) as f32 * cell
}

/// Length of `[p, p + 1)` inside `[lo, hi)`.
#[inline]
fn overlap(p: f32, lo: f32, hi: f32) -> f32 {
    ((p + 1.0).min(hi) - p.max(lo)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_rect_is_solid() {
        let mut canvas = TextCanvas::new(8);
        canvas.fill_rect(2.0, 2.0, 4.0, 4.0);
        assert_eq!(canvas.pixel(2, 2), 255);
        assert_eq!(canvas.pixel(3, 3), 255);
        assert_eq!(canvas.pixel(4, 4), 0);
    }

    #[test]
    fn test_partial_coverage_is_antialiased() {
        let mut canvas = TextCanvas::new(8);
        canvas.fill_rect(1.5, 0.0, 3.0, 1.0);
        assert_eq!(canvas.pixel(1, 0), 128);
        assert_eq!(canvas.pixel(2, 0), 255);
    }

    #[test]
    fn test_abutting_rects_sum_to_full() {
        let mut canvas = TextCanvas::new(8);
        canvas.fill_rect(0.0, 0.0, 1.5, 1.0);
        canvas.fill_rect(1.5, 0.0, 3.0, 1.0);
        assert_eq!(canvas.pixel(1, 0), 255);
    }

    #[test]
    fn test_measure() {
        assert_eq!(measure("", 300.0), 0.0);
        assert_eq!(measure("A", 300.0), 150.0);
        assert_eq!(measure("AB", 300.0), 330.0);
    }

    #[test]
    fn test_draw_text_is_centered() {
        let mut canvas = TextCanvas::new(64);
        canvas.draw_text("I", 40.0);
        let fg = canvas.foreground(1, 128);
        assert!(!fg.is_empty());

        let mean_x = fg.iter().map(|&(x, _)| x as f32).sum::<f32>() / fg.len() as f32;
        let mean_y = fg.iter().map(|&(_, y)| y as f32).sum::<f32>() / fg.len() as f32;
        assert!((mean_x - 31.5).abs() < 2.0, "mean_x = {mean_x}");
        assert!((mean_y - 31.5).abs() < 4.0, "mean_y = {mean_y}");
    }

    #[test]
    fn test_clipped_rect_is_ignored() {
        let mut canvas = TextCanvas::new(4);
        canvas.fill_rect(-5.0, -5.0, -1.0, -1.0);
        canvas.fill_rect(10.0, 10.0, 12.0, 12.0);
        assert!(canvas.foreground(1, 0).is_empty());
    }
}
