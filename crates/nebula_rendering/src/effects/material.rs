//! Point Material
//!
//! Parameters the renderer needs to draw the cloud, passed through from the
//! scene configuration every frame.
//!
//! ## Blending
//!
//! The cloud is drawn with **ADDITIVE BLENDING** (ONE + ONE):
//! - No sorting required (A + B = B + A)
//! - Dense regions glow brighter
//! - Depth is read, never written, so particles never occlude each other
//!
//! ```text
//! color_blend:
//!   src_factor: ONE
//!   dst_factor: ONE
//!   operation: ADD
//! ```

use nebula_shared::{ColorRgb, SceneConfig};

/// Opacity of every particle.
pub const DEFAULT_OPACITY: f32 = 0.8;

/// Edge length of the sprite texture.
pub const SPRITE_SIZE: usize = 64;

/// Radius of the sprite's soft disc.
pub const SPRITE_RADIUS: f32 = 28.0;

/// Alpha stops of the sprite's radial gradient, as `(offset, alpha)`.
const SPRITE_STOPS: [(f32, f32); 4] = [(0.0, 1.0), (0.4, 0.9), (0.7, 0.4), (1.0, 0.0)];

/// Blend factor (mirrors WGPU)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    /// 1
    One,
}

/// Blend operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendOp {
    /// src + dst
    Add,
}

/// Complete blend state configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendStateConfig {
    /// Source factor for color
    pub color_src: BlendFactor,
    /// Destination factor for color
    pub color_dst: BlendFactor,
    /// Operation for color
    pub color_op: BlendOp,
    /// Source factor for alpha
    pub alpha_src: BlendFactor,
    /// Destination factor for alpha
    pub alpha_dst: BlendFactor,
    /// Operation for alpha
    pub alpha_op: BlendOp,
}

impl BlendStateConfig {
    /// Additive blending (ONE + ONE) - no sorting, dense regions glow.
    pub const ADDITIVE: Self = Self {
        color_src: BlendFactor::One,
        color_dst: BlendFactor::One,
        color_op: BlendOp::Add,
        alpha_src: BlendFactor::One,
        alpha_dst: BlendFactor::One,
        alpha_op: BlendOp::Add,
    };
}

/// Everything the renderer reads besides the positions and the sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMaterial {
    /// Point size in world units.
    pub size: f32,
    /// Particle color.
    pub color: ColorRgb,
    /// Particle opacity.
    pub opacity: f32,
    /// Blend state, always additive.
    pub blend: BlendStateConfig,
    /// Depth is tested but never written, so particles never occlude each other.
    pub depth_write: bool,
    /// Points shrink with distance.
    pub size_attenuation: bool,
}

impl PointMaterial {
    /// Material for a scene configuration.
    #[must_use]
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            size: config.particle_size,
            color: config.color,
            ..Self::default()
        }
    }
}

impl Default for PointMaterial {
    fn default() -> Self {
        let scene = SceneConfig::default();
        Self {
            size: scene.particle_size,
            color: scene.color,
            opacity: DEFAULT_OPACITY,
            blend: BlendStateConfig::ADDITIVE,
            depth_write: false,
            size_attenuation: true,
        }
    }
}

/// Soft circular sprite, white with a radial alpha falloff.
///
/// Generated once per frame loop; the renderer samples it for every point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteTexture {
    size: usize,
    rgba: Vec<u8>,
}

impl SpriteTexture {
    /// Generates the 64x64 soft disc.
    #[must_use]
    pub fn soft_circle() -> Self {
        let size = SPRITE_SIZE;
        let center = size as f32 / 2.0;
        let mut rgba = Vec::with_capacity(size * size * 4);

        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 + 0.5 - center;
                let dy = y as f32 + 0.5 - center;
                let t = (dx * dx + dy * dy).sqrt() / SPRITE_RADIUS;
                let alpha = gradient_alpha(t);
                rgba.extend_from_slice(&[255, 255, 255, (alpha * 255.0).round() as u8]);
            }
        }

        Self { size, rgba }
    }

    /// Edge length in pixels.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Row-major RGBA8 pixels.
    #[must_use]
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Alpha at `(x, y)`.
    #[must_use]
    pub fn alpha(&self, x: usize, y: usize) -> u8 {
        self.rgba
            .get((y * self.size + x) * 4 + 3)
            .copied()
            .unwrap_or(0)
    }
}

/// Piecewise-linear alpha along the gradient; 0 past the last stop.
fn gradient_alpha(t: f32) -> f32 {
    if t >= 1.0 {
        return 0.0;
    }
    SPRITE_STOPS
        .windows(2)
        .find(|w| t <= w[1].0)
        .map_or(0.0, |w| {
            let ((t0, a0), (t1, a1)) = (w[0], w[1]);
            a0 + (a1 - a0) * (t - t0) / (t1 - t0)
        })
}
