//! # Shape Point Functions
//!
//! One pure function per `ShapeKind`. Each maps `(index, count, rng)` to a
//! single target position; `generate` evaluates it for every index.
//!
//! Dispatch is by tag: adding a shape means adding a variant and a function,
//! nothing else.

mod geometric;
mod organic;

pub use geometric::{
    cube, helix, rain, random, sphere, CLOUD_EDGE, CUBE_EDGE, HELIX_HEIGHT, HELIX_RADIUS,
    RAIN_HEIGHT, RAIN_RADIUS, SPHERE_RADIUS,
};
pub use organic::{butterfly, fire, flower, star, tree, STAR_REACH, TREE_HEIGHT, TREE_RADIUS};

use nebula_shared::{ShapeKind, Vec3};
use rand::{Rng, RngCore};
use tracing::{debug, trace};

use crate::points::PointSet;
use crate::seed::{ShapeRng, ShapeSeed};
use crate::text;

/// Per-index point function shared by every procedural shape.
pub type PointFn = fn(index: usize, count: usize, rng: &mut dyn RngCore) -> Vec3;

/// Point function for a procedural shape.
///
/// Returns `None` for `Text`, which is sampled from a raster, not per index.
#[must_use]
pub fn point_fn(kind: ShapeKind) -> Option<PointFn> {
    let f: PointFn = match kind {
        ShapeKind::Random => random,
        ShapeKind::Sphere => sphere,
        ShapeKind::Cube => cube,
        ShapeKind::Helix => helix,
        ShapeKind::Rain => rain,
        ShapeKind::Star => star,
        ShapeKind::Fire => fire,
        ShapeKind::Tree => tree,
        ShapeKind::Flower => flower,
        ShapeKind::Butterfly => butterfly,
        ShapeKind::Text => return None,
    };
    Some(f)
}

/// Generates exactly `count` target positions for `kind`.
///
/// `text` is only read for `ShapeKind::Text`. Text that produces no
/// foreground pixels falls back to the sphere.
pub fn generate(kind: ShapeKind, count: usize, text: &str, rng: &mut dyn RngCore) -> PointSet {
    if count == 0 {
        return PointSet::new();
    }

    let set = match point_fn(kind) {
        Some(f) => PointSet::from_fn(count, |i| f(i, count, rng)),
        None => match text::rasterize_text(text, count, rng) {
            Some(set) => set,
            None => {
                debug!(text, "text has no foreground pixels, falling back to sphere");
                PointSet::from_fn(count, |i| sphere(i, count, rng))
            }
        },
    };

    trace!(shape = %kind, count, "generated point set");
    set
}

/// Seeded shape generator.
///
/// Owns one random stream; successive calls continue the stream.
#[derive(Clone, Debug)]
pub struct ShapeGenerator {
    rng: ShapeRng,
}

impl ShapeGenerator {
    /// Creates a generator from a seed.
    #[must_use]
    pub fn new(seed: ShapeSeed) -> Self {
        Self { rng: seed.rng() }
    }

    /// Creates a generator seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(ShapeSeed::from_entropy())
    }

    /// Generates exactly `count` points for `kind`.
    pub fn generate(&mut self, kind: ShapeKind, count: usize, text: &str) -> PointSet {
        generate(kind, count, text, &mut self.rng)
    }
}

impl Default for ShapeGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Uniform draw in `[0, 1)`.
#[inline]
pub(crate) fn unit(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// `i / count` as a float. Callers guarantee `count > 0`.
#[inline]
pub(crate) fn progress(index: usize, count: usize) -> f32 {
    index as f32 / count as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_exact_length() {
        let mut generator = ShapeGenerator::new(ShapeSeed::new(7));
        for kind in ShapeKind::ALL {
            for count in [1, 2, 17, 1000] {
                let set = generator.generate(kind, count, "HI");
                assert_eq!(set.len(), count, "{kind} with count {count}");
            }
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut generator = ShapeGenerator::new(ShapeSeed::new(7));
        for kind in ShapeKind::ALL {
            assert!(generator.generate(kind, 0, "MAGIC").is_empty());
        }
    }

    #[test]
    fn test_only_text_lacks_point_fn() {
        for kind in ShapeKind::ALL {
            assert_eq!(point_fn(kind).is_none(), kind == ShapeKind::Text);
        }
    }

    #[test]
    fn test_same_seed_reproduces_set() {
        let a = ShapeGenerator::new(ShapeSeed::new(3)).generate(ShapeKind::Fire, 256, "");
        let b = ShapeGenerator::new(ShapeSeed::new(3)).generate(ShapeKind::Fire, 256, "");
        assert_eq!(a, b);
    }

    #[test]
    fn test_blank_text_falls_back_to_sphere() {
        let mut rng = ShapeSeed::new(1).rng();
        let set = generate(ShapeKind::Text, 500, "   ", &mut rng);
        assert_eq!(set.len(), 500);
        for p in set.iter() {
            assert!((p.length() - geometric::SPHERE_RADIUS).abs() < 1e-3);
        }
    }
}
