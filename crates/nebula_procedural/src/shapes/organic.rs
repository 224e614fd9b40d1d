//! Organic shapes: star burst, fire, tree, flower and butterfly.
//!
//! All of these are stochastic; only their envelopes are stable.

use std::f32::consts::TAU;

use nebula_shared::Vec3;
use rand::RngCore;

use super::{progress, unit};

/// Farthest a star point can reach from the origin.
pub const STAR_REACH: f32 = 15.0;

/// Base radius of the fire cone.
const FIRE_RADIUS: f32 = 6.0;

/// Height of the fire cone.
const FIRE_HEIGHT: f32 = 25.0;

/// Base radius of the tree cone.
pub const TREE_RADIUS: f32 = 12.0;

/// Height of the tree cone.
pub const TREE_HEIGHT: f32 = 30.0;

/// Petal radius of the flower.
const PETAL_RADIUS: f32 = 12.0;

/// Radial noise added to each petal point.
const PETAL_NOISE: f32 = 2.0;

/// World units per unit of the butterfly curve.
const BUTTERFLY_SCALE: f32 = 5.0;

/// Parameter range of the butterfly curve, in multiples of `π`.
const BUTTERFLY_PERIODS: f32 = 12.0;

/// Depth of the flat shapes (flower, butterfly).
const FLAT_DEPTH: f32 = 2.0;

/// Burst of points, dense near the center.
///
/// Distance is `u³ · 15`, direction uniform on the unit sphere.
pub fn star(_index: usize, _count: usize, rng: &mut dyn RngCore) -> Vec3 {
    let dist = unit(rng).powi(3) * STAR_REACH;
    let theta = unit(rng) * TAU;
    let phi = (2.0 * unit(rng) - 1.0).clamp(-1.0, 1.0).acos();

    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();

    Vec3::new(
        dist * sin_phi * cos_theta,
        dist * sin_phi * sin_theta,
        dist * cos_phi,
    )
}

/// Flame cone; higher indices get a narrower radius.
pub fn fire(index: usize, count: usize, rng: &mut dyn RngCore) -> Vec3 {
    let theta = unit(rng) * TAU;
    let radius = unit(rng) * FIRE_RADIUS * (1.0 - progress(index, count));
    let y = unit(rng) * FIRE_HEIGHT - FIRE_HEIGHT / 2.0;
    let flicker = unit(rng);

    let (sin, cos) = theta.sin_cos();
    Vec3::new((radius + flicker) * cos, y, (radius + flicker) * sin)
}

/// Cone narrowing upward: radius `(1 - h) · 12` at height `h · 30 - 15`.
pub fn tree(_index: usize, _count: usize, rng: &mut dyn RngCore) -> Vec3 {
    let h = unit(rng);
    let radius = (1.0 - h) * TREE_RADIUS;
    let theta = unit(rng) * TAU;

    let (sin, cos) = theta.sin_cos();
    Vec3::new(radius * cos, h * TREE_HEIGHT - TREE_HEIGHT / 2.0, radius * sin)
}

/// Polar rose `r = 12·|cos 4θ|` (`k = 4`) in the XY plane, with radial noise.
pub fn flower(_index: usize, _count: usize, rng: &mut dyn RngCore) -> Vec3 {
    let theta = unit(rng) * TAU;
    let r = PETAL_RADIUS * (4.0 * theta).cos().abs() + PETAL_NOISE * unit(rng);

    let (sin, cos) = theta.sin_cos();
    Vec3::new(r * cos, r * sin, (unit(rng) - 0.5) * FLAT_DEPTH)
}

/// Temple Fay's butterfly curve, scaled by 5, in the XY plane.
pub fn butterfly(_index: usize, _count: usize, rng: &mut dyn RngCore) -> Vec3 {
    let t = unit(rng) * BUTTERFLY_PERIODS * std::f32::consts::PI;
    let r = t.cos().exp() - 2.0 * (4.0 * t).cos() - (t / 12.0).sin().powi(5);

    let (sin, cos) = t.sin_cos();
    Vec3::new(
        r * cos * BUTTERFLY_SCALE,
        r * sin * BUTTERFLY_SCALE,
        (unit(rng) - 0.5) * FLAT_DEPTH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::ShapeSeed;

    const SAMPLES: usize = 4000;

    #[test]
    fn test_star_within_reach() {
        let mut rng = ShapeSeed::new(11).rng();
        for i in 0..SAMPLES {
            assert!(star(i, SAMPLES, &mut rng).length() <= STAR_REACH + 1e-3);
        }
    }

    #[test]
    fn test_star_is_dense_near_center() {
        let mut rng = ShapeSeed::new(11).rng();
        let inner = (0..SAMPLES)
            .filter(|&i| star(i, SAMPLES, &mut rng).length() < STAR_REACH / 2.0)
            .count();
        // P(u³ < 0.5) = 0.5^(1/3) ≈ 0.79
        assert!(inner > SAMPLES * 7 / 10, "inner = {inner}");
    }

    #[test]
    fn test_tree_narrows_upward() {
        let mut rng = ShapeSeed::new(5).rng();
        for i in 0..SAMPLES {
            let p = tree(i, SAMPLES, &mut rng);
            let h = (p.y + TREE_HEIGHT / 2.0) / TREE_HEIGHT;
            let radial = (p.x * p.x + p.z * p.z).sqrt();
            assert!(radial <= (1.0 - h) * TREE_RADIUS + 1e-3);
        }
    }

    #[test]
    fn test_fire_tip_is_narrow() {
        let mut rng = ShapeSeed::new(5).rng();
        let last = fire(SAMPLES - 1, SAMPLES, &mut rng);
        let radial = (last.x * last.x + last.z * last.z).sqrt();
        assert!(radial <= 1.0 + FIRE_RADIUS / SAMPLES as f32 + 1e-3);
    }

    #[test]
    fn test_flower_follows_rose_curve() {
        let mut rng = ShapeSeed::new(8).rng();
        for i in 0..SAMPLES {
            let p = flower(i, SAMPLES, &mut rng);
            let r = (p.x * p.x + p.y * p.y).sqrt();
            if r < 1e-3 {
                continue;
            }
            let rose = PETAL_RADIUS * (4.0 * p.y.atan2(p.x)).cos().abs();
            let noise = r - rose;
            assert!((-1e-3..=PETAL_NOISE + 1e-3).contains(&noise), "noise = {noise}");
        }
    }

    #[test]
    fn test_flat_shapes_are_thin() {
        let mut rng = ShapeSeed::new(2).rng();
        for i in 0..SAMPLES {
            assert!(flower(i, SAMPLES, &mut rng).z.abs() <= FLAT_DEPTH / 2.0);
            let b = butterfly(i, SAMPLES, &mut rng);
            assert!(b.z.abs() <= FLAT_DEPTH / 2.0);
            assert!(b.is_finite());
        }
    }
}
