//! Regular shapes: the cloud, the sphere, the cube, the helix and the rain
//! column.

use std::f32::consts::{PI, TAU};

use nebula_shared::Vec3;
use rand::RngCore;

use super::{progress, unit};

/// Radius of the Fibonacci sphere.
pub const SPHERE_RADIUS: f32 = 12.0;

/// Edge length of the cube.
pub const CUBE_EDGE: f32 = 20.0;

/// Edge length of the random cloud.
pub const CLOUD_EDGE: f32 = 40.0;

/// Radius of both helix strands.
pub const HELIX_RADIUS: f32 = 8.0;

/// Height spanned by the helix.
pub const HELIX_HEIGHT: f32 = 30.0;

/// Turns of the helix, in half-turns of `π`.
const HELIX_HALF_TURNS: f32 = 10.0;

/// Radius of the rain column.
pub const RAIN_RADIUS: f32 = 20.0;

/// Height of the rain column.
pub const RAIN_HEIGHT: f32 = 40.0;

/// Uniform cloud in a cube of edge 40.
pub fn random(_index: usize, _count: usize, rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(
        (unit(rng) - 0.5) * CLOUD_EDGE,
        (unit(rng) - 0.5) * CLOUD_EDGE,
        (unit(rng) - 0.5) * CLOUD_EDGE,
    )
}

/// Fibonacci-spiral sphere of radius 12. Deterministic.
pub fn sphere(index: usize, count: usize, _rng: &mut dyn RngCore) -> Vec3 {
    let phi = (-1.0 + 2.0 * progress(index, count)).clamp(-1.0, 1.0).acos();
    let theta = (count as f32 * PI).sqrt() * phi;

    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();

    Vec3::new(
        SPHERE_RADIUS * sin_phi * sin_theta,
        SPHERE_RADIUS * cos_phi,
        SPHERE_RADIUS * sin_phi * cos_theta,
    )
}

/// Uniform fill of a cube with edge 20.
pub fn cube(_index: usize, _count: usize, rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(
        (unit(rng) - 0.5) * CUBE_EDGE,
        (unit(rng) - 0.5) * CUBE_EDGE,
        (unit(rng) - 0.5) * CUBE_EDGE,
    )
}

/// Double helix. Odd indices sit on the strand offset by `π`. Deterministic.
pub fn helix(index: usize, count: usize, _rng: &mut dyn RngCore) -> Vec3 {
    let progress = progress(index, count);
    let t = progress * HELIX_HALF_TURNS * PI;
    let y = (progress - 0.5) * HELIX_HEIGHT;
    let offset = if index % 2 == 0 { 0.0 } else { PI };

    let (sin, cos) = (t + offset).sin_cos();
    Vec3::new(cos * HELIX_RADIUS, y, sin * HELIX_RADIUS)
}

/// Vertical column: uniform radius up to 20, uniform angle and height.
pub fn rain(_index: usize, _count: usize, rng: &mut dyn RngCore) -> Vec3 {
    let r = unit(rng) * RAIN_RADIUS;
    let theta = unit(rng) * TAU;
    let y = (unit(rng) - 0.5) * RAIN_HEIGHT;

    let (sin, cos) = theta.sin_cos();
    Vec3::new(r * cos, y, r * sin)
}
