//! # Shape Contract Tests
//!
//! Every shape, every count: the output length is exact and the envelope
//! of each family holds.

use nebula_procedural::shapes::{
    CLOUD_EDGE, CUBE_EDGE, HELIX_RADIUS, SPHERE_RADIUS, STAR_REACH,
};
use nebula_procedural::text::{pixel_to_world, WORLD_EXTENT};
use nebula_procedural::{generate, ShapeGenerator, ShapeSeed};
use nebula_shared::{ShapeKind, MAX_TEXT_CHARS};

/// Test: output length equals the requested count for every shape.
#[test]
fn test_length_matches_count_for_every_shape() {
    let mut generator = ShapeGenerator::new(ShapeSeed::new(42));

    for kind in ShapeKind::ALL {
        for count in [0, 1, 3, 1_000, 15_000] {
            let set = generator.generate(kind, count, "NEBULA");
            assert_eq!(set.len(), count, "{kind} produced {} for {count}", set.len());
        }
    }
}

/// Test: nothing non-finite escapes any generator.
#[test]
fn test_all_points_finite() {
    let mut generator = ShapeGenerator::new(ShapeSeed::new(42));

    for kind in ShapeKind::ALL {
        let set = generator.generate(kind, 5_000, "Hello!");
        assert!(set.iter().all(|p| p.is_finite()), "{kind} produced a non-finite point");
    }
}

/// Test: sphere points lie on radius 12.
#[test]
fn test_sphere_radius() {
    let set = ShapeGenerator::new(ShapeSeed::new(1)).generate(ShapeKind::Sphere, 8_000, "");

    let worst = set
        .iter()
        .map(|p| (p.length() - SPHERE_RADIUS).abs())
        .fold(0.0f32, f32::max);
    println!("Worst sphere radius error: {worst:e}");
    assert!(worst < 1e-3);
}

/// Test: the sphere is deterministic, independent of the random stream.
#[test]
fn test_sphere_ignores_seed() {
    let a = ShapeGenerator::new(ShapeSeed::new(1)).generate(ShapeKind::Sphere, 500, "");
    let b = ShapeGenerator::new(ShapeSeed::new(2)).generate(ShapeKind::Sphere, 500, "");
    assert_eq!(a, b);
}

/// Test: neighbouring helix indices sit on opposite strands at nearly the same height.
#[test]
fn test_helix_neighbours_are_opposite() {
    let set = ShapeGenerator::new(ShapeSeed::new(1)).generate(ShapeKind::Helix, 20_000, "");

    for i in (0..set.len() - 1).step_by(2) {
        let (even, odd) = (set[i], set[i + 1]);
        let radial = |x: f32, z: f32| (x * x + z * z).sqrt();
        assert!((radial(even.x, even.z) - HELIX_RADIUS).abs() < 1e-3);
        // Sum of the two strands is ~0 in XZ when the phase step is small.
        assert!((even.x + odd.x).abs() < 0.05 && (even.z + odd.z).abs() < 0.05, "i = {i}");
    }
}

/// Test: cube and cloud stay in their boxes.
#[test]
fn test_box_shapes_bounded() {
    let mut generator = ShapeGenerator::new(ShapeSeed::new(3));

    let cube = generator.generate(ShapeKind::Cube, 10_000, "");
    assert!(cube.iter().all(|p| p.max_abs() <= CUBE_EDGE / 2.0));

    let cloud = generator.generate(ShapeKind::Random, 10_000, "");
    assert!(cloud.iter().all(|p| p.max_abs() <= CLOUD_EDGE / 2.0));
}

/// Test: star points never leave the burst radius.
#[test]
fn test_star_bounded() {
    let set = ShapeGenerator::new(ShapeSeed::new(3)).generate(ShapeKind::Star, 10_000, "");
    assert!(set.iter().all(|p| p.length() <= STAR_REACH + 1e-3));
}

/// Test: text fits inside the canvas footprint and stays thin.
#[test]
fn test_text_within_canvas_footprint() {
    let longest: String = "W".repeat(MAX_TEXT_CHARS);
    let set = ShapeGenerator::new(ShapeSeed::new(5)).generate(ShapeKind::Text, 5_000, &longest);

    let half = WORLD_EXTENT / 2.0;
    for p in set.iter() {
        assert!(p.x.abs() <= half && p.y.abs() <= half);
        assert!(p.z.abs() <= 1.0);
    }

    // Margin keeps the widest text off the canvas edges.
    let (edge_x, _) = pixel_to_world(10, 0);
    assert!(set.iter().all(|p| p.x > edge_x));
}

/// Test: blank text falls back to the sphere instead of failing.
#[test]
fn test_blank_text_falls_back_to_sphere() {
    let mut rng = ShapeSeed::new(8).rng();
    for blank in ["", " ", "\t\t"] {
        let set = generate(ShapeKind::Text, 300, blank, &mut rng);
        assert_eq!(set.len(), 300);
        assert!(set.iter().all(|p| (p.length() - SPHERE_RADIUS).abs() < 1e-3));
    }
}
