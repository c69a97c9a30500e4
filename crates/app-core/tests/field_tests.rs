// Host-side tests for the wave field update rule.

use app_core::*;
use rand::prelude::*;

fn small_field(resolution: usize) -> WaveField {
    WaveField::new(FieldParams {
        resolution,
        ..FieldParams::default()
    })
    .unwrap()
}

fn assert_border_zero(field: &WaveField) {
    let n = field.resolution();
    for grid in [field.current(), field.previous()] {
        for i in 0..n {
            for (x, y) in [(i, 0), (i, n - 1), (0, i), (n - 1, i)] {
                assert_eq!(grid[y * n + x], 0.0, "border cell ({x},{y}) not zero");
            }
        }
    }
}

#[test]
fn zero_field_stays_zero() {
    let mut field = small_field(32);
    for _ in 0..200 {
        field.step();
    }
    assert!(field.current().iter().all(|&v| v == 0.0));
    assert!(field.previous().iter().all(|&v| v == 0.0));
    assert_eq!(field.steps(), 200);
}

#[test]
fn borders_are_zero_after_every_step() {
    let mut field = small_field(24);
    // Splash right on the edge so deposits land in border cells.
    deposit_disc(&mut field, 0, 5, 1.5, 4, 0.5);
    deposit_disc(&mut field, 23, 23, 1.5, 4, 0.5);
    for _ in 0..50 {
        field.step();
        assert_border_zero(&field);
    }
}

#[test]
fn heights_stay_clamped_after_huge_ripples() {
    let mut field = small_field(64);
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..40 {
        let cx = rng.gen_range(0..64);
        let cy = rng.gen_range(0..64);
        let strength = rng.gen_range(-1.0e6..1.0e6);
        deposit_disc(&mut field, cx, cy, strength, 6, 0.5);
        for _ in 0..3 {
            field.step();
            for &v in field.current().iter().chain(field.previous()) {
                assert!(v.is_finite());
                assert!((-HEIGHT_LIMIT..=HEIGHT_LIMIT).contains(&v), "height {v} escaped clamp");
            }
        }
    }
}

#[test]
fn step_swaps_roles_once() {
    let mut field = small_field(16);
    let idx = field.index(8, 8);
    field.deposit(8, 8, 1.0, glam::Vec2::ZERO);
    assert_eq!(field.previous()[idx], 1.0);
    assert_eq!(field.current()[idx], 0.0);

    field.step();
    // The deposited state moved into the displayed grid; the fresh result
    // took over `previous`.
    assert_eq!(field.current()[idx], 1.0);
    let expected = (1.0 * (1.0 - FIELD_DAMPING)) * (1.0 - FIELD_DISSIPATION * 0.01);
    assert!((field.previous()[idx] - expected).abs() < 1e-6);
    let n = field.resolution();
    let right = field.previous()[idx + 1];
    let expected_right = (0.5 * FIELD_DAMPING) * (1.0 - FIELD_DISSIPATION * 0.01);
    assert!((right - expected_right).abs() < 1e-6);
    assert!((field.previous()[idx + n] - expected_right).abs() < 1e-6);
}

#[test]
fn velocity_decays_each_step() {
    let mut field = small_field(16);
    field.deposit(5, 5, 0.0, glam::Vec2::new(1.0, -2.0));
    field.vorticity_mut()[3] = 4.0;
    field.step();
    let v = field.velocity()[field.index(5, 5)];
    assert!((v.x - (1.0 - MOTION_DECAY)).abs() < 1e-6);
    assert!((v.y + 2.0 * (1.0 - MOTION_DECAY)).abs() < 1e-6);
    assert!((field.vorticity()[3] - 4.0 * (1.0 - VORTICITY_DECAY)).abs() < 1e-6);
}

#[test]
fn velocity_does_not_feed_heights() {
    let mut field = small_field(16);
    field.deposit(7, 7, 0.0, glam::Vec2::new(50.0, 50.0));
    for _ in 0..10 {
        field.step();
    }
    assert!(field.current().iter().all(|&v| v == 0.0));
}

#[test]
fn reset_clears_everything() {
    let mut field = small_field(16);
    deposit_disc(&mut field, 8, 8, 1.0, 3, 1.0);
    field.step();
    field.reset();
    assert!(field.current().iter().all(|&v| v == 0.0));
    assert!(field.previous().iter().all(|&v| v == 0.0));
    assert!(field.velocity().iter().all(|v| *v == glam::Vec2::ZERO));
    assert_eq!(field.steps(), 0);
}

#[test]
fn texture_bytes_cover_whole_grid() {
    let field = small_field(32);
    assert_eq!(field.texture().len(), 32 * 32);
    assert_eq!(field.texture_bytes().len(), 32 * 32 * 4);
}

#[test]
fn tiny_or_unstable_fields_are_rejected() {
    assert!(WaveField::new(FieldParams {
        resolution: 2,
        ..FieldParams::default()
    })
    .is_err());
    assert!(WaveField::new(FieldParams {
        damping: 1.0,
        ..FieldParams::default()
    })
    .is_err());
}
