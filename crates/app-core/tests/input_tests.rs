// Host-side tests for pointer routing.

use app_core::*;

fn router() -> InputRouter {
    InputRouter::new(InputParams::default())
}

fn rect() -> SurfaceRect {
    SurfaceRect::new(10.0, 20.0, 400.0, 300.0)
}

#[test]
fn first_move_only_seeds_position() {
    let mut r = router();
    assert_eq!(r.route(PointerActivity::Move { x: 50.0, y: 50.0 }, &rect(), 100.0), None);
}

#[test]
fn moves_are_throttled() {
    let mut r = router();
    r.route(PointerActivity::Move { x: 50.0, y: 50.0 }, &rect(), 100.0);
    // Within 8 ms of the last check: dropped even with a large move.
    assert_eq!(r.route(PointerActivity::Move { x: 90.0, y: 50.0 }, &rect(), 104.0), None);
    let req = r
        .route(PointerActivity::Move { x: 90.0, y: 50.0 }, &rect(), 110.0)
        .unwrap();
    assert_eq!(req.client_x, 90.0);
    assert!((req.strength - move_strength(40.0)).abs() < 1e-6);
}

#[test]
fn tiny_moves_are_ignored() {
    let mut r = router();
    r.route(PointerActivity::Move { x: 50.0, y: 50.0 }, &rect(), 0.0);
    assert_eq!(r.route(PointerActivity::Move { x: 50.5, y: 50.5 }, &rect(), 20.0), None);
    assert_eq!(r.route(PointerActivity::Move { x: 51.0, y: 50.0 }, &rect(), 40.0), None);
    assert!(r
        .route(PointerActivity::Move { x: 52.0, y: 50.0 }, &rect(), 60.0)
        .is_some());
}

#[test]
fn distance_is_measured_from_last_accepted_position() {
    let mut r = router();
    r.route(PointerActivity::Move { x: 0.0, y: 0.0 }, &rect(), 0.0);
    assert!(r.route(PointerActivity::Move { x: 10.0, y: 0.0 }, &rect(), 10.0).is_some());
    // 0.8 px from the last accepted point: below threshold.
    assert_eq!(r.route(PointerActivity::Move { x: 10.8, y: 0.0 }, &rect(), 20.0), None);
}

#[test]
fn move_strength_caps_both_factors() {
    assert!((move_strength(10.0) - 0.5 * 0.125).abs() < 1e-6);
    assert!((move_strength(40.0) - 1.0 * 0.5).abs() < 1e-6);
    assert!((move_strength(160.0) - 2.0).abs() < 1e-6);
    assert!((move_strength(10_000.0) - MOVE_SPEED_CAP * MOVE_DISTANCE_CAP).abs() < 1e-6);
}

#[test]
fn press_always_injects_fixed_strength() {
    let mut r = router();
    for t in [0.0, 1.0, 2.0] {
        let req = r
            .route(PointerActivity::Press { x: 30.0, y: 40.0 }, &rect(), t)
            .unwrap();
        assert_eq!(req.strength, PRESS_STRENGTH);
        assert_eq!((req.client_x, req.client_y), (30.0, 40.0));
    }
}

#[test]
fn startup_ripple_fires_once_at_center_after_delay() {
    let mut r = router();
    assert_eq!(r.poll_startup(&rect(), 1000.0), None);
    r.arm_startup(0.0);
    assert!(r.startup_pending());
    assert_eq!(r.poll_startup(&rect(), STARTUP_RIPPLE_DELAY_MS - 1.0), None);
    let req = r.poll_startup(&rect(), STARTUP_RIPPLE_DELAY_MS).unwrap();
    assert_eq!((req.client_x, req.client_y), (210.0, 170.0));
    assert_eq!(req.strength, STARTUP_RIPPLE_STRENGTH);
    assert_eq!(r.poll_startup(&rect(), 10_000.0), None);
    r.arm_startup(20_000.0);
    assert_eq!(r.poll_startup(&rect(), 50_000.0), None);
}
