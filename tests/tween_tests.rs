// Host-side tests for easing and the focus tween.

use glam::Vec3;
use room_viewer::camera::CameraPose;
use room_viewer::tween::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn approx_v(a: Vec3, b: Vec3) -> bool {
    a.distance(b) < 1e-4
}

#[test]
fn ease_hits_endpoints_and_midpoint() {
    assert_eq!(ease_in_out_cubic(0.0), 0.0);
    assert_eq!(ease_in_out_cubic(1.0), 1.0);
    assert!(approx(ease_in_out_cubic(0.5), 0.5));
}

#[test]
fn ease_is_monotonic_and_symmetric() {
    let mut prev = 0.0;
    for i in 1..=100 {
        let t = i as f32 / 100.0;
        let e = ease_in_out_cubic(t);
        assert!(e >= prev, "not monotonic at {t}");
        assert!(approx(e + ease_in_out_cubic(1.0 - t), 1.0));
        prev = e;
    }
}

#[test]
fn focus_from_start_pose_frames_target() {
    let start = CameraPose::default();
    let target = Vec3::new(0.0, 0.5, 0.0);
    let tween = CameraTween::begin(&start, target, 0.0, &TweenParams::default());

    assert_eq!(tween.end.target, target);
    assert_eq!(tween.end.fov_deg, 45.0);
    // standoff along the approach direction, then lifted
    let unlifted = tween.end.position - Vec3::Y * 0.2;
    assert!(approx(unlifted.distance(target), 1.5));
    let approach = (start.position - target).normalize();
    assert!(approx_v((unlifted - target).normalize(), approach));
}

#[test]
fn advance_starts_at_current_pose_and_ends_exactly() {
    let start = CameraPose::default();
    let tween = CameraTween::begin(&start, Vec3::new(1.0, 0.5, -1.0), 100.0, &TweenParams::default());

    let (p0, done0) = tween.advance(100.0);
    assert!(!done0);
    assert!(approx_v(p0.position, start.position));
    assert!(approx(p0.fov_deg, 75.0));

    let (mid, _) = tween.advance(600.0);
    assert!(approx(mid.fov_deg, 60.0));

    let (end, done) = tween.advance(1100.0);
    assert!(done);
    assert_eq!(end, tween.end);
    // Sampling past the end keeps returning the end pose
    assert_eq!(tween.advance(5000.0), (tween.end, true));
}

#[test]
fn advance_is_idempotent_for_same_time() {
    let tween = CameraTween::begin(&CameraPose::default(), Vec3::ZERO, 0.0, &TweenParams::default());
    assert_eq!(tween.advance(321.0), tween.advance(321.0));
}

#[test]
fn degenerate_direction_produces_finite_pose() {
    let target = Vec3::new(0.0, 1.6, 3.0);
    let start = CameraPose {
        position: target,
        ..CameraPose::default()
    };
    let tween = CameraTween::begin(&start, target, 0.0, &TweenParams::default());
    assert!(tween.end.position.is_finite());
    assert!(approx_v(tween.end.position, target + Vec3::new(0.0, 0.2, 1.5)));
    for t in [0.0, 250.0, 500.0, 1000.0] {
        assert!(tween.advance(t).0.position.is_finite());
    }
}

#[test]
fn new_tween_starts_from_interrupted_pose() {
    let params = TweenParams::default();
    let first = CameraTween::begin(&CameraPose::default(), Vec3::new(-2.0, 0.5, 0.0), 0.0, &params);
    let (mid, _) = first.advance(400.0);
    let second = CameraTween::begin(&mid, Vec3::new(2.0, 0.5, 0.0), 400.0, &params);
    assert_eq!(second.start, mid);
    assert_eq!(second.advance(400.0).0.position, mid.position);
    assert_eq!(second.end.target, Vec3::new(2.0, 0.5, 0.0));
}

#[test]
fn zero_duration_finishes_immediately() {
    let params = TweenParams {
        duration_ms: 0.0,
        ..TweenParams::default()
    };
    let tween = CameraTween::begin(&CameraPose::default(), Vec3::ZERO, 10.0, &params);
    assert_eq!(tween.progress(10.0), 1.0);
    assert!(tween.advance(10.0).1);
}
