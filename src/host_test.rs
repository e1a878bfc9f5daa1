#![allow(clippy::float_cmp)]

use super::*;
use crate::gesture::GestureState;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn square_core() -> ZoomCore {
    let mut core = ZoomCore::default();
    core.set_viewport(Extent::new(1000.0, 1000.0));
    core.set_child_extent(Extent::new(1000.0, 1000.0));
    core
}

// =============================================================
// TouchKind
// =============================================================

#[test]
fn touch_kind_event_names() {
    let names: Vec<_> = TouchKind::ALL.iter().map(|k| k.event_name()).collect();
    assert_eq!(names, ["touchstart", "touchmove", "touchend", "touchcancel"]);
}

// =============================================================
// Single finger
// =============================================================

#[test]
fn first_touch_starts_stream_without_claiming() {
    let mut core = square_core();
    let mut router = TouchRouter::new();
    let ownership = router.route(&mut core, TouchKind::Start, &[pt(10.0, 10.0)]);
    assert_eq!(ownership, Ownership::Released);
    assert!(core.is_stream_active());
    assert_eq!(router.active(), 1);
}

#[test]
fn tap_is_released_end_to_end() {
    let mut core = square_core();
    let mut router = TouchRouter::new();
    router.route(&mut core, TouchKind::Start, &[pt(10.0, 10.0)]);
    assert_eq!(router.route(&mut core, TouchKind::Move, &[pt(12.0, 11.0)]), Ownership::Released);
    assert_eq!(router.route(&mut core, TouchKind::End, &[]), Ownership::Released);
    assert_eq!(core.state(), GestureState::Idle);
    assert!(!core.is_stream_active());
}

#[test]
fn drag_claims_and_pans() {
    let mut core = square_core();
    let mut router = TouchRouter::new();
    router.route(&mut core, TouchKind::Start, &[pt(0.0, 0.0)]);
    router.route(&mut core, TouchKind::Move, &[pt(0.0, 0.0)]);
    // Scale 1 with equal extents: claimed but pinned.
    assert_eq!(router.route(&mut core, TouchKind::Move, &[pt(40.0, 0.0)]), Ownership::Claimed);
    assert_eq!(core.state(), GestureState::Panning);
    assert_eq!(core.translation(), pt(0.0, 0.0));
}

#[test]
fn cancel_returns_to_idle() {
    let mut core = square_core();
    let mut router = TouchRouter::new();
    router.route(&mut core, TouchKind::Start, &[pt(0.0, 0.0)]);
    router.route(&mut core, TouchKind::Move, &[pt(40.0, 0.0)]);
    assert_eq!(router.route(&mut core, TouchKind::Cancel, &[]), Ownership::Released);
    assert_eq!(core.state(), GestureState::Idle);
    assert_eq!(router.active(), 0);
}

// =============================================================
// Two fingers
// =============================================================

#[test]
fn second_touch_claims_and_scales() {
    let mut core = square_core();
    let mut router = TouchRouter::new();
    router.route(&mut core, TouchKind::Start, &[pt(100.0, 100.0)]);
    let ownership = router.route(&mut core, TouchKind::Start, &[pt(100.0, 100.0), pt(200.0, 100.0)]);
    assert_eq!(ownership, Ownership::Claimed);
    assert_eq!(core.state(), GestureState::Scaling);

    // 100 -> 150 apart: ratio 1.5
    router.route(&mut core, TouchKind::Move, &[pt(100.0, 100.0), pt(250.0, 100.0)]);
    assert!(approx_eq(core.scale(), 1.5));
    // 150 -> 300 apart: ratio 2.0
    router.route(&mut core, TouchKind::Move, &[pt(0.0, 100.0), pt(300.0, 100.0)]);
    assert!(approx_eq(core.scale(), 3.0));
}

#[test]
fn two_fingers_landing_together() {
    let mut core = square_core();
    let mut router = TouchRouter::new();
    let ownership = router.route(&mut core, TouchKind::Start, &[pt(0.0, 0.0), pt(100.0, 0.0)]);
    assert_eq!(ownership, Ownership::Claimed);
    assert_eq!(core.state(), GestureState::Scaling);
    assert!(core.is_stream_active());
    assert_eq!(router.active(), 2);
}

#[test]
fn lifting_second_finger_continues_as_pan() {
    let mut core = square_core();
    let mut router = TouchRouter::new();
    router.route(&mut core, TouchKind::Start, &[pt(100.0, 100.0)]);
    router.route(&mut core, TouchKind::Start, &[pt(100.0, 100.0), pt(200.0, 100.0)]);
    router.route(&mut core, TouchKind::Move, &[pt(0.0, 100.0), pt(300.0, 100.0)]);
    assert!(approx_eq(core.scale(), 3.0));

    let ownership = router.route(&mut core, TouchKind::End, &[pt(300.0, 100.0)]);
    assert_eq!(ownership, Ownership::Claimed);
    assert_eq!(core.state(), GestureState::Panning);

    router.route(&mut core, TouchKind::Move, &[pt(320.0, 90.0)]);
    assert_eq!(core.translation(), pt(20.0, -10.0));
    assert!(approx_eq(core.scale(), 3.0));
}

#[test]
fn zero_distance_baseline_is_skipped() {
    let mut core = square_core();
    let mut router = TouchRouter::new();
    router.route(&mut core, TouchKind::Start, &[pt(50.0, 50.0), pt(50.0, 50.0)]);
    router.route(&mut core, TouchKind::Move, &[pt(0.0, 50.0), pt(100.0, 50.0)]);
    assert_eq!(core.scale(), 1.0);
    router.route(&mut core, TouchKind::Move, &[pt(0.0, 50.0), pt(200.0, 50.0)]);
    assert!(approx_eq(core.scale(), 2.0));
}

#[test]
fn third_finger_rebases_pinch_distance() {
    let mut core = square_core();
    let mut router = TouchRouter::new();
    router.route(&mut core, TouchKind::Start, &[pt(0.0, 0.0), pt(100.0, 0.0)]);
    router.route(&mut core, TouchKind::Start, &[pt(0.0, 0.0), pt(100.0, 0.0), pt(500.0, 500.0)]);
    assert_eq!(router.active(), 3);
    // First finger lifts: remaining pair is 400 apart at (100,0)-(500,0).
    assert_eq!(router.route(&mut core, TouchKind::End, &[pt(100.0, 0.0), pt(500.0, 0.0)]), Ownership::Claimed);
    router.route(&mut core, TouchKind::Move, &[pt(100.0, 0.0), pt(700.0, 0.0)]);
    assert!(approx_eq(core.scale(), 1.5));
}
