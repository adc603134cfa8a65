use glam::IVec2;

use detroit_anomaly::constants::HIT_TOLERANCE;
use detroit_anomaly::placement::AnomalyRect;

#[test]
fn test_click_on_center_is_a_hit() {
    let rect = AnomalyRect::new(100, 150, 120, 80);
    assert!(rect.hit(rect.center(), HIT_TOLERANCE));
    assert!(rect.contains(rect.center()));
}

#[test]
fn test_click_far_outside_is_a_miss() {
    let rect = AnomalyRect::new(100, 150, 120, 80);
    assert!(!rect.hit(IVec2::new(500, 600), HIT_TOLERANCE));
    assert!(!rect.hit(IVec2::new(0, 0), HIT_TOLERANCE));
}

#[test]
fn test_tolerance_expands_the_edges_inclusively() {
    let rect = AnomalyRect::new(100, 100, 50, 50);
    let tolerance = 12;

    // Exactly on the expanded edge.
    assert!(rect.hit(IVec2::new(100 - tolerance as i32, 125), tolerance));
    assert!(rect.hit(IVec2::new((150 + tolerance) as i32, 125), tolerance));
    assert!(rect.hit(IVec2::new(125, 100 - tolerance as i32), tolerance));
    assert!(rect.hit(IVec2::new(125, (150 + tolerance) as i32), tolerance));

    // One pixel past it.
    assert!(!rect.hit(IVec2::new(100 - tolerance as i32 - 1, 125), tolerance));
    assert!(!rect.hit(IVec2::new((150 + tolerance) as i32 + 1, 125), tolerance));
}

#[test]
fn test_zero_tolerance_matches_strict_containment() {
    let rect = AnomalyRect::new(0, 0, 10, 10);
    assert!(rect.hit(IVec2::new(0, 0), 0));
    assert!(rect.hit(IVec2::new(10, 10), 0));
    assert!(!rect.hit(IVec2::new(11, 10), 0));
    assert!(!rect.hit(IVec2::new(-1, 5), 0));
}

#[test]
fn test_rect_near_the_origin_never_wraps() {
    // Tolerance larger than the coordinate must not underflow.
    let rect = AnomalyRect::new(2, 2, 20, 20);
    assert!(rect.hit(IVec2::new(0, 0), HIT_TOLERANCE));
    assert!(!rect.hit(IVec2::new(-(HIT_TOLERANCE as i32), -(HIT_TOLERANCE as i32) - 3), HIT_TOLERANCE));
}
