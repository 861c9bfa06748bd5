#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// =============================================================
// Point / Rect
// =============================================================

#[test]
fn point_distance_is_euclidean() {
    assert!(approx_eq(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0));
}

#[test]
fn rect_edges() {
    let r = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(r.right(), 40.0);
    assert_eq!(r.bottom(), 60.0);
}

#[test]
fn rect_contains_is_inclusive() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains(Point::new(0.0, 0.0)));
    assert!(r.contains(Point::new(10.0, 10.0)));
    assert!(!r.contains(Point::new(10.1, 5.0)));
}

#[test]
fn rect_union_covers_both() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(20.0, -5.0, 5.0, 5.0);
    assert_eq!(a.union(&b), Rect::new(0.0, -5.0, 25.0, 15.0));
}

// =============================================================
// Conversions
// =============================================================

#[test]
fn camera_default_is_identity() {
    let cam = Camera::default();
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
    assert_eq!(cam.zoom, 1.0);
}

#[test]
fn screen_to_world_with_pan_and_zoom() {
    let cam = Camera { pan_x: 20.0, pan_y: 10.0, zoom: 2.0 };
    let world = cam.screen_to_world(Point::new(20.0, 10.0));
    assert!(point_approx_eq(world, Point::new(0.0, 0.0)));
}

#[test]
fn world_to_screen_with_pan_and_zoom() {
    let cam = Camera { pan_x: 20.0, pan_y: 10.0, zoom: 3.0 };
    let screen = cam.world_to_screen(Point::new(5.0, 5.0));
    assert!(point_approx_eq(screen, Point::new(35.0, 25.0)));
}

#[test]
fn conversions_are_inverse() {
    let cam = Camera { pan_x: 13.7, pan_y: -42.3, zoom: 0.75 };
    let world = Point::new(333.3, -999.9);
    assert!(point_approx_eq(cam.screen_to_world(cam.world_to_screen(world)), world));
}

#[test]
fn world_rect_to_screen_scales_size() {
    let cam = Camera { pan_x: 5.0, pan_y: 5.0, zoom: 2.0 };
    let r = cam.world_rect_to_screen(Rect::new(10.0, 10.0, 50.0, 25.0));
    assert_eq!(r, Rect::new(25.0, 25.0, 100.0, 50.0));
}

#[test]
fn screen_dist_to_world_ignores_pan() {
    let cam = Camera { pan_x: 999.0, pan_y: -999.0, zoom: 4.0 };
    assert!(approx_eq(cam.screen_dist_to_world(8.0), 2.0));
}

// =============================================================
// Pan
// =============================================================

#[test]
fn pan_by_adds_raw_pixels() {
    let mut cam = Camera { pan_x: 10.0, pan_y: 10.0, zoom: 3.0 };
    cam.pan_by(5.0, -7.0);
    assert_eq!(cam.pan_x, 15.0);
    assert_eq!(cam.pan_y, 3.0);
    assert_eq!(cam.zoom, 3.0);
}

// =============================================================
// Zoom
// =============================================================

#[test]
fn zoom_in_multiplies_by_step() {
    let mut cam = Camera::default();
    assert!(cam.zoom_at(Point::new(0.0, 0.0), true, 1.1, 0.05, 8.0));
    assert!(approx_eq(cam.zoom, 1.1));
}

#[test]
fn zoom_out_divides_by_step() {
    let mut cam = Camera::default();
    assert!(cam.zoom_at(Point::new(0.0, 0.0), false, 1.1, 0.05, 8.0));
    assert!(approx_eq(cam.zoom, 1.0 / 1.1));
}

#[test]
fn zoom_keeps_pivot_world_point_under_cursor() {
    let mut cam = Camera { pan_x: -120.0, pan_y: 45.0, zoom: 1.7 };
    let pivot = Point::new(412.0, 233.0);
    let before = cam.screen_to_world(pivot);
    for zoom_in in [true, true, false, true, false, false, false] {
        cam.zoom_at(pivot, zoom_in, 1.1, 0.05, 8.0);
        let after = cam.screen_to_world(pivot);
        assert!((before.x - after.x).abs() < 1e-6);
        assert!((before.y - after.y).abs() < 1e-6);
    }
}

#[test]
fn zoom_clamps_to_max() {
    let mut cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 7.9 };
    assert!(cam.zoom_at(Point::new(0.0, 0.0), true, 1.1, 0.05, 8.0));
    assert_eq!(cam.zoom, 8.0);
    assert!(!cam.zoom_at(Point::new(0.0, 0.0), true, 1.1, 0.05, 8.0));
    assert_eq!(cam.zoom, 8.0);
}

#[test]
fn zoom_clamps_to_min() {
    let mut cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 0.05 };
    assert!(!cam.zoom_at(Point::new(30.0, 30.0), false, 1.1, 0.05, 8.0));
    assert_eq!(cam.zoom, 0.05);
    assert_eq!(cam.pan_x, 0.0);
}

// =============================================================
// Visible rect
// =============================================================

#[test]
fn visible_world_rect_accounts_for_pan_and_zoom() {
    let cam = Camera { pan_x: 100.0, pan_y: 50.0, zoom: 2.0 };
    let r = cam.visible_world_rect(800.0, 600.0);
    assert!(approx_eq(r.x, -50.0));
    assert!(approx_eq(r.y, -25.0));
    assert!(approx_eq(r.width, 400.0));
    assert!(approx_eq(r.height, 300.0));
}
