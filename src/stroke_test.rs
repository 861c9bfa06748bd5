#![allow(clippy::float_cmp)]

use super::*;

fn pen(points: &[(f64, f64)]) -> Stroke {
    let mut stroke = Stroke::begin(Point::new(points[0].0, points[0].1), StrokeMode::Pen, "#ff0000", 4.0, 1.0);
    for &(x, y) in &points[1..] {
        stroke.push(Point::new(x, y));
    }
    stroke
}

// =============================================================
// StrokeMode
// =============================================================

#[test]
fn composite_ops_per_mode() {
    assert_eq!(StrokeMode::Pen.composite_op(), "source-over");
    assert_eq!(StrokeMode::Highlighter.composite_op(), "multiply");
    assert_eq!(StrokeMode::Eraser.composite_op(), "destination-out");
}

#[test]
fn highlighter_is_half_transparent() {
    assert_eq!(StrokeMode::Highlighter.opacity(), 0.5);
    assert_eq!(StrokeMode::Pen.opacity(), 1.0);
    assert_eq!(StrokeMode::Eraser.opacity(), 1.0);
}

#[test]
fn only_eraser_is_not_hit_testable() {
    assert!(StrokeMode::Pen.is_hit_testable());
    assert!(StrokeMode::Highlighter.is_hit_testable());
    assert!(!StrokeMode::Eraser.is_hit_testable());
}

#[test]
fn brush_type_defaults_to_pen() {
    assert_eq!(BrushType::default(), BrushType::Pen);
}

// =============================================================
// Capture
// =============================================================

#[test]
fn begin_starts_with_one_point() {
    let stroke = Stroke::begin(Point::new(3.0, 4.0), StrokeMode::Pen, "#123456", 2.0, 1.0);
    assert_eq!(stroke.points, vec![Point::new(3.0, 4.0)]);
    assert_eq!(stroke.color, "#123456");
}

#[test]
fn width_is_divided_by_zoom() {
    let stroke = Stroke::begin(Point::new(0.0, 0.0), StrokeMode::Pen, "#000", 8.0, 4.0);
    assert_eq!(stroke.width, 2.0);
}

#[test]
fn eraser_ignores_brush_color() {
    let stroke = Stroke::begin(Point::new(0.0, 0.0), StrokeMode::Eraser, "#ff00ff", 20.0, 1.0);
    assert_eq!(stroke.color, "rgba(0,0,0,1)");
}

#[test]
fn push_appends_in_order() {
    let stroke = pen(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
    assert_eq!(stroke.points.len(), 3);
    assert_eq!(stroke.points[2], Point::new(2.0, 0.0));
}

// =============================================================
// Geometry
// =============================================================

#[test]
fn bounds_include_half_width() {
    let stroke = pen(&[(10.0, 10.0), (30.0, 20.0)]);
    assert_eq!(stroke.bounds(), Rect::new(8.0, 8.0, 24.0, 14.0));
}

#[test]
fn distance_to_segment_interior() {
    let stroke = pen(&[(0.0, 0.0), (10.0, 0.0)]);
    assert!((stroke.distance_to(Point::new(5.0, 3.0)) - 3.0).abs() < 1e-12);
}

#[test]
fn distance_to_segment_beyond_endpoint() {
    let stroke = pen(&[(0.0, 0.0), (10.0, 0.0)]);
    assert!((stroke.distance_to(Point::new(13.0, 4.0)) - 5.0).abs() < 1e-12);
}

#[test]
fn distance_to_single_point_stroke() {
    let stroke = pen(&[(1.0, 1.0)]);
    assert!((stroke.distance_to(Point::new(4.0, 5.0)) - 5.0).abs() < 1e-12);
}

#[test]
fn translate_moves_all_points() {
    let mut stroke = pen(&[(0.0, 0.0), (1.0, 2.0)]);
    stroke.translate(10.0, -1.0);
    assert_eq!(stroke.points, vec![Point::new(10.0, -1.0), Point::new(11.0, 1.0)]);
}

#[test]
fn remap_scales_into_target_box() {
    let mut stroke = pen(&[(0.0, 0.0), (10.0, 10.0)]);
    stroke.remap(Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(100.0, 100.0, 20.0, 5.0));
    assert_eq!(stroke.points, vec![Point::new(100.0, 100.0), Point::new(120.0, 105.0)]);
}
