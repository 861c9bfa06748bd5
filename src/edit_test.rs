#![allow(clippy::float_cmp)]

use super::*;
use crate::camera::Point;
use crate::factory::{new_sticker, new_text_field};
use crate::textfit::FixedAdvance;

const MEASURE: FixedAdvance = FixedAdvance(0.5);

fn config() -> BoardConfig {
    BoardConfig::default()
}

fn sticker() -> BoardObject {
    new_sticker(Point::new(100.0, 100.0), "#ffffcc", &config(), &MEASURE)
}

// =============================================================
// Session
// =============================================================

#[test]
fn begin_records_original_text() {
    let s = sticker();
    let session = EditSession::begin(&s).unwrap();
    assert_eq!(session.id, s.id);
    assert_eq!(session.kind, ObjectKind::Sticker);
    assert_eq!(session.original, "");
    assert_eq!(session.last_valid, "");
}

// =============================================================
// Overlay geometry
// =============================================================

#[test]
fn sticker_overlay_tracks_camera() {
    let s = sticker();
    let cam = Camera { pan_x: 10.0, pan_y: 20.0, zoom: 2.0 };
    let o = overlay_for(&s, &cam, &config()).unwrap();
    assert_eq!((o.left, o.top, o.width, o.height), (10.0, 20.0, 400.0, 400.0));
    assert_eq!(o.font_px, 150.0);
    assert_eq!(o.padding_px, 20.0);
    assert_eq!(o.padding_top_px, 110.0);
    assert!(o.centered);
}

#[test]
fn text_field_overlay_is_left_aligned() {
    let t = new_text_field(Point::new(0.0, 0.0), &config(), &MEASURE);
    let o = overlay_for(&t, &Camera::default(), &config()).unwrap();
    assert!(!o.centered);
    assert_eq!(o.text, "Editable Text");
    assert_eq!(o.font_px, 30.0);
    assert_eq!(o.height, t.height);
}

// =============================================================
// Input
// =============================================================

#[test]
fn fitting_input_becomes_last_valid() {
    let mut s = sticker();
    let mut session = EditSession::begin(&s).unwrap();
    let out = apply_input(&mut session, &mut s, "hello", &Camera::default(), &config(), &MEASURE).unwrap();
    assert!(matches!(out, InputOutcome::Restyle { .. }));
    assert_eq!(session.last_valid, "hello");
    assert_eq!(s.text(), Some("hello"));
}

#[test]
fn overflowing_input_reverts() {
    let mut s = sticker();
    let mut session = EditSession::begin(&s).unwrap();
    apply_input(&mut session, &mut s, "ok", &Camera::default(), &config(), &MEASURE);
    // 400 words at the 8px floor need far more than 180px of height.
    let flood = vec!["word"; 400].join(" ");
    let out = apply_input(&mut session, &mut s, &flood, &Camera::default(), &config(), &MEASURE).unwrap();
    assert_eq!(out, InputOutcome::Revert { text: "ok".to_owned() });
    assert_eq!(s.text(), Some("ok"));
    assert_eq!(session.last_valid, "ok");
}

#[test]
fn text_field_input_regrows() {
    let mut t = new_text_field(Point::new(0.0, 0.0), &config(), &MEASURE);
    let mut session = EditSession::begin(&t).unwrap();
    let out = apply_input(&mut session, &mut t, "hi", &Camera::default(), &config(), &MEASURE).unwrap();
    assert_eq!(out, InputOutcome::Resize { height_px: 56.0 });
    assert_eq!(t.text(), Some("hi"));
}

// =============================================================
// Commit
// =============================================================

#[test]
fn commit_writes_last_valid_and_clears_editing() {
    let mut s = sticker();
    s.set_editing(true);
    let mut session = EditSession::begin(&s).unwrap();
    apply_input(&mut session, &mut s, "done", &Camera::default(), &config(), &MEASURE);
    commit(&session, &mut s, false, &config(), &MEASURE);
    assert_eq!(s.text(), Some("done"));
    assert!(!s.is_editing());
}

#[test]
fn cancel_restores_original() {
    let mut s = sticker();
    if let Some(label) = s.label_mut() {
        label.text = "before".to_owned();
    }
    let mut session = EditSession::begin(&s).unwrap();
    apply_input(&mut session, &mut s, "after", &Camera::default(), &config(), &MEASURE);
    commit(&session, &mut s, true, &config(), &MEASURE);
    assert_eq!(s.text(), Some("before"));
}
