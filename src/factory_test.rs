#![allow(clippy::float_cmp)]

use time::macros::datetime;

use super::*;
use crate::textfit::FixedAdvance;

const MEASURE: FixedAdvance = FixedAdvance(0.5);

fn config() -> BoardConfig {
    BoardConfig::default()
}

fn deadline() -> OffsetDateTime {
    datetime!(2025-03-14 09:05 UTC)
}

fn label_of(obj: &BoardObject) -> &Label {
    obj.label().unwrap()
}

// =============================================================
// Creation
// =============================================================

#[test]
fn default_deadline_is_one_day_later() {
    assert_eq!(default_deadline(deadline()), datetime!(2025-03-15 09:05 UTC));
}

#[test]
fn sticker_is_centered_on_click() {
    let s = new_sticker(Point::new(300.0, 400.0), "#ffffcc", &config(), &MEASURE);
    assert_eq!(s.bounds(), Rect::new(200.0, 300.0, 200.0, 200.0));
    let ObjectBody::Sticker(note) = &s.body else {
        panic!("expected sticker");
    };
    assert_eq!(note.fill, "#ffffcc");
}

#[test]
fn empty_sticker_label_uses_max_font() {
    let s = new_sticker(Point::new(0.0, 0.0), "#ffffcc", &config(), &MEASURE);
    let label = label_of(&s);
    assert_eq!(label.text, "");
    assert_eq!(label.font_size, 75);
    // One 90px line centered in 200.
    assert_eq!(label.offset_y, 55.0);
}

#[test]
fn reminder_layout_at_base_size() {
    let r = new_reminder(Point::new(100.0, 100.0), "#ffffcc", deadline(), &config(), &MEASURE);
    assert_eq!(r.bounds(), Rect::new(0.0, 0.0, 200.0, 235.0));
    assert_eq!(r.label_container(), Some(Rect::new(0.0, 35.0, 200.0, 200.0)));
    let ObjectBody::Reminder(rem) = &r.body else {
        panic!("expected reminder");
    };
    assert_eq!(rem.plate_font_size, 14.0);
    assert_eq!(rem.deadline, deadline());
    assert_eq!(rem.remote_id, None);
}

#[test]
fn reminder_default_label_is_fitted() {
    let r = new_reminder(Point::new(0.0, 0.0), "#ffffcc", deadline(), &config(), &MEASURE);
    let label = label_of(&r);
    assert_eq!(label.text, DEFAULT_REMINDER_TEXT);
    // "reminder" is 4px per font unit wide; 180 / 4 = 45.
    assert_eq!(label.font_size, 45);
}

#[test]
fn text_field_height_follows_wrapped_text() {
    let t = new_text_field(Point::new(10.0, 20.0), &config(), &MEASURE);
    assert_eq!((t.x, t.y, t.width), (10.0, 20.0, 200.0));
    // "Editable Text" wraps to two 36px lines, plus 10px padding each side.
    assert_eq!(t.height, 92.0);
    assert_eq!(t.text(), Some(DEFAULT_FIELD_TEXT));
}

// =============================================================
// Refit
// =============================================================

#[test]
fn refit_shrinks_for_long_word() {
    let mut s = new_sticker(Point::new(100.0, 100.0), "#ffffcc", &config(), &MEASURE);
    if let Some(label) = s.label_mut() {
        label.text = "supercalifragilisticexpialidocious".to_owned();
    }
    let fit = refit_label(&mut s, &config(), &MEASURE).unwrap();
    assert_eq!(fit.font_size, 10);
    assert!(fit.fits);
    assert_eq!(label_of(&s).font_size, 10);
}

#[test]
fn refit_ignores_text_fields() {
    let mut t = new_text_field(Point::new(0.0, 0.0), &config(), &MEASURE);
    assert!(refit_label(&mut t, &config(), &MEASURE).is_none());
}

#[test]
fn fit_label_text_does_not_mutate() {
    let s = new_sticker(Point::new(0.0, 0.0), "#ffffcc", &config(), &MEASURE);
    let fit = fit_label_text(&s, "a b c", &config(), &MEASURE).unwrap();
    assert!(fit.fits);
    assert_eq!(label_of(&s).text, "");
}

// =============================================================
// finish_transform
// =============================================================

#[test]
fn sticker_transform_keeps_free_size_with_floor() {
    let mut s = new_sticker(Point::new(100.0, 100.0), "#ffffcc", &config(), &MEASURE);
    let before = s.bounds();
    s.set_bounds(Rect::new(0.0, 0.0, 300.0, 20.0));
    finish_transform(&mut s, before, &config(), &MEASURE);
    assert_eq!(s.bounds(), Rect::new(0.0, 0.0, 300.0, 50.0));
}

#[test]
fn reminder_transform_squares_on_larger_scale() {
    let mut r = new_reminder(Point::new(100.0, 100.0), "#ffffcc", deadline(), &config(), &MEASURE);
    let before = r.bounds();
    r.set_bounds(Rect::new(0.0, 0.0, 400.0, 235.0));
    finish_transform(&mut r, before, &config(), &MEASURE);
    assert_eq!(r.width, 400.0);
    let ObjectBody::Reminder(rem) = &r.body else {
        panic!("expected reminder");
    };
    assert_eq!(rem.plate_height, 60.0);
    assert_eq!(rem.plate_gap, 10.0);
    assert_eq!(rem.plate_font_size, 28.0);
    assert_eq!(r.height, 470.0);
}

#[test]
fn reminder_transform_has_floor() {
    let mut r = new_reminder(Point::new(100.0, 100.0), "#ffffcc", deadline(), &config(), &MEASURE);
    let before = r.bounds();
    r.set_bounds(Rect::new(0.0, 0.0, 20.0, 20.0));
    finish_transform(&mut r, before, &config(), &MEASURE);
    assert_eq!(r.width, MIN_REMINDER_SIZE);
}

#[test]
fn text_transform_keeps_width_and_regrows_height() {
    let mut t = new_text_field(Point::new(0.0, 0.0), &config(), &MEASURE);
    let before = t.bounds();
    t.set_bounds(Rect::new(0.0, 0.0, 400.0, before.height));
    finish_transform(&mut t, before, &config(), &MEASURE);
    assert_eq!(t.width, 400.0);
    // Fits on one 36px line now.
    assert_eq!(t.height, 56.0);

    t.set_bounds(Rect::new(0.0, 0.0, 5.0, t.height));
    finish_transform(&mut t, before, &config(), &MEASURE);
    assert_eq!(t.width, MIN_TEXT_WIDTH);
}
