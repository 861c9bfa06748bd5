//! Object factory: default geometry for new stickers, reminders and text
//! fields, and the layout passes that keep their text fitted afterwards.

#[cfg(test)]
#[path = "factory_test.rs"]
mod factory_test;

use time::{Duration, OffsetDateTime};

use crate::camera::{Point, Rect};
use crate::config::BoardConfig;
use crate::consts::{DEFAULT_DEADLINE_OFFSET_SECS, MIN_REMINDER_SIZE, MIN_STICKER_SIZE, MIN_TEXT_WIDTH};
use crate::doc::{BoardObject, Label, Note, ObjectBody, Reminder, TextField};
use crate::textfit::{FontBounds, TextFit, TextMeasure, fit_text, wrapped_height};

/// Label of a freshly placed reminder.
pub const DEFAULT_REMINDER_TEXT: &str = "New reminder";

/// Text of a freshly placed text field.
pub const DEFAULT_FIELD_TEXT: &str = "Editable Text";

/// Ink color of a new text field.
pub const DEFAULT_FIELD_COLOR: &str = "#000000";

/// Deadline given to a reminder created at `now`.
#[must_use]
pub fn default_deadline(now: OffsetDateTime) -> OffsetDateTime {
    now + Duration::seconds(DEFAULT_DEADLINE_OFFSET_SECS)
}

/// A sticker centered on `center` with an empty, fitted label.
#[must_use]
pub fn new_sticker(center: Point, fill: &str, config: &BoardConfig, measure: &dyn TextMeasure) -> BoardObject {
    let size = config.sticker_size;
    let mut obj = BoardObject::new(
        Rect::new(center.x - size / 2.0, center.y - size / 2.0, size, size),
        ObjectBody::Sticker(Note { fill: fill.to_owned(), label: Label::default() }),
    );
    refit_label(&mut obj, config, measure);
    obj
}

/// A reminder whose 200-unit frame is centered on `center`.
#[must_use]
pub fn new_reminder(
    center: Point,
    fill: &str,
    deadline: OffsetDateTime,
    config: &BoardConfig,
    measure: &dyn TextMeasure,
) -> BoardObject {
    let size = config.sticker_size;
    let mut obj = BoardObject::new(
        Rect::new(center.x - size / 2.0, center.y - size / 2.0, size, size),
        ObjectBody::Reminder(Reminder {
            fill: fill.to_owned(),
            label: Label { text: DEFAULT_REMINDER_TEXT.to_owned(), ..Label::default() },
            deadline,
            remote_id: None,
            plate_height: config.plate_height,
            plate_gap: config.plate_margin,
            plate_font_size: config.plate_font_size,
        }),
    );
    layout_reminder(&mut obj, size, config);
    refit_label(&mut obj, config, measure);
    obj
}

/// A text field whose top-left corner sits at `top_left`.
#[must_use]
pub fn new_text_field(top_left: Point, config: &BoardConfig, measure: &dyn TextMeasure) -> BoardObject {
    let mut obj = BoardObject::new(
        Rect::new(top_left.x, top_left.y, config.text_width, 0.0),
        ObjectBody::Text(TextField {
            text: DEFAULT_FIELD_TEXT.to_owned(),
            font_size: config.text_font_size,
            fill: DEFAULT_FIELD_COLOR.to_owned(),
            bold: false,
            italic: false,
            underline: false,
            padding: config.padding,
            editing: false,
        }),
    );
    relayout_text_field(&mut obj, measure);
    obj
}

/// Fit `text` into the label container of a sticker or reminder.
#[must_use]
pub fn fit_label_text(obj: &BoardObject, text: &str, config: &BoardConfig, measure: &dyn TextMeasure) -> Option<TextFit> {
    let container = obj.label_container()?;
    let text = if text.is_empty() { " " } else { text };
    Some(fit_text(
        measure,
        text,
        container.width,
        container.height,
        config.padding,
        FontBounds { min: config.min_font_size, max: config.max_font_size },
    ))
}

/// Refit the label of a sticker or reminder to its current text and container.
///
/// Returns `None` for objects without a label.
pub fn refit_label(obj: &mut BoardObject, config: &BoardConfig, measure: &dyn TextMeasure) -> Option<TextFit> {
    let text = obj.label()?.text.clone();
    let fit = fit_label_text(obj, &text, config, measure)?;
    if let Some(label) = obj.label_mut() {
        label.font_size = fit.font_size;
        label.offset_y = fit.offset_y;
    }
    Some(fit)
}

/// Recompute a text field's height from its wrapped content.
pub fn relayout_text_field(obj: &mut BoardObject, measure: &dyn TextMeasure) {
    let ObjectBody::Text(field) = &obj.body else {
        return;
    };
    let inner = (obj.width - field.padding * 2.0).max(0.0);
    obj.height = wrapped_height(measure, &field.text, inner, field.font_size) + field.padding * 2.0;
}

/// Size a reminder so its body is a `side × side` square, scaling the date
/// plate with it. The top-left corner stays put.
pub fn layout_reminder(obj: &mut BoardObject, side: f64, config: &BoardConfig) {
    let ObjectBody::Reminder(reminder) = &mut obj.body else {
        return;
    };
    let scale = config.reminder_scale(side);
    reminder.plate_height = config.plate_height * scale;
    reminder.plate_gap = config.plate_margin * scale;
    reminder.plate_font_size = config.plate_font_size * scale;
    obj.width = side;
    obj.height = reminder.plate_height + reminder.plate_gap + side;
}

/// Normalize an object after a transform gesture changed its bounds from `before`.
///
/// Stickers keep their new size (at least [`MIN_STICKER_SIZE`]) and refit.
/// Reminders become square on the larger scale factor (at least
/// [`MIN_REMINDER_SIZE`]) and refit. Text fields keep their width (at least
/// [`MIN_TEXT_WIDTH`]) and regrow their height. Strokes are left as mapped.
pub fn finish_transform(obj: &mut BoardObject, before: Rect, config: &BoardConfig, measure: &dyn TextMeasure) {
    match obj.body {
        ObjectBody::Sticker(_) => {
            obj.width = obj.width.max(MIN_STICKER_SIZE);
            obj.height = obj.height.max(MIN_STICKER_SIZE);
            refit_label(obj, config, measure);
        }
        ObjectBody::Reminder(_) => {
            let sx = if before.width > 0.0 { obj.width / before.width } else { 1.0 };
            let sy = if before.height > 0.0 { obj.height / before.height } else { 1.0 };
            let side = (before.width * sx.max(sy)).max(MIN_REMINDER_SIZE);
            layout_reminder(obj, side, config);
            refit_label(obj, config, measure);
        }
        ObjectBody::Text(_) => {
            obj.width = obj.width.max(MIN_TEXT_WIDTH);
            relayout_text_field(obj, measure);
        }
        ObjectBody::Stroke(_) => {}
    }
}
