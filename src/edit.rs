//! The single in-place text edit session.
//!
//! While a label or text field is being edited the host shows an HTML
//! overlay positioned over the object; the canvas hides the object's own
//! text. The session remembers the last text that fitted so overflowing
//! input can be rolled back, and the text from before the session so a
//! reminder edit can be cancelled.

#[cfg(test)]
#[path = "edit_test.rs"]
mod edit_test;

use serde::Serialize;

use crate::camera::Camera;
use crate::config::BoardConfig;
use crate::consts::{FONT_FAMILY, LINE_HEIGHT};
use crate::doc::{BoardObject, ObjectBody, ObjectId, ObjectKind};
use crate::factory::{fit_label_text, refit_label, relayout_text_field};
use crate::textfit::TextMeasure;

/// State of the open edit session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: ObjectId,
    pub kind: ObjectKind,
    /// Most recent input that fitted its container.
    pub last_valid: String,
    /// Text when the session opened.
    pub original: String,
}

impl EditSession {
    /// Open a session on `obj`. Strokes carry no text and return `None`.
    #[must_use]
    pub fn begin(obj: &BoardObject) -> Option<Self> {
        let text = obj.text()?.to_owned();
        Some(Self { id: obj.id, kind: obj.kind(), last_valid: text.clone(), original: text })
    }
}

/// Screen-space placement and styling of the edit overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditOverlay {
    pub id: ObjectId,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub font_px: f64,
    pub font_family: &'static str,
    pub line_height: f64,
    pub padding_px: f64,
    /// Top padding that vertically centers label text.
    pub padding_top_px: f64,
    pub color: String,
    pub text: String,
    /// Labels are centered; text fields are left-aligned with a visible border.
    pub centered: bool,
}

/// Overlay for `obj` under `camera`, or `None` for objects without text.
#[must_use]
pub fn overlay_for(obj: &BoardObject, camera: &Camera, config: &BoardConfig) -> Option<EditOverlay> {
    let z = camera.zoom;
    match &obj.body {
        ObjectBody::Sticker(_) | ObjectBody::Reminder(_) => {
            let label = obj.label()?;
            let container = obj.label_container()?;
            let screen = camera.world_rect_to_screen(container);
            Some(EditOverlay {
                id: obj.id,
                left: screen.x,
                top: screen.y,
                width: screen.width,
                height: screen.height,
                font_px: f64::from(label.font_size) * z,
                font_family: FONT_FAMILY,
                line_height: LINE_HEIGHT,
                padding_px: config.padding * z,
                padding_top_px: label.offset_y.max(0.0) * z,
                color: "#000".to_owned(),
                text: label.text.clone(),
                centered: true,
            })
        }
        ObjectBody::Text(field) => {
            let screen = camera.world_rect_to_screen(obj.bounds());
            Some(EditOverlay {
                id: obj.id,
                left: screen.x,
                top: screen.y,
                width: screen.width,
                height: screen.height,
                font_px: field.font_size * z,
                font_family: FONT_FAMILY,
                line_height: LINE_HEIGHT,
                padding_px: field.padding * z,
                padding_top_px: field.padding * z,
                color: field.fill.clone(),
                text: field.text.clone(),
                centered: false,
            })
        }
        ObjectBody::Stroke(_) => None,
    }
}

/// What the host should do with the overlay after an input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputOutcome {
    /// The text fitted; restyle the overlay.
    Restyle { font_px: f64, padding_top_px: f64 },
    /// The text overflowed; put the overlay back to `text`.
    Revert { text: String },
    /// A text field grew or shrank to `height_px`.
    Resize { height_px: f64 },
}

/// Apply overlay input to the edited object.
///
/// Labels are refitted to the new text; if it no longer fits, the label goes
/// back to the last valid text. Text fields take any input and regrow.
pub fn apply_input(
    session: &mut EditSession,
    obj: &mut BoardObject,
    input: &str,
    camera: &Camera,
    config: &BoardConfig,
    measure: &dyn TextMeasure,
) -> Option<InputOutcome> {
    match obj.body {
        ObjectBody::Sticker(_) | ObjectBody::Reminder(_) => {
            let fit = fit_label_text(obj, input, config, measure)?;
            if fit.fits {
                input.clone_into(&mut session.last_valid);
                let label = obj.label_mut()?;
                input.clone_into(&mut label.text);
                label.font_size = fit.font_size;
                label.offset_y = fit.offset_y;
                Some(InputOutcome::Restyle {
                    font_px: f64::from(fit.font_size) * camera.zoom,
                    padding_top_px: fit.offset_y.max(0.0) * camera.zoom,
                })
            } else {
                let label = obj.label_mut()?;
                session.last_valid.clone_into(&mut label.text);
                refit_label(obj, config, measure);
                Some(InputOutcome::Revert { text: session.last_valid.clone() })
            }
        }
        ObjectBody::Text(ref mut field) => {
            input.clone_into(&mut field.text);
            input.clone_into(&mut session.last_valid);
            obj.width = obj.width.min(config.max_text_width);
            relayout_text_field(obj, measure);
            Some(InputOutcome::Resize { height_px: obj.height * camera.zoom })
        }
        ObjectBody::Stroke(_) => None,
    }
}

/// Close the session, writing the final text back into `obj`.
///
/// With `cancel` the text from before the session is restored instead of the
/// last valid input.
pub fn commit(session: &EditSession, obj: &mut BoardObject, cancel: bool, config: &BoardConfig, measure: &dyn TextMeasure) {
    let text = if cancel { &session.original } else { &session.last_valid };
    match obj.kind() {
        ObjectKind::Sticker | ObjectKind::Reminder => {
            if let Some(label) = obj.label_mut() {
                text.clone_into(&mut label.text);
            }
            refit_label(obj, config, measure);
        }
        ObjectKind::Text => {
            if let ObjectBody::Text(field) = &mut obj.body {
                text.clone_into(&mut field.text);
            }
            relayout_text_field(obj, measure);
        }
        ObjectKind::Stroke => {}
    }
    obj.set_editing(false);
}
