//! Document model: board objects, their typed bodies, and the in-memory store.
//!
//! Every object on the board is a [`BoardObject`]: an id, a world-space
//! bounding box, a stacking index and a typed [`ObjectBody`]. Stickers,
//! reminders and text fields live on the object layer; strokes live on the
//! drawing layer, which always renders above it.
//!
//! Objects are addressed only by [`ObjectId`] through [`DocStore`]. The store
//! is also the unit of persistence: [`BoardSnapshot`] is what the host saves
//! and loads.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};
use uuid::Uuid;

use crate::camera::{Camera, Point, Rect};
use crate::error::BoardError;
use crate::stroke::Stroke;

/// Unique identifier for a board object.
pub type ObjectId = Uuid;

/// The kind of a board object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Square sticky note with an auto-fitted label.
    Sticker,
    /// Sticky note with a deadline plate.
    Reminder,
    /// Free text box.
    Text,
    /// Free-hand polyline.
    Stroke,
}

impl ObjectKind {
    /// Lowercase name used in logs and errors.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sticker => "sticker",
            Self::Reminder => "reminder",
            Self::Text => "text",
            Self::Stroke => "stroke",
        }
    }
}

/// Render layer an object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    /// Stickers, reminders, text fields.
    Objects,
    /// Free-hand strokes.
    Drawing,
}

/// Auto-fitted label inside a sticker or reminder body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Label {
    /// Label text.
    pub text: String,
    /// Font size chosen by the fitter.
    pub font_size: u32,
    /// Top of the label relative to the top of its container.
    pub offset_y: f64,
    /// Hidden while the edit overlay is open.
    #[serde(skip)]
    pub editing: bool,
}

/// Sticker body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub fill: String,
    pub label: Label,
}

/// Reminder body: a sticker with a deadline plate on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub fill: String,
    pub label: Label,
    /// When the reminder is due.
    #[serde(with = "time::serde::rfc3339")]
    pub deadline: OffsetDateTime,
    /// Id assigned by the backend once the reminder is persisted.
    pub remote_id: Option<i64>,
    /// Height of the date plate.
    pub plate_height: f64,
    /// Gap between the plate and the body.
    pub plate_gap: f64,
    /// Font size of the deadline text.
    pub plate_font_size: f64,
}

impl Reminder {
    /// Text shown on the date plate, e.g. `Deadline: 14.03.2025 09:05`,
    /// in the viewer's `offset`.
    #[must_use]
    pub fn deadline_label(&self, offset: UtcOffset) -> String {
        let d = self.deadline.to_offset(offset);
        format!(
            "Deadline: {:02}.{:02}.{} {:02}:{:02}",
            d.day(),
            u8::from(d.month()),
            d.year(),
            d.hour(),
            d.minute()
        )
    }
}

/// Free text box body.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextField {
    pub text: String,
    pub font_size: f64,
    pub fill: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Inner padding on every side.
    pub padding: f64,
    /// Hidden while the edit overlay is open.
    #[serde(skip)]
    pub editing: bool,
}

impl TextField {
    /// CSS font-style prefix (`"bold italic"`, `"bold"`, ... or empty).
    #[must_use]
    pub fn font_style(&self) -> String {
        match (self.italic, self.bold) {
            (true, true) => "italic bold".to_owned(),
            (true, false) => "italic".to_owned(),
            (false, true) => "bold".to_owned(),
            (false, false) => String::new(),
        }
    }
}

/// Kind-specific payload of a board object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ObjectBody {
    Sticker(Note),
    Reminder(Reminder),
    Text(TextField),
    Stroke(Stroke),
}

/// A board object as stored in the document and in snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardObject {
    /// Unique identifier for this object.
    pub id: ObjectId,
    /// Left edge of the bounding box in world coordinates.
    pub x: f64,
    /// Top edge of the bounding box in world coordinates.
    pub y: f64,
    /// Width of the bounding box in world coordinates.
    pub width: f64,
    /// Height of the bounding box in world coordinates.
    pub height: f64,
    /// Stacking order within the layer; lower values are drawn beneath higher values.
    pub z_index: i64,
    /// Kind-specific payload, flattened next to the geometry.
    #[serde(flatten)]
    pub body: ObjectBody,
}

impl BoardObject {
    /// Wrap a body with a fresh id.
    #[must_use]
    pub fn new(bounds: Rect, body: ObjectBody) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            z_index: 0,
            body,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        match self.body {
            ObjectBody::Sticker(_) => ObjectKind::Sticker,
            ObjectBody::Reminder(_) => ObjectKind::Reminder,
            ObjectBody::Text(_) => ObjectKind::Text,
            ObjectBody::Stroke(_) => ObjectKind::Stroke,
        }
    }

    #[must_use]
    pub fn layer(&self) -> Layer {
        match self.body {
            ObjectBody::Stroke(_) => Layer::Drawing,
            _ => Layer::Objects,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Whether pointer hit-testing may ever pick this object.
    #[must_use]
    pub fn is_hit_testable(&self) -> bool {
        match &self.body {
            ObjectBody::Stroke(stroke) => stroke.mode.is_hit_testable(),
            _ => true,
        }
    }

    /// Whether the edit overlay currently covers this object.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        match &self.body {
            ObjectBody::Sticker(note) => note.label.editing,
            ObjectBody::Reminder(reminder) => reminder.label.editing,
            ObjectBody::Text(field) => field.editing,
            ObjectBody::Stroke(_) => false,
        }
    }

    pub fn set_editing(&mut self, editing: bool) {
        match &mut self.body {
            ObjectBody::Sticker(note) => note.label.editing = editing,
            ObjectBody::Reminder(reminder) => reminder.label.editing = editing,
            ObjectBody::Text(field) => field.editing = editing,
            ObjectBody::Stroke(_) => {}
        }
    }

    /// The auto-fitted label, for stickers and reminders.
    #[must_use]
    pub fn label(&self) -> Option<&Label> {
        match &self.body {
            ObjectBody::Sticker(note) => Some(&note.label),
            ObjectBody::Reminder(reminder) => Some(&reminder.label),
            _ => None,
        }
    }

    pub fn label_mut(&mut self) -> Option<&mut Label> {
        match &mut self.body {
            ObjectBody::Sticker(note) => Some(&mut note.label),
            ObjectBody::Reminder(reminder) => Some(&mut reminder.label),
            _ => None,
        }
    }

    /// Editable text of a sticker, reminder or text field.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            ObjectBody::Sticker(note) => Some(&note.label.text),
            ObjectBody::Reminder(reminder) => Some(&reminder.label.text),
            ObjectBody::Text(field) => Some(&field.text),
            ObjectBody::Stroke(_) => None,
        }
    }

    /// World rectangle the label is fitted into.
    ///
    /// For a sticker that is the whole object; for a reminder it is the
    /// square body below the date plate.
    #[must_use]
    pub fn label_container(&self) -> Option<Rect> {
        match &self.body {
            ObjectBody::Sticker(_) => Some(self.bounds()),
            ObjectBody::Reminder(reminder) => Some(Rect::new(
                self.x,
                self.y + reminder.plate_height + reminder.plate_gap,
                self.width,
                self.width,
            )),
            _ => None,
        }
    }

    /// World rectangle of a reminder's date plate.
    #[must_use]
    pub fn plate_rect(&self) -> Option<Rect> {
        match &self.body {
            ObjectBody::Reminder(reminder) => Some(Rect::new(self.x, self.y, self.width, reminder.plate_height)),
            _ => None,
        }
    }

    /// Move by a world-space delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
        if let ObjectBody::Stroke(stroke) = &mut self.body {
            stroke.translate(dx, dy);
        }
    }

    /// Replace the bounding box. Stroke points are remapped to follow it.
    pub fn set_bounds(&mut self, bounds: Rect) {
        let from = self.bounds();
        if let ObjectBody::Stroke(stroke) = &mut self.body {
            stroke.remap(from, bounds);
        }
        self.x = bounds.x;
        self.y = bounds.y;
        self.width = bounds.width;
        self.height = bounds.height;
    }

    /// Recompute the bounding box of a stroke from its points.
    pub fn refresh_stroke_bounds(&mut self) {
        if let ObjectBody::Stroke(stroke) = &self.body {
            let b = stroke.bounds();
            self.x = b.x;
            self.y = b.y;
            self.width = b.width;
            self.height = b.height;
        }
    }

    /// Whether `pt` lies on the date plate of a reminder.
    #[must_use]
    pub fn plate_contains(&self, pt: Point) -> bool {
        self.plate_rect().is_some_and(|r| r.contains(pt))
    }
}

/// Everything the persistence layer stores for a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Objects in draw order.
    pub objects: Vec<BoardObject>,
    /// Camera at the time of the snapshot.
    #[serde(default)]
    pub camera: Camera,
}

impl BoardSnapshot {
    /// Serialize to the JSON document handed to the backend.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, BoardError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a saved board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Json`] for malformed or mistyped documents.
    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// In-memory registry of board objects.
pub struct DocStore {
    objects: HashMap<ObjectId, BoardObject>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { objects: HashMap::new() }
    }

    /// Insert or replace an object. If an object with the same `id` already
    /// exists it is overwritten.
    pub fn insert(&mut self, obj: BoardObject) {
        self.objects.insert(obj.id, obj);
    }

    /// Remove an object by id, returning it if it was present.
    pub fn remove(&mut self, id: &ObjectId) -> Option<BoardObject> {
        self.objects.remove(id)
    }

    /// Return a reference to an object by id.
    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&BoardObject> {
        self.objects.get(id)
    }

    /// Return a mutable reference to an object by id.
    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut BoardObject> {
        self.objects.get_mut(id)
    }

    /// Highest z-index in use on `layer`, or `0` for an empty layer.
    #[must_use]
    pub fn top_z(&self, layer: Layer) -> i64 {
        self.objects
            .values()
            .filter(|o| o.layer() == layer)
            .map(|o| o.z_index)
            .max()
            .unwrap_or(0)
    }

    /// Put an object above everything else on its layer.
    ///
    /// Returns `false` if the object doesn't exist.
    pub fn raise_to_top(&mut self, id: &ObjectId) -> bool {
        let Some(layer) = self.objects.get(id).map(BoardObject::layer) else {
            return false;
        };
        let others_top = self
            .objects
            .values()
            .filter(|o| o.layer() == layer && o.id != *id)
            .map(|o| o.z_index)
            .max();
        if let (Some(top), Some(obj)) = (others_top, self.objects.get_mut(id)) {
            if obj.z_index <= top {
                obj.z_index = top + 1;
            }
        }
        true
    }

    /// Replace all objects with a full snapshot.
    pub fn load_snapshot(&mut self, objects: Vec<BoardObject>) {
        self.objects.clear();
        for obj in objects {
            self.objects.insert(obj.id, obj);
        }
    }

    /// Return all objects in draw order: object layer first, then drawing
    /// layer, each sorted by `(z_index, id)`.
    #[must_use]
    pub fn sorted_objects(&self) -> Vec<&BoardObject> {
        let mut objs: Vec<&BoardObject> = self.objects.values().collect();
        objs.sort_by(|a, b| {
            a.layer()
                .cmp(&b.layer())
                .then_with(|| a.z_index.cmp(&b.z_index))
                .then_with(|| a.id.cmp(&b.id))
        });
        objs
    }

    /// Number of objects currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the store contains no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for DocStore {
    fn default() -> Self {
        Self::new()
    }
}
