//! Selection set, transform handle configuration, and resize math.
//!
//! The selection is an ordered list of object ids. Order is insertion order,
//! so the first-selected object stays first when the set grows.
//!
//! One handle widget serves the whole set. Its anchors and aspect lock depend
//! on what is selected: a lone text field resizes by width only, and a set
//! containing a sticker resizes freely. Everything else keeps its ratio.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::camera::{Point, Rect};
use crate::consts::MIN_TRANSFORM_EXTENT;
use crate::doc::{DocStore, ObjectId, ObjectKind};
use crate::hit::ResizeAnchor;

/// Ordered set of selected object ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ObjectId>,
}

impl Selection {
    #[must_use]
    pub fn ids(&self) -> &[ObjectId] {
        &self.ids
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.ids.contains(id)
    }

    /// Replace the set with exactly `id`.
    pub fn select_single(&mut self, id: ObjectId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Add `id` if absent, remove it if present.
    pub fn toggle_in_set(&mut self, id: ObjectId) {
        if let Some(pos) = self.ids.iter().position(|i| *i == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.ids.clear();
    }

    /// Drop `id` from the set. Returns whether it was selected.
    pub fn remove(&mut self, id: &ObjectId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|i| i != id);
        self.ids.len() != before
    }

    /// Drop ids that no longer exist in `doc`.
    pub fn retain_existing(&mut self, doc: &DocStore) {
        self.ids.retain(|id| doc.get(id).is_some());
    }
}

/// Anchors and aspect lock of the transform handle widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleConfig {
    pub anchors: &'static [ResizeAnchor],
    pub keep_ratio: bool,
}

/// The lone selected text field, if the selection is exactly one.
#[must_use]
pub fn single_text(sel: &Selection, doc: &DocStore) -> Option<ObjectId> {
    match sel.ids() {
        [id] => doc.get(id).filter(|o| o.kind() == ObjectKind::Text).map(|o| o.id),
        _ => None,
    }
}

/// Handle configuration for the current selection, or `None` when empty.
#[must_use]
pub fn handle_config(sel: &Selection, doc: &DocStore) -> Option<HandleConfig> {
    if sel.is_empty() {
        return None;
    }
    if single_text(sel, doc).is_some() {
        return Some(HandleConfig { anchors: &ResizeAnchor::SIDES, keep_ratio: false });
    }
    let has_sticker = sel
        .ids()
        .iter()
        .filter_map(|id| doc.get(id))
        .any(|o| o.kind() == ObjectKind::Sticker);
    Some(HandleConfig { anchors: &ResizeAnchor::CORNERS, keep_ratio: !has_sticker })
}

/// Union of the bounding boxes of every selected object still in `doc`.
#[must_use]
pub fn selection_bounds(sel: &Selection, doc: &DocStore) -> Option<Rect> {
    sel.ids()
        .iter()
        .filter_map(|id| doc.get(id))
        .map(crate::doc::BoardObject::bounds)
        .reduce(|acc, b| acc.union(&b))
}

/// New bounding box when `anchor` of `orig` is dragged to `pointer`.
///
/// The edges opposite the anchor stay put. With `keep_ratio` both axes scale
/// by the larger factor. Neither extent drops below [`MIN_TRANSFORM_EXTENT`],
/// so the box never flips.
#[must_use]
pub fn resize_bounds(orig: Rect, anchor: ResizeAnchor, pointer: Point, keep_ratio: bool) -> Rect {
    let dx = anchor.dx_sign();
    let dy = anchor.dy_sign();

    let mut w = match dx {
        -1 => orig.right() - pointer.x,
        1 => pointer.x - orig.x,
        _ => orig.width,
    }
    .max(MIN_TRANSFORM_EXTENT);
    let mut h = match dy {
        -1 => orig.bottom() - pointer.y,
        1 => pointer.y - orig.y,
        _ => orig.height,
    }
    .max(MIN_TRANSFORM_EXTENT);

    if keep_ratio && orig.width > 0.0 && orig.height > 0.0 {
        let sx = w / orig.width;
        let sy = h / orig.height;
        let s = match (dx, dy) {
            (0, _) => sy,
            (_, 0) => sx,
            _ => sx.max(sy),
        };
        w = (orig.width * s).max(MIN_TRANSFORM_EXTENT);
        h = (orig.height * s).max(MIN_TRANSFORM_EXTENT);
    }

    let x = if dx == -1 { orig.right() - w } else { orig.x };
    let y = if dy == -1 { orig.bottom() - h } else { orig.y };
    Rect::new(x, y, w, h)
}

/// Map `r` from the `from` frame into the `to` frame.
///
/// Used to carry each selected object along when the group box is resized.
#[must_use]
pub fn map_rect(r: Rect, from: Rect, to: Rect) -> Rect {
    let sx = if from.width > 0.0 { to.width / from.width } else { 1.0 };
    let sy = if from.height > 0.0 { to.height / from.height } else { 1.0 };
    Rect::new(
        to.x + (r.x - from.x) * sx,
        to.y + (r.y - from.y) * sy,
        r.width * sx,
        r.height * sy,
    )
}
