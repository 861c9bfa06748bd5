//! Hit testing: which object, or which handle, is under the pointer.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Point, Rect};
use crate::consts::{HANDLE_RADIUS_PX, STROKE_HIT_SLOP_PX};
use crate::doc::{BoardObject, DocStore, Layer, ObjectBody, ObjectId};
use crate::tool::LayerListening;

/// Which part of an object was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    /// The deadline plate above a reminder body.
    DatePlate,
}

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    pub const CORNERS: [ResizeAnchor; 4] = [Self::Nw, Self::Ne, Self::Se, Self::Sw];
    pub const SIDES: [ResizeAnchor; 2] = [Self::W, Self::E];

    /// Horizontal edge this anchor drags: `-1` left, `1` right, `0` neither.
    #[must_use]
    pub fn dx_sign(self) -> i8 {
        match self {
            Self::Nw | Self::W | Self::Sw => -1,
            Self::Ne | Self::E | Self::Se => 1,
            Self::N | Self::S => 0,
        }
    }

    /// Vertical edge this anchor drags: `-1` top, `1` bottom, `0` neither.
    #[must_use]
    pub fn dy_sign(self) -> i8 {
        match self {
            Self::Nw | Self::N | Self::Ne => -1,
            Self::Sw | Self::S | Self::Se => 1,
            Self::W | Self::E => 0,
        }
    }

    /// Where the handle sits on `rect`.
    #[must_use]
    pub fn position(self, rect: Rect) -> Point {
        let x = match self.dx_sign() {
            -1 => rect.x,
            1 => rect.right(),
            _ => rect.x + rect.width / 2.0,
        };
        let y = match self.dy_sign() {
            -1 => rect.y,
            1 => rect.bottom(),
            _ => rect.y + rect.height / 2.0,
        };
        Point::new(x, y)
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub object_id: ObjectId,
    pub part: HitPart,
}

/// Topmost hit-testable object under `world_pt` on a listening layer.
#[must_use]
pub fn hit_test(world_pt: Point, doc: &DocStore, camera: &Camera, layers: LayerListening) -> Option<Hit> {
    doc.sorted_objects()
        .into_iter()
        .rev()
        .filter(|obj| match obj.layer() {
            Layer::Objects => layers.objects,
            Layer::Drawing => layers.drawing,
        })
        .filter(|obj| obj.is_hit_testable())
        .find_map(|obj| hit_object(obj, world_pt, camera))
}

fn hit_object(obj: &BoardObject, pt: Point, camera: &Camera) -> Option<Hit> {
    match &obj.body {
        ObjectBody::Stroke(stroke) => {
            let reach = stroke.width / 2.0 + camera.screen_dist_to_world(STROKE_HIT_SLOP_PX);
            (stroke.distance_to(pt) <= reach).then_some(Hit { object_id: obj.id, part: HitPart::Body })
        }
        _ if obj.plate_contains(pt) => Some(Hit { object_id: obj.id, part: HitPart::DatePlate }),
        _ => obj.bounds().contains(pt).then_some(Hit { object_id: obj.id, part: HitPart::Body }),
    }
}

/// Handle of the transform widget around `bounds` under `screen_pt`.
///
/// Handles keep a constant on-screen radius regardless of zoom.
#[must_use]
pub fn hit_handle(screen_pt: Point, bounds: Rect, anchors: &[ResizeAnchor], camera: &Camera) -> Option<ResizeAnchor> {
    anchors.iter().copied().find(|anchor| {
        let handle = camera.world_to_screen(anchor.position(bounds));
        handle.distance(screen_pt) <= HANDLE_RADIUS_PX
    })
}
