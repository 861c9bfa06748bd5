//! Free-hand strokes: capture state, compositing modes, geometry.
//!
//! A stroke is a polyline in world coordinates. Its width is fixed at capture
//! time from the brush size divided by the zoom factor, so strokes look the
//! same thickness on screen no matter how far the user has zoomed.

#[cfg(test)]
#[path = "stroke_test.rs"]
mod stroke_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Point, Rect};
use crate::consts::HIGHLIGHTER_OPACITY;

/// Pen flavor selected in the drawing options panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushType {
    #[default]
    Pen,
    Highlighter,
}

/// How a stroke combines with the pixels beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeMode {
    /// Opaque ink.
    Pen,
    /// Translucent multiply ink.
    Highlighter,
    /// Subtractive pass that clears drawing-layer pixels.
    Eraser,
}

impl StrokeMode {
    /// Canvas `globalCompositeOperation` for this mode.
    #[must_use]
    pub fn composite_op(self) -> &'static str {
        match self {
            Self::Pen => "source-over",
            Self::Highlighter => "multiply",
            Self::Eraser => "destination-out",
        }
    }

    /// Opacity applied while drawing this stroke.
    #[must_use]
    pub fn opacity(self) -> f64 {
        match self {
            Self::Highlighter => HIGHLIGHTER_OPACITY,
            Self::Pen | Self::Eraser => 1.0,
        }
    }

    /// Eraser passes are compositing operations and can never be picked.
    #[must_use]
    pub fn is_hit_testable(self) -> bool {
        !matches!(self, Self::Eraser)
    }
}

/// A captured free-hand polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Sampled pointer positions in world coordinates.
    pub points: Vec<Point>,
    /// Line width in world units.
    #[serde(rename = "stroke_width")]
    pub width: f64,
    /// CSS color.
    pub color: String,
    /// Compositing mode.
    pub mode: StrokeMode,
}

impl Stroke {
    /// Start a stroke at `start`.
    ///
    /// `screen_size` is the brush (or eraser) size in pixels; it is divided by
    /// `zoom` so the stroke has a constant on-screen width.
    #[must_use]
    pub fn begin(start: Point, mode: StrokeMode, color: &str, screen_size: f64, zoom: f64) -> Self {
        let color = if mode == StrokeMode::Eraser { "rgba(0,0,0,1)" } else { color };
        Self {
            points: vec![start],
            width: screen_size / zoom,
            color: color.to_owned(),
            mode,
        }
    }

    /// Append a sampled point.
    pub fn push(&mut self, pt: Point) {
        self.points.push(pt);
    }

    /// Opacity for rendering.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.mode.opacity()
    }

    /// Bounding box of the points, grown by half the line width.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::new(0.0, 0.0, 0.0, 0.0);
        };
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        let half = self.width / 2.0;
        Rect::new(min_x - half, min_y - half, max_x - min_x + self.width, max_y - min_y + self.width)
    }

    /// Shortest distance from `pt` to the polyline's centerline.
    #[must_use]
    pub fn distance_to(&self, pt: Point) -> f64 {
        match self.points.as_slice() {
            [] => f64::INFINITY,
            [only] => only.distance(pt),
            points => points
                .windows(2)
                .map(|seg| segment_distance(pt, seg[0], seg[1]))
                .fold(f64::INFINITY, f64::min),
        }
    }

    /// Move every point by a world-space delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for p in &mut self.points {
            p.x += dx;
            p.y += dy;
        }
    }

    /// Map the points from the `from` box onto the `to` box.
    pub fn remap(&mut self, from: Rect, to: Rect) {
        let sx = if from.width > 0.0 { to.width / from.width } else { 1.0 };
        let sy = if from.height > 0.0 { to.height / from.height } else { 1.0 };
        for p in &mut self.points {
            p.x = to.x + (p.x - from.x) * sx;
            p.y = to.y + (p.y - from.y) * sy;
        }
    }
}

fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f64::EPSILON {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}
