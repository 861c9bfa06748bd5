//! Background grid spacing.
//!
//! Major lines sit at a "nice" world spacing (1, 2, 5 or 10 times a power of
//! ten) chosen so that they land roughly [`GRID_TARGET_SPACING_PX`] apart on
//! screen at any zoom. Minor lines split each major cell into
//! [`GRID_MINOR_DIVISIONS`] and fade in as they spread apart.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::camera::{Camera, Rect};
use crate::consts::{GRID_MINOR_DIVISIONS, GRID_MINOR_FADE_END_PX, GRID_MINOR_FADE_START_PX, GRID_TARGET_SPACING_PX};

/// Round `raw` up to the next 1/2/5/10 × 10^k step.
#[must_use]
pub fn nice_step(raw: f64) -> f64 {
    if !(raw.is_finite() && raw > 0.0) {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    if normalized > 5.0 {
        10.0 * magnitude
    } else if normalized > 2.0 {
        5.0 * magnitude
    } else if normalized > 1.0 {
        2.0 * magnitude
    } else {
        magnitude
    }
}

/// Grid geometry for one frame, in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    /// Spacing of the always-visible major lines.
    pub major_step: f64,
    /// Spacing of the fading minor lines.
    pub minor_step: f64,
    /// Opacity of the minor lines in `[0, 1]`.
    pub minor_opacity: f64,
    /// Line width that renders as one screen pixel.
    pub line_width: f64,
    /// Visible world area the lines must cover.
    pub bounds: Rect,
}

impl Grid {
    /// Compute the grid for the current camera and viewport (CSS pixels).
    #[must_use]
    pub fn for_view(camera: &Camera, viewport_w: f64, viewport_h: f64) -> Self {
        let major_step = nice_step(GRID_TARGET_SPACING_PX / camera.zoom);
        let minor_step = major_step / GRID_MINOR_DIVISIONS;
        let minor_px = minor_step * camera.zoom;
        let minor_opacity =
            ((minor_px - GRID_MINOR_FADE_START_PX) / (GRID_MINOR_FADE_END_PX - GRID_MINOR_FADE_START_PX)).clamp(0.0, 1.0);
        Self {
            major_step,
            minor_step,
            minor_opacity,
            line_width: 1.0 / camera.zoom,
            bounds: camera.visible_world_rect(viewport_w, viewport_h),
        }
    }

    /// X positions of vertical lines at `step` spacing across the visible bounds.
    #[must_use]
    pub fn columns(&self, step: f64) -> Vec<f64> {
        lines_between(self.bounds.x, self.bounds.right(), step)
    }

    /// Y positions of horizontal lines at `step` spacing across the visible bounds.
    #[must_use]
    pub fn rows(&self, step: f64) -> Vec<f64> {
        lines_between(self.bounds.y, self.bounds.bottom(), step)
    }
}

fn lines_between(start: f64, end: f64, step: f64) -> Vec<f64> {
    if !(step.is_finite() && step > 0.0) {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut at = (start / step).floor() * step;
    while at < end {
        out.push(at);
        at += step;
    }
    out
}
