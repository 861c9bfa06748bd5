//! Shared numeric constants for the board engine.

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for transform handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Extra screen-space slop in pixels when hit-testing thin strokes.
pub const STROKE_HIT_SLOP_PX: f64 = 4.0;

// ── Text layout ─────────────────────────────────────────────────

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT: f64 = 1.2;

/// Font family used for every label and text field.
pub const FONT_FAMILY: &str = "Arial";

/// Distance in screen pixels between the text toolbar and the selected text box.
pub const TEXT_TOOLBAR_OFFSET_PX: f64 = 60.0;

// ── Transform ───────────────────────────────────────────────────

/// Smallest side a sticker may be resized to, in world units.
pub const MIN_STICKER_SIZE: f64 = 50.0;

/// Smallest body side a reminder may be resized to, in world units.
pub const MIN_REMINDER_SIZE: f64 = 100.0;

/// Narrowest a text field may be resized to, in world units.
pub const MIN_TEXT_WIDTH: f64 = 20.0;

/// Floor applied to any dragged bounding box so it never collapses or flips.
pub const MIN_TRANSFORM_EXTENT: f64 = 1.0;

// ── Grid ────────────────────────────────────────────────────────

/// Desired on-screen spacing of major grid lines, in pixels.
pub const GRID_TARGET_SPACING_PX: f64 = 60.0;

/// Minor grid lines per major cell.
pub const GRID_MINOR_DIVISIONS: f64 = 5.0;

/// Minor spacing (screen px) at which minor lines start fading in.
pub const GRID_MINOR_FADE_START_PX: f64 = 15.0;

/// Minor spacing (screen px) at which minor lines are fully opaque.
pub const GRID_MINOR_FADE_END_PX: f64 = 30.0;

// ── Strokes ─────────────────────────────────────────────────────

/// Opacity of highlighter strokes.
pub const HIGHLIGHTER_OPACITY: f64 = 0.5;

// ── Reminders ───────────────────────────────────────────────────

/// Default deadline distance from creation time, in seconds (one day).
pub const DEFAULT_DEADLINE_OFFSET_SECS: i64 = 86_400;
