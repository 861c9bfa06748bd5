//! Rendering: draws the full board scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only view of the engine state and produces pixels; it
//! does not mutate any application state.
//!
//! Draw order is grid, object layer, drawing layer, handle widget. Strokes
//! are painted on a separate buffer canvas first so that eraser strokes
//! (`destination-out`) only ever remove stroke pixels, then the buffer is
//! copied over the objects.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point, Rect};
use crate::consts::{FONT_FAMILY, HANDLE_RADIUS_PX, LINE_HEIGHT};
use crate::doc::{BoardObject, Layer, Note, ObjectBody, Reminder, TextField};
use crate::engine::EngineCore;
use crate::grid::Grid;
use crate::hit::ResizeAnchor;
use crate::stroke::Stroke;
use crate::textfit::{TextMeasure, wrap_lines};

const BACKGROUND: &str = "#ffffff";
const GRID_COLOR: &str = "#e3e3e3";
const STICKER_BORDER: &str = "#e6b800";
const STICKER_RADIUS: f64 = 10.0;
const PLATE_FILL: &str = "#f0f0f0";
const PLATE_BORDER: &str = "#cccccc";
const PLATE_TEXT: &str = "#333333";
const PLATE_RADIUS: f64 = 5.0;
const LABEL_COLOR: &str = "#000000";
const SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.3)";
const SHADOW_BLUR: f64 = 10.0;
const SHADOW_OFFSET: f64 = 5.0;
const SELECTION_COLOR: &str = "#00a1ff";

/// Text measurer backed by `CanvasRenderingContext2d::measure_text`.
pub struct CanvasMeasure {
    ctx: CanvasRenderingContext2d,
}

impl CanvasMeasure {
    #[must_use]
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl TextMeasure for CanvasMeasure {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        self.ctx.save();
        self.ctx.set_font(&font(font_size, ""));
        let width = match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width(),
            Err(_) => f64::INFINITY,
        };
        self.ctx.restore();
        width
    }
}

/// Draw the full scene.
///
/// `layer` and `layer_ctx` are the drawing-layer buffer, sized like the main canvas.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    layer_ctx: &CanvasRenderingContext2d,
    layer: &HtmlCanvasElement,
    core: &EngineCore,
) -> Result<(), JsValue> {
    let dpr = core.dpr;
    let camera = &core.camera;

    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, core.viewport_width, core.viewport_height);

    apply_camera(ctx, camera, dpr)?;
    draw_grid(ctx, &core.grid());

    let objects = core.doc.sorted_objects();
    for obj in objects.iter().filter(|o| o.layer() == Layer::Objects) {
        draw_object(ctx, obj, core)?;
    }

    // Drawing layer: strokes composited on their own buffer.
    layer_ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    layer_ctx.clear_rect(0.0, 0.0, f64::from(layer.width()), f64::from(layer.height()));
    apply_camera(layer_ctx, camera, dpr)?;
    for obj in objects.iter().filter(|o| o.layer() == Layer::Drawing) {
        if let ObjectBody::Stroke(stroke) = &obj.body {
            draw_stroke(layer_ctx, stroke)?;
        }
    }
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.draw_image_with_html_canvas_element(layer, 0.0, 0.0)?;

    if let (Some(cfg), Some(bounds)) = (core.handle_config(), core.selection_bounds()) {
        apply_camera(ctx, camera, dpr)?;
        draw_handles(ctx, bounds, cfg.anchors, camera.zoom);
    }
    Ok(())
}

fn apply_camera(ctx: &CanvasRenderingContext2d, camera: &Camera, dpr: f64) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.translate(camera.pan_x, camera.pan_y)?;
    ctx.scale(camera.zoom, camera.zoom)?;
    Ok(())
}

// =============================================================
// Grid
// =============================================================

fn draw_grid(ctx: &CanvasRenderingContext2d, grid: &Grid) {
    ctx.save();
    ctx.set_stroke_style_str(GRID_COLOR);
    ctx.set_line_width(grid.line_width);
    if grid.minor_opacity > 0.0 {
        ctx.set_global_alpha(grid.minor_opacity);
        grid_lines(ctx, grid, grid.minor_step);
    }
    ctx.set_global_alpha(1.0);
    grid_lines(ctx, grid, grid.major_step);
    ctx.restore();
}

fn grid_lines(ctx: &CanvasRenderingContext2d, grid: &Grid, step: f64) {
    let b = grid.bounds;
    ctx.begin_path();
    for x in grid.columns(step) {
        ctx.move_to(x, b.y);
        ctx.line_to(x, b.bottom());
    }
    for y in grid.rows(step) {
        ctx.move_to(b.x, y);
        ctx.line_to(b.right(), y);
    }
    ctx.stroke();
}

// =============================================================
// Objects
// =============================================================

fn draw_object(ctx: &CanvasRenderingContext2d, obj: &BoardObject, core: &EngineCore) -> Result<(), JsValue> {
    match &obj.body {
        ObjectBody::Sticker(note) => draw_sticker(ctx, obj, note, core),
        ObjectBody::Reminder(reminder) => draw_reminder(ctx, obj, reminder, core),
        ObjectBody::Text(field) => draw_text_field(ctx, obj, field, core.measure()),
        ObjectBody::Stroke(_) => Ok(()),
    }
}

fn draw_sticker(
    ctx: &CanvasRenderingContext2d,
    obj: &BoardObject,
    note: &Note,
    core: &EngineCore,
) -> Result<(), JsValue> {
    draw_note_body(ctx, obj.bounds(), &note.fill, core.camera.zoom)?;
    if !note.label.editing {
        draw_label(ctx, obj, core)?;
    }
    Ok(())
}

fn draw_reminder(
    ctx: &CanvasRenderingContext2d,
    obj: &BoardObject,
    reminder: &Reminder,
    core: &EngineCore,
) -> Result<(), JsValue> {
    if let Some(body) = obj.label_container() {
        draw_note_body(ctx, body, &reminder.fill, core.camera.zoom)?;
    }
    if reminder.label.editing {
        return Ok(());
    }
    if let Some(plate) = obj.plate_rect() {
        ctx.save();
        rounded_rect(ctx, plate, PLATE_RADIUS)?;
        ctx.set_fill_style_str(PLATE_FILL);
        ctx.fill();
        ctx.set_stroke_style_str(PLATE_BORDER);
        ctx.set_line_width(1.0);
        ctx.stroke();
        ctx.set_fill_style_str(PLATE_TEXT);
        ctx.set_font(&font(reminder.plate_font_size, ""));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        let label = reminder.deadline_label(core.utc_offset);
        ctx.fill_text(&label, plate.x + plate.width / 2.0, plate.y + plate.height / 2.0)?;
        ctx.restore();
    }
    draw_label(ctx, obj, core)
}

fn draw_note_body(ctx: &CanvasRenderingContext2d, rect: Rect, fill: &str, zoom: f64) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_shadow_color(SHADOW_COLOR);
    ctx.set_shadow_blur(SHADOW_BLUR * zoom);
    ctx.set_shadow_offset_x(SHADOW_OFFSET * zoom);
    ctx.set_shadow_offset_y(SHADOW_OFFSET * zoom);
    rounded_rect(ctx, rect, STICKER_RADIUS)?;
    ctx.set_fill_style_str(fill);
    ctx.fill();
    ctx.set_shadow_color("transparent");
    ctx.set_stroke_style_str(STICKER_BORDER);
    ctx.set_line_width(1.0);
    ctx.stroke();
    ctx.restore();
    Ok(())
}

/// Centered, fitted label of a sticker or reminder.
fn draw_label(ctx: &CanvasRenderingContext2d, obj: &BoardObject, core: &EngineCore) -> Result<(), JsValue> {
    let (Some(label), Some(container)) = (obj.label(), obj.label_container()) else {
        return Ok(());
    };
    let size = f64::from(label.font_size);
    let padding = core.config.padding;
    let inner_w = container.width - padding * 2.0;
    let lines = wrap_lines(core.measure(), &label.text, inner_w, size);

    ctx.save();
    ctx.set_fill_style_str(LABEL_COLOR);
    ctx.set_font(&font(size, ""));
    ctx.set_text_align("center");
    ctx.set_text_baseline("top");
    let cx = container.x + container.width / 2.0;
    let mut y = container.y + label.offset_y;
    for line in &lines {
        ctx.fill_text(line, cx, y)?;
        y += size * LINE_HEIGHT;
    }
    ctx.restore();
    Ok(())
}

fn draw_text_field(
    ctx: &CanvasRenderingContext2d,
    obj: &BoardObject,
    field: &TextField,
    measure: &dyn TextMeasure,
) -> Result<(), JsValue> {
    if field.editing {
        return Ok(());
    }
    let size = field.font_size;
    let inner_w = (obj.width - field.padding * 2.0).max(0.0);
    let lines = wrap_lines(measure, &field.text, inner_w, size);

    ctx.save();
    ctx.set_fill_style_str(&field.fill);
    ctx.set_stroke_style_str(&field.fill);
    ctx.set_font(&font(size, &field.font_style()));
    ctx.set_text_align("left");
    ctx.set_text_baseline("top");
    let x = obj.x + field.padding;
    let mut y = obj.y + field.padding;
    for line in &lines {
        ctx.fill_text(line, x, y)?;
        if field.underline && !line.is_empty() {
            let width = ctx.measure_text(line)?.width();
            ctx.set_line_width((size / 15.0).max(1.0));
            ctx.begin_path();
            ctx.move_to(x, y + size);
            ctx.line_to(x + width, y + size);
            ctx.stroke();
        }
        y += size * LINE_HEIGHT;
    }
    ctx.restore();
    Ok(())
}

// =============================================================
// Strokes
// =============================================================

fn draw_stroke(ctx: &CanvasRenderingContext2d, stroke: &Stroke) -> Result<(), JsValue> {
    let Some((first, rest)) = stroke.points.split_first() else {
        return Ok(());
    };
    ctx.save();
    ctx.set_global_composite_operation(stroke.mode.composite_op())?;
    ctx.set_global_alpha(stroke.opacity());
    ctx.set_stroke_style_str(&stroke.color);
    ctx.set_line_width(stroke.width);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    if rest.is_empty() {
        // A single tap still leaves a dot.
        ctx.line_to(first.x, first.y);
    }
    for p in rest {
        ctx.line_to(p.x, p.y);
    }
    ctx.stroke();
    ctx.restore();
    Ok(())
}

// =============================================================
// Selection UI
// =============================================================

fn draw_handles(
    ctx: &CanvasRenderingContext2d,
    bounds: Rect,
    anchors: &[ResizeAnchor],
    zoom: f64,
) {
    ctx.save();
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(1.0 / zoom);
    ctx.stroke_rect(bounds.x, bounds.y, bounds.width, bounds.height);

    let half = (HANDLE_RADIUS_PX * 0.6) / zoom;
    ctx.set_fill_style_str("#fff");
    for anchor in anchors {
        let Point { x, y } = anchor.position(bounds);
        ctx.fill_rect(x - half, y - half, half * 2.0, half * 2.0);
        ctx.stroke_rect(x - half, y - half, half * 2.0, half * 2.0);
    }
    ctx.restore();
}

// =============================================================
// Helpers
// =============================================================

fn font(size: f64, style: &str) -> String {
    if style.is_empty() { format!("{size}px {FONT_FAMILY}") } else { format!("{style} {size}px {FONT_FAMILY}") }
}

/// Trace a rounded rectangle path.
fn rounded_rect(ctx: &CanvasRenderingContext2d, r: Rect, radius: f64) -> Result<(), JsValue> {
    let radius = radius.min(r.width / 2.0).min(r.height / 2.0).max(0.0);
    ctx.begin_path();
    ctx.move_to(r.x + radius, r.y);
    ctx.arc_to(r.right(), r.y, r.right(), r.bottom(), radius)?;
    ctx.arc_to(r.right(), r.bottom(), r.x, r.bottom(), radius)?;
    ctx.arc_to(r.x, r.bottom(), r.x, r.y, radius)?;
    ctx.arc_to(r.x, r.y, r.right(), r.y, radius)?;
    ctx.close_path();
    Ok(())
}
