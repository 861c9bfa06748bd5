//! Event dispatch: pointer, wheel, keyboard and overlay input in, [`Action`]s out.
//!
//! [`EngineCore`] holds all state and logic that does not need a browser, so
//! it can be driven directly from tests. [`Engine`] wraps it together with the
//! canvas element, its drawing-layer buffer and the canvas-backed text
//! measurer.
//!
//! Every entry point is synchronous and returns the actions the host must
//! carry out: redraw, move the edit overlay, call the backend, and so on.
//! Nothing here blocks or performs I/O.

use serde::Serialize;
use time::{OffsetDateTime, UtcOffset};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point, Rect};
use crate::config::BoardConfig;
use crate::consts::TEXT_TOOLBAR_OFFSET_PX;
use crate::doc::{BoardObject, BoardSnapshot, DocStore, Layer, ObjectBody, ObjectId, ObjectKind};
use crate::edit::{self, EditOverlay, EditSession, InputOutcome};
use crate::error::BoardError;
use crate::factory;
use crate::grid::Grid;
use crate::hit::{self, HitPart};
use crate::input::{Button, InputState, Key, Modifiers, Shortcut, UiState, WheelDelta};
use crate::render::{self, CanvasMeasure};
use crate::selection::{self, HandleConfig};
use crate::stroke::{BrushType, Stroke};
use crate::textfit::{FixedAdvance, TextMeasure};
use crate::tool::{LayerListening, Listener, OptionPanels, ToolController, ToolMode};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Formatting state shown in the text toolbar.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextFormat {
    pub font_size: f64,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: String,
}

/// A text toolbar command. Applies only when exactly one text field is selected.
#[derive(Debug, Clone, PartialEq)]
pub enum TextCommand {
    FontSize(f64),
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    Color(String),
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    RenderNeeded,
    SetCursor(String),
    /// Highlight the tool's button and show its option panels.
    ToolChanged { tool: ToolMode, panels: OptionPanels, layers: LayerListening },
    ObjectCreated(BoardObject),
    ObjectUpdated(BoardObject),
    ObjectDeleted { id: ObjectId },
    /// Place the text toolbar at screen `(left, top)`.
    ShowTextToolbar { id: ObjectId, left: f64, top: f64, format: TextFormat },
    HideTextToolbar,
    OpenTextEditor(EditOverlay),
    RestyleTextEditor { font_px: f64, padding_top_px: f64 },
    ResizeTextEditor { height_px: f64 },
    RevertTextEditor { text: String },
    CloseTextEditor { id: ObjectId },
    DeadlinePickerRequested { id: ObjectId, deadline: OffsetDateTime },
    /// Persist the serialized scene.
    SaveRequested { board_id: Option<i64>, scene: String },
    /// Create the backend record for a new reminder; answer with
    /// [`EngineCore::assign_remote_id`].
    CreateReminderRequested { id: ObjectId, board_id: Option<i64>, x: f64, y: f64 },
    DeleteReminderRequested { id: ObjectId, remote_id: i64 },
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub doc: DocStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub tools: ToolController,
    pub edit: Option<EditSession>,
    pub config: BoardConfig,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    pub board_id: Option<i64>,
    pub utc_offset: UtcOffset,
    measure: Box<dyn TextMeasure>,
    clock: fn() -> OffsetDateTime,
    dirty: bool,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(BoardConfig::default(), Box::new(FixedAdvance::default()))
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a core with explicit tunables and text measurer.
    #[must_use]
    pub fn with_config(config: BoardConfig, measure: Box<dyn TextMeasure>) -> Self {
        Self {
            doc: DocStore::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            tools: ToolController::new(&config),
            edit: None,
            config,
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            board_id: None,
            utc_offset: UtcOffset::UTC,
            measure,
            clock: OffsetDateTime::now_utc,
            dirty: false,
        }
    }

    /// Replace the source of "now" used for default reminder deadlines.
    pub fn set_clock(&mut self, clock: fn() -> OffsetDateTime) {
        self.clock = clock;
    }

    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
    }

    // --- Persistence ---

    /// Replace the board with a saved snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Json`] if `json` is not a valid snapshot; the
    /// current board is left untouched.
    pub fn load_snapshot_json(&mut self, json: &str) -> Result<Vec<Action>, BoardError> {
        let snapshot = BoardSnapshot::from_json(json)?;
        Ok(self.load_snapshot(snapshot))
    }

    /// Replace the board with `snapshot`, dropping any gesture, selection or edit.
    pub fn load_snapshot(&mut self, snapshot: BoardSnapshot) -> Vec<Action> {
        log::info!("loading board snapshot with {} objects", snapshot.objects.len());
        self.doc.load_snapshot(snapshot.objects);
        self.camera = snapshot.camera;
        self.input = InputState::Idle;
        self.edit = None;
        self.ui = UiState::default();
        self.dirty = false;
        vec![Action::HideTextToolbar, Action::RenderNeeded]
    }

    /// The board as it would be saved.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            objects: self.doc.sorted_objects().into_iter().cloned().collect(),
            camera: self.camera,
        }
    }

    /// # Errors
    ///
    /// Returns [`BoardError::Json`] if serialization fails.
    pub fn snapshot_json(&self) -> Result<String, BoardError> {
        self.snapshot().to_json()
    }

    /// Ask the host to persist the board now.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Json`] if the scene cannot be serialized.
    pub fn request_save(&mut self) -> Result<Action, BoardError> {
        let scene = self.snapshot_json()?;
        self.dirty = false;
        log::info!("save requested for board {:?}", self.board_id);
        Ok(Action::SaveRequested { board_id: self.board_id, scene })
    }

    /// Periodic autosave hook: a save request if anything changed since the last one.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Json`] if the scene cannot be serialized.
    pub fn autosave_if_dirty(&mut self) -> Result<Option<Action>, BoardError> {
        if self.dirty { self.request_save().map(Some) } else { Ok(None) }
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_board_id(&mut self, board_id: Option<i64>) {
        self.board_id = board_id;
    }

    /// Record the backend id of a reminder created through
    /// [`Action::CreateReminderRequested`].
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`] if the reminder is gone, [`BoardError::WrongKind`]
    /// if `id` is not a reminder.
    pub fn assign_remote_id(&mut self, id: &ObjectId, remote_id: i64) -> Result<(), BoardError> {
        let obj = self.doc.get_mut(id).ok_or(BoardError::NotFound(*id))?;
        let ObjectBody::Reminder(reminder) = &mut obj.body else {
            return Err(BoardError::WrongKind { id: *id, expected: ObjectKind::Reminder.name() });
        };
        reminder.remote_id = Some(remote_id);
        self.dirty = true;
        Ok(())
    }

    // --- Tool / editor state ---

    #[must_use]
    pub fn tool(&self) -> ToolMode {
        self.tools.tool()
    }

    /// Switch tools.
    ///
    /// Any open edit is committed and any gesture is cancelled. Leaving for a
    /// mode other than selection clears the selection and hides the toolbar.
    pub fn set_tool(&mut self, mode: ToolMode) -> Vec<Action> {
        let mut actions = self.finish_edit(false);
        actions.extend(self.cancel_gesture());

        let previous = self.tools.set_tool(mode);
        log::debug!("tool {} -> {}", previous.name(), mode.name());

        if mode != ToolMode::Selection {
            self.ui.selection.clear_selection();
            actions.extend(self.hide_toolbar());
        }
        actions.push(Action::ToolChanged { tool: mode, panels: mode.panels(), layers: mode.layers() });
        actions.push(Action::SetCursor(mode.cursor().to_owned()));
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn set_brush_color(&mut self, color: &str) {
        self.tools.editor_mut().set_brush_color(color);
    }

    pub fn set_brush_size(&mut self, size: f64) {
        self.tools.editor_mut().set_brush_size(size);
    }

    pub fn set_eraser_size(&mut self, size: f64) {
        self.tools.editor_mut().set_eraser_size(size);
    }

    pub fn set_brush_type(&mut self, brush_type: BrushType) {
        self.tools.editor_mut().set_brush_type(brush_type);
    }

    pub fn set_sticker_color(&mut self, color: &str) {
        self.tools.editor_mut().set_sticker_color(color);
    }

    // --- Object commands ---

    /// Apply a text toolbar command to the single selected text field.
    pub fn apply_text_command(&mut self, command: TextCommand) -> Vec<Action> {
        let Some(id) = selection::single_text(&self.ui.selection, &self.doc) else {
            return Vec::new();
        };
        let measure = self.measure.as_ref();
        let Some(obj) = self.doc.get_mut(&id) else {
            return Vec::new();
        };
        if let ObjectBody::Text(field) = &mut obj.body {
            match command {
                TextCommand::FontSize(size) if size > 0.0 => field.font_size = size,
                TextCommand::FontSize(_) => return Vec::new(),
                TextCommand::ToggleBold => field.bold = !field.bold,
                TextCommand::ToggleItalic => field.italic = !field.italic,
                TextCommand::ToggleUnderline => field.underline = !field.underline,
                TextCommand::Color(color) => field.fill = color,
            }
        }
        factory::relayout_text_field(obj, measure);
        let updated = obj.clone();
        self.dirty = true;

        let mut actions = vec![Action::ObjectUpdated(updated)];
        actions.extend(self.sync_toolbar());
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Set a reminder's deadline (the answer to [`Action::DeadlinePickerRequested`]).
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`] or [`BoardError::WrongKind`] when `id` is not
    /// an existing reminder.
    pub fn set_deadline(&mut self, id: &ObjectId, deadline: OffsetDateTime) -> Result<Vec<Action>, BoardError> {
        let obj = self.doc.get_mut(id).ok_or(BoardError::NotFound(*id))?;
        let ObjectBody::Reminder(reminder) = &mut obj.body else {
            return Err(BoardError::WrongKind { id: *id, expected: ObjectKind::Reminder.name() });
        };
        reminder.deadline = deadline;
        self.dirty = true;
        Ok(vec![Action::ObjectUpdated(obj.clone()), Action::RenderNeeded])
    }

    /// Delete every selected object.
    pub fn delete_selection(&mut self) -> Vec<Action> {
        if self.ui.selection.is_empty() {
            return Vec::new();
        }
        let ids = self.ui.selection.ids().to_vec();
        self.ui.selection.clear_selection();

        let mut actions = Vec::new();
        for id in ids {
            let Some(obj) = self.doc.remove(&id) else {
                continue;
            };
            if let ObjectBody::Reminder(reminder) = &obj.body {
                if let Some(remote_id) = reminder.remote_id {
                    log::info!("requesting deletion of reminder {remote_id}");
                    actions.push(Action::DeleteReminderRequested { id, remote_id });
                }
            }
            actions.push(Action::ObjectDeleted { id });
        }
        self.dirty = true;
        actions.extend(self.hide_toolbar());
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Empty the selection and hide the toolbar.
    pub fn clear_selection(&mut self) -> Vec<Action> {
        self.ui.selection.clear_selection();
        let mut actions = self.hide_toolbar();
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = self.finish_edit(false);
        let world = self.camera.screen_to_world(screen_pt);
        let mode = self.tools.tool();

        if button == Button::Secondary {
            if self.tools.is_live(Listener::Pan) {
                self.input = InputState::Panning { last_screen: screen_pt };
                actions.push(Action::SetCursor("grabbing".to_owned()));
            }
            return actions;
        }
        if button != Button::Primary {
            return actions;
        }

        if mode.places_objects() && self.tools.is_live(Listener::PlacementClick) {
            self.input = InputState::Placing;
        } else if mode.captures_strokes() && self.tools.is_live(Listener::StrokeCapture) {
            actions.extend(self.begin_stroke(world));
        } else if self.tools.is_live(Listener::SelectClick) {
            actions.extend(self.select_at(screen_pt, world, modifiers));
        }
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen_pt);
        match &mut self.input {
            InputState::Panning { last_screen } => {
                let (dx, dy) = (screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                *last_screen = screen_pt;
                self.camera.pan_by(dx, dy);
                let mut actions = self.sync_toolbar();
                actions.push(Action::RenderNeeded);
                actions
            }
            InputState::DraggingSelection { last_world, moved } => {
                let (dx, dy) = (world.x - last_world.x, world.y - last_world.y);
                *last_world = world;
                *moved = true;
                for id in self.ui.selection.ids() {
                    if let Some(obj) = self.doc.get_mut(id) {
                        obj.translate(dx, dy);
                    }
                }
                let mut actions = self.sync_toolbar();
                actions.push(Action::RenderNeeded);
                actions
            }
            InputState::Transforming { anchor, orig_bounds, originals, keep_ratio } => {
                let bounds = selection::resize_bounds(*orig_bounds, *anchor, world, *keep_ratio);
                for (id, orig) in originals.iter() {
                    if let Some(obj) = self.doc.get_mut(id) {
                        obj.set_bounds(selection::map_rect(*orig, *orig_bounds, bounds));
                    }
                }
                vec![Action::RenderNeeded]
            }
            InputState::Drawing { id } => {
                if let Some(obj) = self.doc.get_mut(id) {
                    if let ObjectBody::Stroke(stroke) = &mut obj.body {
                        stroke.push(world);
                    }
                    obj.refresh_stroke_bounds();
                }
                vec![Action::RenderNeeded]
            }
            InputState::Idle | InputState::Placing => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Panning { .. } => vec![Action::SetCursor(self.tools.tool().cursor().to_owned())],
            InputState::DraggingSelection { moved, .. } => self.end_drag(moved),
            InputState::Transforming { originals, .. } => self.end_transform(&originals),
            InputState::Drawing { id } => self.end_stroke(id),
            InputState::Placing => {
                let world = self.camera.screen_to_world(screen_pt);
                self.place_object(world)
            }
        }
    }

    /// The pointer left the canvas: strokes and pans stop.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Drawing { id } => self.end_stroke(id),
            InputState::Panning { .. } => vec![Action::SetCursor(self.tools.tool().cursor().to_owned())],
            other => {
                self.input = other;
                Vec::new()
            }
        }
    }

    /// Double-click opens an edit session, or the deadline picker on a reminder plate.
    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        if self.edit.is_some() || !self.tools.is_live(Listener::SelectClick) {
            return Vec::new();
        }
        let world = self.camera.screen_to_world(screen_pt);
        let Some(hit) = hit::hit_test(world, &self.doc, &self.camera, self.tools.tool().layers()) else {
            return Vec::new();
        };
        if hit.part == HitPart::DatePlate {
            return self.deadline_picker(hit.object_id).into_iter().collect();
        }
        match self.begin_edit(&hit.object_id) {
            Ok(actions) => actions,
            Err(err) => {
                log::debug!("double-click did not start an edit: {err}");
                Vec::new()
            }
        }
    }

    /// Wheel zooms about the pointer. Any open edit is committed first and
    /// the text toolbar follows the zoomed field.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = self.finish_edit(false);
        if delta.dy == 0.0 {
            return actions;
        }
        let zoom_in = delta.dy < 0.0;
        let cfg = &self.config;
        if self.camera.zoom_at(screen_pt, zoom_in, cfg.scale_by, cfg.min_scale, cfg.max_scale) {
            actions.extend(self.sync_toolbar());
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Keyboard input ---

    /// Board shortcuts. Ignored while an edit session is open.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if self.edit.is_some() {
            return Vec::new();
        }
        let Some(shortcut) = Shortcut::from_key(key, modifiers) else {
            return Vec::new();
        };
        // A drag or resize in flight is settled before the shortcut acts on it.
        let mut actions = self.cancel_gesture();
        match shortcut {
            Shortcut::Tool(mode) => actions.extend(self.set_tool(mode)),
            Shortcut::DeleteSelection => actions.extend(self.delete_selection()),
            Shortcut::Deselect => actions.extend(self.clear_selection()),
            Shortcut::Save => match self.request_save() {
                Ok(action) => actions.push(action),
                Err(err) => log::warn!("save failed: {err}"),
            },
        }
        actions
    }

    // --- Edit overlay ---

    /// Open the edit overlay on a sticker, reminder or text field.
    ///
    /// # Errors
    ///
    /// [`BoardError::EditInProgress`] if a session is already open,
    /// [`BoardError::NotFound`] for an unknown id, and
    /// [`BoardError::WrongKind`] for strokes.
    pub fn begin_edit(&mut self, id: &ObjectId) -> Result<Vec<Action>, BoardError> {
        if let Some(open) = &self.edit {
            return Err(BoardError::EditInProgress(open.id));
        }
        let obj = self.doc.get_mut(id).ok_or(BoardError::NotFound(*id))?;
        let session = EditSession::begin(obj).ok_or(BoardError::WrongKind { id: *id, expected: "text object" })?;
        let overlay = edit::overlay_for(obj, &self.camera, &self.config)
            .ok_or(BoardError::WrongKind { id: *id, expected: "text object" })?;
        obj.set_editing(true);
        log::debug!("editing {} {id}", session.kind.name());
        self.edit = Some(session);

        self.ui.selection.clear_selection();
        let mut actions = self.hide_toolbar();
        actions.push(Action::OpenTextEditor(overlay));
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// The id of the object under edit, if any.
    #[must_use]
    pub fn editing(&self) -> Option<ObjectId> {
        self.edit.as_ref().map(|s| s.id)
    }

    /// Overlay text changed.
    pub fn on_edit_input(&mut self, text: &str) -> Vec<Action> {
        let Some(session) = self.edit.as_mut() else {
            return Vec::new();
        };
        let Some(obj) = self.doc.get_mut(&session.id) else {
            return Vec::new();
        };
        let outcome = edit::apply_input(session, obj, text, &self.camera, &self.config, self.measure.as_ref());
        self.dirty = true;
        match outcome {
            Some(InputOutcome::Restyle { font_px, padding_top_px }) => {
                vec![Action::RestyleTextEditor { font_px, padding_top_px }]
            }
            Some(InputOutcome::Revert { text }) => vec![Action::RevertTextEditor { text }],
            Some(InputOutcome::Resize { height_px }) => vec![Action::ResizeTextEditor { height_px }],
            None => Vec::new(),
        }
    }

    /// Key pressed inside the overlay.
    ///
    /// Enter without Shift commits; on a reminder it also asks for the
    /// deadline picker. Escape commits, except that a reminder goes back to
    /// its text from before the session.
    pub fn on_edit_key(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        let Some(session) = &self.edit else {
            return Vec::new();
        };
        let (id, kind) = (session.id, session.kind);
        match key.0.as_str() {
            "Enter" if !modifiers.shift => {
                let mut actions = self.finish_edit(false);
                if kind == ObjectKind::Reminder {
                    actions.extend(self.deadline_picker(id));
                }
                actions
            }
            "Escape" => self.finish_edit(kind == ObjectKind::Reminder),
            _ => Vec::new(),
        }
    }

    /// The overlay lost focus: commit.
    pub fn on_edit_blur(&mut self) -> Vec<Action> {
        self.finish_edit(false)
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> &[ObjectId] {
        self.ui.selection.ids()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&BoardObject> {
        self.doc.get(id)
    }

    /// Anchors and ratio lock of the handle widget, if anything is selected.
    #[must_use]
    pub fn handle_config(&self) -> Option<HandleConfig> {
        selection::handle_config(&self.ui.selection, &self.doc)
    }

    /// World bounds of the handle widget.
    #[must_use]
    pub fn selection_bounds(&self) -> Option<Rect> {
        selection::selection_bounds(&self.ui.selection, &self.doc)
    }

    /// Background grid for the current view.
    #[must_use]
    pub fn grid(&self) -> Grid {
        Grid::for_view(&self.camera, self.viewport_width, self.viewport_height)
    }

    #[must_use]
    pub fn measure(&self) -> &dyn TextMeasure {
        self.measure.as_ref()
    }

    // --- Internals ---

    fn select_at(&mut self, screen_pt: Point, world: Point, modifiers: Modifiers) -> Vec<Action> {
        if let (Some(cfg), Some(bounds)) = (self.handle_config(), self.selection_bounds()) {
            if let Some(anchor) = hit::hit_handle(screen_pt, bounds, cfg.anchors, &self.camera) {
                let originals = self
                    .ui
                    .selection
                    .ids()
                    .iter()
                    .filter_map(|id| self.doc.get(id))
                    .map(|obj| (obj.id, obj.bounds()))
                    .collect();
                self.raise_selection();
                self.input = InputState::Transforming {
                    anchor,
                    orig_bounds: bounds,
                    originals,
                    keep_ratio: cfg.keep_ratio,
                };
                return vec![Action::RenderNeeded];
            }
        }

        let layers = self.tools.tool().layers();
        let Some(hit) = hit::hit_test(world, &self.doc, &self.camera, layers) else {
            return self.clear_selection();
        };
        let id = hit.object_id;
        if modifiers.shift {
            self.ui.selection.toggle_in_set(id);
        } else if !self.ui.selection.contains(&id) {
            self.ui.selection.select_single(id);
        }
        if self.ui.selection.contains(&id) {
            self.raise_selection();
            self.input = InputState::DraggingSelection { last_world: world, moved: false };
        }
        let mut actions = self.sync_toolbar();
        actions.push(Action::RenderNeeded);
        actions
    }

    fn raise_selection(&mut self) {
        for id in self.ui.selection.ids() {
            self.doc.raise_to_top(id);
        }
    }

    fn begin_stroke(&mut self, world: Point) -> Vec<Action> {
        let mode = self.tools.tool();
        if mode == ToolMode::Drawing && hit::hit_test(world, &self.doc, &self.camera, mode.layers()).is_some() {
            return Vec::new();
        }
        let editor = self.tools.editor();
        let Some((stroke_mode, size)) = editor.stroke_style() else {
            return Vec::new();
        };
        let stroke = Stroke::begin(world, stroke_mode, editor.brush_color(), size, self.camera.zoom);
        let mut obj = BoardObject::new(stroke.bounds(), ObjectBody::Stroke(stroke));
        obj.z_index = self.doc.top_z(Layer::Drawing) + 1;
        let id = obj.id;
        self.doc.insert(obj);
        self.input = InputState::Drawing { id };
        log::debug!("stroke {id} started");
        vec![Action::RenderNeeded]
    }

    fn end_stroke(&mut self, id: ObjectId) -> Vec<Action> {
        let Some(obj) = self.doc.get(&id) else {
            return Vec::new();
        };
        self.dirty = true;
        vec![Action::ObjectCreated(obj.clone()), Action::RenderNeeded]
    }

    fn end_transform(&mut self, originals: &[(ObjectId, Rect)]) -> Vec<Action> {
        let measure = self.measure.as_ref();
        let mut actions = Vec::new();
        for (id, before) in originals {
            if let Some(obj) = self.doc.get_mut(id) {
                factory::finish_transform(obj, *before, &self.config, measure);
                actions.push(Action::ObjectUpdated(obj.clone()));
            }
        }
        self.dirty = true;
        actions.extend(self.sync_toolbar());
        actions.push(Action::RenderNeeded);
        actions
    }

    fn place_object(&mut self, world: Point) -> Vec<Action> {
        let mode = self.tools.tool();
        let measure = self.measure.as_ref();
        let fill = self.tools.editor().sticker_color();
        let mut obj = match mode {
            ToolMode::Placement => factory::new_sticker(world, fill, &self.config, measure),
            ToolMode::Text => factory::new_text_field(world, &self.config, measure),
            ToolMode::Reminder => {
                let deadline = factory::default_deadline((self.clock)());
                factory::new_reminder(world, fill, deadline, &self.config, measure)
            }
            _ => return Vec::new(),
        };
        obj.z_index = self.doc.top_z(Layer::Objects) + 1;
        let id = obj.id;
        log::info!("placed {} {id}", obj.kind().name());

        let mut actions = vec![Action::ObjectCreated(obj.clone())];
        if obj.kind() == ObjectKind::Reminder {
            actions.push(Action::CreateReminderRequested { id, board_id: self.board_id, x: world.x, y: world.y });
        }
        self.doc.insert(obj);
        self.dirty = true;

        actions.extend(self.set_tool(ToolMode::Selection));
        match self.begin_edit(&id) {
            Ok(edit_actions) => actions.extend(edit_actions),
            Err(err) => log::warn!("could not open editor on new object: {err}"),
        }
        actions
    }

    fn deadline_picker(&self, id: ObjectId) -> Option<Action> {
        match &self.doc.get(&id)?.body {
            ObjectBody::Reminder(reminder) => Some(Action::DeadlinePickerRequested { id, deadline: reminder.deadline }),
            _ => None,
        }
    }

    /// Close the open edit session, if any, and reselect the object.
    fn finish_edit(&mut self, cancel: bool) -> Vec<Action> {
        let Some(session) = self.edit.take() else {
            return Vec::new();
        };
        let id = session.id;
        let mut actions = vec![Action::CloseTextEditor { id }];
        let Some(obj) = self.doc.get_mut(&id) else {
            log::warn!("edited object {id} vanished before commit");
            return actions;
        };
        edit::commit(&session, obj, cancel, &self.config, self.measure.as_ref());
        actions.push(Action::ObjectUpdated(obj.clone()));
        self.dirty = true;

        self.ui.selection.select_single(id);
        actions.extend(self.sync_toolbar());
        actions.push(Action::RenderNeeded);
        actions
    }

    fn end_drag(&mut self, moved: bool) -> Vec<Action> {
        if !moved {
            return Vec::new();
        }
        self.dirty = true;
        let mut actions: Vec<Action> = self
            .ui
            .selection
            .ids()
            .iter()
            .filter_map(|id| self.doc.get(id))
            .map(|obj| Action::ObjectUpdated(obj.clone()))
            .collect();
        actions.extend(self.sync_toolbar());
        actions
    }

    /// Stop any gesture in flight, committing what it changed so far.
    fn cancel_gesture(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Drawing { id } => self.end_stroke(id),
            InputState::Transforming { originals, .. } => self.end_transform(&originals),
            InputState::DraggingSelection { moved, .. } => self.end_drag(moved),
            InputState::Panning { .. } => vec![Action::SetCursor(self.tools.tool().cursor().to_owned())],
            InputState::Idle | InputState::Placing => Vec::new(),
        }
    }

    /// Show the text toolbar for a lone selected text field, or hide it.
    fn sync_toolbar(&mut self) -> Vec<Action> {
        let Some(id) = selection::single_text(&self.ui.selection, &self.doc) else {
            return self.hide_toolbar();
        };
        let Some(obj) = self.doc.get(&id) else {
            return self.hide_toolbar();
        };
        let ObjectBody::Text(field) = &obj.body else {
            return self.hide_toolbar();
        };
        let screen = self.camera.world_rect_to_screen(obj.bounds());
        let format = TextFormat {
            font_size: field.font_size,
            bold: field.bold,
            italic: field.italic,
            underline: field.underline,
            color: field.fill.clone(),
        };
        self.ui.toolbar = Some(id);
        vec![Action::ShowTextToolbar { id, left: screen.x, top: screen.y - TEXT_TOOLBAR_OFFSET_PX, format }]
    }

    fn hide_toolbar(&mut self) -> Vec<Action> {
        if self.ui.toolbar.take().is_some() { vec![Action::HideTextToolbar] } else { Vec::new() }
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas
/// element plus the offscreen buffer strokes are composited on.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    layer: HtmlCanvasElement,
    layer_ctx: CanvasRenderingContext2d,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to `canvas`.
    ///
    /// # Errors
    ///
    /// Fails if the 2D context or the drawing-layer buffer cannot be created.
    pub fn new(canvas: HtmlCanvasElement, config: BoardConfig) -> Result<Self, JsValue> {
        let ctx = context_2d(&canvas)?;
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let layer: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        let layer_ctx = context_2d(&layer)?;

        let mut core = EngineCore::with_config(config, Box::new(CanvasMeasure::new(ctx.clone())));
        core.utc_offset = local_offset();
        Ok(Self { canvas, ctx, layer, layer_ctx, core })
    }

    /// Resize the backing stores to `width_css × height_css` at `dpr`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        let w = (width_css * dpr).round().max(0.0) as u32;
        let h = (height_css * dpr).round().max(0.0) as u32;
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.layer.set_width(w);
        self.layer.set_height(h);
        self.core.set_viewport(width_css, height_css, dpr);
    }

    // --- Delegated input ---

    pub fn set_tool(&mut self, mode: ToolMode) -> Vec<Action> {
        self.core.set_tool(mode)
    }

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_double_click(screen_pt)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn on_edit_input(&mut self, text: &str) -> Vec<Action> {
        self.core.on_edit_input(text)
    }

    pub fn on_edit_key(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_edit_key(key, modifiers)
    }

    pub fn on_edit_blur(&mut self) -> Vec<Action> {
        self.core.on_edit_blur()
    }

    // --- Rendering ---

    /// Redraw the whole scene.
    ///
    /// # Errors
    ///
    /// Propagates any failing `Canvas2D` call.
    pub fn render(&self) -> Result<(), JsValue> {
        render::draw(&self.ctx, &self.layer_ctx, &self.layer, &self.core)
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

/// The browser's current UTC offset, falling back to UTC.
#[allow(clippy::cast_possible_truncation)]
fn local_offset() -> UtcOffset {
    // getTimezoneOffset is minutes *behind* UTC.
    let minutes = js_sys::Date::new_0().get_timezone_offset();
    UtcOffset::from_whole_seconds(-(minutes * 60.0) as i32).unwrap_or(UtcOffset::UTC)
}
