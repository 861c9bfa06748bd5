//! Tool modes and the listener bindings each one owns.
//!
//! Exactly one [`ToolMode`] is active at a time. Each mode owns a scope of
//! pointer [`Listener`]s; switching modes detaches the previous scope before
//! attaching the new one, so re-entering a mode can never double-bind. The
//! engine consults [`ListenerSet::is_bound`] before dispatching a pointer
//! event, which is how "inactive" handlers stay silent.
//!
//! [`EditorState`] carries the per-session drawing preferences (brush color,
//! sizes, sticker color) alongside the active tool.

#[cfg(test)]
#[path = "tool_test.rs"]
mod tool_test;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::BoardConfig;
use crate::stroke::{BrushType, StrokeMode};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    /// Select, move, resize and pan (default).
    #[default]
    Selection,
    /// Place a sticker on click.
    Placement,
    /// Place a text field on click.
    Text,
    /// Free-hand pen or highlighter.
    Drawing,
    /// Erase strokes.
    Eraser,
    /// Place a reminder on click.
    Reminder,
}

impl ToolMode {
    pub const ALL: [ToolMode; 6] = [
        Self::Selection,
        Self::Placement,
        Self::Text,
        Self::Drawing,
        Self::Eraser,
        Self::Reminder,
    ];

    /// Mode bound to a single-letter keyboard shortcut (case-insensitive).
    #[must_use]
    pub fn from_shortcut(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'v' => Some(Self::Selection),
            'a' => Some(Self::Placement),
            't' => Some(Self::Text),
            'd' => Some(Self::Drawing),
            'e' => Some(Self::Eraser),
            'r' => Some(Self::Reminder),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Selection => "selection",
            Self::Placement => "placement",
            Self::Text => "text",
            Self::Drawing => "drawing",
            Self::Eraser => "eraser",
            Self::Reminder => "reminder",
        }
    }

    /// DOM id of the toolbar button that shows this mode as active.
    #[must_use]
    pub fn button_id(self) -> String {
        format!("{}-tool-btn", self.name())
    }

    /// Listeners attached while this mode is active.
    #[must_use]
    pub fn listeners(self) -> &'static [Listener] {
        match self {
            Self::Selection => &[
                Listener::SelectClick,
                Listener::DragTransform,
                Listener::Pan,
                Listener::SuppressContextMenu,
            ],
            Self::Placement | Self::Text | Self::Reminder => &[Listener::PlacementClick],
            Self::Drawing | Self::Eraser => &[Listener::StrokeCapture],
        }
    }

    /// Bind this mode's listeners. Pairs already bound are not duplicated.
    pub fn enter(self, listeners: &mut ListenerSet) {
        listeners.attach(self);
    }

    /// Unbind everything this mode attached.
    pub fn exit(self, listeners: &mut ListenerSet) {
        listeners.detach_scope(self);
    }

    /// Whether each layer receives pointer events in this mode.
    #[must_use]
    pub fn layers(self) -> LayerListening {
        let listening = !self.captures_strokes();
        LayerListening { objects: listening, drawing: listening }
    }

    /// CSS cursor for the canvas container.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Selection => "default",
            Self::Placement | Self::Reminder => "copy",
            Self::Text => "text",
            Self::Drawing | Self::Eraser => "crosshair",
        }
    }

    /// Option panels visible in this mode.
    #[must_use]
    pub fn panels(self) -> OptionPanels {
        OptionPanels {
            sticker_palette: self == Self::Placement,
            drawing_options: self == Self::Drawing,
            eraser_options: self == Self::Eraser,
        }
    }

    /// Whether pointer-down in this mode starts a stroke.
    #[must_use]
    pub fn captures_strokes(self) -> bool {
        matches!(self, Self::Drawing | Self::Eraser)
    }

    /// Whether a click in this mode places a new object.
    #[must_use]
    pub fn places_objects(self) -> bool {
        matches!(self, Self::Placement | Self::Text | Self::Reminder)
    }
}

/// A pointer handler that a tool mode can own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Listener {
    /// Click to select or toggle objects.
    SelectClick,
    /// Drag selected objects or their handles.
    DragTransform,
    /// Right-button drag pans the view.
    Pan,
    /// Swallow the browser context menu so right-drag can pan.
    SuppressContextMenu,
    /// Click places a new object.
    PlacementClick,
    /// Pointer down/move/up records a stroke.
    StrokeCapture,
}

/// Whether the object and drawing layers receive pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerListening {
    pub objects: bool,
    pub drawing: bool,
}

/// Visibility of the tool option panels.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OptionPanels {
    pub sticker_palette: bool,
    pub drawing_options: bool,
    pub eraser_options: bool,
}

/// Listener bindings, each scoped to the mode that attached it.
#[derive(Debug, Clone, Default)]
pub struct ListenerSet {
    bound: BTreeSet<(ToolMode, Listener)>,
}

impl ListenerSet {
    /// Attach every listener owned by `mode`. Already-bound pairs are left alone.
    pub fn attach(&mut self, mode: ToolMode) {
        for &listener in mode.listeners() {
            self.bound.insert((mode, listener));
        }
    }

    /// Detach every listener attached under `mode`.
    pub fn detach_scope(&mut self, mode: ToolMode) {
        self.bound.retain(|(scope, _)| *scope != mode);
    }

    /// Whether `listener` is attached under any scope.
    #[must_use]
    pub fn is_bound(&self, listener: Listener) -> bool {
        self.bound.iter().any(|(_, l)| *l == listener)
    }

    /// Every `(scope, listener)` pair currently attached.
    pub fn iter(&self) -> impl Iterator<Item = &(ToolMode, Listener)> {
        self.bound.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bound.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }
}

/// Active tool plus drawing preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    tool: ToolMode,
    brush_color: String,
    brush_size: f64,
    eraser_size: f64,
    brush_type: BrushType,
    sticker_color: String,
}

impl EditorState {
    #[must_use]
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            tool: ToolMode::Selection,
            brush_color: config.brush_color.clone(),
            brush_size: config.brush_size,
            eraser_size: config.eraser_size,
            brush_type: BrushType::Pen,
            sticker_color: config.sticker_color.clone(),
        }
    }

    #[must_use]
    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    #[must_use]
    pub fn brush_color(&self) -> &str {
        &self.brush_color
    }

    pub fn set_brush_color(&mut self, color: &str) {
        color.clone_into(&mut self.brush_color);
    }

    #[must_use]
    pub fn brush_size(&self) -> f64 {
        self.brush_size
    }

    /// Non-positive sizes are ignored.
    pub fn set_brush_size(&mut self, size: f64) {
        if size > 0.0 {
            self.brush_size = size;
        }
    }

    #[must_use]
    pub fn eraser_size(&self) -> f64 {
        self.eraser_size
    }

    /// Non-positive sizes are ignored.
    pub fn set_eraser_size(&mut self, size: f64) {
        if size > 0.0 {
            self.eraser_size = size;
        }
    }

    #[must_use]
    pub fn brush_type(&self) -> BrushType {
        self.brush_type
    }

    pub fn set_brush_type(&mut self, brush_type: BrushType) {
        self.brush_type = brush_type;
    }

    #[must_use]
    pub fn sticker_color(&self) -> &str {
        &self.sticker_color
    }

    pub fn set_sticker_color(&mut self, color: &str) {
        color.clone_into(&mut self.sticker_color);
    }

    /// Compositing mode and screen-pixel size for a stroke started now, if
    /// the active tool draws.
    #[must_use]
    pub fn stroke_style(&self) -> Option<(StrokeMode, f64)> {
        match self.tool {
            ToolMode::Drawing => {
                let mode = match self.brush_type {
                    BrushType::Pen => StrokeMode::Pen,
                    BrushType::Highlighter => StrokeMode::Highlighter,
                };
                Some((mode, self.brush_size))
            }
            ToolMode::Eraser => Some((StrokeMode::Eraser, self.eraser_size)),
            _ => None,
        }
    }
}

/// Owns the active tool and the listener bindings that go with it.
#[derive(Debug, Clone)]
pub struct ToolController {
    editor: EditorState,
    listeners: ListenerSet,
}

impl ToolController {
    /// Start in selection mode with its listeners attached.
    #[must_use]
    pub fn new(config: &BoardConfig) -> Self {
        let mut listeners = ListenerSet::default();
        ToolMode::Selection.enter(&mut listeners);
        Self { editor: EditorState::new(config), listeners }
    }

    #[must_use]
    pub fn tool(&self) -> ToolMode {
        self.editor.tool
    }

    #[must_use]
    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorState {
        &mut self.editor
    }

    #[must_use]
    pub fn listeners(&self) -> &ListenerSet {
        &self.listeners
    }

    /// Whether `listener` is live for the active tool.
    #[must_use]
    pub fn is_live(&self, listener: Listener) -> bool {
        self.listeners.is_bound(listener)
    }

    /// Switch tools: detach the old scope, then attach the new one.
    ///
    /// Returns the previously active mode.
    pub fn set_tool(&mut self, mode: ToolMode) -> ToolMode {
        let previous = self.editor.tool;
        previous.exit(&mut self.listeners);
        self.editor.tool = mode;
        mode.enter(&mut self.listeners);
        previous
    }
}
