//! Input model: modifier keys, mouse buttons, shortcuts, and the gesture state machine.
//!
//! `Modifiers`, `Button` and `Key` capture the user's intent at the time of a
//! browser event. `InputState` is the active gesture being tracked between
//! pointer-down and pointer-up, carrying the context needed to compute
//! incremental deltas and commit the result on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::{Point, Rect};
use crate::doc::ObjectId;
use crate::hit::ResizeAnchor;
use crate::selection::Selection;
use crate::tool::ToolMode;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn is_command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"Escape"`, `"v"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down, which zooms out).
    pub dy: f64,
}

/// A board-level keyboard command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Switch to a tool (v/a/t/d/e/r).
    Tool(ToolMode),
    /// Delete or Backspace.
    DeleteSelection,
    /// Escape.
    Deselect,
    /// Ctrl/Cmd+S.
    Save,
}

impl Shortcut {
    /// Resolve a key press. Command-modified keys other than S are left to the browser.
    #[must_use]
    pub fn from_key(key: &Key, modifiers: Modifiers) -> Option<Self> {
        let name = key.0.as_str();
        if modifiers.is_command() {
            return name.eq_ignore_ascii_case("s").then_some(Self::Save);
        }
        match name {
            "Delete" | "Backspace" => Some(Self::DeleteSelection),
            "Escape" => Some(Self::Deselect),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => ToolMode::from_shortcut(c).map(Self::Tool),
                    _ => None,
                }
            }
        }
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Objects bound to the handle widget.
    pub selection: Selection,
    /// Text field the formatting toolbar is shown for, if any.
    pub toolbar: Option<ObjectId>,
}

/// Internal state for the input state machine.
///
/// Each active variant carries gesture context needed to compute deltas and
/// commit the result on pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Right-button drag is panning the view.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
    },
    /// Pointer went down in a placement mode; the object is placed on release.
    Placing,
    /// The selected objects are following the pointer.
    DraggingSelection {
        /// World-space position of the pointer at the previous event.
        last_world: Point,
        /// Whether any movement has happened since pointer-down.
        moved: bool,
    },
    /// A handle of the transform widget is being dragged.
    Transforming {
        /// Which handle is being dragged.
        anchor: ResizeAnchor,
        /// Selection bounds at the start of the gesture.
        orig_bounds: Rect,
        /// Each selected object's bounds at the start of the gesture.
        originals: Vec<(ObjectId, Rect)>,
        /// Whether the aspect ratio is locked.
        keep_ratio: bool,
    },
    /// A stroke is being captured.
    Drawing {
        /// Id of the stroke receiving points.
        id: ObjectId,
    },
}
