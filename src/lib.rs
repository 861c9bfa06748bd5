//! Canvas engine for the sticker board.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! board's interactive behavior: tool modes and their listener sets, pan and
//! zoom, selection with resize handles, sticker/reminder/text placement,
//! auto-fitted labels, the text edit overlay, free-hand strokes on a separate
//! drawing layer, and rendering. The host page only wires DOM events to the
//! engine and carries out the returned [`engine::Action`]s (redraws, overlay
//! placement, backend calls).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Board objects, snapshots and the in-memory store |
//! | [`tool`] | Tool modes, listener sets and editor state |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Input event types, shortcuts and the gesture state machine |
//! | [`hit`] | Hit-testing against objects and resize handles |
//! | [`selection`] | Selection set and handle-driven resizing |
//! | [`factory`] | Constructors and layout for new objects |
//! | [`edit`] | Text edit overlay sessions |
//! | [`textfit`] | Word wrapping and font-size fitting |
//! | [`stroke`] | Free-hand stroke capture and geometry |
//! | [`grid`] | Background grid spacing |
//! | [`render`] | Canvas 2D scene rendering |
//! | [`config`] | Board tunables |
//! | [`error`] | Crate error type |
//! | [`logging`] | Console logger setup |
//! | [`consts`] | Shared numeric constants |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod edit;
pub mod engine;
pub mod error;
pub mod factory;
pub mod grid;
pub mod hit;
pub mod input;
pub mod logging;
pub mod render;
pub mod selection;
pub mod stroke;
pub mod textfit;
pub mod tool;
