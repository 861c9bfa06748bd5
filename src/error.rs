//! Error type shared by the public engine API.

use crate::doc::ObjectId;

/// Failures surfaced by [`crate::engine::EngineCore`] and its helpers.
///
/// Pointer and keyboard handlers never return these; they log and carry on.
/// Only explicit host calls (loading a snapshot, starting an edit, assigning
/// a remote id) report them.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// A snapshot or config document could not be encoded or decoded.
    #[error("invalid board JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A config document decoded but holds unusable values.
    #[error("invalid board config: {0}")]
    Config(String),
    /// No object with this id exists on the board.
    #[error("object not found: {0}")]
    NotFound(ObjectId),
    /// The object exists but is the wrong kind for the requested operation.
    #[error("object {id} is not a {expected}")]
    WrongKind { id: ObjectId, expected: &'static str },
    /// Another text edit session is already open.
    #[error("a text edit session is already open for {0}")]
    EditInProgress(ObjectId),
}
