//! Error types for game engines.

use thinkinghat_protocol::ProtocolError;

/// Errors an engine (or the registry) can raise.
///
/// Messages are shown to players as-is.
///
/// Gameplay no-ops are not errors: an action that doesn't apply right now
/// returns `Ok` with [`ActionReply::ignored`](thinkinghat_protocol::ActionReply::ignored).
/// These variants are for requests that are structurally wrong.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The content pool for the game (and category, if any) is empty.
    #[error("No puzzles found for {game_id}")]
    NoPuzzlesAvailable { game_id: String },

    /// The acting actor has no player document in the room.
    #[error("Not in room")]
    NotInRoom,

    #[error("Only host can skip")]
    OnlyHostCanSkip,

    #[error("Only host can advance")]
    OnlyHostCanAdvance,

    /// The action or config is malformed (for example, a blank answer).
    #[error("{0}")]
    Validation(String),

    /// A per-game variant didn't belong to this engine.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Two engines were registered under the same id.
    #[error("Duplicate game id registered: {0}")]
    DuplicateGame(String),
}
