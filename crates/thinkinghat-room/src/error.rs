//! Error types for the room layer.

use thinkinghat_engine::EngineError;
use thinkinghat_protocol::{ProtocolError, RoomStatus};
use thinkinghat_session::StartBlocker;
use thinkinghat_store::StoreError;

/// Coarse classification of an error, for mapping onto a transport's
/// status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Nobody to act as.
    Unauthorized,
    /// The room or seat doesn't exist.
    NotFound,
    /// The actor exists but may not do this.
    Forbidden,
    /// The room's status doesn't allow this.
    InvalidState,
    /// A bounded search ran out (room codes, puzzles).
    Exhausted,
    /// The request itself is malformed.
    Validation,
    /// A bug or broken invariant.
    Internal,
}

/// Errors that can occur during room operations.
///
/// Messages are stable; clients may show them as-is.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    #[error("Room not found")]
    RoomNotFound,

    /// The actor has no seat in the room (`set_ready`).
    #[error("Player not found")]
    PlayerNotFound,

    /// The actor has no seat in the room (game actions and reads).
    #[error("Not in room")]
    NotInRoom,

    /// A host-only operation from someone else.
    #[error("Only host can {action}")]
    NotHost { action: &'static str },

    #[error("Room already started")]
    AlreadyStarted,

    /// A status write that would move the room backward or sideways.
    #[error("Cannot move room from {from} to {to}")]
    InvalidTransition { from: RoomStatus, to: RoomStatus },

    /// The start rules said no. Displays the rule's own reason.
    #[error(transparent)]
    CannotStart(StartBlocker),

    #[error("Game state missing")]
    GameStateMissing,

    /// A game action arrived while the state is still the placeholder.
    #[error("Game not started")]
    GameNotStarted,

    #[error("Failed to generate room code")]
    CodeGenerationExhausted,

    #[error("Unknown game: {0}")]
    UnknownGame(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl RoomError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RoomNotFound | Self::PlayerNotFound => ErrorKind::NotFound,
            Self::NotInRoom | Self::NotHost { .. } => ErrorKind::Forbidden,
            Self::AlreadyStarted
            | Self::InvalidTransition { .. }
            | Self::CannotStart(_)
            | Self::GameStateMissing
            | Self::GameNotStarted => ErrorKind::InvalidState,
            Self::CodeGenerationExhausted => ErrorKind::Exhausted,
            Self::UnknownGame(_) | Self::Validation(_) | Self::Protocol(_) => ErrorKind::Validation,
            Self::Engine(e) => Self::kind_of_engine(e),
            Self::Store(_) => ErrorKind::Internal,
        }
    }

    /// The [`ErrorKind`] of an engine error, wrapped or not.
    pub fn kind_of_engine(error: &EngineError) -> ErrorKind {
        match error {
            EngineError::NotInRoom
            | EngineError::OnlyHostCanSkip
            | EngineError::OnlyHostCanAdvance => ErrorKind::Forbidden,
            EngineError::Validation(_) | EngineError::Protocol(_) => ErrorKind::Validation,
            EngineError::NoPuzzlesAvailable { .. } => ErrorKind::Exhausted,
            EngineError::DuplicateGame(_) => ErrorKind::Internal,
        }
    }
}
