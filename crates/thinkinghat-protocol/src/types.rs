//! Identity and vocabulary types shared by every layer.
//!
//! Ids are newtype wrappers so a `RoomId` can never be passed where a
//! `PlayerId` is expected, even though both are `u64` underneath.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Document ids
// ---------------------------------------------------------------------------

/// A unique identifier for a room document.
///
/// `#[serde(transparent)]` serializes this as the bare number, so
/// `RoomId(7)` is just `7` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}

/// A unique identifier for a player document (one seat in one room).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A unique identifier for a puzzle in the content pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PuzzleId(pub u64);

impl fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Z-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

/// The resolved identity performing an operation.
///
/// Exactly one of the two kinds. Every identity comparison (host checks,
/// player lookups) matches on this enum, so "user id set but guest id also
/// set" cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Actor {
    /// An authenticated user, bound to the identity provider's subject id.
    User { user_id: String },
    /// An anonymous guest, bound to a client-generated id.
    Guest { guest_id: String },
}

impl Actor {
    /// Shorthand for `Actor::User`.
    pub fn user(user_id: impl Into<String>) -> Self {
        Self::User {
            user_id: user_id.into(),
        }
    }

    /// Shorthand for `Actor::Guest`.
    pub fn guest(guest_id: impl Into<String>) -> Self {
        Self::Guest {
            guest_id: guest_id.into(),
        }
    }

    /// The raw id, without the kind.
    pub fn id(&self) -> &str {
        match self {
            Self::User { user_id } => user_id,
            Self::Guest { guest_id } => guest_id,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Self::Guest { .. })
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User { user_id } => write!(f, "user:{user_id}"),
            Self::Guest { guest_id } => write!(f, "guest:{guest_id}"),
        }
    }
}

// ---------------------------------------------------------------------------
// RoomCode
// ---------------------------------------------------------------------------

/// Characters a room code may contain. No `I`, `O`, `0` or `1`.
pub const ROOM_CODE_ALPHABET: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of every generated room code.
pub const ROOM_CODE_LENGTH: usize = 5;

/// A short, human-typable join code.
///
/// Codes are always stored upper-case; [`RoomCode::normalize`] is applied
/// to user input before any lookup, which makes lookups case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Trims and upper-cases user input. Does not validate the alphabet:
    /// a malformed code simply won't match any room.
    pub fn normalize(input: &str) -> Self {
        Self(input.trim().to_uppercase())
    }

    /// Returns `true` if the code has the generated length and only uses
    /// characters from [`ROOM_CODE_ALPHABET`].
    pub fn is_well_formed(&self) -> bool {
        self.0.chars().count() == ROOM_CODE_LENGTH
            && self.0.chars().all(|c| ROOM_CODE_ALPHABET.contains(c))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Room vocabulary
// ---------------------------------------------------------------------------

/// Participant-count and readiness policy of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    Single,
    TwoPlayer,
    Party,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::TwoPlayer => write!(f, "two-player"),
            Self::Party => write!(f, "party"),
        }
    }
}

/// How the people in a room are physically arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayType {
    Online,
    Local,
}

impl fmt::Display for PlayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// The lifecycle state of a room.
///
/// Transitions are strictly ordered and never go backward:
///
/// ```text
/// Lobby → InProgress → Finished
/// ```
///
/// - **Lobby**: accepting joins and ready toggles; nothing is being played.
/// - **InProgress**: the host started the game; the engine owns the state.
/// - **Finished**: the engine reported game over or the host ended the
///   room. The room stays readable for historical display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoomStatus {
    Lobby,
    InProgress,
    Finished,
}

impl RoomStatus {
    /// Returns `true` if `target` is reachable from here without going
    /// backward. A lobby may be finished directly when the host ends it.
    pub fn can_transition_to(self, target: Self) -> bool {
        match (self, target) {
            (Self::Lobby, Self::InProgress | Self::Finished) => true,
            (Self::InProgress, Self::Finished) => true,
            _ => false,
        }
    }

    pub fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lobby => write!(f, "lobby"),
            Self::InProgress => write!(f, "inProgress"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

/// A player's seat type inside a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayerRole {
    Host,
    Player,
    Spectator,
}

impl PlayerRole {
    /// Hosts and players take part in the game; spectators only watch.
    pub fn is_participant(self) -> bool {
        !matches!(self, Self::Spectator)
    }
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host => write!(f, "host"),
            Self::Player => write!(f, "player"),
            Self::Spectator => write!(f, "spectator"),
        }
    }
}

/// Puzzle difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

// =========================================================================
// Tests
// =========================================================================
