//! Documents and shared types for ThinkingHat.
//!
//! This crate defines the "language" every other layer speaks:
//!
//! - **Identity** ([`Actor`], [`RoomId`], [`PlayerId`], [`RoomCode`]):
//!   who is acting and what they act on.
//! - **Documents** ([`Room`], [`Player`], [`GameStateDoc`], [`Puzzle`]):
//!   what the store keeps and read APIs return.
//! - **Per-game variants** ([`GameConfig`], [`GameStatePayload`],
//!   [`GameAction`], [`PublicGameState`]): tagged unions the session
//!   layer carries around without interpreting.
//! - **Codec** ([`Codec`], [`JsonCodec`]): bytes in, typed values out.
//!
//! # Architecture
//!
//! ```text
//! Facade (thinkinghat) → Room service → Engine / Session / Store → Protocol (this crate)
//! ```

mod codec;
mod documents;
mod error;
mod games;
mod mumbled;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use documents::{
    Category, GameListing, GameStateDoc, ListingStatus, NewPuzzle, Player, Puzzle, PuzzleData,
    Room,
};
pub use error::ProtocolError;
pub use games::{
    ActionReply, GameAction, GameConfig, GameStatePayload, MUMBLED_KIND, PLACEHOLDER_KIND,
    PublicGameState,
};
pub use mumbled::{
    DEFAULT_TOTAL_ROUNDS, LastSubmission, MumbledAction, MumbledConfig, MumbledPhase,
    MumbledPublicState, MumbledState,
};
pub use types::{
    Actor, Difficulty, GameMode, PlayType, PlayerId, PlayerRole, PuzzleId, ROOM_CODE_ALPHABET,
    ROOM_CODE_LENGTH, RoomCode, RoomId, RoomStatus,
};
