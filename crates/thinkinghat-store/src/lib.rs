//! Document storage for ThinkingHat.
//!
//! [`MemoryStore`] keeps rooms, players, game states, and the content
//! catalogue in memory, with the secondary indexes the room service needs:
//!
//! | Index | Lookup |
//! |---|---|
//! | room by code | [`Txn::room_by_code`] |
//! | players by room | [`Txn::players_in_room`] |
//! | player by (room, actor) | [`Txn::player_for_actor`] |
//! | game state by room | [`Txn::game_state`] |
//! | puzzles by game / category | [`Txn::puzzles`] |
//! | categories by game | [`Txn::categories`] |
//!
//! Committed writes are announced on a broadcast feed
//! ([`MemoryStore::subscribe`]) so a transport layer can push updates.

mod error;
mod store;
mod tables;
mod txn;

use thinkinghat_protocol::RoomId;

pub use error::StoreError;
pub use store::{DEFAULT_CHANGE_CAPACITY, MemoryStore};
pub use txn::Txn;

/// Which document of a room changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Room,
    Players,
    GameState,
}

/// A committed change, published after the transaction that made it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Change {
    pub room_id: RoomId,
    pub kind: ChangeKind,
}
