//! Error types for the store.

use thinkinghat_protocol::{Actor, ProtocolError, RoomCode, RoomId};

/// Errors raised by [`MemoryStore`](crate::MemoryStore) and its
/// transactions.
///
/// These mean a caller broke an index invariant or a snapshot was bad.
/// Rule violations (not host, room full) belong to the room layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Another room already owns this code.
    #[error("room code {0} is already taken")]
    CodeTaken(RoomCode),

    /// The actor already has a player document in this room.
    #[error("{actor} already has a seat in room {room_id}")]
    DuplicatePlayer { room_id: RoomId, actor: Actor },

    /// A player or game state points at a room that doesn't exist.
    #[error("room {0} not found")]
    RoomMissing(RoomId),

    /// Snapshot encoding or decoding failed.
    #[error(transparent)]
    Snapshot(#[from] ProtocolError),
}
