//! Stored documents: rooms, players, game states, and the content catalogue.
//!
//! These are the records the store keeps and the read APIs hand back to
//! clients. Timestamps are milliseconds since the Unix epoch.

use serde::{Deserialize, Serialize};

use crate::{
    Actor, Difficulty, GameConfig, GameMode, GameStatePayload, PlayType, PlayerId, PlayerRole,
    PuzzleId, RoomCode, RoomId, RoomStatus,
};

/// A joinable session keyed by a short code, bound to one game and one mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub code: RoomCode,
    pub game_id: String,
    pub mode: GameMode,
    pub play_type: PlayType,
    /// Who created the room. Only this actor may start, skip, advance, or
    /// end it.
    pub host: Actor,
    pub status: RoomStatus,
    pub config: GameConfig,
    pub current_round: u32,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Room {
    pub fn is_host(&self, actor: &Actor) -> bool {
        self.host == *actor
    }
}

/// One participant in exactly one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub room_id: RoomId,
    pub actor: Actor,
    pub display_name: String,
    pub role: PlayerRole,
    pub is_ready: bool,
    pub is_connected: bool,
    /// Advisory only. Nothing sweeps stale players.
    pub last_seen_at: i64,
    pub score: u32,
    /// Optional device id, kept across reconnects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl Player {
    /// Marks the player as present.
    pub fn touch(&mut self, now: i64) {
        self.is_connected = true;
        self.last_seen_at = now;
    }
}

/// The engine-owned state of one room's game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateDoc {
    pub room_id: RoomId,
    pub game_id: String,
    pub state: GameStatePayload,
    /// Denormalized copy of the engine's round counter, for cheap display.
    pub round: u32,
    pub updated_at: i64,
}

/// Per-game puzzle payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PuzzleData {
    /// A phrase spelled as sound-alike words, e.g. "Sigh Cub Her Monday".
    Mumbled { prompt: String },
}

/// One entry in a game's content pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    pub id: PuzzleId,
    pub game_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_slug: Option<String>,
    pub difficulty: Difficulty,
    pub data: PuzzleData,
    pub answer: String,
    pub created_at: i64,
}

/// A puzzle that has not been stored yet (no id, no timestamp).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPuzzle {
    pub game_id: String,
    pub category_slug: Option<String>,
    pub difficulty: Difficulty,
    pub data: PuzzleData,
    pub answer: String,
}

/// A content category within one game ("Common Phrases", "Movie Titles").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub game_id: String,
    pub slug: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_default: bool,
}

/// Whether a game can be played yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListingStatus {
    Active,
    ComingSoon,
}

/// An entry in the game picker. Names are i18n keys; clients translate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameListing {
    pub game_id: String,
    pub name_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_key: Option<String>,
    pub status: ListingStatus,
    pub sort_order: u32,
}
