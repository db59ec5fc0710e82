//! Request and response shapes for room operations.

use serde::{Deserialize, Serialize};
use thinkinghat_protocol::{GameConfig, GameMode, PlayType, PlayerId, PlayerRole, RoomCode, RoomId};

/// Arguments to [`RoomService::create_room`](crate::RoomService::create_room).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoom {
    pub game_id: String,
    pub mode: GameMode,
    pub play_type: PlayType,
    /// `None` uses the game's default config.
    #[serde(default)]
    pub config: Option<GameConfig>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
}

impl CreateRoom {
    /// An online room with the game's default config.
    pub fn new(game_id: impl Into<String>, mode: GameMode) -> Self {
        Self {
            game_id: game_id.into(),
            mode,
            play_type: PlayType::Online,
            config: None,
            display_name: None,
            client_id: None,
        }
    }

    pub fn play_type(mut self, play_type: PlayType) -> Self {
        self.play_type = play_type;
        self
    }

    pub fn config(mut self, config: impl Into<GameConfig>) -> Self {
        self.config = Some(config.into());
        self
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRoom {
    pub room_id: RoomId,
    pub code: RoomCode,
    pub host_player_id: PlayerId,
}

/// Arguments to [`RoomService::join_by_code`](crate::RoomService::join_by_code).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoom {
    #[serde(default)]
    pub display_name: Option<String>,
    /// Replaces the stored device id on re-join when present.
    #[serde(default)]
    pub client_id: Option<String>,
}

impl JoinRoom {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            display_name: Some(name.into()),
            client_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedRoom {
    pub room_id: RoomId,
    pub player_id: PlayerId,
    pub role: PlayerRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartedRoom {
    pub game_id: String,
    pub round: u32,
}
