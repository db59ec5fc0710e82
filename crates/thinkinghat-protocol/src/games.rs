//! Per-game variants that cross the session/engine boundary.
//!
//! The store holds these without looking inside; the session layer only
//! reads the `kind` tag. Each supported game contributes one variant, and
//! the engine for that game converts to and from its own typed values.
//!
//! Adjacent tagging (`{"kind": ..., "state": {...}}`) is used so the tag is
//! always written first and decoding never has to buffer the payload.

use serde::{Deserialize, Serialize};

use crate::{MumbledAction, MumbledConfig, MumbledPublicState, MumbledState, ProtocolError};

pub const MUMBLED_KIND: &str = "mumbled";
pub const PLACEHOLDER_KIND: &str = "placeholder";

// ---------------------------------------------------------------------------
// GameConfig
// ---------------------------------------------------------------------------

/// Room configuration, one variant per game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "config", rename_all = "camelCase")]
pub enum GameConfig {
    Mumbled(MumbledConfig),
}

impl GameConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Mumbled(_) => MUMBLED_KIND,
        }
    }
}

impl From<MumbledConfig> for GameConfig {
    fn from(config: MumbledConfig) -> Self {
        Self::Mumbled(config)
    }
}

impl TryFrom<GameConfig> for MumbledConfig {
    type Error = ProtocolError;

    fn try_from(value: GameConfig) -> Result<Self, Self::Error> {
        match value {
            GameConfig::Mumbled(config) => Ok(config),
        }
    }
}

// ---------------------------------------------------------------------------
// GameStatePayload
// ---------------------------------------------------------------------------

/// The opaque state blob of a room's game.
///
/// `Placeholder` exists from room creation so subscribers can attach before
/// the host starts; the engine's `init` replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "state", rename_all = "camelCase")]
pub enum GameStatePayload {
    Placeholder,
    Mumbled(MumbledState),
}

impl GameStatePayload {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Placeholder => PLACEHOLDER_KIND,
            Self::Mumbled(_) => MUMBLED_KIND,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

impl From<MumbledState> for GameStatePayload {
    fn from(state: MumbledState) -> Self {
        Self::Mumbled(state)
    }
}

impl TryFrom<GameStatePayload> for MumbledState {
    type Error = ProtocolError;

    fn try_from(value: GameStatePayload) -> Result<Self, Self::Error> {
        match value {
            GameStatePayload::Mumbled(state) => Ok(state),
            other => Err(ProtocolError::KindMismatch {
                expected: MUMBLED_KIND,
                actual: other.kind(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// GameAction
// ---------------------------------------------------------------------------

/// A client action addressed to a room's engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game", content = "action", rename_all = "camelCase")]
pub enum GameAction {
    Mumbled(MumbledAction),
}

impl GameAction {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Mumbled(_) => MUMBLED_KIND,
        }
    }
}

impl From<MumbledAction> for GameAction {
    fn from(action: MumbledAction) -> Self {
        Self::Mumbled(action)
    }
}

impl TryFrom<GameAction> for MumbledAction {
    type Error = ProtocolError;

    fn try_from(value: GameAction) -> Result<Self, Self::Error> {
        match value {
            GameAction::Mumbled(action) => Ok(action),
        }
    }
}

// ---------------------------------------------------------------------------
// PublicGameState
// ---------------------------------------------------------------------------

/// What any reader of a room may see. Secrets are already stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "state", rename_all = "camelCase")]
pub enum PublicGameState {
    Mumbled(MumbledPublicState),
}

impl From<MumbledPublicState> for PublicGameState {
    fn from(state: MumbledPublicState) -> Self {
        Self::Mumbled(state)
    }
}

// ---------------------------------------------------------------------------
// ActionReply
// ---------------------------------------------------------------------------

/// The result handed back to the client that sent a game action.
///
/// `ok: false` means "nothing happened" and deliberately says nothing about
/// why, so a wrong-phase action can't be used to probe the game's phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReply {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
}

impl ActionReply {
    /// The action was not applicable right now.
    pub fn ignored() -> Self {
        Self {
            ok: false,
            correct: None,
        }
    }

    /// The action was applied.
    pub fn accepted() -> Self {
        Self {
            ok: true,
            correct: None,
        }
    }

    /// An answer was judged.
    pub fn answered(correct: bool) -> Self {
        Self {
            ok: true,
            correct: Some(correct),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::{MumbledPhase, PlayerId, PuzzleId};

    fn sample_state() -> MumbledState {
        MumbledState {
            phase: MumbledPhase::Playing,
            round: 1,
            total_rounds: 3,
            prompt: "Chew Day".into(),
            answer: "Tuesday".into(),
            revealed_answer: None,
            winner_player_id: None,
            used_puzzle_ids: vec![PuzzleId(4)],
            score_by_player_id: BTreeMap::from([(PlayerId(1), 2)]),
            category_slug: None,
            last_submission: None,
        }
    }

    #[test]
    fn test_placeholder_serializes_as_kind_only() {
        let json = serde_json::to_value(GameStatePayload::Placeholder).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "placeholder" }));
    }

    #[test]
    fn test_state_payload_survives_json_with_numeric_map_keys() {
        let payload = GameStatePayload::from(sample_state());
        let json = serde_json::to_string(&payload).unwrap();
        let back: GameStatePayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn test_try_from_placeholder_reports_kind_mismatch() {
        let err = MumbledState::try_from(GameStatePayload::Placeholder).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::KindMismatch {
                expected: "mumbled",
                actual: "placeholder"
            }
        ));
    }

    #[test]
    fn test_config_defaults_total_rounds_when_missing() {
        let config: GameConfig =
            serde_json::from_str(r#"{"kind":"mumbled","config":{}}"#).unwrap();
        assert_eq!(config, GameConfig::Mumbled(MumbledConfig::default()));
    }

    #[test]
    fn test_action_reply_ignored_omits_correct() {
        let json = serde_json::to_value(ActionReply::ignored()).unwrap();
        assert_eq!(json, serde_json::json!({ "ok": false }));
        let json = serde_json::to_value(ActionReply::answered(true)).unwrap();
        assert_eq!(json, serde_json::json!({ "ok": true, "correct": true }));
    }
}
