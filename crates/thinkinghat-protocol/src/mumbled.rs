//! Mumbled documents: config, state, actions, and the public view.
//!
//! Mumbled shows a phrase spelled as sound-alike words ("Sigh Cub Her
//! Monday") and players race to type the real phrase ("Cyber Monday").

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{PlayerId, PuzzleId};

/// Rounds played when a room doesn't say otherwise.
pub const DEFAULT_TOTAL_ROUNDS: u32 = 5;

fn default_total_rounds() -> u32 {
    DEFAULT_TOTAL_ROUNDS
}

/// Per-room Mumbled settings, chosen by the host at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MumbledConfig {
    #[serde(default = "default_total_rounds")]
    pub total_rounds: u32,
    /// Restricts the puzzle pool to one category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_slug: Option<String>,
}

impl Default for MumbledConfig {
    fn default() -> Self {
        Self {
            total_rounds: DEFAULT_TOTAL_ROUNDS,
            category_slug: None,
        }
    }
}

/// Sub-state of a Mumbled round.
///
/// ```text
/// Playing ──(correct / skip)──→ RoundOver ──(next round)──→ Playing
///    │
///    └──(correct / skip on the final round)──→ Finished
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MumbledPhase {
    Playing,
    RoundOver,
    Finished,
}

impl MumbledPhase {
    /// Whether the current answer may be shown to everyone.
    pub fn is_revealed(self) -> bool {
        matches!(self, Self::RoundOver | Self::Finished)
    }
}

/// The most recent guess, kept for UI feedback ("Bob guessed wrong").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastSubmission {
    pub by_player_id: PlayerId,
    pub by_display_name: String,
    pub correct: bool,
}

/// Full engine state, including the hidden answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MumbledState {
    pub phase: MumbledPhase,
    /// 1-based.
    pub round: u32,
    pub total_rounds: u32,
    pub prompt: String,
    /// Secret until the round is over.
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revealed_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_player_id: Option<PlayerId>,
    /// Append-only, in the order puzzles were served.
    pub used_puzzle_ids: Vec<PuzzleId>,
    /// Only players who have a score appear here.
    pub score_by_player_id: BTreeMap<PlayerId, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_submission: Option<LastSubmission>,
}

impl MumbledState {
    pub fn is_final_round(&self) -> bool {
        self.round >= self.total_rounds
    }
}

/// Everything a client may do in a Mumbled room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MumbledAction {
    /// Any player: guess the phrase.
    SubmitAnswer { answer: String },
    /// Host only: reveal the answer without crediting anyone.
    Skip,
    /// Host only: move from a finished round to the next puzzle.
    NextRound,
}

/// The view of [`MumbledState`] that is safe to hand to any reader.
///
/// There is no `answer` field at all; `revealed_answer` is only filled in
/// once the round is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MumbledPublicState {
    pub phase: MumbledPhase,
    pub round: u32,
    pub total_rounds: u32,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revealed_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_player_id: Option<PlayerId>,
    pub score_by_player_id: BTreeMap<PlayerId, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_submission: Option<LastSubmission>,
    /// The reader's own seat, if they have one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer_player_id: Option<PlayerId>,
}
