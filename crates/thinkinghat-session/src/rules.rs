//! Pure session rules: who may start, and what seat a newcomer gets.
//!
//! No I/O and no clock. Callers adapt their player documents into
//! [`SessionSeat`]s (or pass roles directly) and act on the answer.

use thinkinghat_protocol::{GameMode, Player, PlayerRole};

/// The slice of a player that the start rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSeat {
    pub role: PlayerRole,
    pub is_ready: bool,
}

impl From<&Player> for SessionSeat {
    fn from(player: &Player) -> Self {
        Self {
            role: player.role,
            is_ready: player.is_ready,
        }
    }
}

/// Why a room can't start yet.
///
/// The messages are shown to the host verbatim, so they are part of the
/// API and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StartBlocker {
    #[error("No player")]
    NoPlayer,
    #[error("Need exactly 2 players")]
    NeedExactlyTwo,
    #[error("Need at least 3 players")]
    NeedAtLeastThree,
    #[error("All players must be ready")]
    NotAllReady,
}

/// Decides whether a room in `mode` may start with these seats.
///
/// Spectators never count. Single mode ignores readiness; the other modes
/// need every participant ready.
pub fn compute_can_start(mode: GameMode, seats: &[SessionSeat]) -> Result<(), StartBlocker> {
    let participants: Vec<&SessionSeat> =
        seats.iter().filter(|s| s.role.is_participant()).collect();
    let all_ready = participants.iter().all(|s| s.is_ready);

    match mode {
        GameMode::Single => {
            if participants.is_empty() {
                return Err(StartBlocker::NoPlayer);
            }
        }
        GameMode::TwoPlayer => {
            if participants.len() != 2 {
                return Err(StartBlocker::NeedExactlyTwo);
            }
            if !all_ready {
                return Err(StartBlocker::NotAllReady);
            }
        }
        GameMode::Party => {
            if participants.len() < 3 {
                return Err(StartBlocker::NeedAtLeastThree);
            }
            if !all_ready {
                return Err(StartBlocker::NotAllReady);
            }
        }
    }
    Ok(())
}

/// The role a newcomer gets, given the roles already in the room.
pub fn default_join_role<I>(mode: GameMode, existing_roles: I) -> PlayerRole
where
    I: IntoIterator<Item = PlayerRole>,
{
    let participants = existing_roles
        .into_iter()
        .filter(|r| r.is_participant())
        .count();

    match (mode, participants) {
        (_, 0) => PlayerRole::Host,
        (GameMode::Single, _) => PlayerRole::Spectator,
        (GameMode::TwoPlayer, 1) => PlayerRole::Player,
        (GameMode::TwoPlayer, _) => PlayerRole::Spectator,
        (GameMode::Party, _) => PlayerRole::Player,
    }
}

/// Initial readiness for a new seat: only participants of a single-player
/// room start ready, since nobody else needs to agree.
pub fn default_ready(mode: GameMode, role: PlayerRole) -> bool {
    mode == GameMode::Single && role.is_participant()
}

/// The host seat, or the first seat if none is marked host.
pub fn pick_host(players: &[Player]) -> Option<&Player> {
    players
        .iter()
        .find(|p| p.role == PlayerRole::Host)
        .or_else(|| players.first())
}
