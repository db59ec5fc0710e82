//! Turn-order helpers for games that take turns.
//!
//! Mumbled is a race and doesn't use these, but they live with the other
//! session rules so any turn-based engine can share them.

use thinkinghat_protocol::PlayerId;

/// The result of advancing a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnAdvance {
    /// `None` only when the order is empty.
    pub active_player_id: Option<PlayerId>,
    /// Index of `active_player_id` within the order.
    pub turn_index: usize,
}

/// Removes duplicates, keeping the first occurrence of each player.
pub fn normalize_turn_order(ids: &[PlayerId]) -> Vec<PlayerId> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// The player who moves first.
pub fn pick_initial_active_player(order: &[PlayerId]) -> Option<PlayerId> {
    order.first().copied()
}

/// Moves the turn to the next player, wrapping around.
///
/// With no current player, or one who isn't in the order (they left), the
/// turn goes to the first player.
pub fn next_active_player_id(order: &[PlayerId], current: Option<PlayerId>) -> TurnAdvance {
    if order.is_empty() {
        return TurnAdvance {
            active_player_id: None,
            turn_index: 0,
        };
    }

    let turn_index = current
        .and_then(|id| order.iter().position(|p| *p == id))
        .map_or(0, |i| (i + 1) % order.len());

    TurnAdvance {
        active_player_id: Some(order[turn_index]),
        turn_index,
    }
}
