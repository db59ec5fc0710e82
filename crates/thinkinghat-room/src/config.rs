//! Room service configuration.

use thinkinghat_protocol::ROOM_CODE_LENGTH;
use thinkinghat_session::MAX_CODE_ATTEMPTS;

/// Tunables for [`RoomService`](crate::RoomService).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomServiceConfig {
    /// Length of generated room codes.
    pub code_length: usize,

    /// Fresh codes tried before `create_room` gives up.
    pub max_code_attempts: usize,

    /// Display names longer than this (in characters) are cut.
    pub max_display_name_len: usize,

    /// Name used when a player gives none and has no profile name.
    pub fallback_display_name: String,
}

impl Default for RoomServiceConfig {
    fn default() -> Self {
        Self {
            code_length: ROOM_CODE_LENGTH,
            max_code_attempts: MAX_CODE_ATTEMPTS,
            max_display_name_len: 32,
            fallback_display_name: "Player".into(),
        }
    }
}

impl RoomServiceConfig {
    /// Trims `requested`, falls back when it is blank, and caps the length.
    pub fn display_name(&self, requested: Option<&str>) -> String {
        let name = requested
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.fallback_display_name);
        name.chars().take(self.max_display_name_len).collect()
    }
}
