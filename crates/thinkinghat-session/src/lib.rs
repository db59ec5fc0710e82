//! Session rules for ThinkingHat.
//!
//! Everything here is pure or nearly so; the room service calls in and
//! applies the answers to stored documents:
//!
//! 1. **Actor resolution**: who is acting ([`Authenticator`],
//!    [`ActorResolver`], [`resolve_actor`])
//! 2. **Room codes**: short join codes ([`generate_room_code`])
//! 3. **Lobby rules**: seat assignment and start gating
//!    ([`default_join_role`], [`compute_can_start`])
//! 4. **Turn order**: for turn-based engines ([`next_active_player_id`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Room service (above)  ← asks who is acting and whether a room may start
//!     ↕
//! Session layer (this crate)
//!     ↕
//! Protocol layer (below)  ← provides Actor, Player, GameMode
//! ```

#![allow(async_fn_in_trait)]

mod auth;
mod code;
mod error;
mod rules;
mod turns;

pub use auth::{
    ActorResolver, Authenticator, Credentials, GuestOnly, Identity, ResolvedActor, resolve_actor,
};
pub use code::{MAX_CODE_ATTEMPTS, generate_room_code};
pub use error::SessionError;
pub use rules::{
    SessionSeat, StartBlocker, compute_can_start, default_join_role, default_ready, pick_host,
};
pub use turns::{TurnAdvance, next_active_player_id, normalize_turn_order, pick_initial_active_player};
