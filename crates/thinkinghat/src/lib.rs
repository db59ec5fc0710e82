//! # ThinkingHat
//!
//! Room, session, and puzzle-game core for party word games.
//!
//! Players join a short-lived room by a five-character code, the host
//! starts it once the mode's rules allow, and a game engine runs the rounds.
//! The platform handles actor resolution, room lifecycle, and atomic state
//! updates; each game implements a single
//! [`GameEngine`](thinkinghat_engine::GameEngine) trait.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use thinkinghat::prelude::*;
//!
//! # async fn run() -> Result<(), ThinkingHatError> {
//! thinkinghat::init_tracing("info");
//!
//! let platform = Platform::builder(GuestOnly).build().await?;
//! let host = Credentials::guest("host-device");
//! let created = platform
//!     .create_room(&host, CreateRoom::new("mumbled", GameMode::TwoPlayer))
//!     .await?;
//!
//! let friend = Credentials::guest("friend-device");
//! platform
//!     .join_by_code(&friend, created.code.as_str(), JoinRoom::named("Sam"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod platform;
mod telemetry;

pub use error::ThinkingHatError;
pub use platform::{Platform, PlatformBuilder, PlatformConfig};
pub use telemetry::{DEFAULT_LOG_FILTER, init_tracing};

pub use thinkinghat_engine as engine;
pub use thinkinghat_mumbled as mumbled;
pub use thinkinghat_protocol as protocol;
pub use thinkinghat_room as room;
pub use thinkinghat_session as session;
pub use thinkinghat_store as store;

/// Everything needed to embed the platform or write a game.
pub mod prelude {
    pub use crate::{Platform, PlatformBuilder, PlatformConfig, ThinkingHatError, init_tracing};

    pub use thinkinghat_engine::{
        EngineContext, EngineError, EngineOutcome, GameDefinition, GameEngine, GameEvent,
    };
    pub use thinkinghat_mumbled::MumbledEngine;
    pub use thinkinghat_protocol::{
        ActionReply, Actor, GameAction, GameConfig, GameMode, GameStatePayload, MumbledAction,
        MumbledConfig, MumbledPhase, MumbledPublicState, PlayType, Player, PlayerId, PlayerRole,
        PublicGameState, Room, RoomCode, RoomId, RoomStatus,
    };
    pub use thinkinghat_room::{
        CreateRoom, CreatedRoom, ErrorKind, JoinRoom, JoinedRoom, RoomError, RoomServiceConfig,
        StartedRoom,
    };
    pub use thinkinghat_session::{
        Authenticator, Credentials, GuestOnly, Identity, SessionError,
    };
    pub use thinkinghat_store::{Change, ChangeKind, MemoryStore};
}
