//! The game-engine contract for ThinkingHat.
//!
//! Game developers implement [`GameEngine`] and register it:
//!
//! ```text
//! GameRegistry::builder()
//!     .register(MumbledEngine::new())
//!     .build()?        ← rejects duplicate ids
//! ```
//!
//! The room service only ever sees the erased [`DynEngine`], which speaks
//! the protocol's per-game variants.

mod engine;
mod error;
mod registry;

pub use engine::{
    DynEngine, DynOutcome, EngineContext, EngineOutcome, GameDefinition, GameEngine, GameEvent,
};
pub use error::EngineError;
pub use registry::{GameRegistry, GameRegistryBuilder};
