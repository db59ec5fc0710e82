//! Room lifecycle and game dispatch for ThinkingHat.
//!
//! [`RoomService`] ties the pieces together:
//!
//! ```text
//! caller (Actor) ──→ RoomService ──transact──→ MemoryStore
//!                        │
//!                        ├── session rules (can start? which role?)
//!                        └── GameRegistry ──→ DynEngine (init / reduce)
//! ```
//!
//! Every operation is one store transaction, so concurrent callers never
//! see each other's half-finished writes.

mod config;
mod error;
mod requests;
mod service;

pub use config::RoomServiceConfig;
pub use error::{ErrorKind, RoomError};
pub use requests::{CreateRoom, CreatedRoom, JoinRoom, JoinedRoom, StartedRoom};
pub use service::RoomService;
