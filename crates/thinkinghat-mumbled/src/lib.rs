//! Mumbled for ThinkingHat.
//!
//! Each round shows a phrase spelled as sound-alike words ("Sigh Cub Her
//! Monday"). The first player to type the real phrase ("Cyber Monday")
//! scores a point. The host can skip a round or move on to the next one.
//!
//! ```rust
//! use thinkinghat_engine::GameRegistry;
//! use thinkinghat_mumbled::MumbledEngine;
//!
//! let registry = GameRegistry::builder()
//!     .register(MumbledEngine::new())
//!     .build()
//!     .unwrap();
//! assert!(registry.contains("mumbled"));
//! ```

mod answer;
mod content;
mod engine;
mod selection;

pub use answer::{answers_match, normalize_answer};
pub use content::{DEFAULT_CATEGORY_SLUG, DefaultContent, default_content};
pub use engine::{MAX_TOTAL_ROUNDS, MumbledEngine};
pub use selection::pick_puzzle;
