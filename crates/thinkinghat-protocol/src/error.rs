//! Error types for the protocol layer.
//!
//! Each crate in ThinkingHat defines its own error enum. A `ProtocolError`
//! always means the problem is in encoding, decoding, or the shape of a
//! document, never in room rules or storage.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: malformed JSON, an unknown `kind` tag, missing
    /// required fields.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A per-game variant did not match the game it was handed to.
    /// For example, a Mumbled action routed to another game's engine.
    #[error("expected {expected} payload, got {actual}")]
    KindMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}
