//! Codec trait and the JSON implementation.
//!
//! Documents and actions cross two boundaries as bytes: actions arriving
//! from the transport layer, and store snapshots. Both go through a
//! [`Codec`] so the format can be swapped without touching room code.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Turns typed values into bytes and back.
pub trait Codec: Send + Sync + 'static {
    /// Encodes `value`.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Decodes a `T` from `data`.
    ///
    /// # Errors
    /// `ProtocolError::Decode` for malformed bytes, an unknown tag, or a
    /// missing field.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

/// The JSON [`Codec`], backed by `serde_json`.
///
/// ```rust
/// use thinkinghat_protocol::{Codec, GameAction, JsonCodec, MumbledAction};
///
/// let codec = JsonCodec;
/// let action = GameAction::Mumbled(MumbledAction::SubmitAnswer {
///     answer: "cyber monday".into(),
/// });
///
/// let bytes = codec.encode(&action).unwrap();
/// let decoded: GameAction = codec.decode(&bytes).unwrap();
/// assert_eq!(action, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
