//! Unified error type for the ThinkingHat core.

use thinkinghat_engine::EngineError;
use thinkinghat_protocol::ProtocolError;
use thinkinghat_room::{ErrorKind, RoomError};
use thinkinghat_session::SessionError;
use thinkinghat_store::StoreError;

/// Top-level error that wraps all crate-specific errors.
///
/// Callers of [`Platform`](crate::Platform) deal with this single type.
/// `#[from]` on each variant lets `?` convert sub-crate errors.
#[derive(Debug, thiserror::Error)]
pub enum ThinkingHatError {
    /// Encoding or decoding failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// No actor could be resolved for the request.
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Engine registration or a direct engine call failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A room operation was refused.
    #[error(transparent)]
    Room(#[from] RoomError),
}

impl ThinkingHatError {
    /// Classifies the error for a transport's status codes.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Protocol(_) => ErrorKind::Validation,
            Self::Session(SessionError::Unauthorized | SessionError::AuthFailed(_)) => {
                ErrorKind::Unauthorized
            }
            Self::Store(_) => ErrorKind::Internal,
            Self::Engine(e) => RoomError::kind_of_engine(e),
            Self::Room(e) => e.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use thinkinghat_protocol::RoomId;

    use super::*;

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::KindMismatch {
            expected: "mumbled",
            actual: "placeholder",
        };
        let th_err: ThinkingHatError = err.into();
        assert!(matches!(th_err, ThinkingHatError::Protocol(_)));
        assert!(th_err.to_string().contains("placeholder"));
    }

    #[test]
    fn test_from_session_error() {
        let th_err: ThinkingHatError = SessionError::Unauthorized.into();
        assert!(matches!(th_err, ThinkingHatError::Session(_)));
        assert_eq!(th_err.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_from_store_error() {
        let th_err: ThinkingHatError = StoreError::RoomMissing(RoomId(7)).into();
        assert!(matches!(th_err, ThinkingHatError::Store(_)));
        assert_eq!(th_err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_from_engine_error() {
        let th_err: ThinkingHatError = EngineError::DuplicateGame("mumbled".into()).into();
        assert!(matches!(th_err, ThinkingHatError::Engine(_)));
        assert_eq!(th_err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_from_room_error() {
        let th_err: ThinkingHatError = RoomError::RoomNotFound.into();
        assert!(matches!(th_err, ThinkingHatError::Room(_)));
        assert_eq!(th_err.to_string(), "Room not found");
        assert_eq!(th_err.kind(), ErrorKind::NotFound);
    }
}
