//! Error types for the session layer.

/// Errors that can occur while working out who is acting.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No authenticated identity and no guest id: there is nobody to act as.
    #[error("Unauthorized")]
    Unauthorized,

    /// The [`Authenticator`](crate::Authenticator) rejected a token.
    ///
    /// The resolver treats this like a missing token and falls back to the
    /// guest id, so callers normally only see it from the authenticator
    /// itself.
    #[error("authentication failed: {0}")]
    AuthFailed(String),
}
