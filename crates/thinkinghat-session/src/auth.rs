//! Actor resolution: turning request credentials into an [`Actor`].
//!
//! ThinkingHat doesn't verify tokens itself. The identity provider (Clerk,
//! Auth0, a custom JWT service) sits behind the [`Authenticator`] trait;
//! this module only decides which actor a request speaks for.
//!
//! Resolution order:
//!
//! ```text
//! token accepted by authenticator ──→ Actor::User { subject }
//!          │ (no token / rejected)
//!          ▼
//! non-empty guest id ──────────────→ Actor::Guest { guest_id }
//!          │ (none)
//!          ▼
//!   SessionError::Unauthorized
//! ```

use thinkinghat_protocol::Actor;

use crate::SessionError;

/// A verified identity, as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Stable subject id. Becomes the `user_id` of the actor.
    pub subject: String,
    /// Profile name, used when a player doesn't pick a display name.
    pub name: Option<String>,
}

impl Identity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Verifies a client's token and returns who they are.
///
/// One authenticator serves every request the platform handles.
///
/// # Example
///
/// ```rust
/// use thinkinghat_session::{Authenticator, Identity, SessionError};
///
/// /// Trusts any token of the form "user:<id>". Development only.
/// struct DevAuthenticator;
///
/// impl Authenticator for DevAuthenticator {
///     async fn authenticate(&self, token: &str) -> Result<Identity, SessionError> {
///         token
///             .strip_prefix("user:")
///             .map(Identity::new)
///             .ok_or_else(|| SessionError::AuthFailed("unknown token".into()))
///     }
/// }
/// ```
pub trait Authenticator: Send + Sync + 'static {
    /// Validates the token.
    ///
    /// # Returns
    /// - `Ok(Identity)` if the token is valid
    /// - `Err(SessionError::AuthFailed)` if it is invalid or expired
    fn authenticate(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<Identity, SessionError>> + Send;
}

/// An authenticator for deployments without an identity provider: every
/// token is rejected, so only guests can play.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuestOnly;

impl Authenticator for GuestOnly {
    async fn authenticate(&self, _token: &str) -> Result<Identity, SessionError> {
        Err(SessionError::AuthFailed(
            "identity tokens are not accepted".into(),
        ))
    }
}

/// What a request carries about its sender.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: Option<String>,
    pub guest_id: Option<String>,
}

impl Credentials {
    pub fn token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            guest_id: None,
        }
    }

    pub fn guest(guest_id: impl Into<String>) -> Self {
        Self {
            token: None,
            guest_id: Some(guest_id.into()),
        }
    }
}

/// The outcome of resolving a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedActor {
    pub actor: Actor,
    /// The identity's profile name, if the actor is an authenticated user.
    pub profile_name: Option<String>,
}

/// Picks the actor for an already-verified identity and an optional guest
/// id. Pure: same inputs, same actor.
///
/// # Errors
/// [`SessionError::Unauthorized`] when there is neither an identity nor a
/// non-empty guest id.
pub fn resolve_actor(
    identity: Option<&Identity>,
    guest_id: Option<&str>,
) -> Result<Actor, SessionError> {
    if let Some(identity) = identity {
        return Ok(Actor::user(identity.subject.clone()));
    }
    match guest_id {
        Some(id) if !id.is_empty() => Ok(Actor::guest(id)),
        _ => Err(SessionError::Unauthorized),
    }
}

/// Resolves request credentials through an [`Authenticator`].
///
/// Nothing is cached: each call asks the authenticator again.
pub struct ActorResolver<A: Authenticator> {
    auth: A,
}

impl<A: Authenticator> ActorResolver<A> {
    pub fn new(auth: A) -> Self {
        Self { auth }
    }

    /// Resolves the actor for one request.
    ///
    /// A token the authenticator rejects counts as no token at all, so a
    /// guest with a stale token can still play as a guest.
    pub async fn resolve(&self, credentials: &Credentials) -> Result<ResolvedActor, SessionError> {
        let identity = match credentials.token.as_deref() {
            Some(token) => match self.auth.authenticate(token).await {
                Ok(identity) => Some(identity),
                Err(e) => {
                    tracing::debug!(error = %e, "token rejected, falling back to guest id");
                    None
                }
            },
            None => None,
        };

        let actor = resolve_actor(identity.as_ref(), credentials.guest_id.as_deref())?;
        Ok(ResolvedActor {
            actor,
            profile_name: identity.and_then(|i| i.name),
        })
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts "user:<id>" tokens, names everyone "Tester".
    struct PrefixAuth;

    impl Authenticator for PrefixAuth {
        async fn authenticate(&self, token: &str) -> Result<Identity, SessionError> {
            token
                .strip_prefix("user:")
                .map(|id| Identity::new(id).with_name("Tester"))
                .ok_or_else(|| SessionError::AuthFailed("bad token".into()))
        }
    }

    #[test]
    fn test_resolve_actor_identity_wins_over_guest_id() {
        let identity = Identity::new("u_1");
        let actor = resolve_actor(Some(&identity), Some("g_1")).unwrap();
        assert_eq!(actor, Actor::user("u_1"));
    }

    #[test]
    fn test_resolve_actor_guest_without_identity() {
        let actor = resolve_actor(None, Some("g_1")).unwrap();
        assert_eq!(actor, Actor::guest("g_1"));
    }

    #[test]
    fn test_resolve_actor_nothing_is_unauthorized() {
        assert!(matches!(
            resolve_actor(None, None),
            Err(SessionError::Unauthorized)
        ));
        assert!(matches!(
            resolve_actor(None, Some("")),
            Err(SessionError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_resolver_valid_token_yields_user_with_profile_name() {
        let resolver = ActorResolver::new(PrefixAuth);
        let resolved = resolver
            .resolve(&Credentials {
                token: Some("user:abc".into()),
                guest_id: Some("g_9".into()),
            })
            .await
            .unwrap();
        assert_eq!(resolved.actor, Actor::user("abc"));
        assert_eq!(resolved.profile_name.as_deref(), Some("Tester"));
    }

    #[tokio::test]
    async fn test_resolver_rejected_token_falls_back_to_guest() {
        let resolver = ActorResolver::new(PrefixAuth);
        let resolved = resolver
            .resolve(&Credentials {
                token: Some("garbage".into()),
                guest_id: Some("g_9".into()),
            })
            .await
            .unwrap();
        assert_eq!(resolved.actor, Actor::guest("g_9"));
        assert_eq!(resolved.profile_name, None);
    }

    #[tokio::test]
    async fn test_resolver_rejected_token_without_guest_is_unauthorized() {
        let resolver = ActorResolver::new(GuestOnly);
        let result = resolver.resolve(&Credentials::token("user:abc")).await;
        assert!(matches!(result, Err(SessionError::Unauthorized)));
    }
}
