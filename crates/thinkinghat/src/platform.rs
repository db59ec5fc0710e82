//! `Platform` builder and request entry points.
//!
//! This is the entry point for embedding ThinkingHat. It ties together all
//! the layers: credentials → session → room service → engine → store.

use std::sync::Arc;

use thinkinghat_engine::{GameEngine, GameRegistry, GameRegistryBuilder};
use thinkinghat_mumbled::{MumbledEngine, default_content};
use thinkinghat_protocol::{
    ActionReply, Category, GameAction, GameListing, MUMBLED_KIND, MumbledAction, Player,
    PublicGameState, Room, RoomId,
};
use thinkinghat_room::{
    CreateRoom, CreatedRoom, JoinRoom, JoinedRoom, RoomService, RoomServiceConfig, StartedRoom,
};
use thinkinghat_session::{ActorResolver, Authenticator, Credentials, ResolvedActor};
use thinkinghat_store::{Change, MemoryStore};
use tokio::sync::broadcast;

use crate::ThinkingHatError;
use crate::telemetry::DEFAULT_LOG_FILTER;

/// Platform-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    pub rooms: RoomServiceConfig,
    /// Load the built-in categories, puzzles, and game catalogue when the
    /// store has no Mumbled content yet.
    pub seed_default_content: bool,
    /// Default `tracing` directive for [`init_tracing`](crate::init_tracing)
    /// when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            rooms: RoomServiceConfig::default(),
            seed_default_content: true,
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}

/// Builder for a [`Platform`].
///
/// Mumbled is registered up front; [`register`](Self::register) adds more
/// games.
///
/// # Example
///
/// ```rust
/// use thinkinghat::prelude::*;
///
/// # async fn run() -> Result<(), ThinkingHatError> {
/// let platform = Platform::builder(GuestOnly).build().await?;
/// let guest = Credentials::guest("device-1234");
/// let created = platform
///     .create_room(&guest, CreateRoom::new("mumbled", GameMode::Single))
///     .await?;
/// platform.start_room(&guest, created.room_id).await?;
/// # Ok(())
/// # }
/// ```
pub struct PlatformBuilder<A: Authenticator> {
    auth: A,
    config: PlatformConfig,
    registry: GameRegistryBuilder,
    store: Option<Arc<MemoryStore>>,
}

impl<A: Authenticator> PlatformBuilder<A> {
    fn new(auth: A) -> Self {
        Self {
            auth,
            config: PlatformConfig::default(),
            registry: GameRegistry::builder().register(MumbledEngine::new()),
            store: None,
        }
    }

    pub fn config(mut self, config: PlatformConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a game. Duplicate ids are reported by [`build`](Self::build).
    pub fn register<E: GameEngine>(mut self, engine: E) -> Self {
        self.registry = self.registry.register(engine);
        self
    }

    /// Uses an existing store, for example one restored from a snapshot.
    pub fn store(mut self, store: Arc<MemoryStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Validates the registry, seeds content if asked, and returns the
    /// platform.
    ///
    /// # Errors
    /// [`ThinkingHatError::Engine`] if two engines share an id.
    pub async fn build(self) -> Result<Platform<A>, ThinkingHatError> {
        let registry = self.registry.build()?;
        let store = self.store.unwrap_or_default();

        if self.config.seed_default_content && !store.has_content(MUMBLED_KIND).await {
            seed_default_content(&store).await;
        }

        tracing::info!(games = registry.len(), "platform ready");
        Ok(Platform {
            resolver: ActorResolver::new(self.auth),
            rooms: RoomService::with_config(store, Arc::new(registry), self.config.rooms),
        })
    }
}

async fn seed_default_content(store: &MemoryStore) {
    let content = default_content();
    for category in content.categories {
        store.put_category(category).await;
    }
    let ids = store.insert_puzzles(content.puzzles).await;
    for game in content.games {
        store.put_game(game).await;
    }
    tracing::info!(puzzles = ids.len(), "seeded default content");
}

/// The ThinkingHat core behind one authenticator.
///
/// Every request method takes the caller's [`Credentials`], resolves them
/// to an actor, and runs one room operation. When a create or join request
/// carries no display name, the identity's profile name is used.
pub struct Platform<A: Authenticator> {
    resolver: ActorResolver<A>,
    rooms: RoomService,
}

impl<A: Authenticator> Platform<A> {
    pub fn builder(auth: A) -> PlatformBuilder<A> {
        PlatformBuilder::new(auth)
    }

    /// The room service, for callers that resolve actors themselves.
    pub fn rooms(&self) -> &RoomService {
        &self.rooms
    }

    pub async fn resolve(&self, credentials: &Credentials) -> Result<ResolvedActor, ThinkingHatError> {
        Ok(self.resolver.resolve(credentials).await?)
    }

    // -----------------------------------------------------------------------
    // Lobby
    // -----------------------------------------------------------------------

    pub async fn create_room(
        &self,
        credentials: &Credentials,
        mut request: CreateRoom,
    ) -> Result<CreatedRoom, ThinkingHatError> {
        let resolved = self.resolve(credentials).await?;
        if request.display_name.is_none() {
            request.display_name = resolved.profile_name;
        }
        Ok(self.rooms.create_room(&resolved.actor, request).await?)
    }

    pub async fn join_by_code(
        &self,
        credentials: &Credentials,
        code: &str,
        mut request: JoinRoom,
    ) -> Result<JoinedRoom, ThinkingHatError> {
        let resolved = self.resolve(credentials).await?;
        if request.display_name.is_none() {
            request.display_name = resolved.profile_name;
        }
        Ok(self.rooms.join_by_code(&resolved.actor, code, request).await?)
    }

    pub async fn set_ready(
        &self,
        credentials: &Credentials,
        room_id: RoomId,
        is_ready: bool,
    ) -> Result<(), ThinkingHatError> {
        let resolved = self.resolve(credentials).await?;
        Ok(self.rooms.set_ready(&resolved.actor, room_id, is_ready).await?)
    }

    pub async fn heartbeat(
        &self,
        credentials: &Credentials,
        room_id: RoomId,
    ) -> Result<bool, ThinkingHatError> {
        let resolved = self.resolve(credentials).await?;
        Ok(self.rooms.heartbeat(&resolved.actor, room_id).await?)
    }

    pub async fn leave(&self, credentials: &Credentials, room_id: RoomId) -> Result<(), ThinkingHatError> {
        let resolved = self.resolve(credentials).await?;
        Ok(self.rooms.leave(&resolved.actor, room_id).await?)
    }

    pub async fn start_room(
        &self,
        credentials: &Credentials,
        room_id: RoomId,
    ) -> Result<StartedRoom, ThinkingHatError> {
        let resolved = self.resolve(credentials).await?;
        Ok(self.rooms.start_room(&resolved.actor, room_id).await?)
    }

    pub async fn end_room(&self, credentials: &Credentials, room_id: RoomId) -> Result<(), ThinkingHatError> {
        let resolved = self.resolve(credentials).await?;
        Ok(self.rooms.end_room(&resolved.actor, room_id).await?)
    }

    // -----------------------------------------------------------------------
    // Gameplay
    // -----------------------------------------------------------------------

    pub async fn dispatch(
        &self,
        credentials: &Credentials,
        room_id: RoomId,
        action: GameAction,
    ) -> Result<ActionReply, ThinkingHatError> {
        let resolved = self.resolve(credentials).await?;
        Ok(self.rooms.dispatch(&resolved.actor, room_id, action).await?)
    }

    /// Dispatches an action that arrived as JSON bytes.
    pub async fn dispatch_encoded(
        &self,
        credentials: &Credentials,
        room_id: RoomId,
        bytes: &[u8],
    ) -> Result<ActionReply, ThinkingHatError> {
        let resolved = self.resolve(credentials).await?;
        Ok(self
            .rooms
            .dispatch_encoded(&resolved.actor, room_id, bytes)
            .await?)
    }

    /// Mumbled: guess the phrase.
    pub async fn submit_answer(
        &self,
        credentials: &Credentials,
        room_id: RoomId,
        answer: impl Into<String>,
    ) -> Result<ActionReply, ThinkingHatError> {
        let action = MumbledAction::SubmitAnswer {
            answer: answer.into(),
        };
        self.dispatch(credentials, room_id, action.into()).await
    }

    /// Mumbled: reveal the answer without crediting anyone. Host only.
    pub async fn skip(&self, credentials: &Credentials, room_id: RoomId) -> Result<ActionReply, ThinkingHatError> {
        self.dispatch(credentials, room_id, MumbledAction::Skip.into())
            .await
    }

    /// Mumbled: move on to the next puzzle. Host only.
    pub async fn next_round(
        &self,
        credentials: &Credentials,
        room_id: RoomId,
    ) -> Result<ActionReply, ThinkingHatError> {
        self.dispatch(credentials, room_id, MumbledAction::NextRound.into())
            .await
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub async fn public_state(
        &self,
        credentials: &Credentials,
        room_id: RoomId,
    ) -> Result<Option<PublicGameState>, ThinkingHatError> {
        let resolved = self.resolve(credentials).await?;
        Ok(self.rooms.public_state(&resolved.actor, room_id).await?)
    }

    pub async fn room_by_code(&self, code: &str) -> Option<Room> {
        self.rooms.room_by_code(code).await
    }

    pub async fn room(&self, room_id: RoomId) -> Option<Room> {
        self.rooms.room(room_id).await
    }

    pub async fn players_by_room(&self, room_id: RoomId) -> Vec<Player> {
        self.rooms.players_by_room(room_id).await
    }

    pub async fn list_games(&self) -> Vec<GameListing> {
        self.rooms.list_games().await
    }

    pub async fn list_categories(&self, game_id: &str) -> Vec<Category> {
        self.rooms.list_categories(game_id).await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Change> {
        self.rooms.subscribe()
    }

    /// Encodes the whole store. Pair with
    /// [`MemoryStore::restore`] and [`PlatformBuilder::store`].
    pub async fn snapshot(&self) -> Result<Vec<u8>, ThinkingHatError> {
        Ok(self.rooms.store().snapshot().await?)
    }
}
