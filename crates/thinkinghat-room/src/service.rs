//! The room service: every lobby and gameplay operation as one atomic
//! store transaction.
//!
//! Each write operation follows the same shape:
//!
//! ```text
//! transact(|txn| {
//!     load Room / Player / GameState
//!     check rules (host? status? seat?)
//!     compute the new documents (session rules or engine)
//!     put_* them back
//! })
//! ```
//!
//! A rule violation returns `Err` from the closure, so nothing is written.

use std::sync::Arc;

use thinkinghat_engine::{DynEngine, EngineContext, GameEvent, GameRegistry};
use thinkinghat_protocol::{
    ActionReply, Actor, Category, Codec, GameAction, GameListing, GameStateDoc, GameStatePayload,
    JsonCodec, Player, PublicGameState, Room, RoomCode, RoomId, RoomStatus,
};
use thinkinghat_session::{
    SessionSeat, compute_can_start, default_join_role, default_ready, generate_room_code,
};
use thinkinghat_store::{Change, MemoryStore, Txn};
use tokio::sync::broadcast;

use crate::{
    CreateRoom, CreatedRoom, JoinRoom, JoinedRoom, RoomError, RoomServiceConfig, StartedRoom,
};

/// Runs room operations against a [`MemoryStore`] and a [`GameRegistry`].
///
/// Cheap to clone; clones share the store and registry.
#[derive(Clone)]
pub struct RoomService {
    store: Arc<MemoryStore>,
    registry: Arc<GameRegistry>,
    config: RoomServiceConfig,
    codec: JsonCodec,
}

impl RoomService {
    pub fn new(store: Arc<MemoryStore>, registry: Arc<GameRegistry>) -> Self {
        Self::with_config(store, registry, RoomServiceConfig::default())
    }

    pub fn with_config(
        store: Arc<MemoryStore>,
        registry: Arc<GameRegistry>,
        config: RoomServiceConfig,
    ) -> Self {
        Self {
            store,
            registry,
            config,
            codec: JsonCodec,
        }
    }

    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    fn engine(&self, game_id: &str) -> Result<&dyn DynEngine, RoomError> {
        self.registry
            .get(game_id)
            .ok_or_else(|| RoomError::UnknownGame(game_id.to_string()))
    }

    // -----------------------------------------------------------------------
    // Lobby
    // -----------------------------------------------------------------------

    /// Creates a room in the lobby with the actor as host.
    ///
    /// Also creates the host's player document and a placeholder game
    /// state, so clients can subscribe to both before the game starts.
    pub async fn create_room(
        &self,
        actor: &Actor,
        request: CreateRoom,
    ) -> Result<CreatedRoom, RoomError> {
        let engine = self.engine(&request.game_id)?;
        let definition = engine.definition();
        if !definition.supports(request.mode, request.play_type) {
            return Err(RoomError::Validation(format!(
                "{} does not support {} {} rooms",
                definition.name, request.play_type, request.mode
            )));
        }

        let config = request.config.unwrap_or_else(|| engine.default_config());
        if config.kind() != definition.id {
            return Err(RoomError::Validation(format!(
                "config is for {}, not {}",
                config.kind(),
                definition.id
            )));
        }
        engine.validate_config(&config)?;

        let display_name = self.config.display_name(request.display_name.as_deref());

        let created = self
            .store
            .transact(|txn| {
                let code = self.fresh_code(txn)?;
                let now = txn.now();

                let room_id = txn.allocate_room_id();
                txn.put_room(Room {
                    id: room_id,
                    code: code.clone(),
                    game_id: request.game_id.clone(),
                    mode: request.mode,
                    play_type: request.play_type,
                    host: actor.clone(),
                    status: RoomStatus::Lobby,
                    config,
                    current_round: 0,
                    created_at: now,
                    updated_at: now,
                })?;

                let host_player_id = txn.allocate_player_id();
                let role = default_join_role(request.mode, []);
                txn.put_player(Player {
                    id: host_player_id,
                    room_id,
                    actor: actor.clone(),
                    display_name,
                    role,
                    is_ready: default_ready(request.mode, role),
                    is_connected: true,
                    last_seen_at: now,
                    score: 0,
                    client_id: request.client_id,
                })?;

                txn.put_game_state(GameStateDoc {
                    room_id,
                    game_id: request.game_id.clone(),
                    state: GameStatePayload::Placeholder,
                    round: 0,
                    updated_at: now,
                })?;

                Ok::<_, RoomError>(CreatedRoom {
                    room_id,
                    code,
                    host_player_id,
                })
            })
            .await?;

        tracing::info!(
            room_id = %created.room_id,
            code = %created.code,
            game_id = %request.game_id,
            mode = %request.mode,
            host = %actor,
            "room created"
        );
        Ok(created)
    }

    fn fresh_code(&self, txn: &Txn<'_>) -> Result<RoomCode, RoomError> {
        for _ in 0..self.config.max_code_attempts {
            let candidate = generate_room_code(self.config.code_length);
            if !txn.code_taken(&candidate) {
                return Ok(candidate);
            }
        }
        tracing::warn!(
            attempts = self.config.max_code_attempts,
            "every generated room code collided"
        );
        Err(RoomError::CodeGenerationExhausted)
    }

    /// Joins the room with this code, or refreshes the actor's existing
    /// seat. Joining twice returns the same seat and role.
    pub async fn join_by_code(
        &self,
        actor: &Actor,
        code: &str,
        request: JoinRoom,
    ) -> Result<JoinedRoom, RoomError> {
        let code = RoomCode::normalize(code);

        self.store
            .transact(|txn| {
                let room = txn.room_by_code(&code).ok_or(RoomError::RoomNotFound)?;
                let now = txn.now();

                if let Some(mut player) = txn.player_for_actor(room.id, actor) {
                    player.touch(now);
                    if request.client_id.is_some() {
                        player.client_id = request.client_id;
                    }
                    let joined = JoinedRoom {
                        room_id: room.id,
                        player_id: player.id,
                        role: player.role,
                    };
                    txn.put_player(player)?;
                    tracing::debug!(room_id = %room.id, player_id = %joined.player_id, "player rejoined");
                    return Ok(joined);
                }

                let roles: Vec<_> = txn
                    .players_in_room(room.id)
                    .into_iter()
                    .map(|p| p.role)
                    .collect();
                let role = default_join_role(room.mode, roles);
                let player_id = txn.allocate_player_id();
                txn.put_player(Player {
                    id: player_id,
                    room_id: room.id,
                    actor: actor.clone(),
                    display_name: self.config.display_name(request.display_name.as_deref()),
                    role,
                    is_ready: default_ready(room.mode, role),
                    is_connected: true,
                    last_seen_at: now,
                    score: 0,
                    client_id: request.client_id,
                })?;

                tracing::info!(room_id = %room.id, %player_id, %role, "player joined");
                Ok(JoinedRoom {
                    room_id: room.id,
                    player_id,
                    role,
                })
            })
            .await
    }

    /// Sets the actor's ready flag.
    pub async fn set_ready(
        &self,
        actor: &Actor,
        room_id: RoomId,
        is_ready: bool,
    ) -> Result<(), RoomError> {
        self.store
            .transact(|txn| {
                let mut player = txn
                    .player_for_actor(room_id, actor)
                    .ok_or(RoomError::PlayerNotFound)?;
                player.is_ready = is_ready;
                player.touch(txn.now());
                txn.put_player(player)?;
                Ok(())
            })
            .await
    }

    /// Marks the actor present. Returns `false` if they have no seat.
    pub async fn heartbeat(&self, actor: &Actor, room_id: RoomId) -> Result<bool, RoomError> {
        self.store
            .transact(|txn| {
                let Some(mut player) = txn.player_for_actor(room_id, actor) else {
                    return Ok(false);
                };
                player.touch(txn.now());
                txn.put_player(player)?;
                Ok(true)
            })
            .await
    }

    /// Soft leave: the seat stays, marked disconnected. A missing seat is
    /// not an error.
    pub async fn leave(&self, actor: &Actor, room_id: RoomId) -> Result<(), RoomError> {
        self.store
            .transact(|txn| {
                let Some(mut player) = txn.player_for_actor(room_id, actor) else {
                    return Ok(());
                };
                player.is_connected = false;
                player.last_seen_at = txn.now();
                let player_id = player.id;
                txn.put_player(player)?;
                tracing::info!(%room_id, %player_id, "player left");
                Ok(())
            })
            .await
    }

    /// Starts the game. Host only, lobby only, and the mode's start rules
    /// must pass.
    pub async fn start_room(&self, actor: &Actor, room_id: RoomId) -> Result<StartedRoom, RoomError> {
        let seed = rand::random::<u64>();

        let started = self
            .store
            .transact(|txn| {
                let mut room = txn.room(room_id).ok_or(RoomError::RoomNotFound)?;
                if !room.is_host(actor) {
                    return Err(RoomError::NotHost { action: "start" });
                }
                if room.status != RoomStatus::Lobby {
                    return Err(RoomError::AlreadyStarted);
                }

                let players = txn.players_in_room(room_id);
                let seats: Vec<SessionSeat> = players.iter().map(SessionSeat::from).collect();
                compute_can_start(room.mode, &seats).map_err(RoomError::CannotStart)?;

                let engine = self.engine(&room.game_id)?;
                if txn.game_state(room_id).is_none() {
                    return Err(RoomError::GameStateMissing);
                }

                let content = txn.puzzles(&room.game_id, None);
                let ctx = EngineContext {
                    room: &room,
                    players: &players,
                    actor: Some(actor),
                    content: &content,
                    now: txn.now(),
                    seed,
                };
                let outcome = engine.init(&room.config, &ctx)?;

                txn.put_game_state(GameStateDoc {
                    room_id,
                    game_id: room.game_id.clone(),
                    state: outcome.state,
                    round: outcome.round,
                    updated_at: txn.now(),
                })?;

                let target = if outcome.game_over {
                    RoomStatus::Finished
                } else {
                    RoomStatus::InProgress
                };
                move_to(&mut room, target, txn.now())?;
                room.current_round = outcome.round;
                let started = StartedRoom {
                    game_id: room.game_id.clone(),
                    round: outcome.round,
                };
                txn.put_room(room)?;
                Ok(started)
            })
            .await?;

        tracing::info!(%room_id, game_id = %started.game_id, round = started.round, "room started");
        Ok(started)
    }

    /// Finishes the room early. Host only; a finished room stays finished.
    pub async fn end_room(&self, actor: &Actor, room_id: RoomId) -> Result<(), RoomError> {
        self.store
            .transact(|txn| {
                let mut room = txn.room(room_id).ok_or(RoomError::RoomNotFound)?;
                if !room.is_host(actor) {
                    return Err(RoomError::NotHost { action: "end" });
                }
                if room.status.is_finished() {
                    return Ok(());
                }
                move_to(&mut room, RoomStatus::Finished, txn.now())?;
                txn.put_room(room)?;
                tracing::info!(%room_id, "room ended by host");
                Ok(())
            })
            .await
    }

    // -----------------------------------------------------------------------
    // Gameplay
    // -----------------------------------------------------------------------

    /// Routes a game action to the room's engine and persists the result.
    ///
    /// The state, any score changes, the actor's liveness, and the room's
    /// round and status are all written in one transaction. An action the
    /// engine ignores (`ok: false`) writes nothing, and neither does any
    /// action on a finished room.
    pub async fn dispatch(
        &self,
        actor: &Actor,
        room_id: RoomId,
        action: GameAction,
    ) -> Result<ActionReply, RoomError> {
        let seed = rand::random::<u64>();

        self.store
            .transact(|txn| {
                let mut room = txn.room(room_id).ok_or(RoomError::RoomNotFound)?;
                let player = txn
                    .player_for_actor(room_id, actor)
                    .ok_or(RoomError::NotInRoom)?;
                match room.status {
                    RoomStatus::Lobby => return Err(RoomError::GameNotStarted),
                    RoomStatus::Finished => {
                        tracing::debug!(%room_id, actor = %actor, "action on finished room ignored");
                        return Ok(ActionReply::ignored());
                    }
                    RoomStatus::InProgress => {}
                }
                let mut doc = txn.game_state(room_id).ok_or(RoomError::GameStateMissing)?;
                if doc.state.is_placeholder() {
                    return Err(RoomError::GameNotStarted);
                }
                let engine = self.engine(&room.game_id)?;

                let players = txn.players_in_room(room_id);
                let content = txn.puzzles(&room.game_id, None);
                let now = txn.now();
                let ctx = EngineContext {
                    room: &room,
                    players: &players,
                    actor: Some(actor),
                    content: &content,
                    now,
                    seed,
                };
                let outcome = engine.reduce(&doc.state, action, &ctx)?;

                if !outcome.reply.ok {
                    tracing::debug!(%room_id, player_id = %player.id, "action ignored");
                    return Ok(outcome.reply);
                }

                doc.state = outcome.state;
                doc.round = outcome.round;
                doc.updated_at = now;
                txn.put_game_state(doc)?;

                for event in &outcome.events {
                    match event {
                        GameEvent::ScoreChanged { player_id, score } => {
                            if let Some(mut scored) = txn.player(*player_id) {
                                scored.score = *score;
                                txn.put_player(scored)?;
                            }
                        }
                        GameEvent::RoundEnded { round, winner } => {
                            tracing::info!(%room_id, round, winner = ?winner, "round ended");
                        }
                        GameEvent::RoundStarted { round } => {
                            tracing::info!(%room_id, round, "round started");
                        }
                        GameEvent::GameFinished => {
                            tracing::info!(%room_id, "game finished");
                        }
                    }
                }

                // Re-read: a score event may have just updated this seat.
                if let Some(mut acting) = txn.player(player.id) {
                    acting.touch(now);
                    txn.put_player(acting)?;
                }

                if room.current_round != outcome.round || outcome.game_over {
                    room.current_round = outcome.round;
                    room.updated_at = now;
                    if outcome.game_over {
                        move_to(&mut room, RoomStatus::Finished, now)?;
                    }
                    txn.put_room(room)?;
                }

                Ok(outcome.reply)
            })
            .await
    }

    /// Decodes `bytes` as a [`GameAction`] and dispatches it.
    pub async fn dispatch_encoded(
        &self,
        actor: &Actor,
        room_id: RoomId,
        bytes: &[u8],
    ) -> Result<ActionReply, RoomError> {
        let action: GameAction = self.codec.decode(bytes)?;
        self.dispatch(actor, room_id, action).await
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// The room's game as the actor may see it. `None` until the game has
    /// started.
    pub async fn public_state(
        &self,
        actor: &Actor,
        room_id: RoomId,
    ) -> Result<Option<PublicGameState>, RoomError> {
        self.store
            .read(|txn| {
                let room = txn.room(room_id).ok_or(RoomError::RoomNotFound)?;
                let viewer = txn
                    .player_for_actor(room_id, actor)
                    .ok_or(RoomError::NotInRoom)?;
                let Some(doc) = txn.game_state(room_id) else {
                    return Ok(None);
                };
                if doc.state.is_placeholder() {
                    return Ok(None);
                }

                let engine = self.engine(&room.game_id)?;
                let players = txn.players_in_room(room_id);
                let ctx = EngineContext {
                    room: &room,
                    players: &players,
                    actor: Some(actor),
                    content: &[],
                    now: txn.now(),
                    seed: 0,
                };
                Ok(Some(engine.to_public_state(&doc.state, &ctx, Some(&viewer))?))
            })
            .await
    }

    /// Looks a room up by code, case-insensitively.
    pub async fn room_by_code(&self, code: &str) -> Option<Room> {
        let code = RoomCode::normalize(code);
        self.store.read(|txn| txn.room_by_code(&code)).await
    }

    pub async fn room(&self, room_id: RoomId) -> Option<Room> {
        self.store.read(|txn| txn.room(room_id)).await
    }

    /// Every seat in the room, in join order.
    pub async fn players_by_room(&self, room_id: RoomId) -> Vec<Player> {
        self.store.read(|txn| txn.players_in_room(room_id)).await
    }

    /// The game picker, ordered by `sort_order`.
    pub async fn list_games(&self) -> Vec<GameListing> {
        self.store.games().await
    }

    pub async fn list_categories(&self, game_id: &str) -> Vec<Category> {
        self.store.categories(game_id).await
    }

    /// Committed changes, for pushing updates to clients.
    pub fn subscribe(&self) -> broadcast::Receiver<Change> {
        self.store.subscribe()
    }
}

/// The only place a room's status changes.
fn move_to(room: &mut Room, to: RoomStatus, now: i64) -> Result<(), RoomError> {
    if !room.status.can_transition_to(to) {
        return Err(RoomError::InvalidTransition {
            from: room.status,
            to,
        });
    }
    room.status = to;
    room.updated_at = now;
    Ok(())
}
