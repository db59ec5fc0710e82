//! The `GameEngine` trait: the extension point for adding a game.
//!
//! An engine is a set of pure functions over its own typed state. It
//! never touches the store: the room service loads everything the engine
//! may look at into an [`EngineContext`], calls the engine, and writes the
//! returned state back inside the same transaction.

use thinkinghat_protocol::{
    ActionReply, Actor, GameAction, GameConfig, GameMode, GameStatePayload, PlayType, Player,
    PlayerId, ProtocolError, PublicGameState, Puzzle, Room,
};

use crate::EngineError;

/// Static facts about a game, used for validation and the game picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDefinition {
    /// Registry key, and the `kind` tag of the game's variants.
    pub id: &'static str,
    pub name: &'static str,
    pub supported_modes: &'static [GameMode],
    pub supported_play_types: &'static [PlayType],
    /// Slugs of the content categories the game ships with.
    pub categories: &'static [&'static str],
}

impl GameDefinition {
    pub fn supports(&self, mode: GameMode, play_type: PlayType) -> bool {
        self.supported_modes.contains(&mode) && self.supported_play_types.contains(&play_type)
    }
}

/// Everything an engine may read while handling one operation.
#[derive(Debug, Clone, Copy)]
pub struct EngineContext<'a> {
    pub room: &'a Room,
    /// Every player in the room, spectators included, in join order.
    pub players: &'a [Player],
    /// Who is acting. `None` for system-initiated calls.
    pub actor: Option<&'a Actor>,
    /// The game's content pool.
    pub content: &'a [Puzzle],
    /// Epoch milliseconds, fixed for the operation.
    pub now: i64,
    /// Per-operation random seed. Engines seed their own RNG from it so a
    /// test can replay an operation exactly.
    pub seed: u64,
}

impl<'a> EngineContext<'a> {
    /// The acting actor's player document, if they have one.
    pub fn acting_player(&self) -> Option<&'a Player> {
        let actor = self.actor?;
        self.players.iter().find(|p| p.actor == *actor)
    }

    /// Whether the acting actor is the room's host.
    pub fn actor_is_host(&self) -> bool {
        self.actor.is_some_and(|a| self.room.is_host(a))
    }
}

/// Something that happened during `reduce` that the session layer must
/// mirror onto other documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The player's total score is now `score`.
    ScoreChanged { player_id: PlayerId, score: u32 },
    RoundEnded {
        round: u32,
        winner: Option<PlayerId>,
    },
    RoundStarted { round: u32 },
    GameFinished,
}

/// The result of [`GameEngine::reduce`].
#[derive(Debug, Clone)]
pub struct EngineOutcome<S> {
    pub state: S,
    pub reply: ActionReply,
    pub events: Vec<GameEvent>,
}

impl<S> EngineOutcome<S> {
    /// The action didn't apply; `state` is returned unchanged.
    pub fn ignored(state: S) -> Self {
        Self {
            state,
            reply: ActionReply::ignored(),
            events: Vec::new(),
        }
    }
}

/// The core trait that game developers implement.
///
/// Each associated type maps onto one of the protocol's per-game variants,
/// so the registry can carry any engine behind [`DynEngine`]:
///
/// | Associated type | Protocol variant |
/// |---|---|
/// | `Config` | [`GameConfig`] |
/// | `State` | [`GameStatePayload`] |
/// | `Action` | [`GameAction`] |
/// | `PublicState` | [`PublicGameState`] |
pub trait GameEngine: Send + Sync + 'static {
    /// Per-room settings. `Default` is used when a room is created
    /// without a config.
    type Config: Clone + Default + Into<GameConfig> + TryFrom<GameConfig, Error = ProtocolError>;
    type State: Clone + Into<GameStatePayload> + TryFrom<GameStatePayload, Error = ProtocolError>;
    type Action: TryFrom<GameAction, Error = ProtocolError>;
    type PublicState: Into<PublicGameState>;

    fn definition(&self) -> &GameDefinition;

    /// Checks a room's config at creation. Default: accept everything.
    fn validate_config(&self, _config: &Self::Config) -> Result<(), EngineError> {
        Ok(())
    }

    /// Builds the first state when the host starts the room.
    fn init(
        &self,
        config: &Self::Config,
        ctx: &EngineContext<'_>,
    ) -> Result<Self::State, EngineError>;

    /// Applies one action.
    ///
    /// Returns `Err` for structural problems (the caller isn't in the room,
    /// a host-only action from a non-host). An action that simply doesn't
    /// apply in the current phase returns [`EngineOutcome::ignored`].
    fn reduce(
        &self,
        state: &Self::State,
        action: Self::Action,
        ctx: &EngineContext<'_>,
    ) -> Result<EngineOutcome<Self::State>, EngineError>;

    /// The view of `state` that `viewer` may see. Must never leak secrets.
    fn to_public_state(
        &self,
        state: &Self::State,
        ctx: &EngineContext<'_>,
        viewer: Option<&Player>,
    ) -> Self::PublicState;

    fn is_round_over(&self, _state: &Self::State) -> bool {
        false
    }

    /// When this returns `true` after `reduce`, the room is finished.
    fn is_game_over(&self, _state: &Self::State) -> bool {
        false
    }

    /// The 1-based round the state is in.
    fn round(&self, state: &Self::State) -> u32;
}

// ---------------------------------------------------------------------------
// Type erasure
// ---------------------------------------------------------------------------

/// What the room service gets back from an erased engine call.
#[derive(Debug, Clone)]
pub struct DynOutcome {
    pub state: GameStatePayload,
    pub reply: ActionReply,
    pub events: Vec<GameEvent>,
    pub round: u32,
    pub game_over: bool,
}

/// A [`GameEngine`] with its associated types erased to protocol variants.
///
/// Implemented for every `GameEngine`; the registry stores engines as
/// `Box<dyn DynEngine>`.
pub trait DynEngine: Send + Sync {
    fn definition(&self) -> &GameDefinition;

    fn default_config(&self) -> GameConfig;

    fn validate_config(&self, config: &GameConfig) -> Result<(), EngineError>;

    fn init(&self, config: &GameConfig, ctx: &EngineContext<'_>) -> Result<DynOutcome, EngineError>;

    fn reduce(
        &self,
        state: &GameStatePayload,
        action: GameAction,
        ctx: &EngineContext<'_>,
    ) -> Result<DynOutcome, EngineError>;

    fn to_public_state(
        &self,
        state: &GameStatePayload,
        ctx: &EngineContext<'_>,
        viewer: Option<&Player>,
    ) -> Result<PublicGameState, EngineError>;
}

impl<E: GameEngine> DynEngine for E {
    fn definition(&self) -> &GameDefinition {
        GameEngine::definition(self)
    }

    fn default_config(&self) -> GameConfig {
        E::Config::default().into()
    }

    fn validate_config(&self, config: &GameConfig) -> Result<(), EngineError> {
        let config = E::Config::try_from(config.clone())?;
        GameEngine::validate_config(self, &config)
    }

    fn init(&self, config: &GameConfig, ctx: &EngineContext<'_>) -> Result<DynOutcome, EngineError> {
        let config = E::Config::try_from(config.clone())?;
        let state = GameEngine::init(self, &config, ctx)?;
        Ok(DynOutcome {
            round: self.round(&state),
            game_over: self.is_game_over(&state),
            state: state.into(),
            reply: ActionReply::accepted(),
            events: Vec::new(),
        })
    }

    fn reduce(
        &self,
        state: &GameStatePayload,
        action: GameAction,
        ctx: &EngineContext<'_>,
    ) -> Result<DynOutcome, EngineError> {
        let state = E::State::try_from(state.clone())?;
        let action = E::Action::try_from(action)?;
        let outcome = GameEngine::reduce(self, &state, action, ctx)?;
        Ok(DynOutcome {
            round: self.round(&outcome.state),
            game_over: self.is_game_over(&outcome.state),
            state: outcome.state.into(),
            reply: outcome.reply,
            events: outcome.events,
        })
    }

    fn to_public_state(
        &self,
        state: &GameStatePayload,
        ctx: &EngineContext<'_>,
        viewer: Option<&Player>,
    ) -> Result<PublicGameState, EngineError> {
        let state = E::State::try_from(state.clone())?;
        Ok(GameEngine::to_public_state(self, &state, ctx, viewer).into())
    }
}
