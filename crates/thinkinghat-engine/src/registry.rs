//! The registry of available games, built once at startup.

use std::collections::BTreeMap;

use crate::{DynEngine, EngineError, GameDefinition, GameEngine};

/// Every engine the platform can run, keyed by game id.
///
/// Built with [`GameRegistry::builder`]; immutable afterwards.
pub struct GameRegistry {
    engines: BTreeMap<&'static str, Box<dyn DynEngine>>,
}

impl GameRegistry {
    pub fn builder() -> GameRegistryBuilder {
        GameRegistryBuilder::default()
    }

    pub fn get(&self, game_id: &str) -> Option<&dyn DynEngine> {
        self.engines.get(game_id).map(|e| &**e)
    }

    pub fn contains(&self, game_id: &str) -> bool {
        self.engines.contains_key(game_id)
    }

    /// Definitions of every registered game, ordered by id.
    pub fn definitions(&self) -> impl Iterator<Item = &GameDefinition> {
        self.engines.values().map(|e| e.definition())
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}

/// Collects engines, then checks them in [`build`](Self::build).
#[derive(Default)]
pub struct GameRegistryBuilder {
    engines: Vec<Box<dyn DynEngine>>,
}

impl GameRegistryBuilder {
    pub fn register<E: GameEngine>(mut self, engine: E) -> Self {
        self.engines.push(Box::new(engine));
        self
    }

    /// Finishes the registry.
    ///
    /// # Errors
    /// [`EngineError::DuplicateGame`] if two engines share an id.
    pub fn build(self) -> Result<GameRegistry, EngineError> {
        let mut engines = BTreeMap::new();
        for engine in self.engines {
            let id = engine.definition().id;
            if engines.insert(id, engine).is_some() {
                return Err(EngineError::DuplicateGame(id.to_string()));
            }
            tracing::debug!(game_id = id, "game registered");
        }
        Ok(GameRegistry { engines })
    }
}
