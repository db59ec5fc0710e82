//! Transactions: a consistent view of the store plus staged writes.

use thinkinghat_protocol::{
    Actor, Category, GameStateDoc, Player, PlayerId, Puzzle, Room, RoomCode, RoomId,
};

use crate::StoreError;
use crate::tables::{Staged, Tables};

/// One atomic unit of work against the store.
///
/// Reads see committed documents overlaid with this transaction's own
/// staged writes. Writes go nowhere until the closure passed to
/// [`MemoryStore::transact`](crate::MemoryStore::transact) returns `Ok`.
///
/// All reads return owned clones so a caller can modify a document and
/// `put_*` it back.
pub struct Txn<'a> {
    tables: &'a Tables,
    staged: Staged,
    now: i64,
}

impl<'a> Txn<'a> {
    pub(crate) fn new(tables: &'a Tables, now: i64) -> Self {
        Self {
            tables,
            staged: Staged {
                next_room_id: tables.next_room_id,
                next_player_id: tables.next_player_id,
                ..Staged::default()
            },
            now,
        }
    }

    pub(crate) fn into_staged(self) -> Staged {
        self.staged
    }

    /// The transaction's clock, in epoch milliseconds. Fixed for the whole
    /// transaction so every document it writes carries the same timestamp.
    pub fn now(&self) -> i64 {
        self.now
    }

    // -----------------------------------------------------------------------
    // Rooms
    // -----------------------------------------------------------------------

    pub fn room(&self, room_id: RoomId) -> Option<Room> {
        self.staged
            .rooms
            .get(&room_id)
            .or_else(|| self.tables.rooms.get(&room_id))
            .cloned()
    }

    /// Looks a room up by its (already normalized) code.
    pub fn room_by_code(&self, code: &RoomCode) -> Option<Room> {
        if let Some(room) = self.staged.rooms.values().find(|r| r.code == *code) {
            return Some(room.clone());
        }
        let room_id = self.tables.room_by_code.get(code)?;
        // A staged write may have moved the room off this code.
        self.room(*room_id).filter(|r| r.code == *code)
    }

    pub fn code_taken(&self, code: &RoomCode) -> bool {
        self.room_by_code(code).is_some()
    }

    pub fn allocate_room_id(&mut self) -> RoomId {
        let id = RoomId(self.staged.next_room_id);
        self.staged.next_room_id += 1;
        id
    }

    /// Inserts or replaces a room.
    ///
    /// # Errors
    /// [`StoreError::CodeTaken`] if a different room already uses the code.
    pub fn put_room(&mut self, room: Room) -> Result<(), StoreError> {
        if let Some(owner) = self.room_by_code(&room.code) {
            if owner.id != room.id {
                return Err(StoreError::CodeTaken(room.code));
            }
        }
        self.staged.rooms.insert(room.id, room);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Players
    // -----------------------------------------------------------------------

    pub fn player(&self, player_id: PlayerId) -> Option<Player> {
        self.staged
            .players
            .get(&player_id)
            .or_else(|| self.tables.players.get(&player_id))
            .cloned()
    }

    /// Every player in the room, ordered by id (join order).
    pub fn players_in_room(&self, room_id: RoomId) -> Vec<Player> {
        let mut ids: Vec<PlayerId> = self
            .tables
            .players_by_room
            .get(&room_id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        ids.extend(
            self.staged
                .players
                .values()
                .filter(|p| p.room_id == room_id && !self.tables.players.contains_key(&p.id))
                .map(|p| p.id),
        );
        ids.sort();
        ids.into_iter().filter_map(|id| self.player(id)).collect()
    }

    /// The actor's seat in the room, if they have one.
    pub fn player_for_actor(&self, room_id: RoomId, actor: &Actor) -> Option<Player> {
        if let Some(player) = self
            .staged
            .players
            .values()
            .find(|p| p.room_id == room_id && p.actor == *actor)
        {
            return Some(player.clone());
        }
        let id = self.tables.player_by_actor.get(&(room_id, actor.clone()))?;
        self.player(*id)
    }

    pub fn allocate_player_id(&mut self) -> PlayerId {
        let id = PlayerId(self.staged.next_player_id);
        self.staged.next_player_id += 1;
        id
    }

    /// Inserts or replaces a player.
    ///
    /// # Errors
    /// - [`StoreError::RoomMissing`] if the room doesn't exist
    /// - [`StoreError::DuplicatePlayer`] if the actor already has a
    ///   different seat in the room
    pub fn put_player(&mut self, player: Player) -> Result<(), StoreError> {
        if self.room(player.room_id).is_none() {
            return Err(StoreError::RoomMissing(player.room_id));
        }
        if let Some(existing) = self.player_for_actor(player.room_id, &player.actor) {
            if existing.id != player.id {
                return Err(StoreError::DuplicatePlayer {
                    room_id: player.room_id,
                    actor: player.actor,
                });
            }
        }
        self.staged.players.insert(player.id, player);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Game state
    // -----------------------------------------------------------------------

    pub fn game_state(&self, room_id: RoomId) -> Option<GameStateDoc> {
        self.staged
            .game_states
            .get(&room_id)
            .or_else(|| self.tables.game_states.get(&room_id))
            .cloned()
    }

    /// Replaces the room's game state document.
    ///
    /// # Errors
    /// [`StoreError::RoomMissing`] if the room doesn't exist.
    pub fn put_game_state(&mut self, doc: GameStateDoc) -> Result<(), StoreError> {
        if self.room(doc.room_id).is_none() {
            return Err(StoreError::RoomMissing(doc.room_id));
        }
        self.staged.game_states.insert(doc.room_id, doc);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Content (read-only inside transactions)
    // -----------------------------------------------------------------------

    /// The game's content pool, optionally narrowed to one category.
    pub fn puzzles(&self, game_id: &str, category_slug: Option<&str>) -> Vec<Puzzle> {
        let Some(ids) = self.tables.puzzles_by_game.get(game_id) else {
            return Vec::new();
        };
        ids.iter()
            .filter_map(|id| self.tables.puzzles.get(id))
            .filter(|p| category_slug.is_none_or(|slug| p.category_slug.as_deref() == Some(slug)))
            .cloned()
            .collect()
    }

    pub fn categories(&self, game_id: &str) -> Vec<Category> {
        self.tables
            .categories
            .get(game_id)
            .cloned()
            .unwrap_or_default()
    }
}
