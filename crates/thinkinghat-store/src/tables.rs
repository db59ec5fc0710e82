//! Committed documents and their secondary indexes.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use thinkinghat_protocol::{
    Actor, Category, GameListing, GameStateDoc, Player, PlayerId, Puzzle, PuzzleId, Room,
    RoomCode, RoomId,
};

use crate::{Change, ChangeKind};

/// Writes a transaction staged, applied together on commit.
#[derive(Debug, Default)]
pub(crate) struct Staged {
    pub rooms: BTreeMap<RoomId, Room>,
    pub players: BTreeMap<PlayerId, Player>,
    pub game_states: BTreeMap<RoomId, GameStateDoc>,
    pub next_room_id: u64,
    pub next_player_id: u64,
}

impl Staged {
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty() && self.players.is_empty() && self.game_states.is_empty()
    }
}

/// Everything the store holds, with indexes kept in step with the
/// documents.
#[derive(Debug)]
pub(crate) struct Tables {
    pub rooms: HashMap<RoomId, Room>,
    pub room_by_code: HashMap<RoomCode, RoomId>,

    pub players: HashMap<PlayerId, Player>,
    pub players_by_room: HashMap<RoomId, BTreeSet<PlayerId>>,
    pub player_by_actor: HashMap<(RoomId, Actor), PlayerId>,

    pub game_states: HashMap<RoomId, GameStateDoc>,

    pub puzzles: BTreeMap<PuzzleId, Puzzle>,
    pub puzzles_by_game: HashMap<String, Vec<PuzzleId>>,
    pub categories: HashMap<String, Vec<Category>>,
    pub games: HashMap<String, GameListing>,

    pub next_room_id: u64,
    pub next_player_id: u64,
    pub next_puzzle_id: u64,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            rooms: HashMap::new(),
            room_by_code: HashMap::new(),
            players: HashMap::new(),
            players_by_room: HashMap::new(),
            player_by_actor: HashMap::new(),
            game_states: HashMap::new(),
            puzzles: BTreeMap::new(),
            puzzles_by_game: HashMap::new(),
            categories: HashMap::new(),
            games: HashMap::new(),
            next_room_id: 1,
            next_player_id: 1,
            next_puzzle_id: 1,
        }
    }
}

impl Tables {
    /// Applies staged writes and returns the changes to publish.
    pub fn apply(&mut self, staged: Staged) -> Vec<Change> {
        let mut changes = Vec::new();

        self.next_room_id = staged.next_room_id;
        self.next_player_id = staged.next_player_id;

        for (room_id, room) in staged.rooms {
            self.index_room(room);
            changes.push(Change {
                room_id,
                kind: ChangeKind::Room,
            });
        }

        let mut touched_rooms = BTreeSet::new();
        for (_, player) in staged.players {
            touched_rooms.insert(player.room_id);
            self.index_player(player);
        }
        changes.extend(touched_rooms.into_iter().map(|room_id| Change {
            room_id,
            kind: ChangeKind::Players,
        }));

        for (room_id, doc) in staged.game_states {
            self.game_states.insert(room_id, doc);
            changes.push(Change {
                room_id,
                kind: ChangeKind::GameState,
            });
        }

        changes
    }

    fn index_room(&mut self, room: Room) {
        if let Some(old) = self.rooms.get(&room.id) {
            if old.code != room.code {
                self.room_by_code.remove(&old.code);
            }
        }
        self.room_by_code.insert(room.code.clone(), room.id);
        self.rooms.insert(room.id, room);
    }

    fn index_player(&mut self, player: Player) {
        self.players_by_room
            .entry(player.room_id)
            .or_default()
            .insert(player.id);
        self.player_by_actor
            .insert((player.room_id, player.actor.clone()), player.id);
        self.players.insert(player.id, player);
    }

    pub fn insert_puzzle(&mut self, mut puzzle: Puzzle) -> PuzzleId {
        let id = PuzzleId(self.next_puzzle_id);
        self.next_puzzle_id += 1;
        puzzle.id = id;
        self.puzzles_by_game
            .entry(puzzle.game_id.clone())
            .or_default()
            .push(id);
        self.puzzles.insert(id, puzzle);
        id
    }

    /// Inserts or replaces the category with the same slug.
    pub fn put_category(&mut self, category: Category) {
        let list = self.categories.entry(category.game_id.clone()).or_default();
        match list.iter_mut().find(|c| c.slug == category.slug) {
            Some(existing) => *existing = category,
            None => list.push(category),
        }
    }

    pub fn put_game(&mut self, listing: GameListing) {
        self.games.insert(listing.game_id.clone(), listing);
    }

    pub fn to_snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot {
            rooms: self.rooms.values().cloned().collect(),
            players: self.players.values().cloned().collect(),
            game_states: self.game_states.values().cloned().collect(),
            puzzles: self.puzzles.values().cloned().collect(),
            categories: self.categories.values().flatten().cloned().collect(),
            games: self.games.values().cloned().collect(),
        };
        snapshot.rooms.sort_by_key(|r| r.id);
        snapshot.players.sort_by_key(|p| p.id);
        snapshot.game_states.sort_by_key(|g| g.room_id);
        snapshot
            .categories
            .sort_by(|a, b| (&a.game_id, &a.slug).cmp(&(&b.game_id, &b.slug)));
        snapshot.games.sort_by(|a, b| a.game_id.cmp(&b.game_id));
        snapshot
    }

    /// Rebuilds tables and indexes from a snapshot. Id counters resume
    /// after the highest id seen.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut tables = Self::default();

        for room in snapshot.rooms {
            tables.next_room_id = tables.next_room_id.max(room.id.0 + 1);
            tables.index_room(room);
        }
        for player in snapshot.players {
            tables.next_player_id = tables.next_player_id.max(player.id.0 + 1);
            tables.index_player(player);
        }
        for doc in snapshot.game_states {
            tables.game_states.insert(doc.room_id, doc);
        }
        for puzzle in snapshot.puzzles {
            let id = puzzle.id;
            tables.next_puzzle_id = tables.next_puzzle_id.max(id.0 + 1);
            tables
                .puzzles_by_game
                .entry(puzzle.game_id.clone())
                .or_default()
                .push(id);
            tables.puzzles.insert(id, puzzle);
        }
        for category in snapshot.categories {
            tables.put_category(category);
        }
        for listing in snapshot.games {
            tables.put_game(listing);
        }

        tables
    }
}

/// A flat, serializable copy of the store. Indexes are not included; they
/// are rebuilt on restore.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Snapshot {
    pub rooms: Vec<Room>,
    pub players: Vec<Player>,
    pub game_states: Vec<GameStateDoc>,
    pub puzzles: Vec<Puzzle>,
    pub categories: Vec<Category>,
    pub games: Vec<GameListing>,
}
