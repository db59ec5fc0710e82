//! The in-memory store: one mutex around all tables, one change feed.

use chrono::Utc;
use thinkinghat_protocol::{
    Category, Codec, GameListing, JsonCodec, NewPuzzle, Puzzle, PuzzleId,
};
use tokio::sync::{Mutex, broadcast};

use crate::tables::{Snapshot, Tables};
use crate::{Change, StoreError, Txn};

/// Capacity of the change feed. A subscriber that falls further behind
/// than this gets `RecvError::Lagged` and should re-read what it shows.
pub const DEFAULT_CHANGE_CAPACITY: usize = 256;

/// An in-memory document store with atomic read-modify-write.
///
/// Every operation runs inside [`transact`](Self::transact), which holds the
/// store lock for the whole closure. Transactions therefore never
/// interleave, and a check made inside one (for example "has this round
/// already been won?") still holds when its writes commit.
///
/// ```text
/// transact(f)
///   ├── lock tables
///   ├── f(&mut Txn)     reads see committed docs + own staged writes
///   ├── Ok  → apply staged writes, publish changes
///   └── Err → drop staged writes
/// ```
pub struct MemoryStore {
    tables: Mutex<Tables>,
    changes: broadcast::Sender<Change>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_tables(Tables::default())
    }

    fn with_tables(tables: Tables) -> Self {
        let (changes, _) = broadcast::channel(DEFAULT_CHANGE_CAPACITY);
        Self {
            tables: Mutex::new(tables),
            changes,
        }
    }

    /// Runs `f` atomically.
    ///
    /// Staged writes are committed only if `f` returns `Ok`; on `Err`
    /// nothing it wrote is kept.
    pub async fn transact<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Txn<'_>) -> Result<T, E>,
    {
        let mut tables = self.tables.lock().await;
        let now = Utc::now().timestamp_millis();

        let (result, staged) = {
            let mut txn = Txn::new(&tables, now);
            let result = f(&mut txn);
            (result, txn.into_staged())
        };

        if result.is_ok() && !staged.is_empty() {
            let changes = tables.apply(staged);
            drop(tables);
            for change in changes {
                // No subscribers is fine; the feed is best-effort.
                let _ = self.changes.send(change);
            }
        }

        result
    }

    /// Runs a read-only closure against committed state.
    pub async fn read<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&Txn<'_>) -> T,
    {
        let tables = self.tables.lock().await;
        let txn = Txn::new(&tables, Utc::now().timestamp_millis());
        f(&txn)
    }

    /// Subscribes to committed changes.
    pub fn subscribe(&self) -> broadcast::Receiver<Change> {
        self.changes.subscribe()
    }

    // -----------------------------------------------------------------------
    // Content catalogue
    // -----------------------------------------------------------------------

    /// Adds puzzles to the content pool and returns their ids.
    pub async fn insert_puzzles(&self, puzzles: Vec<NewPuzzle>) -> Vec<PuzzleId> {
        let now = Utc::now().timestamp_millis();
        let mut tables = self.tables.lock().await;
        puzzles
            .into_iter()
            .map(|p| {
                tables.insert_puzzle(Puzzle {
                    id: PuzzleId(0),
                    game_id: p.game_id,
                    category_slug: p.category_slug,
                    difficulty: p.difficulty,
                    data: p.data,
                    answer: p.answer,
                    created_at: now,
                })
            })
            .collect()
    }

    pub async fn put_category(&self, category: Category) {
        self.tables.lock().await.put_category(category);
    }

    pub async fn put_game(&self, listing: GameListing) {
        self.tables.lock().await.put_game(listing);
    }

    /// Every game listing, ordered by `sort_order` then id.
    pub async fn games(&self) -> Vec<GameListing> {
        let tables = self.tables.lock().await;
        let mut games: Vec<GameListing> = tables.games.values().cloned().collect();
        games.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.game_id.cmp(&b.game_id))
        });
        games
    }

    pub async fn categories(&self, game_id: &str) -> Vec<Category> {
        self.read(|txn| txn.categories(game_id)).await
    }

    /// Whether the content pool for `game_id` has any puzzles.
    pub async fn has_content(&self, game_id: &str) -> bool {
        self.tables
            .lock()
            .await
            .puzzles_by_game
            .get(game_id)
            .is_some_and(|ids| !ids.is_empty())
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    /// Encodes every document as JSON.
    pub async fn snapshot(&self) -> Result<Vec<u8>, StoreError> {
        let snapshot = self.tables.lock().await.to_snapshot();
        Ok(JsonCodec.encode(&snapshot)?)
    }

    /// Builds a store from [`snapshot`](Self::snapshot) output.
    pub fn restore(bytes: &[u8]) -> Result<Self, StoreError> {
        let snapshot: Snapshot = JsonCodec.decode(bytes)?;
        tracing::info!(
            rooms = snapshot.rooms.len(),
            players = snapshot.players.len(),
            puzzles = snapshot.puzzles.len(),
            "store restored from snapshot"
        );
        Ok(Self::with_tables(Tables::from_snapshot(snapshot)))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
