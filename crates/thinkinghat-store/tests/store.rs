//! Integration tests for the in-memory store.

use thinkinghat_protocol::{
    Actor, Category, Difficulty, GameConfig, GameMode, GameStateDoc, GameStatePayload, MumbledConfig,
    NewPuzzle, PlayType, Player, PlayerRole, PuzzleData, Room, RoomCode, RoomId, RoomStatus,
};
use thinkinghat_store::{Change, ChangeKind, MemoryStore, StoreError, Txn};

// =========================================================================
// Helpers
// =========================================================================

fn new_room(txn: &mut Txn<'_>, code: &str) -> Room {
    let id = txn.allocate_room_id();
    Room {
        id,
        code: RoomCode::normalize(code),
        game_id: "mumbled".into(),
        mode: GameMode::TwoPlayer,
        play_type: PlayType::Online,
        host: Actor::guest("host"),
        status: RoomStatus::Lobby,
        config: GameConfig::Mumbled(MumbledConfig::default()),
        current_round: 0,
        created_at: txn.now(),
        updated_at: txn.now(),
    }
}

fn new_player(txn: &mut Txn<'_>, room_id: RoomId, actor: Actor) -> Player {
    let id = txn.allocate_player_id();
    Player {
        id,
        room_id,
        actor,
        display_name: "Someone".into(),
        role: PlayerRole::Player,
        is_ready: false,
        is_connected: true,
        last_seen_at: txn.now(),
        score: 0,
        client_id: None,
    }
}

async fn seed_room(store: &MemoryStore, code: &str) -> RoomId {
    store
        .transact(|txn| {
            let room = new_room(txn, code);
            let id = room.id;
            txn.put_room(room)?;
            Ok::<_, StoreError>(id)
        })
        .await
        .unwrap()
}

// =========================================================================
// Transactions
// =========================================================================

#[tokio::test]
async fn test_transact_ok_commits_all_writes() {
    let store = MemoryStore::new();
    let room_id = store
        .transact(|txn| {
            let room = new_room(txn, "ABCDE");
            let room_id = room.id;
            txn.put_room(room)?;
            let player = new_player(txn, room_id, Actor::guest("g1"));
            txn.put_player(player)?;
            txn.put_game_state(GameStateDoc {
                room_id,
                game_id: "mumbled".into(),
                state: GameStatePayload::Placeholder,
                round: 0,
                updated_at: txn.now(),
            })?;
            Ok::<_, StoreError>(room_id)
        })
        .await
        .unwrap();

    store
        .read(|txn| {
            assert!(txn.room(room_id).is_some());
            assert_eq!(txn.players_in_room(room_id).len(), 1);
            assert!(txn.game_state(room_id).unwrap().state.is_placeholder());
        })
        .await;
}

#[tokio::test]
async fn test_transact_err_leaves_no_trace() {
    let store = MemoryStore::new();
    let result: Result<(), &str> = store
        .transact(|txn| {
            let room = new_room(txn, "ABCDE");
            txn.put_room(room).map_err(|_| "put failed")?;
            Err("abort")
        })
        .await;
    assert_eq!(result, Err("abort"));

    store
        .read(|txn| assert!(txn.room_by_code(&RoomCode::normalize("ABCDE")).is_none()))
        .await;
}

#[tokio::test]
async fn test_txn_reads_see_own_staged_writes() {
    let store = MemoryStore::new();
    let room_id = seed_room(&store, "ABCDE").await;

    store
        .transact(|txn| {
            let player = new_player(txn, room_id, Actor::user("u1"));
            let player_id = player.id;
            txn.put_player(player)?;

            let found = txn.player_for_actor(room_id, &Actor::user("u1")).unwrap();
            assert_eq!(found.id, player_id);
            assert_eq!(txn.players_in_room(room_id).len(), 1);

            let mut room = txn.room(room_id).unwrap();
            room.status = RoomStatus::InProgress;
            txn.put_room(room)?;
            assert_eq!(txn.room(room_id).unwrap().status, RoomStatus::InProgress);
            Ok::<_, StoreError>(())
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_allocated_ids_are_not_reused_after_abort() {
    let store = MemoryStore::new();
    let first = seed_room(&store, "AAAAA").await;
    let _: Result<(), &str> = store
        .transact(|txn| {
            txn.allocate_room_id();
            Err("abort")
        })
        .await;
    let second = seed_room(&store, "BBBBB").await;
    assert_eq!(second.0, first.0 + 1);
}

// =========================================================================
// Indexes
// =========================================================================

#[tokio::test]
async fn test_put_room_rejects_taken_code() {
    let store = MemoryStore::new();
    seed_room(&store, "ABCDE").await;

    let result = store
        .transact(|txn| {
            let room = new_room(txn, "ABCDE");
            txn.put_room(room)
        })
        .await;
    assert!(matches!(result, Err(StoreError::CodeTaken(_))));
}

#[tokio::test]
async fn test_put_player_rejects_second_seat_for_same_actor() {
    let store = MemoryStore::new();
    let room_id = seed_room(&store, "ABCDE").await;

    let result = store
        .transact(|txn| {
            let first = new_player(txn, room_id, Actor::guest("g1"));
            txn.put_player(first)?;
            let second = new_player(txn, room_id, Actor::guest("g1"));
            txn.put_player(second)
        })
        .await;
    assert!(matches!(result, Err(StoreError::DuplicatePlayer { .. })));
}

#[tokio::test]
async fn test_put_player_same_actor_in_other_room_is_fine() {
    let store = MemoryStore::new();
    let a = seed_room(&store, "AAAAA").await;
    let b = seed_room(&store, "BBBBB").await;

    store
        .transact(|txn| {
            let p = new_player(txn, a, Actor::guest("g1"));
            txn.put_player(p)?;
            let p = new_player(txn, b, Actor::guest("g1"));
            txn.put_player(p)
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_put_player_unknown_room_is_rejected() {
    let store = MemoryStore::new();
    let result = store
        .transact(|txn| {
            let p = new_player(txn, RoomId(99), Actor::guest("g1"));
            txn.put_player(p)
        })
        .await;
    assert!(matches!(result, Err(StoreError::RoomMissing(RoomId(99)))));
}

#[tokio::test]
async fn test_players_in_room_ordered_by_join() {
    let store = MemoryStore::new();
    let room_id = seed_room(&store, "ABCDE").await;
    for name in ["a", "b", "c"] {
        store
            .transact(|txn| {
                let p = new_player(txn, room_id, Actor::guest(name));
                txn.put_player(p)
            })
            .await
            .unwrap();
    }

    let players = store.read(|txn| txn.players_in_room(room_id)).await;
    let actors: Vec<&str> = players.iter().map(|p| p.actor.id()).collect();
    assert_eq!(actors, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_puzzles_filtered_by_game_and_category() {
    let store = MemoryStore::new();
    let puzzle = |game: &str, category: Option<&str>| NewPuzzle {
        game_id: game.into(),
        category_slug: category.map(Into::into),
        difficulty: Difficulty::Easy,
        data: PuzzleData::Mumbled {
            prompt: "Chew Day".into(),
        },
        answer: "Tuesday".into(),
    };
    store
        .insert_puzzles(vec![
            puzzle("mumbled", Some("days")),
            puzzle("mumbled", Some("phrases")),
            puzzle("mumbled", None),
            puzzle("rebus", Some("days")),
        ])
        .await;

    store
        .read(|txn| {
            assert_eq!(txn.puzzles("mumbled", None).len(), 3);
            assert_eq!(txn.puzzles("mumbled", Some("days")).len(), 1);
            assert_eq!(txn.puzzles("riddles", None).len(), 0);
        })
        .await;
    assert!(store.has_content("rebus").await);
}

#[tokio::test]
async fn test_put_category_replaces_same_slug() {
    let store = MemoryStore::new();
    let category = |label: &str| Category {
        game_id: "mumbled".into(),
        slug: "common-phrases".into(),
        label: label.into(),
        description: None,
        is_default: true,
    };
    store.put_category(category("Old")).await;
    store.put_category(category("New")).await;

    let categories = store.categories("mumbled").await;
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].label, "New");
}

// =========================================================================
// Change feed
// =========================================================================

#[tokio::test]
async fn test_subscribe_receives_committed_changes_only() {
    let store = MemoryStore::new();
    let mut rx = store.subscribe();

    let _: Result<(), &str> = store
        .transact(|txn| {
            let room = new_room(txn, "ZZZZZ");
            txn.put_room(room).map_err(|_| "put failed")?;
            Err("abort")
        })
        .await;
    let room_id = seed_room(&store, "ABCDE").await;

    let change = rx.recv().await.unwrap();
    assert_eq!(
        change,
        Change {
            room_id,
            kind: ChangeKind::Room
        }
    );
    assert!(rx.try_recv().is_err());
}

// =========================================================================
// Snapshots
// =========================================================================

#[tokio::test]
async fn test_restore_rebuilds_indexes_and_counters() {
    let store = MemoryStore::new();
    let room_id = seed_room(&store, "ABCDE").await;
    store
        .transact(|txn| {
            let p = new_player(txn, room_id, Actor::guest("g1"));
            txn.put_player(p)
        })
        .await
        .unwrap();

    let bytes = store.snapshot().await.unwrap();
    let restored = MemoryStore::restore(&bytes).unwrap();

    restored
        .read(|txn| {
            let room = txn.room_by_code(&RoomCode::normalize("abcde")).unwrap();
            assert_eq!(room.id, room_id);
            assert!(txn.player_for_actor(room_id, &Actor::guest("g1")).is_some());
        })
        .await;

    let next = seed_room(&restored, "BBBBB").await;
    assert!(next.0 > room_id.0);
}

#[tokio::test]
async fn test_restore_garbage_is_snapshot_error() {
    let result = MemoryStore::restore(b"not json");
    assert!(matches!(result, Err(StoreError::Snapshot(_))));
}
