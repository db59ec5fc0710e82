//! Integration tests for the platform facade: credentials in, room
//! operations out.

use std::sync::Arc;

use futures_util::future::join_all;
use thinkinghat::prelude::*;

// =========================================================================
// Mock authenticator
// =========================================================================

/// Accepts "user:<subject>" tokens and names every user "Tess".
struct PrefixAuth;

impl Authenticator for PrefixAuth {
    async fn authenticate(&self, token: &str) -> Result<Identity, SessionError> {
        token
            .strip_prefix("user:")
            .map(|subject| Identity::new(subject).with_name("Tess"))
            .ok_or_else(|| SessionError::AuthFailed("unknown token".into()))
    }
}

async fn platform() -> Platform<PrefixAuth> {
    Platform::builder(PrefixAuth).build().await.unwrap()
}

fn rounds(total_rounds: u32) -> MumbledConfig {
    MumbledConfig {
        total_rounds,
        category_slug: None,
    }
}

async fn secret_answer<A: Authenticator>(platform: &Platform<A>, room_id: RoomId) -> String {
    let doc = platform
        .rooms()
        .store()
        .read(|txn| txn.game_state(room_id))
        .await
        .unwrap();
    match doc.state {
        GameStatePayload::Mumbled(state) => state.answer,
        other => panic!("expected mumbled state, got {other:?}"),
    }
}

// =========================================================================
// Build
// =========================================================================

#[tokio::test]
async fn test_build_seeds_default_content() {
    let platform = platform().await;

    let games = platform.list_games().await;
    assert_eq!(games.len(), 3);
    assert_eq!(games[0].game_id, "mumbled");
    assert_eq!(platform.list_categories("mumbled").await.len(), 1);
}

#[tokio::test]
async fn test_build_without_seeding_has_no_content() {
    let platform = Platform::builder(GuestOnly)
        .config(PlatformConfig {
            seed_default_content: false,
            ..PlatformConfig::default()
        })
        .build()
        .await
        .unwrap();
    assert!(platform.list_games().await.is_empty());

    let guest = Credentials::guest("solo");
    let created = platform
        .create_room(&guest, CreateRoom::new("mumbled", GameMode::Single))
        .await
        .unwrap();
    let err = platform
        .start_room(&guest, created.room_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Exhausted);
}

#[tokio::test]
async fn test_build_duplicate_game_fails() {
    let result = Platform::builder(GuestOnly)
        .register(MumbledEngine::new())
        .build()
        .await;

    let Err(err) = result else {
        panic!("duplicate registration should fail");
    };
    assert!(matches!(
        err,
        ThinkingHatError::Engine(EngineError::DuplicateGame(ref id)) if id == "mumbled"
    ));
}

#[tokio::test]
async fn test_build_with_restored_store_keeps_rooms() {
    let platform = platform().await;
    let host = Credentials::guest("host");
    let created = platform
        .create_room(&host, CreateRoom::new("mumbled", GameMode::Party))
        .await
        .unwrap();
    let bytes = platform.snapshot().await.unwrap();

    let store = Arc::new(MemoryStore::restore(&bytes).unwrap());
    let restored = Platform::builder(GuestOnly)
        .store(store)
        .build()
        .await
        .unwrap();

    let room = restored
        .room_by_code(created.code.as_str())
        .await
        .unwrap();
    assert_eq!(room.id, created.room_id);
    assert_eq!(restored.players_by_room(room.id).await.len(), 1);
    assert_eq!(restored.list_games().await.len(), 3);
}

// =========================================================================
// Credentials
// =========================================================================

#[tokio::test]
async fn test_create_room_uses_profile_name_when_none_given() {
    let platform = platform().await;
    let user = Credentials::token("user:abc");

    let created = platform
        .create_room(&user, CreateRoom::new("mumbled", GameMode::Party))
        .await
        .unwrap();

    let room = platform.room(created.room_id).await.unwrap();
    assert_eq!(room.host, Actor::user("abc"));
    let players = platform.players_by_room(created.room_id).await;
    assert_eq!(players[0].display_name, "Tess");
}

#[tokio::test]
async fn test_join_rejected_token_falls_back_to_guest() {
    let platform = platform().await;
    let created = platform
        .create_room(
            &Credentials::guest("host"),
            CreateRoom::new("mumbled", GameMode::Party),
        )
        .await
        .unwrap();

    let stale = Credentials {
        token: Some("expired".into()),
        guest_id: Some("g-42".into()),
    };
    platform
        .join_by_code(&stale, created.code.as_str(), JoinRoom::default())
        .await
        .unwrap();

    let players = platform.players_by_room(created.room_id).await;
    assert_eq!(players[1].actor, Actor::guest("g-42"));
    assert_eq!(players[1].display_name, "Player");
}

#[tokio::test]
async fn test_no_credentials_is_unauthorized() {
    let platform = platform().await;
    let err = platform
        .create_room(
            &Credentials::default(),
            CreateRoom::new("mumbled", GameMode::Single),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ThinkingHatError::Session(SessionError::Unauthorized)));
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}

// =========================================================================
// Gameplay through the facade
// =========================================================================

#[tokio::test]
async fn test_party_game_through_conveniences() {
    let platform = platform().await;
    let host = Credentials::token("user:host");
    let guests: Vec<Credentials> = (0..3)
        .map(|i| Credentials::guest(format!("guest-{i}")))
        .collect();

    let created = platform
        .create_room(
            &host,
            CreateRoom::new("mumbled", GameMode::Party).config(rounds(2)),
        )
        .await
        .unwrap();
    let room_id = created.room_id;

    let err = platform.start_room(&host, room_id).await.unwrap_err();
    assert_eq!(err.to_string(), "Need at least 3 players");

    for guest in &guests {
        let joined = platform
            .join_by_code(guest, &created.code.as_str().to_lowercase(), JoinRoom::default())
            .await
            .unwrap();
        assert_eq!(joined.role, PlayerRole::Player);
        platform.set_ready(guest, room_id, true).await.unwrap();
    }
    platform.set_ready(&host, room_id, true).await.unwrap();
    platform.start_room(&host, room_id).await.unwrap();

    // Round 1: everyone races with the right answer.
    let answer = secret_answer(&platform, room_id).await;
    let replies = join_all(
        guests
            .iter()
            .map(|g| platform.submit_answer(g, room_id, answer.clone())),
    )
    .await;
    let winners = replies
        .into_iter()
        .map(Result::unwrap)
        .filter(|r| r.correct == Some(true))
        .count();
    assert_eq!(winners, 1);

    let err = platform.skip(&guests[0], room_id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    let reply = platform.next_round(&host, room_id).await.unwrap();
    assert!(reply.ok);

    // Round 2 (final): the host skips and the room finishes.
    let Some(PublicGameState::Mumbled(view)) =
        platform.public_state(&guests[1], room_id).await.unwrap()
    else {
        panic!("game should be running");
    };
    assert_eq!(view.round, 2);
    assert_eq!(view.phase, MumbledPhase::Playing);
    assert_eq!(view.revealed_answer, None);

    platform.skip(&host, room_id).await.unwrap();
    let room = platform.room(room_id).await.unwrap();
    assert_eq!(room.status, RoomStatus::Finished);

    let total: u32 = platform
        .players_by_room(room_id)
        .await
        .iter()
        .map(|p| p.score)
        .sum();
    assert_eq!(total, 1);
}

#[tokio::test]
async fn test_dispatch_encoded_garbage_is_validation() {
    let platform = platform().await;
    let host = Credentials::guest("host");
    let created = platform
        .create_room(&host, CreateRoom::new("mumbled", GameMode::Single))
        .await
        .unwrap();
    platform.start_room(&host, created.room_id).await.unwrap();

    let err = platform
        .dispatch_encoded(&host, created.room_id, b"{\"game\":\"chess\"}")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let bytes = serde_json::to_vec(&GameAction::from(MumbledAction::SubmitAnswer {
        answer: "nope".into(),
    }))
    .unwrap();
    let reply = platform
        .dispatch_encoded(&host, created.room_id, &bytes)
        .await
        .unwrap();
    assert_eq!(reply, ActionReply::answered(false));
}

#[tokio::test]
async fn test_subscribe_sees_lobby_changes() {
    let platform = platform().await;
    let mut changes = platform.subscribe();
    let host = Credentials::guest("host");

    let created = platform
        .create_room(&host, CreateRoom::new("mumbled", GameMode::Party))
        .await
        .unwrap();

    let mut kinds = Vec::new();
    while let Ok(change) = changes.try_recv() {
        assert_eq!(change.room_id, created.room_id);
        kinds.push(change.kind);
    }
    assert!(kinds.contains(&ChangeKind::Room));
    assert!(kinds.contains(&ChangeKind::Players));
    assert!(kinds.contains(&ChangeKind::GameState));
}
