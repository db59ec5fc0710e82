//! Built-in content: the starter category, its puzzles, and the game
//! catalogue.

use thinkinghat_protocol::{
    Category, Difficulty, GameListing, ListingStatus, MUMBLED_KIND, NewPuzzle, PuzzleData,
};

pub const DEFAULT_CATEGORY_SLUG: &str = "common-phrases";

/// Content a fresh platform is seeded with.
#[derive(Debug, Clone)]
pub struct DefaultContent {
    pub categories: Vec<Category>,
    pub puzzles: Vec<NewPuzzle>,
    pub games: Vec<GameListing>,
}

const SAMPLES: &[(&str, &str)] = &[
    ("Sigh Cub Her Monday", "Cyber Monday"),
    ("Fur Tin Eight", "Fortunate"),
    ("Ape Hull", "April"),
    ("Ache Heeve Mint", "Achievement"),
    ("Chew Day", "Tuesday"),
    ("Eggs Aim Shun", "Examination"),
];

pub fn default_content() -> DefaultContent {
    let categories = vec![Category {
        game_id: MUMBLED_KIND.into(),
        slug: DEFAULT_CATEGORY_SLUG.into(),
        label: "Common Phrases".into(),
        description: Some("Everyday phrases and sayings".into()),
        is_default: true,
    }];

    let puzzles = SAMPLES
        .iter()
        .map(|(prompt, answer)| NewPuzzle {
            game_id: MUMBLED_KIND.into(),
            category_slug: Some(DEFAULT_CATEGORY_SLUG.into()),
            difficulty: Difficulty::Easy,
            data: PuzzleData::Mumbled {
                prompt: (*prompt).into(),
            },
            answer: (*answer).into(),
        })
        .collect();

    let games = [
        ("mumbled", ListingStatus::Active),
        ("rebus", ListingStatus::ComingSoon),
        ("riddles", ListingStatus::ComingSoon),
    ]
    .into_iter()
    .zip(1..)
    .map(|((game_id, status), sort_order)| GameListing {
        game_id: game_id.into(),
        name_key: format!("game.{game_id}.name"),
        description_key: Some(format!("game.{game_id}.description")),
        status,
        sort_order,
    })
    .collect();

    DefaultContent {
        categories,
        puzzles,
        games,
    }
}
