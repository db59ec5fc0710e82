//! Puzzle selection.

use rand::Rng;
use thinkinghat_engine::EngineError;
use thinkinghat_protocol::{Puzzle, PuzzleId};

/// Picks the next puzzle uniformly at random.
///
/// The pool is `content` narrowed to `category_slug` (if any). Puzzles in
/// `used` are skipped while any unused one remains; once every puzzle has
/// been served the whole pool is eligible again, so a long game repeats
/// puzzles rather than stalling.
///
/// # Errors
/// [`EngineError::NoPuzzlesAvailable`] if the narrowed pool is empty.
pub fn pick_puzzle<'a, R: Rng>(
    game_id: &str,
    content: &'a [Puzzle],
    category_slug: Option<&str>,
    used: &[PuzzleId],
    rng: &mut R,
) -> Result<&'a Puzzle, EngineError> {
    let pool: Vec<&Puzzle> = content
        .iter()
        .filter(|p| p.game_id == game_id)
        .filter(|p| category_slug.is_none_or(|slug| p.category_slug.as_deref() == Some(slug)))
        .collect();

    let unused: Vec<&Puzzle> = pool
        .iter()
        .copied()
        .filter(|p| !used.contains(&p.id))
        .collect();

    let candidates = if unused.is_empty() {
        if !pool.is_empty() {
            tracing::debug!(game_id, pool = pool.len(), "content exhausted, repeating puzzles");
        }
        pool
    } else {
        unused
    };

    if candidates.is_empty() {
        return Err(EngineError::NoPuzzlesAvailable {
            game_id: game_id.to_string(),
        });
    }
    Ok(candidates[rng.random_range(0..candidates.len())])
}
