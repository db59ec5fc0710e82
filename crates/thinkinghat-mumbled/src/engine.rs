//! The Mumbled state machine.
//!
//! ```text
//!            correct answer / host skip
//! Playing ─────────────────────────────→ RoundOver ──(host: next round)──→ Playing
//!    │
//!    └── correct answer / host skip on the final round ──→ Finished
//! ```

use rand::{SeedableRng, rngs::StdRng};
use thinkinghat_engine::{
    EngineContext, EngineError, EngineOutcome, GameDefinition, GameEngine, GameEvent,
};
use thinkinghat_protocol::{
    ActionReply, GameMode, LastSubmission, MUMBLED_KIND, MumbledAction, MumbledConfig,
    MumbledPhase, MumbledPublicState, MumbledState, PlayType, Player, Puzzle, PuzzleData, PuzzleId,
};

use crate::answer::answers_match;
use crate::content::DEFAULT_CATEGORY_SLUG;
use crate::selection::pick_puzzle;

/// Upper bound on `total_rounds` accepted at room creation.
pub const MAX_TOTAL_ROUNDS: u32 = 50;

/// Display name recorded when the host skips a round.
const SKIP_LABEL: &str = "Host";

static DEFINITION: GameDefinition = GameDefinition {
    id: MUMBLED_KIND,
    name: "Mumbled",
    supported_modes: &[GameMode::Single, GameMode::TwoPlayer, GameMode::Party],
    supported_play_types: &[PlayType::Online, PlayType::Local],
    categories: &[DEFAULT_CATEGORY_SLUG],
};

/// Mumbled: race to decode a phrase spelled as sound-alike words.
#[derive(Debug, Clone, Copy, Default)]
pub struct MumbledEngine;

impl MumbledEngine {
    pub fn new() -> Self {
        Self
    }

    fn draw(
        &self,
        ctx: &EngineContext<'_>,
        category_slug: Option<&str>,
        used: &[PuzzleId],
    ) -> Result<Puzzle, EngineError> {
        let mut rng = StdRng::seed_from_u64(ctx.seed);
        pick_puzzle(MUMBLED_KIND, ctx.content, category_slug, used, &mut rng).cloned()
    }

    fn submit(
        &self,
        state: &MumbledState,
        answer: &str,
        ctx: &EngineContext<'_>,
    ) -> Result<EngineOutcome<MumbledState>, EngineError> {
        let player = ctx.acting_player().ok_or(EngineError::NotInRoom)?;
        if answer.trim().is_empty() {
            return Err(EngineError::Validation("answer must not be blank".into()));
        }
        if state.phase != MumbledPhase::Playing {
            return Ok(EngineOutcome::ignored(state.clone()));
        }

        if !answers_match(answer, &state.answer) {
            let mut next = state.clone();
            next.last_submission = Some(LastSubmission {
                by_player_id: player.id,
                by_display_name: player.display_name.clone(),
                correct: false,
            });
            return Ok(EngineOutcome {
                state: next,
                reply: ActionReply::answered(false),
                events: Vec::new(),
            });
        }

        // First correct answer wins the round.
        if state.winner_player_id.is_some() {
            return Ok(EngineOutcome {
                state: state.clone(),
                reply: ActionReply::answered(false),
                events: Vec::new(),
            });
        }

        let score = state
            .score_by_player_id
            .get(&player.id)
            .copied()
            .unwrap_or(player.score)
            + 1;

        let mut next = state.clone();
        next.phase = end_of_round_phase(state);
        next.winner_player_id = Some(player.id);
        next.revealed_answer = Some(state.answer.clone());
        next.score_by_player_id.insert(player.id, score);
        next.last_submission = Some(LastSubmission {
            by_player_id: player.id,
            by_display_name: player.display_name.clone(),
            correct: true,
        });

        let mut events = vec![
            GameEvent::ScoreChanged {
                player_id: player.id,
                score,
            },
            GameEvent::RoundEnded {
                round: state.round,
                winner: Some(player.id),
            },
        ];
        if next.phase == MumbledPhase::Finished {
            events.push(GameEvent::GameFinished);
        }

        Ok(EngineOutcome {
            state: next,
            reply: ActionReply::answered(true),
            events,
        })
    }

    fn skip(
        &self,
        state: &MumbledState,
        ctx: &EngineContext<'_>,
    ) -> Result<EngineOutcome<MumbledState>, EngineError> {
        if !ctx.actor_is_host() {
            return Err(EngineError::OnlyHostCanSkip);
        }
        if state.phase != MumbledPhase::Playing {
            return Ok(EngineOutcome::ignored(state.clone()));
        }
        let host = ctx.acting_player().ok_or(EngineError::NotInRoom)?;

        let mut next = state.clone();
        next.phase = end_of_round_phase(state);
        next.revealed_answer = Some(state.answer.clone());
        next.last_submission = Some(LastSubmission {
            by_player_id: host.id,
            by_display_name: SKIP_LABEL.into(),
            correct: false,
        });

        let mut events = vec![GameEvent::RoundEnded {
            round: state.round,
            winner: None,
        }];
        if next.phase == MumbledPhase::Finished {
            events.push(GameEvent::GameFinished);
        }

        Ok(EngineOutcome {
            state: next,
            reply: ActionReply::accepted(),
            events,
        })
    }

    fn next_round(
        &self,
        state: &MumbledState,
        ctx: &EngineContext<'_>,
    ) -> Result<EngineOutcome<MumbledState>, EngineError> {
        ctx.acting_player().ok_or(EngineError::NotInRoom)?;
        if !ctx.actor_is_host() {
            return Err(EngineError::OnlyHostCanAdvance);
        }
        if state.phase != MumbledPhase::RoundOver {
            return Ok(EngineOutcome::ignored(state.clone()));
        }

        let puzzle = self.draw(ctx, state.category_slug.as_deref(), &state.used_puzzle_ids)?;
        let round = state.round + 1;

        let mut next = state.clone();
        next.phase = MumbledPhase::Playing;
        next.round = round;
        next.prompt = prompt_of(&puzzle);
        next.answer = puzzle.answer;
        next.revealed_answer = None;
        next.winner_player_id = None;
        next.last_submission = None;
        next.used_puzzle_ids.push(puzzle.id);

        Ok(EngineOutcome {
            state: next,
            reply: ActionReply::accepted(),
            events: vec![GameEvent::RoundStarted { round }],
        })
    }
}

fn end_of_round_phase(state: &MumbledState) -> MumbledPhase {
    if state.is_final_round() {
        MumbledPhase::Finished
    } else {
        MumbledPhase::RoundOver
    }
}

fn prompt_of(puzzle: &Puzzle) -> String {
    let PuzzleData::Mumbled { prompt } = &puzzle.data;
    prompt.clone()
}

impl GameEngine for MumbledEngine {
    type Config = MumbledConfig;
    type State = MumbledState;
    type Action = MumbledAction;
    type PublicState = MumbledPublicState;

    fn definition(&self) -> &GameDefinition {
        &DEFINITION
    }

    fn validate_config(&self, config: &MumbledConfig) -> Result<(), EngineError> {
        if config.total_rounds > MAX_TOTAL_ROUNDS {
            return Err(EngineError::Validation(format!(
                "totalRounds must be at most {MAX_TOTAL_ROUNDS}"
            )));
        }
        if config
            .category_slug
            .as_deref()
            .is_some_and(|slug| slug.trim().is_empty())
        {
            return Err(EngineError::Validation(
                "categorySlug must not be blank".into(),
            ));
        }
        Ok(())
    }

    fn init(
        &self,
        config: &MumbledConfig,
        ctx: &EngineContext<'_>,
    ) -> Result<MumbledState, EngineError> {
        let puzzle = self.draw(ctx, config.category_slug.as_deref(), &[])?;

        Ok(MumbledState {
            phase: MumbledPhase::Playing,
            round: 1,
            total_rounds: config.total_rounds.max(1),
            prompt: prompt_of(&puzzle),
            answer: puzzle.answer,
            revealed_answer: None,
            winner_player_id: None,
            used_puzzle_ids: vec![puzzle.id],
            score_by_player_id: ctx.players.iter().map(|p| (p.id, p.score)).collect(),
            category_slug: config.category_slug.clone(),
            last_submission: None,
        })
    }

    fn reduce(
        &self,
        state: &MumbledState,
        action: MumbledAction,
        ctx: &EngineContext<'_>,
    ) -> Result<EngineOutcome<MumbledState>, EngineError> {
        match action {
            MumbledAction::SubmitAnswer { answer } => self.submit(state, &answer, ctx),
            MumbledAction::Skip => self.skip(state, ctx),
            MumbledAction::NextRound => self.next_round(state, ctx),
        }
    }

    fn to_public_state(
        &self,
        state: &MumbledState,
        _ctx: &EngineContext<'_>,
        viewer: Option<&Player>,
    ) -> MumbledPublicState {
        let revealed_answer = state
            .phase
            .is_revealed()
            .then(|| {
                state
                    .revealed_answer
                    .clone()
                    .unwrap_or_else(|| state.answer.clone())
            });

        MumbledPublicState {
            phase: state.phase,
            round: state.round,
            total_rounds: state.total_rounds,
            prompt: state.prompt.clone(),
            revealed_answer,
            winner_player_id: state.winner_player_id,
            score_by_player_id: state.score_by_player_id.clone(),
            category_slug: state.category_slug.clone(),
            last_submission: state.last_submission.clone(),
            viewer_player_id: viewer.map(|p| p.id),
        }
    }

    fn is_round_over(&self, state: &MumbledState) -> bool {
        state.phase.is_revealed()
    }

    fn is_game_over(&self, state: &MumbledState) -> bool {
        state.phase == MumbledPhase::Finished
    }

    fn round(&self, state: &MumbledState) -> u32 {
        state.round
    }
}
