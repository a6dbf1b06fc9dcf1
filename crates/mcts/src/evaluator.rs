//! Simulation abstraction for MCTS.
//!
//! The `Evaluator` trait is the simulation stage of a search cycle: given
//! the freshly expanded position it plays on to a terminal state and
//! reports who won. Rollouts work on game states only; they never create
//! tree nodes.

use duel_core::{Game, GameError, Outcome, Result};
use rand::Rng;

/// Trait for estimating a position by playing it out.
pub trait Evaluator<G: Game> {
    /// Play from `state` to a terminal position and return its outcome.
    ///
    /// # Errors
    /// Propagates `GameError` from the game; returns
    /// `GameError::NotTerminal` if the game offers no legal actions in a
    /// position it does not consider finished.
    fn evaluate<R: Rng + ?Sized>(&self, game: &G, state: &G::State, rng: &mut R)
        -> Result<Outcome>;
}

/// Evaluator playing uniformly random legal actions until the game ends.
///
/// This is the "light playout": no domain knowledge, no computational
/// overhead beyond move generation.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomRollout;

impl<G: Game> Evaluator<G> for RandomRollout {
    fn evaluate<R: Rng + ?Sized>(
        &self,
        game: &G,
        state: &G::State,
        rng: &mut R,
    ) -> Result<Outcome> {
        if let Some(outcome) = game.outcome(state) {
            return Ok(outcome);
        }

        let mut state = state.clone();
        loop {
            let legal_actions = game.legal_actions(&state);
            if legal_actions.is_empty() {
                return game.outcome(&state).ok_or(GameError::NotTerminal);
            }

            let action = legal_actions[rng.gen_range(0..legal_actions.len())];
            state = game.apply(&state, action)?;

            if let Some(outcome) = game.outcome(&state) {
                return Ok(outcome);
            }
        }
    }
}
