//! Decision makers that turn a position into an action.

use crate::{
    clock::{Clock, SystemClock},
    config::MctsConfig,
    evaluator::Evaluator,
    search::{Mcts, SearchResult},
};
use duel_core::{Game, GameError, Result};
use rand::Rng;
use tracing::debug;

/// Anything that can take a seat in a game.
///
/// The driver calls `choose_action` when the agent is to move and reports
/// every action played, by either side, through `observe_action`.
pub trait Agent<G: Game> {
    fn name(&self) -> &str;

    /// Pick an action for the player to move in `state`.
    ///
    /// # Errors
    /// `GameError::NoLegalMoves` for a terminal state, or whatever the
    /// underlying search reports.
    fn choose_action(&mut self, game: &G, state: &G::State) -> Result<G::Action>;

    /// Notification that `action` was played.
    fn observe_action(&mut self, _game: &G, _action: G::Action) {}

    /// Forget everything about the current game.
    fn reset(&mut self) {}
}

/// Agent driven by Monte Carlo Tree Search.
///
/// With `reuse_tree` enabled the agent keeps the subtree of every observed
/// action, so statistics gathered on earlier moves warm-start the next
/// search.
pub struct MctsAgent<G: Game, E: Evaluator<G>, R: Rng, C: Clock = SystemClock> {
    name: String,
    mcts: Mcts<G, E, R, C>,
    last_result: Option<SearchResult<G::Action>>,
}

impl<G, E, R> MctsAgent<G, E, R, SystemClock>
where
    G: Game,
    E: Evaluator<G>,
    R: Rng,
{
    pub fn new(name: impl Into<String>, config: MctsConfig, evaluator: E, rng: R) -> Self {
        Self::from_engine(name, Mcts::new(config, evaluator, rng))
    }
}

impl<G, E, R, C> MctsAgent<G, E, R, C>
where
    G: Game,
    E: Evaluator<G>,
    R: Rng,
    C: Clock,
{
    /// Wrap an already configured engine.
    pub fn from_engine(name: impl Into<String>, mcts: Mcts<G, E, R, C>) -> Self {
        Self {
            name: name.into(),
            mcts,
            last_result: None,
        }
    }

    pub fn engine(&self) -> &Mcts<G, E, R, C> {
        &self.mcts
    }

    /// Statistics of the most recent search, if any.
    pub fn last_result(&self) -> Option<&SearchResult<G::Action>> {
        self.last_result.as_ref()
    }
}

impl<G, E, R, C> Agent<G> for MctsAgent<G, E, R, C>
where
    G: Game,
    E: Evaluator<G>,
    R: Rng,
    C: Clock,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_action(&mut self, game: &G, state: &G::State) -> Result<G::Action> {
        let result = self.mcts.search(game, state)?;
        debug!(
            agent = %self.name,
            action = ?result.best_action,
            iterations = result.iterations,
            win_rate = result.root_value,
            "Chose action"
        );
        let action = result.best_action;
        self.last_result = Some(result);
        Ok(action)
    }

    fn observe_action(&mut self, _game: &G, action: G::Action) {
        self.mcts.advance(action);
    }

    fn reset(&mut self) {
        self.mcts.reset();
        self.last_result = None;
    }
}

/// Agent playing a uniformly random legal action.
#[derive(Clone, Debug)]
pub struct RandomAgent<R> {
    name: String,
    rng: R,
}

impl<R: Rng> RandomAgent<R> {
    pub fn new(name: impl Into<String>, rng: R) -> Self {
        Self {
            name: name.into(),
            rng,
        }
    }
}

impl<G: Game, R: Rng> Agent<G> for RandomAgent<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_action(&mut self, game: &G, state: &G::State) -> Result<G::Action> {
        let actions = game.legal_actions(state);
        if actions.is_empty() {
            return Err(GameError::NoLegalMoves);
        }
        Ok(actions[self.rng.gen_range(0..actions.len())])
    }
}
