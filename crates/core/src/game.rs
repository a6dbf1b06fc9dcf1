use std::fmt::Debug;
use std::hash::Hash;

use crate::{Outcome, Player, Result};

/// A two-player, turn-taking game that the search engine can play.
///
/// The game value itself carries static configuration (board size and the
/// like); positions are the associated `State` values. States are immutable
/// from the outside: `apply` never mutates its input, it returns a successor.
///
/// Implementations must uphold:
/// - `legal_actions` is empty if and only if `is_terminal` is true
/// - `apply` accepts exactly the actions returned by `legal_actions`
/// - `outcome` is `Some` if and only if `is_terminal` is true
pub trait Game: Clone + Debug + Send + Sync {
    /// A game position.
    type State: Clone + PartialEq + Debug + Send;

    /// A move in the game.
    type Action: Clone + Copy + Eq + Hash + Debug + Send;

    /// Returns the starting position.
    fn initial_state(&self) -> Self::State;

    /// Returns all legal actions for the player to move, in a fixed
    /// generation order.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Applies an action, returning the successor position.
    ///
    /// # Errors
    /// Returns `GameError::IllegalMove` if the action is not legal in `state`.
    fn apply(&self, state: &Self::State, action: Self::Action) -> Result<Self::State>;

    /// Returns true once the game has been won or drawn.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Returns the result of a finished game, `None` while it is ongoing.
    fn outcome(&self, state: &Self::State) -> Option<Outcome>;

    /// Returns the player whose turn it is.
    fn current_player(&self, state: &Self::State) -> Player;

    /// Returns true if `action` is currently legal.
    fn is_legal(&self, state: &Self::State, action: Self::Action) -> bool {
        self.legal_actions(state).contains(&action)
    }
}
