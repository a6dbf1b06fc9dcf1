//! Small games used by the unit tests.

use duel_core::{Game, GameError, Outcome, Player, Result};

/// Race to five: players alternately add 1 or 2 to a counter; whoever
/// reaches exactly five wins. The first player wins with correct play.
#[derive(Clone, Debug)]
pub struct RaceToFive;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RaceState {
    pub count: u8,
    pub to_move: Player,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RaceAction(pub u8);

impl RaceToFive {
    /// A position with the counter at `count` and `to_move` to play.
    pub fn position(count: u8, to_move: Player) -> RaceState {
        RaceState { count, to_move }
    }
}

impl Game for RaceToFive {
    type State = RaceState;
    type Action = RaceAction;

    fn initial_state(&self) -> RaceState {
        Self::position(0, Player::One)
    }

    fn legal_actions(&self, state: &RaceState) -> Vec<RaceAction> {
        if state.count >= 5 {
            return Vec::new();
        }
        let mut actions = vec![RaceAction(1)];
        if state.count + 2 <= 5 {
            actions.push(RaceAction(2));
        }
        actions
    }

    fn apply(&self, state: &RaceState, action: RaceAction) -> Result<RaceState> {
        if !self.is_legal(state, action) {
            return Err(GameError::IllegalMove(format!("{:?} at {}", action, state.count)));
        }
        Ok(RaceState {
            count: state.count + action.0,
            to_move: state.to_move.opponent(),
        })
    }

    fn is_terminal(&self, state: &RaceState) -> bool {
        state.count >= 5
    }

    fn outcome(&self, state: &RaceState) -> Option<Outcome> {
        // The player who just moved reached five.
        self.is_terminal(state)
            .then(|| Outcome::Win(state.to_move.opponent()))
    }

    fn current_player(&self, state: &RaceState) -> Player {
        state.to_move
    }
}

/// A broken game: after the first move nobody can move, yet the game
/// never reports an outcome.
#[derive(Clone, Debug)]
pub struct DeadEnd;

impl Game for DeadEnd {
    type State = u8;
    type Action = u8;

    fn initial_state(&self) -> u8 {
        0
    }

    fn legal_actions(&self, state: &u8) -> Vec<u8> {
        if *state == 0 {
            vec![1, 2]
        } else {
            Vec::new()
        }
    }

    fn apply(&self, _state: &u8, action: u8) -> Result<u8> {
        Ok(action)
    }

    fn is_terminal(&self, _state: &u8) -> bool {
        false
    }

    fn outcome(&self, _state: &u8) -> Option<Outcome> {
        None
    }

    fn current_player(&self, state: &u8) -> Player {
        if *state == 0 {
            Player::One
        } else {
            Player::Two
        }
    }
}

/// A broken game that lists two actions and then rejects both.
#[derive(Clone, Debug)]
pub struct Refusing;

impl Game for Refusing {
    type State = ();
    type Action = u8;

    fn initial_state(&self) -> Self::State {}

    fn legal_actions(&self, _state: &()) -> Vec<u8> {
        vec![1, 2]
    }

    fn apply(&self, _state: &(), action: u8) -> Result<()> {
        Err(GameError::IllegalMove(format!("{} is never accepted", action)))
    }

    fn is_terminal(&self, _state: &()) -> bool {
        false
    }

    fn outcome(&self, _state: &()) -> Option<Outcome> {
        None
    }

    fn current_player(&self, _state: &()) -> Player {
        Player::One
    }
}
