//! Implementation of the `Game` trait for Havannah.

use crate::board::{HavannahBoard, WinPattern};
use crate::geometry::Geometry;
use crate::hex::Hex;
use duel_core::{Game, Outcome, Player, Result};
use std::fmt;
use std::sync::Arc;

/// A Havannah position: the board plus the player to move.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HavannahState {
    board: HavannahBoard,
    to_move: Player,
}

impl HavannahState {
    pub fn board(&self) -> &HavannahBoard {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// The pattern that ended the game, if one did.
    pub fn win_pattern(&self) -> Option<WinPattern> {
        self.board.win().map(|(_, pattern)| pattern)
    }
}

impl fmt::Display for HavannahState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        match self.board.win() {
            Some((player, pattern)) => writeln!(f, "{player} wins with a {pattern}"),
            None if self.board.is_full() => writeln!(f, "Draw"),
            None => writeln!(f, "{} to move", self.to_move),
        }
    }
}

/// Havannah on a board with a fixed side length.
///
/// Player One moves first; actions are the hexes to place a stone on.
#[derive(Clone, Debug)]
pub struct Havannah {
    geometry: Arc<Geometry>,
}

impl Havannah {
    /// Side length of a tournament board.
    pub const STANDARD_SIZE: usize = 10;
    /// Side length of the smaller board recommended for beginners.
    pub const BEGINNER_SIZE: usize = 8;

    /// # Errors
    /// `GameError::InvalidBoard` for a size outside `2..=MAX_BOARD_SIZE`.
    pub fn new(size: usize) -> Result<Self> {
        Ok(Self {
            geometry: Arc::new(Geometry::new(size)?),
        })
    }

    pub fn standard() -> Self {
        Self::with_valid_size(Self::STANDARD_SIZE)
    }

    pub fn beginner() -> Self {
        Self::with_valid_size(Self::BEGINNER_SIZE)
    }

    fn with_valid_size(size: usize) -> Self {
        match Self::new(size) {
            Ok(game) => game,
            Err(err) => unreachable!("built-in board size {size} rejected: {err}"),
        }
    }

    pub fn size(&self) -> usize {
        self.geometry.size()
    }
}

impl Game for Havannah {
    type State = HavannahState;
    type Action = Hex;

    fn initial_state(&self) -> HavannahState {
        HavannahState {
            board: HavannahBoard::new(Arc::clone(&self.geometry)),
            to_move: Player::One,
        }
    }

    fn legal_actions(&self, state: &HavannahState) -> Vec<Hex> {
        if state.board.win().is_some() {
            return Vec::new();
        }
        state.board.empty_cells().collect()
    }

    fn apply(&self, state: &HavannahState, action: Hex) -> Result<HavannahState> {
        let mut board = state.board.clone();
        board.place(action, state.to_move)?;
        Ok(HavannahState {
            board,
            to_move: state.to_move.opponent(),
        })
    }

    fn is_terminal(&self, state: &HavannahState) -> bool {
        state.board.win().is_some() || state.board.is_full()
    }

    fn outcome(&self, state: &HavannahState) -> Option<Outcome> {
        match state.board.winner() {
            Some(player) => Some(Outcome::Win(player)),
            None if state.board.is_full() => Some(Outcome::Draw),
            None => None,
        }
    }

    fn current_player(&self, state: &HavannahState) -> Player {
        state.to_move
    }

    fn is_legal(&self, state: &HavannahState, action: Hex) -> bool {
        state.board.win().is_none()
            && state.board.contains(action)
            && state.board.stone(action).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_core::GameError;

    fn cube(x: i32, y: i32, z: i32) -> Hex {
        Hex::from_cube(x, y, z).unwrap()
    }

    #[test]
    fn test_sizes() {
        assert_eq!(Havannah::standard().size(), 10);
        assert_eq!(Havannah::beginner().size(), 8);
        assert!(matches!(Havannah::new(1), Err(GameError::InvalidBoard(_))));
        assert_eq!(
            Havannah::standard()
                .legal_actions(&Havannah::standard().initial_state())
                .len(),
            271
        );
    }

    #[test]
    fn test_turns_alternate() {
        let game = Havannah::new(4).unwrap();
        let state = game.initial_state();
        assert_eq!(game.current_player(&state), Player::One);

        let state = game.apply(&state, Hex::ORIGIN).unwrap();
        assert_eq!(game.current_player(&state), Player::Two);
        assert_eq!(state.board().stone(Hex::ORIGIN), Some(Player::One));
        assert_eq!(game.legal_actions(&state).len(), 36);
        assert!(!game.is_legal(&state, Hex::ORIGIN));
        assert!(!game.is_legal(&state, cube(4, -4, 0)));
    }

    #[test]
    fn test_apply_rejects_occupied_cell() {
        let game = Havannah::new(4).unwrap();
        let state = game.apply(&game.initial_state(), Hex::ORIGIN).unwrap();
        assert!(matches!(
            game.apply(&state, Hex::ORIGIN),
            Err(GameError::IllegalMove(_))
        ));
    }

    #[test]
    fn test_bridge_ends_game() {
        let game = Havannah::new(4).unwrap();
        let one = [cube(3, -3, 0), cube(3, -2, -1), cube(3, -1, -2), cube(3, 0, -3)];
        let two = [cube(0, 0, 0), cube(-1, 1, 0), cube(-2, 2, 0)];

        let mut state = game.initial_state();
        for i in 0..one.len() {
            state = game.apply(&state, one[i]).unwrap();
            if let Some(&hex) = two.get(i) {
                state = game.apply(&state, hex).unwrap();
            }
        }

        assert!(game.is_terminal(&state));
        assert_eq!(game.outcome(&state), Some(Outcome::Win(Player::One)));
        assert_eq!(state.win_pattern(), Some(WinPattern::Bridge));
        assert!(game.legal_actions(&state).is_empty());
        assert!(game.apply(&state, cube(-3, 3, 0)).is_err());
    }

    #[test]
    fn test_full_board_without_pattern_is_a_draw() {
        // A side-3 board filled so that no group touches two corners or
        // three edges and every region reaches the rim.
        let game = Havannah::new(3).unwrap();
        let one = [
            cube(1, 0, -1),
            cube(-1, 1, 0),
            cube(0, -1, 1),
            cube(2, -1, -1),
            cube(1, 1, -2),
            cube(-1, -1, 2),
            cube(1, -2, 1),
            cube(0, 2, -2),
            cube(-2, 2, 0),
            cube(-2, 0, 2),
        ];
        let two = [
            cube(0, 0, 0),
            cube(1, -1, 0),
            cube(0, 1, -1),
            cube(-1, 0, 1),
            cube(2, -2, 0),
            cube(2, 0, -2),
            cube(0, -2, 2),
            cube(-1, 2, -1),
            cube(-2, 1, 1),
        ];

        let mut state = game.initial_state();
        for i in 0..one.len() {
            assert!(!game.is_terminal(&state));
            state = game.apply(&state, one[i]).unwrap();
            if let Some(&hex) = two.get(i) {
                state = game.apply(&state, hex).unwrap();
            }
        }

        assert!(state.board().is_full());
        assert_eq!(game.outcome(&state), Some(Outcome::Draw));
        assert!(game.legal_actions(&state).is_empty());
    }

    #[test]
    fn test_display_reports_status() {
        let game = Havannah::new(2).unwrap();
        let state = game.initial_state();
        assert!(state.to_string().ends_with("Player 1 to move\n"));
    }
}
