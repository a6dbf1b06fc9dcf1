//! Nested tic-tac-toe: a 3x3 grid of tic-tac-toe boards.
//!
//! A player who completes a line on a sub-board claims it; a full sub-board
//! with no line is drawn. Claimed and drawn sub-boards accept no further
//! moves. The game is won by claiming three sub-boards in a row; drawn
//! sub-boards belong to nobody.
//!
//! Boards and cells are both indexed 0-8, row-major:
//! ```text
//! 0 | 1 | 2
//! ---------
//! 3 | 4 | 5
//! ---------
//! 6 | 7 | 8
//! ```

use duel_core::{Game, GameError, Outcome, Player, Result};
use std::fmt;

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // top row
    [3, 4, 5], // middle row
    [6, 7, 8], // bottom row
    [0, 3, 6], // left column
    [1, 4, 7], // center column
    [2, 5, 8], // right column
    [0, 4, 8], // main diagonal
    [2, 4, 6], // anti-diagonal
];

/// State of one sub-board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BoardStatus {
    Open,
    Won(Player),
    Drawn,
}

/// A move: a cell inside a sub-board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NestedMove {
    pub board: u8,
    pub cell: u8,
}

impl NestedMove {
    pub fn new(board: u8, cell: u8) -> Self {
        Self { board, cell }
    }
}

impl fmt::Display for NestedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "board {} cell ({}, {})", self.board, self.cell / 3, self.cell % 3)
    }
}

/// Nested tic-tac-toe position.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct NestedState {
    cells: [[Option<Player>; 9]; 9],
    boards: [BoardStatus; 9],
    current: Player,
    /// Cached result once the outer board is decided.
    outcome: Option<Outcome>,
}

impl NestedState {
    /// Empty position with Player One to move.
    pub fn new() -> Self {
        Self {
            cells: [[None; 9]; 9],
            boards: [BoardStatus::Open; 9],
            current: Player::One,
            outcome: None,
        }
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn board_status(&self, board: usize) -> BoardStatus {
        self.boards[board]
    }

    /// Get the stone in a cell, if any. Out-of-range indices are empty.
    pub fn cell(&self, board: usize, cell: usize) -> Option<Player> {
        self.cells
            .get(board)
            .and_then(|b| b.get(cell))
            .copied()
            .flatten()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    fn place(&mut self, action: NestedMove) -> Result<()> {
        if self.outcome.is_some() {
            return Err(GameError::IllegalMove(format!("{action}: game is over")));
        }
        let (board, cell) = (action.board as usize, action.cell as usize);
        if board >= 9 || cell >= 9 {
            return Err(GameError::IllegalMove(format!("{action:?} is off the board")));
        }
        if self.boards[board] != BoardStatus::Open {
            return Err(GameError::IllegalMove(format!("{action}: sub-board is decided")));
        }
        if self.cells[board][cell].is_some() {
            return Err(GameError::IllegalMove(format!("{action}: cell is occupied")));
        }

        self.cells[board][cell] = Some(self.current);
        self.boards[board] = sub_board_status(&self.cells[board]);
        self.outcome = outer_outcome(&self.boards);
        self.current = self.current.opponent();
        Ok(())
    }
}

impl Default for NestedState {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a single 3x3 board.
fn sub_board_status(cells: &[Option<Player>; 9]) -> BoardStatus {
    for line in LINES {
        if let Some(player) = cells[line[0]] {
            if cells[line[1]] == Some(player) && cells[line[2]] == Some(player) {
                return BoardStatus::Won(player);
            }
        }
    }
    if cells.iter().all(Option::is_some) {
        BoardStatus::Drawn
    } else {
        BoardStatus::Open
    }
}

/// Resolve the outer board from the sub-board statuses.
fn outer_outcome(boards: &[BoardStatus; 9]) -> Option<Outcome> {
    for line in LINES {
        if let BoardStatus::Won(player) = boards[line[0]] {
            if line[1..].iter().all(|&b| boards[b] == BoardStatus::Won(player)) {
                return Some(Outcome::Win(player));
            }
        }
    }
    if boards.iter().all(|status| *status != BoardStatus::Open) {
        Some(Outcome::Draw)
    } else {
        None
    }
}

fn mark(cell: Option<Player>) -> char {
    match cell {
        Some(Player::One) => 'X',
        Some(Player::Two) => 'O',
        None => '.',
    }
}

impl fmt::Display for NestedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outer_row in 0..3 {
            if outer_row > 0 {
                writeln!(f, "------+-------+------")?;
            }
            for inner_row in 0..3 {
                for outer_col in 0..3 {
                    if outer_col > 0 {
                        write!(f, " | ")?;
                    }
                    let board = outer_row * 3 + outer_col;
                    let row: Vec<String> = (0..3)
                        .map(|inner_col| mark(self.cells[board][inner_row * 3 + inner_col]).to_string())
                        .collect();
                    write!(f, "{}", row.join(" "))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Nested tic-tac-toe game implementation.
#[derive(Clone, Debug, Default)]
pub struct NestedTicTacToe;

impl Game for NestedTicTacToe {
    type State = NestedState;
    type Action = NestedMove;

    fn initial_state(&self) -> NestedState {
        NestedState::new()
    }

    fn legal_actions(&self, state: &NestedState) -> Vec<NestedMove> {
        if state.outcome.is_some() {
            return Vec::new();
        }
        (0..9)
            .filter(|&board| state.boards[board] == BoardStatus::Open)
            .flat_map(|board| {
                (0..9)
                    .filter(move |&cell| state.cells[board][cell].is_none())
                    .map(move |cell| NestedMove::new(board as u8, cell as u8))
            })
            .collect()
    }

    fn apply(&self, state: &NestedState, action: NestedMove) -> Result<NestedState> {
        let mut next = state.clone();
        next.place(action)?;
        Ok(next)
    }

    fn is_terminal(&self, state: &NestedState) -> bool {
        state.outcome.is_some()
    }

    fn outcome(&self, state: &NestedState) -> Option<Outcome> {
        state.outcome
    }

    fn current_player(&self, state: &NestedState) -> Player {
        state.current
    }
}
