//! Concrete games that ship with the engine.

pub mod nested_tictactoe;

pub use nested_tictactoe::{BoardStatus, NestedMove, NestedState, NestedTicTacToe};
