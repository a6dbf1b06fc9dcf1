//! Havannah - connection game on a hexagonal board
//!
//! Players alternately place stones on a hex-hex board. A player wins by
//! building one of three structures with a connected group of stones:
//! a ring around at least one cell, a bridge between two corners, or a
//! fork touching three edges. A full board without any of them is a draw.

mod board;
mod game_impl;
mod geometry;
mod groups;
mod hex;
mod ring;

pub use board::{HavannahBoard, WinPattern};
pub use game_impl::{Havannah, HavannahState};
pub use geometry::{Border, CellId, Geometry, MAX_BOARD_SIZE};
pub use hex::Hex;
