//! Duel Core - Game abstractions and common types
//!
//! This crate provides the `Game` trait that every two-player game must
//! implement to be searched by the engine or played by an agent.
//!
//! # Types
//!
//! - [`Game`] - Trait for game implementations
//! - [`Player`] - The two seats at the table
//! - [`Outcome`] - Result of a finished game

mod error;
mod game;
mod types;

pub use error::{GameError, Result};
pub use game::Game;
pub use types::{Outcome, Player};
