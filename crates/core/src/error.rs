use thiserror::Error;

/// Errors that can occur while playing or searching a game.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Game is not terminal")]
    NotTerminal,
}

/// Convenience Result type for game operations
pub type Result<T> = std::result::Result<T, GameError>;
