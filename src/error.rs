//! Error types for move validation and game configuration
//!
//! Illegal moves are user errors and are reported back to the caller
//! without touching any state. Broken board invariants are programming
//! errors and panic instead (see `Board::assert_consistent`).

use crate::board::{Color, Square};
use thiserror::Error;

/// Reasons a move attempt is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Target square lies outside the board
    #[error("Target square ({row}, {col}) is off the board")]
    OutOfBounds { row: u8, col: u8 },

    /// The piece id is unknown or the piece has been captured
    #[error("Piece {piece} is not on the board")]
    NoPieceOnBoard { piece: usize },

    /// The acting player is not the side to move
    #[error("It is {expected:?}'s turn, not {actual:?}'s")]
    NotYourTurn { expected: Color, actual: Color },

    /// The piece belongs to the other player
    #[error("Piece {piece} does not belong to {color:?}")]
    NotYourPiece { piece: usize, color: Color },

    /// The piece cannot make this move shape
    #[error("Piece cannot move from {from:?} to {to:?}")]
    InvalidShape { from: Square, to: Square },

    /// Another piece stands between origin and target
    #[error("Path from {from:?} to {to:?} is blocked")]
    PathBlocked { from: Square, to: Square },

    /// The target holds a piece of the mover's own color
    #[error("Square {square:?} is occupied by a friendly piece")]
    SameColorTarget { square: Square },

    /// The move would leave (or keep) the mover's king in check
    #[error("Moving to {square:?} leaves the king in check")]
    LeavesKingInCheck { square: Square },

    /// The game already ended
    #[error("The game is over")]
    GameOver,
}

/// Result type alias for move operations
pub type MoveResult<T> = Result<T, MoveError>;

/// Errors raised while loading or validating a game configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Board dimensions outside the supported range
    #[error("Unsupported board size {rows}x{cols} (rows 6-26, cols 8-26)")]
    InvalidDimensions { rows: u8, cols: u8 },

    /// Config file could not be read
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for `GameConfig`
    #[error("Malformed config file: {0}")]
    Parse(#[from] serde_json::Error),
}
