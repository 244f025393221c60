//! Errors raised while setting up a board.

use chess_types::{Color, FenError, Square};
use thiserror::Error;

/// Errors from setting up a board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("{0} has no king")]
    MissingKing(Color),

    #[error("{0} has more than one king")]
    TooManyKings(Color),

    #[error("pawn on back rank at {0}")]
    PawnOnBackRank(Square),

    #[error("en passant square {0} does not follow a double pawn push")]
    InvalidEnPassant(Square),
}
