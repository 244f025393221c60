//! Bitboard chess board with legal move generation.
//!
//! This crate provides:
//! - [`Bitboard`] - 64-bit square sets
//! - [`Board`] - position state with reversible move application and an
//!   incrementally maintained Zobrist hash
//! - Attack detection ([`attacks`]) and move generation ([`movegen`])
//! - [`perft`](perft::perft) node counting for validating the generator
//!
//! # Architecture
//!
//! Each of the twelve piece codes owns a bitboard. Attacks are found by
//! walking per-piece step tables rather than precomputed lookup tables.
//! Legal moves are produced by generating pseudo-legal candidates (or check
//! evasions when in check), playing each one and keeping those that leave
//! the mover's king safe.
//!
//! # Example
//!
//! ```
//! use chess_board::{perft::perft, Board};
//!
//! let mut board = Board::new();
//! let moves = board.gen_legal_moves();
//! assert_eq!(moves.len(), 20);
//!
//! let e4 = *moves.iter().find(|m| m.to_uci() == "e2e4").unwrap();
//! board.move_piece(e4);
//! assert_eq!(
//!     board.to_fen(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
//! );
//! board.undo_move(e4);
//!
//! assert_eq!(perft(&mut board, 2), 400);
//! ```

pub mod attacks;
mod bitboard;
mod board;
mod error;
pub mod geometry;
pub mod movegen;
pub mod perft;
pub mod zobrist;

pub use bitboard::{Bitboard, BitboardIter};
pub use board::Board;
pub use error::BoardError;
pub use movegen::MoveList;
pub use zobrist::{ZobristKeys, ZOBRIST};
