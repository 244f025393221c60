//! Vocabulary types for the bitboard chess engine.
//!
//! This crate provides the values the engine passes around:
//! - [`Color`], [`Square`], [`File`] and [`Rank`] for board coordinates
//! - [`Piece`] (twelve colored codes), [`PieceKind`] and [`Promotion`]
//! - [`CastlingRight`] and [`CastlingRights`]
//! - [`Move`], a packed 27-bit move, and its [`MoveFlags`]
//! - [`Fen`] for reading and writing positions as text

mod castling;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use castling::{CastlingRight, CastlingRights};
pub use color::Color;
pub use fen::{Fen, FenError};
pub use mov::{Move, MoveFlags};
pub use piece::{Piece, PieceKind, Promotion};
pub use square::{File, Rank, Square};
