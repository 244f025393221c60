//! Square arithmetic on the flat 0-63 board.
//!
//! Steps are signed deltas added to a square index: ±1 along a rank, ±8
//! along a file, ±7 / ±9 along diagonals, and the eight knight offsets. A
//! flat index has no notion of board edges, so every step must pass
//! [`square_in_board`] and then a file-wrap check before it is shifted into a
//! bitboard.

use crate::Bitboard;
use chess_types::Square;

#[inline]
pub const fn rank_of(sq: u8) -> u8 {
    sq / 8
}

#[inline]
pub const fn file_of(sq: u8) -> u8 {
    sq % 8
}

#[inline]
pub const fn square_in_board(sq: i8) -> bool {
    0 <= sq && sq < 64
}

/// File displacement of one step along a ray.
///
/// # Panics
///
/// Panics if `delta` is not one of the eight ray deltas. Step tables are
/// fixed data, so this is a logic error rather than bad input.
#[inline]
pub const fn step_dx(delta: i8) -> i8 {
    match delta {
        1 | 9 | -7 => 1,
        -1 | -9 | 7 => -1,
        8 | -8 => 0,
        _ => panic!("not a ray delta"),
    }
}

/// True if stepping `delta` from `prev` to `next` crossed the board edge and
/// reappeared on the far file.
#[inline]
pub const fn wrapped(prev: u8, next: u8, delta: i8) -> bool {
    let df = (file_of(next) as i8 - file_of(prev) as i8).abs();
    df != step_dx(delta).abs()
}

#[inline]
const fn displacement(from: u8, to: u8) -> (i8, i8) {
    let df = (file_of(to) as i8 - file_of(from) as i8).abs();
    let dr = (rank_of(to) as i8 - rank_of(from) as i8).abs();
    (df, dr)
}

/// True if `from` and `to` are a knight's jump apart.
#[inline]
pub const fn knight_hop_valid(from: u8, to: u8) -> bool {
    matches!(displacement(from, to), (1, 2) | (2, 1))
}

/// True if `from` and `to` are diagonal neighbours.
#[inline]
pub const fn diag_hop_valid(from: u8, to: u8) -> bool {
    matches!(displacement(from, to), (1, 1))
}

/// One ray step from `from`, or `None` if it leaves the board.
#[inline]
pub const fn ray_step(from: u8, delta: i8) -> Option<u8> {
    let next = from as i8 + delta;
    if !square_in_board(next) || wrapped(from, next as u8, delta) {
        None
    } else {
        Some(next as u8)
    }
}

/// One knight jump from `from`, or `None` if it leaves the board.
#[inline]
pub const fn knight_step(from: u8, delta: i8) -> Option<u8> {
    let next = from as i8 + delta;
    if !square_in_board(next) || !knight_hop_valid(from, next as u8) {
        None
    } else {
        Some(next as u8)
    }
}

/// One diagonal pawn step from `from`, or `None` if it leaves the board.
#[inline]
pub const fn diag_step(from: u8, delta: i8) -> Option<u8> {
    let next = from as i8 + delta;
    if !square_in_board(next) || !diag_hop_valid(from, next as u8) {
        None
    } else {
        Some(next as u8)
    }
}

/// Squares strictly between `a` and `b` when they share a rank, file or
/// diagonal; empty otherwise.
pub fn ray_between(a: Square, b: Square) -> Bitboard {
    let (a, b) = (a.index(), b.index());
    let dr = rank_of(b) as i8 - rank_of(a) as i8;
    let df = file_of(b) as i8 - file_of(a) as i8;

    if !(dr == 0 || df == 0 || dr.abs() == df.abs()) {
        return Bitboard::EMPTY;
    }

    let step = dr.signum() * 8 + df.signum();
    let mut mask = Bitboard::EMPTY;
    let mut sq = a as i8 + step;
    while sq != b as i8 {
        mask.set(Square::from_index_masked(sq as u8));
        sq += step;
    }
    mask
}
