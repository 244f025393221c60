//! Move generation.
//!
//! Generators read the board through a shared reference and only write into
//! a [`MoveList`]. They produce pseudo-legal moves: a move may still leave the
//! mover's king attacked, which [`Board::gen_legal_moves`] filters out.
//!
//! [`Board::gen_legal_moves`]: crate::Board::gen_legal_moves

mod evasions;
mod pseudo;

use chess_types::{Color, Move, Piece, Promotion, Square};

pub use evasions::generate_evasions;
pub use pseudo::generate_pseudo;

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub const MAX_MOVES: usize = 256;

    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn contains(&self, m: Move) -> bool {
        self.as_slice().contains(&m)
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Square `delta` steps away from `sq`, if still on the board.
#[inline]
fn offset(sq: Square, delta: i8) -> Option<Square> {
    let next = sq.index() as i8 + delta;
    if crate::geometry::square_in_board(next) {
        Square::from_index(next as u8)
    } else {
        None
    }
}

/// Pushes one pawn move to `to`, expanding it into the four promotions when
/// `to` is on the pawn's last rank.
#[inline]
fn push_pawn_move(
    out: &mut MoveList,
    from: Square,
    to: Square,
    pawn: Piece,
    captured: Option<Piece>,
) {
    let color: Color = pawn.color();
    if to.rank() == color.promotion_rank() {
        for promotion in Promotion::ALL {
            out.push(Move::promotion(from, to, pawn, captured, promotion));
        }
    } else {
        match captured {
            Some(victim) => out.push(Move::capture(from, to, pawn, victim)),
            None => out.push(Move::quiet(from, to, pawn)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_list_push_and_retain() {
        let mut list = MoveList::new();
        assert!(list.is_empty());
        list.push(Move::quiet(Square::E2, Square::E3, Piece::WhitePawn));
        list.push(Move::double_push(Square::E2, Square::E4, Piece::WhitePawn));
        list.push(Move::quiet(Square::G1, Square::F3, Piece::WhiteKnight));
        assert_eq!(list.len(), 3);
        assert_eq!(list[1].to(), Square::E4);

        list.retain(|m| m.piece() == Piece::WhitePawn);
        assert_eq!(list.len(), 2);
        assert!(list.contains(Move::quiet(Square::E2, Square::E3, Piece::WhitePawn)));

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn promotion_expands_to_four() {
        let mut list = MoveList::new();
        push_pawn_move(&mut list, Square::B7, Square::B8, Piece::WhitePawn, None);
        assert_eq!(list.len(), 4);
        assert!(list.iter().all(|m| m.promotion_kind().is_some()));

        list.clear();
        push_pawn_move(
            &mut list,
            Square::B2,
            Square::A1,
            Piece::BlackPawn,
            Some(Piece::WhiteRook),
        );
        assert_eq!(list.len(), 4);
        assert!(list.iter().all(|m| m.is_capture()));
    }

    #[test]
    fn offset_bounds() {
        assert_eq!(offset(Square::E2, 8), Some(Square::E3));
        assert_eq!(offset(Square::E8, 8), None);
        assert_eq!(offset(Square::A1, -8), None);
    }
}
