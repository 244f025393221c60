//! Attack detection by walking step tables.
//!
//! Each piece kind has a table of deltas, a step limit and a hop check.
//! To find who attacks a square we walk the deltas *backwards* from the
//! target: for every piece but the pawn the table is symmetric so this is the
//! same walk, and for pawns it turns "squares a pawn captures onto" into
//! "squares a capturing pawn stands on".

use crate::geometry::{diag_step, knight_step, ray_step};
use crate::Bitboard;
use chess_types::{Color, Piece, PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hop {
    Ray,
    Knight,
    Diagonal,
}

/// Movement pattern of one kind of piece.
#[derive(Debug, Clone, Copy)]
struct StepTable {
    deltas: &'static [i8],
    max_steps: u8,
    hop: Hop,
}

const WHITE_PAWN: StepTable = StepTable {
    deltas: &[7, 9],
    max_steps: 1,
    hop: Hop::Diagonal,
};

const BLACK_PAWN: StepTable = StepTable {
    deltas: &[-7, -9],
    max_steps: 1,
    hop: Hop::Diagonal,
};

const KNIGHT: StepTable = StepTable {
    deltas: &[6, 10, 15, 17, -6, -10, -15, -17],
    max_steps: 1,
    hop: Hop::Knight,
};

const KING: StepTable = StepTable {
    deltas: &[1, -1, 8, -8, 7, -7, 9, -9],
    max_steps: 1,
    hop: Hop::Ray,
};

const ROOK: StepTable = StepTable {
    deltas: &[1, -1, 8, -8],
    max_steps: 7,
    hop: Hop::Ray,
};

const BISHOP: StepTable = StepTable {
    deltas: &[7, -7, 9, -9],
    max_steps: 7,
    hop: Hop::Ray,
};

const QUEEN: StepTable = StepTable {
    deltas: &[1, -1, 8, -8, 7, -7, 9, -9],
    max_steps: 7,
    hop: Hop::Ray,
};

impl StepTable {
    const fn for_piece(piece: Piece) -> StepTable {
        match piece.kind() {
            PieceKind::Pawn => match piece.color() {
                Color::White => WHITE_PAWN,
                Color::Black => BLACK_PAWN,
            },
            PieceKind::Rook => ROOK,
            PieceKind::Knight => KNIGHT,
            PieceKind::Bishop => BISHOP,
            PieceKind::Queen => QUEEN,
            PieceKind::King => KING,
        }
    }

    #[inline]
    fn step(&self, from: u8, delta: i8) -> Option<u8> {
        match self.hop {
            Hop::Ray => ray_step(from, delta),
            Hop::Knight => knight_step(from, delta),
            Hop::Diagonal => diag_step(from, delta),
        }
    }

    /// Walks every delta (negated when `reverse`) from `from`, stopping each
    /// ray at the first occupied square. `visit` sees every square reached,
    /// blocker included, and returns true to end the whole walk.
    #[inline]
    fn walk<F>(&self, from: Square, reverse: bool, occupied: Bitboard, mut visit: F)
    where
        F: FnMut(Square) -> bool,
    {
        for &delta in self.deltas {
            let delta = if reverse { -delta } else { delta };
            let mut current = from.index();
            for _ in 0..self.max_steps {
                let Some(next) = self.step(current, delta) else {
                    break;
                };
                let sq = Square::from_index_masked(next);
                if visit(sq) {
                    return;
                }
                if occupied.contains(sq) {
                    break;
                }
                current = next;
            }
        }
    }
}

/// Returns true if some `piece` on the board attacks `from`.
pub fn scan_rays(pieces: &[Bitboard; 12], from: Square, piece: Piece, occupied: Bitboard) -> bool {
    let origins = pieces[piece.index()];
    if origins.is_empty() {
        return false;
    }
    let mut hit = false;
    StepTable::for_piece(piece).walk(from, true, occupied, |sq| {
        hit = origins.contains(sq);
        hit
    });
    hit
}

/// Every square holding a `piece` that attacks `sq`.
pub fn scan_attacks(
    pieces: &[Bitboard; 12],
    sq: Square,
    piece: Piece,
    occupied: Bitboard,
) -> Bitboard {
    let origins = pieces[piece.index()];
    let mut found = Bitboard::EMPTY;
    if origins.is_empty() {
        return found;
    }
    StepTable::for_piece(piece).walk(sq, true, occupied, |from| {
        if origins.contains(from) {
            found.set(from);
        }
        false
    });
    found
}

/// Every enemy piece attacking `sq`, where the enemy is the side opposing
/// `defender`.
pub fn attackers_to(
    pieces: &[Bitboard; 12],
    sq: Square,
    defender: Color,
    occupied: Bitboard,
) -> Bitboard {
    Piece::of_color(defender.opposite())
        .into_iter()
        .fold(Bitboard::EMPTY, |acc, piece| {
            acc | scan_attacks(pieces, sq, piece, occupied)
        })
}

/// Returns true if any piece of the side opposing `defender` attacks `sq`.
pub fn is_square_attacked(
    pieces: &[Bitboard; 12],
    sq: Square,
    defender: Color,
    occupied: Bitboard,
) -> bool {
    Piece::of_color(defender.opposite())
        .into_iter()
        .any(|piece| scan_rays(pieces, sq, piece, occupied))
}

/// Squares a `piece` standing on `from` attacks, own pieces included.
///
/// Pawns report their two capture squares, not their pushes.
pub fn targets(piece: Piece, from: Square, occupied: Bitboard) -> Bitboard {
    let mut found = Bitboard::EMPTY;
    StepTable::for_piece(piece).walk(from, false, occupied, |sq| {
        found.set(sq);
        false
    });
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(list: &[(Piece, Square)]) -> ([Bitboard; 12], Bitboard) {
        let mut pieces = [Bitboard::EMPTY; 12];
        let mut occupied = Bitboard::EMPTY;
        for &(piece, sq) in list {
            pieces[piece.index()].set(sq);
            occupied.set(sq);
        }
        (pieces, occupied)
    }

    #[test]
    fn knight_targets_in_corner() {
        let t = targets(Piece::WhiteKnight, Square::A1, Bitboard::EMPTY);
        assert_eq!(t.count(), 2);
        assert!(t.contains(Square::B3));
        assert!(t.contains(Square::C2));
    }

    #[test]
    fn knight_targets_center() {
        assert_eq!(targets(Piece::BlackKnight, Square::E4, Bitboard::EMPTY).count(), 8);
    }

    #[test]
    fn king_targets_do_not_wrap() {
        let t = targets(Piece::WhiteKing, Square::H4, Bitboard::EMPTY);
        assert_eq!(t.count(), 5);
        assert!(!t.contains(Square::A4));
        assert!(!t.contains(Square::A5));
    }

    #[test]
    fn rook_targets_stop_at_blocker() {
        let occupied = Bitboard::from_square(Square::E6);
        let t = targets(Piece::WhiteRook, Square::E4, occupied);
        assert!(t.contains(Square::E5));
        assert!(t.contains(Square::E6));
        assert!(!t.contains(Square::E7));
        assert_eq!(t.count(), 7 + 3 + 2);
    }

    #[test]
    fn empty_board_slider_counts() {
        assert_eq!(targets(Piece::WhiteRook, Square::A1, Bitboard::EMPTY).count(), 14);
        assert_eq!(targets(Piece::WhiteBishop, Square::D4, Bitboard::EMPTY).count(), 13);
        assert_eq!(targets(Piece::BlackQueen, Square::D4, Bitboard::EMPTY).count(), 27);
    }

    #[test]
    fn pawn_targets_are_colored() {
        let white = targets(Piece::WhitePawn, Square::E4, Bitboard::EMPTY);
        assert_eq!(
            white,
            Bitboard::from_square(Square::D5) | Bitboard::from_square(Square::F5)
        );
        let black = targets(Piece::BlackPawn, Square::A5, Bitboard::EMPTY);
        assert_eq!(black, Bitboard::from_square(Square::B4));
    }

    #[test]
    fn pawn_scan_is_reversed() {
        let (pieces, occupied) = place(&[(Piece::WhitePawn, Square::D4)]);
        assert!(scan_rays(&pieces, Square::E5, Piece::WhitePawn, occupied));
        assert!(scan_rays(&pieces, Square::C5, Piece::WhitePawn, occupied));
        assert!(!scan_rays(&pieces, Square::E3, Piece::WhitePawn, occupied));
        assert!(!scan_rays(&pieces, Square::D5, Piece::WhitePawn, occupied));
    }

    #[test]
    fn pawn_on_h_file_does_not_wrap() {
        let (pieces, occupied) = place(&[(Piece::BlackPawn, Square::H5)]);
        assert!(scan_rays(&pieces, Square::G4, Piece::BlackPawn, occupied));
        assert!(!scan_rays(&pieces, Square::A4, Piece::BlackPawn, occupied));
    }

    #[test]
    fn blocked_slider_does_not_attack() {
        let (pieces, occupied) = place(&[
            (Piece::BlackRook, Square::E8),
            (Piece::WhitePawn, Square::E4),
        ]);
        assert!(scan_rays(&pieces, Square::E5, Piece::BlackRook, occupied));
        assert!(!scan_rays(&pieces, Square::E2, Piece::BlackRook, occupied));
        assert!(!is_square_attacked(&pieces, Square::E1, Color::White, occupied));
        assert!(is_square_attacked(&pieces, Square::E4, Color::White, occupied));
    }

    #[test]
    fn scan_attacks_collects_all_origins() {
        let (pieces, occupied) = place(&[
            (Piece::WhiteKnight, Square::D3),
            (Piece::WhiteKnight, Square::F3),
            (Piece::WhiteKnight, Square::B1),
        ]);
        let origins = scan_attacks(&pieces, Square::E5, Piece::WhiteKnight, occupied);
        assert_eq!(origins.count(), 2);
        assert!(origins.contains(Square::D3));
        assert!(!origins.contains(Square::B1));
        assert!(origins.contains(Square::F3));
    }

    #[test]
    fn attackers_only_counts_enemies() {
        let (pieces, occupied) = place(&[
            (Piece::WhiteKing, Square::E1),
            (Piece::WhiteRook, Square::A1),
            (Piece::BlackBishop, Square::B4),
            (Piece::BlackKnight, Square::D3),
        ]);
        let attackers = attackers_to(&pieces, Square::E1, Color::White, occupied);
        assert_eq!(attackers.count(), 2);
        assert!(attackers.contains(Square::B4));
        assert!(attackers.contains(Square::D3));
        assert!(attackers_to(&pieces, Square::E1, Color::Black, occupied).contains(Square::A1));
    }
}
