//! Moves that answer a check.
//!
//! Only three things can: moving the king, capturing the checker, or
//! interposing on the line between a sliding checker and the king. With two
//! checkers only the king can move.

use super::{offset, push_pawn_move, MoveList};
use crate::attacks::{attackers_to, is_square_attacked, scan_attacks, targets};
use crate::geometry::ray_between;
use crate::{Bitboard, Board};
use chess_types::{Color, Move, Piece, PieceKind, Square};

const NON_KING: [PieceKind; 5] = [
    PieceKind::Pawn,
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
];

/// Generates check evasions for the side to move, whose king stands on
/// `king_sq`.
///
/// The king must be in check.
pub fn generate_evasions(board: &Board, king_sq: Square, out: &mut MoveList) {
    let us = board.side_to_move();
    let pieces = board.piece_bitboards();
    let occupied = board.occupied();
    debug_assert!(
        is_square_attacked(pieces, king_sq, us, occupied),
        "evasions requested for a king that is not in check"
    );

    generate_king_moves(board, king_sq, us, out);

    let checkers = attackers_to(pieces, king_sq, us, occupied);
    if checkers.has_more_than_one() {
        return;
    }
    let Some(checker) = checkers.lsb() else {
        return;
    };
    let Some(checker_piece) = board.piece_at(checker) else {
        return;
    };

    for kind in NON_KING {
        let piece = Piece::new(kind, us);
        for from in scan_attacks(pieces, checker, piece, occupied) {
            if kind == PieceKind::Pawn {
                push_pawn_move(out, from, checker, piece, Some(checker_piece));
            } else {
                out.push(Move::capture(from, checker, piece, checker_piece));
            }
        }
    }

    let block = if checker_piece.kind().is_slider() {
        ray_between(king_sq, checker)
    } else {
        Bitboard::EMPTY
    };

    for sq in block {
        generate_pawn_blocks(board, sq, us, out);
        for kind in [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
        ] {
            let piece = Piece::new(kind, us);
            for from in scan_attacks(pieces, sq, piece, occupied) {
                out.push(Move::quiet(from, sq, piece));
            }
        }
    }

    generate_en_passant_evasions(board, checker, block, us, out);
}

/// King steps onto squares that stay safe once the king has left its origin.
fn generate_king_moves(board: &Board, king_sq: Square, us: Color, out: &mut MoveList) {
    let king = Piece::new(PieceKind::King, us);
    let pieces = board.piece_bitboards();
    let without_king = board.occupied() & !Bitboard::from_square(king_sq);

    for to in targets(king, king_sq, board.occupied()) & !board.occupancy(us) {
        if is_square_attacked(pieces, to, us, without_king) {
            continue;
        }
        match board.piece_at(to) {
            Some(victim) => out.push(Move::capture(king_sq, to, king, victim)),
            None => out.push(Move::quiet(king_sq, to, king)),
        }
    }
}

/// Pawn pushes landing on the empty square `sq`.
fn generate_pawn_blocks(board: &Board, sq: Square, us: Color, out: &mut MoveList) {
    let pawn = Piece::new(PieceKind::Pawn, us);
    let pawns = board.pieces(pawn);
    let push = us.pawn_push();

    let Some(behind) = offset(sq, -push) else {
        return;
    };
    if pawns.contains(behind) {
        push_pawn_move(out, behind, sq, pawn, None);
        return;
    }
    if board.occupied().contains(behind) {
        return;
    }
    if let Some(start) = offset(behind, -push) {
        if start.rank() == us.pawn_rank() && pawns.contains(start) {
            out.push(Move::double_push(start, sq, pawn));
        }
    }
}

/// En passant resolves a check when the target square blocks the line or the
/// pawn it removes is the checker itself.
fn generate_en_passant_evasions(
    board: &Board,
    checker: Square,
    block: Bitboard,
    us: Color,
    out: &mut MoveList,
) {
    let Some(ep) = board.en_passant() else {
        return;
    };
    let removed = offset(ep, -us.pawn_push());
    if !block.contains(ep) && removed != Some(checker) {
        return;
    }

    let pawn = Piece::new(PieceKind::Pawn, us);
    for from in scan_attacks(board.piece_bitboards(), ep, pawn, board.occupied()) {
        out.push(Move::en_passant(from, ep, pawn));
    }
}
