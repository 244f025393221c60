use super::{offset, push_pawn_move, MoveList};
use crate::attacks::{is_square_attacked, targets};
use crate::geometry::ray_between;
use crate::{Bitboard, Board};
use chess_types::{CastlingRight, Color, Move, Piece, PieceKind, Square};

/// Generates every pseudo-legal move for the side to move.
pub fn generate_pseudo(board: &Board, out: &mut MoveList) {
    let us = board.side_to_move();

    generate_pawn_moves(board, us, out);
    for kind in [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ] {
        generate_piece_moves(board, Piece::new(kind, us), out);
    }
    generate_castling_moves(board, us, out);
}

fn generate_pawn_moves(board: &Board, us: Color, out: &mut MoveList) {
    let pawn = Piece::new(PieceKind::Pawn, us);
    let push = us.pawn_push();
    let occupied = board.occupied();
    let enemies = board.occupancy(us.opposite());

    for from in board.pieces(pawn) {
        if let Some(one) = offset(from, push).filter(|sq| !occupied.contains(*sq)) {
            push_pawn_move(out, from, one, pawn, None);

            if from.rank() == us.pawn_rank() {
                if let Some(two) = offset(one, push).filter(|sq| !occupied.contains(*sq)) {
                    out.push(Move::double_push(from, two, pawn));
                }
            }
        }

        for to in targets(pawn, from, occupied) & enemies {
            push_pawn_move(out, from, to, pawn, board.piece_at(to));
        }

        if let Some(ep) = board.en_passant() {
            if from.rank() == us.en_passant_rank()
                && targets(pawn, from, occupied).contains(ep)
            {
                out.push(Move::en_passant(from, ep, pawn));
            }
        }
    }
}

/// Knights, sliders and the king: every attacked square not holding a
/// friendly piece.
fn generate_piece_moves(board: &Board, piece: Piece, out: &mut MoveList) {
    let occupied = board.occupied();
    let friendly = board.occupancy(piece.color());

    for from in board.pieces(piece) {
        for to in targets(piece, from, occupied) & !friendly {
            match board.piece_at(to) {
                Some(victim) => out.push(Move::capture(from, to, piece, victim)),
                None => out.push(Move::quiet(from, to, piece)),
            }
        }
    }
}

fn generate_castling_moves(board: &Board, us: Color, out: &mut MoveList) {
    let king = Piece::new(PieceKind::King, us);
    let rook = Piece::new(PieceKind::Rook, us);
    let occupied = board.occupied();

    for right in [CastlingRight::kingside(us), CastlingRight::queenside(us)] {
        if !board.castling_rights().contains(right)
            || !board.pieces(king).contains(right.king_from())
            || !board.pieces(rook).contains(right.rook_from())
        {
            continue;
        }
        if (ray_between(right.king_from(), right.rook_from()) & occupied).is_not_empty() {
            continue;
        }
        if castling_path_attacked(board, right, us) {
            continue;
        }
        out.push(Move::castle(right.king_from(), right.king_to(), king));
    }
}

/// True if the king's origin, transit or destination square is attacked.
fn castling_path_attacked(board: &Board, right: CastlingRight, us: Color) -> bool {
    let path = ray_between(right.king_from(), right.king_to())
        | Bitboard::from_square(right.king_from())
        | Bitboard::from_square(right.king_to());
    path.into_iter()
        .any(|sq: Square| is_square_attacked(board.piece_bitboards(), sq, us, board.occupied()))
}
