//! Board state with reversible move application.

use crate::attacks::is_square_attacked;
use crate::movegen::{generate_evasions, generate_pseudo, MoveList};
use crate::zobrist::{ZobristKeys, ZOBRIST};
use crate::{Bitboard, BoardError};
use chess_types::{
    CastlingRight, CastlingRights, Color, Fen, File, Move, Piece, PieceKind, Rank, Square,
};
use std::fmt;

/// Scalar state that a move overwrites and that cannot be recomputed from
/// the move itself.
#[derive(Debug, Clone, Copy)]
struct UndoRecord {
    hash: u64,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
    captured: Option<Piece>,
}

/// A chess position with an undo stack.
///
/// Pieces live in twelve bitboards indexed by [`Piece::index`]. The three
/// occupancy boards are derived from them after every change and the hash is
/// kept incrementally.
///
/// A board is mutated in strict LIFO order: every [`Board::move_piece`] must
/// be matched by an [`Board::undo_move`] with the same move before any
/// earlier move is undone.
#[derive(Clone)]
pub struct Board {
    pieces: [Bitboard; 12],
    occ_white: Bitboard,
    occ_black: Bitboard,
    occ_all: Bitboard,
    side: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
    hash: u64,
    keys: &'static ZobristKeys,
    history: Vec<UndoRecord>,
}

impl Board {
    /// The standard starting position, hashed with the process-wide keys.
    pub fn new() -> Self {
        Self::with_keys(&ZOBRIST)
    }

    /// The standard starting position, hashed with `keys`.
    pub fn with_keys(keys: &'static ZobristKeys) -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Self::empty(keys);
        for color in Color::ALL {
            let pawn = Piece::new(PieceKind::Pawn, color);
            for (file, kind) in File::ALL.into_iter().zip(BACK_RANK) {
                let piece = Piece::new(kind, color);
                board.pieces[piece.index()].set(Square::new(file, color.back_rank()));
                board.pieces[pawn.index()].set(Square::new(file, color.pawn_rank()));
            }
        }
        board.castling = CastlingRights::ALL;
        board.update_occupancy();
        board.hash = board.compute_hash();
        board
    }

    fn empty(keys: &'static ZobristKeys) -> Self {
        Board {
            pieces: [Bitboard::EMPTY; 12],
            occ_white: Bitboard::EMPTY,
            occ_black: Bitboard::EMPTY,
            occ_all: Bitboard::EMPTY,
            side: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
            keys,
            history: Vec::new(),
        }
    }

    /// Sets up a position from FEN text.
    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        Self::from_fen_with_keys(fen, &ZOBRIST)
    }

    /// Sets up a position from FEN text, hashed with `keys`.
    pub fn from_fen_with_keys(fen: &str, keys: &'static ZobristKeys) -> Result<Self, BoardError> {
        let fen = Fen::parse(fen)?;
        let mut board = Self::empty(keys);

        for sq in Square::all() {
            if let Some(piece) = fen.placement[sq.index() as usize] {
                if piece.kind() == PieceKind::Pawn
                    && (sq.rank() == Rank::R1 || sq.rank() == Rank::R8)
                {
                    return Err(BoardError::PawnOnBackRank(sq));
                }
                board.pieces[piece.index()].set(sq);
            }
        }

        for color in Color::ALL {
            match board.pieces(Piece::new(PieceKind::King, color)).count() {
                0 => return Err(BoardError::MissingKing(color)),
                1 => {}
                _ => return Err(BoardError::TooManyKings(color)),
            }
        }

        board.side = fen.side_to_move;
        board.castling = fen.castling;
        board.halfmove_clock = fen.halfmove_clock;
        board.fullmove_number = fen.fullmove_number.max(1);
        board.update_occupancy();

        if let Some(ep) = fen.en_passant {
            board.validate_en_passant(ep)?;
            board.en_passant = Some(ep);
        }

        board.hash = board.compute_hash();
        Ok(board)
    }

    /// The target must sit behind a pawn of the side that just moved, on the
    /// square that pawn skipped.
    fn validate_en_passant(&self, ep: Square) -> Result<(), BoardError> {
        let us = self.side;
        let them = us.opposite();
        let expected_rank = match us {
            Color::White => Rank::R6,
            Color::Black => Rank::R3,
        };
        let pushed = ep.index() as i8 - us.pawn_push();
        let pawn_there = Square::from_index(pushed as u8)
            .is_some_and(|sq| self.pieces(Piece::new(PieceKind::Pawn, them)).contains(sq));

        if ep.rank() != expected_rank || self.occ_all.contains(ep) || !pawn_there {
            return Err(BoardError::InvalidEnPassant(ep));
        }
        Ok(())
    }

    /// FEN text of the current position.
    pub fn to_fen(&self) -> String {
        let mut placement = [None; 64];
        for sq in Square::all() {
            placement[sq.index() as usize] = self.piece_at(sq);
        }
        Fen {
            placement,
            side_to_move: self.side,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_string()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Incrementally maintained Zobrist hash.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Keys this board hashes with.
    #[inline]
    pub fn keys(&self) -> &'static ZobristKeys {
        self.keys
    }

    #[inline]
    pub fn pieces(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.index()]
    }

    /// All twelve piece bitboards, indexed by [`Piece::index`].
    #[inline]
    pub fn piece_bitboards(&self) -> &[Bitboard; 12] {
        &self.pieces
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        match color {
            Color::White => self.occ_white,
            Color::Black => self.occ_black,
        }
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occ_all
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        if !self.occ_all.contains(sq) {
            return None;
        }
        let color = if self.occ_white.contains(sq) {
            Color::White
        } else {
            Color::Black
        };
        Piece::of_color(color)
            .into_iter()
            .find(|piece| self.pieces[piece.index()].contains(sq))
    }

    /// Square of `color`'s king.
    ///
    /// # Panics
    ///
    /// Panics if `color` has no king, which no board built through this API
    /// can reach.
    pub fn king_square(&self, color: Color) -> Square {
        let Some(sq) = self.pieces(Piece::new(PieceKind::King, color)).lsb() else {
            panic!("{color} has no king");
        };
        sq
    }

    /// Returns true if the side to move is in check.
    pub fn in_check(&self) -> bool {
        self.is_attacked(self.king_square(self.side), self.side)
    }

    #[inline]
    fn is_attacked(&self, sq: Square, defender: Color) -> bool {
        is_square_attacked(&self.pieces, sq, defender, self.occ_all)
    }

    /// Every legal move for the side to move. Empty at checkmate and
    /// stalemate.
    ///
    /// Candidates come from the evasion generator when in check and the
    /// pseudo-legal generator otherwise; each is played and kept only if the
    /// mover's king is then safe.
    pub fn gen_legal_moves(&mut self) -> MoveList {
        let us = self.side;
        let king_sq = self.king_square(us);

        let mut candidates = MoveList::new();
        if self.is_attacked(king_sq, us) {
            generate_evasions(self, king_sq, &mut candidates);
        } else {
            generate_pseudo(self, &mut candidates);
        }

        let mut legal = MoveList::new();
        for &m in &candidates {
            self.move_piece(m);
            if !self.is_attacked(self.king_square(us), us) {
                legal.push(m);
            }
            self.undo_move(m);
        }
        legal
    }

    /// Plays `m`, which must come from [`Board::gen_legal_moves`] (or the
    /// raw generators) for this position.
    pub fn move_piece(&mut self, m: Move) {
        let us = self.side;
        let piece = m.piece();
        let from = m.from();
        let to = m.to();
        let captured = if m.is_capture() { m.captured() } else { None };

        self.history.push(UndoRecord {
            hash: self.hash,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            captured,
        });

        if let Some(ep) = self.en_passant.take() {
            self.hash ^= self.keys.en_passant_key(ep);
        }

        self.toggle(piece, from);
        self.toggle(piece, to);

        if let Some(victim) = captured {
            self.toggle(victim, capture_square(m, us));
        }

        if m.is_castle() {
            if let Some(right) = CastlingRight::from_king_destination(to) {
                let rook = Piece::new(PieceKind::Rook, us);
                self.toggle(rook, right.rook_from());
                self.toggle(rook, right.rook_to());
            }
        }

        if m.is_double_push() {
            let ep = Square::from_index_masked((from.index() as i8 + us.pawn_push()) as u8);
            self.en_passant = Some(ep);
            self.hash ^= self.keys.en_passant_key(ep);
        }

        if let Some(promotion) = m.promotion_kind() {
            self.toggle(piece, to);
            self.toggle(promotion.piece(us), to);
        }

        if piece.kind() == PieceKind::King {
            self.clear_castling_right(CastlingRight::kingside(us));
            self.clear_castling_right(CastlingRight::queenside(us));
        }
        for sq in [from, to] {
            if let Some(right) = CastlingRight::from_rook_home(sq) {
                self.clear_castling_right(right);
            }
        }

        if piece.kind() == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.side = us.opposite();
        self.hash ^= self.keys.black_to_move();

        self.update_occupancy();
    }

    /// Takes back `m`, which must be the last move played.
    ///
    /// # Panics
    ///
    /// Panics if no move has been played.
    pub fn undo_move(&mut self, m: Move) {
        self.side = self.side.opposite();
        let us = self.side;

        let Some(record) = self.history.pop() else {
            panic!("undo_move called with no move to take back");
        };
        self.hash = record.hash;
        self.castling = record.castling;
        self.en_passant = record.en_passant;
        self.halfmove_clock = record.halfmove_clock;
        self.fullmove_number = record.fullmove_number;

        let piece = m.piece();
        let from = m.from();
        let to = m.to();

        if let Some(promotion) = m.promotion_kind() {
            self.toggle_bits(promotion.piece(us), to);
            self.toggle_bits(piece, to);
        }

        if let Some(victim) = record.captured {
            self.toggle_bits(victim, capture_square(m, us));
        }

        if m.is_castle() {
            if let Some(right) = CastlingRight::from_king_destination(to) {
                let rook = Piece::new(PieceKind::Rook, us);
                self.toggle_bits(rook, right.rook_to());
                self.toggle_bits(rook, right.rook_from());
            }
        }

        self.toggle_bits(piece, to);
        self.toggle_bits(piece, from);

        self.update_occupancy();
    }

    /// Hash of the current position computed from scratch: occupied squares,
    /// castling rights, en-passant file and side to move.
    pub fn compute_hash(&self) -> u64 {
        let mut hash = 0;
        for piece in Piece::ALL {
            for sq in self.pieces(piece) {
                hash ^= self.keys.piece_key(piece, sq);
            }
        }
        for right in self.castling.iter() {
            hash ^= self.keys.castling_key(right);
        }
        if let Some(ep) = self.en_passant {
            hash ^= self.keys.en_passant_key(ep);
        }
        if self.side == Color::Black {
            hash ^= self.keys.black_to_move();
        }
        hash
    }

    /// Flips `piece` on `sq` in its bitboard and in the hash.
    #[inline]
    fn toggle(&mut self, piece: Piece, sq: Square) {
        self.pieces[piece.index()].toggle(sq);
        self.hash ^= self.keys.piece_key(piece, sq);
    }

    #[inline]
    fn toggle_bits(&mut self, piece: Piece, sq: Square) {
        self.pieces[piece.index()].toggle(sq);
    }

    #[inline]
    fn clear_castling_right(&mut self, right: CastlingRight) {
        if self.castling.remove(right) {
            self.hash ^= self.keys.castling_key(right);
        }
    }

    fn update_occupancy(&mut self) {
        let (white, black) = self.pieces.split_at(6);
        self.occ_white = white.iter().fold(Bitboard::EMPTY, |acc, bb| acc | *bb);
        self.occ_black = black.iter().fold(Bitboard::EMPTY, |acc, bb| acc | *bb);
        self.occ_all = self.occ_white | self.occ_black;
    }
}

/// Square the captured piece stood on: the destination, except for en
/// passant where the victim is one rank behind it.
#[inline]
fn capture_square(m: Move, mover: Color) -> Square {
    if m.is_en_passant() {
        Square::from_index_masked((m.to().index() as i8 - mover.pawn_push()) as u8)
    } else {
        m.to()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("fen", &self.to_fen())
            .field("hash", &format_args!("{:#018x}", self.hash))
            .field("ply", &self.history.len())
            .finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            write!(f, "{} ", rank.to_char())?;
            for file in File::ALL {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{} ", piece.to_fen_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")?;
        write!(f, "{}", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    fn find(board: &mut Board, uci: &str) -> Move {
        *board
            .gen_legal_moves()
            .iter()
            .find(|m| m.to_uci() == uci)
            .unwrap_or_else(|| panic!("{uci} is not legal in {}", board.to_fen()))
    }

    #[test]
    fn new_is_startpos() {
        let board = Board::new();
        assert_eq!(board.to_fen(), Fen::STARTPOS);
        assert_eq!(board.hash(), board.compute_hash());
        assert_eq!(board.occupied().count(), 32);
        assert_eq!(board.king_square(Color::White), Square::E1);
        assert_eq!(board.king_square(Color::Black), Square::E8);
        assert!(!board.in_check());
    }

    #[test]
    fn default_matches_from_fen() {
        let parsed = Board::from_fen(Fen::STARTPOS).unwrap();
        let built = Board::default();
        assert_eq!(parsed.hash(), built.hash());
        assert_eq!(parsed.piece_bitboards(), built.piece_bitboards());
    }

    #[test]
    fn double_push_sets_en_passant() {
        let mut board = Board::new();
        let m = find(&mut board, "e2e4");
        board.move_piece(m);
        assert_eq!(board.en_passant(), Some(Square::E3));
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.hash(), board.compute_hash());
        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let mut board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        let before = board.to_fen();
        let hash = board.hash();
        let m = find(&mut board, "e5d6");
        assert!(m.is_en_passant());

        board.move_piece(m);
        assert_eq!(board.piece_at(Square::D5), None);
        assert_eq!(board.piece_at(Square::D6), Some(Piece::WhitePawn));
        assert_eq!(board.hash(), board.compute_hash());

        board.undo_move(m);
        assert_eq!(board.to_fen(), before);
        assert_eq!(board.hash(), hash);
    }

    #[test]
    fn castling_moves_the_rook_and_clears_rights() {
        let mut board = Board::from_fen(KIWIPETE).unwrap();
        let m = find(&mut board, "e1g1");
        assert!(m.is_castle());

        board.move_piece(m);
        assert_eq!(board.piece_at(Square::F1), Some(Piece::WhiteRook));
        assert_eq!(board.piece_at(Square::H1), None);
        assert!(!board.castling_rights().contains(CastlingRight::WhiteKingside));
        assert!(!board.castling_rights().contains(CastlingRight::WhiteQueenside));
        assert!(board.castling_rights().contains(CastlingRight::BlackKingside));
        assert_eq!(board.hash(), board.compute_hash());

        board.undo_move(m);
        assert_eq!(board.to_fen(), KIWIPETE);
    }

    #[test]
    fn capturing_a_home_rook_clears_its_right() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let m = find(&mut board, "a1a8");
        board.move_piece(m);
        assert_eq!(board.castling_rights(), CastlingRights::new(0b0101));
        assert_eq!(board.hash(), board.compute_hash());
    }

    #[test]
    fn clearing_a_cleared_right_leaves_the_hash_alone() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kkq - 0 1").unwrap();
        let m = find(&mut board, "a1a2");
        board.move_piece(m);
        assert_eq!(board.castling_rights(), CastlingRights::new(0b1101));
        assert_eq!(board.hash(), board.compute_hash());
    }

    #[test]
    fn promotion_replaces_the_pawn() {
        let mut board = Board::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 3 40").unwrap();
        let m = find(&mut board, "b7b8n");
        board.move_piece(m);
        assert_eq!(board.piece_at(Square::B8), Some(Piece::WhiteKnight));
        assert!(board.pieces(Piece::WhitePawn).is_empty());
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.hash(), board.compute_hash());
        board.undo_move(m);
        assert_eq!(board.to_fen(), "4k3/1P6/8/8/8/8/8/4K3 w - - 3 40");
    }

    #[test]
    fn clocks_advance_and_rewind() {
        let mut board = Board::new();
        let knight = find(&mut board, "g1f3");
        board.move_piece(knight);
        assert_eq!(board.halfmove_clock(), 1);
        assert_eq!(board.fullmove_number(), 1);

        let reply = find(&mut board, "g8f6");
        board.move_piece(reply);
        assert_eq!(board.halfmove_clock(), 2);
        assert_eq!(board.fullmove_number(), 2);

        board.undo_move(reply);
        board.undo_move(knight);
        assert_eq!(board.to_fen(), Fen::STARTPOS);
    }

    #[test]
    fn undo_restores_saturated_fullmove_number() {
        let fen = "4k3/8/8/8/8/8/8/4K3 b - - 0 65535";
        let mut board = Board::from_fen(fen).unwrap();
        let m = find(&mut board, "e8d8");
        board.move_piece(m);
        assert_eq!(board.fullmove_number(), u16::MAX);
        board.undo_move(m);
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    #[should_panic(expected = "no move to take back")]
    fn undo_without_move_panics() {
        let mut board = Board::new();
        board.undo_move(Move::quiet(Square::E2, Square::E4, Piece::WhitePawn));
    }

    #[test]
    fn checkmate_and_stalemate_have_no_moves() {
        let mut mate =
            Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        assert!(mate.in_check());
        assert!(mate.gen_legal_moves().is_empty());

        let mut stalemate = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(!stalemate.in_check());
        assert!(stalemate.gen_legal_moves().is_empty());
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let mut board = Board::from_fen("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let moves = board.gen_legal_moves();
        assert!(moves.iter().all(|m| m.piece() != Piece::WhiteKnight));
    }

    #[test]
    fn alternate_keys_hash_differently() {
        static OTHER: ZobristKeys = ZobristKeys::with_seed(7);
        let board = Board::with_keys(&OTHER);
        assert_eq!(board.hash(), board.compute_hash());
        assert_ne!(board.hash(), Board::new().hash());
        assert_eq!(board.to_fen(), Fen::STARTPOS);
    }

    #[test]
    fn fen_validation() {
        assert!(matches!(
            Board::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(BoardError::MissingKing(Color::Black))
        ));
        assert!(matches!(
            Board::from_fen("4k3/8/8/8/8/8/8/3KK3 w - - 0 1"),
            Err(BoardError::TooManyKings(Color::White))
        ));
        assert!(matches!(
            Board::from_fen("P3k3/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(BoardError::PawnOnBackRank(Square::A8))
        ));
        assert!(matches!(
            Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - e6 0 1"),
            Err(BoardError::InvalidEnPassant(Square::E6))
        ));
        assert!(matches!(
            Board::from_fen("4k3/8/8/4p3/8/8/8/4K3 b - e6 0 1"),
            Err(BoardError::InvalidEnPassant(Square::E6))
        ));
        assert!(matches!(
            Board::from_fen("not a fen"),
            Err(BoardError::Fen(_))
        ));
    }

    #[test]
    fn display_draws_the_board() {
        let text = Board::new().to_string();
        assert!(text.starts_with("8 r n b q k b n r"));
        assert!(text.ends_with(Fen::STARTPOS));
    }
}
