//! Zobrist hashing for position identification.
//!
//! Zobrist hashing creates a unique hash for each chess position by XORing
//! random numbers associated with:
//! - Each piece code on each square (12 × 64 = 768 values)
//! - Side to move
//! - Castling rights (4 values)
//! - En passant file (8 values)
//!
//! This allows efficient incremental updates when making moves.

use chess_types::{CastlingRight, Piece, Square};

/// Zobrist hash keys.
///
/// Generated using a fixed seed for reproducibility. A board only compares
/// meaningfully against boards hashed with the same table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZobristKeys {
    pieces: [[u64; 64]; 12],
    black_to_move: u64,
    castling: [u64; 4],
    en_passant: [u64; 8],
}

impl ZobristKeys {
    const DEFAULT_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

    /// Keys from the built-in seed.
    pub const fn new() -> Self {
        Self::with_seed(Self::DEFAULT_SEED)
    }

    /// Keys from an xorshift64 stream started at `seed`. A zero seed would
    /// produce all-zero keys, so it is replaced by the default.
    pub const fn with_seed(seed: u64) -> Self {
        const fn next_random(state: u64) -> u64 {
            let mut x = state;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        }

        let mut state = if seed == 0 { Self::DEFAULT_SEED } else { seed };
        let mut pieces = [[0u64; 64]; 12];
        let mut castling = [0u64; 4];
        let mut en_passant = [0u64; 8];

        let mut piece = 0;
        while piece < 12 {
            let mut square = 0;
            while square < 64 {
                state = next_random(state);
                pieces[piece][square] = state;
                square += 1;
            }
            piece += 1;
        }

        state = next_random(state);
        let black_to_move = state;

        let mut i = 0;
        while i < 4 {
            state = next_random(state);
            castling[i] = state;
            i += 1;
        }

        let mut i = 0;
        while i < 8 {
            state = next_random(state);
            en_passant[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant,
        }
    }

    #[inline]
    pub const fn piece_key(&self, piece: Piece, square: Square) -> u64 {
        self.pieces[piece.index()][square.index() as usize]
    }

    #[inline]
    pub const fn castling_key(&self, right: CastlingRight) -> u64 {
        self.castling[right.index()]
    }

    /// Key for an en-passant target, selected by the target's file.
    #[inline]
    pub const fn en_passant_key(&self, square: Square) -> u64 {
        self.en_passant[square.file().index() as usize]
    }

    #[inline]
    pub const fn black_to_move(&self) -> u64 {
        self.black_to_move
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide keys, built at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn zobrist_keys_are_nonzero() {
        assert_ne!(ZOBRIST.black_to_move(), 0);
        assert_ne!(ZOBRIST.piece_key(Piece::WhitePawn, Square::A1), 0);
        assert_ne!(ZOBRIST.castling_key(CastlingRight::WhiteKingside), 0);
    }

    #[test]
    fn zobrist_keys_are_unique() {
        let mut seen = HashSet::new();
        for piece in Piece::ALL {
            for sq in Square::all() {
                assert!(seen.insert(ZOBRIST.piece_key(piece, sq)));
            }
        }
        for right in CastlingRight::ALL {
            assert!(seen.insert(ZOBRIST.castling_key(right)));
        }
        assert!(seen.insert(ZOBRIST.black_to_move()));
        assert_eq!(seen.len(), 768 + 4 + 1);
    }

    #[test]
    fn en_passant_key_depends_on_file_only() {
        assert_eq!(
            ZOBRIST.en_passant_key(Square::E3),
            ZOBRIST.en_passant_key(Square::E6)
        );
        assert_ne!(
            ZOBRIST.en_passant_key(Square::E3),
            ZOBRIST.en_passant_key(Square::D3)
        );
    }

    #[test]
    fn seeds_are_reproducible() {
        assert_eq!(ZobristKeys::new(), ZOBRIST);
        assert_eq!(ZobristKeys::with_seed(42), ZobristKeys::with_seed(42));
        assert_ne!(ZobristKeys::with_seed(42), ZOBRIST);
        assert_eq!(ZobristKeys::with_seed(0), ZOBRIST);
    }
}
