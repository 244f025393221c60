//! Castling rights.

use crate::{Color, Square};

/// One of the four independent castling rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CastlingRight {
    WhiteKingside = 0b0001,
    WhiteQueenside = 0b0010,
    BlackKingside = 0b0100,
    BlackQueenside = 0b1000,
}

impl CastlingRight {
    pub const ALL: [CastlingRight; 4] = [
        CastlingRight::WhiteKingside,
        CastlingRight::WhiteQueenside,
        CastlingRight::BlackKingside,
        CastlingRight::BlackQueenside,
    ];

    #[inline]
    pub const fn kingside(color: Color) -> Self {
        match color {
            Color::White => CastlingRight::WhiteKingside,
            Color::Black => CastlingRight::BlackKingside,
        }
    }

    #[inline]
    pub const fn queenside(color: Color) -> Self {
        match color {
            Color::White => CastlingRight::WhiteQueenside,
            Color::Black => CastlingRight::BlackQueenside,
        }
    }

    /// The mask bit of this right.
    #[inline]
    pub const fn bit(self) -> u8 {
        self as u8
    }

    /// Position of this right in key tables (0-3).
    #[inline]
    pub const fn index(self) -> usize {
        (self as u8).trailing_zeros() as usize
    }

    #[inline]
    pub const fn color(self) -> Color {
        match self {
            CastlingRight::WhiteKingside | CastlingRight::WhiteQueenside => Color::White,
            CastlingRight::BlackKingside | CastlingRight::BlackQueenside => Color::Black,
        }
    }

    #[inline]
    pub const fn is_kingside(self) -> bool {
        matches!(
            self,
            CastlingRight::WhiteKingside | CastlingRight::BlackKingside
        )
    }

    #[inline]
    pub const fn king_from(self) -> Square {
        match self.color() {
            Color::White => Square::E1,
            Color::Black => Square::E8,
        }
    }

    #[inline]
    pub const fn king_to(self) -> Square {
        match self {
            CastlingRight::WhiteKingside => Square::G1,
            CastlingRight::WhiteQueenside => Square::C1,
            CastlingRight::BlackKingside => Square::G8,
            CastlingRight::BlackQueenside => Square::C8,
        }
    }

    /// Home square of the rook this right refers to.
    #[inline]
    pub const fn rook_from(self) -> Square {
        match self {
            CastlingRight::WhiteKingside => Square::H1,
            CastlingRight::WhiteQueenside => Square::A1,
            CastlingRight::BlackKingside => Square::H8,
            CastlingRight::BlackQueenside => Square::A8,
        }
    }

    #[inline]
    pub const fn rook_to(self) -> Square {
        match self {
            CastlingRight::WhiteKingside => Square::F1,
            CastlingRight::WhiteQueenside => Square::D1,
            CastlingRight::BlackKingside => Square::F8,
            CastlingRight::BlackQueenside => Square::D8,
        }
    }

    /// The right whose king lands on `king_to`, if any.
    pub const fn from_king_destination(king_to: Square) -> Option<Self> {
        match king_to.index() {
            6 => Some(CastlingRight::WhiteKingside),
            2 => Some(CastlingRight::WhiteQueenside),
            62 => Some(CastlingRight::BlackKingside),
            58 => Some(CastlingRight::BlackQueenside),
            _ => None,
        }
    }

    /// The right tied to a rook standing on `square`, if `square` is a rook
    /// home square.
    pub const fn from_rook_home(square: Square) -> Option<Self> {
        match square.index() {
            7 => Some(CastlingRight::WhiteKingside),
            0 => Some(CastlingRight::WhiteQueenside),
            63 => Some(CastlingRight::BlackKingside),
            56 => Some(CastlingRight::BlackQueenside),
            _ => None,
        }
    }

    /// FEN letter.
    pub const fn to_char(self) -> char {
        match self {
            CastlingRight::WhiteKingside => 'K',
            CastlingRight::WhiteQueenside => 'Q',
            CastlingRight::BlackKingside => 'k',
            CastlingRight::BlackQueenside => 'q',
        }
    }
}

/// Bitmask of the castling rights still available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates rights from a raw mask; bits above the low four are dropped.
    #[inline]
    pub const fn new(bits: u8) -> Self {
        CastlingRights(bits & 0b1111)
    }

    #[inline]
    pub const fn contains(self, right: CastlingRight) -> bool {
        self.0 & right.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, right: CastlingRight) {
        self.0 |= right.bit();
    }

    /// Clears `right`. Returns true if it was set.
    #[inline]
    pub fn remove(&mut self, right: CastlingRight) -> bool {
        let had = self.contains(right);
        self.0 &= !right.bit();
        had
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Iterates the rights that are set, in [`CastlingRight::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = CastlingRight> {
        CastlingRight::ALL
            .into_iter()
            .filter(move |right| self.contains(*right))
    }
}
