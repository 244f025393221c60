//! Packed move representation.

use crate::{Piece, Promotion, Square};
use std::fmt;

/// Boolean properties of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MoveFlags(u8);

impl MoveFlags {
    pub const NONE: MoveFlags = MoveFlags(0);
    pub const CAPTURE: MoveFlags = MoveFlags(0b0001);
    pub const CASTLE: MoveFlags = MoveFlags(0b0010);
    pub const DOUBLE_PUSH: MoveFlags = MoveFlags(0b0100);
    pub const EN_PASSANT: MoveFlags = MoveFlags(0b1000);

    /// Builds flags from the low four bits of `bits`.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        MoveFlags(bits & 0b1111)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: MoveFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn union(self, other: MoveFlags) -> Self {
        MoveFlags(self.0 | other.0)
    }
}

impl std::ops::BitOr for MoveFlags {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// A move, packed into 27 bits of a `u32`.
///
/// | bits  | field                                 |
/// |-------|---------------------------------------|
/// | 0-5   | from square                           |
/// | 6-11  | to square                             |
/// | 12-15 | moved piece code                      |
/// | 16    | capture                               |
/// | 17    | castle                                |
/// | 18    | double pawn push                      |
/// | 19    | en passant                            |
/// | 20-22 | promotion code, 0 = none              |
/// | 23-26 | captured piece code, `0xF` = none     |
///
/// Moves are produced by the generator and never mutated. Equality compares
/// every field.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    const SQUARE_MASK: u32 = 0x3F;
    const PIECE_MASK: u32 = 0xF;
    const PROMO_MASK: u32 = 0x7;
    const FLAG_MASK: u32 = 0xF;

    const FROM_SHIFT: u32 = 0;
    const TO_SHIFT: u32 = 6;
    const MOVED_SHIFT: u32 = 12;
    const FLAG_SHIFT: u32 = 16;
    const PROMO_SHIFT: u32 = 20;
    const CAPTURED_SHIFT: u32 = 23;

    const NO_PIECE: u32 = 0xF;

    /// Placeholder for unused move-list slots; a1a1 by a white pawn.
    pub const NULL: Move = Move(0);

    /// Packs every field.
    #[inline]
    pub const fn pack(
        from: Square,
        to: Square,
        piece: Piece,
        flags: MoveFlags,
        captured: Option<Piece>,
        promotion: Option<Promotion>,
    ) -> Self {
        let captured_code = match captured {
            Some(p) => p as u32,
            None => Self::NO_PIECE,
        };
        let promo_code = match promotion {
            Some(p) => p.code() as u32,
            None => 0,
        };
        Move(
            ((from.index() as u32) << Self::FROM_SHIFT)
                | ((to.index() as u32) << Self::TO_SHIFT)
                | ((piece as u32) << Self::MOVED_SHIFT)
                | ((flags.bits() as u32) << Self::FLAG_SHIFT)
                | (promo_code << Self::PROMO_SHIFT)
                | (captured_code << Self::CAPTURED_SHIFT),
        )
    }

    /// A non-capturing move.
    #[inline]
    pub const fn quiet(from: Square, to: Square, piece: Piece) -> Self {
        Self::pack(from, to, piece, MoveFlags::NONE, None, None)
    }

    /// A pawn advancing two squares from its starting rank.
    #[inline]
    pub const fn double_push(from: Square, to: Square, piece: Piece) -> Self {
        Self::pack(from, to, piece, MoveFlags::DOUBLE_PUSH, None, None)
    }

    /// The king's half of a castling move.
    #[inline]
    pub const fn castle(from: Square, to: Square, king: Piece) -> Self {
        Self::pack(from, to, king, MoveFlags::CASTLE, None, None)
    }

    #[inline]
    pub const fn capture(from: Square, to: Square, piece: Piece, captured: Piece) -> Self {
        Self::pack(from, to, piece, MoveFlags::CAPTURE, Some(captured), None)
    }

    /// `to` is the en-passant target square, not the captured pawn's square.
    #[inline]
    pub const fn en_passant(from: Square, to: Square, pawn: Piece) -> Self {
        Self::pack(
            from,
            to,
            pawn,
            MoveFlags::CAPTURE.union(MoveFlags::EN_PASSANT),
            Some(pawn.opposite()),
            None,
        )
    }

    /// A promotion, capturing when `captured` is set.
    #[inline]
    pub const fn promotion(
        from: Square,
        to: Square,
        pawn: Piece,
        captured: Option<Piece>,
        promotion: Promotion,
    ) -> Self {
        let flags = if captured.is_some() {
            MoveFlags::CAPTURE
        } else {
            MoveFlags::NONE
        };
        Self::pack(from, to, pawn, flags, captured, Some(promotion))
    }

    #[inline]
    pub const fn from(self) -> Square {
        Square::from_index_masked(((self.0 >> Self::FROM_SHIFT) & Self::SQUARE_MASK) as u8)
    }

    #[inline]
    pub const fn to(self) -> Square {
        Square::from_index_masked(((self.0 >> Self::TO_SHIFT) & Self::SQUARE_MASK) as u8)
    }

    /// The piece that moves. Always valid for moves built by the
    /// constructors, which only accept a [`Piece`].
    #[inline]
    pub const fn piece(self) -> Piece {
        let code = (self.0 >> Self::MOVED_SHIFT) & Self::PIECE_MASK;
        Piece::ALL[code as usize % Piece::COUNT]
    }

    #[inline]
    pub const fn flags(self) -> MoveFlags {
        MoveFlags::from_bits(((self.0 >> Self::FLAG_SHIFT) & Self::FLAG_MASK) as u8)
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.flags().contains(MoveFlags::CAPTURE)
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        self.flags().contains(MoveFlags::CASTLE)
    }

    #[inline]
    pub const fn is_double_push(self) -> bool {
        self.flags().contains(MoveFlags::DOUBLE_PUSH)
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.flags().contains(MoveFlags::EN_PASSANT)
    }

    #[inline]
    pub const fn promotion_kind(self) -> Option<Promotion> {
        Promotion::from_code(((self.0 >> Self::PROMO_SHIFT) & Self::PROMO_MASK) as u8)
    }

    #[inline]
    pub const fn captured(self) -> Option<Piece> {
        Piece::from_index(((self.0 >> Self::CAPTURED_SHIFT) & Self::PIECE_MASK) as u8)
    }

    /// The packed word.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// UCI text such as `e2e4` or `e7e8q`.
    pub fn to_uci(self) -> String {
        match self.promotion_kind() {
            Some(promo) => format!("{}{}{}", self.from(), self.to(), promo.to_char()),
            None => format!("{}{}", self.from(), self.to()),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {:?}", self.to_uci(), self.piece())?;
        if let Some(captured) = self.captured() {
            write!(f, " x{:?}", captured)?;
        }
        if self.is_castle() {
            write!(f, " castle")?;
        }
        if self.is_double_push() {
            write!(f, " double")?;
        }
        if self.is_en_passant() {
            write!(f, " ep")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
