//! Piece codes.
//!
//! A [`Piece`] is one of twelve colored codes laid out so that the first six
//! are White and the last six are the Black counterparts in the same order.
//! The code doubles as the index of the piece's bitboard.

use crate::Color;

/// The six kinds of piece, in piece-code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Rook = 1,
    Knight = 2,
    Bishop = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns true for rook, bishop and queen.
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen)
    }

    const fn fen_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Rook => "Rook",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// A colored piece code, 0-11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    WhitePawn = 0,
    WhiteRook = 1,
    WhiteKnight = 2,
    WhiteBishop = 3,
    WhiteQueen = 4,
    WhiteKing = 5,
    BlackPawn = 6,
    BlackRook = 7,
    BlackKnight = 8,
    BlackBishop = 9,
    BlackQueen = 10,
    BlackKing = 11,
}

impl Piece {
    /// Number of piece codes.
    pub const COUNT: usize = 12;

    /// All codes in index order.
    pub const ALL: [Piece; 12] = [
        Piece::WhitePawn,
        Piece::WhiteRook,
        Piece::WhiteKnight,
        Piece::WhiteBishop,
        Piece::WhiteQueen,
        Piece::WhiteKing,
        Piece::BlackPawn,
        Piece::BlackRook,
        Piece::BlackKnight,
        Piece::BlackBishop,
        Piece::BlackQueen,
        Piece::BlackKing,
    ];

    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self::ALL[color.index() * 6 + kind.index()]
    }

    /// Decodes a piece code; anything above 11 is `None`.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < Self::COUNT {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn color(self) -> Color {
        if (self as u8) < 6 {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    pub const fn kind(self) -> PieceKind {
        PieceKind::ALL[(self as usize) % 6]
    }

    /// The same kind of piece for the other side.
    #[inline]
    pub const fn opposite(self) -> Self {
        Self::ALL[(self as usize + 6) % Self::COUNT]
    }

    /// The six codes belonging to `color`, pawn first.
    #[inline]
    pub fn of_color(color: Color) -> [Piece; 6] {
        PieceKind::ALL.map(|kind| Piece::new(kind, color))
    }

    /// FEN letter: uppercase for White.
    pub const fn to_fen_char(self) -> char {
        let c = self.kind().fen_char();
        match self.color() {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub const fn from_fen_char(c: char) -> Option<Piece> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'r' => PieceKind::Rook,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some(Piece::new(kind, color))
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color(), self.kind())
    }
}

/// What a pawn turns into on the last rank.
///
/// Packed into moves as 1-4; 0 is reserved for "no promotion".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Promotion {
    Rook = 1,
    Knight = 2,
    Bishop = 3,
    Queen = 4,
}

impl Promotion {
    pub const ALL: [Promotion; 4] = [
        Promotion::Rook,
        Promotion::Knight,
        Promotion::Bishop,
        Promotion::Queen,
    ];

    /// Packed code, 1-4.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decodes a packed code; 0 and anything above 4 are `None`.
    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Promotion::Rook),
            2 => Some(Promotion::Knight),
            3 => Some(Promotion::Bishop),
            4 => Some(Promotion::Queen),
            _ => None,
        }
    }

    #[inline]
    pub const fn kind(self) -> PieceKind {
        match self {
            Promotion::Rook => PieceKind::Rook,
            Promotion::Knight => PieceKind::Knight,
            Promotion::Bishop => PieceKind::Bishop,
            Promotion::Queen => PieceKind::Queen,
        }
    }

    /// The piece code this promotion produces for `color`.
    #[inline]
    pub const fn piece(self, color: Color) -> Piece {
        Piece::new(self.kind(), color)
    }

    /// UCI suffix letter.
    pub const fn to_char(self) -> char {
        self.kind().fen_char()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_codes_follow_layout() {
        assert_eq!(Piece::WhitePawn.index(), 0);
        assert_eq!(Piece::WhiteKing.index(), 5);
        assert_eq!(Piece::BlackPawn.index(), 6);
        assert_eq!(Piece::BlackKing.index(), 11);
        for (i, piece) in Piece::ALL.iter().enumerate() {
            assert_eq!(piece.index(), i);
            assert_eq!(Piece::from_index(i as u8), Some(*piece));
        }
        assert_eq!(Piece::from_index(12), None);
        assert_eq!(Piece::from_index(0xF), None);
    }

    #[test]
    fn opposite_swaps_color_keeps_kind() {
        for piece in Piece::ALL {
            let other = piece.opposite();
            assert_eq!(other.kind(), piece.kind());
            assert_ne!(other.color(), piece.color());
            assert_eq!(other.opposite(), piece);
        }
        assert_eq!(Piece::WhiteQueen.opposite(), Piece::BlackQueen);
        assert_eq!(Piece::BlackPawn.opposite(), Piece::WhitePawn);
    }

    #[test]
    fn of_color_lists_six_pieces() {
        assert_eq!(Piece::of_color(Color::White)[0], Piece::WhitePawn);
        assert_eq!(Piece::of_color(Color::Black)[5], Piece::BlackKing);
    }

    #[test]
    fn fen_chars() {
        assert_eq!(Piece::WhitePawn.to_fen_char(), 'P');
        assert_eq!(Piece::BlackKnight.to_fen_char(), 'n');
        assert_eq!(Piece::from_fen_char('K'), Some(Piece::WhiteKing));
        assert_eq!(Piece::from_fen_char('r'), Some(Piece::BlackRook));
        assert_eq!(Piece::from_fen_char('x'), None);
    }

    #[test]
    fn promotion_codes() {
        assert_eq!(Promotion::from_code(0), None);
        for promo in Promotion::ALL {
            assert_eq!(Promotion::from_code(promo.code()), Some(promo));
        }
        assert_eq!(Promotion::Knight.piece(Color::Black), Piece::BlackKnight);
        assert_eq!(Promotion::Queen.to_char(), 'q');
    }

    #[test]
    fn is_slider() {
        assert!(!PieceKind::Pawn.is_slider());
        assert!(!PieceKind::Knight.is_slider());
        assert!(PieceKind::Bishop.is_slider());
        assert!(PieceKind::Rook.is_slider());
        assert!(PieceKind::Queen.is_slider());
        assert!(!PieceKind::King.is_slider());
    }
}
