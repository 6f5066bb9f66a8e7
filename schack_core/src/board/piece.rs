use std::fmt::{Debug, Display, Write};

/// The kind of a piece, without its side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may promote to, in the order the generator emits them.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Knight,
        PieceKind::Rook,
        PieceKind::Bishop,
    ];

    pub const fn white(self) -> Piece {
        Piece::new(Side::White, self)
    }

    pub const fn black(self) -> Piece {
        Piece::new(Side::Black, self)
    }

    pub const fn with_side(self, side: Side) -> Piece {
        Piece::new(side, self)
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// FEN letter of the white version of this piece.
    pub const fn as_uppercase_char(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// FEN letter of the black version of this piece.
    pub const fn as_lowercase_char(self) -> char {
        self.as_uppercase_char().to_ascii_lowercase()
    }

    pub const fn try_from_char(c: char) -> Option<Self> {
        Some(match c.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            _ => return None,
        })
    }

    /// Bishops, rooks and queens.
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Knights and bishops.
    pub const fn is_minor(self) -> bool {
        matches!(self, PieceKind::Knight | PieceKind::Bishop)
    }
}

/// One of the two players.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    #[default]
    White = 0,
    Black = 1,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::White, Side::Black];

    pub const fn is_white(self) -> bool {
        matches!(self, Side::White)
    }

    pub const fn is_black(self) -> bool {
        !self.is_white()
    }

    pub const fn flip(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rank (zero-based) the side's king and rooks start on.
    pub const fn back_rank(self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }

    /// Rank (zero-based) the side's pawns start on.
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Side::White => 1,
            Side::Black => 6,
        }
    }

    /// Index delta of a single pawn push.
    pub const fn pawn_push_offset(self) -> i8 {
        match self {
            Side::White => 8,
            Side::Black => -8,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Side::White => "White",
            Side::Black => "Black",
        })
    }
}

/// A piece on the board: a [`PieceKind`] owned by a [`Side`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Piece {
    side: Side,
    kind: PieceKind,
}

impl Piece {
    pub const WHITE_PAWN: Piece = Piece::new(Side::White, PieceKind::Pawn);
    pub const WHITE_KNIGHT: Piece = Piece::new(Side::White, PieceKind::Knight);
    pub const WHITE_BISHOP: Piece = Piece::new(Side::White, PieceKind::Bishop);
    pub const WHITE_ROOK: Piece = Piece::new(Side::White, PieceKind::Rook);
    pub const WHITE_QUEEN: Piece = Piece::new(Side::White, PieceKind::Queen);
    pub const WHITE_KING: Piece = Piece::new(Side::White, PieceKind::King);
    pub const BLACK_PAWN: Piece = Piece::new(Side::Black, PieceKind::Pawn);
    pub const BLACK_KNIGHT: Piece = Piece::new(Side::Black, PieceKind::Knight);
    pub const BLACK_BISHOP: Piece = Piece::new(Side::Black, PieceKind::Bishop);
    pub const BLACK_ROOK: Piece = Piece::new(Side::Black, PieceKind::Rook);
    pub const BLACK_QUEEN: Piece = Piece::new(Side::Black, PieceKind::Queen);
    pub const BLACK_KING: Piece = Piece::new(Side::Black, PieceKind::King);

    pub const fn new(side: Side, kind: PieceKind) -> Self {
        Self { side, kind }
    }

    pub const fn white(kind: PieceKind) -> Self {
        Self::new(Side::White, kind)
    }

    pub const fn black(kind: PieceKind) -> Self {
        Self::new(Side::Black, kind)
    }

    pub const fn side(self) -> Side {
        self.side
    }

    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    pub const fn is_white(self) -> bool {
        self.side.is_white()
    }

    pub const fn is_black(self) -> bool {
        self.side.is_black()
    }

    pub const fn is_slider(self) -> bool {
        self.kind.is_slider()
    }

    /// Dense index in `0..12`: white pieces first, then black, each in
    /// [`PieceKind`] order.
    pub const fn index(self) -> usize {
        self.side.index() * 6 + self.kind.index()
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index >= 12 {
            return None;
        }
        let side = if index < 6 { Side::White } else { Side::Black };
        Some(Self::new(side, PieceKind::ALL[index % 6]))
    }

    pub const fn as_fen_char(self) -> char {
        match self.side {
            Side::White => self.kind.as_uppercase_char(),
            Side::Black => self.kind.as_lowercase_char(),
        }
    }

    pub const fn try_from_fen_char(c: char) -> Option<Self> {
        let kind = match PieceKind::try_from_char(c) {
            Some(kind) => kind,
            None => return None,
        };

        let side = if c.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };

        Some(Self::new(side, kind))
    }

    pub fn as_unicode_char(self) -> char {
        let base = match self.side {
            Side::White => 0x2654,
            Side::Black => 0x265a,
        };
        let offset = match self.kind {
            PieceKind::King => 0,
            PieceKind::Queen => 1,
            PieceKind::Rook => 2,
            PieceKind::Bishop => 3,
            PieceKind::Knight => 4,
            PieceKind::Pawn => 5,
        };
        char::from_u32(base + offset).unwrap_or('?')
    }
}

impl Debug for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Piece")
            .field("side", &self.side)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char(self.as_fen_char())
    }
}
