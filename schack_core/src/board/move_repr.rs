use std::fmt::{Debug, Display, Write};

use super::{PieceKind, Square};

/// Classification of a move, as computed by the move generator.
///
/// Callers never choose this themselves: a [`Move`] only counts as legal if
/// its kind matches the one the generator derives for the same squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MoveKind {
    /// Any move that does not capture and is not one of the special moves
    /// below. Includes non-capturing promotions.
    Quiet,
    /// A capture of the piece standing on the destination square. Includes
    /// capturing promotions.
    Capture,
    /// A pawn capture of a pawn that just double-stepped past it.
    EnPassant,
    KingsideCastle,
    QueensideCastle,
    /// The initial two-square step of a pawn.
    DoublePawnPush,
}

/// A chess move.
///
/// Holds the source and destination squares, the promotion target if a pawn
/// reaches the last rank, and the [`MoveKind`]. For castling the squares are
/// those of the king; the rook's squares follow from
/// [`Move::castling_rook_squares`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
    kind: MoveKind,
}

impl Move {
    /// Constructs a new [`Move`].
    ///
    /// Note that this does not check that the move makes any sense; legality
    /// is decided against a position by
    /// [`Position::apply`](super::Position::apply).
    pub const fn new(
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
        kind: MoveKind,
    ) -> Self {
        Self {
            from,
            to,
            promotion,
            kind,
        }
    }

    /// Convenience alias for [`MoveBuilder::new`].
    pub const fn builder(from: Square, to: Square) -> MoveBuilder {
        MoveBuilder::new(from, to)
    }

    pub const fn from_square(self) -> Square {
        self.from
    }

    pub const fn to_square(self) -> Square {
        self.to
    }

    pub const fn promotion(self) -> Option<PieceKind> {
        self.promotion
    }

    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    /// True for regular captures and en passant.
    pub const fn is_capture(self) -> bool {
        matches!(self.kind, MoveKind::Capture | MoveKind::EnPassant)
    }

    pub const fn is_en_passant(self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    pub const fn is_double_pawn_push(self) -> bool {
        matches!(self.kind, MoveKind::DoublePawnPush)
    }

    pub const fn is_castle(self) -> bool {
        matches!(
            self.kind,
            MoveKind::KingsideCastle | MoveKind::QueensideCastle
        )
    }

    /// The square of the pawn removed by an en passant capture: same rank as
    /// the start square, same file as the end square.
    ///
    /// Defined, but meaningless, for other moves.
    pub const fn en_passant_square(self) -> Square {
        Square::new_unchecked(self.from.rank(), self.to.file())
    }

    /// For a castling move, the source and destination squares of the rook.
    ///
    /// Defined, but meaningless, for other moves.
    pub const fn castling_rook_squares(self) -> (Square, Square) {
        let rank = self.from.rank();
        match self.kind {
            MoveKind::QueensideCastle => (
                Square::new_unchecked(rank, 0),
                Square::new_unchecked(rank, 3),
            ),
            _ => (
                Square::new_unchecked(rank, 7),
                Square::new_unchecked(rank, 5),
            ),
        }
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Move")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("promotion", &self.promotion)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Coordinate notation, e.g. `e2e4` or `e7e8q`.
impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.from, f)?;
        Display::fmt(&self.to, f)?;
        if let Some(promotion) = self.promotion {
            f.write_char(promotion.as_lowercase_char())?;
        }
        Ok(())
    }
}

/// Builder struct for convenient construction of a [`Move`], mostly in tests.
///
/// Starts out as a quiet move; chain the other methods to change the kind or
/// add a promotion, then call [`MoveBuilder::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveBuilder {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub kind: MoveKind,
}

impl MoveBuilder {
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
            kind: MoveKind::Quiet,
        }
    }

    pub const fn captures(self) -> Self {
        Self {
            kind: MoveKind::Capture,
            ..self
        }
    }

    pub const fn promotes_to(self, promotion: PieceKind) -> Self {
        Self {
            promotion: Some(promotion),
            ..self
        }
    }

    pub const fn is_double_pawn_push(self) -> Self {
        Self {
            kind: MoveKind::DoublePawnPush,
            ..self
        }
    }

    pub const fn is_en_passant(self) -> Self {
        Self {
            kind: MoveKind::EnPassant,
            ..self
        }
    }

    pub const fn is_kingside_castle(self) -> Self {
        Self {
            kind: MoveKind::KingsideCastle,
            ..self
        }
    }

    pub const fn is_queenside_castle(self) -> Self {
        Self {
            kind: MoveKind::QueensideCastle,
            ..self
        }
    }

    pub const fn build(self) -> Move {
        Move::new(self.from, self.to, self.promotion, self.kind)
    }
}
