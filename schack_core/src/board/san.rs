use std::fmt::{Display, Write};

use super::{Move, PieceKind, Position, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disambiguator {
    File(u8),
    Rank(u8),
    Square(Square),
}

impl Display for Disambiguator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Disambiguator::File(file) => f.write_char((file + b'a') as char),
            Disambiguator::Rank(rank) => f.write_char((rank + b'1') as char),
            Disambiguator::Square(square) => write!(f, "{square}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RegularSanRepr {
    kind: PieceKind,
    disambiguator: Option<Disambiguator>,
    is_capture: bool,
    to_square: Square,
    promotion: Option<PieceKind>,
}

impl Display for RegularSanRepr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.kind != PieceKind::Pawn {
            f.write_char(self.kind.as_uppercase_char())?;
        }

        if let Some(disambiguator) = self.disambiguator {
            write!(f, "{disambiguator}")?;
        }

        if self.is_capture {
            f.write_char('x')?;
        }

        write!(f, "{}", self.to_square)?;

        if let Some(promotion) = self.promotion {
            f.write_char('=')?;
            f.write_char(promotion.as_uppercase_char())?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SanRepr {
    Regular(RegularSanRepr),
    Castle { is_long: bool },
}

impl Display for SanRepr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SanRepr::Regular(r) => write!(f, "{r}"),
            SanRepr::Castle { is_long: false } => write!(f, "O-O"),
            SanRepr::Castle { is_long: true } => write!(f, "O-O-O"),
        }
    }
}

/// A move in standard algebraic notation, e.g. `Nbd7`, `exd5`, `O-O` or
/// `e8=Q#`.
///
/// Only obtainable from [`Position::san`], since writing a move this way
/// depends on the other legal moves in the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct San {
    repr: SanRepr,
    is_check: bool,
    is_checkmate: bool,
}

impl San {
    pub fn is_check(&self) -> bool {
        self.is_check
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_checkmate
    }
}

impl Display for San {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.repr)?;

        if self.is_checkmate {
            write!(f, "#")?;
        } else if self.is_check {
            write!(f, "+")?;
        }

        Ok(())
    }
}

impl Position {
    /// Writes a legal move in standard algebraic notation. Returns `None` if
    /// the move is not legal here.
    ///
    /// # Examples
    ///
    /// ```
    /// # use schack_core::board::{Position, Square};
    /// let position = Position::starting_position();
    /// let nf3 = position.find_move(Square::G1, Square::F3, None).unwrap();
    /// assert_eq!(position.san(nf3).unwrap().to_string(), "Nf3");
    /// ```
    pub fn san(&self, the_move: Move) -> Option<San> {
        let legal_moves = self.legal_moves();
        if !legal_moves.contains(&the_move) {
            return None;
        }

        let kind = self.board.piece_at(the_move.from_square())?.kind();

        let repr = if the_move.is_castle() {
            let is_long = the_move.to_square().file() == 2;
            SanRepr::Castle { is_long }
        } else {
            let disambiguator = if kind == PieceKind::Pawn {
                the_move
                    .is_capture()
                    .then(|| Disambiguator::File(the_move.from_square().file()))
            } else {
                self.san_disambiguator(the_move, kind, &legal_moves)
            };

            SanRepr::Regular(RegularSanRepr {
                kind,
                disambiguator,
                is_capture: the_move.is_capture(),
                to_square: the_move.to_square(),
                promotion: the_move.promotion(),
            })
        };

        let after = self.apply_unchecked(the_move);
        let is_check = after.is_in_check();
        let is_checkmate = is_check && after.legal_moves().is_empty();

        Some(San {
            repr,
            is_check,
            is_checkmate,
        })
    }

    fn san_disambiguator(
        &self,
        the_move: Move,
        kind: PieceKind,
        legal_moves: &[Move],
    ) -> Option<Disambiguator> {
        let from = the_move.from_square();
        let mut ambiguous_piece_exists = false;
        let mut same_rank = false;
        let mut same_file = false;

        for m in legal_moves {
            let other = m.from_square();
            if other != from
                && m.to_square() == the_move.to_square()
                && self.board.piece_at(other).map(|p| p.kind()) == Some(kind)
            {
                ambiguous_piece_exists = true;

                same_rank |= other.rank() == from.rank();
                same_file |= other.file() == from.file();
            }
        }

        if !ambiguous_piece_exists {
            None
        } else if !same_file {
            Some(Disambiguator::File(from.file()))
        } else if !same_rank {
            Some(Disambiguator::Rank(from.rank()))
        } else {
            Some(Disambiguator::Square(from))
        }
    }
}
