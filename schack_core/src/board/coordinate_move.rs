use std::{
    fmt::{Display, Write},
    str::FromStr,
};

use thiserror::Error;

use super::{Move, PieceKind, Square};

/// A move given only by its coordinates, as typed by a user or a test.
///
/// Specifies the start and end squares as well as an optional promotion,
/// e.g.:
///
/// * `e2e4`
/// * `e7e5`
/// * `e1g1` (white short castling)
/// * `e7e8q` (for promotion)
///
/// Unlike [`Move`] this carries no classification. Resolve it against a
/// position with [`Position::find_move`](super::Position::find_move) to get
/// the fully classified move.
///
/// ```
/// # use schack_core::board::{CoordinateMove, Square};
/// assert_eq!(
///     "e2e4".parse(),
///     Ok(CoordinateMove {
///         from: Square::E2,
///         to: Square::E4,
///         promotion: None,
///     })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinateMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Display for CoordinateMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.from.fmt(f)?;
        self.to.fmt(f)?;
        if let Some(promotion) = self.promotion {
            f.write_char(promotion.as_lowercase_char())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCoordinateMoveError {
    #[error("Expected 4 or 5 characters")]
    IncorrectLength,
    #[error("Invalid square {0}")]
    InvalidSquare(String),
    #[error("Invalid promotion target `{0}`")]
    InvalidPromoTarget(char),
}

impl FromStr for CoordinateMove {
    type Err = ParseCoordinateMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars = s.chars().collect::<Vec<_>>();
        if chars.len() != 4 && chars.len() != 5 {
            return Err(ParseCoordinateMoveError::IncorrectLength);
        }

        let from_str = String::from_iter(&chars[0..2]);
        let from = from_str
            .parse()
            .map_err(|_| ParseCoordinateMoveError::InvalidSquare(from_str))?;

        let to_str = String::from_iter(&chars[2..4]);
        let to = to_str
            .parse()
            .map_err(|_| ParseCoordinateMoveError::InvalidSquare(to_str))?;

        let promotion = match chars.get(4) {
            Some(&c) => Some(
                PieceKind::try_from_char(c)
                    .filter(|kind| PieceKind::PROMOTIONS.contains(kind))
                    .ok_or(ParseCoordinateMoveError::InvalidPromoTarget(c))?,
            ),
            None => None,
        };

        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}

impl From<Move> for CoordinateMove {
    fn from(value: Move) -> Self {
        Self {
            from: value.from_square(),
            to: value.to_square(),
            promotion: value.promotion(),
        }
    }
}
