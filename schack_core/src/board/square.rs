use std::{
    fmt::{Display, Write},
    str::FromStr,
};

use paste::paste;
use thiserror::Error;

/// A square on the board.
///
/// Stored as the index `8 * rank + file`, so a1 is 0, h1 is 7, a2 is 8 and h8
/// is 63. Ranks and files are both zero-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

macro_rules! square_consts {
    ($($rank:literal),*) => {
        paste! {
            $(
                pub const [<A $rank>]: Self = Self::new_unchecked($rank - 1, 0);
                pub const [<B $rank>]: Self = Self::new_unchecked($rank - 1, 1);
                pub const [<C $rank>]: Self = Self::new_unchecked($rank - 1, 2);
                pub const [<D $rank>]: Self = Self::new_unchecked($rank - 1, 3);
                pub const [<E $rank>]: Self = Self::new_unchecked($rank - 1, 4);
                pub const [<F $rank>]: Self = Self::new_unchecked($rank - 1, 5);
                pub const [<G $rank>]: Self = Self::new_unchecked($rank - 1, 6);
                pub const [<H $rank>]: Self = Self::new_unchecked($rank - 1, 7);
            )*
        }
    };
}

impl Square {
    square_consts!(1, 2, 3, 4, 5, 6, 7, 8);

    pub const fn new(rank: u8, file: u8) -> Option<Self> {
        if rank >= 8 || file >= 8 {
            None
        } else {
            Some(Self(8 * rank + file))
        }
    }

    /// Wraps out-of-range coordinates around instead of failing. Only use
    /// with coordinates already known to be on the board.
    pub const fn new_unchecked(rank: u8, file: u8) -> Self {
        Self(rank.wrapping_mul(8).wrapping_add(file) % 64)
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 64 {
            Some(Self(index as _))
        } else {
            None
        }
    }

    pub const fn from_index_unchecked(index: usize) -> Self {
        Self((index % 64) as _)
    }

    pub const fn index(self) -> usize {
        self.0 as _
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Moves the square by a raw index delta, e.g. `8` is one rank up.
    ///
    /// Does not detect wrapping around the edge of the board, so callers must
    /// only use this for offsets they know stay on the board.
    pub const fn offset(self, delta: i8) -> Self {
        Self((self.0 as i8).wrapping_add(delta).rem_euclid(64) as u8)
    }

    /// Returns true for light squares (h1 is light, a1 is dark).
    pub const fn is_light(self) -> bool {
        (self.rank() + self.file()) % 2 == 1
    }

    /// Iterates over all 64 squares, from a1 to h8.
    pub fn all() -> impl Iterator<Item = Self> + Clone {
        (0..64).map(Self)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char((self.file() + b'a') as _)?;
        f.write_char((self.rank() + b'1') as _)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid square `{0}`")]
pub struct ParseSquareError(pub String);

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSquareError(s.to_string());

        let mut char_iter = s.chars();
        let file = char_iter.next().ok_or_else(err)?;
        let rank = char_iter.next().ok_or_else(err)?;
        if char_iter.next().is_some() {
            return Err(err());
        }

        let rank = (rank as i32) - ('1' as i32);
        let file = (file as i32) - ('a' as i32);
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Ok(Square::new_unchecked(rank as _, file as _))
        } else {
            Err(err())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn square_constants_match_coordinates() {
        assert_eq!(Square::A1, Square::new(0, 0).unwrap());
        assert_eq!(Square::H1.index(), 7);
        assert_eq!(Square::A2.index(), 8);
        assert_eq!(Square::E4, Square::new(3, 4).unwrap());
        assert_eq!(Square::H8.index(), 63);
    }

    #[test]
    fn square_new_rejects_out_of_range() {
        assert_eq!(Square::new(8, 0), None);
        assert_eq!(Square::new(0, 8), None);
        assert_eq!(Square::from_index(64), None);
    }

    #[test]
    fn square_parse_and_display() {
        for square in Square::all() {
            assert_eq!(square.to_string().parse(), Ok(square));
        }

        assert_eq!("e4".parse(), Ok(Square::E4));
        assert_eq!(
            Square::from_str("i1"),
            Err(ParseSquareError("i1".to_string()))
        );
        assert_eq!(
            Square::from_str("a9"),
            Err(ParseSquareError("a9".to_string()))
        );
        assert_eq!(
            Square::from_str("a10"),
            Err(ParseSquareError("a10".to_string()))
        );
        assert_eq!(Square::from_str(""), Err(ParseSquareError("".to_string())));
    }

    #[test]
    fn square_colors() {
        assert!(!Square::A1.is_light());
        assert!(Square::H1.is_light());
        assert!(Square::D1.is_light());
        assert!(!Square::E1.is_light());
        assert!(!Square::H8.is_light());
    }

    #[test]
    fn square_offset() {
        assert_eq!(Square::E2.offset(8), Square::E3);
        assert_eq!(Square::E2.offset(16), Square::E4);
        assert_eq!(Square::E7.offset(-16), Square::E5);
        assert_eq!(Square::D4.offset(9), Square::E5);
    }
}
