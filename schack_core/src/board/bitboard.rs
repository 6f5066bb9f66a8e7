use std::{fmt::Debug, str::FromStr};

use super::Square;

/// A set of squares, one bit per square (bit 0 is a1, bit 63 is h8).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self(u64::MAX);

    pub const RANK_1: Self = Self(0x00000000000000FF);
    pub const RANK_3: Self = Self(0x0000000000FF0000);
    pub const RANK_4: Self = Self(0x00000000FF000000);
    pub const RANK_5: Self = Self(0x000000FF00000000);
    pub const RANK_6: Self = Self(0x0000FF0000000000);
    pub const RANK_8: Self = Self(0xFF00000000000000);

    pub const A_FILE: Self = Self(0x0101010101010101);
    pub const B_FILE: Self = Self(0x0202020202020202);
    pub const G_FILE: Self = Self(0x4040404040404040);
    pub const H_FILE: Self = Self(0x8080808080808080);

    pub const LIGHT_SQUARES: Self = Self(0x55AA55AA55AA55AA);
    pub const DARK_SQUARES: Self = Self(!Self::LIGHT_SQUARES.0);

    pub const fn rank_mask(rank: u8) -> Self {
        Self(Self::RANK_1.0 << (8 * (rank % 8)))
    }

    pub const fn has_piece(self) -> bool {
        self.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn and(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn not(self) -> Self {
        Self(!self.0)
    }

    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn step_north(self) -> Self {
        Self(self.0 << 8)
    }

    pub const fn step_south(self) -> Self {
        Self(self.0 >> 8)
    }

    pub const fn step_east(self) -> Self {
        Self((self.0 << 1) & !Self::A_FILE.0)
    }

    pub const fn step_west(self) -> Self {
        Self((self.0 >> 1) & !Self::H_FILE.0)
    }

    pub const fn step_north_east(self) -> Self {
        Self((self.0 << 9) & !Self::A_FILE.0)
    }

    pub const fn step_north_west(self) -> Self {
        Self((self.0 << 7) & !Self::H_FILE.0)
    }

    pub const fn step_south_east(self) -> Self {
        Self((self.0 >> 7) & !Self::A_FILE.0)
    }

    pub const fn step_south_west(self) -> Self {
        Self((self.0 >> 9) & !Self::H_FILE.0)
    }

    pub const fn pop_count(self) -> u32 {
        self.0.count_ones()
    }

    /// Lowest set square, if any.
    pub const fn lsb(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(Square::from_index_unchecked(self.0.trailing_zeros() as _))
        }
    }

    /// Highest set square, if any.
    pub const fn msb(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(Square::from_index_unchecked(
                63 - self.0.leading_zeros() as usize,
            ))
        }
    }

    /// Returns the square of a single-square bitboard, or [`None`] if the
    /// bitboard is empty or has more than one square set.
    pub const fn to_square(self) -> Option<Square> {
        if self.0.count_ones() == 1 {
            self.lsb()
        } else {
            None
        }
    }

    pub const fn from_index(index: usize) -> Self {
        Self(1 << (index % 64))
    }

    pub const fn from_square(square: Square) -> Self {
        Self(1 << square.get())
    }

    pub const fn get(self, square: Square) -> bool {
        self.0 & (1 << square.get()) != 0
    }

    pub fn set(&mut self, square: Square) {
        self.0 |= 1 << square.get();
    }

    pub fn toggle(&mut self, square: Square) {
        self.0 ^= 1 << square.get();
    }

    pub fn reset(&mut self, square: Square) {
        self.0 &= !(1 << square.get());
    }

    /// Iterates over the set squares in ascending order.
    pub fn squares(self) -> SquareIter {
        SquareIter(self.0)
    }
}

impl Debug for Bitboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_str("Bitboard(\n")?;
        for rank in (0..8).rev() {
            f.write_str("    ")?;
            for file in 0..8 {
                let square = Square::new_unchecked(rank, file);
                f.write_str(" ")?;
                f.write_str(if self.get(square) { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        f.write_str(")")
    }
}

/// Parses an 8x8 diagram, rank 8 first, where `#` marks a set square and `.`
/// an empty one. Whitespace is ignored.
impl FromStr for Bitboard {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Bitboard::EMPTY;
        let mut square_iter = (0..8)
            .rev()
            .flat_map(|rank| (0..8).map(move |file| Square::new_unchecked(rank, file)));

        for c in s.chars().filter(|c| !c.is_whitespace()) {
            let square = square_iter.next().ok_or(())?;
            match c {
                '#' => board.set(square),
                '.' => (),
                _ => return Err(()),
            }
        }

        if square_iter.next().is_some() {
            return Err(());
        }

        Ok(board)
    }
}

impl std::ops::BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl std::ops::BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs
    }
}

impl std::ops::BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs
    }
}

impl std::ops::BitXor for Bitboard {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl std::ops::BitXorAssign for Bitboard {
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs
    }
}

impl std::ops::Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl std::ops::Shl<u8> for Bitboard {
    type Output = Self;

    fn shl(self, rhs: u8) -> Self {
        Self(self.0 << rhs)
    }
}

impl std::ops::Shr<u8> for Bitboard {
    type Output = Self;

    fn shr(self, rhs: u8) -> Self {
        Self(self.0 >> rhs)
    }
}

/// Iterator over the squares of a [`Bitboard`], lowest first.
#[derive(Debug, Clone)]
pub struct SquareIter(u64);

impl Iterator for SquareIter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            let index = self.0.trailing_zeros();
            self.0 &= self.0 - 1;
            Some(Square::from_index_unchecked(index as _))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count_ones() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for SquareIter {}
