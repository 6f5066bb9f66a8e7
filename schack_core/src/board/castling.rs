use bitflags::bitflags;

use super::{Side, Square};

bitflags! {
    /// Represents which directions castling moves can still be played for
    /// both players.
    ///
    /// Castling is allowed if the king has not moved and the rook with which to
    /// castle has not moved (and some rules about whether the king is in check
    /// and whether any squares the king will move through or land on are
    /// attacked). These flags only record the first part: whether the king and
    /// the corresponding rook have stayed at home for the whole game so far.
    ///
    /// A right is lost for good as soon as anything moves off or onto its
    /// king or rook home square, so after the white king moves both
    /// [`WHITE_KINGSIDE`](Self::WHITE_KINGSIDE) and
    /// [`WHITE_QUEENSIDE`](Self::WHITE_QUEENSIDE) are cleared, while capturing
    /// the rook on h8 clears only [`BLACK_KINGSIDE`](Self::BLACK_KINGSIDE).
    ///
    /// Temporary obstacles (pieces in between, the king passing through an
    /// attacked square) are checked during move generation instead.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Castling: u8 {
        /// White is allowed to castle kingside.
        const WHITE_KINGSIDE  = 0b0001;
        /// White is allowed to castle queenside.
        const WHITE_QUEENSIDE = 0b0010;
        /// Black is allowed to castle kingside.
        const BLACK_KINGSIDE  = 0b0100;
        /// Black is allowed to castle queenside.
        const BLACK_QUEENSIDE = 0b1000;

        const WHITE = Self::WHITE_KINGSIDE.bits() | Self::WHITE_QUEENSIDE.bits();
        const BLACK = Self::BLACK_KINGSIDE.bits() | Self::BLACK_QUEENSIDE.bits();
        const KINGSIDE = Self::WHITE_KINGSIDE.bits() | Self::BLACK_KINGSIDE.bits();
        const QUEENSIDE = Self::WHITE_QUEENSIDE.bits() | Self::BLACK_QUEENSIDE.bits();
    }
}

impl Default for Castling {
    fn default() -> Self {
        Self::all()
    }
}

impl Castling {
    pub const fn for_side(side: Side) -> Self {
        match side {
            Side::White => Self::WHITE,
            Side::Black => Self::BLACK,
        }
    }

    pub const fn kingside(side: Side) -> Self {
        match side {
            Side::White => Self::WHITE_KINGSIDE,
            Side::Black => Self::BLACK_KINGSIDE,
        }
    }

    pub const fn queenside(side: Side) -> Self {
        match side {
            Side::White => Self::WHITE_QUEENSIDE,
            Side::Black => Self::BLACK_QUEENSIDE,
        }
    }

    /// The rights that are lost once a piece leaves or lands on `square`.
    pub const fn lost_on(square: Square) -> Self {
        match square.index() {
            4 => Self::WHITE,
            0 => Self::WHITE_QUEENSIDE,
            7 => Self::WHITE_KINGSIDE,
            60 => Self::BLACK,
            56 => Self::BLACK_QUEENSIDE,
            63 => Self::BLACK_KINGSIDE,
            _ => Self::empty(),
        }
    }

    /// Returns the castling state as the 3rd field in [Forsyth-Edwards
    /// Notation](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation).
    ///
    /// If neither side can castle, returns `-`. Otherwise, returns a string
    /// that contains `K` if white can castle kingside, 'Q' if white can castle
    /// queenside, 'k' if black can castle kingside, and 'q' if black can castle
    /// queenside.
    pub fn as_fen_str(self) -> String {
        if self.is_empty() {
            "-".to_owned()
        } else {
            let mut result = String::with_capacity(4);
            if self.contains(Self::WHITE_KINGSIDE) {
                result.push('K');
            }
            if self.contains(Self::WHITE_QUEENSIDE) {
                result.push('Q');
            }
            if self.contains(Self::BLACK_KINGSIDE) {
                result.push('k');
            }
            if self.contains(Self::BLACK_QUEENSIDE) {
                result.push('q');
            }
            result
        }
    }

    /// Parses the FEN castling field. Returns [`None`] for an empty field,
    /// unknown letters, or a letter given twice.
    pub fn from_fen_str(s: &str) -> Option<Self> {
        if s == "-" {
            return Some(Self::empty());
        }
        if s.is_empty() {
            return None;
        }

        let mut flags = Self::empty();
        for c in s.chars() {
            let flag = match c {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                _ => return None,
            };
            if flags.contains(flag) {
                return None;
            }
            flags |= flag;
        }

        Some(flags)
    }
}
