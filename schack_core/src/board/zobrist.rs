use std::{
    fmt::Debug,
    ops::{BitXor, BitXorAssign},
    sync::OnceLock,
};

use rand::{RngCore, SeedableRng};

use super::{Board, Castling, Piece, Side, Square};

/// Zobrist hash of the repetition-relevant part of a position: the pieces,
/// the side to move, the castling rights and the en passant target.
///
/// Equal positions always have equal hashes, so comparing hashes first lets
/// repetition detection skip almost every full comparison. Clocks are not
/// part of the hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ZobristHash(pub u64);

impl ZobristHash {
    /// Hashes a complete position from scratch.
    pub fn of(
        board: &Board,
        to_move: Side,
        castling: Castling,
        en_passant: Option<Square>,
    ) -> Self {
        let mut hash = Self::side(to_move) ^ Self::castling(castling) ^ Self::en_passant(en_passant);
        for (square, piece) in board.pieces() {
            hash.toggle_piece(piece, square);
        }
        hash
    }

    pub fn piece(piece: Piece, square: Square) -> Self {
        let instance = ZobristTable::get_instance();
        Self(instance.pieces[piece.index() * 64 + square.index()])
    }

    pub fn side(side: Side) -> Self {
        let instance = ZobristTable::get_instance();
        match side {
            Side::White => Self(0),
            Side::Black => Self(instance.black),
        }
    }

    pub fn castling(castling: Castling) -> Self {
        let instance = ZobristTable::get_instance();
        Self(instance.castling[castling.bits() as usize])
    }

    pub fn en_passant(en_passant: Option<Square>) -> Self {
        let instance = ZobristTable::get_instance();
        match en_passant {
            Some(square) => Self(instance.en_passant[square.file() as usize]),
            None => Self(0),
        }
    }

    pub fn toggle_piece(&mut self, piece: Piece, square: Square) {
        *self ^= Self::piece(piece, square)
    }
}

impl BitXor for ZobristHash {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for ZobristHash {
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

impl Debug for ZobristHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ZobristHash")
            .field(&format_args!("{:#018X}", self.0))
            .finish()
    }
}

struct ZobristTable {
    pieces: [u64; 12 * 64],
    black: u64,
    castling: [u64; 16],
    en_passant: [u64; 8],
}

impl ZobristTable {
    fn new() -> Self {
        // Fixed seed so hashes are stable between runs.
        let mut rng = rand_chacha::ChaCha12Rng::from_seed([
            0x5c, 0x1e, 0x8a, 0x37, 0xd4, 0x09, 0x6b, 0xf2, 0x41, 0x9e, 0x2d, 0x73, 0xc8, 0x15,
            0xa0, 0x6f, 0x3b, 0xe7, 0x52, 0x94, 0x0c, 0xd9, 0x28, 0x7a, 0xb6, 0x43, 0xf1, 0x8d,
            0x1a, 0x65, 0xce, 0x07,
        ]);

        let mut pieces = [0; 12 * 64];
        pieces.fill_with(|| rng.next_u64());

        let black = rng.next_u64();

        let mut castling = [0; 16];
        castling.fill_with(|| rng.next_u64());

        let mut en_passant = [0; 8];
        en_passant.fill_with(|| rng.next_u64());

        Self {
            pieces,
            black,
            castling,
            en_passant,
        }
    }

    fn get_instance() -> &'static Self {
        static INSTANCE: OnceLock<ZobristTable> = OnceLock::new();

        INSTANCE.get_or_init(Self::new)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hash_depends_on_every_component() {
        let board = Board::starting_position();
        let base = ZobristHash::of(&board, Side::White, Castling::all(), None);

        assert_eq!(
            base,
            ZobristHash::of(&board, Side::White, Castling::all(), None)
        );
        assert_ne!(
            base,
            ZobristHash::of(&board, Side::Black, Castling::all(), None)
        );
        assert_ne!(
            base,
            ZobristHash::of(&board, Side::White, Castling::WHITE, None)
        );
        assert_ne!(
            base,
            ZobristHash::of(&board, Side::White, Castling::all(), Some(Square::E3))
        );

        let moved = board
            .with_piece_set(Square::G1, None)
            .with_piece_set(Square::F3, Some(Piece::WHITE_KNIGHT));
        assert_ne!(
            base,
            ZobristHash::of(&moved, Side::White, Castling::all(), None)
        );
    }

    #[test]
    fn hash_ignores_piece_order() {
        let a = Board::default()
            .with_piece_set(Square::E1, Some(Piece::WHITE_KING))
            .with_piece_set(Square::E8, Some(Piece::BLACK_KING));
        let b = Board::default()
            .with_piece_set(Square::E8, Some(Piece::BLACK_KING))
            .with_piece_set(Square::E1, Some(Piece::WHITE_KING));

        assert_eq!(
            ZobristHash::of(&a, Side::Black, Castling::empty(), None),
            ZobristHash::of(&b, Side::Black, Castling::empty(), None)
        );
    }
}
