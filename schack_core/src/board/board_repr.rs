use std::{
    fmt::{Display, Write},
    ops::{Index, IndexMut},
    str::FromStr,
};

use thiserror::Error;

use crate::error::InvalidPosition;

use super::{Bitboard, Move, MoveKind, Piece, PieceKind, Side, Square};

/// Represents just the pieces on the board using [`Bitboard`]s.
///
/// Internally, holds a bitboard for every kind of piece (i.e. every
/// combination of [`Side`] and [`PieceKind`]) plus one per side holding all of
/// that side's pieces.
///
/// These bitboards can be accessed via indexing by [`Side`] or [`Piece`].
/// For example:
/// ```
/// # use schack_core::board::{Board, Side, Piece};
/// fn foo(board: &Board) {
///     println!("White king: {:?}", board[Piece::WHITE_KING]);
///     println!("Black bishops: {:?}", board[Piece::BLACK_BISHOP]);
///     println!("All white pieces: {:?}", board[Side::White]);
/// }
/// ```
///
/// `Board` is a small `Copy` value. Methods that change the board either take
/// `&mut self` for internal use or return a new board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Board {
    // Indexed by Piece::index().
    pieces: [Bitboard; 12],
    // Indexed by Side::index().
    sides: [Bitboard; 2],
}

impl Board {
    /// Creates a new [`Board`] from the provided board state.
    ///
    /// The provided board state should be a slice of [`Option<Piece>`]s,
    /// ordered by increasing file and then rank (i.e. index 0 is a1, index 1 is
    /// b1, index 2 is c1... index 7 is h1, index 8 is a2, index 9 is b2, etc.).
    ///
    /// The provided slice is expected to be of length 64, but if a longer slice
    /// is passed this method will ignore any pieces past index 63, and if a
    /// shorter slice is passed the missing squares are assumed to be empty.
    pub fn new(board: &[Option<Piece>]) -> Self {
        let mut repr = Self::default();

        for (i, &piece) in board.iter().take(64).enumerate() {
            if let Some(piece) = piece {
                repr.put(Square::from_index_unchecked(i), piece);
            }
        }

        repr
    }

    /// The standard chess starting arrangement.
    pub fn starting_position() -> Self {
        use PieceKind::*;
        const BACK_RANK: [PieceKind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut board = Self::default();
        for file in 0..8 {
            for side in Side::BOTH {
                board.put(
                    Square::new_unchecked(side.back_rank(), file),
                    BACK_RANK[file as usize].with_side(side),
                );
                board.put(
                    Square::new_unchecked(side.pawn_rank(), file),
                    Pawn.with_side(side),
                );
            }
        }
        board
    }

    /// Returns the piece, if any, on the provided square.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let side = if self.sides[Side::White.index()].get(square) {
            Side::White
        } else if self.sides[Side::Black.index()].get(square) {
            Side::Black
        } else {
            return None;
        };

        self.piece_with_side_at(side, square)
    }

    /// Returns the piece with the specified side, if any, on the provided
    /// square.
    ///
    /// This is a slightly more optimised version of [`Self::piece_at`] if you
    /// already know the side the piece has.
    pub fn piece_with_side_at(&self, side: Side, square: Square) -> Option<Piece> {
        PieceKind::ALL
            .into_iter()
            .map(|kind| kind.with_side(side))
            .find(|&piece| self[piece].get(square))
    }

    /// Returns a copy of the board with `square` holding `piece`, or emptied
    /// if `piece` is [`None`]. Whatever stood on the square before is
    /// replaced.
    #[must_use]
    pub fn with_piece_set(&self, square: Square, piece: Option<Piece>) -> Self {
        let mut board = *self;
        board.clear(square);
        if let Some(piece) = piece {
            board.put(square, piece);
        }
        board
    }

    /// Returns the square of `side`'s king.
    ///
    /// Fails if the side has no king, or more than one.
    pub fn king_square(&self, side: Side) -> Result<Square, InvalidPosition> {
        let kings = self[PieceKind::King.with_side(side)];
        match kings.pop_count() {
            0 => Err(InvalidPosition::MissingKing(side)),
            1 => kings.lsb().ok_or(InvalidPosition::MissingKing(side)),
            count => Err(InvalidPosition::MultipleKings { side, count }),
        }
    }

    /// Iterates over the pieces of one side together with their squares, in
    /// ascending square order.
    ///
    /// The iterator borrows nothing and can be cloned to restart it.
    pub fn squares_occupied_by(
        &self,
        side: Side,
    ) -> impl Iterator<Item = (Square, Piece)> + Clone {
        let board = *self;
        self.sides[side.index()]
            .squares()
            .filter_map(move |square| {
                board
                    .piece_with_side_at(side, square)
                    .map(|piece| (square, piece))
            })
    }

    /// Iterates over every occupied square, in ascending square order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + Clone {
        let board = *self;
        self.occupied().squares().filter_map(move |square| {
            board.piece_at(square).map(|piece| (square, piece))
        })
    }

    /// Returns a tuple (white count, black count) of the provided piece kind.
    pub fn piece_count(&self, kind: PieceKind) -> (u32, u32) {
        (
            self[kind.white()].pop_count(),
            self[kind.black()].pop_count(),
        )
    }

    /// Returns a bitboard containing all squares that have a piece on them.
    pub fn occupied(&self) -> Bitboard {
        self[Side::White] | self[Side::Black]
    }

    /// Returns a bitboard containing all squares that do not have a piece on
    /// them.
    pub fn empty_squares(&self) -> Bitboard {
        !self.occupied()
    }

    /// Make the provided [`Move`] on the board.
    ///
    /// No checks are performed to ensure the move is valid. If the source
    /// square is empty, the board is left unchanged.
    pub fn move_unchecked(&mut self, the_move: Move) {
        let from = the_move.from_square();
        let to = the_move.to_square();
        let Some(piece) = self.piece_at(from) else {
            return;
        };
        let side = piece.side();

        self.clear(from);

        if the_move.is_en_passant() {
            self.clear(the_move.en_passant_square());
        } else {
            self.clear(to);
        }

        let placed = match the_move.promotion() {
            Some(kind) => kind.with_side(side),
            None => piece,
        };
        self.put(to, placed);

        if matches!(
            the_move.kind(),
            MoveKind::KingsideCastle | MoveKind::QueensideCastle
        ) {
            let (rook_from, rook_to) = the_move.castling_rook_squares();
            let rook = PieceKind::Rook.with_side(side);
            self.clear(rook_from);
            self.put(rook_to, rook);
        }
    }

    fn put(&mut self, square: Square, piece: Piece) {
        self[piece].set(square);
        self[piece.side()].set(square);
    }

    fn clear(&mut self, square: Square) {
        if let Some(piece) = self.piece_at(square) {
            self[piece].reset(square);
            self[piece.side()].reset(square);
        }
    }
}

impl Index<Piece> for Board {
    type Output = Bitboard;

    fn index(&self, index: Piece) -> &Self::Output {
        &self.pieces[index.index()]
    }
}

impl Index<Side> for Board {
    type Output = Bitboard;

    fn index(&self, index: Side) -> &Self::Output {
        &self.sides[index.index()]
    }
}

impl IndexMut<Piece> for Board {
    fn index_mut(&mut self, index: Piece) -> &mut Self::Output {
        &mut self.pieces[index.index()]
    }
}

impl IndexMut<Side> for Board {
    fn index_mut(&mut self, index: Side) -> &mut Self::Output {
        &mut self.sides[index.index()]
    }
}

/// Renders the board as 8 lines, rank 8 first, with `.` for empty squares
/// and FEN letters for pieces.
impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let square = Square::new_unchecked(rank, file);
                match self.piece_at(square) {
                    Some(piece) => f.write_char(piece.as_fen_char())?,
                    None => f.write_char('.')?,
                }
            }
            if rank > 0 {
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("Unexpected character `{0}` in board diagram")]
    InvalidChar(char),
    #[error("Board diagram has {0} squares, expected 64")]
    WrongSquareCount(usize),
}

/// Parses the diagram format written by [`Display`]. Whitespace is ignored.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Self::default();
        let mut count = 0;

        for c in s.chars().filter(|c| !c.is_whitespace()) {
            let piece = match c {
                '.' => None,
                c => Some(Piece::try_from_fen_char(c).ok_or(ParseBoardError::InvalidChar(c))?),
            };

            if count < 64 {
                let square = Square::new_unchecked(7 - (count / 8) as u8, (count % 8) as u8);
                if let Some(piece) = piece {
                    board.put(square, piece);
                }
            }
            count += 1;
        }

        if count != 64 {
            return Err(ParseBoardError::WrongSquareCount(count));
        }

        Ok(board)
    }
}
