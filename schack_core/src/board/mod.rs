//! Structs and functions related to to the board representation.

mod bitboard;
mod board_repr;
mod castling;
mod coordinate_move;
mod fen;
mod make_move;
mod move_repr;
mod piece;
mod san;
mod square;
mod zobrist;

use std::{fmt::Display, str::FromStr};

pub use bitboard::{Bitboard, SquareIter};
pub use board_repr::{Board, ParseBoardError};
pub use castling::Castling;
pub use coordinate_move::{CoordinateMove, ParseCoordinateMoveError};
pub use fen::{parse_fen, position_to_fen, FenError, STARTING_POSITION_FEN};
pub use move_repr::{Move, MoveBuilder, MoveKind};
pub use piece::{Piece, PieceKind, Side};
pub use san::San;
pub use square::{ParseSquareError, Square};
pub use zobrist::ZobristHash;

use crate::{
    error::{ChessError, InvalidPosition},
    move_gen::{self, MoveVec},
};

/// A complete chess position: piece placement, side to move, castling
/// rights, en passant target and the two move clocks.
///
/// Positions are immutable values. Making a move with [`Position::apply`]
/// returns a new position and leaves this one untouched, so a position can be
/// shared freely between threads and kept around as history.
///
/// Every `Position` is valid: each side has exactly one king, no pawn stands
/// on the first or last rank, the side that just moved is not in check, and an
/// en passant target sits just behind a pawn that could have double pushed
/// past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    board: Board,
    to_move: Side,
    castling: Castling,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmoves: u32,
    zobrist: ZobristHash,
}

impl Position {
    /// Builds a position from its parts, checking that it could occur in a
    /// game.
    pub fn new(
        board: Board,
        to_move: Side,
        castling: Castling,
        en_passant: Option<Square>,
        halfmove_clock: u32,
        fullmoves: u32,
    ) -> Result<Self, InvalidPosition> {
        board.king_square(Side::White)?;
        board.king_square(Side::Black)?;

        let pawns = board[Piece::WHITE_PAWN] | board[Piece::BLACK_PAWN];
        if let Some(square) = (pawns & (Bitboard::RANK_1 | Bitboard::RANK_8)).lsb() {
            return Err(InvalidPosition::PawnOnBackRank(square));
        }

        if let Some(target) = en_passant {
            if !en_passant_is_consistent(&board, to_move, target) {
                return Err(InvalidPosition::InvalidEnPassant(target));
            }
        }

        let position = Self::from_parts(
            board,
            to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmoves,
        );

        if position.side_is_in_check(to_move.flip()) {
            return Err(InvalidPosition::OpponentInCheck(to_move.flip()));
        }

        Ok(position)
    }

    fn from_parts(
        board: Board,
        to_move: Side,
        castling: Castling,
        en_passant: Option<Square>,
        halfmove_clock: u32,
        fullmoves: u32,
    ) -> Self {
        Self {
            board,
            to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmoves,
            zobrist: ZobristHash::of(&board, to_move, castling, en_passant),
        }
    }

    pub fn starting_position() -> Self {
        Self::from_parts(
            Board::starting_position(),
            Side::White,
            Castling::all(),
            None,
            0,
            1,
        )
    }

    /// Parses and validates a position in Forsyth-Edwards Notation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use schack_core::{board::{Position, FenError}, ChessError};
    /// let position = Position::try_parse_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    /// assert_eq!(position.legal_moves().len(), 15);
    ///
    /// assert_eq!(
    ///     Position::try_parse_fen("4k3/8/8/8/8/8/8/4K2R w K -"),
    ///     Err(ChessError::MalformedFen(FenError::WrongFieldCount(4)))
    /// );
    /// ```
    pub fn try_parse_fen(fen: &str) -> Result<Self, ChessError> {
        fen::parse_fen(fen)
    }

    pub fn fen(&self) -> String {
        fen::position_to_fen(self)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    pub fn castling(&self) -> Castling {
        self.castling
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Plies since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Starts at 1 and increases after every Black move.
    pub fn fullmoves(&self) -> u32 {
        self.fullmoves
    }

    pub fn zobrist_hash(&self) -> ZobristHash {
        self.zobrist
    }

    /// Whether the two positions are the same for the purposes of repetition:
    /// same placement, side to move, castling rights and en passant target.
    /// The move clocks are ignored.
    pub fn is_repetition_of(&self, other: &Position) -> bool {
        self.zobrist == other.zobrist
            && self.board == other.board
            && self.to_move == other.to_move
            && self.castling == other.castling
            && self.en_passant == other.en_passant
    }

    pub fn legal_moves(&self) -> MoveVec {
        move_gen::legal_moves(self)
    }

    /// Moves that follow the movement rules but may leave the mover's king
    /// attacked.
    pub fn pseudo_legal_moves(&self) -> MoveVec {
        move_gen::pseudo_legal_moves(self)
    }

    /// Whether any piece of side `by` attacks `square`.
    pub fn is_attacked(&self, square: Square, by: Side) -> bool {
        move_gen::attackers_of(&self.board, square, by, self.board.occupied()).has_piece()
    }

    /// Pieces giving check to the side to move.
    pub fn checkers(&self) -> Bitboard {
        match self.board.king_square(self.to_move) {
            Ok(king) => {
                move_gen::attackers_of(&self.board, king, self.to_move.flip(), self.board.occupied())
            }
            Err(_) => Bitboard::EMPTY,
        }
    }

    pub fn is_in_check(&self) -> bool {
        self.side_is_in_check(self.to_move)
    }

    fn side_is_in_check(&self, side: Side) -> bool {
        self.board
            .king_square(side)
            .is_ok_and(|king| self.is_attacked(king, side.flip()))
    }

    /// Finds the legal move matching the given squares and promotion, fully
    /// classified.
    ///
    /// # Examples
    ///
    /// ```
    /// # use schack_core::board::{Position, PieceKind, Square, MoveKind};
    /// let position = Position::starting_position();
    ///
    /// let e4 = position.find_move(Square::E2, Square::E4, None).unwrap();
    /// assert_eq!(e4.kind(), MoveKind::DoublePawnPush);
    ///
    /// assert_eq!(position.find_move(Square::E2, Square::E5, None), None);
    /// assert_eq!(position.find_move(Square::E2, Square::E4, Some(PieceKind::Queen)), None);
    /// ```
    pub fn find_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Option<Move> {
        self.legal_moves().into_iter().find(|m| {
            m.from_square() == from && m.to_square() == to && m.promotion() == promotion
        })
    }

    /// Whether neither side has enough material left to ever deliver mate.
    ///
    /// That is the case for king against king, a king and a single minor
    /// piece against a bare king, and positions where the only pieces besides
    /// the kings are bishops all standing on squares of the same colour.
    pub fn is_insufficient_material(&self) -> bool {
        let board = &self.board;

        let heavy_or_pawns = [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen]
            .into_iter()
            .any(|kind| board[kind.white()].has_piece() || board[kind.black()].has_piece());
        if heavy_or_pawns {
            return false;
        }

        let knights = board[Piece::WHITE_KNIGHT] | board[Piece::BLACK_KNIGHT];
        let bishops = board[Piece::WHITE_BISHOP] | board[Piece::BLACK_BISHOP];

        match (knights.pop_count(), bishops.pop_count()) {
            (0, 0) => true,
            (1, 0) => true,
            (0, _) => {
                (bishops & Bitboard::LIGHT_SQUARES).is_empty()
                    || (bishops & Bitboard::DARK_SQUARES).is_empty()
            }
            _ => false,
        }
    }
}

/// The side that just moved must have a pawn directly in front of the target,
/// with the target and the pawn's starting square both empty.
fn en_passant_is_consistent(board: &Board, to_move: Side, target: Square) -> bool {
    let pushed_by = to_move.flip();
    let landed = target.offset(pushed_by.pawn_push_offset());
    let origin = target.offset(-pushed_by.pawn_push_offset());

    origin.rank() == pushed_by.pawn_rank()
        && board.piece_at(landed) == Some(PieceKind::Pawn.with_side(pushed_by))
        && board.piece_at(target).is_none()
        && board.piece_at(origin).is_none()
}

impl Default for Position {
    fn default() -> Self {
        Self::starting_position()
    }
}

impl FromStr for Position {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse_fen(s)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.fen())
    }
}
