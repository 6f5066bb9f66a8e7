//! Move generation and lookup tables.
//!
//! Moves are produced in two stages. [`MoveGenerator`] writes every
//! pseudo-legal move (moves that follow the movement rules of each piece but
//! may leave the mover's own king attacked) into a [`MoveVec`].
//! [`legal_moves`] then plays each of them on a copy of the board and keeps
//! only those after which the mover's king is not attacked. Pins, checks and
//! the en passant discovered-check corner case all fall out of that one test.

use arrayvec::ArrayVec;

use crate::board::{Bitboard, Board, Castling, Move, MoveKind, PieceKind, Position, Side, Square};

use self::{bitboard_utils::pawn_attacks, lookups::Lookups};

pub mod bitboard_utils;
pub mod lookups;
mod pseudo_legal;

/// Maximum number of moves that could occur in a legal position, used for
/// stack-allocating a vector to hold moves.
///
/// The actual number appears to be 218 in this position:
///
/// R6R/3Q4/1Q4Q1/4Q3/2Q4Q/Q4Q2/pp1Q4/kBNN1KB1 w - - 0 1
///
/// But 256 is a nice number and a good buffer in case there could be more.
pub const MAX_MOVES: usize = 256;

pub type MoveVec = ArrayVec<Move, MAX_MOVES>;

/// Generates pseudo-legal moves for one side of a board into a caller-owned
/// [`MoveVec`].
pub struct MoveGenerator<'board, 'moves> {
    lookups: &'static Lookups,
    board: &'board Board,
    to_move: Side,
    empty: Bitboard,
    occupied: Bitboard,
    en_passant: Option<Square>,
    castling: Castling,
    out_moves: &'moves mut MoveVec,
}

impl<'board, 'moves> MoveGenerator<'board, 'moves> {
    pub fn new(
        board: &'board Board,
        to_move: Side,
        en_passant: Option<Square>,
        castling: Castling,
        out_moves: &'moves mut MoveVec,
    ) -> Self {
        Self {
            lookups: Lookups::get_instance(),
            board,
            to_move,
            empty: board.empty_squares(),
            occupied: board.occupied(),
            en_passant,
            castling,
            out_moves,
        }
    }

    /// Castling moves for the side to move.
    ///
    /// Besides the castling right itself, requires the king and rook on their
    /// home squares, nothing between them, and none of the squares the king
    /// starts on, passes through or lands on attacked.
    fn castling_moves(&mut self) {
        let side = self.to_move;
        let rank = side.back_rank();
        let king_square = Square::new_unchecked(rank, 4);
        if !self.board[PieceKind::King.with_side(side)].get(king_square) {
            return;
        }

        let board = self.board;
        let occupied = self.occupied;
        let is_attacked =
            |square: Square| attackers_of(board, square, side.flip(), occupied).has_piece();

        let candidates = [
            (Castling::kingside(side), 7, 5, 6, MoveKind::KingsideCastle),
            (Castling::queenside(side), 0, 3, 2, MoveKind::QueensideCastle),
        ];

        for (right, rook_file, pass_through_file, to_file, kind) in candidates {
            if !self.castling.contains(right) {
                continue;
            }

            let rook_square = Square::new_unchecked(rank, rook_file);
            if !self.board[PieceKind::Rook.with_side(side)].get(rook_square) {
                continue;
            }

            if (self.lookups.get_in_between(king_square, rook_square) & occupied).has_piece() {
                continue;
            }

            let pass_through = Square::new_unchecked(rank, pass_through_file);
            let to = Square::new_unchecked(rank, to_file);
            if [king_square, pass_through, to].into_iter().any(is_attacked) {
                continue;
            }

            self.out_moves
                .push(Move::new(king_square, to, None, kind));
        }
    }
}

/// Returns the pieces of side `by` that attack `square`, with sliding
/// attacks blocked by `occupied`.
///
/// Kings count as attackers, so this also answers whether a king may step
/// next to the other king.
pub fn attackers_of(board: &Board, square: Square, by: Side, occupied: Bitboard) -> Bitboard {
    let lookups = Lookups::get_instance();
    let pawn_sources = pawn_attacks(Bitboard::from_square(square), by.flip());

    let queens = board[PieceKind::Queen.with_side(by)];
    let diagonal_sliders = board[PieceKind::Bishop.with_side(by)] | queens;
    let orthogonal_sliders = board[PieceKind::Rook.with_side(by)] | queens;

    (pawn_sources & board[PieceKind::Pawn.with_side(by)])
        | (lookups.get_knight_moves(square) & board[PieceKind::Knight.with_side(by)])
        | (lookups.get_king_moves(square) & board[PieceKind::King.with_side(by)])
        | (lookups.get_bishop_attacks(occupied, square) & diagonal_sliders)
        | (lookups.get_rook_attacks(occupied, square) & orthogonal_sliders)
}

/// Every pseudo-legal move of the side to move, castling included.
pub fn pseudo_legal_moves(position: &Position) -> MoveVec {
    let mut moves = MoveVec::new();
    MoveGenerator::new(
        position.board(),
        position.to_move(),
        position.en_passant(),
        position.castling(),
        &mut moves,
    )
    .pseudo_legal_moves();
    moves
}

/// The legal moves of the side to move: pseudo-legal moves that do not leave
/// the mover's own king attacked.
pub fn legal_moves(position: &Position) -> MoveVec {
    let mut moves = pseudo_legal_moves(position);
    let board = position.board();
    let side = position.to_move();

    let Ok(king) = board.king_square(side) else {
        moves.clear();
        return moves;
    };

    moves.retain(|&mut the_move| {
        let mut after = *board;
        after.move_unchecked(the_move);

        // The king is off its old square in `after`, so a slider checking
        // along the line it retreats on still reaches its new square.
        let king = if the_move.from_square() == king {
            the_move.to_square()
        } else {
            king
        };

        attackers_of(&after, king, side.flip(), after.occupied()).is_empty()
    });

    moves
}
