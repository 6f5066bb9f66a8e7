use crate::error::ChessError;

use super::{Castling, CoordinateMove, Move, PieceKind, Position, ZobristHash};

impl Position {
    /// Plays a move, returning the resulting position.
    ///
    /// Fails with [`ChessError::IllegalMove`] unless the move is one of
    /// [`Position::legal_moves`], classification included. Use
    /// [`Position::find_move`] to get a classified move from bare squares.
    ///
    /// # Examples
    ///
    /// ```
    /// # use schack_core::board::{Move, Position, Square};
    /// let start = Position::starting_position();
    /// let e4 = start.find_move(Square::E2, Square::E4, None).unwrap();
    ///
    /// let after = start.apply(e4).unwrap();
    /// assert_eq!(after.en_passant(), Some(Square::E3));
    ///
    /// // The kind must match: e2e4 is a double push, not a quiet move.
    /// assert!(start.apply(Move::builder(Square::E2, Square::E4).build()).is_err());
    /// ```
    pub fn apply(&self, the_move: Move) -> Result<Position, ChessError> {
        if !self.legal_moves().contains(&the_move) {
            return Err(ChessError::IllegalMove(CoordinateMove::from(the_move)));
        }

        Ok(self.apply_unchecked(the_move))
    }

    /// Plays a move without checking that it is legal.
    ///
    /// The move must at least be pseudo-legal, otherwise the resulting
    /// position is unspecified. The hash is updated incrementally.
    pub fn apply_unchecked(&self, the_move: Move) -> Position {
        let from = the_move.from_square();
        let to = the_move.to_square();
        let Some(piece) = self.board.piece_at(from) else {
            return *self;
        };
        let side = self.to_move;

        let mut zobrist = self.zobrist;
        zobrist.toggle_piece(piece, from);

        let captured = if the_move.is_en_passant() {
            let square = the_move.en_passant_square();
            Some((PieceKind::Pawn.with_side(side.flip()), square))
        } else {
            self.board.piece_at(to).map(|captured| (captured, to))
        };
        if let Some((captured, square)) = captured {
            zobrist.toggle_piece(captured, square);
        }

        let placed = match the_move.promotion() {
            Some(kind) => kind.with_side(side),
            None => piece,
        };
        zobrist.toggle_piece(placed, to);

        if the_move.is_castle() {
            let (rook_from, rook_to) = the_move.castling_rook_squares();
            let rook = PieceKind::Rook.with_side(side);
            zobrist.toggle_piece(rook, rook_from);
            zobrist.toggle_piece(rook, rook_to);
        }

        let mut board = self.board;
        board.move_unchecked(the_move);

        let castling = self
            .castling
            .difference(Castling::lost_on(from) | Castling::lost_on(to));

        let en_passant = the_move
            .is_double_pawn_push()
            .then(|| from.offset(side.pawn_push_offset()));

        let halfmove_clock = if piece.kind() == PieceKind::Pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };

        let fullmoves = if side.is_black() {
            self.fullmoves.saturating_add(1)
        } else {
            self.fullmoves
        };

        zobrist ^= ZobristHash::side(side) ^ ZobristHash::side(side.flip());
        zobrist ^= ZobristHash::castling(self.castling) ^ ZobristHash::castling(castling);
        zobrist ^= ZobristHash::en_passant(self.en_passant) ^ ZobristHash::en_passant(en_passant);

        Position {
            board,
            to_move: side.flip(),
            castling,
            en_passant,
            halfmove_clock,
            fullmoves,
            zobrist,
        }
    }
}
