use crate::{
    board::{Bitboard, Move, MoveBuilder, PieceKind, Side},
    move_gen::MoveGenerator,
};

impl<'board, 'moves> MoveGenerator<'board, 'moves> {
    pub(in crate::move_gen) fn pseudo_legal_pawn_moves(&mut self) {
        self.pseudo_legal_pawn_pushes();
        self.pseudo_legal_pawn_captures();
        self.pseudo_legal_en_passants();
    }

    fn pseudo_legal_pawn_pushes(&mut self) {
        let side = self.to_move;
        let pawns = self.board[PieceKind::Pawn.with_side(side)];

        let single_pushable = pawns_able_to_push(pawns, self.empty, side);
        let double_pushable = pawns_able_to_double_push(pawns, self.empty, side);

        for from in single_pushable.squares() {
            let to = from.offset(side.pawn_push_offset());
            self.push_pawn_move(Move::builder(from, to));
        }

        for from in double_pushable.squares() {
            let to = from.offset(2 * side.pawn_push_offset());
            self.out_moves
                .push(Move::builder(from, to).is_double_pawn_push().build());
        }
    }

    fn pseudo_legal_pawn_captures(&mut self) {
        let side = self.to_move;
        let pawns = self.board[PieceKind::Pawn.with_side(side)];
        let capturable = self.board[side.flip()];

        for (capture_offset, able_to_capture) in [
            (east_capture_offset(side), pawns_able_to_capture_east(pawns, capturable, side)),
            (west_capture_offset(side), pawns_able_to_capture_west(pawns, capturable, side)),
        ] {
            for from in able_to_capture.squares() {
                let to = from.offset(capture_offset);
                self.push_pawn_move(Move::builder(from, to).captures());
            }
        }
    }

    /// En passant captures onto the target square, if there is one.
    ///
    /// Whether the capture exposes the king, including along the rank both
    /// pawns vacate, is left to the legality filter.
    fn pseudo_legal_en_passants(&mut self) {
        let Some(en_passant) = self.en_passant else {
            return;
        };

        let side = self.to_move;
        let pawns = self.board[PieceKind::Pawn.with_side(side)];
        let target = Bitboard::from_square(en_passant);

        let capturers = pawns_able_to_capture_east(pawns, target, side)
            | pawns_able_to_capture_west(pawns, target, side);

        for from in capturers.squares() {
            self.out_moves.push(
                Move::builder(from, en_passant)
                    .captures()
                    .is_en_passant()
                    .build(),
            );
        }
    }

    /// Pushes a pawn move, expanding it into all four promotions when it
    /// lands on the last rank.
    fn push_pawn_move(&mut self, builder: MoveBuilder) {
        let promotion_rank = self.to_move.flip().back_rank();

        if builder.to.rank() == promotion_rank {
            for promo in PieceKind::PROMOTIONS {
                self.out_moves.push(builder.promotes_to(promo).build());
            }
        } else {
            self.out_moves.push(builder.build());
        }
    }
}

fn east_capture_offset(side: Side) -> i8 {
    match side {
        Side::White => 9,
        Side::Black => -7,
    }
}

fn west_capture_offset(side: Side) -> i8 {
    match side {
        Side::White => 7,
        Side::Black => -9,
    }
}

fn step_back(b: Bitboard, side: Side) -> Bitboard {
    match side {
        Side::White => b.step_south(),
        Side::Black => b.step_north(),
    }
}

fn pawns_able_to_push(pawns: Bitboard, empty: Bitboard, side: Side) -> Bitboard {
    step_back(empty, side) & pawns
}

fn pawns_able_to_double_push(pawns: Bitboard, empty: Bitboard, side: Side) -> Bitboard {
    let double_push_rank = match side {
        Side::White => Bitboard::RANK_4,
        Side::Black => Bitboard::RANK_5,
    };
    let can_push_into_first = step_back(double_push_rank & empty, side) & empty;
    pawns_able_to_push(pawns, can_push_into_first, side)
}

fn pawns_able_to_capture_east(pawns: Bitboard, capturable: Bitboard, side: Side) -> Bitboard {
    pawns
        & match side {
            Side::White => capturable.step_south_west(),
            Side::Black => capturable.step_north_west(),
        }
}

fn pawns_able_to_capture_west(pawns: Bitboard, capturable: Bitboard, side: Side) -> Bitboard {
    pawns
        & match side {
            Side::White => capturable.step_south_east(),
            Side::Black => capturable.step_north_east(),
        }
}
