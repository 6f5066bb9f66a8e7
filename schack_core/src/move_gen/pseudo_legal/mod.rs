use super::MoveGenerator;
use crate::board::{Bitboard, Move, PieceKind, Square};

mod pawn_moves;

impl<'board, 'moves> MoveGenerator<'board, 'moves> {
    pub(super) fn pseudo_legal_moves(&mut self) {
        self.pseudo_legal_pawn_moves();
        self.pseudo_legal_knight_moves();
        self.pseudo_legal_bishop_moves();
        self.pseudo_legal_rook_moves();
        self.pseudo_legal_queen_moves();
        self.pseudo_legal_king_moves();
        self.castling_moves();
    }

    // Works for all pieces but pawns.
    // get_attack_pattern takes the occupied squares and the source square and
    // returns every square the piece reaches from there.
    fn generic_pseudo_legal_moves<F>(&mut self, kind: PieceKind, get_attack_pattern: F)
    where
        F: Fn(Bitboard, Square) -> Bitboard,
    {
        let pieces = self.board[kind.with_side(self.to_move)];
        let capturable = self.board[self.to_move.flip()];

        for from in pieces.squares() {
            let attack_pattern = get_attack_pattern(self.occupied, from);

            for to in (attack_pattern & self.empty).squares() {
                self.out_moves.push(Move::builder(from, to).build());
            }

            for to in (attack_pattern & capturable).squares() {
                self.out_moves
                    .push(Move::builder(from, to).captures().build());
            }
        }
    }

    fn pseudo_legal_knight_moves(&mut self) {
        let lookups = self.lookups;
        self.generic_pseudo_legal_moves(PieceKind::Knight, |_, from| {
            lookups.get_knight_moves(from)
        });
    }

    fn pseudo_legal_bishop_moves(&mut self) {
        let lookups = self.lookups;
        self.generic_pseudo_legal_moves(PieceKind::Bishop, |occupied, from| {
            lookups.get_bishop_attacks(occupied, from)
        });
    }

    fn pseudo_legal_rook_moves(&mut self) {
        let lookups = self.lookups;
        self.generic_pseudo_legal_moves(PieceKind::Rook, |occupied, from| {
            lookups.get_rook_attacks(occupied, from)
        });
    }

    fn pseudo_legal_queen_moves(&mut self) {
        let lookups = self.lookups;
        self.generic_pseudo_legal_moves(PieceKind::Queen, |occupied, from| {
            lookups.get_queen_attacks(occupied, from)
        });
    }

    // Castling is generated separately, see `castling_moves`.
    fn pseudo_legal_king_moves(&mut self) {
        let lookups = self.lookups;
        self.generic_pseudo_legal_moves(PieceKind::King, |_, from| {
            lookups.get_king_moves(from)
        });
    }
}

#[cfg(test)]
mod test {
    use crate::{
        board::{Board, Castling, MoveKind, Side},
        move_gen::MoveVec,
        test_utils::assert_in_any_order,
    };

    use super::*;

    fn test_position() -> Board {
        "
            ...qk...
            ....p...
            b.n..r..
            PqN.n..R
            .P....Q.
            ...Nb.p.
            .B.P...P
            ....KB..
        "
        .parse()
        .unwrap()
    }

    /// Runs one generator stage on the test position, with no castling
    /// rights and no en passant target.
    fn generate(side: Side, stage: impl FnOnce(&mut MoveGenerator)) -> MoveVec {
        let board = test_position();
        let mut moves = MoveVec::new();
        let mut move_gen = MoveGenerator::new(&board, side, None, Castling::empty(), &mut moves);
        stage(&mut move_gen);
        moves
    }

    fn white_pawn_moves() -> Vec<Move> {
        vec![
            Move::builder(Square::H2, Square::H3).build(),
            Move::builder(Square::H2, Square::H4)
                .is_double_pawn_push()
                .build(),
            Move::builder(Square::D2, Square::E3).captures().build(),
            Move::builder(Square::H2, Square::G3).captures().build(),
        ]
    }

    fn black_pawn_moves() -> Vec<Move> {
        vec![
            Move::builder(Square::E7, Square::E6).build(),
            Move::builder(Square::G3, Square::G2).build(),
            Move::builder(Square::G3, Square::H2).captures().build(),
        ]
    }

    fn white_knight_moves() -> Vec<Move> {
        vec![
            Move::builder(Square::C5, Square::B7).build(),
            Move::builder(Square::C5, Square::D7).build(),
            Move::builder(Square::C5, Square::E6).build(),
            Move::builder(Square::C5, Square::E4).build(),
            Move::builder(Square::C5, Square::B3).build(),
            Move::builder(Square::C5, Square::A4).build(),
            Move::builder(Square::D3, Square::F4).build(),
            Move::builder(Square::D3, Square::F2).build(),
            Move::builder(Square::D3, Square::C1).build(),
            Move::builder(Square::C5, Square::A6).captures().build(),
            Move::builder(Square::D3, Square::E5).captures().build(),
        ]
    }

    fn black_knight_moves() -> Vec<Move> {
        vec![
            Move::builder(Square::C6, Square::A7).build(),
            Move::builder(Square::C6, Square::B8).build(),
            Move::builder(Square::C6, Square::D4).build(),
            Move::builder(Square::E5, Square::D7).build(),
            Move::builder(Square::E5, Square::F7).build(),
            Move::builder(Square::E5, Square::G6).build(),
            Move::builder(Square::E5, Square::F3).build(),
            Move::builder(Square::E5, Square::C4).build(),
            Move::builder(Square::C6, Square::B4).captures().build(),
            Move::builder(Square::C6, Square::A5).captures().build(),
            Move::builder(Square::E5, Square::G4).captures().build(),
            Move::builder(Square::E5, Square::D3).captures().build(),
        ]
    }

    fn white_bishop_moves() -> Vec<Move> {
        vec![
            Move::builder(Square::B2, Square::A3).build(),
            Move::builder(Square::B2, Square::C3).build(),
            Move::builder(Square::B2, Square::D4).build(),
            Move::builder(Square::B2, Square::C1).build(),
            Move::builder(Square::B2, Square::A1).build(),
            Move::builder(Square::F1, Square::E2).build(),
            Move::builder(Square::F1, Square::G2).build(),
            Move::builder(Square::F1, Square::H3).build(),
            Move::builder(Square::B2, Square::E5).captures().build(),
        ]
    }

    fn black_bishop_moves() -> Vec<Move> {
        vec![
            Move::builder(Square::A6, Square::B7).build(),
            Move::builder(Square::A6, Square::C8).build(),
            Move::builder(Square::E3, Square::D4).build(),
            Move::builder(Square::E3, Square::F4).build(),
            Move::builder(Square::E3, Square::G5).build(),
            Move::builder(Square::E3, Square::H6).build(),
            Move::builder(Square::E3, Square::F2).build(),
            Move::builder(Square::E3, Square::G1).build(),
            Move::builder(Square::E3, Square::C5).captures().build(),
            Move::builder(Square::E3, Square::D2).captures().build(),
        ]
    }

    fn white_rook_moves() -> Vec<Move> {
        vec![
            Move::builder(Square::H5, Square::G5).build(),
            Move::builder(Square::H5, Square::F5).build(),
            Move::builder(Square::H5, Square::H6).build(),
            Move::builder(Square::H5, Square::H7).build(),
            Move::builder(Square::H5, Square::H8).build(),
            Move::builder(Square::H5, Square::H4).build(),
            Move::builder(Square::H5, Square::H3).build(),
            Move::builder(Square::H5, Square::E5).captures().build(),
        ]
    }

    fn black_rook_moves() -> Vec<Move> {
        vec![
            Move::builder(Square::F6, Square::E6).build(),
            Move::builder(Square::F6, Square::D6).build(),
            Move::builder(Square::F6, Square::G6).build(),
            Move::builder(Square::F6, Square::H6).build(),
            Move::builder(Square::F6, Square::F7).build(),
            Move::builder(Square::F6, Square::F8).build(),
            Move::builder(Square::F6, Square::F5).build(),
            Move::builder(Square::F6, Square::F4).build(),
            Move::builder(Square::F6, Square::F3).build(),
            Move::builder(Square::F6, Square::F2).build(),
            Move::builder(Square::F6, Square::F1).captures().build(),
        ]
    }

    fn white_queen_moves() -> Vec<Move> {
        vec![
            Move::builder(Square::G4, Square::F4).build(),
            Move::builder(Square::G4, Square::E4).build(),
            Move::builder(Square::G4, Square::D4).build(),
            Move::builder(Square::G4, Square::C4).build(),
            Move::builder(Square::G4, Square::F5).build(),
            Move::builder(Square::G4, Square::E6).build(),
            Move::builder(Square::G4, Square::D7).build(),
            Move::builder(Square::G4, Square::C8).build(),
            Move::builder(Square::G4, Square::G5).build(),
            Move::builder(Square::G4, Square::G6).build(),
            Move::builder(Square::G4, Square::G7).build(),
            Move::builder(Square::G4, Square::G8).build(),
            Move::builder(Square::G4, Square::H4).build(),
            Move::builder(Square::G4, Square::H3).build(),
            Move::builder(Square::G4, Square::F3).build(),
            Move::builder(Square::G4, Square::E2).build(),
            Move::builder(Square::G4, Square::D1).build(),
            Move::builder(Square::G4, Square::G3).captures().build(),
        ]
    }

    fn black_queen_moves() -> Vec<Move> {
        vec![
            Move::builder(Square::B5, Square::A4).build(),
            Move::builder(Square::B5, Square::B6).build(),
            Move::builder(Square::B5, Square::B7).build(),
            Move::builder(Square::B5, Square::B8).build(),
            Move::builder(Square::B5, Square::C4).build(),
            Move::builder(Square::D8, Square::C8).build(),
            Move::builder(Square::D8, Square::B8).build(),
            Move::builder(Square::D8, Square::A8).build(),
            Move::builder(Square::D8, Square::D7).build(),
            Move::builder(Square::D8, Square::D6).build(),
            Move::builder(Square::D8, Square::D5).build(),
            Move::builder(Square::D8, Square::D4).build(),
            Move::builder(Square::D8, Square::C7).build(),
            Move::builder(Square::D8, Square::B6).build(),
            Move::builder(Square::B5, Square::A5).captures().build(),
            Move::builder(Square::B5, Square::C5).captures().build(),
            Move::builder(Square::B5, Square::D3).captures().build(),
            Move::builder(Square::B5, Square::B4).captures().build(),
            Move::builder(Square::D8, Square::D3).captures().build(),
            Move::builder(Square::D8, Square::A5).captures().build(),
        ]
    }

    fn white_king_moves() -> Vec<Move> {
        vec![
            Move::builder(Square::E1, Square::D1).build(),
            Move::builder(Square::E1, Square::E2).build(),
            Move::builder(Square::E1, Square::F2).build(),
        ]
    }

    fn black_king_moves() -> Vec<Move> {
        vec![
            Move::builder(Square::E8, Square::F8).build(),
            Move::builder(Square::E8, Square::D7).build(),
            Move::builder(Square::E8, Square::F7).build(),
        ]
    }

    fn white_moves() -> Vec<Move> {
        vec![
            white_pawn_moves(),
            white_knight_moves(),
            white_bishop_moves(),
            white_rook_moves(),
            white_queen_moves(),
            white_king_moves(),
        ]
        .concat()
    }

    fn black_moves() -> Vec<Move> {
        vec![
            black_pawn_moves(),
            black_knight_moves(),
            black_bishop_moves(),
            black_rook_moves(),
            black_queen_moves(),
            black_king_moves(),
        ]
        .concat()
    }

    #[test]
    fn test_white_pawn_moves() {
        assert_in_any_order(
            generate(Side::White, |g| g.pseudo_legal_pawn_moves()),
            white_pawn_moves(),
        );
    }

    #[test]
    fn test_white_knight_moves() {
        assert_in_any_order(
            generate(Side::White, |g| g.pseudo_legal_knight_moves()),
            white_knight_moves(),
        );
    }

    #[test]
    fn test_white_bishop_moves() {
        assert_in_any_order(
            generate(Side::White, |g| g.pseudo_legal_bishop_moves()),
            white_bishop_moves(),
        );
    }

    #[test]
    fn test_white_rook_moves() {
        assert_in_any_order(
            generate(Side::White, |g| g.pseudo_legal_rook_moves()),
            white_rook_moves(),
        );
    }

    #[test]
    fn test_white_queen_moves() {
        assert_in_any_order(
            generate(Side::White, |g| g.pseudo_legal_queen_moves()),
            white_queen_moves(),
        );
    }

    #[test]
    fn test_white_king_moves() {
        assert_in_any_order(
            generate(Side::White, |g| g.pseudo_legal_king_moves()),
            white_king_moves(),
        );
    }

    #[test]
    fn test_black_pawn_moves() {
        assert_in_any_order(
            generate(Side::Black, |g| g.pseudo_legal_pawn_moves()),
            black_pawn_moves(),
        );
    }

    #[test]
    fn test_black_knight_moves() {
        assert_in_any_order(
            generate(Side::Black, |g| g.pseudo_legal_knight_moves()),
            black_knight_moves(),
        );
    }

    #[test]
    fn test_black_bishop_moves() {
        assert_in_any_order(
            generate(Side::Black, |g| g.pseudo_legal_bishop_moves()),
            black_bishop_moves(),
        );
    }

    #[test]
    fn test_black_rook_moves() {
        assert_in_any_order(
            generate(Side::Black, |g| g.pseudo_legal_rook_moves()),
            black_rook_moves(),
        );
    }

    #[test]
    fn test_black_queen_moves() {
        assert_in_any_order(
            generate(Side::Black, |g| g.pseudo_legal_queen_moves()),
            black_queen_moves(),
        );
    }

    #[test]
    fn test_black_king_moves() {
        assert_in_any_order(
            generate(Side::Black, |g| g.pseudo_legal_king_moves()),
            black_king_moves(),
        );
    }

    #[test]
    fn test_white_moves() {
        assert_in_any_order(
            generate(Side::White, |g| g.pseudo_legal_moves()),
            white_moves(),
        );
    }

    #[test]
    fn test_black_moves() {
        assert_in_any_order(
            generate(Side::Black, |g| g.pseudo_legal_moves()),
            black_moves(),
        );
    }

    #[test]
    fn test_castling_included_with_rights() {
        let board: Board = "
            r...k..r
            ........
            ........
            ........
            ........
            ........
            ........
            R...K..R
        "
        .parse()
        .unwrap();

        let mut moves = MoveVec::new();
        MoveGenerator::new(&board, Side::Black, None, Castling::BLACK, &mut moves)
            .pseudo_legal_moves();

        let castles = moves
            .iter()
            .filter(|m| m.is_castle())
            .map(|m| (m.to_square(), m.kind()))
            .collect::<Vec<_>>();

        assert_in_any_order(
            castles,
            [
                (Square::G8, MoveKind::KingsideCastle),
                (Square::C8, MoveKind::QueensideCastle),
            ],
        );
    }
}
