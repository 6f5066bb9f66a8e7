//! Bitboard utility functions for building the lookup tables and computing
//! sliding attacks from them.

use num_derive::{FromPrimitive, ToPrimitive};

use crate::board::{Bitboard, Side, Square};

/// Table of unblocked rays, indexed by square and then by [`Direction`].
pub type RayTable = [[Bitboard; 8]; 64];

/// Represents a possible ray direction on the board.
///
/// The first four directions are "positive": every step increases the square
/// index. The last four are their negative counterparts, in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum Direction {
    East = 0,
    North = 1,
    NorthEast = 2,
    NorthWest = 3,
    West = 4,
    South = 5,
    SouthWest = 6,
    SouthEast = 7,
}

impl Direction {
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::East,
        Direction::North,
        Direction::West,
        Direction::South,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// Whether squares along this direction have increasing indices.
    pub const fn is_positive(self) -> bool {
        (self as usize) < 4
    }
}

/// Returns all knight attacks from a bitboard of knights.
///
/// Only used to calculate lookup tables, use
/// [`Lookups::get_knight_moves`](super::lookups::Lookups::get_knight_moves)
/// during move generation.
///
/// # Examples
///
/// ```
/// # use schack_core::{
/// #     board::{Bitboard, Square},
/// #     move_gen::bitboard_utils::knight_attacks
/// # };
/// let knight = Bitboard::from_square(Square::D4);
/// assert_eq!(
///     knight_attacks(knight),
///     "
///         . . . . . . . .
///         . . . . . . . .
///         . . # . # . . .
///         . # . . . # . .
///         . . . . . . . .
///         . # . . . # . .
///         . . # . # . . .
///         . . . . . . . .
///     ".parse().unwrap()
/// );
/// ```
pub fn knight_attacks(b: Bitboard) -> Bitboard {
    const NOT_A_FILE: Bitboard = Bitboard::A_FILE.not();
    const NOT_AB_FILE: Bitboard = Bitboard::A_FILE.or(Bitboard::B_FILE).not();
    const NOT_H_FILE: Bitboard = Bitboard::H_FILE.not();
    const NOT_GH_FILE: Bitboard = Bitboard::G_FILE.or(Bitboard::H_FILE).not();

    let mut attacks = Bitboard::EMPTY;

    attacks |= (b << 17) & NOT_A_FILE;
    attacks |= (b << 10) & NOT_AB_FILE;
    attacks |= (b >> 6) & NOT_AB_FILE;
    attacks |= (b >> 15) & NOT_A_FILE;
    attacks |= (b << 15) & NOT_H_FILE;
    attacks |= (b << 6) & NOT_GH_FILE;
    attacks |= (b >> 10) & NOT_GH_FILE;
    attacks |= (b >> 17) & NOT_H_FILE;

    attacks
}

/// Returns all king moves from a bitboard of kings.
///
/// Only used to calculate lookup tables.
pub fn king_moves(b: Bitboard) -> Bitboard {
    let mut attacks = b.step_east() | b.step_west();
    let tmp = b | attacks;
    attacks |= tmp.step_north() | tmp.step_south();

    attacks
}

/// Squares attacked by a set of pawns of the given side.
///
/// Read backwards, `pawn_attacks(target, side.flip())` is the set of squares
/// from which a pawn of `side` attacks `target`.
pub fn pawn_attacks(pawns: Bitboard, side: Side) -> Bitboard {
    match side {
        Side::White => pawns.step_north_east() | pawns.step_north_west(),
        Side::Black => pawns.step_south_east() | pawns.step_south_west(),
    }
}

/// The full ray from `b` in direction `dir`, ignoring any blockers and
/// excluding the starting squares themselves.
pub fn unblocked_ray_attacks(b: Bitboard, dir: Direction) -> Bitboard {
    let step_fn = match dir {
        Direction::East => Bitboard::step_east,
        Direction::North => Bitboard::step_north,
        Direction::NorthEast => Bitboard::step_north_east,
        Direction::NorthWest => Bitboard::step_north_west,
        Direction::West => Bitboard::step_west,
        Direction::South => Bitboard::step_south,
        Direction::SouthWest => Bitboard::step_south_west,
        Direction::SouthEast => Bitboard::step_south_east,
    };

    let mut attacks = step_fn(b);
    loop {
        let new_attacks = attacks | step_fn(attacks);
        if new_attacks == attacks {
            break;
        }
        attacks = new_attacks;
    }

    attacks
}

/// The ray from `square` in direction `dir`, cut off after the first
/// occupied square.
///
/// The nearest blocker is the lowest set square on positive rays and the
/// highest on negative ones; everything beyond it is exactly the blocker's
/// own ray in the same direction.
pub fn blocked_ray_attacks(
    occupied: Bitboard,
    square: Square,
    dir: Direction,
    ray_attacks: &RayTable,
) -> Bitboard {
    let attacks = ray_attacks[square.index()][dir as usize];
    let blockers = attacks & occupied;

    let nearest = if dir.is_positive() {
        blockers.lsb()
    } else {
        blockers.msb()
    };

    match nearest {
        Some(block_square) => attacks ^ ray_attacks[block_square.index()][dir as usize],
        None => attacks,
    }
}

/// Returns rook attacks from the starting square.
///
/// Note that if the attack is blocked by bits in the `occupied` bitboard, the
/// attacks will include the square the blocker is encountered (but none
/// after the blocker).
///
/// # Examples
///
/// ```
/// # use schack_core::{
/// #     board::{Bitboard, Square},
/// #     move_gen::{lookups::gen_ray_attacks, bitboard_utils::rook_attacks}
/// # };
/// let ray_attacks = gen_ray_attacks();
/// let occupied = "
///         . . . . . . . .
///         . . . . # . . .
///         . . . . . . . .
///         . . . . # . . .
///         . . # . . . . .
///         . . . . . . . .
///         . . . . . . . .
///         . . . . . . . .
/// ".parse().unwrap();
/// assert_eq!(
///     rook_attacks(occupied, Square::E4, &ray_attacks),
///     "
///         . . . . . . . .
///         . . . . . . . .
///         . . . . . . . .
///         . . . . # . . .
///         . . # # . # # #
///         . . . . # . . .
///         . . . . # . . .
///         . . . . # . . .
///     ".parse().unwrap(),
/// );
/// ```
pub fn rook_attacks(occupied: Bitboard, square: Square, ray_attacks: &RayTable) -> Bitboard {
    Direction::ORTHOGONAL
        .into_iter()
        .map(|dir| blocked_ray_attacks(occupied, square, dir, ray_attacks))
        .fold(Bitboard::EMPTY, Bitboard::or)
}

/// Returns bishop attacks from the starting square, with the same blocker
/// handling as [`rook_attacks`].
pub fn bishop_attacks(occupied: Bitboard, square: Square, ray_attacks: &RayTable) -> Bitboard {
    Direction::DIAGONAL
        .into_iter()
        .map(|dir| blocked_ray_attacks(occupied, square, dir, ray_attacks))
        .fold(Bitboard::EMPTY, Bitboard::or)
}

/// This is simply the union of [`bishop_attacks`] and [`rook_attacks`].
pub fn queen_attacks(occupied: Bitboard, square: Square, ray_attacks: &RayTable) -> Bitboard {
    rook_attacks(occupied, square, ray_attacks) | bishop_attacks(occupied, square, ray_attacks)
}

#[cfg(test)]
mod test {
    use crate::move_gen::lookups::gen_ray_attacks;
    use pretty_assertions::assert_eq;

    use super::*;

    fn bb(diagram: &str) -> Bitboard {
        diagram.parse().unwrap()
    }

    #[test]
    fn test_knight_attacks() {
        assert_eq!(
            knight_attacks(Bitboard::from_square(Square::D4) | Bitboard::from_square(Square::E5)),
            bb("
                . . . . . . . .
                . . . # . # . .
                . . # . # . # .
                . # . . . # . .
                . . # . . . # .
                . # . # . # . .
                . . # . # . . .
                . . . . . . . .
            ")
        );

        assert_eq!(
            knight_attacks(Bitboard::from_square(Square::A1)),
            Bitboard::from_square(Square::B3) | Bitboard::from_square(Square::C2)
        );

        assert_eq!(
            knight_attacks(Bitboard::from_square(Square::H8)),
            Bitboard::from_square(Square::G6) | Bitboard::from_square(Square::F7)
        );

        assert_eq!(
            knight_attacks(Bitboard::from_square(Square::G7)),
            bb("
                . . . . # . . .
                . . . . . . . .
                . . . . # . . .
                . . . . . # . #
                . . . . . . . .
                . . . . . . . .
                . . . . . . . .
                . . . . . . . .
            ")
        );
    }

    #[test]
    fn test_king_moves() {
        assert_eq!(king_moves(Bitboard::from_square(Square::D4)).pop_count(), 8);
        assert_eq!(
            king_moves(Bitboard::from_square(Square::E1)),
            bb("
                . . . . . . . .
                . . . . . . . .
                . . . . . . . .
                . . . . . . . .
                . . . . . . . .
                . . . . . . . .
                . . . # # # . .
                . . . # . # . .
            ")
        );
        assert_eq!(king_moves(Bitboard::from_square(Square::H8)).pop_count(), 3);
    }

    #[test]
    fn test_pawn_attacks() {
        let pawns = Bitboard::from_square(Square::A2) | Bitboard::from_square(Square::E4);
        assert_eq!(
            pawn_attacks(pawns, Side::White),
            Bitboard::from_square(Square::B3)
                | Bitboard::from_square(Square::D5)
                | Bitboard::from_square(Square::F5)
        );
        assert_eq!(
            pawn_attacks(pawns, Side::Black),
            Bitboard::from_square(Square::B1)
                | Bitboard::from_square(Square::D3)
                | Bitboard::from_square(Square::F3)
        );
    }

    #[test]
    fn test_unblocked_rays() {
        let start = Bitboard::from_square(Square::C3);
        assert_eq!(
            unblocked_ray_attacks(start, Direction::North),
            Bitboard::A_FILE.without(Bitboard(0xFFFFFF)) << 2
        );
        assert_eq!(
            unblocked_ray_attacks(start, Direction::SouthWest),
            Bitboard::from_square(Square::B2) | Bitboard::from_square(Square::A1)
        );
        assert_eq!(
            unblocked_ray_attacks(Bitboard::from_square(Square::H4), Direction::East),
            Bitboard::EMPTY
        );
    }

    #[test]
    fn test_direction_sign_matches_rays() {
        let ray_attacks = gen_ray_attacks();
        let square = Square::D4;
        for dir in Direction::ORTHOGONAL.into_iter().chain(Direction::DIAGONAL) {
            let ray = ray_attacks[square.index()][dir as usize];
            for target in ray.squares() {
                assert_eq!(target > square, dir.is_positive(), "{dir:?}");
            }
        }
    }

    #[test]
    fn test_rook_attacks() {
        let ray_attacks = gen_ray_attacks();
        assert_eq!(
            rook_attacks(Bitboard::EMPTY, Square::E4, &ray_attacks),
            (Bitboard::RANK_4 | (Bitboard::A_FILE << 4)).without(Bitboard::from_square(Square::E4))
        );

        let occupied = bb("
                . . . . . . . .
                . . . . # . . .
                . . . . . . . .
                . . . . # . . .
                . . # . # . . .
                . . . . . . . .
                . . . # . . . .
                . . . . # . . .
        ");
        assert_eq!(
            rook_attacks(occupied, Square::E4, &ray_attacks),
            bb("
                . . . . . . . .
                . . . . . . . .
                . . . . . . . .
                . . . . # . . .
                . . # # . # # #
                . . . . # . . .
                . . . . # . . .
                . . . . # . . .
            "),
        );
    }

    #[test]
    fn test_bishop_attacks() {
        let ray_attacks = gen_ray_attacks();
        let occupied = bb("
                . . . . . . . .
                . # . . . . . .
                . . . . . . . .
                . . . # . . . .
                . . . # # . . .
                . . . . . . . .
                . . # . . . . .
                . . . . . . . .
        ");
        assert_eq!(
            bishop_attacks(occupied, Square::E4, &ray_attacks),
            bb("
                . . . . . . . .
                . . . . . . . #
                . . . . . . # .
                . . . # . # . .
                . . . . . . . .
                . . . # . # . .
                . . # . . . # .
                . . . . . . . #
            "),
        );
    }

    #[test]
    fn test_queen_attacks() {
        let ray_attacks = gen_ray_attacks();
        let occupied = bb("
                . . . . . . . .
                . . . . . . . .
                . . . . # . . .
                . . . # . . . .
                . . . . # # # .
                . . . # . . . .
                . . # . # . . .
                . . . . . . . .
        ");
        assert_eq!(
            queen_attacks(occupied, Square::E4, &ray_attacks),
            bb("
                . . . . . . . .
                . . . . . . . #
                . . . . # . # .
                . . . # # # . .
                # # # # . # . .
                . . . # # # . .
                . . . . # . # .
                . . . . . . . #
            "),
        );
    }
}
