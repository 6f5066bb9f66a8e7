use thiserror::Error;

use crate::{
    board::{CoordinateMove, FenError, ParseCoordinateMoveError, Side, Square},
    game::GameStatus,
};

/// Reasons a structurally valid position cannot occur in a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPosition {
    #[error("{0} has no king")]
    MissingKing(Side),
    #[error("{side} has {count} kings")]
    MultipleKings { side: Side, count: u32 },
    #[error("Pawn on {0}, pawns cannot stand on the first or last rank")]
    PawnOnBackRank(Square),
    #[error("{0} is in check but it is not their move")]
    OpponentInCheck(Side),
    #[error("En passant target {0} does not follow a double pawn push")]
    InvalidEnPassant(Square),
}

/// All failures the engine reports to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("Malformed FEN: {0}")]
    MalformedFen(#[from] FenError),
    #[error("Invalid position: {0}")]
    InvalidPosition(#[from] InvalidPosition),
    #[error("Could not read move: {0}")]
    InvalidNotation(#[from] ParseCoordinateMoveError),
    #[error("Illegal move {0}")]
    IllegalMove(CoordinateMove),
    #[error("The game is already over ({0})")]
    GameOver(GameStatus),
    #[error("Cannot take back {requested} plies, only {available} have been played")]
    InvalidTakeback { requested: usize, available: usize },
}
