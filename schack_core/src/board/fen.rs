//! Reading and writing [Forsyth-Edwards
//! Notation](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation).

use thiserror::Error;

use crate::error::ChessError;

use super::{Castling, Piece, Position, Side, Square};

/// The FEN of the standard starting position.
pub const STARTING_POSITION_FEN: &str =
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Grammar errors in a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("Expected 6 space-separated fields, found {0}")]
    WrongFieldCount(usize),
    #[error("Expected 8 ranks in the placement field, found {0}")]
    WrongRankCount(usize),
    #[error("Rank {rank} covers {files} files instead of 8")]
    WrongFileCount { rank: u8, files: u32 },
    #[error("Unexpected character `{0}` in the placement field")]
    InvalidPlacementChar(char),
    #[error("Invalid side to move `{0}`, expected `w` or `b`")]
    InvalidSideToMove(String),
    #[error("Invalid castling field `{0}`")]
    InvalidCastling(String),
    #[error("Invalid en passant field `{0}`")]
    InvalidEnPassant(String),
    #[error("Invalid halfmove clock `{0}`")]
    InvalidHalfmoveClock(String),
    #[error("Invalid fullmove number `{0}`")]
    InvalidFullmoveNumber(String),
}

pub fn position_to_fen(position: &Position) -> String {
    let mut result = String::new();
    let board = position.board();

    for rank in (0..8).rev() {
        let mut empty_squares = 0;
        for file in 0..8 {
            let square = Square::new_unchecked(rank, file);
            match board.piece_at(square) {
                None => empty_squares += 1,
                Some(piece) => {
                    if empty_squares > 0 {
                        result.push((empty_squares + b'0') as _);
                    }
                    result.push(piece.as_fen_char());
                    empty_squares = 0;
                }
            }
        }
        if empty_squares > 0 {
            result.push((empty_squares + b'0') as _);
        }
        if rank > 0 {
            result.push('/');
        }
    }

    result.push(' ');
    result.push(if position.to_move().is_white() {
        'w'
    } else {
        'b'
    });
    result.push(' ');
    result.push_str(&position.castling().as_fen_str());
    result.push(' ');
    match position.en_passant() {
        Some(square) => result.push_str(&square.to_string()),
        None => result.push('-'),
    };

    result.push(' ');
    result.push_str(&position.halfmove_clock().to_string());
    result.push(' ');
    result.push_str(&position.fullmoves().to_string());

    result
}

/// Parses a FEN string and validates the resulting position.
pub fn parse_fen(fen: &str) -> Result<Position, ChessError> {
    let fields: Vec<_> = fen.split_ascii_whitespace().collect();
    let &[placement, to_move, castling, en_passant, halfmove_clock, fullmoves] =
        fields.as_slice()
    else {
        return Err(FenError::WrongFieldCount(fields.len()).into());
    };

    let board = parse_placement(placement)?;

    let to_move = match to_move {
        "w" => Side::White,
        "b" => Side::Black,
        _ => return Err(FenError::InvalidSideToMove(to_move.to_string()).into()),
    };

    let castling = Castling::from_fen_str(castling)
        .ok_or_else(|| FenError::InvalidCastling(castling.to_string()))?;

    let en_passant = parse_en_passant(en_passant, to_move)?;

    let halfmove_clock = halfmove_clock
        .parse()
        .map_err(|_| FenError::InvalidHalfmoveClock(halfmove_clock.to_string()))?;

    let fullmoves = fullmoves
        .parse()
        .ok()
        .filter(|&n: &u32| n >= 1)
        .ok_or_else(|| FenError::InvalidFullmoveNumber(fullmoves.to_string()))?;

    Ok(Position::new(
        board,
        to_move,
        castling,
        en_passant,
        halfmove_clock,
        fullmoves,
    )?)
}

fn parse_placement(placement: &str) -> Result<super::Board, FenError> {
    let ranks: Vec<_> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount(ranks.len()));
    }

    let mut board = [None; 64];
    for (rank_index, rank_pieces) in ranks.into_iter().enumerate() {
        let rank = 7 - rank_index as u8;
        let wrong_count = |files| FenError::WrongFileCount {
            rank: rank + 1,
            files,
        };

        let mut file = 0u32;
        for c in rank_pieces.chars() {
            match c {
                '1'..='8' => file += c as u32 - '0' as u32,
                _ => {
                    let piece =
                        Piece::try_from_fen_char(c).ok_or(FenError::InvalidPlacementChar(c))?;
                    if file >= 8 {
                        return Err(wrong_count(file + 1));
                    }
                    board[Square::new_unchecked(rank, file as u8).index()] = Some(piece);
                    file += 1;
                }
            }
        }

        if file != 8 {
            return Err(wrong_count(file));
        }
    }

    Ok(super::Board::new(&board))
}

fn parse_en_passant(field: &str, to_move: Side) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }

    // The target is the square the pawn skipped, so it sits on rank 6 when
    // white is to move and on rank 3 when black is.
    let expected_rank = match to_move {
        Side::White => 5,
        Side::Black => 2,
    };

    field
        .parse::<Square>()
        .ok()
        .filter(|square| square.rank() == expected_rank)
        .map(Some)
        .ok_or_else(|| FenError::InvalidEnPassant(field.to_string()))
}
