//! Game state: move history, termination rules and takebacks.

use std::fmt::Display;

use crate::{
    board::{CoordinateMove, Move, Position, San, Side},
    error::ChessError,
    move_gen::MoveVec,
};

/// Where a game stands after the latest move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    /// The given side delivered mate.
    Checkmate(Side),
    Stalemate,
    DrawByFiftyMove,
    DrawByRepetition,
    DrawByInsufficientMaterial,
    /// The given side won because the other resigned.
    Resignation(Side),
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }

    /// The winning side, if the game ended decisively.
    pub fn winner(self) -> Option<Side> {
        match self {
            GameStatus::Checkmate(side) | GameStatus::Resignation(side) => Some(side),
            _ => None,
        }
    }
}

impl Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Checkmate(winner) => write!(f, "{winner} wins by checkmate"),
            GameStatus::Stalemate => write!(f, "draw by stalemate"),
            GameStatus::DrawByFiftyMove => write!(f, "draw by the fifty-move rule"),
            GameStatus::DrawByRepetition => write!(f, "draw by threefold repetition"),
            GameStatus::DrawByInsufficientMaterial => {
                write!(f, "draw by insufficient material")
            }
            GameStatus::Resignation(winner) => write!(f, "{winner} wins by resignation"),
        }
    }
}

/// A game in progress: every position reached so far, the moves between them
/// and the resulting status.
///
/// The history always holds at least the starting position, and has exactly
/// one more entry than the move list. Once the status is terminal no further
/// moves are accepted, though [`GameState::takeback`] reopens the game.
///
/// `GameState` takes `&mut self` for everything that changes it; wrap it in a
/// `Mutex` to share it between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    history: Vec<Position>,
    moves: Vec<Move>,
    status: GameStatus,
}

impl GameState {
    /// A new game from the standard starting position.
    pub fn new() -> Self {
        Self::from_position(Position::starting_position())
    }

    /// A new game from a FEN position. The game may already be over, e.g. if
    /// the position is checkmate.
    ///
    /// # Examples
    ///
    /// ```
    /// # use schack_core::{board::Side, game::{GameState, GameStatus}};
    /// let game = GameState::from_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    /// assert_eq!(game.status(), GameStatus::Checkmate(Side::White));
    ///
    /// assert!(GameState::from_fen("not a fen").is_err());
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        Ok(Self::from_position(Position::try_parse_fen(fen)?))
    }

    pub fn from_position(position: Position) -> Self {
        let mut game = Self {
            history: vec![position],
            moves: Vec::new(),
            status: GameStatus::InProgress,
        };
        game.status = game.compute_status();
        game
    }

    pub fn current(&self) -> &Position {
        // Never empty, see `takeback`.
        &self.history[self.history.len() - 1]
    }

    pub fn current_fen(&self) -> String {
        self.current().fen()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Every position of the game, oldest first, ending with
    /// [`GameState::current`].
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// The moves played so far.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The moves played so far in standard algebraic notation.
    pub fn san_history(&self) -> Vec<San> {
        self.history
            .iter()
            .zip(&self.moves)
            .filter_map(|(position, &the_move)| position.san(the_move))
            .collect()
    }

    pub fn legal_moves(&self) -> MoveVec {
        self.current().legal_moves()
    }

    /// Plays a move and returns the new status.
    ///
    /// Fails with [`ChessError::GameOver`] if the game has already ended and
    /// with [`ChessError::IllegalMove`] if the move is not legal in the current
    /// position. Neither failure changes the game.
    pub fn submit_move(&mut self, the_move: Move) -> Result<GameStatus, ChessError> {
        if self.status.is_over() {
            return Err(ChessError::GameOver(self.status));
        }

        let next = self.current().apply(the_move)?;
        self.history.push(next);
        self.moves.push(the_move);

        self.status = self.compute_status();
        Ok(self.status)
    }

    /// Plays a move given in coordinate notation, such as `e2e4` or `e7e8q`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use schack_core::{game::{GameState, GameStatus}, ChessError};
    /// let mut game = GameState::new();
    /// assert_eq!(game.submit_coordinate_move("g1f3"), Ok(GameStatus::InProgress));
    /// assert!(matches!(
    ///     game.submit_coordinate_move("e7e4"),
    ///     Err(ChessError::IllegalMove(_))
    /// ));
    /// assert!(matches!(
    ///     game.submit_coordinate_move("e7"),
    ///     Err(ChessError::InvalidNotation(_))
    /// ));
    /// ```
    pub fn submit_coordinate_move(&mut self, notation: &str) -> Result<GameStatus, ChessError> {
        let coordinates: CoordinateMove = notation.parse()?;

        if self.status.is_over() {
            return Err(ChessError::GameOver(self.status));
        }

        let the_move = self
            .current()
            .find_move(coordinates.from, coordinates.to, coordinates.promotion)
            .ok_or(ChessError::IllegalMove(coordinates))?;

        self.submit_move(the_move)
    }

    /// Ends the game with a win for the other side.
    pub fn resign(&mut self, side: Side) -> Result<GameStatus, ChessError> {
        if self.status.is_over() {
            return Err(ChessError::GameOver(self.status));
        }

        self.status = GameStatus::Resignation(side.flip());
        Ok(self.status)
    }

    /// Takes back the last `count` plies and returns the status recomputed for
    /// the position that is current afterwards. A resignation is undone along
    /// with the moves.
    ///
    /// Fails with [`ChessError::InvalidTakeback`] if fewer than `count` plies
    /// have been played.
    pub fn takeback(&mut self, count: usize) -> Result<GameStatus, ChessError> {
        if count > self.moves.len() {
            return Err(ChessError::InvalidTakeback {
                requested: count,
                available: self.moves.len(),
            });
        }

        self.moves.truncate(self.moves.len() - count);
        self.history.truncate(self.history.len() - count);

        self.status = self.compute_status();
        Ok(self.status)
    }

    /// How many times the current position has occurred in this game,
    /// counting the current occurrence.
    pub fn repetition_count(&self) -> usize {
        let current = self.current();

        // Positions before the last capture or pawn move cannot repeat.
        let window = current.halfmove_clock() as usize + 1;

        self.history
            .iter()
            .rev()
            .take(window)
            .filter(|position| position.is_repetition_of(current))
            .count()
    }

    fn compute_status(&self) -> GameStatus {
        let position = self.current();

        if position.legal_moves().is_empty() {
            if position.is_in_check() {
                GameStatus::Checkmate(position.to_move().flip())
            } else {
                GameStatus::Stalemate
            }
        } else if position.is_insufficient_material() {
            GameStatus::DrawByInsufficientMaterial
        } else if position.halfmove_clock() >= 100 {
            GameStatus::DrawByFiftyMove
        } else if self.repetition_count() >= 3 {
            GameStatus::DrawByRepetition
        } else {
            GameStatus::InProgress
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
