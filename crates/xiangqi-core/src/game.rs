use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, BoardError};
use crate::types::{Color, GameStatus, Move, Piece, Square, SquareList};
use crate::validator::MoveValidator;

/// A complete game: legality oracle plus opening layout and first mover.
pub trait Ruleset: MoveValidator + Clone {
    fn starting_board(&self) -> Board<Self::Kind>;

    fn first_to_move(&self) -> Color;
}

/// Source of move timestamps, in milliseconds since the Unix epoch.
pub type Clock = fn() -> u64;

pub fn system_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("no piece of the side to move on {0}")]
    WrongPiece(Square),
    #[error("{from} -> {to} is not a legal move")]
    IllegalMove { from: Square, to: Square },
    #[error("{from} -> {to} would leave the general in check")]
    SelfCheck { from: Square, to: Square },
    #[error("the game is over")]
    GameOver,
    #[error(transparent)]
    Board(#[from] BoardError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResultReason {
    Checkmate,
    /// The variant's own winning condition (facing generals in xiangqi).
    InstantWin,
    Resignation,
    Agreement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    /// `None` for a draw.
    pub winner: Option<Color>,
    pub loser: Option<Color>,
    pub reason: ResultReason,
}

impl GameResult {
    const fn win(winner: Color, reason: ResultReason) -> Self {
        Self {
            winner: Some(winner),
            loser: Some(winner.opponent()),
            reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveOutcome<K> {
    #[serde(rename = "move")]
    pub mv: Move<K>,
    pub captured: Option<Piece<K>>,
    pub status: GameStatus,
}

/// Read-only snapshot for rendering. Pieces are listed row by row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState<K> {
    pub pieces: Vec<Piece<K>>,
    pub side_to_move: Color,
    pub status: GameStatus,
    pub move_history: Vec<Move<K>>,
    pub captured_pieces: Vec<Piece<K>>,
}

/// Game controller. The only write path to its board and history.
#[derive(Debug, Clone)]
pub struct Game<R: Ruleset> {
    rules: R,
    board: Board<R::Kind>,
    side_to_move: Color,
    status: GameStatus,
    result: Option<GameResult>,
    history: Vec<Move<R::Kind>>,
    captured: Vec<Piece<R::Kind>>,
    clock: Clock,
}

impl<R: Ruleset + Default> Default for Game<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

impl<R: Ruleset> Game<R> {
    pub fn new(rules: R) -> Self {
        let board = rules.starting_board();
        let side_to_move = rules.first_to_move();
        Self::from_board(rules, board, side_to_move)
    }

    /// Starts from an arbitrary position. The status reflects whether
    /// `side_to_move` is already in check.
    pub fn from_board(rules: R, board: Board<R::Kind>, side_to_move: Color) -> Self {
        let status = if rules.is_in_check(&board, side_to_move) {
            GameStatus::Check
        } else {
            GameStatus::InProgress
        };
        Self {
            rules,
            board,
            side_to_move,
            status,
            result: None,
            history: Vec::new(),
            captured: Vec::new(),
            clock: system_clock,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn board(&self) -> &Board<R::Kind> {
        &self.board
    }

    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub const fn status(&self) -> GameStatus {
        self.status
    }

    pub fn history(&self) -> &[Move<R::Kind>] {
        &self.history
    }

    pub fn captured_pieces(&self) -> &[Piece<R::Kind>] {
        &self.captured
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece<R::Kind>> {
        self.board.piece_at(square)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.rules.is_in_check(&self.board, color)
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        self.rules.is_checkmate(&self.board, color)
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn game_result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn board_state(&self) -> BoardState<R::Kind> {
        BoardState {
            pieces: self.board.pieces().copied().collect(),
            side_to_move: self.side_to_move,
            status: self.status,
            move_history: self.history.clone(),
            captured_pieces: self.captured.clone(),
        }
    }

    /// Legal destinations for `piece`, excluding moves that would leave its
    /// own general in check. Empty unless the piece still stands on the board
    /// at `piece.position`, belongs to the side to move, and the game is
    /// still running.
    pub fn valid_moves(&self, piece: &Piece<R::Kind>) -> SquareList {
        if piece.color != self.side_to_move || self.is_game_over() {
            return SquareList::new();
        }
        let on_board = self
            .board
            .piece_at(piece.position)
            .is_some_and(|current| current.id == piece.id);
        if !on_board {
            return SquareList::new();
        }
        let mut moves = self.rules.valid_moves(&self.board, piece);
        moves.retain(|to| {
            !self
                .rules
                .leaves_in_check(&self.board, piece.position, *to, piece.color)
        });
        moves
    }

    pub fn valid_moves_from(&self, square: Square) -> SquareList {
        match self.board.piece_at(square) {
            Some(piece) => self.valid_moves(piece),
            None => SquareList::new(),
        }
    }

    /// Validates and commits `from -> to`. On error nothing changes.
    pub fn move_piece(
        &mut self,
        from: Square,
        to: Square,
    ) -> Result<MoveOutcome<R::Kind>, MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        let piece = match self.board.piece_at(from) {
            Some(piece) if piece.color == self.side_to_move => *piece,
            _ => return Err(MoveError::WrongPiece(from)),
        };
        if !self.rules.is_valid_move(&self.board, &piece, from, to) {
            return Err(MoveError::IllegalMove { from, to });
        }

        let mut next = self.board.clone();
        let captured = next.move_piece(from, to)?;
        if self.rules.is_in_check(&next, piece.color) {
            return Err(MoveError::SelfCheck { from, to });
        }
        self.board = next;

        let mv = Move::new(from, to, piece, captured, (self.clock)());
        self.history.push(mv);
        if let Some(taken) = captured {
            self.captured.push(taken);
        }

        self.update_status(piece.color);
        if !self.status.is_terminal() {
            self.side_to_move = piece.color.opponent();
        }

        Ok(MoveOutcome {
            mv,
            captured,
            status: self.status,
        })
    }

    /// Takes back the most recent move. Returns `false` with no history.
    ///
    /// The status is recomputed from the restored position rather than
    /// cleared, so undoing into a checked position reports `Check` again.
    pub fn undo_move(&mut self) -> bool {
        let Some(mv) = self.history.last().copied() else {
            return false;
        };
        let Ok(board) = self.restored_board(&mv) else {
            return false;
        };
        self.history.pop();
        self.board = board;

        if let Some(taken) = mv.captured {
            if let Some(idx) = self.captured.iter().rposition(|piece| piece.id == taken.id) {
                self.captured.remove(idx);
            }
        }

        self.side_to_move = mv.color();
        self.result = None;
        self.status = if self.is_in_check(self.side_to_move) {
            GameStatus::Check
        } else {
            GameStatus::InProgress
        };
        true
    }

    pub fn restart(&mut self) {
        self.board = self.rules.starting_board();
        self.side_to_move = self.rules.first_to_move();
        self.status = GameStatus::InProgress;
        self.result = None;
        self.history.clear();
        self.captured.clear();
    }

    /// `color` concedes; its opponent wins.
    pub fn resign(&mut self, color: Color) -> Result<GameResult, MoveError> {
        self.finish(
            GameStatus::Resigned,
            GameResult::win(color.opponent(), ResultReason::Resignation),
        )
    }

    pub fn agree_draw(&mut self) -> Result<GameResult, MoveError> {
        self.finish(
            GameStatus::Draw,
            GameResult {
                winner: None,
                loser: None,
                reason: ResultReason::Agreement,
            },
        )
    }

    fn finish(&mut self, status: GameStatus, result: GameResult) -> Result<GameResult, MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        self.status = status;
        self.result = Some(result);
        Ok(result)
    }

    /// Order: checkmate, check, the variant's instant win, else in progress.
    fn update_status(&mut self, mover: Color) {
        let defender = mover.opponent();
        let (status, result) = if self.rules.is_checkmate(&self.board, defender) {
            (
                GameStatus::Checkmate,
                Some(GameResult::win(mover, ResultReason::Checkmate)),
            )
        } else if self.rules.is_in_check(&self.board, defender) {
            (GameStatus::Check, None)
        } else if self.rules.instant_win(&self.board) {
            (
                GameStatus::Checkmate,
                Some(GameResult::win(mover, ResultReason::InstantWin)),
            )
        } else {
            (GameStatus::InProgress, None)
        };
        self.status = status;
        self.result = result;
    }

    fn restored_board(&self, mv: &Move<R::Kind>) -> Result<Board<R::Kind>, BoardError> {
        let mut board = self.board.clone();
        board.remove(mv.to)?;
        board.place(mv.piece, mv.from)?;
        if let Some(taken) = mv.captured {
            board.place(taken, mv.to)?;
        }
        Ok(board)
    }
}
