//! Rules engine for Chinese chess (xiangqi).
//!
//! The generic layer ([`Board`], [`MoveValidator`], [`Game`]) knows nothing
//! about a particular game; [`XiangqiRules`] plugs the xiangqi movement
//! grammar, palace and river geometry and the facing-generals rule into it.
//!
//! ```
//! use xiangqi_core::{GameStatus, Square, Xiangqi};
//!
//! let mut game = Xiangqi::default();
//! let outcome = game.move_piece(Square::new(3, 0), Square::new(4, 0)).unwrap();
//! assert_eq!(outcome.status, GameStatus::InProgress);
//! assert!(game.undo_move());
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod notation;
pub mod types;
pub mod validator;
pub mod xiangqi;

pub use crate::board::{between, Board, BoardError, MAX_CELLS};
pub use crate::game::{
    system_clock, BoardState, Clock, Game, GameResult, MoveError, MoveOutcome, ResultReason,
    Ruleset,
};
pub use crate::notation::{format_move, parse_move, NotationError};
pub use crate::types::{
    Color, GameStatus, Move, Piece, PieceId, PieceKind, SpecialMove, Square, SquareList,
};
pub use crate::validator::MoveValidator;
pub use crate::xiangqi::{
    general_position, generals_facing, has_crossed_river, is_in_palace, is_on_own_side,
    starting_board, PieceType, Xiangqi, XiangqiBoard, XiangqiPiece, XiangqiRules,
};
