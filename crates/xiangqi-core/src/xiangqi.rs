use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::{
    BLACK_PALACE_ROWS, BLACK_RIVER_EDGE, COLS, PALACE_COLS, PIECES_PER_SIDE, RED_LAYOUT,
    RED_PALACE_ROWS, RED_RIVER_EDGE, ROWS,
};
use crate::game::{Game, Ruleset};
use crate::types::{Color, Piece, PieceId, Square};
use crate::validator::MoveValidator;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    General = 0,
    Advisor = 1,
    Elephant = 2,
    Horse = 3,
    Chariot = 4,
    Cannon = 5,
    Soldier = 6,
}

impl PieceType {
    pub const ALL: [Self; 7] = [
        Self::General,
        Self::Advisor,
        Self::Elephant,
        Self::Horse,
        Self::Chariot,
        Self::Cannon,
        Self::Soldier,
    ];

    pub const fn chinese_name(self, color: Color) -> char {
        match (self, color) {
            (Self::General, Color::Red) => '帅',
            (Self::General, Color::Black) => '将',
            (Self::Advisor, Color::Red) => '仕',
            (Self::Advisor, Color::Black) => '士',
            (Self::Elephant, Color::Red) => '相',
            (Self::Elephant, Color::Black) => '象',
            (Self::Horse, _) => '马',
            (Self::Chariot, _) => '车',
            (Self::Cannon, _) => '炮',
            (Self::Soldier, Color::Red) => '兵',
            (Self::Soldier, Color::Black) => '卒',
        }
    }

    pub const fn code(self) -> char {
        match self {
            Self::General => 'k',
            Self::Advisor => 'a',
            Self::Elephant => 'b',
            Self::Horse => 'n',
            Self::Chariot => 'r',
            Self::Cannon => 'c',
            Self::Soldier => 'p',
        }
    }

    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'k' => Some(Self::General),
            'a' => Some(Self::Advisor),
            'b' => Some(Self::Elephant),
            'n' => Some(Self::Horse),
            'r' => Some(Self::Chariot),
            'c' => Some(Self::Cannon),
            'p' => Some(Self::Soldier),
            _ => None,
        }
    }
}

pub type XiangqiPiece = Piece<PieceType>;
pub type XiangqiBoard = Board<PieceType>;
pub type Xiangqi = Game<XiangqiRules>;

pub fn is_in_palace(color: Color, square: Square) -> bool {
    let rows = match color {
        Color::Red => RED_PALACE_ROWS,
        Color::Black => BLACK_PALACE_ROWS,
    };
    (rows.0..=rows.1).contains(&square.row) && (PALACE_COLS.0..=PALACE_COLS.1).contains(&square.col)
}

pub fn is_on_own_side(color: Color, square: Square) -> bool {
    match color {
        Color::Red => square.row <= RED_RIVER_EDGE,
        Color::Black => square.row >= BLACK_RIVER_EDGE,
    }
}

/// Only soldiers cross; every other kind reports `false`.
pub fn has_crossed_river(piece: &XiangqiPiece) -> bool {
    piece.kind == PieceType::Soldier && !is_on_own_side(piece.color, piece.position)
}

/// Row step a soldier of `color` takes going forward.
pub const fn forward(color: Color) -> i8 {
    match color {
        Color::Red => 1,
        Color::Black => -1,
    }
}

pub fn general_position(board: &XiangqiBoard, color: Color) -> Option<Square> {
    board
        .find(color, PieceType::General)
        .map(|general| general.position)
}

/// Both generals on one file with nothing between them.
pub fn generals_facing(board: &XiangqiBoard) -> bool {
    let (Some(red), Some(black)) = (
        general_position(board, Color::Red),
        general_position(board, Color::Black),
    ) else {
        return false;
    };
    red.same_col(black) && board.is_path_clear(red, black)
}

pub fn starting_board() -> XiangqiBoard {
    let mut board = Board::new(ROWS, COLS).expect("xiangqi dimensions fit MAX_CELLS");
    for (idx, &(kind, row, col)) in RED_LAYOUT.iter().enumerate() {
        let red = Square::new(row, col);
        let black = Square::new(ROWS as i8 - 1 - row, col);
        let _ = board.place(
            Piece::new(PieceId(idx as u8), kind, Color::Red, red),
            red,
        );
        let _ = board.place(
            Piece::new(
                PieceId((PIECES_PER_SIDE + idx) as u8),
                kind,
                Color::Black,
                black,
            ),
            black,
        );
    }
    board
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct XiangqiRules;

impl XiangqiRules {
    fn general_move(piece: &XiangqiPiece, from: Square, to: Square) -> bool {
        is_in_palace(piece.color, to) && from.distance(to) == 1 && from.is_orthogonal_to(to)
    }

    fn advisor_move(piece: &XiangqiPiece, from: Square, to: Square) -> bool {
        is_in_palace(piece.color, to)
            && from.row.abs_diff(to.row) == 1
            && from.col.abs_diff(to.col) == 1
    }

    fn elephant_move(board: &XiangqiBoard, piece: &XiangqiPiece, from: Square, to: Square) -> bool {
        if !is_on_own_side(piece.color, to) {
            return false;
        }
        if from.row.abs_diff(to.row) != 2 || from.col.abs_diff(to.col) != 2 {
            return false;
        }
        let eye = from.offset((to.row - from.row) / 2, (to.col - from.col) / 2);
        !board.is_occupied(eye)
    }

    fn horse_move(board: &XiangqiBoard, from: Square, to: Square) -> bool {
        let d_row = to.row - from.row;
        let d_col = to.col - from.col;
        let leg = match (d_row.unsigned_abs(), d_col.unsigned_abs()) {
            (2, 1) => from.offset(d_row / 2, 0),
            (1, 2) => from.offset(0, d_col / 2),
            _ => return false,
        };
        !board.is_occupied(leg)
    }

    fn chariot_move(board: &XiangqiBoard, from: Square, to: Square) -> bool {
        from.is_orthogonal_to(to) && board.is_path_clear(from, to)
    }

    fn cannon_move(board: &XiangqiBoard, from: Square, to: Square) -> bool {
        if !from.is_orthogonal_to(to) {
            return false;
        }
        let Some(screens) = board.pieces_between(from, to) else {
            return false;
        };
        if board.is_occupied(to) {
            screens == 1
        } else {
            screens == 0
        }
    }

    fn soldier_move(piece: &XiangqiPiece, from: Square, to: Square) -> bool {
        let d_row = to.row - from.row;
        let d_col = to.col - from.col;
        if d_row.unsigned_abs() + d_col.unsigned_abs() != 1 {
            return false;
        }
        if d_row == forward(piece.color) {
            return true;
        }
        d_row == 0 && !is_on_own_side(piece.color, from)
    }
}

impl MoveValidator for XiangqiRules {
    type Kind = PieceType;

    fn royal_kind(&self) -> PieceType {
        PieceType::General
    }

    fn is_valid_move(
        &self,
        board: &XiangqiBoard,
        piece: &XiangqiPiece,
        from: Square,
        to: Square,
    ) -> bool {
        if !self.is_basic_move_valid(board, piece, from, to) {
            return false;
        }
        match piece.kind {
            PieceType::General => Self::general_move(piece, from, to),
            PieceType::Advisor => Self::advisor_move(piece, from, to),
            PieceType::Elephant => Self::elephant_move(board, piece, from, to),
            PieceType::Horse => Self::horse_move(board, from, to),
            PieceType::Chariot => Self::chariot_move(board, from, to),
            PieceType::Cannon => Self::cannon_move(board, from, to),
            PieceType::Soldier => Self::soldier_move(piece, from, to),
        }
    }

    fn instant_win(&self, board: &XiangqiBoard) -> bool {
        generals_facing(board)
    }
}

impl Ruleset for XiangqiRules {
    fn starting_board(&self) -> XiangqiBoard {
        starting_board()
    }

    fn first_to_move(&self) -> Color {
        Color::Red
    }
}
