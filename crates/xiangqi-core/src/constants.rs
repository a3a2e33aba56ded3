use crate::xiangqi::PieceType;

pub const ROWS: u8 = 10;
pub const COLS: u8 = 9;

/// Last row on Red's side of the river; Black's side starts one row later.
pub const RED_RIVER_EDGE: i8 = 4;
pub const BLACK_RIVER_EDGE: i8 = 5;

pub const PALACE_COLS: (i8, i8) = (3, 5);
pub const RED_PALACE_ROWS: (i8, i8) = (0, 2);
pub const BLACK_PALACE_ROWS: (i8, i8) = (7, 9);

pub const PIECES_PER_SIDE: usize = 16;

/// Red's half of the opening layout as `(kind, row, col)`. Black mirrors the
/// rows (`9 - row`) on the same columns.
pub const RED_LAYOUT: [(PieceType, i8, i8); PIECES_PER_SIDE] = [
    (PieceType::Chariot, 0, 0),
    (PieceType::Horse, 0, 1),
    (PieceType::Elephant, 0, 2),
    (PieceType::Advisor, 0, 3),
    (PieceType::General, 0, 4),
    (PieceType::Advisor, 0, 5),
    (PieceType::Elephant, 0, 6),
    (PieceType::Horse, 0, 7),
    (PieceType::Chariot, 0, 8),
    (PieceType::Cannon, 2, 1),
    (PieceType::Cannon, 2, 7),
    (PieceType::Soldier, 3, 0),
    (PieceType::Soldier, 3, 2),
    (PieceType::Soldier, 3, 4),
    (PieceType::Soldier, 3, 6),
    (PieceType::Soldier, 3, 8),
];

/// Files used by algebraic notation, one per column.
pub const FILES: [char; COLS as usize] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i'];
