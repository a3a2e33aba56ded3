use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::board::MAX_CELLS;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red = 0,
    Black = 1,
}

impl Color {
    pub const ALL: [Self; 2] = [Self::Red, Self::Black];

    pub const fn opponent(self) -> Self {
        match self {
            Self::Red => Self::Black,
            Self::Black => Self::Red,
        }
    }

    pub const fn to_code(self) -> char {
        match self {
            Self::Red => 'r',
            Self::Black => 'b',
        }
    }

    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'r' => Some(Self::Red),
            'b' => Some(Self::Black),
            _ => None,
        }
    }
}

/// Movement-type tag of a game's closed piece set.
pub trait PieceKind: fmt::Debug + Clone + Copy + PartialEq + Eq + Hash {}

impl<T> PieceKind for T where T: fmt::Debug + Clone + Copy + PartialEq + Eq + Hash {}

/// Board coordinate. Carries no bounds of its own; a board decides whether it
/// is on the grid, so negative components are representable and rejected there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Saturates at the `i8` limits, which no board contains.
    pub const fn offset(self, d_row: i8, d_col: i8) -> Self {
        Self {
            row: self.row.saturating_add(d_row),
            col: self.col.saturating_add(d_col),
        }
    }

    /// Chebyshev distance.
    pub fn distance(self, other: Self) -> u8 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    pub const fn same_row(self, other: Self) -> bool {
        self.row == other.row
    }

    pub const fn same_col(self, other: Self) -> bool {
        self.col == other.col
    }

    pub fn same_diagonal(self, other: Self) -> bool {
        self.row.abs_diff(other.row) == self.col.abs_diff(other.col)
    }

    pub fn is_orthogonal_to(self, other: Self) -> bool {
        self.same_row(other) || self.same_col(other)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Square {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s.split_once(',').unwrap_or((s, ""));
        Ok(Self::new(row.trim().parse()?, col.trim().parse()?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece<K> {
    pub id: PieceId,
    #[serde(rename = "type")]
    pub kind: K,
    pub color: Color,
    pub position: Square,
    pub has_moved: bool,
}

impl<K: PieceKind> Piece<K> {
    pub const fn new(id: PieceId, kind: K, color: Color, position: Square) -> Self {
        Self {
            id,
            kind,
            color,
            position,
            has_moved: false,
        }
    }
}

/// Variant-specific effects a move may carry. Xiangqi never produces one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpecialMove {
    Promotion,
    Castling,
    EnPassant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move<K> {
    pub from: Square,
    pub to: Square,
    /// The mover as it stood on `from`, before the move was applied.
    pub piece: Piece<K>,
    pub captured: Option<Piece<K>>,
    pub special: Option<SpecialMove>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl<K: PieceKind> Move<K> {
    pub const fn new(
        from: Square,
        to: Square,
        piece: Piece<K>,
        captured: Option<Piece<K>>,
        timestamp: u64,
    ) -> Self {
        Self {
            from,
            to,
            piece,
            captured,
            special: None,
            timestamp,
        }
    }

    pub const fn color(&self) -> Color {
        self.piece.color
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    #[default]
    InProgress,
    Check,
    Checkmate,
    Stalemate,
    Draw,
    Resigned,
}

impl GameStatus {
    /// The serialized name, e.g. `"inProgress"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "inProgress",
            Self::Check => "check",
            Self::Checkmate => "checkmate",
            Self::Stalemate => "stalemate",
            Self::Draw => "draw",
            Self::Resigned => "resigned",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Checkmate | Self::Stalemate | Self::Draw | Self::Resigned
        )
    }
}

/// Destinations for a single piece; never more than the cells of a board.
pub type SquareList = ArrayVec<Square, MAX_CELLS>;
