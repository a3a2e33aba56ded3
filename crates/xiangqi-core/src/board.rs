use crate::types::{Color, Piece, PieceKind, Square};
use thiserror::Error;

/// Largest grid a board may be built with.
pub const MAX_CELLS: usize = 100;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("square {0} is out of bounds")]
    OutOfBounds(Square),
    #[error("no piece on {0}")]
    EmptySource(Square),
    #[error("unsupported board size {rows}x{cols}")]
    InvalidDimensions { rows: u8, cols: u8 },
}

/// Grid of piece-or-empty cells, stored row-major.
///
/// A placed piece's `position` always names the cell it sits in; every
/// mutation goes through `place`/`remove` so the two cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board<K> {
    rows: u8,
    cols: u8,
    cells: Vec<Option<Piece<K>>>,
}

impl<K: PieceKind> Board<K> {
    pub fn new(rows: u8, cols: u8) -> Result<Self, BoardError> {
        let size = usize::from(rows) * usize::from(cols);
        if size == 0 || size > MAX_CELLS {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![None; size],
        })
    }

    pub const fn rows(&self) -> u8 {
        self.rows
    }

    pub const fn cols(&self) -> u8 {
        self.cols
    }

    pub fn contains(&self, square: Square) -> bool {
        self.index(square).is_some()
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece<K>> {
        self.index(square).and_then(|idx| self.cells[idx].as_ref())
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }

    /// Binds `piece` to `square`, replacing any occupant without returning it.
    pub fn place(&mut self, mut piece: Piece<K>, square: Square) -> Result<(), BoardError> {
        let idx = self.index(square).ok_or(BoardError::OutOfBounds(square))?;
        piece.position = square;
        self.cells[idx] = Some(piece);
        Ok(())
    }

    pub fn remove(&mut self, square: Square) -> Result<Option<Piece<K>>, BoardError> {
        let idx = self.index(square).ok_or(BoardError::OutOfBounds(square))?;
        Ok(self.cells[idx].take())
    }

    /// Moves whatever stands on `from` to `to` and returns the previous
    /// occupant of `to`. Legality is not checked here.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Result<Option<Piece<K>>, BoardError> {
        let to_idx = self.index(to).ok_or(BoardError::OutOfBounds(to))?;
        let mut piece = self.remove(from)?.ok_or(BoardError::EmptySource(from))?;
        let captured = self.cells[to_idx].take();
        piece.has_moved = true;
        piece.position = to;
        self.cells[to_idx] = Some(piece);
        Ok(captured)
    }

    /// `false` when either square is off the board.
    pub fn is_path_clear(&self, from: Square, to: Square) -> bool {
        if !self.contains(from) || !self.contains(to) {
            return false;
        }
        match between(from, to) {
            Some(mut path) => path.all(|square| !self.is_occupied(square)),
            None => false,
        }
    }

    /// Occupied cells strictly between two squares on a shared line.
    pub fn pieces_between(&self, from: Square, to: Square) -> Option<usize> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        between(from, to).map(|path| path.filter(|sq| self.is_occupied(*sq)).count())
    }

    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        (0..self.rows as i8)
            .flat_map(move |row| (0..self.cols as i8).map(move |col| Square::new(row, col)))
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece<K>> + '_ {
        self.cells.iter().flatten()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece<K>> + '_ {
        self.pieces().filter(move |piece| piece.color == color)
    }

    pub fn find(&self, color: Color, kind: K) -> Option<&Piece<K>> {
        self.pieces_of(color).find(|piece| piece.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.pieces().count()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces().next().is_none()
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    fn index(&self, square: Square) -> Option<usize> {
        let row = u8::try_from(square.row).ok()?;
        let col = u8::try_from(square.col).ok()?;
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(usize::from(row) * usize::from(self.cols) + usize::from(col))
    }
}

/// Walks the cells strictly between `from` and `to` in unit steps.
///
/// Returns `None` when the squares share no row, column or diagonal, or lie
/// too far apart to measure in `i8`. Adjacent and identical squares yield an
/// empty walk.
pub fn between(from: Square, to: Square) -> Option<Between> {
    if !(from.is_orthogonal_to(to) || from.same_diagonal(to)) {
        return None;
    }
    let d_row = to.row.checked_sub(from.row)?;
    let d_col = to.col.checked_sub(from.col)?;
    let step = (d_row.signum(), d_col.signum());
    Some(Between {
        next: from.offset(step.0, step.1),
        end: to,
        step,
    })
}

#[derive(Debug, Clone)]
pub struct Between {
    next: Square,
    end: Square,
    step: (i8, i8),
}

impl Iterator for Between {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.step == (0, 0) || self.next == self.end {
            return None;
        }
        let current = self.next;
        self.next = current.offset(self.step.0, self.step.1);
        Some(current)
    }
}
