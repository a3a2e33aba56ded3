use crate::constants::{FILES, ROWS};
use crate::types::{Move, Square};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid square: {0}")]
    InvalidSquare(String),
    #[error("invalid move: {0}")]
    InvalidMove(String),
}

/// `a1` is row 0, column 0; files run `a`..`i`, ranks `1`..`10`.
pub fn square_to_algebraic(square: Square) -> Option<String> {
    let file = FILES.get(usize::try_from(square.col).ok()?)?;
    if !(0..ROWS as i8).contains(&square.row) {
        return None;
    }
    Some(format!("{file}{}", square.row + 1))
}

pub fn algebraic_to_square(input: &str) -> Result<Square, NotationError> {
    let invalid = || NotationError::InvalidSquare(input.to_string());
    let mut chars = input.chars();
    let file = chars.next().ok_or_else(invalid)?;
    let col = FILES.iter().position(|f| *f == file).ok_or_else(invalid)?;
    let rank = chars.as_str().parse::<i8>().map_err(|_| invalid())?;
    if !(1..=ROWS as i8).contains(&rank) {
        return Err(invalid());
    }
    Ok(Square::new(rank - 1, col as i8))
}

pub fn format_squares(from: Square, to: Square) -> Option<String> {
    Some(format!(
        "{}-{}",
        square_to_algebraic(from)?,
        square_to_algebraic(to)?
    ))
}

pub fn format_move<K>(mv: &Move<K>) -> Option<String> {
    format_squares(mv.from, mv.to)
}

pub fn parse_move(input: &str) -> Result<(Square, Square), NotationError> {
    let (from, to) = input
        .trim()
        .split_once('-')
        .ok_or_else(|| NotationError::InvalidMove(input.to_string()))?;
    Ok((algebraic_to_square(from)?, algebraic_to_square(to)?))
}
