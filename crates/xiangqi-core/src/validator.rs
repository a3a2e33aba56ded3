use crate::board::Board;
use crate::types::{Color, Piece, PieceKind, Square, SquareList};

/// Legality oracle for one game.
///
/// Implementors supply the per-kind geometry in [`MoveValidator::is_valid_move`];
/// the provided methods build enumeration, check and checkmate detection on
/// top of it. Nothing here considers whether a move leaves the mover's own
/// royal piece attacked; that filter belongs to the game controller.
pub trait MoveValidator {
    type Kind: PieceKind;

    /// The piece whose capture ends the game (general, king).
    fn royal_kind(&self) -> Self::Kind;

    fn is_valid_move(
        &self,
        board: &Board<Self::Kind>,
        piece: &Piece<Self::Kind>,
        from: Square,
        to: Square,
    ) -> bool;

    /// Win awarded to the side that just moved, checked after check and
    /// checkmate. Variants without such a rule keep the default.
    fn instant_win(&self, _board: &Board<Self::Kind>) -> bool {
        false
    }

    fn is_basic_move_valid(
        &self,
        board: &Board<Self::Kind>,
        piece: &Piece<Self::Kind>,
        from: Square,
        to: Square,
    ) -> bool {
        if !board.contains(from) || !board.contains(to) || from == to {
            return false;
        }
        board
            .piece_at(to)
            .is_none_or(|target| target.color != piece.color)
    }

    fn valid_moves(&self, board: &Board<Self::Kind>, piece: &Piece<Self::Kind>) -> SquareList {
        board
            .squares()
            .filter(|to| self.is_valid_move(board, piece, piece.position, *to))
            .collect()
    }

    fn is_in_check(&self, board: &Board<Self::Kind>, color: Color) -> bool {
        let Some(royal) = board.find(color, self.royal_kind()) else {
            return false;
        };
        let target = royal.position;
        board
            .pieces_of(color.opponent())
            .any(|attacker| self.is_valid_move(board, attacker, attacker.position, target))
    }

    /// Applies `from -> to` to a scratch copy and reports whether `color` is
    /// in check afterwards. `board` itself is never touched.
    fn leaves_in_check(
        &self,
        board: &Board<Self::Kind>,
        from: Square,
        to: Square,
        color: Color,
    ) -> bool {
        let mut scratch = board.clone();
        match scratch.move_piece(from, to) {
            Ok(_) => self.is_in_check(&scratch, color),
            Err(_) => true,
        }
    }

    fn is_checkmate(&self, board: &Board<Self::Kind>, color: Color) -> bool {
        if !self.is_in_check(board, color) {
            return false;
        }
        for piece in board.pieces_of(color) {
            for to in self.valid_moves(board, piece) {
                if !self.leaves_in_check(board, piece.position, to, color) {
                    return false;
                }
            }
        }
        true
    }
}
