use xiangqi_core::constants::{COLS, ROWS};
use xiangqi_core::{
    generals_facing, starting_board, Board, Color, MoveValidator, Piece, PieceId, PieceType,
    Square, XiangqiBoard, XiangqiPiece, XiangqiRules,
};

fn sq(row: i8, col: i8) -> Square {
    Square::new(row, col)
}

fn empty() -> XiangqiBoard {
    Board::new(ROWS, COLS).expect("valid dimensions")
}

fn put(board: &mut XiangqiBoard, id: u8, kind: PieceType, color: Color, row: i8, col: i8) -> XiangqiPiece {
    let piece = Piece::new(PieceId(id), kind, color, sq(row, col));
    board.place(piece, sq(row, col)).expect("on board");
    piece
}

fn can_move(board: &XiangqiBoard, from: Square, to: Square) -> bool {
    let piece = board.piece_at(from).expect("piece on origin");
    XiangqiRules.is_valid_move(board, piece, from, to)
}

fn destinations(board: &XiangqiBoard, from: Square) -> Vec<(i8, i8)> {
    let piece = board.piece_at(from).expect("piece on origin");
    let mut moves: Vec<_> = XiangqiRules
        .valid_moves(board, piece)
        .iter()
        .map(|sq| (sq.row, sq.col))
        .collect();
    moves.sort();
    moves
}

#[test]
fn basic_checks_reject_same_square_own_piece_and_off_board() {
    let board = starting_board();
    let chariot = board.piece_at(sq(0, 0)).expect("chariot");
    assert!(!XiangqiRules.is_basic_move_valid(&board, chariot, sq(0, 0), sq(0, 0)));
    assert!(!XiangqiRules.is_basic_move_valid(&board, chariot, sq(0, 0), sq(0, 1)));
    assert!(!XiangqiRules.is_basic_move_valid(&board, chariot, sq(0, 0), sq(-1, 0)));
    assert!(XiangqiRules.is_basic_move_valid(&board, chariot, sq(0, 0), sq(1, 0)));
    assert!(XiangqiRules.is_basic_move_valid(&board, chariot, sq(0, 0), sq(9, 0)));
}

#[test]
fn off_board_origin_is_rejected_for_every_kind() {
    let board = empty();
    for color in Color::ALL {
        for kind in PieceType::ALL {
            for (from, to) in [
                (sq(i8::MIN, 4), sq(1, 4)),
                (sq(i8::MAX, 0), sq(0, 0)),
                (sq(-1, 4), sq(0, 4)),
                (sq(4, 9), sq(4, 8)),
            ] {
                let piece = Piece::new(PieceId(0), kind, color, from);
                assert!(
                    !XiangqiRules.is_valid_move(&board, &piece, from, to),
                    "{color:?} {kind:?} {from} -> {to}"
                );
            }
        }
    }
}

#[test]
fn general_stays_in_palace_one_orthogonal_step() {
    let board = starting_board();
    let from = sq(0, 4);
    assert!(can_move(&board, from, sq(1, 4)));
    assert!(!can_move(&board, from, sq(0, 3)), "own advisor");
    assert!(!can_move(&board, from, sq(2, 4)), "two steps");
    assert!(!can_move(&board, from, sq(1, 3)), "diagonal");

    let mut board = empty();
    put(&mut board, 0, PieceType::General, Color::Red, 2, 3);
    assert_eq!(destinations(&board, sq(2, 3)), vec![(1, 3), (2, 4)]);

    let mut board = empty();
    put(&mut board, 0, PieceType::General, Color::Black, 7, 5);
    assert_eq!(destinations(&board, sq(7, 5)), vec![(7, 4), (8, 5)]);
}

#[test]
fn advisor_moves_diagonally_inside_palace() {
    let board = starting_board();
    assert!(can_move(&board, sq(0, 3), sq(1, 4)));
    assert!(!can_move(&board, sq(0, 3), sq(1, 3)));
    assert!(!can_move(&board, sq(0, 3), sq(0, 4)));

    let mut board = empty();
    put(&mut board, 0, PieceType::Advisor, Color::Red, 1, 4);
    assert_eq!(
        destinations(&board, sq(1, 4)),
        vec![(0, 3), (0, 5), (2, 3), (2, 5)]
    );

    let mut board = empty();
    put(&mut board, 0, PieceType::Advisor, Color::Red, 2, 5);
    assert_eq!(destinations(&board, sq(2, 5)), vec![(1, 4)]);
}

#[test]
fn elephant_eye_blocks() {
    let mut board = starting_board();
    assert!(can_move(&board, sq(0, 2), sq(2, 4)));
    assert!(can_move(&board, sq(0, 2), sq(2, 0)));

    put(&mut board, 40, PieceType::Soldier, Color::Black, 1, 3);
    assert!(!can_move(&board, sq(0, 2), sq(2, 4)), "eye at (1,3) occupied");
    assert!(can_move(&board, sq(0, 2), sq(2, 0)));
}

#[test]
fn elephant_never_crosses_the_river() {
    let mut board = empty();
    put(&mut board, 0, PieceType::Elephant, Color::Red, 4, 2);
    assert_eq!(destinations(&board, sq(4, 2)), vec![(2, 0), (2, 4)]);

    let mut board = empty();
    put(&mut board, 0, PieceType::Elephant, Color::Black, 5, 6);
    assert_eq!(destinations(&board, sq(5, 6)), vec![(7, 4), (7, 8)]);

    let board = starting_board();
    assert!(!can_move(&board, sq(0, 2), sq(6, 8)));
    assert!(!can_move(&board, sq(0, 2), sq(1, 3)), "single diagonal step");
}

#[test]
fn horse_leg_blocks_along_the_long_axis() {
    let mut board = starting_board();
    assert!(can_move(&board, sq(0, 1), sq(2, 2)));
    assert!(can_move(&board, sq(0, 1), sq(2, 0)));
    assert!(!can_move(&board, sq(0, 1), sq(1, 3)), "leg at (0,2) holds the elephant");

    put(&mut board, 40, PieceType::Soldier, Color::Black, 1, 1);
    assert!(!can_move(&board, sq(0, 1), sq(2, 2)));
    assert!(!can_move(&board, sq(0, 1), sq(2, 0)));

    let mut board = empty();
    put(&mut board, 0, PieceType::Horse, Color::Red, 4, 4);
    assert_eq!(destinations(&board, sq(4, 4)).len(), 8);
    put(&mut board, 1, PieceType::Soldier, Color::Black, 4, 5);
    assert_eq!(
        destinations(&board, sq(4, 4)),
        vec![(2, 3), (2, 5), (3, 2), (5, 2), (6, 3), (6, 5)]
    );
}

#[test]
fn chariot_needs_a_clear_line() {
    let mut board = starting_board();
    assert!(can_move(&board, sq(0, 0), sq(2, 0)));
    assert!(!can_move(&board, sq(0, 0), sq(5, 0)), "own soldier on (3,0)");
    assert!(!can_move(&board, sq(0, 0), sq(1, 1)));

    board.remove(sq(3, 0)).unwrap();
    assert!(can_move(&board, sq(0, 0), sq(5, 0)));
    assert!(can_move(&board, sq(0, 0), sq(6, 0)), "captures the black soldier");
    assert!(!can_move(&board, sq(0, 0), sq(7, 0)));
}

#[test]
fn cannon_moves_quietly_or_captures_over_one_screen() {
    let mut board = starting_board();
    assert!(can_move(&board, sq(2, 1), sq(2, 2)));
    assert!(can_move(&board, sq(2, 1), sq(2, 6)));
    assert!(!can_move(&board, sq(2, 1), sq(2, 7)), "own cannon");
    assert!(can_move(&board, sq(2, 1), sq(9, 1)), "black cannon on (7,1) screens the horse");
    assert!(!can_move(&board, sq(2, 1), sq(7, 1)), "no screen for a capture");
    assert!(!can_move(&board, sq(2, 1), sq(8, 1)), "quiet move over a piece");

    put(&mut board, 40, PieceType::Horse, Color::Black, 2, 4);
    assert!(!can_move(&board, sq(2, 1), sq(2, 4)), "zero screens");
    put(&mut board, 41, PieceType::Soldier, Color::Red, 2, 3);
    assert!(can_move(&board, sq(2, 1), sq(2, 4)), "exactly one screen");
    put(&mut board, 42, PieceType::Soldier, Color::Red, 2, 2);
    assert!(!can_move(&board, sq(2, 1), sq(2, 4)), "two screens");
    assert!(!can_move(&board, sq(2, 1), sq(3, 2)), "not a straight line");
}

#[test]
fn soldier_only_goes_forward_before_the_river() {
    let board = starting_board();
    assert!(can_move(&board, sq(3, 0), sq(4, 0)));
    assert!(!can_move(&board, sq(3, 0), sq(2, 0)));
    assert!(!can_move(&board, sq(3, 0), sq(3, 1)));
    assert!(!can_move(&board, sq(3, 0), sq(5, 0)));
    assert!(can_move(&board, sq(6, 4), sq(5, 4)));
    assert!(!can_move(&board, sq(6, 4), sq(7, 4)));
}

#[test]
fn soldier_may_step_sideways_after_the_river() {
    let mut board = empty();
    put(&mut board, 0, PieceType::Soldier, Color::Red, 5, 4);
    assert_eq!(destinations(&board, sq(5, 4)), vec![(5, 3), (5, 5), (6, 4)]);

    let mut board = empty();
    put(&mut board, 0, PieceType::Soldier, Color::Red, 9, 0);
    assert_eq!(destinations(&board, sq(9, 0)), vec![(9, 1)]);

    let mut board = empty();
    put(&mut board, 0, PieceType::Soldier, Color::Black, 4, 8);
    assert_eq!(destinations(&board, sq(4, 8)), vec![(3, 8), (4, 7)]);

    let mut board = empty();
    put(&mut board, 0, PieceType::Soldier, Color::Red, 6, 0);
    assert!(can_move(&board, sq(6, 0), sq(6, 1)));
    assert!(!can_move(&board, sq(6, 0), sq(5, 0)), "never backward");
    assert!(!can_move(&board, sq(6, 0), sq(7, 1)), "never diagonal");
}

#[test]
fn opening_move_counts() {
    let board = starting_board();
    let count = |color| {
        board
            .pieces_of(color)
            .map(|piece| XiangqiRules.valid_moves(&board, piece).len())
            .sum::<usize>()
    };
    assert_eq!(count(Color::Red), 44);
    assert_eq!(count(Color::Black), 44);
}

#[test]
fn neither_side_is_in_check_at_the_start() {
    let board = starting_board();
    assert!(!XiangqiRules.is_in_check(&board, Color::Red));
    assert!(!XiangqiRules.is_in_check(&board, Color::Black));
    assert!(!XiangqiRules.is_checkmate(&board, Color::Red));
    assert!(!generals_facing(&board));
}

#[test]
fn check_is_derived_from_attacks_on_the_general() {
    let mut board = empty();
    put(&mut board, 0, PieceType::General, Color::Red, 0, 4);
    put(&mut board, 1, PieceType::General, Color::Black, 9, 3);
    put(&mut board, 2, PieceType::Chariot, Color::Black, 5, 4);
    assert!(XiangqiRules.is_in_check(&board, Color::Red));
    assert!(!XiangqiRules.is_in_check(&board, Color::Black));

    put(&mut board, 3, PieceType::Advisor, Color::Red, 1, 4);
    assert!(!XiangqiRules.is_in_check(&board, Color::Red), "blocked");

    board.remove(sq(5, 4)).unwrap();
    put(&mut board, 4, PieceType::Cannon, Color::Black, 5, 4);
    assert!(XiangqiRules.is_in_check(&board, Color::Red), "advisor is the screen");

    put(&mut board, 5, PieceType::Horse, Color::Black, 2, 3);
    put(&mut board, 6, PieceType::Soldier, Color::Red, 1, 3);
    board.remove(sq(5, 4)).unwrap();
    assert!(!XiangqiRules.is_in_check(&board, Color::Red), "horse leg blocked at (1,3)");
}

#[test]
fn missing_general_is_never_in_check() {
    let mut board = empty();
    put(&mut board, 0, PieceType::Chariot, Color::Black, 0, 0);
    assert!(!XiangqiRules.is_in_check(&board, Color::Red));
    assert!(!XiangqiRules.is_checkmate(&board, Color::Red));
}

#[test]
fn checkmate_with_two_chariots() {
    let mut board = empty();
    put(&mut board, 0, PieceType::General, Color::Red, 0, 3);
    put(&mut board, 1, PieceType::General, Color::Black, 9, 5);
    put(&mut board, 2, PieceType::Chariot, Color::Black, 0, 8);
    put(&mut board, 3, PieceType::Chariot, Color::Black, 1, 7);
    let before = board.clone();

    assert!(XiangqiRules.is_in_check(&board, Color::Red));
    assert!(XiangqiRules.is_checkmate(&board, Color::Red));
    assert_eq!(board, before, "search runs on clones");
}

#[test]
fn check_that_can_be_blocked_is_not_mate() {
    let mut board = empty();
    put(&mut board, 0, PieceType::General, Color::Red, 0, 3);
    put(&mut board, 1, PieceType::General, Color::Black, 9, 5);
    put(&mut board, 2, PieceType::Chariot, Color::Black, 0, 8);
    put(&mut board, 3, PieceType::Chariot, Color::Black, 1, 7);
    put(&mut board, 4, PieceType::Horse, Color::Red, 2, 6);

    assert!(XiangqiRules.is_in_check(&board, Color::Red));
    assert!(!XiangqiRules.is_checkmate(&board, Color::Red), "horse blocks on (0,5) or (0,7)");
}

#[test]
fn leaves_in_check_does_not_touch_the_board() {
    let mut board = empty();
    put(&mut board, 0, PieceType::General, Color::Red, 0, 4);
    put(&mut board, 1, PieceType::General, Color::Black, 9, 3);
    put(&mut board, 2, PieceType::Chariot, Color::Red, 4, 4);
    put(&mut board, 3, PieceType::Chariot, Color::Black, 8, 4);
    let before = board.clone();

    assert!(XiangqiRules.leaves_in_check(&board, sq(4, 4), sq(4, 0), Color::Red));
    assert!(!XiangqiRules.leaves_in_check(&board, sq(4, 4), sq(5, 4), Color::Red));
    assert!(XiangqiRules.leaves_in_check(&board, sq(3, 3), sq(3, 4), Color::Red), "empty origin");
    assert_eq!(board, before);
}

#[test]
fn generals_face_across_an_open_file() {
    let mut board = empty();
    put(&mut board, 0, PieceType::General, Color::Red, 0, 4);
    put(&mut board, 1, PieceType::General, Color::Black, 8, 4);
    assert!(generals_facing(&board));
    assert!(XiangqiRules.instant_win(&board));

    put(&mut board, 2, PieceType::Horse, Color::Black, 5, 4);
    assert!(!generals_facing(&board));

    board.remove(sq(5, 4)).unwrap();
    board.move_piece(sq(8, 4), sq(8, 3)).unwrap();
    assert!(!generals_facing(&board), "different files");
}
