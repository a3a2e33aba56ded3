use wasm_bindgen::prelude::*;

use serde::Serialize;
use xiangqi_core::{
    parse_move, Move, MoveError, MoveOutcome, Piece, PieceType, Square, Xiangqi,
};

/// Initialize panic hook for readable error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_clock() -> u64 {
    js_sys::Date::now() as u64
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

/// Result of a move attempt. Rejections are reported in `error`, not thrown.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsMoveResult {
    success: bool,
    #[serde(rename = "move", skip_serializing_if = "Option::is_none")]
    mv: Option<Move<PieceType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    captured_piece: Option<Piece<PieceType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl JsMoveResult {
    fn from_attempt(attempt: Result<MoveOutcome<PieceType>, MoveError>) -> Self {
        match attempt {
            Ok(outcome) => Self {
                success: true,
                mv: Some(outcome.mv),
                captured_piece: outcome.captured,
                error: None,
            },
            Err(err) => Self {
                success: false,
                mv: None,
                captured_piece: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Main WASM-exported xiangqi game.
#[wasm_bindgen]
pub struct XiangqiEngine {
    game: Xiangqi,
}

impl Default for XiangqiEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl XiangqiEngine {
    /// Create a new game from the standard opening layout, Red to move.
    #[wasm_bindgen(constructor)]
    pub fn new() -> XiangqiEngine {
        Self {
            game: Xiangqi::default().with_clock(js_clock),
        }
    }

    /// Pieces, side to move, status, history and captures as a plain object.
    #[wasm_bindgen(js_name = "boardState")]
    pub fn board_state(&self) -> Result<JsValue, JsError> {
        to_js(&self.game.board_state())
    }

    #[wasm_bindgen(js_name = "movePiece")]
    pub fn move_piece(
        &mut self,
        from_row: i8,
        from_col: i8,
        to_row: i8,
        to_col: i8,
    ) -> Result<JsValue, JsError> {
        let attempt = self
            .game
            .move_piece(Square::new(from_row, from_col), Square::new(to_row, to_col));
        to_js(&JsMoveResult::from_attempt(attempt))
    }

    /// Make a move given as `"a4-a5"`. Malformed text throws; an illegal
    /// move is reported like [`XiangqiEngine::move_piece`].
    #[wasm_bindgen(js_name = "makeMove")]
    pub fn make_move(&mut self, text: &str) -> Result<JsValue, JsError> {
        let (from, to) = parse_move(text).map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&JsMoveResult::from_attempt(self.game.move_piece(from, to)))
    }

    /// Legal destinations for the piece on `(row, col)`.
    #[wasm_bindgen(js_name = "validMoves")]
    pub fn valid_moves(&self, row: i8, col: i8) -> Result<JsValue, JsError> {
        let moves = self.game.valid_moves_from(Square::new(row, col));
        to_js(&moves.as_slice())
    }

    pub fn undo(&mut self) -> bool {
        self.game.undo_move()
    }

    pub fn restart(&mut self) {
        self.game.restart();
    }

    /// `undefined` while the game is running.
    #[wasm_bindgen(js_name = "gameResult")]
    pub fn game_result(&self) -> Result<JsValue, JsError> {
        to_js(&self.game.game_result())
    }

    /// The side to move concedes.
    pub fn resign(&mut self) -> Result<JsValue, JsError> {
        let side = self.game.side_to_move();
        let result = self
            .game
            .resign(side)
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&result)
    }

    /// Same spelling as `boardState().status`.
    pub fn status(&self) -> String {
        self.game.status().as_str().to_string()
    }

    #[wasm_bindgen(js_name = "isGameOver")]
    pub fn is_game_over(&self) -> bool {
        self.game.is_game_over()
    }

    #[wasm_bindgen(js_name = "inCheck")]
    pub fn in_check(&self) -> bool {
        self.game.is_in_check(self.game.side_to_move())
    }

    /// `"r"` or `"b"`.
    pub fn turn(&self) -> String {
        self.game.side_to_move().to_code().to_string()
    }
}
