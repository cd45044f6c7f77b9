//! Browser-facing wrappers. Each session owns one rule engine and exposes
//! gesture-sized entry points; snapshots cross the boundary as plain JS
//! objects via `serde_wasm_bindgen`.

use wasm_bindgen::prelude::*;

use crate::chess::ChessGame;
use crate::error::EngineError;
use crate::ludo::LudoGame;
use crate::snake::SnakeGame;
use crate::tictactoe::TicTacToeGame;
use crate::types::{Mode, Position};

fn js_err(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

#[wasm_bindgen]
pub struct TicTacToeSession {
    inner: TicTacToeGame,
}

#[wasm_bindgen]
impl TicTacToeSession {
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str, seed: u64) -> Result<TicTacToeSession, JsValue> {
        let mode = Mode::parse(mode).map_err(js_err)?;
        Ok(Self {
            inner: TicTacToeGame::new(mode, seed),
        })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.to_game_state())
    }

    pub fn legal_moves(&self) -> Vec<u8> {
        self.inner.legal_moves(self.inner.current_mark())
    }

    pub fn play(&mut self, cell: u8) -> Result<JsValue, JsValue> {
        let mark = self.inner.current_mark();
        self.inner.apply_move(mark, cell).map_err(js_err)?;
        self.state()
    }

    pub fn computer_turn(&mut self) -> Result<u8, JsValue> {
        self.inner.play_computer_turn().map_err(js_err)
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }
}

#[wasm_bindgen]
pub struct ChessSession {
    inner: ChessGame,
}

#[wasm_bindgen]
impl ChessSession {
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str, seed: u64) -> Result<ChessSession, JsValue> {
        let mode = Mode::parse(mode).map_err(js_err)?;
        Ok(Self {
            inner: ChessGame::new(mode, seed),
        })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.to_game_state())
    }

    /// Destinations for the piece on (row, col), as `{row, col}` objects.
    pub fn legal_moves(&self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        to_js(&self.inner.legal_moves(Position::new(row, col)))
    }

    pub fn play(
        &mut self,
        from_row: u8,
        from_col: u8,
        to_row: u8,
        to_col: u8,
    ) -> Result<JsValue, JsValue> {
        let record = self
            .inner
            .apply_move(
                Position::new(from_row, from_col),
                Position::new(to_row, to_col),
            )
            .map_err(js_err)?;
        to_js(&record)
    }

    pub fn computer_turn(&mut self) -> Result<JsValue, JsValue> {
        let record = self.inner.play_computer_turn().map_err(js_err)?;
        to_js(&record)
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }
}

#[wasm_bindgen]
pub struct LudoSession {
    inner: LudoGame,
}

#[wasm_bindgen]
impl LudoSession {
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str, seed: u64) -> Result<LudoSession, JsValue> {
        let mode = Mode::parse(mode).map_err(js_err)?;
        Ok(Self {
            inner: LudoGame::new(mode, seed),
        })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.to_game_state())
    }

    pub fn roll(&mut self) -> Result<u8, JsValue> {
        self.inner.roll_dice().map_err(js_err)
    }

    /// Token indices of the color to move that can use the pending roll.
    pub fn movable_tokens(&self) -> Vec<u8> {
        self.inner.movable_tokens()
    }

    pub fn move_token(&mut self, token: u8) -> Result<JsValue, JsValue> {
        let color = self.inner.current_color();
        let destination = self
            .inner
            .legal_moves(color, token)
            .into_iter()
            .next()
            .ok_or_else(|| js_err(EngineError::illegal("token cannot use this roll")))?;
        let record = self
            .inner
            .apply_move(color, token, destination)
            .map_err(js_err)?;
        to_js(&record)
    }

    pub fn pass(&mut self) -> Result<(), JsValue> {
        self.inner.pass_turn().map_err(js_err)
    }

    pub fn computer_turn(&mut self) -> Result<JsValue, JsValue> {
        let report = self.inner.play_computer_turn().map_err(js_err)?;
        to_js(&report)
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }
}

#[wasm_bindgen]
pub struct SnakeSession {
    inner: SnakeGame,
}

#[wasm_bindgen]
impl SnakeSession {
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str, seats: u8, seed: u64) -> Result<SnakeSession, JsValue> {
        let mode = Mode::parse(mode).map_err(js_err)?;
        let inner = SnakeGame::new(mode, seats as usize, seed).map_err(js_err)?;
        Ok(Self { inner })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.to_game_state())
    }

    pub fn roll(&mut self) -> Result<u8, JsValue> {
        self.inner.roll_dice().map_err(js_err)
    }

    /// Resolves the pending roll: forced move, snake/ladder hop, or forfeit.
    pub fn advance(&mut self) -> Result<JsValue, JsValue> {
        let record = self.inner.resolve_move().map_err(js_err)?;
        to_js(&record)
    }

    pub fn computer_turn(&mut self) -> Result<JsValue, JsValue> {
        let record = self.inner.play_computer_turn().map_err(js_err)?;
        to_js(&record)
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }
}
