use wasm_bindgen::prelude::*;

pub mod api;
pub mod chess;
pub mod dice;
pub mod error;
pub mod ludo;
pub mod snake;
pub mod tictactoe;
pub mod turn;
pub mod types;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
