//! Smoke tests for the browser API surface. Run with `wasm-pack test`.
#![cfg(target_arch = "wasm32")]

use gamehub::api::{ChessSession, LudoSession, SnakeSession, TicTacToeSession};
use gamehub::wasm_ready;
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::wasm_bindgen_test;

fn field(state: &JsValue, name: &str) -> JsValue {
    Reflect::get(state, &JsValue::from_str(name)).unwrap()
}

#[wasm_bindgen_test]
fn readiness_probe_answers() {
    assert!(wasm_ready());
}

#[wasm_bindgen_test]
fn tictactoe_exchange_round_trips() {
    let mut session = TicTacToeSession::new("ai", 1).unwrap();
    assert_eq!(session.legal_moves().len(), 9);

    session.play(0).unwrap();
    let cell = session.computer_turn().unwrap();
    assert!(cell < 9);

    let state = session.state().unwrap();
    assert_eq!(field(&state, "is_game_over").as_bool(), Some(false));
    assert_eq!(field(&state, "move_count").as_f64(), Some(2.0));
}

#[wasm_bindgen_test]
fn chess_opening_move_is_accepted() {
    let mut session = ChessSession::new("ai", 3).unwrap();
    session.play(6, 4, 4, 4).unwrap();
    session.computer_turn().unwrap();

    let state = session.state().unwrap();
    assert_eq!(field(&state, "current_player").as_f64(), Some(1.0));
}

#[wasm_bindgen_test]
fn snake_turn_resolves_after_a_roll() {
    let mut session = SnakeSession::new("ai", 2, 5).unwrap();
    let roll = session.roll().unwrap();
    assert!((1..=6).contains(&roll));
    session.advance().unwrap();
    session.computer_turn().unwrap();

    let state = session.state().unwrap();
    assert_eq!(field(&state, "current_seat").as_f64(), Some(0.0));
}

#[wasm_bindgen_test]
fn ludo_roll_is_consumed_by_a_move_or_a_pass() {
    let mut session = LudoSession::new("ai", 8).unwrap();
    let roll = session.roll().unwrap();
    let movable = session.movable_tokens();
    if roll == 6 {
        assert!(!movable.is_empty());
        session.move_token(movable[0]).unwrap();
    } else {
        assert!(movable.is_empty());
        session.pass().unwrap();
    }

    let state = session.state().unwrap();
    let pending = field(&state, "pending_roll");
    assert!(pending.is_undefined() || pending.is_null());
}

#[wasm_bindgen_test]
fn invalid_mode_strings_are_rejected() {
    assert!(TicTacToeSession::new("online", 1).is_err());
}
