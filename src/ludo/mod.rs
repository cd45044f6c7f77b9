pub mod board;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::dice::Dice;
use crate::error::{EngineError, EngineResult};
use crate::turn::{Outcome, TurnOrder};
use crate::types::Mode;

pub use board::{
    default_safe_positions, LudoBoard, LudoColor, LudoMoveRecord, MoveKind, TokenPos,
};

/// Public game state returned to the board renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LudoState {
    pub seats: Vec<LudoColor>,
    /// Token positions per seat, parallel to `seats`.
    pub tokens: Vec<Vec<TokenPos>>,
    pub current_color: LudoColor,
    pub pending_roll: Option<u8>,
    pub move_count: u32,
    pub is_game_over: bool,
    pub winner: Option<LudoColor>,
    pub last_move: Option<LudoMoveRecord>,
}

/// One automated-opponent turn: the roll it made and what it did with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LudoTurnReport {
    pub rolled: u8,
    /// `None` when the roll moved no token and the turn was passed.
    pub moved: Option<LudoMoveRecord>,
}

/// Ludo session: shared ring, private home runs, release on 6, extra turns.
pub struct LudoGame {
    board: LudoBoard,
    turn: TurnOrder<LudoColor>,
    outcome: Outcome<LudoColor>,
    pending_roll: Option<u8>,
    mode: Mode,
    dice: Dice,
    last_move: Option<LudoMoveRecord>,
}

impl LudoGame {
    /// `VsComputer` seats red (human) against blue (computer);
    /// `LocalMultiplayer` seats all four colors in fixed order.
    pub fn new(mode: Mode, seed: u64) -> Self {
        Self::with_safe_positions(mode, seed, default_safe_positions())
    }

    pub fn with_safe_positions(mode: Mode, seed: u64, safe_positions: BTreeSet<u8>) -> Self {
        let seats = match mode {
            Mode::VsComputer => vec![LudoColor::Red, LudoColor::Blue],
            Mode::LocalMultiplayer => LudoColor::ALL.to_vec(),
        };
        Self {
            board: LudoBoard::new(seats.clone(), safe_positions),
            turn: TurnOrder::new(seats),
            outcome: Outcome::Ongoing,
            pending_roll: None,
            mode,
            dice: Dice::seeded(seed),
            last_move: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn outcome(&self) -> Outcome<LudoColor> {
        self.outcome
    }

    pub fn current_color(&self) -> LudoColor {
        self.turn.current()
    }

    pub fn pending_roll(&self) -> Option<u8> {
        self.pending_roll
    }

    pub fn roll_dice(&mut self) -> EngineResult<u8> {
        if self.outcome.is_terminal() {
            return Err(EngineError::GameOver);
        }
        if self.pending_roll.is_some() {
            return Err(EngineError::DiceAlreadyRolled);
        }
        let roll = self.dice.roll();
        self.pending_roll = Some(roll);
        Ok(roll)
    }

    /// Tokens of the color to move that can use the pending roll.
    pub fn movable_tokens(&self) -> Vec<u8> {
        match self.pending_roll {
            Some(roll) if !self.outcome.is_terminal() => {
                self.board.movable_tokens(self.turn.current(), roll)
            }
            _ => Vec::new(),
        }
    }

    /// The destination the pending roll gives this token (at most one), or
    /// nothing for a foreign color, an unusable roll, or a finished game.
    pub fn legal_moves(&self, color: LudoColor, token: u8) -> Vec<TokenPos> {
        if self.outcome.is_terminal() || !self.turn.is_current(color) {
            return Vec::new();
        }
        let Some(roll) = self.pending_roll else {
            return Vec::new();
        };
        self.board
            .plan_move(color, token, roll)
            .into_iter()
            .collect()
    }

    /// Consumes the pending roll on one token. A 6 or a completed token
    /// leaves the same color to move; anything else passes the turn on.
    pub fn apply_move(
        &mut self,
        color: LudoColor,
        token: u8,
        destination: TokenPos,
    ) -> EngineResult<LudoMoveRecord> {
        if self.outcome.is_terminal() {
            return Err(EngineError::GameOver);
        }
        if !self.turn.is_current(color) {
            return Err(EngineError::selection("not this color's turn"));
        }
        let roll = self.pending_roll.ok_or(EngineError::DiceNotRolled)?;
        if token as usize >= board::TOKENS_PER_COLOR {
            return Err(EngineError::selection("no such token"));
        }
        let planned = self
            .board
            .plan_move(color, token, roll)
            .ok_or_else(|| EngineError::illegal("token cannot use this roll"))?;
        if planned != destination {
            return Err(EngineError::illegal("destination does not match the roll"));
        }

        let record = self.board.apply_move(color, token, planned);
        self.pending_roll = None;

        if self.board.all_complete(color) {
            self.outcome = Outcome::Winner(color);
            self.turn.stay();
        } else if roll == 6 || record.kind == MoveKind::Completed {
            self.turn.stay();
        } else {
            self.turn.advance();
        }
        self.last_move = Some(record.clone());
        Ok(record)
    }

    /// Gives up a pending roll that moves no token. A wasted 6 still grants
    /// the same color a fresh roll.
    pub fn pass_turn(&mut self) -> EngineResult<()> {
        if self.outcome.is_terminal() {
            return Err(EngineError::GameOver);
        }
        let roll = self.pending_roll.ok_or(EngineError::DiceNotRolled)?;
        if !self.movable_tokens().is_empty() {
            return Err(EngineError::illegal("a token can still use this roll"));
        }
        self.pending_roll = None;
        if roll != 6 {
            self.turn.skip();
        }
        Ok(())
    }

    /// Automated opponent: on a 6 release a home token if one can enter,
    /// otherwise move the first movable token in board order, otherwise pass.
    pub fn play_computer_turn(&mut self) -> EngineResult<LudoTurnReport> {
        if self.mode != Mode::VsComputer {
            return Err(EngineError::selection("no computer seat in this mode"));
        }
        let color = self.turn.current();
        if color != LudoColor::Blue {
            return Err(EngineError::selection("it is not the computer's turn"));
        }

        let rolled = self.roll_dice()?;
        let moved = match computer_choice(&self.board, color, rolled) {
            Some(token) => {
                let planned = self
                    .board
                    .plan_move(color, token, rolled)
                    .ok_or_else(|| EngineError::Invariant("movable token lost its plan".into()))?;
                Some(self.apply_move(color, token, planned)?)
            }
            None => {
                self.pass_turn()?;
                None
            }
        };
        Ok(LudoTurnReport { rolled, moved })
    }

    pub fn reset(&mut self) {
        self.board.reset();
        self.turn.reset();
        self.outcome = Outcome::Ongoing;
        self.pending_roll = None;
        self.last_move = None;
    }

    pub fn to_game_state(&self) -> LudoState {
        LudoState {
            seats: self.board.seats().to_vec(),
            tokens: self
                .board
                .seats()
                .iter()
                .map(|&c| self.board.tokens_of(c).to_vec())
                .collect(),
            current_color: self.turn.current(),
            pending_roll: self.pending_roll,
            move_count: self.turn.moves_played(),
            is_game_over: self.outcome.is_terminal(),
            winner: match self.outcome {
                Outcome::Winner(color) => Some(color),
                _ => None,
            },
            last_move: self.last_move.clone(),
        }
    }

    #[cfg(test)]
    fn force_roll_for_test(&mut self, roll: u8) {
        self.pending_roll = Some(roll);
    }

    #[cfg(test)]
    fn board_for_test(&self) -> &LudoBoard {
        &self.board
    }

    #[cfg(test)]
    fn board_mut_for_test(&mut self) -> &mut LudoBoard {
        &mut self.board
    }
}

/// On a 6 prefer releasing a home token; otherwise the first movable token
/// in board order; `None` passes the turn. No strategic evaluation.
fn computer_choice(board: &LudoBoard, color: LudoColor, roll: u8) -> Option<u8> {
    let candidates = board.movable_tokens(color, roll);
    if roll == 6 {
        let tokens = board.tokens_of(color);
        return candidates
            .iter()
            .copied()
            .find(|&idx| tokens[idx as usize] == TokenPos::Home)
            .or_else(|| candidates.first().copied());
    }
    candidates.first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> LudoGame {
        LudoGame::new(Mode::VsComputer, 1)
    }

    /// Board placements for scenarios go through `LudoBoard::apply_move`,
    /// which accepts any target and performs no legality check of its own.
    fn place(g: &mut LudoGame, color: LudoColor, token: u8, pos: TokenPos) {
        g.board_mut_for_test().apply_move(color, token, pos);
    }

    #[test]
    fn rolling_twice_is_rejected() {
        let mut g = game();
        g.roll_dice().unwrap();
        assert_eq!(g.roll_dice(), Err(EngineError::DiceAlreadyRolled));
    }

    #[test]
    fn moving_without_a_roll_is_rejected() {
        let mut g = game();
        assert_eq!(
            g.apply_move(LudoColor::Red, 0, TokenPos::Ring(0)),
            Err(EngineError::DiceNotRolled)
        );
    }

    #[test]
    fn release_scenario_captures_the_squatter() {
        let mut g = game();
        // A blue token sits on red's start cell.
        place(&mut g, LudoColor::Blue, 2, TokenPos::Ring(0));
        g.force_roll_for_test(6);

        assert_eq!(g.legal_moves(LudoColor::Red, 0), vec![TokenPos::Ring(0)]);
        let record = g.apply_move(LudoColor::Red, 0, TokenPos::Ring(0)).unwrap();

        assert_eq!(record.kind, MoveKind::Released);
        assert_eq!(record.captured, vec![(LudoColor::Blue, 2)]);
        let state = g.to_game_state();
        assert_eq!(state.tokens[1][2], TokenPos::Home);
        assert_eq!(state.tokens[0][0], TokenPos::Ring(0));
    }

    #[test]
    fn a_six_keeps_the_same_color_to_move() {
        let mut g = game();
        g.force_roll_for_test(6);
        g.apply_move(LudoColor::Red, 0, TokenPos::Ring(0)).unwrap();
        assert_eq!(g.current_color(), LudoColor::Red);
        assert_eq!(g.pending_roll(), None);
    }

    #[test]
    fn a_non_six_passes_the_turn_on() {
        let mut g = game();
        place(&mut g, LudoColor::Red, 0, TokenPos::Ring(0));
        g.force_roll_for_test(3);
        g.apply_move(LudoColor::Red, 0, TokenPos::Ring(3)).unwrap();
        assert_eq!(g.current_color(), LudoColor::Blue);
    }

    #[test]
    fn completing_a_token_grants_another_roll() {
        let mut g = game();
        place(&mut g, LudoColor::Red, 0, TokenPos::HomeRun(3));
        g.force_roll_for_test(2);

        let record = g
            .apply_move(LudoColor::Red, 0, TokenPos::Complete)
            .unwrap();
        assert_eq!(record.kind, MoveKind::Completed);
        assert_eq!(g.current_color(), LudoColor::Red);
    }

    #[test]
    fn wrong_destination_is_rejected_without_consuming_the_roll() {
        let mut g = game();
        g.force_roll_for_test(6);
        let err = g
            .apply_move(LudoColor::Red, 0, TokenPos::Ring(5))
            .unwrap_err();
        assert!(matches!(err, EngineError::IllegalMove { .. }));
        assert_eq!(g.pending_roll(), Some(6));
    }

    #[test]
    fn unusable_non_six_roll_passes_and_rotates() {
        let mut g = game();
        g.force_roll_for_test(3); // every red token is still home
        assert!(g.movable_tokens().is_empty());
        g.pass_turn().unwrap();
        assert_eq!(g.current_color(), LudoColor::Blue);
    }

    #[test]
    fn a_wasted_six_still_grants_a_fresh_roll() {
        // Every red token is deep in the home run; a 6 overshoots them all
        // and there is nothing left to release.
        let mut g = game();
        place(&mut g, LudoColor::Red, 0, TokenPos::HomeRun(1));
        place(&mut g, LudoColor::Red, 1, TokenPos::HomeRun(2));
        place(&mut g, LudoColor::Red, 2, TokenPos::HomeRun(3));
        place(&mut g, LudoColor::Red, 3, TokenPos::HomeRun(4));
        g.force_roll_for_test(6);

        assert!(g.movable_tokens().is_empty());
        g.pass_turn().unwrap();
        assert_eq!(g.current_color(), LudoColor::Red);
        assert_eq!(g.pending_roll(), None);
    }

    #[test]
    fn pass_is_rejected_while_a_token_can_move() {
        let mut g = game();
        g.force_roll_for_test(6);
        assert!(matches!(
            g.pass_turn(),
            Err(EngineError::IllegalMove { .. })
        ));
    }

    #[test]
    fn finishing_all_tokens_wins_and_freezes_the_game() {
        let mut g = game();
        for idx in 1..4u8 {
            place(&mut g, LudoColor::Red, idx, TokenPos::Complete);
        }
        place(&mut g, LudoColor::Red, 0, TokenPos::HomeRun(3));
        g.force_roll_for_test(2);

        g.apply_move(LudoColor::Red, 0, TokenPos::Complete).unwrap();
        assert_eq!(g.outcome(), Outcome::Winner(LudoColor::Red));

        let before = g.to_game_state();
        assert_eq!(g.roll_dice(), Err(EngineError::GameOver));
        assert!(g.legal_moves(LudoColor::Blue, 0).is_empty());
        assert_eq!(g.to_game_state(), before);
    }

    #[test]
    fn policy_releases_a_home_token_on_a_six() {
        let g = game();
        let choice = computer_choice(g.board_for_test(), LudoColor::Blue, 6);
        assert_eq!(choice, Some(0));
    }

    #[test]
    fn policy_prefers_release_over_an_active_token_on_a_six() {
        let mut g = game();
        place(&mut g, LudoColor::Blue, 2, TokenPos::Ring(20));
        let choice = computer_choice(g.board_for_test(), LudoColor::Blue, 6);
        assert_eq!(choice, Some(0), "home token 0 wins over active token 2");
    }

    #[test]
    fn policy_moves_the_first_active_token_on_other_rolls() {
        let mut g = game();
        place(&mut g, LudoColor::Blue, 1, TokenPos::Ring(20));
        place(&mut g, LudoColor::Blue, 3, TokenPos::Ring(30));
        let choice = computer_choice(g.board_for_test(), LudoColor::Blue, 3);
        assert_eq!(choice, Some(1));
    }

    #[test]
    fn policy_passes_when_nothing_can_move() {
        let g = game();
        // All blue tokens home and the roll is not a 6.
        assert_eq!(
            computer_choice(g.board_for_test(), LudoColor::Blue, 3),
            None
        );
    }

    #[test]
    fn computer_turn_consumes_exactly_one_roll() {
        let mut g = game();
        g.force_roll_for_test(3);
        g.pass_turn().unwrap();
        assert_eq!(g.current_color(), LudoColor::Blue);

        let report = g.play_computer_turn().unwrap();
        assert!((1..=6).contains(&report.rolled));
        assert_eq!(g.pending_roll(), None);
        if let Some(record) = report.moved {
            assert_eq!(record.color, LudoColor::Blue);
        }
    }

    #[test]
    fn multiplayer_seats_all_four_colors_in_order() {
        let mut g = LudoGame::new(Mode::LocalMultiplayer, 2);
        let expected = [
            LudoColor::Red,
            LudoColor::Blue,
            LudoColor::Green,
            LudoColor::Yellow,
            LudoColor::Red,
        ];
        for color in expected {
            assert_eq!(g.current_color(), color);
            g.force_roll_for_test(3); // nothing can move; every token is home
            g.pass_turn().unwrap();
        }
    }

    #[test]
    fn reset_returns_every_token_home() {
        let mut g = game();
        g.force_roll_for_test(6);
        g.apply_move(LudoColor::Red, 0, TokenPos::Ring(0)).unwrap();
        g.reset();

        let state = g.to_game_state();
        assert_eq!(state.current_color, LudoColor::Red);
        assert_eq!(state.pending_roll, None);
        for tokens in state.tokens {
            assert!(tokens.iter().all(|&t| t == TokenPos::Home));
        }
    }
}
