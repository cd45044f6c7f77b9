use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::dice::Dice;
use crate::error::{EngineError, EngineResult};
use crate::turn::{Outcome, TurnOrder};
use crate::types::Mode;

const START_CELL: u8 = 1;
const FINAL_CELL: u8 = 100;
const MAX_SEATS: usize = 4;

/// Snake heads map strictly downward. 100 must never appear as a head.
static SNAKES: Lazy<BTreeMap<u8, u8>> = Lazy::new(|| {
    BTreeMap::from([
        (16, 6),
        (47, 26),
        (49, 11),
        (56, 53),
        (62, 19),
        (64, 60),
        (87, 24),
        (93, 73),
        (95, 75),
        (98, 78),
    ])
});

/// Ladder feet map strictly upward. Feet and snake heads are disjoint.
static LADDERS: Lazy<BTreeMap<u8, u8>> = Lazy::new(|| {
    BTreeMap::from([
        (4, 14),
        (9, 31),
        (21, 42),
        (28, 84),
        (36, 44),
        (51, 67),
        (71, 91),
        (80, 100),
    ])
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveEffect {
    None,
    Snake,
    Ladder,
    Forfeit,
}

/// What the last resolved roll did, for the board renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnakeMoveRecord {
    pub seat: u8,
    pub rolled: u8,
    pub from: u8,
    /// Cell reached by counting the roll, before any snake/ladder.
    pub landed: u8,
    /// Final cell after at most one snake or ladder relocation.
    pub resolved: u8,
    pub effect: MoveEffect,
}

/// Public game state returned to the board renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnakeState {
    pub positions: Vec<u8>,
    pub current_seat: u8,
    pub pending_roll: Option<u8>,
    pub move_count: u32,
    pub is_game_over: bool,
    pub winner: Option<u8>,
    pub last_move: Option<SnakeMoveRecord>,
}

/// Snakes & ladders session: linear 1..=100 track, one roll per turn,
/// forced movement, exact finish on 100.
pub struct SnakeGame {
    positions: Vec<u8>,
    turn: TurnOrder<u8>,
    outcome: Outcome<u8>,
    pending_roll: Option<u8>,
    mode: Mode,
    dice: Dice,
    last_move: Option<SnakeMoveRecord>,
}

impl SnakeGame {
    /// Seat 0 is the human in `VsComputer` mode; seat 1 is the computer.
    pub fn new(mode: Mode, seats: usize, seed: u64) -> EngineResult<Self> {
        let valid = match mode {
            Mode::VsComputer => seats == 2,
            Mode::LocalMultiplayer => (2..=MAX_SEATS).contains(&seats),
        };
        if !valid {
            return Err(EngineError::selection("unsupported seat count for mode"));
        }
        Ok(Self {
            positions: vec![START_CELL; seats],
            turn: TurnOrder::new((0..seats as u8).collect()),
            outcome: Outcome::Ongoing,
            pending_roll: None,
            mode,
            dice: Dice::seeded(seed),
            last_move: None,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn outcome(&self) -> Outcome<u8> {
        self.outcome
    }

    pub fn current_seat(&self) -> u8 {
        self.turn.current()
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

    /// The single forced destination for the pending roll, or nothing when
    /// the roll overshoots 100, the seat is not to move, or no roll pends.
    pub fn legal_moves(&self, seat: u8) -> Vec<u8> {
        if self.outcome.is_terminal() || !self.turn.is_current(seat) {
            return Vec::new();
        }
        let Some(roll) = self.pending_roll else {
            return Vec::new();
        };
        match forced_destination(self.positions[seat as usize], roll) {
            Some((_, resolved, _)) => vec![resolved],
            None => Vec::new(),
        }
    }

    /// Validated entry point for the UI click path. Movement is forced, so
    /// the only accepted destination is the one `legal_moves` computed.
    pub fn apply_move(&mut self, seat: u8, destination: u8) -> EngineResult<SnakeMoveRecord> {
        if self.outcome.is_terminal() {
            return Err(EngineError::GameOver);
        }
        if !self.turn.is_current(seat) {
            return Err(EngineError::selection("not this seat's turn"));
        }
        if !self.legal_moves(seat).contains(&destination) {
            return Err(EngineError::illegal("destination does not match the roll"));
        }
        self.resolve_move()
    }

    /// Consumes the pending roll: move-or-forfeit, then at most one snake or
    /// ladder relocation, then the turn passes (unless the game just ended).
    pub fn resolve_move(&mut self) -> EngineResult<SnakeMoveRecord> {
        if self.outcome.is_terminal() {
            return Err(EngineError::GameOver);
        }
        let roll = self.pending_roll.take().ok_or(EngineError::DiceNotRolled)?;
        let seat = self.turn.current();
        let from = self.positions[seat as usize];

        let record = match forced_destination(from, roll) {
            Some((landed, resolved, effect)) => {
                self.positions[seat as usize] = resolved;
                SnakeMoveRecord {
                    seat,
                    rolled: roll,
                    from,
                    landed,
                    resolved,
                    effect,
                }
            }
            None => SnakeMoveRecord {
                seat,
                rolled: roll,
                from,
                landed: from,
                resolved: from,
                effect: MoveEffect::Forfeit,
            },
        };

        if record.resolved == FINAL_CELL {
            self.outcome = Outcome::Winner(seat);
            self.turn.stay();
        } else {
            self.turn.advance();
        }
        self.last_move = Some(record);
        Ok(record)
    }

    /// The computer seat has no decision point: roll, then resolve.
    pub fn play_computer_turn(&mut self) -> EngineResult<SnakeMoveRecord> {
        if self.mode != Mode::VsComputer {
            return Err(EngineError::selection("no computer seat in this mode"));
        }
        if self.turn.current() != 1 {
            return Err(EngineError::selection("it is not the computer's turn"));
        }
        self.roll_dice()?;
        self.resolve_move()
    }

    pub fn reset(&mut self) {
        self.positions.fill(START_CELL);
        self.turn.reset();
        self.outcome = Outcome::Ongoing;
        self.pending_roll = None;
        self.last_move = None;
    }

    pub fn to_game_state(&self) -> SnakeState {
        SnakeState {
            positions: self.positions.clone(),
            current_seat: self.turn.current(),
            pending_roll: self.pending_roll,
            move_count: self.turn.moves_played(),
            is_game_over: self.outcome.is_terminal(),
            winner: match self.outcome {
                Outcome::Winner(seat) => Some(seat),
                _ => None,
            },
            last_move: self.last_move,
        }
    }

    #[cfg(test)]
    fn set_position_for_test(&mut self, seat: u8, cell: u8) {
        self.positions[seat as usize] = cell;
    }

    #[cfg(test)]
    fn set_pending_roll_for_test(&mut self, roll: u8) {
        self.pending_roll = Some(roll);
    }
}

/// `None` when the roll overshoots 100. Otherwise the landing cell, the cell
/// after snake/ladder resolution, and which table (if any) fired.
fn forced_destination(from: u8, roll: u8) -> Option<(u8, u8, MoveEffect)> {
    let landed = from.checked_add(roll)?;
    if landed > FINAL_CELL {
        return None;
    }
    if let Some(&tail) = SNAKES.get(&landed) {
        return Some((landed, tail, MoveEffect::Snake));
    }
    if let Some(&top) = LADDERS.get(&landed) {
        return Some((landed, top, MoveEffect::Ladder));
    }
    Some((landed, landed, MoveEffect::None))
}
