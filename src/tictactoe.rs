use serde::Serialize;

use crate::dice::Dice;
use crate::error::{EngineError, EngineResult};
use crate::turn::{Outcome, TurnOrder};
use crate::types::Mode;

const CELLS: usize = 9;
const CENTER: usize = 4;
const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// The 8 winning lines: rows, columns, diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    fn code(self) -> u8 {
        match self {
            Self::X => 1,
            Self::O => 2,
        }
    }
}

/// Public game state returned to the board renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicTacToeState {
    /// 0=empty, 1=X, 2=O per cell.
    pub cells: Vec<u8>,
    pub current_player: u8,
    pub move_count: u32,
    pub is_game_over: bool,
    /// 0 while ongoing or drawn.
    pub winner: u8,
    pub is_draw: bool,
    pub last_cell: Option<u8>,
}

/// Tic-tac-toe session: 3x3 board, X moves first, strict alternation.
pub struct TicTacToeGame {
    cells: [Option<Mark>; CELLS],
    turn: TurnOrder<Mark>,
    outcome: Outcome<Mark>,
    mode: Mode,
    dice: Dice,
    last_cell: Option<u8>,
}

impl TicTacToeGame {
    pub fn new(mode: Mode, seed: u64) -> Self {
        Self {
            cells: [None; CELLS],
            turn: TurnOrder::new(vec![Mark::X, Mark::O]),
            outcome: Outcome::Ongoing,
            mode,
            dice: Dice::seeded(seed),
            last_cell: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn outcome(&self) -> Outcome<Mark> {
        self.outcome
    }

    pub fn current_mark(&self) -> Mark {
        self.turn.current()
    }

    /// Empty cells the given mark may play, or nothing when it is not that
    /// mark's turn or the game is over.
    pub fn legal_moves(&self, mark: Mark) -> Vec<u8> {
        if self.outcome.is_terminal() || !self.turn.is_current(mark) {
            return Vec::new();
        }
        free_cells(&self.cells).into_iter().map(|c| c as u8).collect()
    }

    /// Places `mark` on `cell`, then checks the 8 lines and the draw case.
    pub fn apply_move(&mut self, mark: Mark, cell: u8) -> EngineResult<()> {
        if self.outcome.is_terminal() {
            return Err(EngineError::GameOver);
        }
        if !self.turn.is_current(mark) {
            return Err(EngineError::selection("not this mark's turn"));
        }
        let idx = cell as usize;
        if idx >= CELLS {
            return Err(EngineError::illegal("cell out of range"));
        }
        if self.cells[idx].is_some() {
            return Err(EngineError::illegal("cell is occupied"));
        }

        self.cells[idx] = Some(mark);
        self.last_cell = Some(cell);

        if let Some(winner) = line_winner(&self.cells) {
            self.outcome = Outcome::Winner(winner);
            self.turn.stay();
        } else if free_cells(&self.cells).is_empty() {
            self.outcome = Outcome::Draw;
            self.turn.stay();
        } else {
            self.turn.advance();
        }
        Ok(())
    }

    /// Plays one automated-opponent move and returns the chosen cell.
    pub fn play_computer_turn(&mut self) -> EngineResult<u8> {
        if self.outcome.is_terminal() {
            return Err(EngineError::GameOver);
        }
        if self.mode != Mode::VsComputer {
            return Err(EngineError::selection("no computer seat in this mode"));
        }
        let mark = self.turn.current();
        if mark != Mark::O {
            return Err(EngineError::selection("it is not the computer's turn"));
        }

        let cell = choose_computer_move(&self.cells, mark, &mut self.dice)
            .ok_or_else(|| EngineError::Invariant("computer turn with a full board".into()))?;
        self.apply_move(mark, cell as u8)?;
        Ok(cell as u8)
    }

    pub fn reset(&mut self) {
        self.cells = [None; CELLS];
        self.turn.reset();
        self.outcome = Outcome::Ongoing;
        self.last_cell = None;
    }

    pub fn to_game_state(&self) -> TicTacToeState {
        TicTacToeState {
            cells: self.cells.iter().map(|c| c.map_or(0, Mark::code)).collect(),
            current_player: self.turn.current().code(),
            move_count: self.turn.moves_played(),
            is_game_over: self.outcome.is_terminal(),
            winner: match self.outcome {
                Outcome::Winner(mark) => mark.code(),
                _ => 0,
            },
            is_draw: self.outcome == Outcome::Draw,
            last_cell: self.last_cell,
        }
    }
}

/// Three equal marks on any line declare that mark's owner the winner.
fn line_winner(cells: &[Option<Mark>; CELLS]) -> Option<Mark> {
    for [a, b, c] in LINES {
        if let Some(mark) = cells[a]
            && cells[b] == Some(mark)
            && cells[c] == Some(mark)
        {
            return Some(mark);
        }
    }
    None
}

fn free_cells(cells: &[Option<Mark>; CELLS]) -> Vec<usize> {
    (0..CELLS).filter(|&idx| cells[idx].is_none()).collect()
}

fn wins_after(cells: &[Option<Mark>; CELLS], idx: usize, mark: Mark) -> bool {
    let mut probe = *cells;
    probe[idx] = Some(mark);
    line_winner(&probe) == Some(mark)
}

/// Fixed heuristic, not a search: complete own line, block the opponent's,
/// take the center, a random free corner, any random free cell.
fn choose_computer_move(
    cells: &[Option<Mark>; CELLS],
    mark: Mark,
    dice: &mut Dice,
) -> Option<usize> {
    let free = free_cells(cells);
    if free.is_empty() {
        return None;
    }

    if let Some(&win) = free.iter().find(|&&idx| wins_after(cells, idx, mark)) {
        return Some(win);
    }

    let opponent = mark.opponent();
    if let Some(&block) = free.iter().find(|&&idx| wins_after(cells, idx, opponent)) {
        return Some(block);
    }

    if free.contains(&CENTER) {
        return Some(CENTER);
    }

    let corners: Vec<usize> = CORNERS.iter().copied().filter(|c| free.contains(c)).collect();
    if let Some(&corner) = dice.pick(&corners) {
        return Some(corner);
    }

    dice.pick(&free).copied()
}
