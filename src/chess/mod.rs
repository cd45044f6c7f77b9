pub mod board;

use serde::Serialize;

use crate::dice::Dice;
use crate::error::{EngineError, EngineResult};
use crate::turn::{Outcome, TurnOrder};
use crate::types::{Mode, Position};

pub use board::{Board, Color, MoveRecord, Piece, PieceKind};

/// Public game state returned to the board renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChessState {
    /// 64 row-major cells: 0 empty, positive white, negative black.
    pub board: Vec<i8>,
    /// 1=white, 2=black.
    pub current_player: u8,
    pub move_count: u32,
    pub is_game_over: bool,
    /// 0 while ongoing.
    pub winner: u8,
    pub last_move: Option<MoveRecord>,
}

/// Chess session with the simplified terminal rule: capturing the king wins.
pub struct ChessGame {
    board: Board,
    turn: TurnOrder<Color>,
    outcome: Outcome<Color>,
    mode: Mode,
    dice: Dice,
    last_move: Option<MoveRecord>,
}

impl ChessGame {
    /// White is the human seat in `VsComputer` mode and always moves first.
    pub fn new(mode: Mode, seed: u64) -> Self {
        Self {
            board: Board::new(),
            turn: TurnOrder::new(vec![Color::White, Color::Black]),
            outcome: Outcome::Ongoing,
            mode,
            dice: Dice::seeded(seed),
            last_move: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn outcome(&self) -> Outcome<Color> {
        self.outcome
    }

    pub fn current_color(&self) -> Color {
        self.turn.current()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Destinations for the piece on `from`, or nothing when the square is
    /// empty, holds an opponent piece, or the game is over.
    pub fn legal_moves(&self, from: Position) -> Vec<Position> {
        if self.outcome.is_terminal() || !in_bounds(from) {
            return Vec::new();
        }
        match self.board.piece_at(from) {
            Some(piece) if piece.color == self.turn.current() => self.board.valid_moves(from),
            _ => Vec::new(),
        }
    }

    /// Applies one move atomically: legality check, relocation, promotion,
    /// terminal check, turn switch.
    pub fn apply_move(&mut self, from: Position, to: Position) -> EngineResult<MoveRecord> {
        if self.outcome.is_terminal() {
            return Err(EngineError::GameOver);
        }
        if !in_bounds(from) || !in_bounds(to) {
            return Err(EngineError::selection("square out of range"));
        }
        let piece = self
            .board
            .piece_at(from)
            .ok_or_else(|| EngineError::selection("no piece on the selected square"))?;
        if piece.color != self.turn.current() {
            return Err(EngineError::selection("not this player's piece"));
        }
        if !self.board.valid_moves(from).contains(&to) {
            return Err(EngineError::illegal("destination is not reachable"));
        }

        let record = self.board.apply(from, to);
        if record.captured == Some(PieceKind::King) {
            self.outcome = Outcome::Winner(piece.color);
            self.turn.stay();
        } else {
            self.turn.advance();
        }
        self.last_move = Some(record);
        Ok(record)
    }

    /// Automated opponent: visits its own pieces in a shuffled order and
    /// plays a uniformly random destination of the first movable one.
    pub fn play_computer_turn(&mut self) -> EngineResult<MoveRecord> {
        if self.outcome.is_terminal() {
            return Err(EngineError::GameOver);
        }
        if self.mode != Mode::VsComputer {
            return Err(EngineError::selection("no computer seat in this mode"));
        }
        let color = self.turn.current();
        if color != Color::Black {
            return Err(EngineError::selection("it is not the computer's turn"));
        }

        let mut squares = self.board.squares_of(color);
        self.dice.shuffle(&mut squares);
        for from in squares {
            let moves = self.board.valid_moves(from);
            if let Some(&to) = self.dice.pick(&moves) {
                return self.apply_move(from, to);
            }
        }
        // With kings never removed before the game ends, some move exists.
        Err(EngineError::Invariant(
            "computer found no legal move".into(),
        ))
    }

    pub fn reset(&mut self) {
        self.board = Board::new();
        self.turn.reset();
        self.outcome = Outcome::Ongoing;
        self.last_move = None;
    }

    pub fn to_game_state(&self) -> ChessState {
        ChessState {
            board: self.board.to_array(),
            current_player: self.turn.current().code(),
            move_count: self.turn.moves_played(),
            is_game_over: self.outcome.is_terminal(),
            winner: match self.outcome {
                Outcome::Winner(color) => color.code(),
                _ => 0,
            },
            last_move: self.last_move,
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board) {
        self.board = board;
        self.outcome = Outcome::Ongoing;
        self.last_move = None;
    }
}

fn in_bounds(pos: Position) -> bool {
    (pos.row as usize) < board::BOARD_SIZE && (pos.col as usize) < board::BOARD_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    fn game() -> ChessGame {
        ChessGame::new(Mode::VsComputer, 5)
    }

    fn piece(kind: PieceKind, color: Color) -> Option<Piece> {
        Some(Piece {
            kind,
            color,
            has_moved: false,
        })
    }

    #[test]
    fn white_moves_first_and_turns_alternate() {
        let mut g = game();
        assert_eq!(g.current_color(), Color::White);
        g.apply_move(pos(6, 4), pos(4, 4)).unwrap();
        assert_eq!(g.current_color(), Color::Black);
        g.apply_move(pos(1, 4), pos(3, 4)).unwrap();
        assert_eq!(g.current_color(), Color::White);
        assert_eq!(g.to_game_state().move_count, 2);
    }

    #[test]
    fn selecting_an_empty_or_opponent_square_yields_nothing() {
        let g = game();
        assert!(g.legal_moves(pos(4, 4)).is_empty());
        assert!(g.legal_moves(pos(1, 0)).is_empty());
        assert!(!g.legal_moves(pos(6, 0)).is_empty());
    }

    #[test]
    fn apply_rejects_bad_selections_with_the_right_error_class() {
        let mut g = game();
        assert!(matches!(
            g.apply_move(pos(4, 4), pos(3, 4)),
            Err(EngineError::InvalidSelection { .. })
        ));
        assert!(matches!(
            g.apply_move(pos(1, 0), pos(2, 0)),
            Err(EngineError::InvalidSelection { .. })
        ));
        assert!(matches!(
            g.apply_move(pos(6, 0), pos(3, 0)),
            Err(EngineError::IllegalMove { .. })
        ));
    }

    #[test]
    fn every_reported_move_applies_and_every_other_fails() {
        let g = game();
        let from = pos(7, 1); // white knight
        let legal = g.legal_moves(from);
        assert_eq!(legal.len(), 2);

        for row in 0..8u8 {
            for col in 0..8u8 {
                let to = pos(row, col);
                let mut probe = game();
                let result = probe.apply_move(from, to);
                if legal.contains(&to) {
                    assert!(result.is_ok(), "legal {to:?} was rejected");
                } else {
                    assert!(result.is_err(), "illegal {to:?} was accepted");
                }
            }
        }
    }

    #[test]
    fn capturing_the_king_wins_on_the_spot() {
        let mut g = game();
        let mut board = Board::empty();
        board.set_piece(pos(4, 4), piece(PieceKind::Rook, Color::White));
        board.set_piece(pos(4, 0), piece(PieceKind::King, Color::Black));
        board.set_piece(pos(7, 7), piece(PieceKind::King, Color::White));
        g.set_board_for_test(board);

        let record = g.apply_move(pos(4, 4), pos(4, 0)).unwrap();
        assert_eq!(record.captured, Some(PieceKind::King));
        assert_eq!(g.outcome(), Outcome::Winner(Color::White));
        assert_eq!(g.to_game_state().winner, 1);
    }

    #[test]
    fn finished_games_reject_further_moves_and_keep_the_board() {
        let mut g = game();
        let mut board = Board::empty();
        board.set_piece(pos(4, 4), piece(PieceKind::Rook, Color::White));
        board.set_piece(pos(4, 0), piece(PieceKind::King, Color::Black));
        g.set_board_for_test(board);
        g.apply_move(pos(4, 4), pos(4, 0)).unwrap();

        let before = g.to_game_state();
        assert_eq!(
            g.apply_move(pos(4, 0), pos(4, 1)),
            Err(EngineError::GameOver)
        );
        assert!(g.legal_moves(pos(4, 0)).is_empty());
        assert_eq!(g.to_game_state(), before);
    }

    #[test]
    fn computer_plays_a_geometrically_legal_black_move() {
        let mut g = game();
        g.apply_move(pos(6, 4), pos(4, 4)).unwrap();

        let record = g.play_computer_turn().unwrap();
        assert_eq!(g.current_color(), Color::White);
        let moved = g.board().piece_at(record.to).unwrap();
        assert_eq!(moved.color, Color::Black);
    }

    #[test]
    fn computer_move_is_deterministic_for_a_fixed_seed() {
        let mut a = ChessGame::new(Mode::VsComputer, 99);
        let mut b = ChessGame::new(Mode::VsComputer, 99);
        a.apply_move(pos(6, 4), pos(4, 4)).unwrap();
        b.apply_move(pos(6, 4), pos(4, 4)).unwrap();
        assert_eq!(
            a.play_computer_turn().unwrap(),
            b.play_computer_turn().unwrap()
        );
    }

    #[test]
    fn computer_turn_is_rejected_out_of_turn() {
        let mut g = game();
        assert!(matches!(
            g.play_computer_turn(),
            Err(EngineError::InvalidSelection { .. })
        ));
    }

    #[test]
    fn reset_restores_the_opening_position() {
        let mut g = game();
        g.apply_move(pos(6, 4), pos(4, 4)).unwrap();
        g.reset();
        let state = g.to_game_state();
        assert_eq!(state.board, Board::new().to_array());
        assert_eq!(state.current_player, 1);
        assert_eq!(state.move_count, 0);
    }
}
