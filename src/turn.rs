use serde::Serialize;

/// Terminal status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome<P> {
    Ongoing,
    Winner(P),
    Draw,
}

impl<P> Outcome<P> {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

/// Fixed cyclic turn rotation shared by all four engines.
///
/// Contract:
/// - the roster is fixed at construction and never reordered;
/// - exactly one seat is to move at any non-terminal instant;
/// - engines stop calling `advance` once their outcome is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOrder<P> {
    seats: Vec<P>,
    current: usize,
    moves_played: u32,
}

impl<P: Copy + PartialEq> TurnOrder<P> {
    /// Caller contract: `seats` holds at least two distinct seats.
    pub fn new(seats: Vec<P>) -> Self {
        debug_assert!(seats.len() >= 2, "a game needs at least two seats");
        Self {
            seats,
            current: 0,
            moves_played: 0,
        }
    }

    pub fn current(&self) -> P {
        self.seats[self.current]
    }

    pub fn is_current(&self, seat: P) -> bool {
        self.current() == seat
    }

    pub fn seats(&self) -> &[P] {
        &self.seats
    }

    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    /// Counts a completed move without giving the turn away (extra-turn rule).
    pub fn stay(&mut self) {
        self.moves_played += 1;
    }

    /// Counts a completed move and hands the turn to the next seat in order.
    pub fn advance(&mut self) {
        self.moves_played += 1;
        self.current = (self.current + 1) % self.seats.len();
    }

    /// Gives the turn away without counting a move (a passed turn).
    pub fn skip(&mut self) {
        self.current = (self.current + 1) % self.seats.len();
    }

    pub fn reset(&mut self) {
        self.current = 0;
        self.moves_played = 0;
    }
}
