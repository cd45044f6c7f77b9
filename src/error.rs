use thiserror::Error;

/// Errors surfaced by the rule engines.
///
/// `IllegalMove` and `InvalidSelection` are expected rule violations: the UI
/// recovers by ignoring the input and re-prompting. `Invariant` signals a
/// broken internal consistency check and is not recoverable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Destination rejected for the current selection and roll.
    #[error("illegal move: {reason}")]
    IllegalMove { reason: &'static str },

    /// Selected an empty cell, an opponent's piece, or out of turn.
    #[error("invalid selection: {reason}")]
    InvalidSelection { reason: &'static str },

    /// Acting on a finished game.
    #[error("game is already over")]
    GameOver,

    /// A dice-consuming action was attempted with no roll pending.
    #[error("no dice roll pending")]
    DiceNotRolled,

    /// Rolling again before the pending roll was consumed.
    #[error("a dice roll is already pending")]
    DiceAlreadyRolled,

    /// Internal consistency breach. Fatal in testing, never expected at runtime.
    #[error("invariant violation: {0}")]
    Invariant(String),
}

impl EngineError {
    pub fn illegal(reason: &'static str) -> Self {
        Self::IllegalMove { reason }
    }

    pub fn selection(reason: &'static str) -> Self {
        Self::InvalidSelection { reason }
    }
}

/// Result type alias for rule-engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
