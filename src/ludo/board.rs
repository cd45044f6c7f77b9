use std::collections::BTreeSet;

use serde::Serialize;

pub const RING_LEN: u8 = 52;
pub const TOKENS_PER_COLOR: usize = 4;
/// Home-run cells are indexed 0..=5; index 5 completes the token.
pub const HOME_RUN_LAST: u8 = 5;

const START_SPACING: u8 = 13;
/// Relative steps from a color's own start cell before its home run begins.
const RING_EXIT: u8 = 51;
const SAFE_OFFSET: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum LudoColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl LudoColor {
    pub const ALL: [LudoColor; 4] = [Self::Red, Self::Blue, Self::Green, Self::Yellow];

    pub fn index(self) -> u8 {
        match self {
            Self::Red => 0,
            Self::Blue => 1,
            Self::Green => 2,
            Self::Yellow => 3,
        }
    }

    /// Entry cell on the shared ring.
    pub fn start(self) -> u8 {
        self.index() * START_SPACING
    }
}

/// Where a token is. `Home` and `Complete` are not board positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenPos {
    Home,
    /// Absolute shared-ring cell, 0..=51.
    Ring(u8),
    /// Private home-run cell, 0..=4 (index 5 becomes `Complete`).
    HomeRun(u8),
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveKind {
    Released,
    Advanced,
    Completed,
}

/// What a single consumed roll did, for the board renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LudoMoveRecord {
    pub color: LudoColor,
    pub token: u8,
    pub kind: MoveKind,
    pub to: TokenPos,
    pub captured: Vec<(LudoColor, u8)>,
}

/// The default 8 safe cells: each color's start plus the fixed offset
/// eight cells beyond it.
pub fn default_safe_positions() -> BTreeSet<u8> {
    LudoColor::ALL
        .iter()
        .flat_map(|c| [c.start(), (c.start() + SAFE_OFFSET) % RING_LEN])
        .collect()
}

/// Shared 52-cell ring plus one private 6-cell home run per seated color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LudoBoard {
    seats: Vec<LudoColor>,
    tokens: Vec<[TokenPos; TOKENS_PER_COLOR]>,
    safe_positions: BTreeSet<u8>,
}

impl LudoBoard {
    pub fn new(seats: Vec<LudoColor>, safe_positions: BTreeSet<u8>) -> Self {
        let tokens = vec![[TokenPos::Home; TOKENS_PER_COLOR]; seats.len()];
        Self {
            seats,
            tokens,
            safe_positions,
        }
    }

    pub fn seats(&self) -> &[LudoColor] {
        &self.seats
    }

    pub fn tokens_of(&self, color: LudoColor) -> &[TokenPos; TOKENS_PER_COLOR] {
        &self.tokens[self.seat_index(color)]
    }

    pub fn all_complete(&self, color: LudoColor) -> bool {
        self.tokens_of(color)
            .iter()
            .all(|&t| t == TokenPos::Complete)
    }

    /// Token indices that have a legal move for `roll`, in board order.
    pub fn movable_tokens(&self, color: LudoColor, roll: u8) -> Vec<u8> {
        (0..TOKENS_PER_COLOR as u8)
            .filter(|&idx| self.plan_move(color, idx, roll).is_some())
            .collect()
    }

    /// The position `roll` would put the token on, or `None` when the token
    /// cannot use that roll (not a 6 for release, overshoot past the final
    /// home-run cell, or the destination holds one of the mover's tokens).
    pub fn plan_move(&self, color: LudoColor, token: u8, roll: u8) -> Option<TokenPos> {
        let target = match *self.tokens_of(color).get(token as usize)? {
            TokenPos::Home => {
                if roll != 6 {
                    return None;
                }
                TokenPos::Ring(color.start())
            }
            TokenPos::Ring(abs) => {
                let rel = (abs + RING_LEN - color.start()) % RING_LEN;
                advanced(rel, roll, color)?
            }
            TokenPos::HomeRun(idx) => home_run_cell(idx + roll)?,
            TokenPos::Complete => return None,
        };
        if self.own_token_on(color, token, target) {
            return None;
        }
        Some(target)
    }

    /// Moves the token onto `target`, sending opposing ring tokens home when
    /// the cell allows capture. Release captures ignore the safe set; the
    /// entered start cell belongs to the releasing color.
    ///
    /// Caller contract: `target` came from `plan_move(color, token, roll)`.
    pub fn apply_move(&mut self, color: LudoColor, token: u8, target: TokenPos) -> LudoMoveRecord {
        let released = self.tokens_of(color)[token as usize] == TokenPos::Home;
        let captured = match target {
            TokenPos::Ring(cell) if released || !self.safe_positions.contains(&cell) => {
                self.capture_at(cell, color)
            }
            _ => Vec::new(),
        };

        let seat = self.seat_index(color);
        self.tokens[seat][token as usize] = target;

        let kind = if released {
            MoveKind::Released
        } else if target == TokenPos::Complete {
            MoveKind::Completed
        } else {
            MoveKind::Advanced
        };
        LudoMoveRecord {
            color,
            token,
            kind,
            to: target,
            captured,
        }
    }

    pub fn reset(&mut self) {
        for tokens in &mut self.tokens {
            *tokens = [TokenPos::Home; TOKENS_PER_COLOR];
        }
    }

    fn seat_index(&self, color: LudoColor) -> usize {
        self.seats
            .iter()
            .position(|&c| c == color)
            .expect("color is not seated on this board")
    }

    fn own_token_on(&self, color: LudoColor, moving: u8, target: TokenPos) -> bool {
        if target == TokenPos::Complete {
            return false;
        }
        self.tokens_of(color)
            .iter()
            .enumerate()
            .any(|(idx, &pos)| idx as u8 != moving && pos == target)
    }

    fn capture_at(&mut self, cell: u8, mover: LudoColor) -> Vec<(LudoColor, u8)> {
        let mut captured = Vec::new();
        for seat in 0..self.seats.len() {
            let color = self.seats[seat];
            if color == mover {
                continue;
            }
            for idx in 0..TOKENS_PER_COLOR {
                if self.tokens[seat][idx] == TokenPos::Ring(cell) {
                    self.tokens[seat][idx] = TokenPos::Home;
                    captured.push((color, idx as u8));
                }
            }
        }
        captured
    }
}

/// Ring advance by relative progress. Crossing the ring exit spills the
/// excess steps into the private home run; overshoot past the final cell
/// makes the move illegal for that roll.
fn advanced(rel: u8, roll: u8, color: LudoColor) -> Option<TokenPos> {
    let rel = rel + roll;
    if rel < RING_EXIT {
        Some(TokenPos::Ring((color.start() + rel) % RING_LEN))
    } else {
        home_run_cell(rel - RING_EXIT)
    }
}

fn home_run_cell(idx: u8) -> Option<TokenPos> {
    match idx {
        HOME_RUN_LAST => Some(TokenPos::Complete),
        i if i < HOME_RUN_LAST => Some(TokenPos::HomeRun(i)),
        _ => None,
    }
}
