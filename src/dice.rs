use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const SIDES: u8 = 6;

/// Seedable six-sided dice shared by dice rolls and opponent policies.
///
/// Every game session owns one `Dice` built from an explicit seed, so a
/// (seed, input sequence) pair replays deterministically.
#[derive(Debug, Clone)]
pub struct Dice {
    rng: SmallRng,
}

impl Dice {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Draws one value uniformly from 1..=6.
    pub fn roll(&mut self) -> u8 {
        self.rng.random_range(1..=SIDES)
    }

    /// Uniform index into a non-empty slice. Returns `None` on empty input.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..items.len());
        items.get(idx)
    }

    /// Fisher-Yates shuffle, used by policies that visit pieces in random order.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.rng.random_range(0..=i);
            items.swap(i, j);
        }
    }
}
