use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEFAULT_SEED: u64 = 3819201;

/// Source of randomness for agents that pick moves by chance.
pub trait RandomGenerator: Default {
    /// Returns a number in `from..to`, or `from` when the range is empty.
    fn next_range(&mut self, from: usize, to: usize) -> usize;

    /// Picks an element of `items`, or `None` if the slice is empty.
    fn choose<'a, K>(&mut self, items: &'a [K]) -> Option<&'a K> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_range(0, items.len()))
    }
}

/// Thread-local `rand` generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRandomGenerator;

impl RandomGenerator for StandardRandomGenerator {
    fn next_range(&mut self, from: usize, to: usize) -> usize {
        if to <= from {
            return from;
        }
        rand::rng().random_range(from..to)
    }
}

/// `StdRng` seeded from a fixed value; the same seed always replays the same games.
#[derive(Debug, Clone)]
pub struct SeededRandomGenerator {
    rng: StdRng,
}

impl SeededRandomGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededRandomGenerator {
    fn default() -> Self {
        SeededRandomGenerator::new(DEFAULT_SEED)
    }
}

impl RandomGenerator for SeededRandomGenerator {
    fn next_range(&mut self, from: usize, to: usize) -> usize {
        if to <= from {
            return from;
        }
        self.rng.random_range(from..to)
    }
}
