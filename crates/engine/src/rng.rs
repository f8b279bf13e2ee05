//! Seeded piece randomizer.
//!
//! Games are reproducible from their seed: [`SimpleRng`] is a xorshift32
//! generator and [`Bag`] deals every item once per shuffled round.

/// xorshift32 (13, 17, 5).
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Zero is a fixed point of xorshift and is remapped.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9e37_79b9 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform-ish value in `0..max`; `max == 0` is treated as 1.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max.max(1) as u64) >> 32) as u32
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_range(i as u32 + 1) as usize;
            items.swap(i, j);
        }
    }
}

/// Deals each item of a fixed set once per round, in shuffled order.
#[derive(Debug, Clone)]
pub struct Bag<T> {
    items: Vec<T>,
    round: Vec<T>,
}

impl<T: Copy> Bag<T> {
    pub fn new(items: &[T]) -> Self {
        Self {
            items: items.to_vec(),
            round: Vec::with_capacity(items.len()),
        }
    }

    /// Next item, reshuffling when the round is spent. `None` only for an
    /// empty bag.
    pub fn draw(&mut self, rng: &mut SimpleRng) -> Option<T> {
        if self.round.is_empty() {
            self.round.extend_from_slice(&self.items);
            rng.shuffle(&mut self.round);
        }
        self.round.pop()
    }

    /// Items left before the next reshuffle.
    pub fn remaining(&self) -> usize {
        self.round.len()
    }
}
