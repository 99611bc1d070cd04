//! Bag randomizer - 7-bag piece generation
//!
//! Each bag holds one of each piece kind in a uniformly shuffled order.
//! Draws consume the bag; an exhausted bag is refilled and reshuffled, so
//! every kind appears exactly once per 7 consecutive draws.
//!
//! Uses a small seedable LCG so piece sequences are reproducible in tests.

use crate::types::PieceKind;

/// Seedable linear congruential generator (Numerical Recipes constants).
/// Quality is irrelevant here; only determinism and uniformity over tiny
/// ranges matter.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            // a zero state would be degenerate
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform-ish value in [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Fisher-Yates in-place shuffle
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range(i as u32 + 1) as usize;
            slice.swap(i, j);
        }
    }
}

/// Shuffled bag of the 7 piece kinds
#[derive(Debug, Clone)]
pub struct PieceBag {
    bag: [PieceKind; 7],
    /// Index of the next undrawn entry in `bag`
    next: usize,
    rng: SimpleRng,
}

impl PieceBag {
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            bag: PieceKind::ALL,
            next: 0,
            rng: SimpleRng::new(seed),
        };
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.next = 0;
    }

    /// Draw the next piece kind, refilling the bag when exhausted
    pub fn draw(&mut self) -> PieceKind {
        if self.next >= self.bag.len() {
            self.refill();
        }
        let kind = self.bag[self.next];
        self.next += 1;
        kind
    }

    /// How many draws remain before the next refill
    pub fn remaining(&self) -> usize {
        self.bag.len() - self.next
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}
