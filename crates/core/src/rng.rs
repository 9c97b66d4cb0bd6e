//! RNG module - deterministic piece spawning
//!
//! Pieces are drawn uniformly from the configured set, except that the kind
//! spawned last is never drawn twice in a row (unless it is the only kind).
//!
//! Also provides a simple LCG for deterministic testing.

use crate::types::{PieceKind, PieceSet};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Draws piece kinds without immediate repeats.
#[derive(Debug, Clone)]
pub struct PieceSpawner {
    rng: SimpleRng,
    kinds: &'static [PieceKind],
    previous: Option<PieceKind>,
    seed: u32,
}

impl PieceSpawner {
    pub fn new(seed: u32, set: PieceSet) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            kinds: set.kinds(),
            previous: None,
            seed,
        }
    }

    /// Draw the next kind.
    pub fn draw(&mut self) -> PieceKind {
        let excluded = match self.previous {
            Some(prev) if self.kinds.len() > 1 => Some(prev),
            _ => None,
        };
        let choices = self.kinds.len() - usize::from(excluded.is_some());
        let mut pick = self.rng.next_range(choices as u32) as usize;
        let mut kind = self.kinds[0];
        for &k in self.kinds {
            if Some(k) == excluded {
                continue;
            }
            if pick == 0 {
                kind = k;
                break;
            }
            pick -= 1;
        }
        self.previous = Some(kind);
        kind
    }

    /// Kind returned by the last `draw`.
    pub fn previous(&self) -> Option<PieceKind> {
        self.previous
    }

    pub fn kinds(&self) -> &'static [PieceKind] {
        self.kinds
    }

    /// Seed this spawner was created with (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Rewind to the initial state.
    pub fn reset(&mut self) {
        self.rng = SimpleRng::new(self.seed);
        self.previous = None;
    }
}

impl Default for PieceSpawner {
    fn default() -> Self {
        Self::new(1, PieceSet::default())
    }
}
