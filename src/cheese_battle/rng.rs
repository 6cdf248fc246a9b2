use rand::prelude::{IteratorRandom, SliceRandom};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of every random decision the game makes.
pub trait GameRng {
    /// Pick one item uniformly from `iter`.
    fn draw<T, I: Iterator<Item = T> + Sized>(&mut self, iter: I) -> Option<T>;

    /// Uniform integer in `0..bound`. `bound` must be non-zero.
    fn below(&mut self, bound: usize) -> usize;

    /// Uniform die face in `1..=sides`.
    fn roll(&mut self, sides: u32) -> u32;

    /// Uniform value in `[0, 100)`.
    fn percent(&mut self) -> f64;

    fn shuffle<T>(&mut self, items: &mut [T]);
}

#[derive(Debug)]
pub struct CheeseRng {
    rng: StdRng,
}

impl CheeseRng {
    pub fn seeded(seed: u64) -> Self {
        CheeseRng {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for CheeseRng {
    fn default() -> Self {
        CheeseRng {
            rng: StdRng::from_entropy(),
        }
    }
}

impl GameRng for CheeseRng {
    fn draw<T, I: Iterator<Item = T> + Sized>(&mut self, iter: I) -> Option<T> {
        iter.choose(&mut self.rng)
    }

    fn below(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }

    fn roll(&mut self, sides: u32) -> u32 {
        self.rng.gen_range(1..=sides)
    }

    fn percent(&mut self) -> f64 {
        self.rng.gen::<f64>() * 100.0
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}
