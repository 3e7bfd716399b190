//! Random sources for serves and CPU noise.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform integer draws. Serves and the easy CPU only ever ask for this.
pub trait RandomSource {
    /// Uniform integer in `[min, max]`, both ends inclusive
    fn range_inclusive(&mut self, min: i32, max: i32) -> i32;

    /// -1 or +1 with equal probability
    fn sign(&mut self) -> f32 {
        if self.range_inclusive(0, 1) == 0 {
            -1.0
        } else {
            1.0
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        (**self).range_inclusive(min, max)
    }
}

/// Seeded random number generator
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Seeded from `seed` when given, from OS entropy otherwise
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => Self(StdRng::from_entropy()),
        }
    }
}

impl RandomSource for GameRng {
    fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        self.0.gen_range(min..=max)
    }
}

/// Replays a fixed list of values, clamped into the requested range.
/// Falls back to `min` once the list runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    values: Vec<i32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: impl Into<Vec<i32>>) -> Self {
        ScriptedRng {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of values handed out so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRng {
    fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        let value = self.values.get(self.cursor).copied().unwrap_or(min);
        self.cursor += 1;
        value.clamp(min, max)
    }
}
