//! Random number source used by platform generation

use rand::Rng;

/// Uniform random draws
///
/// Implemented for every `rand::Rng`; tests plug in scripted sources.
pub trait RandomSource {
    /// Uniform integer in `[min, max]` (inclusive)
    fn uniform_int(&mut self, min: i32, max: i32) -> i32;
    /// Uniform float in `[min, max)`; returns `min` for an empty range
    fn uniform_float(&mut self, min: f32, max: f32) -> f32;
}

impl<R: Rng> RandomSource for R {
    fn uniform_int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.random_range(min..=max)
    }

    fn uniform_float(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.random_range(min..max)
    }
}

#[cfg(test)]
pub(crate) mod scripted {
    use super::RandomSource;

    /// Replays fixed draws, cycling when exhausted
    #[derive(Debug, Clone)]
    pub struct ScriptedRng {
        ints: Vec<i32>,
        floats: Vec<f32>,
        int_cursor: usize,
        float_cursor: usize,
    }

    impl ScriptedRng {
        pub fn new(ints: Vec<i32>, floats: Vec<f32>) -> Self {
            Self {
                ints,
                floats,
                int_cursor: 0,
                float_cursor: 0,
            }
        }

        /// Flat terrain with the narrowest gap
        pub fn flat() -> Self {
            Self::new(vec![0], vec![1.0])
        }
    }

    impl RandomSource for ScriptedRng {
        fn uniform_int(&mut self, min: i32, max: i32) -> i32 {
            let value = self.ints[self.int_cursor % self.ints.len()];
            self.int_cursor += 1;
            value.clamp(min, max)
        }

        fn uniform_float(&mut self, min: f32, max: f32) -> f32 {
            let value = self.floats[self.float_cursor % self.floats.len()];
            self.float_cursor += 1;
            value.clamp(min, max.max(min))
        }
    }
}
