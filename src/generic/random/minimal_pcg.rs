//! A simple pseudorandom number generator.
//!
//! A translation of the *really* minimal C PCG32 implementation from <https://www.pcg-random.org/>, implementing the [RngCore](rand_core::RngCore) and [SeedableRng](rand::SeedableRng) traits.
//!
//! PCG(32) is the default source of (pseudo)random numbers for a search as it is simple, fast, and has some nice supporting documentation.
//! The [searcher](crate::procedures::walk_sat) is parameterised to anything which satisfies [Rng](rand::Rng), so revising the source of randomness touches nothing else.
//!
//! Every stochastic decision of a search draws from one instance, so a seed fixes the whole trajectory.

use rand::SeedableRng;
use rand_core::{RngCore, impls};

/// State and increment
#[derive(Default)]
pub struct MinimalPCG32 {
    state: u64,
    inc: u64,
}

impl RngCore for MinimalPCG32 {
    fn next_u32(&mut self) -> u32 {
        let old_state = self.state;

        self.state = old_state
            .wrapping_mul(6364136223846793005_u64)
            .wrapping_add(self.inc);

        let xorshifted = ((old_state >> 18) ^ old_state) >> 27;
        let rot = (old_state >> 59) as u32;
        (xorshifted as u32).rotate_right(rot)
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u32() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }
}

impl SeedableRng for MinimalPCG32 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        /// Entirely unmotivated.
        const INCREMENT: u64 = 3215534235932367344;
        Self {
            state: (u64::from_le_bytes(seed)).wrapping_add(INCREMENT),
            inc: INCREMENT,
        }
    }
}

#[cfg(test)]
mod pcg_tests {
    use super::*;

    #[test]
    fn a_seed_fixes_the_stream() {
        let mut first = MinimalPCG32::from_seed(2u64.to_le_bytes());
        let mut second = MinimalPCG32::from_seed(2u64.to_le_bytes());

        for _ in 0..64 {
            assert_eq!(first.next_u32(), second.next_u32());
        }
    }

    #[test]
    fn seeds_diverge() {
        let mut two = MinimalPCG32::from_seed(2u64.to_le_bytes());
        let mut seventy_three = MinimalPCG32::from_seed(73u64.to_le_bytes());

        let two_stream: Vec<u32> = (0..8).map(|_| two.next_u32()).collect();
        let seventy_three_stream: Vec<u32> = (0..8).map(|_| seventy_three.next_u32()).collect();

        assert_ne!(two_stream, seventy_three_stream);
    }
}
