// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use proptest::{
    strategy::{Strategy, ValueTree},
    test_runner::{Config, RngAlgorithm, TestRng, TestRunner},
};
use std::hash::Hasher;
use twox_hash::XxHash64;

/// Generates values out of proptest strategies, deterministically for a given seed.
#[derive(Debug)]
pub(crate) struct ValueGenerator {
    runner: TestRunner,
}

impl ValueGenerator {
    /// Creates a generator seeded from the hash of `seed`.
    pub(crate) fn from_seed(seed: &str) -> Self {
        let mut bytes = [0_u8; 32];
        for (ix, chunk) in bytes.chunks_exact_mut(8).enumerate() {
            let mut hasher = XxHash64::with_seed(ix as u64);
            hasher.write(seed.as_bytes());
            chunk.copy_from_slice(&hasher.finish().to_le_bytes());
        }
        let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &bytes);
        Self {
            runner: TestRunner::new_with_rng(Config::default(), rng),
        }
    }

    /// Returns an independent generator whose values are still determined by this one's seed.
    pub(crate) fn partial_clone(&mut self) -> Self {
        Self {
            runner: TestRunner::new_with_rng(Config::default(), self.runner.new_rng()),
        }
    }

    pub(crate) fn generate<S: Strategy>(&mut self, strategy: S) -> S::Value {
        strategy
            .new_tree(&mut self.runner)
            .expect("strategies used for fixtures never reject")
            .current()
    }
}
