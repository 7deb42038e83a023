//! MinHash signatures over word shingles.
//!
//! Hash functions are `(a * h + b) mod p` with `p = 2^31 - 1` and
//! coefficients drawn from a seeded LCG, so signatures are identical across
//! runs for the same configuration.

use std::collections::HashSet;
use std::hash::{BuildHasher, Hash, Hasher};

use ahash::RandomState;

use super::shingle::word_shingles;

pub const DEFAULT_NUM_PERM: usize = 128;
pub const DEFAULT_SHINGLE_SIZE: usize = 3;
const DEFAULT_SEED: u64 = 42;
const MERSENNE_PRIME: u64 = (1 << 31) - 1;

/// Tunables for signature construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinHashConfig {
    /// Number of hash permutations (signature length).
    pub num_perm: usize,
    /// Words per shingle.
    pub shingle_size: usize,
    pub seed: u64,
}

impl Default for MinHashConfig {
    fn default() -> Self {
        Self {
            num_perm: DEFAULT_NUM_PERM,
            shingle_size: DEFAULT_SHINGLE_SIZE,
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinHashSignature {
    values: Vec<u32>,
}

impl MinHashSignature {
    #[must_use]
    pub const fn new(values: Vec<u32>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Estimated Jaccard similarity: the fraction of agreeing slots.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn jaccard(&self, other: &Self) -> f64 {
        if self.values.len() != other.values.len() || self.values.is_empty() {
            return 0.0;
        }
        let matches = self
            .values
            .iter()
            .zip(&other.values)
            .filter(|(a, b)| a == b)
            .count();
        matches as f64 / self.values.len() as f64
    }
}

pub struct MinHasher {
    config: MinHashConfig,
    coefficients: Vec<(u64, u64)>,
    hash_builder: RandomState,
}

impl MinHasher {
    #[must_use]
    pub fn new(config: MinHashConfig) -> Self {
        let mut state = config.seed;
        let mut next = || {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            state % MERSENNE_PRIME
        };
        let coefficients = (0..config.num_perm)
            .map(|_| {
                let a = next().max(1);
                let b = next();
                (a, b)
            })
            .collect();

        Self {
            config,
            coefficients,
            hash_builder: RandomState::with_seeds(
                0x517c_c1b7_2722_0a95,
                0x8d8f_5f3b_12c4_a6e1,
                0xbf58_476d_1ce4_e5b9,
                0x94d0_49bb_1331_11eb,
            ),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &MinHashConfig {
        &self.config
    }

    /// Signature of the text's shingle set, or `None` when it has no shingles.
    #[must_use]
    pub fn signature(&self, text: &str) -> Option<MinHashSignature> {
        let hashes: HashSet<u64> = word_shingles(text, self.config.shingle_size)
            .iter()
            .map(|shingle| self.hash_shingle(shingle))
            .collect();
        if hashes.is_empty() {
            return None;
        }

        let mut values = vec![u32::MAX; self.config.num_perm];
        for hash in hashes {
            let hash = hash % MERSENNE_PRIME;
            for (slot, &(a, b)) in values.iter_mut().zip(&self.coefficients) {
                #[allow(clippy::cast_possible_truncation)]
                let permuted = ((a * hash + b) % MERSENNE_PRIME) as u32;
                if permuted < *slot {
                    *slot = permuted;
                }
            }
        }
        Some(MinHashSignature::new(values))
    }

    fn hash_shingle(&self, shingle: &str) -> u64 {
        let mut hasher = self.hash_builder.build_hasher();
        shingle.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
#[path = "minhash_tests.rs"]
mod tests;
