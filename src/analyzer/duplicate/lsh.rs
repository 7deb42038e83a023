//! Banded locality-sensitive hashing over MinHash signatures.
//!
//! The band count `b` and rows per band `r` are chosen for a similarity
//! threshold `t` by minimising the weighted sum of the false-positive area
//! `∫₀ᵗ 1-(1-sʳ)ᵇ ds` and the false-negative area `∫ₜ¹ (1-sʳ)ᵇ ds`.

use std::collections::{BTreeSet, HashMap};
use std::hash::{BuildHasher, Hash, Hasher};

use ahash::RandomState;

use crate::error::{CorpusGuardError, Result};

use super::minhash::MinHashSignature;

const FALSE_POSITIVE_WEIGHT: f64 = 0.5;
const FALSE_NEGATIVE_WEIGHT: f64 = 0.5;
const INTEGRATION_STEPS: usize = 64;

/// Index that returns candidate neighbours for a signature.
pub trait SimilarityIndex {
    /// # Errors
    /// Returns an error if the signature does not fit the index.
    fn insert(&mut self, id: usize, signature: &MinHashSignature) -> Result<()>;

    /// Ids sharing at least one bucket with `signature`, ascending.
    ///
    /// # Errors
    /// Returns an error if the signature does not fit the index.
    fn query(&self, signature: &MinHashSignature) -> Result<Vec<usize>>;
}

/// Constructs a fresh index per run.
pub trait SimilarityIndexBuilder: Send + Sync {
    fn name(&self) -> &'static str;

    /// # Errors
    /// Returns an error if the parameters cannot describe a valid index.
    fn build(&self, threshold: f64, num_perm: usize) -> Result<Box<dyn SimilarityIndex>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LshIndexBuilder;

impl SimilarityIndexBuilder for LshIndexBuilder {
    fn name(&self) -> &'static str {
        "minhash-lsh"
    }

    fn build(&self, threshold: f64, num_perm: usize) -> Result<Box<dyn SimilarityIndex>> {
        Ok(Box::new(LshIndex::new(threshold, num_perm)?))
    }
}

pub struct LshIndex {
    num_perm: usize,
    rows_per_band: usize,
    bands: Vec<HashMap<u64, Vec<usize>, RandomState>>,
    hash_builder: RandomState,
}

impl LshIndex {
    /// # Errors
    /// Returns an error if `threshold` is outside `(0, 1]` or `num_perm` is zero.
    pub fn new(threshold: f64, num_perm: usize) -> Result<Self> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(CorpusGuardError::SimilarityIndex(format!(
                "threshold must be in (0, 1], got {threshold}"
            )));
        }
        if num_perm == 0 {
            return Err(CorpusGuardError::SimilarityIndex(
                "num_perm must be at least 1".to_string(),
            ));
        }
        let (num_bands, rows_per_band) = optimal_params(threshold, num_perm);
        let hash_builder = RandomState::with_seeds(
            0xa1b2_c3d4_e5f6_0718,
            0x9182_7364_5546_3728,
            0xdead_beef_cafe_babe,
            0x0123_4567_89ab_cdef,
        );
        let bands = (0..num_bands)
            .map(|_| HashMap::with_hasher(hash_builder.clone()))
            .collect();
        Ok(Self {
            num_perm,
            rows_per_band,
            bands,
            hash_builder,
        })
    }

    #[must_use]
    pub fn num_bands(&self) -> usize {
        self.bands.len()
    }

    #[must_use]
    pub const fn rows_per_band(&self) -> usize {
        self.rows_per_band
    }

    fn check_len(&self, signature: &MinHashSignature) -> Result<()> {
        if signature.len() == self.num_perm {
            Ok(())
        } else {
            Err(CorpusGuardError::SimilarityIndex(format!(
                "signature has {} permutations, index expects {}",
                signature.len(),
                self.num_perm
            )))
        }
    }

    fn band_keys<'s>(&'s self, signature: &'s MinHashSignature) -> impl Iterator<Item = u64> + 's {
        signature
            .values()
            .chunks_exact(self.rows_per_band)
            .take(self.bands.len())
            .map(|rows| {
                let mut hasher = self.hash_builder.build_hasher();
                rows.hash(&mut hasher);
                hasher.finish()
            })
    }
}

impl SimilarityIndex for LshIndex {
    fn insert(&mut self, id: usize, signature: &MinHashSignature) -> Result<()> {
        self.check_len(signature)?;
        let keys: Vec<u64> = self.band_keys(signature).collect();
        for (band, key) in self.bands.iter_mut().zip(keys) {
            band.entry(key).or_default().push(id);
        }
        Ok(())
    }

    fn query(&self, signature: &MinHashSignature) -> Result<Vec<usize>> {
        self.check_len(signature)?;
        let mut candidates = BTreeSet::new();
        for (band, key) in self.bands.iter().zip(self.band_keys(signature)) {
            if let Some(ids) = band.get(&key) {
                candidates.extend(ids.iter().copied());
            }
        }
        Ok(candidates.into_iter().collect())
    }
}

/// Band/row split for `threshold` using at most `num_perm` permutations.
#[must_use]
pub fn optimal_params(threshold: f64, num_perm: usize) -> (usize, usize) {
    let mut best = (1, num_perm.max(1));
    let mut min_error = f64::INFINITY;
    for bands in 1..=num_perm {
        for rows in 1..=num_perm / bands {
            let fp = false_positive_area(threshold, bands, rows);
            let fn_ = false_negative_area(threshold, bands, rows);
            let error = fp.mul_add(FALSE_POSITIVE_WEIGHT, fn_ * FALSE_NEGATIVE_WEIGHT);
            if error < min_error {
                min_error = error;
                best = (bands, rows);
            }
        }
    }
    best
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn collision_probability(s: f64, bands: usize, rows: usize) -> f64 {
    1.0 - (1.0 - s.powi(rows as i32)).powi(bands as i32)
}

fn false_positive_area(threshold: f64, bands: usize, rows: usize) -> f64 {
    simpson(0.0, threshold, |s| collision_probability(s, bands, rows))
}

fn false_negative_area(threshold: f64, bands: usize, rows: usize) -> f64 {
    simpson(threshold, 1.0, |s| 1.0 - collision_probability(s, bands, rows))
}

#[allow(clippy::cast_precision_loss)]
fn simpson(lo: f64, hi: f64, f: impl Fn(f64) -> f64) -> f64 {
    if hi <= lo {
        return 0.0;
    }
    let h = (hi - lo) / INTEGRATION_STEPS as f64;
    let interior: f64 = (1..INTEGRATION_STEPS)
        .map(|i| {
            let weight = if i % 2 == 0 { 2.0 } else { 4.0 };
            weight * f((i as f64).mul_add(h, lo))
        })
        .sum();
    (f(lo) + f(hi) + interior) * h / 3.0
}

#[cfg(test)]
#[path = "lsh_tests.rs"]
mod tests;
