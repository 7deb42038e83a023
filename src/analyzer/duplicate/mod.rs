//! Exact and near-duplicate detection.
//!
//! Exact duplicates share a canonical text (lowercased, whitespace
//! collapsed). Near duplicates are found by MinHash signatures bucketed in a
//! [`SimilarityIndex`] and then verified against the similarity threshold.
//! A failing index never aborts the run: its partial results are dropped and
//! the exact-match results stand on their own.

mod lsh;
mod minhash;
mod shingle;

pub use lsh::{LshIndex, LshIndexBuilder, SimilarityIndex, SimilarityIndexBuilder, optimal_params};
pub use minhash::{
    DEFAULT_NUM_PERM, DEFAULT_SHINGLE_SIZE, MinHashConfig, MinHashSignature, MinHasher,
};
pub use shingle::{canonicalize, word_shingles};

use std::collections::{BTreeSet, HashSet};

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::dataset::DatasetRecord;
use crate::error::Result;

use super::stats::round_to;

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.85;

pub type IndexPair = (usize, usize);

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DedupeStats {
    /// Fraction of records involved in any duplicate pair.
    #[serde(serialize_with = "serialize_ratio")]
    pub duplicate_ratio: f64,
    /// Exact pairs followed by near pairs, capped at the sample limit.
    pub sample_pairs: Vec<IndexPair>,
    pub flags: Vec<String>,
    #[serde(serialize_with = "serialize_ratio")]
    pub similarity_threshold: f64,
    pub exact_pairs: usize,
    pub near_pairs: usize,
    #[serde(skip)]
    pub duplicate_indexes: BTreeSet<usize>,
}

fn serialize_ratio<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 4))
}

pub struct DuplicateAnalyzer<'a> {
    sample_limit: usize,
    similarity_threshold: f64,
    minhash: MinHashConfig,
    index_builder: Option<&'a dyn SimilarityIndexBuilder>,
}

impl<'a> DuplicateAnalyzer<'a> {
    /// `index_builder = None` restricts detection to exact matches.
    #[must_use]
    pub const fn new(
        sample_limit: usize,
        similarity_threshold: f64,
        minhash: MinHashConfig,
        index_builder: Option<&'a dyn SimilarityIndexBuilder>,
    ) -> Self {
        Self {
            sample_limit,
            similarity_threshold,
            minhash,
            index_builder,
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn analyze(&self, records: &[DatasetRecord]) -> DedupeStats {
        let mut duplicate_indexes = BTreeSet::new();
        let exact = exact_pairs(records, &mut duplicate_indexes);
        let mut flags = Vec::new();
        if !exact.is_empty() {
            flags.push(format!(
                "Exact duplicates detected across {} pair(s) (examples: {})",
                exact.len(),
                format_pairs(&exact[..exact.len().min(self.sample_limit)])
            ));
        }

        let mut near = Vec::new();
        match self.index_builder {
            Some(builder) if records.len() > 1 => {
                let exact_set: HashSet<IndexPair> = exact.iter().copied().collect();
                match self.near_pairs(builder, records) {
                    Ok(found) => {
                        near = found
                            .into_iter()
                            .filter(|pair| !exact_set.contains(pair))
                            .collect();
                        for &(a, b) in &near {
                            duplicate_indexes.insert(a);
                            duplicate_indexes.insert(b);
                        }
                    }
                    Err(err) => {
                        warn!(index = builder.name(), error = %err, "near-duplicate detection failed");
                        flags.push(format!(
                            "MinHash duplicate detection failed: {err}. Falling back to exact matching results only."
                        ));
                    }
                }
            }
            Some(_) => {}
            None => flags.push(
                "Similarity index unavailable; near-duplicate detection limited to exact matches."
                    .to_string(),
            ),
        }
        if !near.is_empty() {
            flags.push(format!(
                "Near-duplicate pairs above {:.2} similarity: {}",
                self.similarity_threshold,
                format_pairs(&near[..near.len().min(self.sample_limit)])
            ));
        }

        let duplicate_ratio = if records.is_empty() || duplicate_indexes.is_empty() {
            0.0
        } else {
            duplicate_indexes.len() as f64 / records.len() as f64
        };
        debug!(
            exact = exact.len(),
            near = near.len(),
            ratio = duplicate_ratio,
            "duplicate analysis complete"
        );

        let sample_pairs = exact
            .iter()
            .chain(&near)
            .take(self.sample_limit)
            .copied()
            .collect();
        DedupeStats {
            duplicate_ratio,
            sample_pairs,
            flags,
            similarity_threshold: self.similarity_threshold,
            exact_pairs: exact.len(),
            near_pairs: near.len(),
            duplicate_indexes,
        }
    }

    /// Candidate pairs `(i, j)` with `i < j`, ascending, whose signature
    /// similarity reaches the threshold.
    fn near_pairs(
        &self,
        builder: &dyn SimilarityIndexBuilder,
        records: &[DatasetRecord],
    ) -> Result<Vec<IndexPair>> {
        let hasher = MinHasher::new(self.minhash);
        let signatures: Vec<Option<MinHashSignature>> = records
            .par_iter()
            .map(|record| hasher.signature(&record.text))
            .collect();

        let mut index = builder.build(self.similarity_threshold, self.minhash.num_perm)?;
        for (id, signature) in signatures.iter().enumerate() {
            if let Some(signature) = signature {
                index.insert(id, signature)?;
            }
        }

        let mut pairs = BTreeSet::new();
        for (i, signature) in signatures.iter().enumerate() {
            let Some(signature) = signature else {
                continue;
            };
            for j in index.query(signature)? {
                if j <= i {
                    continue;
                }
                if let Some(Some(other)) = signatures.get(j)
                    && signature.jaccard(other) >= self.similarity_threshold
                {
                    pairs.insert((i, j));
                }
            }
        }
        Ok(pairs.into_iter().collect())
    }
}

/// All index pairs within each canonical-text group, groups in order of
/// first appearance.
fn exact_pairs(records: &[DatasetRecord], duplicate_indexes: &mut BTreeSet<usize>) -> Vec<IndexPair> {
    let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
    for (idx, record) in records.iter().enumerate() {
        let canonical = canonicalize(&record.text);
        if canonical.is_empty() {
            continue;
        }
        groups.entry(canonical).or_default().push(idx);
    }

    let mut pairs = Vec::new();
    for indexes in groups.values().filter(|group| group.len() > 1) {
        duplicate_indexes.extend(indexes.iter().copied());
        for (pos, &a) in indexes.iter().enumerate() {
            for &b in &indexes[pos + 1..] {
                pairs.push((a, b));
            }
        }
    }
    pairs
}

fn format_pairs(pairs: &[IndexPair]) -> String {
    pairs
        .iter()
        .map(|(a, b)| format!("({a},{b})"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
