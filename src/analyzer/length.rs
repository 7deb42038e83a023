use serde::Serialize;

use crate::dataset::DatasetRecord;

use super::join_indexes;
use super::stats::{mean, median, round_to};

/// Distribution summary of one length measure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LengthSummary {
    pub count: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub median: f64,
}

impl LengthSummary {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_lengths(lengths: &[usize]) -> Self {
        let (Some(&min), Some(&max)) = (lengths.iter().min(), lengths.iter().max()) else {
            return Self::default();
        };
        let values: Vec<f64> = lengths.iter().map(|&len| len as f64).collect();
        Self {
            count: lengths.len(),
            min,
            max,
            mean: round_to(mean(&values).unwrap_or_default(), 2),
            median: round_to(median(&values).unwrap_or_default(), 2),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LengthStats {
    pub char_stats: LengthSummary,
    pub token_stats: LengthSummary,
    pub flags: Vec<String>,
}

/// Number of whitespace-delimited tokens.
#[must_use]
pub fn token_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub struct LengthAnalyzer {
    min_tokens: usize,
    max_tokens: usize,
    sample_limit: usize,
}

impl LengthAnalyzer {
    #[must_use]
    pub const fn new(min_tokens: usize, max_tokens: usize, sample_limit: usize) -> Self {
        Self {
            min_tokens,
            max_tokens,
            sample_limit,
        }
    }

    #[must_use]
    pub fn analyze(&self, records: &[DatasetRecord]) -> LengthStats {
        let char_lengths: Vec<usize> = records.iter().map(|r| r.text.chars().count()).collect();
        let token_lengths: Vec<usize> = records.iter().map(|r| token_count(&r.text)).collect();

        let short: Vec<usize> = indexes_where(&token_lengths, |len| len < self.min_tokens);
        let long: Vec<usize> = indexes_where(&token_lengths, |len| len > self.max_tokens);

        let mut flags = Vec::new();
        if !short.is_empty() {
            flags.push(format!(
                "{} records below min token threshold (examples: {})",
                short.len(),
                join_indexes(&short[..short.len().min(self.sample_limit)])
            ));
        }
        if !long.is_empty() {
            flags.push(format!(
                "{} records above max token threshold (examples: {})",
                long.len(),
                join_indexes(&long[..long.len().min(self.sample_limit)])
            ));
        }

        LengthStats {
            char_stats: LengthSummary::from_lengths(&char_lengths),
            token_stats: LengthSummary::from_lengths(&token_lengths),
            flags,
        }
    }
}

fn indexes_where(lengths: &[usize], predicate: impl Fn(usize) -> bool) -> Vec<usize> {
    lengths
        .iter()
        .enumerate()
        .filter(|(_, len)| predicate(**len))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
#[path = "length_tests.rs"]
mod tests;
