mod heuristic;
mod identifier;

pub use heuristic::{
    DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_STOPWORDS, LABEL_ENGLISH, LABEL_MIXED, LABEL_UNKNOWN,
    LanguageConfig,
};
#[cfg(feature = "whatlang")]
pub use identifier::WhatlangIdentifier;
pub use identifier::{LanguageCandidate, LanguageIdentifier, iso_639_1};

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::dataset::DatasetRecord;

use super::join_indexes;
use super::stats::{mean, median, round_to};

/// Outcome of classifying one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub label: String,
    pub confidence: f64,
    /// Probability mass per language code contributed by this record.
    pub distribution: BTreeMap<String, f64>,
}

impl Detection {
    fn certain(label: &str) -> Self {
        Self {
            label: label.to_string(),
            confidence: 0.0,
            distribution: BTreeMap::from([(label.to_string(), 1.0)]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceSummary {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LanguageStats {
    /// Language with the largest averaged probability mass.
    pub primary: String,
    /// Probability mass per language, averaged over all records.
    pub breakdown: BTreeMap<String, f64>,
    pub flags: Vec<String>,
    /// Fraction of records whose final label is each language.
    pub classification: BTreeMap<String, f64>,
    pub confidence_summary: Option<ConfidenceSummary>,
}

impl LanguageStats {
    /// `1 - breakdown["en"]`.
    #[must_use]
    pub fn non_primary_fraction(&self) -> f64 {
        1.0 - self.breakdown.get(LABEL_ENGLISH).copied().unwrap_or(0.0)
    }
}

/// Classifies each record's language and aggregates corpus composition.
///
/// Without an identifier every record goes through the stop-word heuristic
/// with zero confidence.
pub struct LanguageAnalyzer<'a> {
    identifier: Option<&'a dyn LanguageIdentifier>,
    config: LanguageConfig,
    sample_limit: usize,
}

impl<'a> LanguageAnalyzer<'a> {
    #[must_use]
    pub fn new(
        identifier: Option<&'a dyn LanguageIdentifier>,
        config: LanguageConfig,
        sample_limit: usize,
    ) -> Self {
        Self {
            identifier,
            config,
            sample_limit,
        }
    }

    #[must_use]
    pub fn detect(&self, text: &str) -> Detection {
        let stripped = text.trim();
        if stripped.is_empty() {
            return Detection::certain(LABEL_UNKNOWN);
        }

        if let Some(identifier) = self.identifier {
            let candidates = identifier.identify(stripped);
            if let Some(top) = top_candidate(&candidates) {
                if top.probability < self.config.confidence_threshold {
                    return Detection {
                        confidence: top.probability,
                        ..Detection::certain(self.config.heuristic_label(stripped))
                    };
                }
                return Detection {
                    label: top.code.to_lowercase(),
                    confidence: top.probability,
                    distribution: normalized_distribution(&candidates, top),
                };
            }
        }

        Detection::certain(self.config.heuristic_label(stripped))
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn analyze(&self, records: &[DatasetRecord]) -> LanguageStats {
        let detections: Vec<Detection> = records.par_iter().map(|r| self.detect(&r.text)).collect();

        let mut label_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut probability_totals: BTreeMap<String, f64> = BTreeMap::new();
        let mut non_english_samples = Vec::new();
        let mut low_confidence_samples = Vec::new();
        let mut confidences = Vec::new();

        for (idx, detection) in detections.iter().enumerate() {
            *label_counts.entry(detection.label.clone()).or_insert(0) += 1;
            if detection.confidence > 0.0 {
                confidences.push(detection.confidence);
            }
            let is_english = detection.label == LABEL_ENGLISH;
            if !is_english && non_english_samples.len() < self.sample_limit {
                non_english_samples.push(idx);
            }
            if is_english
                && detection.confidence < self.config.confidence_threshold
                && low_confidence_samples.len() < self.sample_limit
            {
                low_confidence_samples.push(idx);
            }
            for (code, probability) in &detection.distribution {
                *probability_totals.entry(code.clone()).or_insert(0.0) += probability;
            }
        }

        let total = records.len() as f64;
        let breakdown: BTreeMap<String, f64> = if records.is_empty() {
            BTreeMap::new()
        } else {
            probability_totals
                .into_iter()
                .map(|(code, mass)| (code, round_to(mass / total, 4)))
                .collect()
        };
        let classification: BTreeMap<String, f64> = if records.is_empty() {
            BTreeMap::new()
        } else {
            label_counts
                .into_iter()
                .map(|(label, count)| (label, round_to(count as f64 / total, 4)))
                .collect()
        };

        let primary = primary_language(&breakdown);
        let confidence_summary = summarize_confidences(&confidences);

        let mut stats = LanguageStats {
            primary,
            breakdown,
            flags: Vec::new(),
            classification,
            confidence_summary,
        };

        let non_primary = stats.non_primary_fraction();
        if non_primary > 0.0 && !non_english_samples.is_empty() {
            stats.flags.push(format!(
                "{:.2}% of language probability mass attributed to non-English languages (examples: {})",
                non_primary * 100.0,
                join_indexes(&non_english_samples)
            ));
        }
        if !low_confidence_samples.is_empty() {
            stats.flags.push(format!(
                "Detected low-confidence English classifications (examples: {})",
                join_indexes(&low_confidence_samples)
            ));
        }

        debug!(
            primary = %stats.primary,
            languages = stats.breakdown.len(),
            identifier = self.identifier.map_or("heuristic", |i| i.name()),
            "language analysis complete"
        );
        stats
    }
}

/// Highest-probability candidate; the earliest wins ties.
fn top_candidate(candidates: &[LanguageCandidate]) -> Option<&LanguageCandidate> {
    candidates.iter().fold(None, |best, candidate| match best {
        Some(current) if current.probability >= candidate.probability => Some(current),
        _ => Some(candidate),
    })
}

/// Candidate scores rescaled to sum to 1; the top candidate takes all mass
/// when no score is positive.
fn normalized_distribution(
    candidates: &[LanguageCandidate],
    top: &LanguageCandidate,
) -> BTreeMap<String, f64> {
    let total: f64 = candidates.iter().map(|c| c.probability.max(0.0)).sum();
    if total <= 0.0 {
        return BTreeMap::from([(top.code.to_lowercase(), 1.0)]);
    }
    let mut distribution = BTreeMap::new();
    for candidate in candidates {
        *distribution
            .entry(candidate.code.to_lowercase())
            .or_insert(0.0) += candidate.probability.max(0.0) / total;
    }
    distribution
}

/// Arg-max of the breakdown; the alphabetically first language wins ties.
fn primary_language(breakdown: &BTreeMap<String, f64>) -> String {
    breakdown
        .iter()
        .fold(None::<(&String, f64)>, |best, (code, &mass)| match best {
            Some((_, best_mass)) if best_mass >= mass => best,
            _ => Some((code, mass)),
        })
        .map_or_else(|| LABEL_UNKNOWN.to_string(), |(code, _)| code.clone())
}

fn summarize_confidences(confidences: &[f64]) -> Option<ConfidenceSummary> {
    let min = confidences.iter().copied().reduce(f64::min)?;
    Some(ConfidenceSummary {
        mean: round_to(mean(confidences)?, 3),
        median: round_to(median(confidences)?, 3),
        min: round_to(min, 3),
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
