//! Read-only analyzers over a loaded record list.
//!
//! Each analyzer owns its tunables and produces an independent result; none
//! reads another's output, so [`run_all`] may evaluate them concurrently.

pub mod duplicate;
pub mod label;
pub mod language;
pub mod length;
mod stats;

pub use duplicate::{DedupeStats, DuplicateAnalyzer};
pub use label::{LabelAnalyzer, LabelStats};
pub use language::{LanguageAnalyzer, LanguageStats};
pub use length::{LengthAnalyzer, LengthStats, LengthSummary};

use crate::dataset::{DatasetRecord, LabelTaxonomy};

/// Default cap on example indices/pairs carried in flags and reports.
pub const DEFAULT_SAMPLE_LIMIT: usize = 20;

/// Outputs of the four record analyzers for one run.
#[derive(Debug, Clone)]
pub struct Analyses {
    pub length: LengthStats,
    pub language: LanguageStats,
    pub dedupe: DedupeStats,
    pub labels: LabelStats,
}

/// Configured analyzers for one run.
pub struct AnalyzerSuite<'a> {
    pub length: LengthAnalyzer,
    pub language: LanguageAnalyzer<'a>,
    pub duplicate: DuplicateAnalyzer<'a>,
    pub label: LabelAnalyzer,
}

/// Run every analyzer over the same records, in parallel.
#[must_use]
pub fn run_all(
    suite: &AnalyzerSuite<'_>,
    records: &[DatasetRecord],
    taxonomy: &LabelTaxonomy,
) -> Analyses {
    let ((length, labels), (language, dedupe)) = rayon::join(
        || {
            (
                suite.length.analyze(records),
                suite.label.analyze(records, taxonomy),
            )
        },
        || {
            rayon::join(
                || suite.language.analyze(records),
                || suite.duplicate.analyze(records),
            )
        },
    );

    Analyses {
        length,
        language,
        dedupe,
        labels,
    }
}

/// Render record indices as `"1, 4, 9"`.
pub(crate) fn join_indexes(indexes: &[usize]) -> String {
    indexes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
