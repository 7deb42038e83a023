mod loader;
mod taxonomy;

pub use loader::{DatasetLoader, IntegrityResult, LoadedDataset, StructureResult};
pub use taxonomy::{BUILTIN_CATEGORIES, CategoryRegistry, LabelTaxonomy};

use indexmap::IndexMap;
use serde::Serialize;

/// Score at or above which a label counts as positive.
pub const POSITIVE_LABEL_SCORE: f64 = 0.5;

/// One validated line of a labeled dataset.
///
/// `labels` holds exactly the taxonomy labels, in taxonomy order, with
/// missing or non-numeric scores defaulted to `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRecord {
    pub text: String,
    pub labels: IndexMap<String, f64>,
}

impl DatasetRecord {
    #[must_use]
    pub const fn new(text: String, labels: IndexMap<String, f64>) -> Self {
        Self { text, labels }
    }

    /// Labels whose score is at least [`POSITIVE_LABEL_SCORE`].
    pub fn positive_labels(&self) -> impl Iterator<Item = &str> {
        self.labels
            .iter()
            .filter(|(_, score)| **score >= POSITIVE_LABEL_SCORE)
            .map(|(label, _)| label.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    #[default]
    Pass,
    Fail,
}

impl CheckStatus {
    /// `Fail` iff the finding list is non-empty.
    #[must_use]
    pub const fn from_findings<T>(findings: &[T]) -> Self {
        if findings.is_empty() {
            Self::Pass
        } else {
            Self::Fail
        }
    }

    #[must_use]
    pub const fn is_fail(self) -> bool {
        matches!(self, Self::Fail)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
        }
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
