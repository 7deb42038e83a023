use indexmap::IndexMap;
use serde::Serialize;

use crate::dataset::{DatasetRecord, LabelTaxonomy};

use super::join_indexes;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelStats {
    /// Positive count per taxonomy label, in taxonomy order.
    pub totals: IndexMap<String, usize>,
    pub warnings: Vec<String>,
}

pub struct LabelAnalyzer {
    sample_limit: usize,
}

impl LabelAnalyzer {
    #[must_use]
    pub const fn new(sample_limit: usize) -> Self {
        Self { sample_limit }
    }

    #[must_use]
    pub fn analyze(&self, records: &[DatasetRecord], taxonomy: &LabelTaxonomy) -> LabelStats {
        let mut totals: IndexMap<String, usize> =
            taxonomy.labels().map(|label| (label.to_string(), 0)).collect();
        let mut unlabeled = Vec::new();

        for (idx, record) in records.iter().enumerate() {
            let mut positive = false;
            for label in record.positive_labels() {
                if let Some(count) = totals.get_mut(label) {
                    *count += 1;
                    positive = true;
                }
            }
            if !positive {
                unlabeled.push(idx);
            }
        }

        let mut warnings = Vec::new();
        if !unlabeled.is_empty() {
            warnings.push(format!(
                "{} records contain no positive labels (examples: {})",
                unlabeled.len(),
                join_indexes(&unlabeled[..unlabeled.len().min(self.sample_limit)])
            ));
        }
        LabelStats { totals, warnings }
    }
}
