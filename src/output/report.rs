use serde::Serialize;
use serde_json::Value;

use crate::analyzer::{Analyses, DedupeStats, LabelStats, LanguageStats, LengthStats};
use crate::capabilities::CapabilitySummary;
use crate::config::ThresholdSet;
use crate::dataset::{IntegrityResult, StructureResult};
use crate::gate::GateDecision;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub category: String,
    pub version: String,
    /// RFC 3339 UTC timestamp.
    pub generated_at: String,
    pub sources: Vec<String>,
    pub thresholds: ThresholdSet,
    pub dataset: String,
    pub dataset_sha256: Option<String>,
    pub record_count: usize,
    pub capabilities: CapabilitySummary,
}

/// Everything one quality-gate run produced. Serialized as the JSON report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QcReport {
    pub metadata: ReportMetadata,
    pub integrity: IntegrityResult,
    pub structure: StructureResult,
    pub length: LengthStats,
    pub language: LanguageStats,
    pub dedupe: DedupeStats,
    pub labels: LabelStats,
    pub manifest: Value,
    pub gates: GateDecision,
}

impl QcReport {
    #[must_use]
    pub fn new(
        metadata: ReportMetadata,
        integrity: IntegrityResult,
        structure: StructureResult,
        analyses: Analyses,
        manifest: Value,
        gates: GateDecision,
    ) -> Self {
        let Analyses {
            length,
            language,
            dedupe,
            labels,
        } = analyses;
        Self {
            metadata,
            integrity,
            structure,
            length,
            language,
            dedupe,
            labels,
            manifest,
            gates,
        }
    }
}
