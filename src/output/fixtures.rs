use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use serde_json::json;

use crate::analyzer::{Analyses, DedupeStats, LabelStats, LanguageStats, LengthStats, LengthSummary};
use crate::capabilities::CapabilitySummary;
use crate::config::ThresholdSet;
use crate::dataset::{CheckStatus, IntegrityResult, StructureResult};
use crate::gate::{GateCheck, GateDecision};

use super::{QcReport, ReportMetadata};

/// Report for a three-record dataset with one exact duplicate pair.
pub fn sample_report() -> QcReport {
    let metadata = ReportMetadata {
        category: "dispute_resolution".to_string(),
        version: "v2024.05.01".to_string(),
        generated_at: "2024-05-01T12:00:00Z".to_string(),
        sources: vec!["tos-archive".to_string()],
        thresholds: ThresholdSet::default(),
        dataset: "data/v2024.05.01/train.jsonl".to_string(),
        dataset_sha256: Some("ab".repeat(32)),
        record_count: 3,
        capabilities: CapabilitySummary {
            language_identifier: "heuristic".to_string(),
            similarity_index: "minhash-lsh".to_string(),
        },
    };
    let analyses = Analyses {
        length: LengthStats {
            char_stats: LengthSummary {
                count: 3,
                min: 1,
                max: 1,
                mean: 1.0,
                median: 1.0,
            },
            token_stats: LengthSummary {
                count: 3,
                min: 1,
                max: 1,
                mean: 1.0,
                median: 1.0,
            },
            flags: vec!["3 records below min token threshold (examples: 0, 1, 2)".to_string()],
        },
        language: LanguageStats {
            primary: "unknown".to_string(),
            breakdown: BTreeMap::from([("unknown".to_string(), 1.0)]),
            flags: Vec::new(),
            classification: BTreeMap::from([("unknown".to_string(), 1.0)]),
            confidence_summary: None,
        },
        dedupe: DedupeStats {
            duplicate_ratio: 2.0 / 3.0,
            sample_pairs: vec![(0, 1)],
            flags: vec!["Exact duplicates detected across 1 pair(s) (examples: (0,1))".to_string()],
            similarity_threshold: 0.85,
            exact_pairs: 1,
            near_pairs: 0,
            duplicate_indexes: BTreeSet::from([0, 1]),
        },
        labels: LabelStats {
            totals: IndexMap::from([("binding_arbitration".to_string(), 2)]),
            warnings: vec!["1 records contain no positive labels (examples: 2)".to_string()],
        },
    };
    let gates = GateDecision {
        summary: CheckStatus::Fail,
        failed_checks: vec![GateCheck::DuplicateRatio, GateCheck::LanguageMix],
        warnings: vec![
            "3 records below min token threshold (examples: 0, 1, 2)".to_string(),
            "1 records contain no positive labels (examples: 2)".to_string(),
        ],
    };
    QcReport::new(
        metadata,
        IntegrityResult::default(),
        StructureResult::default(),
        analyses,
        json!({"batch": 7}),
        gates,
    )
}
