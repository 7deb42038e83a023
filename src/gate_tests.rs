use std::collections::BTreeMap;

use crate::analyzer::{DedupeStats, LabelStats, LanguageStats, LengthStats};

use super::*;

fn english(flags: &[&str]) -> LanguageStats {
    LanguageStats {
        primary: "en".to_string(),
        breakdown: BTreeMap::from([("en".to_string(), 1.0)]),
        flags: flags.iter().map(ToString::to_string).collect(),
        ..LanguageStats::default()
    }
}

fn clean_analyses() -> Analyses {
    Analyses {
        length: LengthStats::default(),
        language: english(&[]),
        dedupe: DedupeStats::default(),
        labels: LabelStats::default(),
    }
}

fn evaluate(analyses: &Analyses) -> GateDecision {
    let thresholds = ThresholdSet::default();
    GateEngine::new(&thresholds).evaluate(
        &IntegrityResult::default(),
        &StructureResult::default(),
        analyses,
    )
}

#[test]
fn clean_run_passes() {
    let decision = evaluate(&clean_analyses());
    assert_eq!(decision.summary, CheckStatus::Pass);
    assert!(decision.failed_checks.is_empty());
    assert!(decision.warnings.is_empty());
    assert_eq!(decision.exit_code(true), EXIT_SUCCESS);
}

#[test]
fn duplicate_ratio_over_threshold_fails() {
    let mut analyses = clean_analyses();
    analyses.dedupe.duplicate_ratio = 0.10;
    analyses.dedupe.flags = vec!["Exact duplicates detected across 1 pair(s) (examples: (0,1))".into()];

    let decision = evaluate(&analyses);
    assert_eq!(decision.summary, CheckStatus::Fail);
    assert_eq!(decision.failed_checks, vec![GateCheck::DuplicateRatio]);
    assert!(decision.warnings.is_empty());
    assert_eq!(decision.exit_code(false), EXIT_GATE_FAILED);
}

#[test]
fn ratio_equal_to_threshold_passes() {
    let mut analyses = clean_analyses();
    analyses.dedupe.duplicate_ratio = 0.05;
    analyses.dedupe.flags = vec!["dup flag".into()];
    let decision = evaluate(&analyses);
    assert_eq!(decision.summary, CheckStatus::Pass);
    assert_eq!(decision.warnings, vec!["dup flag".to_string()]);
}

#[test]
fn language_mix_uses_english_mass() {
    let mut analyses = clean_analyses();
    analyses.language.breakdown =
        BTreeMap::from([("en".to_string(), 0.8), ("fr".to_string(), 0.2)]);
    analyses.language.flags = vec!["mass flag".into()];

    let decision = evaluate(&analyses);
    assert_eq!(decision.failed_checks, vec![GateCheck::LanguageMix]);
    assert!(decision.has_failed(GateCheck::LanguageMix));
    assert!(decision.warnings.is_empty());
}

#[test]
fn integrity_and_structure_failures_come_first() {
    let thresholds = ThresholdSet::default();
    let mut analyses = clean_analyses();
    analyses.dedupe.duplicate_ratio = 0.5;
    let decision = GateEngine::new(&thresholds).evaluate(
        &IntegrityResult::new(vec!["Line 2: JSON decode error: eof".into()]),
        &StructureResult::new(vec!["Line 3: Missing or empty text field".into()]),
        &analyses,
    );
    assert_eq!(
        decision.failed_checks,
        vec![GateCheck::Integrity, GateCheck::Structure, GateCheck::DuplicateRatio]
    );
}

#[test]
fn warnings_keep_analyzer_order() {
    let mut analyses = clean_analyses();
    analyses.length.flags = vec!["length".into()];
    analyses.language = english(&["language"]);
    analyses.dedupe.flags = vec!["dedupe".into()];
    analyses.labels.warnings = vec!["labels".into()];

    let decision = evaluate(&analyses);
    assert_eq!(decision.summary, CheckStatus::Pass);
    assert_eq!(decision.warnings, vec!["length", "language", "dedupe", "labels"]);
    assert_eq!(decision.exit_code(false), EXIT_SUCCESS);
    assert_eq!(decision.exit_code(true), EXIT_GATE_FAILED);
}

#[test]
fn decision_serializes_check_names() {
    let mut analyses = clean_analyses();
    analyses.dedupe.duplicate_ratio = 1.0;
    let value = serde_json::to_value(evaluate(&analyses)).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "summary": "fail",
            "failed_checks": ["duplicate_ratio"],
            "warnings": [],
        })
    );
}
