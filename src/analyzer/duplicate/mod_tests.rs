use indexmap::IndexMap;

use crate::error::CorpusGuardError;

use super::*;

fn record(text: &str) -> DatasetRecord {
    DatasetRecord::new(text.to_string(), IndexMap::new())
}

fn analyzer(builder: Option<&dyn SimilarityIndexBuilder>) -> DuplicateAnalyzer<'_> {
    DuplicateAnalyzer::new(20, DEFAULT_SIMILARITY_THRESHOLD, MinHashConfig::default(), builder)
}

fn long_clause(suffix: &str) -> String {
    let body = (0..40)
        .map(|i| format!("term{i}"))
        .collect::<Vec<_>>()
        .join(" ");
    format!("{body} {suffix}")
}

/// Index whose construction always fails.
struct BrokenBuilder;

impl SimilarityIndexBuilder for BrokenBuilder {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn build(&self, _threshold: f64, _num_perm: usize) -> Result<Box<dyn SimilarityIndex>> {
        Err(CorpusGuardError::SimilarityIndex("index exploded".to_string()))
    }
}

/// Index that accepts inserts and then fails on the first query.
struct FailingQueryBuilder;

struct FailingQueryIndex;

impl SimilarityIndex for FailingQueryIndex {
    fn insert(&mut self, _id: usize, _signature: &MinHashSignature) -> Result<()> {
        Ok(())
    }

    fn query(&self, _signature: &MinHashSignature) -> Result<Vec<usize>> {
        Err(CorpusGuardError::SimilarityIndex("query failed".to_string()))
    }
}

impl SimilarityIndexBuilder for FailingQueryBuilder {
    fn name(&self) -> &'static str {
        "failing-query"
    }

    fn build(&self, _threshold: f64, _num_perm: usize) -> Result<Box<dyn SimilarityIndex>> {
        Ok(Box::new(FailingQueryIndex))
    }
}

#[test]
fn exact_copies_give_two_thirds_ratio() {
    let records = vec![record("A"), record("A"), record("B")];
    let stats = analyzer(Some(&LshIndexBuilder)).analyze(&records);

    assert!((stats.duplicate_ratio - 2.0 / 3.0).abs() < 1e-9);
    assert_eq!(stats.sample_pairs, vec![(0, 1)]);
    assert_eq!(stats.exact_pairs, 1);
    assert_eq!(stats.near_pairs, 0);
    assert_eq!(stats.duplicate_indexes, BTreeSet::from([0, 1]));
    assert_eq!(
        stats.flags,
        vec!["Exact duplicates detected across 1 pair(s) (examples: (0,1))".to_string()]
    );
}

#[test]
fn canonicalization_ignores_case_and_spacing() {
    let records = vec![
        record("Binding  Arbitration applies"),
        record("binding arbitration\tAPPLIES"),
    ];
    let stats = analyzer(None).analyze(&records);
    assert_eq!(stats.sample_pairs, vec![(0, 1)]);
    assert!((stats.duplicate_ratio - 1.0).abs() < f64::EPSILON);
}

#[test]
fn k_copies_produce_all_pairwise_combinations() {
    let records = vec![record("x y"), record("z"), record("x y"), record("x y")];
    let stats = analyzer(None).analyze(&records);
    assert_eq!(stats.sample_pairs, vec![(0, 2), (0, 3), (2, 3)]);
    assert_eq!(stats.duplicate_indexes, BTreeSet::from([0, 2, 3]));
    assert!((stats.duplicate_ratio - 0.75).abs() < f64::EPSILON);
}

#[test]
fn unique_corpus_has_zero_ratio() {
    let records = vec![
        record("The agreement renews automatically each year."),
        record("You may cancel your account at any time."),
        record("Disputes are resolved by binding arbitration."),
    ];
    let stats = analyzer(Some(&LshIndexBuilder)).analyze(&records);
    assert!(stats.duplicate_ratio.abs() < f64::EPSILON);
    assert!(stats.sample_pairs.is_empty());
    assert!(stats.flags.is_empty());
}

#[test]
fn empty_texts_are_not_duplicates_of_each_other() {
    let records = vec![record(""), record("  ")];
    let stats = analyzer(Some(&LshIndexBuilder)).analyze(&records);
    assert!(stats.duplicate_ratio.abs() < f64::EPSILON);
}

#[test]
fn near_duplicates_are_detected_and_listed_after_exact_pairs() {
    let records = vec![
        record(&long_clause("alpha")),
        record("short unrelated clause here"),
        record(&long_clause("beta")),
        record("short unrelated clause here"),
    ];
    let stats = analyzer(Some(&LshIndexBuilder)).analyze(&records);

    assert_eq!(stats.exact_pairs, 1);
    assert_eq!(stats.near_pairs, 1);
    assert_eq!(stats.sample_pairs, vec![(1, 3), (0, 2)]);
    assert!((stats.duplicate_ratio - 1.0).abs() < f64::EPSILON);
    assert_eq!(
        stats.flags[1],
        "Near-duplicate pairs above 0.85 similarity: (0,2)"
    );
}

#[test]
fn single_record_skips_near_duplicate_pass() {
    let stats = analyzer(Some(&BrokenBuilder)).analyze(&[record("only one")]);
    assert!(stats.flags.is_empty());
    assert!(stats.duplicate_ratio.abs() < f64::EPSILON);
}

#[test]
fn index_construction_failure_keeps_exact_results() {
    let records = vec![record("A"), record("A"), record("B")];
    let stats = analyzer(Some(&BrokenBuilder)).analyze(&records);

    assert!((stats.duplicate_ratio - 2.0 / 3.0).abs() < 1e-9);
    assert_eq!(stats.sample_pairs, vec![(0, 1)]);
    assert!(stats.flags.iter().any(|flag| flag
        == "MinHash duplicate detection failed: Similarity index error: index exploded. \
            Falling back to exact matching results only."));
}

#[test]
fn query_failure_discards_partial_near_results() {
    let records = vec![record(&long_clause("alpha")), record(&long_clause("beta"))];
    let stats = analyzer(Some(&FailingQueryBuilder)).analyze(&records);

    assert_eq!(stats.near_pairs, 0);
    assert!(stats.duplicate_indexes.is_empty());
    assert!(stats.duplicate_ratio.abs() < f64::EPSILON);
    assert_eq!(stats.flags.len(), 1);
    assert!(stats.flags[0].starts_with("MinHash duplicate detection failed"));
}

#[test]
fn missing_index_is_flagged_as_exact_only() {
    let records = vec![record("one"), record("two")];
    let stats = analyzer(None).analyze(&records);
    assert_eq!(
        stats.flags,
        vec![
            "Similarity index unavailable; near-duplicate detection limited to exact matches."
                .to_string()
        ]
    );
}

#[test]
fn sample_pairs_respect_limit() {
    let records: Vec<DatasetRecord> = (0..5).map(|_| record("same text")).collect();
    let stats = DuplicateAnalyzer::new(3, 0.85, MinHashConfig::default(), None).analyze(&records);
    assert_eq!(stats.exact_pairs, 10);
    assert_eq!(stats.sample_pairs.len(), 3);
    assert!(stats.flags[0].starts_with("Exact duplicates detected across 10 pair(s)"));
}

#[test]
fn ratio_is_rounded_when_serialized() {
    let records = vec![record("A"), record("A"), record("B")];
    let stats = analyzer(None).analyze(&records);
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["duplicate_ratio"], serde_json::json!(0.6667));
    assert!(json.get("duplicate_indexes").is_none());
    assert_eq!(json["sample_pairs"], serde_json::json!([[0, 1]]));
}
