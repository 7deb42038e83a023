use time::OffsetDateTime;
use tracing::info;

use crate::analyzer::duplicate::MinHashConfig;
use crate::analyzer::language::LanguageConfig;
use crate::analyzer::{
    AnalyzerSuite, DuplicateAnalyzer, LabelAnalyzer, LanguageAnalyzer, LengthAnalyzer, run_all,
};
use crate::capabilities::Capabilities;
use crate::cli::CheckArgs;
use crate::config::ThresholdSet;
use crate::dataset::{DatasetLoader, LabelTaxonomy};
use crate::error::Result;
use crate::gate::GateEngine;
use crate::output::{LoadProgress, QcReport, ReportMetadata};

use super::metadata::{infer_version, load_manifest, parse_sources, timestamp};

/// Everything a check run needs besides the command-line arguments.
pub struct CheckOptions<'a> {
    pub args: &'a CheckArgs,
    pub taxonomy: &'a LabelTaxonomy,
    pub thresholds: &'a ThresholdSet,
    pub capabilities: &'a Capabilities,
    pub progress: &'a LoadProgress,
    pub now: OffsetDateTime,
}

/// Load the dataset, run every analyzer and evaluate the gate.
///
/// # Errors
/// Returns an error if report metadata cannot be formatted.
pub fn build_report(options: &CheckOptions<'_>) -> Result<QcReport> {
    let args = options.args;
    let thresholds = options.thresholds;

    let loaded = DatasetLoader::new(options.taxonomy)
        .with_progress(options.progress)
        .load(&args.dataset);
    options.progress.finish();

    let suite = AnalyzerSuite {
        length: LengthAnalyzer::new(thresholds.min_tokens, thresholds.max_tokens, args.sample_limit),
        language: LanguageAnalyzer::new(
            options.capabilities.language_identifier(),
            LanguageConfig::default().with_confidence_threshold(args.language_confidence),
            args.sample_limit,
        ),
        duplicate: DuplicateAnalyzer::new(
            args.sample_limit,
            thresholds.minhash_similarity_threshold,
            MinHashConfig {
                num_perm: args.num_perm,
                shingle_size: args.shingle_size,
                ..MinHashConfig::default()
            },
            options.capabilities.similarity_index(),
        ),
        label: LabelAnalyzer::new(args.sample_limit),
    };
    let analyses = run_all(&suite, &loaded.records, options.taxonomy);

    let gates = GateEngine::new(thresholds).evaluate(&loaded.integrity, &loaded.structure, &analyses);
    info!(
        records = loaded.records.len(),
        summary = gates.summary.as_str(),
        "quality gate evaluated"
    );

    let metadata = ReportMetadata {
        category: options.taxonomy.category().to_string(),
        version: infer_version(&args.dataset, args.dataset_version.as_deref(), options.now.date())?,
        generated_at: timestamp(options.now)?,
        sources: parse_sources(&args.sources),
        thresholds: *thresholds,
        dataset: args.dataset.display().to_string(),
        dataset_sha256: loaded.sha256,
        record_count: loaded.records.len(),
        capabilities: options.capabilities.summary(),
    };

    Ok(QcReport::new(
        metadata,
        loaded.integrity,
        loaded.structure,
        analyses,
        load_manifest(args.manifest.as_deref()),
        gates,
    ))
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
