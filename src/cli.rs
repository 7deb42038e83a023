use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::analyzer::DEFAULT_SAMPLE_LIMIT;
use crate::analyzer::duplicate::{DEFAULT_NUM_PERM, DEFAULT_SHINGLE_SIZE};
use crate::analyzer::language::DEFAULT_CONFIDENCE_THRESHOLD;
use crate::config::{THRESHOLDS_FILE_NAME, ThresholdOverrides};

/// Output format for listing commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON document
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "corpus-guard")]
#[command(author, version, about = "Quality gate for labeled JSONL clause datasets")]
#[command(long_about = "Validate a labeled JSONL dataset and write a pass/fail quality report.\n\n\
    Exit codes:\n  \
    0 - Gate passed\n  \
    1 - Gate failed (or warnings with --fail-on-warning)\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress and completion messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the quality gate over a dataset
    Check(CheckArgs),

    /// Show the effective thresholds for a category and where each came from
    Thresholds(ThresholdsArgs),

    /// List known categories and their labels
    Categories(CategoriesArgs),

    /// Write a threshold override template
    Init(InitArgs),
}

/// Threshold override flags and override file selection.
#[derive(Args, Debug, Clone, Default)]
pub struct ThresholdArgs {
    /// Maximum fraction of records involved in duplicates
    #[arg(long, value_parser = parse_fraction)]
    pub max_duplicate_ratio: Option<f64>,

    /// Maximum non-English probability mass
    #[arg(long, value_parser = parse_fraction, alias = "max-non-primary-language-fraction")]
    pub max_non_primary_language: Option<f64>,

    /// Records with fewer tokens are flagged
    #[arg(long)]
    pub min_tokens: Option<usize>,

    /// Records with more tokens are flagged
    #[arg(long)]
    pub max_tokens: Option<usize>,

    /// Minimum estimated Jaccard similarity for near duplicates
    #[arg(long, value_parser = parse_similarity)]
    pub minhash_similarity_threshold: Option<f64>,

    /// Threshold override file (TOML, or JSON by extension)
    #[arg(long, value_name = "FILE")]
    pub thresholds: Option<PathBuf>,

    /// Ignore any discovered threshold override file
    #[arg(long, conflicts_with = "thresholds")]
    pub no_thresholds_file: bool,
}

impl ThresholdArgs {
    #[must_use]
    pub const fn overrides(&self) -> ThresholdOverrides {
        ThresholdOverrides {
            max_duplicate_ratio: self.max_duplicate_ratio,
            max_non_primary_language: self.max_non_primary_language,
            min_tokens: self.min_tokens,
            max_tokens: self.max_tokens,
            minhash_similarity_threshold: self.minhash_similarity_threshold,
        }
    }
}

#[derive(Args, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckArgs {
    /// Dataset category; selects the label taxonomy
    #[arg(short, long)]
    pub category: String,

    /// Path to the JSONL dataset
    #[arg(short, long)]
    pub dataset: PathBuf,

    /// Manifest JSON merged verbatim into the report
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Comma-separated source identifiers recorded in metadata
    #[arg(long, value_delimiter = ',')]
    pub sources: Vec<String>,

    /// Dataset version (inferred from the dataset path when omitted)
    #[arg(long = "version", value_name = "VERSION")]
    pub dataset_version: Option<String>,

    /// Report directory [default: reports/qc/<category>/<version>]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Also write qc_report.md
    #[arg(long)]
    pub write_markdown: bool,

    /// Exit non-zero when the gate passes with warnings
    #[arg(long)]
    pub fail_on_warning: bool,

    /// Maximum example indices or pairs listed per finding
    #[arg(long, default_value_t = DEFAULT_SAMPLE_LIMIT)]
    pub sample_limit: usize,

    /// Category taxonomy file adding to the built-in categories
    #[arg(long, value_name = "FILE")]
    pub taxonomy: Option<PathBuf>,

    #[command(flatten)]
    pub threshold_args: ThresholdArgs,

    /// Minimum identifier confidence before the heuristic label is used
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE_THRESHOLD, value_parser = parse_fraction)]
    pub language_confidence: f64,

    /// Words per MinHash shingle
    #[arg(long, default_value_t = DEFAULT_SHINGLE_SIZE, value_parser = parse_positive)]
    pub shingle_size: usize,

    /// MinHash permutations per signature
    #[arg(long, default_value_t = DEFAULT_NUM_PERM, value_parser = parse_positive)]
    pub num_perm: usize,

    /// Use the stop-word heuristic instead of the language identifier
    #[arg(long)]
    pub heuristic_language: bool,

    /// Detect exact duplicates only
    #[arg(long)]
    pub exact_only: bool,
}

#[derive(Args, Debug)]
pub struct ThresholdsArgs {
    /// Dataset category
    #[arg(short, long)]
    pub category: String,

    /// Category taxonomy file adding to the built-in categories
    #[arg(long, value_name = "FILE")]
    pub taxonomy: Option<PathBuf>,

    #[command(flatten)]
    pub threshold_args: ThresholdArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ListFormat,
}

#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// Category taxonomy file adding to the built-in categories
    #[arg(long, value_name = "FILE")]
    pub taxonomy: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ListFormat,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Output path for the template
    #[arg(short, long, default_value = THRESHOLDS_FILE_NAME)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

fn parse_fraction(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not between 0 and 1"))
    }
}

fn parse_similarity(s: &str) -> Result<f64, String> {
    let value = parse_fraction(s)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err("similarity threshold must be greater than 0".to_string())
    }
}

fn parse_positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("value must be at least 1".to_string()),
        Ok(value) => Ok(value),
        Err(_) => Err(format!("'{s}' is not a positive integer")),
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
