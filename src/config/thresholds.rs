//! Gate thresholds and their layered resolution.
//!
//! Precedence, lowest to highest: built-in defaults, the override file's
//! `[defaults]` table, its `[categories.<name>]` table, then CLI flags.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use super::loader::OverrideFile;

pub const DEFAULT_MAX_DUPLICATE_RATIO: f64 = 0.05;
pub const DEFAULT_MAX_NON_PRIMARY_LANGUAGE: f64 = 0.10;
pub const DEFAULT_MIN_TOKENS: usize = 5;
pub const DEFAULT_MAX_TOKENS: usize = 3000;
pub const DEFAULT_MINHASH_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Effective thresholds for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdSet {
    pub max_duplicate_ratio: f64,
    pub max_non_primary_language: f64,
    pub min_tokens: usize,
    pub max_tokens: usize,
    pub minhash_similarity_threshold: f64,
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self {
            max_duplicate_ratio: DEFAULT_MAX_DUPLICATE_RATIO,
            max_non_primary_language: DEFAULT_MAX_NON_PRIMARY_LANGUAGE,
            min_tokens: DEFAULT_MIN_TOKENS,
            max_tokens: DEFAULT_MAX_TOKENS,
            minhash_similarity_threshold: DEFAULT_MINHASH_SIMILARITY_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ThresholdKey {
    MaxDuplicateRatio,
    MaxNonPrimaryLanguage,
    MinTokens,
    MaxTokens,
    MinhashSimilarityThreshold,
}

impl ThresholdKey {
    pub const ALL: [Self; 5] = [
        Self::MaxDuplicateRatio,
        Self::MaxNonPrimaryLanguage,
        Self::MinTokens,
        Self::MaxTokens,
        Self::MinhashSimilarityThreshold,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MaxDuplicateRatio => "max_duplicate_ratio",
            Self::MaxNonPrimaryLanguage => "max_non_primary_language",
            Self::MinTokens => "min_tokens",
            Self::MaxTokens => "max_tokens",
            Self::MinhashSimilarityThreshold => "minhash_similarity_threshold",
        }
    }

    /// Parse a config key, accepting `max_non_primary_language_fraction`
    /// as an alias.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "max_non_primary_language_fraction" => Some(Self::MaxNonPrimaryLanguage),
            _ => Self::ALL.into_iter().find(|k| k.as_str() == key),
        }
    }

    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::MinTokens | Self::MaxTokens)
    }
}

impl fmt::Display for ThresholdKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ThresholdKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl ThresholdSet {
    /// Coerce `value` for `key` and store it.
    ///
    /// Integer keys accept non-negative numbers (fractions truncate) and
    /// numeric strings; ratio keys must lie in `[0, 1]` and the similarity
    /// threshold in `(0, 1]`.
    ///
    /// # Errors
    /// Returns a description of why the value was rejected; `self` is left
    /// unchanged.
    pub fn apply(&mut self, key: ThresholdKey, value: &Value) -> Result<(), String> {
        let number = numeric(value).ok_or_else(|| format!("expected a number, got {value}"))?;
        if !number.is_finite() {
            return Err(format!("expected a finite number, got {value}"));
        }
        match key {
            ThresholdKey::MinTokens | ThresholdKey::MaxTokens => {
                if number < 0.0 {
                    return Err(format!("expected a non-negative integer, got {value}"));
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let count = number.trunc() as usize;
                if key == ThresholdKey::MinTokens {
                    self.min_tokens = count;
                } else {
                    self.max_tokens = count;
                }
            }
            ThresholdKey::MaxDuplicateRatio | ThresholdKey::MaxNonPrimaryLanguage => {
                if !(0.0..=1.0).contains(&number) {
                    return Err(format!("expected a fraction between 0 and 1, got {value}"));
                }
                if key == ThresholdKey::MaxDuplicateRatio {
                    self.max_duplicate_ratio = number;
                } else {
                    self.max_non_primary_language = number;
                }
            }
            ThresholdKey::MinhashSimilarityThreshold => {
                if number <= 0.0 || number > 1.0 {
                    return Err(format!("expected a similarity in (0, 1], got {value}"));
                }
                self.minhash_similarity_threshold = number;
            }
        }
        Ok(())
    }

    /// Value of `key` as JSON, integers for token bounds.
    #[must_use]
    pub fn get(&self, key: ThresholdKey) -> Value {
        match key {
            ThresholdKey::MaxDuplicateRatio => Value::from(self.max_duplicate_ratio),
            ThresholdKey::MaxNonPrimaryLanguage => Value::from(self.max_non_primary_language),
            ThresholdKey::MinTokens => Value::from(self.min_tokens),
            ThresholdKey::MaxTokens => Value::from(self.max_tokens),
            ThresholdKey::MinhashSimilarityThreshold => {
                Value::from(self.minhash_similarity_threshold)
            }
        }
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// CLI-supplied overrides; `None` leaves the lower layers in effect.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThresholdOverrides {
    pub max_duplicate_ratio: Option<f64>,
    pub max_non_primary_language: Option<f64>,
    pub min_tokens: Option<usize>,
    pub max_tokens: Option<usize>,
    pub minhash_similarity_threshold: Option<f64>,
}

impl ThresholdOverrides {
    fn entries(&self) -> Vec<(ThresholdKey, Value)> {
        let mut entries = Vec::new();
        if let Some(v) = self.max_duplicate_ratio {
            entries.push((ThresholdKey::MaxDuplicateRatio, Value::from(v)));
        }
        if let Some(v) = self.max_non_primary_language {
            entries.push((ThresholdKey::MaxNonPrimaryLanguage, Value::from(v)));
        }
        if let Some(v) = self.min_tokens {
            entries.push((ThresholdKey::MinTokens, Value::from(v)));
        }
        if let Some(v) = self.max_tokens {
            entries.push((ThresholdKey::MaxTokens, Value::from(v)));
        }
        if let Some(v) = self.minhash_similarity_threshold {
            entries.push((ThresholdKey::MinhashSimilarityThreshold, Value::from(v)));
        }
        entries
    }
}

/// Where an effective threshold value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThresholdSource {
    Default,
    FileDefaults(PathBuf),
    FileCategory(PathBuf),
    Cli,
}

impl fmt::Display for ThresholdSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("built-in default"),
            Self::FileDefaults(path) => write!(f, "{} [defaults]", path.display()),
            Self::FileCategory(path) => write!(f, "{} [categories]", path.display()),
            Self::Cli => f.write_str("command line"),
        }
    }
}

impl Serialize for ThresholdSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Effective thresholds plus the layer each value came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedThresholds {
    pub category: String,
    pub thresholds: ThresholdSet,
    pub sources: IndexMap<ThresholdKey, ThresholdSource>,
}

pub struct ThresholdResolver<'a> {
    file: Option<&'a OverrideFile>,
}

impl<'a> ThresholdResolver<'a> {
    #[must_use]
    pub const fn new(file: Option<&'a OverrideFile>) -> Self {
        Self { file }
    }

    /// Merge all layers for `category`. Rejected file values are skipped
    /// with a warning and the lower layer stays in effect.
    #[must_use]
    pub fn resolve(&self, category: &str, cli: &ThresholdOverrides) -> ResolvedThresholds {
        let mut thresholds = ThresholdSet::default();
        let mut sources: IndexMap<ThresholdKey, ThresholdSource> = ThresholdKey::ALL
            .into_iter()
            .map(|key| (key, ThresholdSource::Default))
            .collect();

        if let Some(file) = self.file {
            let mut layers = vec![(&file.defaults, ThresholdSource::FileDefaults(file.path.clone()))];
            if let Some(table) = file.categories.get(category) {
                layers.push((table, ThresholdSource::FileCategory(file.path.clone())));
            }
            for (table, source) in layers {
                for (raw_key, value) in table {
                    let Some(key) = ThresholdKey::from_key(raw_key) else {
                        continue;
                    };
                    if value.is_null() {
                        continue;
                    }
                    match thresholds.apply(key, value) {
                        Ok(()) => {
                            sources.insert(key, source.clone());
                        }
                        Err(reason) => warn!(
                            path = %file.path.display(),
                            key = raw_key.as_str(),
                            "ignoring threshold override: {reason}"
                        ),
                    }
                }
            }
        }

        for (key, value) in cli.entries() {
            match thresholds.apply(key, &value) {
                Ok(()) => {
                    sources.insert(key, ThresholdSource::Cli);
                }
                Err(reason) => warn!(key = key.as_str(), "ignoring command-line threshold: {reason}"),
            }
        }

        ResolvedThresholds {
            category: category.to_string(),
            thresholds,
            sources,
        }
    }
}

#[cfg(test)]
#[path = "thresholds_tests.rs"]
mod tests;
