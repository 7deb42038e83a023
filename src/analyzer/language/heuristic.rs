use std::collections::HashSet;

/// English function words used by the stop-word heuristic.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "and", "that", "shall", "will", "you", "your", "our", "may", "not", "for", "with",
    "have", "hereby", "such", "this",
];

/// Minimum identifier probability accepted without consulting the heuristic.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

const TOKEN_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '(', ')', '[', ']', '"', '\''];

pub const LABEL_ENGLISH: &str = "en";
pub const LABEL_MIXED: &str = "mixed";
pub const LABEL_UNKNOWN: &str = "unknown";

/// Tunables for language classification.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageConfig {
    pub confidence_threshold: f64,
    pub stopwords: HashSet<String>,
    /// Stop-word ratio at or above which text counts as English.
    pub english_ratio: f64,
    /// Stop-word ratio at or above which text counts as mixed.
    pub mixed_ratio: f64,
    /// English additionally requires fewer non-ASCII characters than this.
    pub max_non_ascii_ratio: f64,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            stopwords: DEFAULT_STOPWORDS.iter().map(|w| (*w).to_string()).collect(),
            english_ratio: 0.2,
            mixed_ratio: 0.1,
            max_non_ascii_ratio: 0.3,
        }
    }
}

impl LanguageConfig {
    #[must_use]
    pub const fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Classify text as `en`, `mixed`, or `unknown` from character and stop-word ratios.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn heuristic_label(&self, text: &str) -> &'static str {
        let total_chars = text.chars().count();
        if total_chars == 0 {
            return LABEL_UNKNOWN;
        }
        let non_ascii = text.chars().filter(|c| !c.is_ascii()).count();
        let non_ascii_ratio = non_ascii as f64 / total_chars as f64;

        let tokens: Vec<String> = text
            .split_whitespace()
            .map(|token| token.trim_matches(TOKEN_PUNCTUATION).to_lowercase())
            .collect();
        let english_hits = tokens
            .iter()
            .filter(|token| self.stopwords.contains(token.as_str()))
            .count();
        let english_ratio = english_hits as f64 / tokens.len().max(1) as f64;

        if english_ratio >= self.english_ratio && non_ascii_ratio < self.max_non_ascii_ratio {
            LABEL_ENGLISH
        } else if english_ratio >= self.mixed_ratio {
            LABEL_MIXED
        } else {
            LABEL_UNKNOWN
        }
    }
}

#[cfg(test)]
#[path = "heuristic_tests.rs"]
mod tests;
