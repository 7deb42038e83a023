use std::collections::BTreeMap;
use std::path::Path;

use indexmap::IndexSet;
use serde::Deserialize;

use crate::error::{CorpusGuardError, Result};

/// Categories that ship with the binary.
pub const BUILTIN_CATEGORIES: &[&str] = &[
    "account_management",
    "content_rights",
    "dispute_resolution",
];

const BUILTIN_TAXONOMIES: &str = r#"
[categories.account_management]
labels = ["easy_termination", "manual_cancellation", "auto_renewal_friction"]

[categories.content_rights]
labels = ["license_assignment", "ip_retained", "moral_rights_waiver", "commercial_use_claim"]

[categories.dispute_resolution]
labels = ["binding_arbitration", "class_action_waiver", "jury_trial_waiver", "venue_selection"]
"#;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaxonomyFile {
    #[serde(default)]
    categories: BTreeMap<String, CategoryDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CategoryDefinition {
    labels: Vec<String>,
}

/// Ordered set of label names valid for one dataset category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTaxonomy {
    category: String,
    labels: IndexSet<String>,
}

impl LabelTaxonomy {
    /// # Errors
    /// Returns an error if the label list is empty or contains duplicates.
    pub fn new<I, S>(category: impl Into<String>, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let category = category.into();
        let mut set = IndexSet::new();
        for label in labels {
            let label = label.into();
            if label.trim().is_empty() {
                return Err(CorpusGuardError::Config(format!(
                    "Category '{category}' has an empty label name"
                )));
            }
            if !set.insert(label.clone()) {
                return Err(CorpusGuardError::Config(format!(
                    "Category '{category}' lists label '{label}' more than once"
                )));
            }
        }
        if set.is_empty() {
            return Err(CorpusGuardError::Config(format!(
                "Category '{category}' must define at least one label"
            )));
        }
        Ok(Self {
            category,
            labels: set,
        })
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Keyed lookup of category name to taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRegistry {
    categories: BTreeMap<String, LabelTaxonomy>,
}

impl CategoryRegistry {
    /// Registry containing the built-in categories.
    ///
    /// # Errors
    /// Returns an error if the embedded definitions fail to parse.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::default();
        registry.merge_toml(BUILTIN_TAXONOMIES)?;
        Ok(registry)
    }

    /// Built-in categories extended (and overridden) by a taxonomy file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or does not describe valid taxonomies.
    pub fn with_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|source| CorpusGuardError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        let mut registry = Self::builtin()?;
        registry.merge_toml(&content)?;
        Ok(registry)
    }

    /// Parse `[categories.<name>] labels = [...]` tables into the registry.
    ///
    /// # Errors
    /// Returns an error if the content is not valid TOML or a taxonomy is invalid.
    pub fn merge_toml(&mut self, content: &str) -> Result<()> {
        let file: TaxonomyFile = toml::from_str(content)?;
        for (name, definition) in file.categories {
            let taxonomy = LabelTaxonomy::new(name.clone(), definition.labels)?;
            self.categories.insert(name, taxonomy);
        }
        Ok(())
    }

    /// # Errors
    /// Returns [`CorpusGuardError::UnknownCategory`] when the name is not registered.
    pub fn get(&self, name: &str) -> Result<&LabelTaxonomy> {
        self.categories
            .get(name)
            .ok_or_else(|| CorpusGuardError::UnknownCategory {
                name: name.to_string(),
                available: self.names().map(str::to_string).collect(),
            })
    }

    /// Category names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabelTaxonomy> {
        self.categories.values()
    }
}

#[cfg(test)]
#[path = "taxonomy_tests.rs"]
mod tests;
