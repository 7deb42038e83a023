use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorpusGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown category '{name}'. Available categories: {}", .available.join(", "))]
    UnknownCategory { name: String, available: Vec<String> },

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Similarity index error: {0}")]
    SimilarityIndex(String),
}

impl CorpusGuardError {
    /// Short category name used as the heading of error output.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::UnknownCategory { .. } => "Config",
            Self::FileRead { .. } => "FileRead",
            Self::Io(_) => "IO",
            Self::TomlParse(_) => "TOML",
            Self::Json(_) => "JSON",
            Self::SimilarityIndex(_) => "SimilarityIndex",
        }
    }

    /// Actionable hint printed below the error, when one exists.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::UnknownCategory { .. } => {
                Some("Run `corpus-guard categories` or pass --taxonomy with a category definition")
            }
            Self::TomlParse(_) => Some("Check the TOML syntax of the configuration file"),
            Self::FileRead { .. } => Some("Check that the path exists and is readable"),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CorpusGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
