//! Startup selection of optional analysis backends.
//!
//! Language identification falls back to the stop-word heuristic and
//! near-duplicate search falls back to exact matching when a backend is
//! compiled out or disabled on the command line.

use serde::Serialize;
use tracing::{info, warn};

use crate::analyzer::duplicate::SimilarityIndexBuilder;
use crate::analyzer::language::LanguageIdentifier;

pub const HEURISTIC_LANGUAGE: &str = "heuristic";
pub const EXACT_ONLY: &str = "exact-only";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapabilityOptions {
    /// Skip the probabilistic identifier even when compiled in.
    pub heuristic_language: bool,
    /// Skip near-duplicate search even when compiled in.
    pub exact_only: bool,
}

/// Backend names recorded in report metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilitySummary {
    pub language_identifier: String,
    pub similarity_index: String,
}

pub struct Capabilities {
    language: Option<Box<dyn LanguageIdentifier>>,
    similarity: Option<Box<dyn SimilarityIndexBuilder>>,
}

impl Capabilities {
    #[must_use]
    pub fn detect(options: CapabilityOptions) -> Self {
        let language = if options.heuristic_language {
            info!("language identifier disabled; using stop-word heuristic");
            None
        } else {
            let identifier = language_backend();
            if identifier.is_none() {
                warn!("no language identifier compiled in; using stop-word heuristic");
            }
            identifier
        };

        let similarity = if options.exact_only {
            info!("near-duplicate search disabled; exact matching only");
            None
        } else {
            let builder = similarity_backend();
            if builder.is_none() {
                warn!("no similarity index compiled in; exact matching only");
            }
            builder
        };

        Self {
            language,
            similarity,
        }
    }

    /// Explicit backends, bypassing detection.
    #[must_use]
    pub fn with_backends(
        language: Option<Box<dyn LanguageIdentifier>>,
        similarity: Option<Box<dyn SimilarityIndexBuilder>>,
    ) -> Self {
        Self {
            language,
            similarity,
        }
    }

    #[must_use]
    pub fn language_identifier(&self) -> Option<&dyn LanguageIdentifier> {
        self.language.as_deref()
    }

    #[must_use]
    pub fn similarity_index(&self) -> Option<&dyn SimilarityIndexBuilder> {
        self.similarity.as_deref()
    }

    #[must_use]
    pub fn summary(&self) -> CapabilitySummary {
        CapabilitySummary {
            language_identifier: self
                .language
                .as_ref()
                .map_or(HEURISTIC_LANGUAGE, |identifier| identifier.name())
                .to_string(),
            similarity_index: self
                .similarity
                .as_ref()
                .map_or(EXACT_ONLY, |builder| builder.name())
                .to_string(),
        }
    }
}

#[cfg(feature = "whatlang")]
fn language_backend() -> Option<Box<dyn LanguageIdentifier>> {
    Some(Box::new(crate::analyzer::language::WhatlangIdentifier))
}

#[cfg(not(feature = "whatlang"))]
fn language_backend() -> Option<Box<dyn LanguageIdentifier>> {
    None
}

#[cfg(feature = "minhash")]
fn similarity_backend() -> Option<Box<dyn SimilarityIndexBuilder>> {
    Some(Box::new(crate::analyzer::duplicate::LshIndexBuilder))
}

#[cfg(not(feature = "minhash"))]
fn similarity_backend() -> Option<Box<dyn SimilarityIndexBuilder>> {
    None
}
