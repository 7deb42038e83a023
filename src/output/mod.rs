mod error_output;
mod json;
mod markdown;
mod progress;
mod report;

pub use error_output::{ErrorOutput, print_error};
pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use progress::LoadProgress;
pub use report::{QcReport, ReportMetadata};

use crate::error::Result;

/// Renders a finished report into a document.
pub trait ReportFormatter {
    /// # Errors
    /// Returns an error if the report cannot be serialized.
    fn format(&self, report: &QcReport) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Markdown,
}

impl ReportFormat {
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Json => "qc_report.json",
            Self::Markdown => "qc_report.md",
        }
    }

    #[must_use]
    pub fn formatter(self) -> Box<dyn ReportFormatter> {
        match self {
            Self::Json => Box::new(JsonFormatter),
            Self::Markdown => Box::new(MarkdownFormatter),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures;
