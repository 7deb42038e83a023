use std::fmt::Write;

use crate::error::Result;

use super::{QcReport, ReportFormatter};

/// Condensed human-readable summary of a report.
pub struct MarkdownFormatter;

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, report: &QcReport) -> Result<String> {
        let mut output = String::new();
        let metadata = &report.metadata;

        writeln!(
            output,
            "# QC Report: {} ({})\n",
            metadata.category, metadata.version
        )
        .ok();
        writeln!(output, "Generated at: {}\n", metadata.generated_at).ok();

        writeln!(output, "## Summary").ok();
        writeln!(output, "- Gate: **{}**", report.gates.summary).ok();
        writeln!(output, "- Integrity: **{}**", report.integrity.status).ok();
        writeln!(output, "- Structure: **{}**", report.structure.status).ok();
        writeln!(
            output,
            "- Duplicate ratio: **{:.2}%**",
            report.dedupe.duplicate_ratio * 100.0
        )
        .ok();
        writeln!(output, "- Primary language: **{}**", report.language.primary).ok();
        writeln!(
            output,
            "- Token median: **{}**",
            report.length.token_stats.median
        )
        .ok();
        writeln!(output, "- Records: {}", metadata.record_count).ok();

        writeln!(output, "\n## Flags & Warnings").ok();
        if report.gates.warnings.is_empty() {
            writeln!(output, "- None").ok();
        }
        for warning in &report.gates.warnings {
            writeln!(output, "- {warning}").ok();
        }

        writeln!(output, "\n## Label Distribution").ok();
        for (label, total) in &report.labels.totals {
            writeln!(output, "- **{label}**: {total}").ok();
        }

        if !report.gates.failed_checks.is_empty() {
            writeln!(output, "\n## Failed Checks").ok();
            for check in &report.gates.failed_checks {
                writeln!(output, "- {check}").ok();
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
#[path = "markdown_tests.rs"]
mod tests;
