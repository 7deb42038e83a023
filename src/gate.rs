//! Pass/fail decision over analyzer outputs and resolved thresholds.

use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::analyzer::Analyses;
use crate::config::ThresholdSet;
use crate::dataset::{CheckStatus, IntegrityResult, StructureResult};
use crate::{EXIT_GATE_FAILED, EXIT_SUCCESS};

/// A check that can fail the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateCheck {
    Integrity,
    Structure,
    DuplicateRatio,
    LanguageMix,
}

impl GateCheck {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Integrity => "integrity",
            Self::Structure => "structure",
            Self::DuplicateRatio => "duplicate_ratio",
            Self::LanguageMix => "language_mix",
        }
    }
}

impl fmt::Display for GateCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateDecision {
    pub summary: CheckStatus,
    pub failed_checks: Vec<GateCheck>,
    pub warnings: Vec<String>,
}

impl GateDecision {
    #[must_use]
    pub fn has_failed(&self, check: GateCheck) -> bool {
        self.failed_checks.contains(&check)
    }

    /// `fail_on_warning` also fails a passing gate that carries warnings.
    #[must_use]
    pub fn exit_code(&self, fail_on_warning: bool) -> i32 {
        if self.summary.is_fail() || (fail_on_warning && !self.warnings.is_empty()) {
            EXIT_GATE_FAILED
        } else {
            EXIT_SUCCESS
        }
    }
}

pub struct GateEngine<'a> {
    thresholds: &'a ThresholdSet,
}

impl<'a> GateEngine<'a> {
    #[must_use]
    pub const fn new(thresholds: &'a ThresholdSet) -> Self {
        Self { thresholds }
    }

    /// Flags from a check that failed are reported through `failed_checks`
    /// only, not repeated in `warnings`.
    #[must_use]
    pub fn evaluate(
        &self,
        integrity: &IntegrityResult,
        structure: &StructureResult,
        analyses: &Analyses,
    ) -> GateDecision {
        let mut failed_checks = Vec::new();
        if integrity.status.is_fail() {
            failed_checks.push(GateCheck::Integrity);
        }
        if structure.status.is_fail() {
            failed_checks.push(GateCheck::Structure);
        }
        let duplicates_failed =
            analyses.dedupe.duplicate_ratio > self.thresholds.max_duplicate_ratio;
        if duplicates_failed {
            failed_checks.push(GateCheck::DuplicateRatio);
        }
        let language_failed =
            analyses.language.non_primary_fraction() > self.thresholds.max_non_primary_language;
        if language_failed {
            failed_checks.push(GateCheck::LanguageMix);
        }

        let mut warnings = analyses.length.flags.clone();
        if !language_failed {
            warnings.extend(analyses.language.flags.iter().cloned());
        }
        if !duplicates_failed {
            warnings.extend(analyses.dedupe.flags.iter().cloned());
        }
        warnings.extend(analyses.labels.warnings.iter().cloned());

        let summary = CheckStatus::from_findings(&failed_checks);
        info!(
            %summary,
            failed = failed_checks.len(),
            warnings = warnings.len(),
            "gate evaluated"
        );
        GateDecision {
            summary,
            failed_checks,
            warnings,
        }
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
