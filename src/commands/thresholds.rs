use std::fmt::Write as _;

use crate::cli::{ListFormat, ThresholdsArgs};
use crate::commands::context::{load_registry, resolve_thresholds};
use crate::config::{ResolvedThresholds, ThresholdKey};
use crate::output::print_error;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

#[must_use]
pub fn run_thresholds(args: &ThresholdsArgs) -> i32 {
    match run_thresholds_impl(args) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            print_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Render the effective thresholds for a category.
///
/// # Errors
/// Returns an error if the category is unknown or the taxonomy file is invalid.
pub fn run_thresholds_impl(args: &ThresholdsArgs) -> Result<String> {
    let registry = load_registry(args.taxonomy.as_deref())?;
    registry.get(&args.category)?;
    let resolved = resolve_thresholds(&args.category, &args.threshold_args);
    match args.format {
        ListFormat::Text => Ok(format_thresholds_text(&resolved)),
        ListFormat::Json => Ok(serde_json::to_string_pretty(&resolved)? + "\n"),
    }
}

#[must_use]
pub fn format_thresholds_text(resolved: &ResolvedThresholds) -> String {
    let width = ThresholdKey::ALL
        .iter()
        .map(|key| key.as_str().len())
        .max()
        .unwrap_or_default();
    let mut out = format!("Thresholds for {}:\n", resolved.category);
    for key in ThresholdKey::ALL {
        let source = resolved
            .sources
            .get(&key)
            .map(ToString::to_string)
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {:<width$}  {:<8}  ({source})",
            key.as_str(),
            resolved.thresholds.get(key).to_string(),
        );
    }
    out
}
