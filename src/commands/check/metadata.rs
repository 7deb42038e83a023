//! Report metadata derived from the dataset path and command line.

use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::error::{CorpusGuardError, Result};

const VERSION_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("v[year].[month].[day]");

/// Explicit version, else the last path component that starts with `v` and
/// contains a digit, else the parent directory name, else `vYYYY.MM.DD`.
///
/// # Errors
/// Returns an error if the date cannot be formatted.
pub fn infer_version(dataset: &Path, explicit: Option<&str>, today: Date) -> Result<String> {
    if let Some(version) = explicit.filter(|v| !v.trim().is_empty()) {
        return Ok(version.to_string());
    }
    let tagged = dataset
        .components()
        .rev()
        .filter_map(|component| component.as_os_str().to_str())
        .find(|part| part.starts_with('v') && part.chars().any(|c| c.is_ascii_digit()));
    if let Some(part) = tagged {
        return Ok(part.to_string());
    }
    if let Some(parent) = dataset
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
    {
        return Ok(parent.to_string());
    }
    today
        .format(VERSION_FORMAT)
        .map_err(|e| CorpusGuardError::Config(format!("cannot format dataset version: {e}")))
}

/// `reports/qc/<category>/<version>` unless an explicit directory is given.
#[must_use]
pub fn output_dir(explicit: Option<&Path>, category: &str, version: &str) -> PathBuf {
    explicit.map_or_else(
        || PathBuf::from("reports").join("qc").join(category).join(version),
        Path::to_path_buf,
    )
}

/// Manifest contents, or an `errors` object describing why it could not be
/// read. No path yields an empty object.
#[must_use]
pub fn load_manifest(path: Option<&Path>) -> Value {
    let Some(path) = path else {
        return json!({});
    };
    if !path.exists() {
        return json!({ "errors": [format!("Manifest file not found: {}", path.display())] });
    }
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            json!({ "errors": [format!("Manifest JSON decode error: {e}")] })
        }),
        Err(e) => json!({ "errors": [format!("Manifest read error: {e}")] }),
    }
}

/// Trimmed, non-empty source identifiers.
#[must_use]
pub fn parse_sources(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|source| source.trim())
        .filter(|source| !source.is_empty())
        .map(str::to_string)
        .collect()
}

/// RFC 3339 timestamp with whole seconds.
///
/// # Errors
/// Returns an error if the timestamp cannot be formatted.
pub fn timestamp(now: OffsetDateTime) -> Result<String> {
    let now = now.replace_nanosecond(0).unwrap_or(now);
    now.format(&Rfc3339)
        .map_err(|e| CorpusGuardError::Config(format!("cannot format timestamp: {e}")))
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod tests;
