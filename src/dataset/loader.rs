use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::output::LoadProgress;

use super::{CheckStatus, DatasetRecord, LabelTaxonomy};

/// Whole-file and per-line decoding failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityResult {
    pub status: CheckStatus,
    pub errors: Vec<String>,
}

impl IntegrityResult {
    #[must_use]
    pub fn new(errors: Vec<String>) -> Self {
        Self {
            status: CheckStatus::from_findings(&errors),
            errors,
        }
    }
}

/// Schema violations found in lines that decoded as JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructureResult {
    pub status: CheckStatus,
    pub issues: Vec<String>,
}

impl StructureResult {
    #[must_use]
    pub fn new(issues: Vec<String>) -> Self {
        Self {
            status: CheckStatus::from_findings(&issues),
            issues,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadedDataset {
    pub records: Vec<DatasetRecord>,
    pub integrity: IntegrityResult,
    pub structure: StructureResult,
    /// Hex SHA-256 of the raw file bytes; `None` when the file could not be fully read.
    pub sha256: Option<String>,
}

impl LoadedDataset {
    fn fatal(error: String) -> Self {
        Self {
            records: Vec::new(),
            integrity: IntegrityResult::new(vec![error]),
            structure: StructureResult::default(),
            sha256: None,
        }
    }
}

/// Streams a JSONL dataset and validates each line against a taxonomy.
///
/// Only a missing or unopenable file is fatal; every other problem is
/// recorded against its line number and loading continues.
pub struct DatasetLoader<'a> {
    taxonomy: &'a LabelTaxonomy,
    progress: Option<&'a LoadProgress>,
}

impl<'a> DatasetLoader<'a> {
    #[must_use]
    pub const fn new(taxonomy: &'a LabelTaxonomy) -> Self {
        Self {
            taxonomy,
            progress: None,
        }
    }

    #[must_use]
    pub const fn with_progress(mut self, progress: &'a LoadProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    #[must_use]
    pub fn load(&self, path: &Path) -> LoadedDataset {
        if !path.exists() {
            return LoadedDataset::fatal(format!("Dataset file not found: {}", path.display()));
        }
        match File::open(path) {
            Ok(file) => self.load_reader(BufReader::new(file)),
            Err(e) => LoadedDataset::fatal(format!("File read error: {e}")),
        }
    }

    pub fn load_reader<R: BufRead>(&self, mut reader: R) -> LoadedDataset {
        let mut records = Vec::new();
        let mut errors = Vec::new();
        let mut issues = Vec::new();
        let mut hasher = Sha256::new();
        let mut read_failed = false;
        let mut buf = Vec::new();
        let mut line_no = 0usize;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    errors.push(format!("File read error: {e}"));
                    read_failed = true;
                    break;
                }
            }
            line_no += 1;
            hasher.update(&buf);
            if let Some(progress) = self.progress {
                progress.inc();
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim(),
                Err(e) => {
                    errors.push(format!("Line {line_no}: Unicode decode error: {e}"));
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }

            let payload: Value = match serde_json::from_str(line) {
                Ok(payload) => payload,
                Err(e) => {
                    errors.push(format!("Line {line_no}: JSON decode error: {e}"));
                    continue;
                }
            };

            let Value::Object(object) = payload else {
                issues.push(format!(
                    "Line {line_no}: Record must be an object, got {}",
                    json_type(Some(&payload))
                ));
                continue;
            };

            records.push(self.validate(line_no, &object, &mut issues));
        }

        debug!(
            lines = line_no,
            records = records.len(),
            integrity_errors = errors.len(),
            structure_issues = issues.len(),
            "dataset loaded"
        );

        LoadedDataset {
            records,
            integrity: IntegrityResult::new(errors),
            structure: StructureResult::new(issues),
            sha256: (!read_failed).then(|| format!("{:x}", hasher.finalize())),
        }
    }

    fn validate(
        &self,
        line_no: usize,
        object: &Map<String, Value>,
        issues: &mut Vec<String>,
    ) -> DatasetRecord {
        let text = match object.get("text") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.trim().to_string(),
            Some(other) => {
                issues.push(format!(
                    "Line {line_no}: Text must be a string, got {}",
                    json_type(Some(other))
                ));
                other.to_string().trim().to_string()
            }
        };
        if text.is_empty() {
            issues.push(format!("Line {line_no}: Missing or empty text field"));
        }

        let empty = Map::new();
        let raw_labels = match object.get("labels") {
            Some(Value::Object(labels)) => labels,
            other => {
                issues.push(format!(
                    "Line {line_no}: Labels must be an object, got {}",
                    json_type(other)
                ));
                &empty
            }
        };

        let mut labels = IndexMap::with_capacity(self.taxonomy.len());
        for label in self.taxonomy.labels() {
            let score = match raw_labels.get(label) {
                None => 0.0,
                Some(value) => coerce_score(value).unwrap_or_else(|| {
                    issues.push(format!(
                        "Line {line_no}: Label '{label}' should be numeric, got {value}"
                    ));
                    0.0
                }),
            };
            labels.insert(label.to_string(), score);
        }

        for key in raw_labels.keys().filter(|key| !self.taxonomy.contains(key)) {
            issues.push(format!(
                "Line {line_no}: Unknown label '{key}' not defined for category {}",
                self.taxonomy.category()
            ));
        }

        DatasetRecord::new(text, labels)
    }
}

fn coerce_score(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

const fn json_type(value: Option<&Value>) -> &'static str {
    match value {
        None => "nothing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
