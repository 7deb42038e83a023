use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{CorpusGuardError, Result};

use super::filesystem::{FileSystem, RealFileSystem};

pub const THRESHOLDS_FILE_NAME: &str = "qc_thresholds.toml";

/// Parsed threshold override file.
///
/// Tables are kept as raw JSON values so each key can be coerced (and
/// rejected) individually during resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideFile {
    pub path: PathBuf,
    pub defaults: Map<String, Value>,
    pub categories: BTreeMap<String, Map<String, Value>>,
}

impl OverrideFile {
    /// Parse TOML, or JSON when `path` has a `.json` extension.
    ///
    /// # Errors
    /// Returns an error if the content does not parse or its root is not a
    /// table.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let root = if is_json(path) {
            serde_json::from_str::<Value>(content)?
        } else {
            serde_json::to_value(toml::from_str::<toml::Table>(content)?)?
        };
        let Value::Object(mut root) = root else {
            return Err(CorpusGuardError::Config(format!(
                "{}: threshold file must contain a table at the top level",
                path.display()
            )));
        };

        let defaults = match root.remove("defaults") {
            Some(Value::Object(table)) => table,
            None | Some(Value::Null) => Map::new(),
            Some(other) => {
                warn!(path = %path.display(), "ignoring [defaults]: expected a table, got {other}");
                Map::new()
            }
        };

        let mut categories = BTreeMap::new();
        match root.remove("categories") {
            Some(Value::Object(tables)) => {
                for (name, table) in tables {
                    if let Value::Object(table) = table {
                        categories.insert(name, table);
                    } else {
                        warn!(path = %path.display(), category = name.as_str(), "ignoring category overrides: expected a table");
                    }
                }
            }
            None | Some(Value::Null) => {}
            Some(_) => warn!(path = %path.display(), "ignoring [categories]: expected a table"),
        }

        Ok(Self {
            path: path.to_path_buf(),
            defaults,
            categories,
        })
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Locates and reads the threshold override file.
///
/// Search order when no explicit path is given:
/// 1. `qc_thresholds.toml` in the current directory
/// 2. `qc_thresholds.toml` in the platform config directory for corpus-guard
#[derive(Debug)]
pub struct ThresholdFileLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl Default for ThresholdFileLoader<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl ThresholdFileLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> ThresholdFileLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn local_path(&self) -> Option<PathBuf> {
        self.fs
            .current_dir()
            .ok()
            .map(|dir| dir.join(THRESHOLDS_FILE_NAME))
    }

    fn user_path(&self) -> Option<PathBuf> {
        self.fs.config_dir().map(|dir| dir.join(THRESHOLDS_FILE_NAME))
    }

    /// First existing file in the search order.
    #[must_use]
    pub fn discover(&self) -> Option<PathBuf> {
        [self.local_path(), self.user_path()]
            .into_iter()
            .flatten()
            .find(|path| self.fs.exists(path))
    }

    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_path(&self, path: &Path) -> Result<OverrideFile> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| CorpusGuardError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        OverrideFile::parse(path, &content)
    }

    /// Load `explicit` or the discovered file. Any failure is logged and
    /// treated as if no file existed.
    #[must_use]
    pub fn load(&self, explicit: Option<&Path>) -> Option<OverrideFile> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => self.discover()?,
        };
        match self.load_from_path(&path) {
            Ok(file) => {
                debug!(path = %path.display(), "loaded threshold overrides");
                Some(file)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring threshold override file");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "loader_tests/mod.rs"]
mod tests;
