//! Setup shared by the subcommands.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::ThresholdArgs;
use crate::config::{ResolvedThresholds, ThresholdFileLoader, ThresholdResolver};
use crate::dataset::CategoryRegistry;
use crate::error::Result;

/// Built-in categories, extended by `taxonomy` when given.
///
/// # Errors
/// Returns an error if the taxonomy file cannot be read or parsed.
pub fn load_registry(taxonomy: Option<&Path>) -> Result<CategoryRegistry> {
    match taxonomy {
        Some(path) => {
            debug!(path = %path.display(), "loading taxonomy file");
            CategoryRegistry::with_file(path)
        }
        None => CategoryRegistry::builtin(),
    }
}

/// Resolve thresholds for `category` from the override file and CLI flags.
#[must_use]
pub fn resolve_thresholds(category: &str, args: &ThresholdArgs) -> ResolvedThresholds {
    let file = if args.no_thresholds_file {
        None
    } else {
        ThresholdFileLoader::new().load(args.thresholds.as_deref())
    };
    ThresholdResolver::new(file.as_ref()).resolve(category, &args.overrides())
}

/// Write `content` next to `path` and rename it into place, creating parent
/// directories as needed.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let tmp = temp_path(path);
    fs::write(&tmp, content)?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
