//! Filesystem access for threshold file discovery.
//!
//! Discovery goes through [`FileSystem`] so tests can substitute an
//! in-memory tree.

use std::path::{Path, PathBuf};

/// Filesystem operations needed to find and read override files.
pub trait FileSystem {
    /// Read an override file as UTF-8 text.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Whether a candidate override file is present.
    fn exists(&self, path: &Path) -> bool;

    /// Directory searched first for `qc_thresholds.toml`.
    ///
    /// # Errors
    /// Returns an error if the current directory cannot be determined.
    fn current_dir(&self) -> std::io::Result<PathBuf>;

    /// Per-user configuration directory for corpus-guard, searched after the
    /// working directory:
    /// - Linux: `~/.config/corpus-guard` (XDG)
    /// - macOS: `~/Library/Application Support/corpus-guard`
    /// - Windows: `%APPDATA%\corpus-guard`
    ///
    /// `None` when no home directory can be resolved.
    fn config_dir(&self) -> Option<PathBuf>;
}

/// The process's real filesystem and environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "corpus-guard")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }
}
