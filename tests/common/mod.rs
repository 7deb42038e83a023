#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the corpus-guard binary.
#[macro_export]
macro_rules! corpus_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("corpus-guard"))
    };
}

pub const ARBITRATION: &str =
    "You shall resolve any dispute with the company through binding arbitration.";
pub const WAIVER: &str =
    "You waive the right to join a class action against the company and our affiliates.";
pub const VENUE: &str =
    "All claims shall be brought in the courts of the State of Delaware and you consent to that venue.";

/// One JSONL line with a single positive label.
pub fn record(text: &str, label: &str) -> String {
    serde_json::json!({ "text": text, "labels": { label: 1.0 } }).to_string()
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Writes JSONL lines to a dataset file.
    pub fn create_dataset(&self, relative_path: &str, lines: &[String]) -> PathBuf {
        self.create_file(relative_path, &(lines.join("\n") + "\n"))
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Parses a JSON report under the temp directory.
    pub fn read_json(&self, relative_path: &str) -> Value {
        let content = fs::read_to_string(self.dir.path().join(relative_path))
            .expect("Failed to read report");
        serde_json::from_str(&content).expect("Report is not valid JSON")
    }

    /// A command rooted in the temp directory with a private config dir.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = corpus_guard!();
        cmd.current_dir(self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env("HOME", self.path())
            .env_remove("RUST_LOG");
        cmd
    }
}
