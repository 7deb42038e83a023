//! Tests for override file discovery order and non-fatal loading.

use std::path::{Path, PathBuf};

use crate::config::ThresholdFileLoader;

use super::mock_fs::MockFileSystem;

const LOCAL: &str = "/project/qc_thresholds.toml";
const USER: &str = "/home/user/.config/corpus-guard/qc_thresholds.toml";

#[test]
fn nothing_discovered_without_files() {
    let loader = ThresholdFileLoader::with_fs(MockFileSystem::new());
    assert_eq!(loader.discover(), None);
    assert!(loader.load(None).is_none());
}

#[test]
fn local_file_wins_over_user_file() {
    let fs = MockFileSystem::new()
        .with_file(LOCAL, "[defaults]\nmin_tokens = 3\n")
        .with_file(USER, "[defaults]\nmin_tokens = 9\n");
    let loader = ThresholdFileLoader::with_fs(fs);
    assert_eq!(loader.discover(), Some(PathBuf::from(LOCAL)));
}

#[test]
fn user_config_dir_is_the_fallback() {
    let fs = MockFileSystem::new().with_file(USER, "[defaults]\nmin_tokens = 9\n");
    let loader = ThresholdFileLoader::with_fs(fs);
    let file = loader.load(None).unwrap();
    assert_eq!(file.path, PathBuf::from(USER));
    assert_eq!(file.defaults["min_tokens"], 9);
}

#[test]
fn missing_config_dir_is_tolerated() {
    let fs = MockFileSystem::new().with_config_dir(None);
    let loader = ThresholdFileLoader::with_fs(fs);
    assert_eq!(loader.discover(), None);
}

#[test]
fn explicit_path_skips_discovery() {
    let fs = MockFileSystem::new()
        .with_file(LOCAL, "[defaults]\nmin_tokens = 3\n")
        .with_file("/elsewhere/t.toml", "[defaults]\nmin_tokens = 7\n");
    let loader = ThresholdFileLoader::with_fs(fs);
    let file = loader.load(Some(Path::new("/elsewhere/t.toml"))).unwrap();
    assert_eq!(file.defaults["min_tokens"], 7);
}

#[test]
fn unreadable_or_malformed_files_are_ignored() {
    let fs = MockFileSystem::new().with_file(LOCAL, "this is not [[ toml");
    let loader = ThresholdFileLoader::with_fs(fs);
    assert!(loader.load(None).is_none());
    assert!(loader.load(Some(Path::new("/missing.toml"))).is_none());
}
