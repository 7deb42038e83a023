use std::path::Path;

use tempfile::TempDir;
use time::macros::{date, datetime};

use super::*;

const TODAY: Date = date!(2024 - 03 - 07);

#[test]
fn explicit_version_wins() {
    let version = infer_version(Path::new("data/v1/train.jsonl"), Some("v9"), TODAY).unwrap();
    assert_eq!(version, "v9");
}

#[test]
fn blank_explicit_version_is_ignored() {
    let version = infer_version(Path::new("data/v1/train.jsonl"), Some(" "), TODAY).unwrap();
    assert_eq!(version, "v1");
}

#[test]
fn last_versioned_component_is_used() {
    let path = Path::new("corpus/v2023.01/content_rights/v2024.02.01/train.jsonl");
    assert_eq!(infer_version(path, None, TODAY).unwrap(), "v2024.02.01");
}

#[test]
fn components_without_digits_are_skipped() {
    let path = Path::new("v3/valid/train.jsonl");
    assert_eq!(infer_version(path, None, TODAY).unwrap(), "v3");
}

#[test]
fn parent_directory_is_the_fallback() {
    let path = Path::new("processed/train.jsonl");
    assert_eq!(infer_version(path, None, TODAY).unwrap(), "processed");
}

#[test]
fn bare_file_name_uses_todays_date() {
    let path = Path::new("train.jsonl");
    assert_eq!(infer_version(path, None, TODAY).unwrap(), "v2024.03.07");
}

#[test]
fn default_output_dir_layout() {
    assert_eq!(
        output_dir(None, "content_rights", "v1"),
        Path::new("reports").join("qc").join("content_rights").join("v1")
    );
    assert_eq!(output_dir(Some(Path::new("out")), "x", "v1"), Path::new("out"));
}

#[test]
fn manifest_absent_is_empty_object() {
    assert_eq!(load_manifest(None), json!({}));
}

#[test]
fn manifest_missing_file_is_reported() {
    let manifest = load_manifest(Some(Path::new("/definitely/not/here.json")));
    let error = manifest["errors"][0].as_str().unwrap();
    assert!(error.starts_with("Manifest file not found: "));
}

#[test]
fn manifest_bad_json_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("manifest.json");
    std::fs::write(&path, "{not json").unwrap();
    let manifest = load_manifest(Some(&path));
    assert!(
        manifest["errors"][0]
            .as_str()
            .unwrap()
            .starts_with("Manifest JSON decode error: ")
    );
}

#[test]
fn manifest_is_merged_verbatim() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("manifest.json");
    std::fs::write(&path, r#"{"expected": {"binding_arbitration": 120}, "batch": "b7"}"#).unwrap();
    let manifest = load_manifest(Some(&path));
    assert_eq!(manifest["expected"]["binding_arbitration"], 120);
    assert_eq!(manifest["batch"], "b7");
}

#[test]
fn sources_are_trimmed_and_filtered() {
    let raw = vec![" tos-archive ".to_string(), String::new(), "gold".to_string()];
    assert_eq!(parse_sources(&raw), vec!["tos-archive", "gold"]);
}

#[test]
fn timestamp_is_rfc3339_utc() {
    let ts = timestamp(datetime!(2024-05-01 12:30:45.123 UTC)).unwrap();
    assert_eq!(ts, "2024-05-01T12:30:45Z");
}
