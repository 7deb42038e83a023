use std::path::Path;

use tempfile::TempDir;

use super::*;
use crate::config::{OverrideFile, ThresholdOverrides, ThresholdResolver, ThresholdSet};

#[test]
fn template_parses_to_the_built_in_defaults() {
    let template = generate_thresholds_template();
    let file = OverrideFile::parse(Path::new("qc_thresholds.toml"), &template).unwrap();
    assert!(file.categories.is_empty());

    let resolved =
        ThresholdResolver::new(Some(&file)).resolve("dispute_resolution", &ThresholdOverrides::default());
    assert_eq!(resolved.thresholds, ThresholdSet::default());
}

#[test]
fn template_documents_every_key() {
    let template = generate_thresholds_template();
    for key in crate::config::ThresholdKey::ALL {
        assert!(template.contains(key.as_str()), "missing {key}");
    }
    assert!(template.contains("[categories.dispute_resolution]"));
}

#[test]
fn run_init_creates_threshold_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("qc_thresholds.toml");
    let args = InitArgs {
        output: path.clone(),
        force: false,
    };

    run_init_impl(&args, true).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("[defaults]"));
}

#[test]
fn run_init_refuses_to_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("qc_thresholds.toml");
    std::fs::write(&path, "# mine").unwrap();
    let args = InitArgs {
        output: path.clone(),
        force: false,
    };

    let err = run_init_impl(&args, true).unwrap_err();
    assert!(err.to_string().contains("already exists"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");
    assert_eq!(run_init(&args, true), EXIT_CONFIG_ERROR);
}

#[test]
fn run_init_force_overwrites() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("qc_thresholds.toml");
    std::fs::write(&path, "# mine").unwrap();
    let args = InitArgs {
        output: path.clone(),
        force: true,
    };

    assert_eq!(run_init(&args, true), EXIT_SUCCESS);
    assert!(std::fs::read_to_string(&path).unwrap().contains("[defaults]"));
}
