use std::fs;

use sheath::project::{ProjectError, collect_file_paths};
use sheath::{FileId, load_sources};

#[test]
fn test_load_sources_parses_in_path_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(dir.path().join("z")).expect("mkdir");
    fs::write(dir.path().join("z/Last.kt"), "package z\n\nclass Last\n").expect("write");
    fs::write(dir.path().join("First.kt"), "package a\n\nclass First\n").expect("write");
    fs::write(dir.path().join("README.md"), "# docs").expect("write");

    let files = load_sources(&[dir.path()]).expect("load");
    let packages: Vec<&str> = files.iter().map(|f| f.package.as_str()).collect();
    assert_eq!(packages, vec!["a", "z"]);
    assert_eq!(files[1].file_id, FileId::new(1));
    assert!(files.iter().all(|f| !f.has_errors()));
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope");
    let error = collect_file_paths(&[missing.as_path()]).expect_err("missing input");
    assert!(matches!(error, ProjectError::NotFound { .. }));
    assert!(error.to_string().contains("nope"));
}

#[test]
fn test_syntax_errors_do_not_fail_loading() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("Broken.kt"), "package broken\n\nclass Broken {\n").expect("write");
    let files = load_sources(&[dir.path()]).expect("load");
    assert!(files[0].has_errors());
    assert_eq!(files[0].classes[0].name, "Broken");
}
