use std::fs;

use tempfile::TempDir;

use super::*;
use crate::incident::Category;

#[test]
fn clean_file_passes_without_incidents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("clean.rs");
    fs::write(&path, "fn main() {}\n").unwrap();

    let report = check_file(&path);
    assert!(report.passed());
    let summary = report.summary().unwrap();
    assert_eq!(summary.lines, 1);
    assert!(summary.incidents.is_empty());
}

#[test]
fn content_violations_do_not_fail_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dirty.c");
    fs::write(&path, b"int\tx;\r\n\x80").unwrap();

    let report = check_file(&path);
    assert!(report.passed());
    assert!(report.error().is_none());
    let categories: Vec<_> = report.summary().unwrap().incidents.iter().map(|i| i.category).collect();
    assert_eq!(
        categories,
        vec![Category::Tab, Category::Crlf, Category::BadUtf8, Category::MissingEol]
    );
}

#[test]
fn missing_file_fails_with_open_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.txt");

    let report = check_file(&path);
    assert!(!report.passed());
    assert!(matches!(report.error(), Some(CheckError::Open { .. })));
    assert!(report.error().unwrap().to_string().contains("nope.txt"));
    assert!(report.error().unwrap().is_file_error());
}

#[cfg(unix)]
#[test]
fn directory_fails_as_io_error() {
    let dir = TempDir::new().unwrap();

    let report = check_file(dir.path());
    assert!(!report.passed());
}

#[test]
fn checking_twice_gives_identical_summary() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("twice.txt");
    fs::write(&path, b"a\tb\rc").unwrap();

    let first = check_file(&path);
    let second = check_file(&path);
    assert_eq!(first.summary(), second.summary());
}
