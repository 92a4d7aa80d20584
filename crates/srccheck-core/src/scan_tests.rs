use std::fs;

use tempfile::TempDir;

use super::*;
use crate::options::OutputFormat;

fn run(paths: &[PathBuf], opts: &CheckOptions) -> (CheckStats, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let stats = check_and_write(paths, &mut out, &mut err, opts).unwrap();
    (stats, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
}

fn fixture(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn no_paths_is_success_with_no_output() {
    let (stats, out, err) = run(&[], &CheckOptions::default());
    assert!(stats.success());
    assert_eq!(stats, CheckStats::default());
    assert!(out.is_empty());
    assert!(err.is_empty());
}

#[test]
fn files_are_reported_in_argument_order() {
    let dir = TempDir::new().unwrap();
    let b = fixture(&dir, "b.txt", b"b\n");
    let a = fixture(&dir, "a.txt", b"\ta\n");

    let (stats, out, _) = run(&[b.clone(), a.clone()], &CheckOptions::default());
    assert!(stats.success());
    assert_eq!(stats.files_checked, 2);
    assert_eq!(stats.files_with_incidents, 1);
    let expected = format!(
        "Checking {b}\nChecking {a}\n{a}(1) [ERROR] :Tab character\n",
        a = a.display(),
        b = b.display()
    );
    assert_eq!(out, expected);
}

#[test]
fn missing_file_fails_but_later_files_are_checked() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.txt");
    let ok = fixture(&dir, "ok.txt", b"ok\n");

    let (stats, out, err) = run(&[missing.clone(), ok.clone()], &CheckOptions::default());
    assert!(!stats.success());
    assert_eq!(stats.files_failed, 1);
    assert_eq!(stats.files_checked, 1);
    assert!(out.contains(&format!("Checking {}", ok.display())));
    assert!(err.contains("missing.txt"));
}

#[test]
fn fail_fast_stops_at_first_failure() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.txt");
    let ok = fixture(&dir, "ok.txt", b"ok\n");

    let opts = CheckOptions { fail_fast: true, threads: Some(4), ..CheckOptions::default() };
    let (stats, out, _) = run(&[missing, ok.clone()], &opts);
    assert!(!stats.success());
    assert_eq!(stats.files_checked, 0);
    assert!(!out.contains(&ok.display().to_string()));
}

#[test]
fn content_violations_keep_success() {
    let dir = TempDir::new().unwrap();
    let dirty = fixture(&dir, "dirty.txt", b"\t\r\n\x01\x80");

    let (stats, _, _) = run(&[dirty], &CheckOptions::default());
    assert!(stats.success());
    assert_eq!(stats.files_with_incidents, 1);
    // tab, crlf, control, bad utf-8, missing eol
    assert_eq!(stats.incidents_total, 5);
}

#[test]
fn parallel_output_matches_serial_output() {
    let dir = TempDir::new().unwrap();
    let mut paths = Vec::new();
    for i in 0..40 {
        let body: &[u8] = match i % 4 {
            0 => b"clean\n",
            1 => b"\ttab\n",
            2 => b"crlf\r\n",
            _ => b"no eol",
        };
        paths.push(fixture(&dir, &format!("f{i:02}.txt"), body));
    }
    paths.push(dir.path().join("absent.txt"));

    let (serial_stats, serial_out, serial_err) = run(&paths, &CheckOptions::default());
    let parallel = CheckOptions { threads: Some(4), ..CheckOptions::default() };
    let (par_stats, par_out, par_err) = run(&paths, &parallel);

    assert_eq!(serial_stats, par_stats);
    assert_eq!(serial_out, par_out);
    assert_eq!(serial_err, par_err);
    assert_eq!(par_stats.files_failed, 1);
}

#[test]
fn recursive_expands_directories_sorted() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("src");
    let z = fixture(&dir, "src/z.rs", b"z\n");
    let a = fixture(&dir, "src/nested/a.rs", b"a\n");

    let opts = CheckOptions { recursive: true, ..CheckOptions::default() };
    let (stats, out, _) = run(&[root], &opts);
    assert_eq!(stats.files_checked, 2);
    let expected = format!("Checking {}\nChecking {}\n", a.display(), z.display());
    assert_eq!(out, expected);
}

#[test]
fn directory_without_recursive_is_a_failure() {
    let dir = TempDir::new().unwrap();
    fixture(&dir, "inner.txt", b"x\n");

    let (stats, _, err) = run(&[dir.path().to_path_buf()], &CheckOptions::default());
    assert!(!stats.success());
    assert!(!err.is_empty());
}

#[test]
fn json_format_lists_every_file() {
    let dir = TempDir::new().unwrap();
    let a = fixture(&dir, "a.txt", b"\t\t\t\t\t\n");
    let missing = dir.path().join("missing.txt");

    let opts = CheckOptions { format: OutputFormat::Json, ..CheckOptions::default() };
    let (stats, out, err) = run(&[a, missing], &opts);
    assert!(!stats.success());
    assert!(err.is_empty());

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value[0]["counts"]["tab"], 5);
    assert_eq!(value[0]["incidents"].as_array().unwrap().len(), 1);
    assert_eq!(value[1]["ok"], false);
}

#[test]
fn worker_panic_is_an_error() {
    let panicked: std::thread::Result<()> = Err(Box::new("boom"));
    let err = worker_outcome(panicked, 3, 3).unwrap_err();
    assert!(matches!(err, CheckError::Worker { written: 3, expected: 3 }));
    assert!(!err.is_file_error());
}

#[test]
fn undelivered_reports_are_an_error() {
    let err = worker_outcome(Ok(()), 2, 5).unwrap_err();
    assert_eq!(err.to_string(), "check worker failed: 2 of 5 reports written");
}

#[test]
fn worker_outcome_accepts_complete_run() {
    assert!(worker_outcome(Ok(()), 4, 4).is_ok());
}

#[test]
fn read_failure_with_partial_incidents_counts_as_failed() {
    let mut stats = CheckStats::default();
    stats.add(&FileReport {
        path: PathBuf::from("half.c"),
        summary: Some(crate::machine::scan_bytes(b"\tx")),
        error: Some(CheckError::Read {
            path: PathBuf::from("half.c"),
            source: std::io::Error::other("Input/output error"),
        }),
    });
    assert!(!stats.success());
    assert_eq!(stats.files_failed, 1);
    assert_eq!(stats.files_checked, 0);
    assert_eq!(stats.incidents_total, 2);
}
