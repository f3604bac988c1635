use std::fs;
use std::process::Command;

use tempfile::tempdir;

const REPORT: &str = "\u{1f305} **Daily Report**
\u{1f522} **XP Breakdown:**
- Coding: +12 XP
\u{1f3c6} **Total XP Today:** +12
\u{1f9e0} **Mood:** Mood: calm
\u{1f9ec} Current Level: 2 | Total XP: 112";

fn run(args: &[&str]) -> (i32, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_report_cli"))
        .args(args)
        .output()
        .expect("run report_cli");
    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    (output.status.code().unwrap_or(-1), stdout)
}

#[test]
fn empty_report_is_not_an_error() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("empty.md");
    fs::write(&path, "just some text\n").expect("write report");
    let path = path.to_str().expect("utf8 path");

    let (code, stdout) = run(&[path]);
    assert_eq!(code, 0);
    assert!(stdout.is_empty());

    let (code, stdout) = run(&["--json", path]);
    assert_eq!(code, 0);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("json summary");
    assert!(value["title"].is_null());
    assert!(value["xp_breakdown"].is_null());
}

#[test]
fn full_report_prints_fields() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("today.md");
    fs::write(&path, REPORT).expect("write report");

    let (code, stdout) = run(&[path.to_str().expect("utf8 path")]);
    assert_eq!(code, 0);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            "title Daily Report",
            "total_xp_today 12",
            "mood calm",
            "level 2",
            "total_xp_ever 112",
            "xp Coding 12",
        ]
    );
}

#[test]
fn missing_file_exits_one() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("missing.md");
    let (code, _) = run(&[path.to_str().expect("utf8 path")]);
    assert_eq!(code, 1);
}

#[test]
fn missing_path_is_a_usage_error() {
    let (code, _) = run(&[]);
    assert_eq!(code, 2);
}
