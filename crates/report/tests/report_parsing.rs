use std::fs::{self, File};
use std::io::BufReader;

use report::{XpBreakdownEntry, parse_report, parse_report_from_reader};
use tempfile::tempdir;

const BACKEND_REPORT: &str = "\u{1f305} **Daily Report**
------------------------------
\u{1f522} **XP Breakdown:**
- Mood: +15 XP
- Health_exercise: +20 XP
- Health_water: +5 XP
- Coding: +12 XP

\u{1f3c6} **Total XP Today:** +52

\u{1f9e0} **Mood:** You checked in twice and named what was weighing on you.

\u{1f4aa} **Health:** A solid workout, though water intake stayed low.

\u{2328}\u{fe0f} **Code:** One focused session with a meaningful diff.

\u{1f3af} **Overall:** Steady progress across the board. Keep the rhythm tomorrow.

\u{1f9ec} Current Level: 4 | Total XP: 352";

fn entry(category: &str, xp: &str) -> XpBreakdownEntry {
    XpBreakdownEntry {
        category: category.to_string(),
        xp: xp.to_string(),
    }
}

#[test]
fn parses_full_backend_report() {
    let summary = parse_report(BACKEND_REPORT);

    assert_eq!(summary.title.as_deref(), Some("Daily Report"));
    assert_eq!(
        summary.xp_breakdown,
        Some(vec![
            entry("Mood", "15"),
            entry("Health_exercise", "20"),
            entry("Health_water", "5"),
            entry("Coding", "12"),
        ])
    );
    assert_eq!(summary.total_xp_today.as_deref(), Some("52"));
    assert_eq!(
        summary.mood.as_deref(),
        Some("You checked in twice and named what was weighing on you.")
    );
    assert_eq!(
        summary.health.as_deref(),
        Some("A solid workout, though water intake stayed low.")
    );
    assert_eq!(
        summary.code.as_deref(),
        Some("One focused session with a meaningful diff.")
    );
    assert_eq!(
        summary.overall.as_deref(),
        Some("Steady progress across the board. Keep the rhythm tomorrow.")
    );
    assert_eq!(summary.level.as_deref(), Some("4"));
    assert_eq!(summary.total_xp_ever.as_deref(), Some("352"));
}

#[test]
fn parses_report_with_no_activity() {
    let input = "\u{1f305} **Daily Report**
------------------------------
\u{1f522} **XP Breakdown:**

\u{1f3c6} **Total XP Today:** +0

\u{1f9e0} **Mood:** No mood logs today.

\u{1f4aa} **Health:** No health logs today.

\u{2328}\u{fe0f} **Code:** No coding activity today.

\u{1f3af} **Overall:** \u{274c} Failed to generate summary: timeout

\u{1f9ec} Current Level: 1 | Total XP: 0 (No level record found)";
    let summary = parse_report(input);

    assert_eq!(summary.xp_breakdown, Some(Vec::new()));
    assert_eq!(summary.total_xp_today.as_deref(), Some("0"));
    assert_eq!(summary.mood.as_deref(), Some("No mood logs today."));
    assert_eq!(summary.code.as_deref(), Some("No coding activity today."));
    assert_eq!(
        summary.overall.as_deref(),
        Some("\u{274c} Failed to generate summary: timeout")
    );
    assert_eq!(summary.level.as_deref(), Some("1"));
    assert_eq!(summary.total_xp_ever.as_deref(), Some("0"));
}

#[test]
fn parses_report_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("report.md");
    fs::write(&path, BACKEND_REPORT).expect("write report");

    let file = File::open(&path).expect("open report");
    let summary = parse_report_from_reader(BufReader::new(file));

    assert_eq!(summary, parse_report(BACKEND_REPORT));
}

#[test]
fn truncated_report_keeps_what_arrived() {
    let cut = BACKEND_REPORT
        .find("- Coding")
        .expect("coding entry present");
    let summary = parse_report(&BACKEND_REPORT[..cut]);

    assert_eq!(summary.title.as_deref(), Some("Daily Report"));
    assert_eq!(summary.xp_breakdown.as_ref().map(Vec::len), Some(3));
    assert!(summary.total_xp_today.is_none());
    assert!(summary.level.is_none());
}
