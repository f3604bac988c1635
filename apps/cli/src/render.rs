use std::fmt::Write;

use higherme_client::Dashboard;
use higherme_core::{LevelProgress, ParsedReportSummary};

const BAR_WIDTH: usize = 30;
const NO_DATA: &str = "No data yet";

pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn progress(level: u32, total_xp: u64, progress: &LevelProgress) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Level {level}  ({total_xp} XP total)");
    let _ = writeln!(
        out,
        "{} {}/100 XP ({:.0}%)",
        progress_bar(progress.progress_fraction, BAR_WIDTH),
        progress.current_level_xp,
        progress.percent()
    );
    let _ = writeln!(out, "Next level at {} XP", progress.xp_to_next_level);
    out
}

fn section(out: &mut String, name: &str, value: Option<&str>) {
    let _ = writeln!(out, "{name}: {}", value.unwrap_or(NO_DATA));
}

pub fn report(summary: &ParsedReportSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", summary.title.as_deref().unwrap_or("Daily Report"));

    match summary.xp_breakdown.as_deref() {
        Some([]) | None => {
            let _ = writeln!(out, "XP breakdown: {NO_DATA}");
        }
        Some(entries) => {
            let _ = writeln!(out, "XP breakdown:");
            for entry in entries {
                let _ = writeln!(
                    out,
                    "  [{}] {}: +{} XP",
                    entry.icon().as_str(),
                    entry.display_category(),
                    entry.xp
                );
            }
        }
    }
    let _ = writeln!(
        out,
        "Total XP today: +{}",
        summary.total_xp_today.as_deref().unwrap_or("0")
    );
    section(&mut out, "Mood", summary.mood.as_deref());
    section(&mut out, "Health", summary.health.as_deref());
    section(&mut out, "Code", summary.code.as_deref());
    section(&mut out, "Overall", summary.overall.as_deref());
    if let (Some(level), Some(total)) = (&summary.level, &summary.total_xp_ever) {
        let _ = writeln!(out, "Current level {level}, {total} XP total");
    }
    out
}

pub fn dashboard(dashboard: &Dashboard) -> String {
    let mut out = progress(
        dashboard.stats.current_level,
        dashboard.stats.total_xp,
        &dashboard.progress,
    );
    let _ = writeln!(out, "Today: +{} XP", dashboard.stats.todays_xp);
    out.push('\n');
    out.push_str(&report(&dashboard.report));
    out
}
