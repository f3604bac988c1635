use higherme_core::{LevelProgress, ParsedReportSummary, UserStats, compute_progress};
use report::parse_report;
use serde::Serialize;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Result;

/// Everything the dashboard view shows, fetched and derived in one go.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub stats: UserStats,
    pub progress: LevelProgress,
    pub report: ParsedReportSummary,
    pub raw_report: String,
}

/// Fetches stats and the daily report concurrently. Either request failing
/// fails the whole load.
pub async fn load_dashboard(client: &ApiClient) -> Result<Dashboard> {
    let (stats, daily) = tokio::try_join!(client.user_stats(), client.daily_report())?;
    let progress = compute_progress(&stats);
    let report = parse_report(&daily.report);
    debug!(
        level = stats.current_level,
        total_xp = stats.total_xp,
        report_sections_found = !report.is_empty(),
        "dashboard loaded"
    );
    Ok(Dashboard {
        stats,
        progress,
        report,
        raw_report: daily.report,
    })
}
