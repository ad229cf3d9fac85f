use crate::ai::{AIClient, MonthSummary, SummaryBackend};

use super::types::MonthlyStats;

/// Best-effort prose summary of a month
///
/// Returns `None` when no backend is configured or the backend fails. The
/// stats are only read, so numeric results are the same either way.
pub async fn generate_summary(ai: Option<&AIClient>, stats: &MonthlyStats) -> Option<MonthSummary> {
    let client = ai?;

    match client.summarize_month(stats).await {
        Ok(summary) => {
            tracing::debug!(
                month = %stats.month,
                model = client.model(),
                highlights = summary.highlights.len(),
                "Generated monthly summary"
            );
            Some(summary)
        }
        Err(e) => {
            tracing::warn!(
                month = %stats.month,
                host = client.host(),
                error = %e,
                "Monthly summary unavailable"
            );
            None
        }
    }
}
