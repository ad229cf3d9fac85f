//! Types produced by AI backends

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prose summary of one month of insights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    /// A short paragraph describing the month
    pub summary: String,
    /// One-line callouts, most important first
    pub highlights: Vec<String>,
    /// Model that produced the text
    pub model: String,
    pub generated_at: DateTime<Utc>,
}
