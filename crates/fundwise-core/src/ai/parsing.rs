//! JSON parsing helpers for AI backend responses
//!
//! Models often wrap the JSON payload in extra prose, so the first balanced
//! object is extracted before deserializing.

use serde::Deserialize;

use crate::error::{Error, Result};

use super::types::MonthSummary;

const MAX_RAW_IN_ERROR: usize = 200;

/// Slice out the first balanced `{...}` object in `response`
pub fn extract_json(response: &str) -> Result<&str> {
    let response = response.trim();

    if let Some(start) = response.find('{') {
        let mut depth = 0;
        for (i, c) in response[start..].char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(&response[start..=start + i]);
                    }
                }
                _ => {}
            }
        }
    }

    Err(Error::InvalidData(format!(
        "No JSON found in AI response | Raw: {}",
        truncate(response)
    )))
}

#[derive(Debug, Deserialize)]
struct MonthSummaryResponse {
    summary: String,
    #[serde(default)]
    highlights: Vec<String>,
}

/// Parse a monthly summary and stamp it with the model that wrote it
pub fn parse_month_summary(response: &str, model: &str) -> Result<MonthSummary> {
    let json_str = extract_json(response)?;
    let raw: MonthSummaryResponse = serde_json::from_str(json_str).map_err(|e| {
        Error::InvalidData(format!(
            "Invalid summary JSON from AI: {} | Raw: {}",
            e,
            truncate(json_str)
        ))
    })?;

    let summary = raw.summary.trim().to_string();
    if summary.is_empty() {
        return Err(Error::Ai("AI returned an empty summary".into()));
    }

    Ok(MonthSummary {
        summary,
        highlights: raw
            .highlights
            .into_iter()
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .collect(),
        model: model.to_string(),
        generated_at: chrono::Utc::now(),
    })
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_RAW_IN_ERROR) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
