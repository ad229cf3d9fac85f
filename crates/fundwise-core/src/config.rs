//! Engine configuration
//!
//! Thresholds and weights used by the score, alert and insight rules.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/fundwise/config/engine.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! An override file only needs the keys it changes.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

/// Budget score weights
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreConfig {
    pub over_budget_penalty: i32,
    pub near_limit_penalty: i32,
    pub near_limit_percent: f64,
    pub under_budget_bonus: i32,
    pub bonus_ratio: f64,
    pub on_track_min: i32,
    pub needs_attention_min: i32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            over_budget_penalty: 20,
            near_limit_penalty: 5,
            near_limit_percent: 90.0,
            under_budget_bonus: 10,
            bonus_ratio: 0.8,
            on_track_min: 70,
            needs_attention_min: 40,
        }
    }
}

/// Budget alert thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct AlertConfig {
    pub threshold_percent: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            threshold_percent: 90.0,
        }
    }
}

/// Monthly insight rules
#[derive(Debug, Clone, PartialEq)]
pub struct InsightConfig {
    /// Envelope health: utilization from here up to 100% is "at risk"
    pub at_risk_percent: f64,
    /// Funds listed individually in the spending breakdown
    pub breakdown_top_n: usize,
    /// Overspent funds checked against last month for a recurring pattern
    pub recurring_candidates: usize,
    /// Utilization above which a single overspend is called out
    pub large_overspend_percent: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            at_risk_percent: 80.0,
            breakdown_top_n: 5,
            recurring_candidates: 3,
            large_overspend_percent: 150.0,
        }
    }
}

/// Prose summary settings
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryConfig {
    pub timeout: Duration,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20),
        }
    }
}

/// All engine settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub score: ScoreConfig,
    pub alerts: AlertConfig,
    pub insights: InsightConfig,
    pub summary: SummaryConfig,
}

impl EngineConfig {
    /// Load from the override location, falling back to embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load from an explicit file, falling back to embedded defaults when it
    /// does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Parse TOML content on top of the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// Default override location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("fundwise").join("config").join("engine.toml"))
}

fn load_config(override_path: Option<&Path>) -> Result<EngineConfig> {
    let path = match override_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    let content = match path {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Loading engine config override");
            fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    score: Option<RawScore>,
    alerts: Option<RawAlerts>,
    insights: Option<RawInsights>,
    summary: Option<RawSummary>,
}

#[derive(Debug, Deserialize)]
struct RawScore {
    over_budget_penalty: Option<i32>,
    near_limit_penalty: Option<i32>,
    near_limit_percent: Option<f64>,
    under_budget_bonus: Option<i32>,
    bonus_ratio: Option<f64>,
    on_track_min: Option<i32>,
    needs_attention_min: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct RawAlerts {
    threshold_percent: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    at_risk_percent: Option<f64>,
    breakdown_top_n: Option<usize>,
    recurring_candidates: Option<usize>,
    large_overspend_percent: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawSummary {
    timeout_secs: Option<u64>,
}

fn parse_config(content: &str) -> Result<EngineConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = EngineConfig::default();

    if let Some(score) = raw.score {
        let target = &mut config.score;
        if let Some(v) = score.over_budget_penalty {
            target.over_budget_penalty = v;
        }
        if let Some(v) = score.near_limit_penalty {
            target.near_limit_penalty = v;
        }
        if let Some(v) = score.near_limit_percent {
            target.near_limit_percent = v;
        }
        if let Some(v) = score.under_budget_bonus {
            target.under_budget_bonus = v;
        }
        if let Some(v) = score.bonus_ratio {
            target.bonus_ratio = v;
        }
        if let Some(v) = score.on_track_min {
            target.on_track_min = v;
        }
        if let Some(v) = score.needs_attention_min {
            target.needs_attention_min = v;
        }
    }

    if let Some(alerts) = raw.alerts {
        if let Some(v) = alerts.threshold_percent {
            config.alerts.threshold_percent = v;
        }
    }

    if let Some(insights) = raw.insights {
        let target = &mut config.insights;
        if let Some(v) = insights.at_risk_percent {
            target.at_risk_percent = v;
        }
        if let Some(v) = insights.breakdown_top_n {
            target.breakdown_top_n = v;
        }
        if let Some(v) = insights.recurring_candidates {
            target.recurring_candidates = v;
        }
        if let Some(v) = insights.large_overspend_percent {
            target.large_overspend_percent = v;
        }
    }

    if let Some(summary) = raw.summary {
        if let Some(secs) = summary.timeout_secs {
            config.summary.timeout = Duration::from_secs(secs);
        }
    }

    if config.score.needs_attention_min > config.score.on_track_min {
        return Err(Error::Config(
            "score.needs_attention_min must not exceed score.on_track_min".into(),
        ));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_config_matches_defaults() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = EngineConfig::from_toml(
            r#"
            [alerts]
            threshold_percent = 75.0

            [insights]
            breakdown_top_n = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.alerts.threshold_percent, 75.0);
        assert_eq!(config.insights.breakdown_top_n, 3);
        assert_eq!(config.insights.at_risk_percent, 80.0);
        assert_eq!(config.score, ScoreConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            EngineConfig::from_toml("[score\nbroken"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_inverted_status_bands_rejected() {
        let result = EngineConfig::from_toml(
            r#"
            [score]
            on_track_min = 30
            needs_attention_min = 50
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file_and_missing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[summary]\ntimeout_secs = 5").unwrap();
        let config = EngineConfig::load_from(file.path()).unwrap();
        assert_eq!(config.summary.timeout, Duration::from_secs(5));

        let missing = file.path().with_extension("missing");
        let config = EngineConfig::load_from(&missing).unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
