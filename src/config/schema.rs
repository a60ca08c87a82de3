// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from repolens.toml.
//! Every threshold the analysis heuristics use lives here so that each stage
//! stays a pure function of its inputs plus this configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{ConfigError, LensError, Result};

/// The main configuration structure for repolens.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LensConfig {
    /// Structure-scan configuration.
    pub scan: ScanConfig,

    /// History-mining configuration.
    pub history: HistoryConfig,

    /// Feature-mapping configuration.
    pub features: FeaturesConfig,

    /// Risk-rule configuration.
    pub risk: RiskConfig,

    /// Report output configuration.
    pub report: ReportConfig,
}

impl LensConfig {
    /// Load configuration from the default locations.
    pub fn load() -> Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        super::loader::load_config_from(path)
    }

    /// Validate cross-field invariants that serde cannot express.
    ///
    /// Complexity-tier boundaries must be strictly monotonic so the
    /// Low/Medium/High buckets never overlap.
    pub fn validate(&self) -> Result<()> {
        if !(self.features.low_max_score > 0.0) {
            return Err(invalid(
                "features.low_max_score",
                "must be greater than zero",
            ));
        }
        if self.features.medium_max_score <= self.features.low_max_score {
            return Err(invalid(
                "features.medium_max_score",
                "must be greater than features.low_max_score",
            ));
        }
        if self.features.estimate_buffer < 0.0 {
            return Err(invalid("features.estimate_buffer", "must not be negative"));
        }
        for (key, value) in [
            ("features.hours_low", self.features.hours_low),
            ("features.hours_medium", self.features.hours_medium),
            ("features.hours_high", self.features.hours_high),
        ] {
            if value <= 0.0 {
                return Err(invalid(key, "must be greater than zero"));
            }
        }
        if self.risk.top_k_contributors == 0 {
            return Err(invalid("risk.top_k_contributors", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.risk.knowledge_concentration_threshold) {
            return Err(invalid(
                "risk.knowledge_concentration_threshold",
                "must be between 0.0 and 1.0",
            ));
        }
        if self.history.max_commits == 0 {
            return Err(invalid("history.max_commits", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(key: &str, message: &str) -> LensError {
    LensError::Config(ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    })
}

/// Structure-scan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum directory depth to descend.
    pub max_depth: usize,

    /// Directory names that are never descended into.
    pub ignore_dirs: Vec<String>,

    /// Additional glob patterns for paths to skip.
    pub ignore_globs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: 16,
            ignore_dirs: vec![
                ".git".to_string(),
                ".hg".to_string(),
                ".svn".to_string(),
                "node_modules".to_string(),
                "target".to_string(),
                "vendor".to_string(),
                "dist".to_string(),
                "build".to_string(),
                "__pycache__".to_string(),
                ".venv".to_string(),
            ],
            ignore_globs: Vec::new(),
        }
    }
}

/// History-mining configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of commits to mine before truncating.
    ///
    /// The walk runs oldest first, so when the cap is hit the *earliest*
    /// N commits are retained and everything newer is dropped. Combine
    /// with `since` to cap recent history instead.
    pub max_commits: usize,

    /// Whether merge commits are included in the mined sequence.
    pub include_merges: bool,

    /// Wall-clock budget for the history read, in seconds.
    pub timeout_secs: u64,

    /// Only mine commits at or after this RFC 3339 timestamp.
    pub since: Option<String>,

    /// Only mine commits at or before this RFC 3339 timestamp.
    pub until: Option<String>,

    /// Author-alias map: observed email (lowercased) to canonical email.
    pub aliases: HashMap<String, String>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_commits: 10_000,
            include_merges: false,
            timeout_secs: 300,
            since: None,
            until: None,
            aliases: HashMap::new(),
        }
    }
}

/// Feature-mapping configuration.
///
/// The complexity score is `weight_commits * commits + weight_lines *
/// lines_changed + weight_dirs * distinct_dirs`, bucketed at
/// `low_max_score` and `medium_max_score`. Estimated hours are
/// `commits * hours_<tier> * (1 + estimate_buffer)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Weight of the commit count in the complexity score.
    pub weight_commits: f64,

    /// Weight of the total changed-line count in the complexity score.
    pub weight_lines: f64,

    /// Weight of the distinct-directory count in the complexity score.
    pub weight_dirs: f64,

    /// Upper bound (exclusive) of the Low complexity bucket.
    pub low_max_score: f64,

    /// Upper bound (exclusive) of the Medium complexity bucket.
    pub medium_max_score: f64,

    /// Hours per commit for Low complexity features.
    pub hours_low: f64,

    /// Hours per commit for Medium complexity features.
    pub hours_medium: f64,

    /// Hours per commit for High complexity features.
    pub hours_high: f64,

    /// Testing/documentation buffer applied on top of the base estimate.
    pub estimate_buffer: f64,

    /// Features with a commit within this many days of the newest
    /// repository commit are reported as in progress.
    pub active_window_days: i64,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            weight_commits: 1.0,
            weight_lines: 0.01,
            weight_dirs: 0.5,
            low_max_score: 6.0,
            medium_max_score: 20.0,
            hours_low: 1.5,
            hours_medium: 3.0,
            hours_high: 6.0,
            estimate_buffer: 0.20,
            active_window_days: 30,
        }
    }
}

/// Risk-rule configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Knowledge concentration above this share triggers the bus-factor rule.
    pub knowledge_concentration_threshold: f64,

    /// Number of top contributors whose combined share defines concentration.
    pub top_k_contributors: usize,

    /// Share of High-complexity features that triggers the complexity rule.
    pub high_complexity_ratio: f64,

    /// Mean changed lines per commit that triggers the churn rule.
    pub churn_lines_per_commit: f64,

    /// Days without a commit before the project counts as stale.
    pub stale_after_days: i64,

    /// Minimum docs-only commit share expected of a non-trivial history.
    pub docs_share_floor: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            knowledge_concentration_threshold: 0.6,
            top_k_contributors: 1,
            high_complexity_ratio: 0.4,
            churn_lines_per_commit: 400.0,
            stale_after_days: 180,
            docs_share_floor: 0.02,
        }
    }
}

/// Report output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Default report path, relative to the working directory.
    pub output_file: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_file: "PROJECT_ANALYSIS_REPORT.md".to_string(),
        }
    }
}
