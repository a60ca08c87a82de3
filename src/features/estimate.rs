// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Complexity scoring and effort estimation.

use serde::{Deserialize, Serialize};

use crate::config::FeaturesConfig;

/// Complexity classification of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplexityTier {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for ComplexityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplexityTier::Low => write!(f, "Low"),
            ComplexityTier::Medium => write!(f, "Medium"),
            ComplexityTier::High => write!(f, "High"),
        }
    }
}

/// Business-priority tag inferred from a feature's label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

/// Label keywords that mark business-critical surface area.
const HIGH_VALUE_KEYWORDS: &[&str] = &[
    "auth", "login", "payment", "billing", "user", "account", "core", "security",
];

const MEDIUM_VALUE_KEYWORDS: &[&str] = &["api", "service", "component", "feature", "data"];

/// Multi-factor complexity score: weighted sum of commit count, changed
/// lines and distinct directories touched.
pub fn complexity_score(
    commit_count: usize,
    lines_changed: usize,
    distinct_dirs: usize,
    config: &FeaturesConfig,
) -> f64 {
    config.weight_commits * commit_count as f64
        + config.weight_lines * lines_changed as f64
        + config.weight_dirs * distinct_dirs as f64
}

/// Bucket a score into a tier. Boundaries are validated monotonic at
/// config load, so the buckets can never overlap.
pub fn tier_for_score(score: f64, config: &FeaturesConfig) -> ComplexityTier {
    if score < config.low_max_score {
        ComplexityTier::Low
    } else if score < config.medium_max_score {
        ComplexityTier::Medium
    } else {
        ComplexityTier::High
    }
}

/// Estimated hours: commits x per-tier multiplier x (1 + buffer),
/// rounded to a tenth of an hour.
pub fn estimated_hours(
    commit_count: usize,
    tier: ComplexityTier,
    config: &FeaturesConfig,
) -> f64 {
    let multiplier = match tier {
        ComplexityTier::Low => config.hours_low,
        ComplexityTier::Medium => config.hours_medium,
        ComplexityTier::High => config.hours_high,
    };
    let hours = commit_count as f64 * multiplier * (1.0 + config.estimate_buffer);
    (hours * 10.0).round() / 10.0
}

/// Infer a business-priority tag from the feature label.
pub fn priority_for_label(label: &str) -> Priority {
    let lower = label.to_ascii_lowercase();
    if HIGH_VALUE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Priority::High
    } else if MEDIUM_VALUE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Priority::Medium
    } else {
        Priority::Low
    }
}
