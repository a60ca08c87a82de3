// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Report data model and summary metrics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::features::{conventional_parts, Feature, FeatureStatus};
use crate::history::CommitRecord;
use crate::risk::{RiskEntry, Severity};
use crate::scan::RepositorySnapshot;
use crate::team::DeveloperProfile;

/// A recoverable condition the analysis worked around.
///
/// Every degradation is surfaced in the report's Methodology & Confidence
/// section so readers know which numbers are partial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Degradation {
    /// Pipeline stage that degraded, e.g. `history` or `report`.
    pub stage: String,
    pub detail: String,
}

/// Roll-up numbers for the executive tier of the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_commits: usize,
    pub merge_commits: usize,
    pub docs_only_commits: usize,
    pub total_features: usize,
    pub total_estimated_hours: f64,
    /// Top-K commit share, 0..=1.
    pub knowledge_concentration: f64,
    /// Smallest number of contributors covering more than half the commits.
    pub bus_factor: usize,
    /// Mean commit-message quality, 0..=1.
    pub message_quality: f64,
    pub overall_risk_level: Severity,
    /// Weighted project health, 0..=1.
    pub health_score: f64,
    pub health_rating: String,
}

/// Everything the compiler needs to render a report, serializable as the
/// `--save-data` JSON dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub project_name: String,
    pub snapshot: RepositorySnapshot,
    pub features: Vec<Feature>,
    pub developers: Vec<DeveloperProfile>,
    pub risks: Vec<RiskEntry>,
    pub metrics: SummaryMetrics,
    pub degradations: Vec<Degradation>,
    pub generated_at: DateTime<Utc>,
}

impl SummaryMetrics {
    /// Compute the roll-up from the finished pipeline stages.
    pub fn compute(
        commits: &[CommitRecord],
        features: &[Feature],
        developers: &[DeveloperProfile],
        risks: &[RiskEntry],
        docs_only_commits: usize,
        knowledge_concentration: f64,
    ) -> Self {
        let merge_commits = commits.iter().filter(|c| c.is_merge()).count();
        let total_estimated_hours: f64 = features.iter().map(|f| f.estimated_hours).sum();
        let message_quality = message_quality(commits);
        let overall_risk_level = overall_risk_level(risks);
        let health_score = health_score(
            message_quality,
            features,
            overall_risk_level,
            developers,
            knowledge_concentration,
            commits.is_empty(),
        );

        Self {
            total_commits: commits.len(),
            merge_commits,
            docs_only_commits,
            total_features: features.len(),
            total_estimated_hours: (total_estimated_hours * 10.0).round() / 10.0,
            knowledge_concentration,
            bus_factor: bus_factor(developers),
            message_quality,
            overall_risk_level,
            health_score,
            health_rating: health_rating(health_score).to_string(),
        }
    }
}

/// Mean per-commit message quality. A summary scores for being long
/// enough to mean something and for following the conventional format.
fn message_quality(commits: &[CommitRecord]) -> f64 {
    if commits.is_empty() {
        return 0.0;
    }
    let total: f64 = commits
        .iter()
        .map(|c| {
            let mut score = 0.0;
            if c.summary.trim().len() >= 10 {
                score += 0.4;
            }
            if conventional_parts(&c.summary).is_some() {
                score += 0.6;
            }
            score
        })
        .sum();
    total / commits.len() as f64
}

/// Smallest prefix of the ordered profiles covering more than half the
/// commits. Zero for an empty team.
fn bus_factor(developers: &[DeveloperProfile]) -> usize {
    let total: usize = developers.iter().map(|d| d.commits).sum();
    if total == 0 {
        return 0;
    }
    let mut covered = 0;
    for (i, dev) in developers.iter().enumerate() {
        covered += dev.commits;
        if covered * 2 > total {
            return i + 1;
        }
    }
    developers.len()
}

/// Average the per-entry severity midpoints into one level.
fn overall_risk_level(risks: &[RiskEntry]) -> Severity {
    if risks.is_empty() {
        return Severity::Low;
    }
    fn weight(s: Severity) -> f64 {
        match s {
            Severity::Low => 0.2,
            Severity::Medium => 0.5,
            Severity::High => 0.8,
        }
    }
    let avg: f64 = risks
        .iter()
        .map(|r| (weight(r.probability) + weight(r.impact)) / 2.0)
        .sum::<f64>()
        / risks.len() as f64;

    if avg >= 0.7 {
        Severity::High
    } else if avg >= 0.4 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Mean over the available health factors: message quality, feature
/// completion, inverted risk level and team stability. Factors with no
/// data are skipped; with nothing to score the result is a neutral 0.5.
fn health_score(
    message_quality: f64,
    features: &[Feature],
    overall_risk: Severity,
    developers: &[DeveloperProfile],
    knowledge_concentration: f64,
    empty_history: bool,
) -> f64 {
    let mut score = 0.0;
    let mut factors = 0u32;

    if !empty_history {
        score += message_quality;
        factors += 1;
    }

    if !features.is_empty() {
        let completed = features
            .iter()
            .filter(|f| f.status == FeatureStatus::Completed)
            .count();
        score += completed as f64 / features.len() as f64;
        factors += 1;
    }

    score += match overall_risk {
        Severity::Low => 1.0,
        Severity::Medium => 0.6,
        Severity::High => 0.2,
    };
    factors += 1;

    if !developers.is_empty() {
        score += 1.0 - knowledge_concentration;
        factors += 1;
    }

    if factors == 0 {
        0.5
    } else {
        score / factors as f64
    }
}

fn health_rating(score: f64) -> &'static str {
    if score >= 0.8 {
        "Excellent"
    } else if score >= 0.6 {
        "Good"
    } else if score >= 0.4 {
        "Fair"
    } else {
        "Poor"
    }
}
