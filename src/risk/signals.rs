// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Aggregate signals the risk rules evaluate against.

use chrono::{DateTime, Utc};

use crate::features::{ComplexityTier, Feature};
use crate::history::CommitRecord;
use crate::team::{knowledge_concentration, DeveloperProfile};

/// Pre-computed aggregates over the analysis results.
///
/// Rules read these numbers instead of re-walking the raw data, so each
/// signal is computed exactly once per run.
#[derive(Debug, Clone)]
pub struct RiskSignals {
    pub total_commits: usize,
    pub contributor_count: usize,
    /// Share of all commits owned by the top-K contributors, 0..=1.
    pub knowledge_concentration: f64,
    /// Share of features in the High complexity tier, 0..=1.
    pub high_complexity_share: f64,
    /// Mean lines changed per commit across the whole history.
    pub avg_lines_per_commit: f64,
    /// Days between the newest commit and the analysis timestamp.
    pub days_since_last_commit: i64,
    /// Share of commits that touched only documentation or config, 0..=1.
    pub docs_only_share: f64,
}

impl RiskSignals {
    /// Aggregate signals from the upstream pipeline stages.
    pub fn gather(
        commits: &[CommitRecord],
        features: &[Feature],
        profiles: &[DeveloperProfile],
        docs_only_commits: usize,
        top_k: usize,
        analyzed_at: DateTime<Utc>,
    ) -> Self {
        let total_commits = commits.len();

        let high_features = features
            .iter()
            .filter(|f| f.complexity == ComplexityTier::High)
            .count();
        let high_complexity_share = if features.is_empty() {
            0.0
        } else {
            high_features as f64 / features.len() as f64
        };

        let total_lines: usize = commits.iter().map(|c| c.lines_changed()).sum();
        let avg_lines_per_commit = if total_commits > 0 {
            total_lines as f64 / total_commits as f64
        } else {
            0.0
        };

        let days_since_last_commit = commits
            .iter()
            .map(|c| c.timestamp)
            .max()
            .map(|newest| (analyzed_at - newest).num_days())
            .unwrap_or(0);

        let docs_only_share = if total_commits > 0 {
            docs_only_commits as f64 / total_commits as f64
        } else {
            0.0
        };

        Self {
            total_commits,
            contributor_count: profiles.len(),
            knowledge_concentration: knowledge_concentration(profiles, top_k),
            high_complexity_share,
            avg_lines_per_commit,
            days_since_last_commit,
            docs_only_share,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{AuthorIdentity, FileStat};
    use crate::team::analyze_contributors;
    use std::collections::HashMap;

    fn record(email: &str, added: usize, secs: i64) -> CommitRecord {
        CommitRecord {
            hash: format!("{:040x}", secs as u64),
            author: AuthorIdentity::normalize("Dev", email, &HashMap::new()),
            timestamp: DateTime::<Utc>::from_timestamp(secs, 0).unwrap(),
            summary: "work".to_string(),
            files: vec![FileStat {
                path: "src/a.rs".to_string(),
                added,
                removed: 0,
            }],
            parent_count: 1,
        }
    }

    #[test]
    fn test_gather_basic_aggregates() {
        let commits = vec![
            record("a@example.com", 100, 0),
            record("a@example.com", 300, 86_400),
        ];
        let profiles = analyze_contributors(&commits);
        let analyzed_at = DateTime::<Utc>::from_timestamp(3 * 86_400, 0).unwrap();

        let signals = RiskSignals::gather(&commits, &[], &profiles, 0, 1, analyzed_at);

        assert_eq!(signals.total_commits, 2);
        assert_eq!(signals.contributor_count, 1);
        assert!((signals.knowledge_concentration - 1.0).abs() < 1e-9);
        assert!((signals.avg_lines_per_commit - 200.0).abs() < 1e-9);
        assert_eq!(signals.days_since_last_commit, 2);
    }

    #[test]
    fn test_gather_empty_history() {
        let analyzed_at = Utc::now();
        let signals = RiskSignals::gather(&[], &[], &[], 0, 1, analyzed_at);
        assert_eq!(signals.total_commits, 0);
        assert_eq!(signals.avg_lines_per_commit, 0.0);
        assert_eq!(signals.days_since_last_commit, 0);
    }
}
