// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Feature mapping module.
//!
//! Groups mined commits into inferred features with complexity tiers and
//! effort estimates.

mod estimate;
mod grouping;

pub use estimate::{
    complexity_score, estimated_hours, priority_for_label, tier_for_score, ComplexityTier,
    Priority,
};
pub use grouping::{conventional_parts, group_key, ConventionalParts, GroupKey};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::config::FeaturesConfig;
use crate::history::CommitRecord;
use crate::scan::RepositorySnapshot;

/// Delivery status of an inferred feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureStatus {
    Completed,
    InProgress,
    /// Reserved for feature sources that carry no commits; commit-derived
    /// groups always have at least one.
    Planned,
}

impl std::fmt::Display for FeatureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureStatus::Completed => write!(f, "Completed"),
            FeatureStatus::InProgress => write!(f, "In Progress"),
            FeatureStatus::Planned => write!(f, "Planned"),
        }
    }
}

/// An inferred, commit-grouped unit of functionality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub label: String,
    /// Hashes of the contributing commits, in mined (ascending) order.
    pub commit_hashes: Vec<String>,
    pub complexity: ComplexityTier,
    pub estimated_hours: f64,
    pub priority: Priority,
    pub status: FeatureStatus,
}

/// Output of the feature-mapping stage.
#[derive(Debug, Clone, Default)]
pub struct MappingOutcome {
    /// Features ordered by estimated hours descending.
    pub features: Vec<Feature>,
    /// Commits grouped into some feature.
    pub grouped_commits: usize,
    /// Commits excluded as pure documentation/config work.
    pub docs_only_commits: usize,
}

struct GroupAccum {
    hashes: Vec<String>,
    lines_changed: usize,
    dirs: BTreeSet<PathBuf>,
    last_commit: DateTime<Utc>,
}

/// Group commits into features and score each group.
///
/// Empty input yields an empty feature list, never an error.
pub fn map_features(
    commits: &[CommitRecord],
    snapshot: &RepositorySnapshot,
    config: &FeaturesConfig,
) -> MappingOutcome {
    let mut outcome = MappingOutcome::default();
    let newest = match commits.iter().map(|c| c.timestamp).max() {
        Some(ts) => ts,
        None => return outcome,
    };

    let mut groups: BTreeMap<GroupKey, GroupAccum> = BTreeMap::new();

    for commit in commits {
        let Some(key) = group_key(commit) else {
            outcome.docs_only_commits += 1;
            continue;
        };
        outcome.grouped_commits += 1;

        let accum = groups.entry(key).or_insert_with(|| GroupAccum {
            hashes: Vec::new(),
            lines_changed: 0,
            dirs: BTreeSet::new(),
            last_commit: commit.timestamp,
        });
        accum.hashes.push(commit.hash.clone());
        accum.lines_changed += commit.lines_changed();
        accum.dirs.extend(grouping::distinct_dirs(commit));
        if commit.timestamp > accum.last_commit {
            accum.last_commit = commit.timestamp;
        }
    }

    let active_window = Duration::days(config.active_window_days);

    for (key, accum) in groups {
        let commit_count = accum.hashes.len();
        let score = complexity_score(commit_count, accum.lines_changed, accum.dirs.len(), config);
        let complexity = tier_for_score(score, config);

        let label = match &key {
            // The repository-root group takes the project's own name.
            GroupKey::Path(p) if p == "root" => snapshot
                .root
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "Root".to_string()),
            _ => key.label(),
        };

        let status = if newest - accum.last_commit <= active_window {
            FeatureStatus::InProgress
        } else {
            FeatureStatus::Completed
        };

        outcome.features.push(Feature {
            id: key.id(),
            label: label.clone(),
            commit_hashes: accum.hashes,
            complexity,
            estimated_hours: estimated_hours(commit_count, complexity, config),
            priority: priority_for_label(&label),
            status,
        });
    }

    outcome.features.sort_by(|a, b| {
        b.estimated_hours
            .partial_cmp(&a.estimated_hours)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{AuthorIdentity, FileStat};
    use std::collections::HashMap;

    fn record(summary: &str, paths: &[&str], secs: i64) -> CommitRecord {
        CommitRecord {
            hash: format!("{:040x}", secs as u64 ^ summary.len() as u64),
            author: AuthorIdentity::normalize("Dev", "dev@example.com", &HashMap::new()),
            timestamp: DateTime::<Utc>::from_timestamp(secs, 0).unwrap(),
            summary: summary.to_string(),
            files: paths
                .iter()
                .map(|p| FileStat {
                    path: p.to_string(),
                    added: 10,
                    removed: 2,
                })
                .collect(),
            parent_count: 1,
        }
    }

    fn snapshot() -> RepositorySnapshot {
        RepositorySnapshot {
            root: PathBuf::from("/tmp/sample-project"),
            languages: BTreeMap::new(),
            frameworks: Vec::new(),
            config_files: Vec::new(),
            directories: vec!["src".to_string()],
            total_files: 0,
            classified_files: 0,
            unclassified_files: 0,
            doc_files: 0,
            total_lines: 0,
        }
    }

    #[test]
    fn test_grouping_is_total() {
        let commits = vec![
            record("feat: login form", &["src/login/form.rs"], 1_000),
            record("feat(billing): invoices", &["src/billing/inv.rs"], 2_000),
            record("docs: readme", &["README.md"], 3_000),
            record("fix bug", &["src/login/form.rs"], 4_000),
        ];

        let outcome = map_features(&commits, &snapshot(), &FeaturesConfig::default());

        let grouped: usize = outcome.features.iter().map(|f| f.commit_hashes.len()).sum();
        assert_eq!(grouped, outcome.grouped_commits);
        assert_eq!(grouped + outcome.docs_only_commits, commits.len());
        assert_eq!(outcome.docs_only_commits, 1);
    }

    #[test]
    fn test_feature_hashes_reference_input_commits() {
        let commits = vec![
            record("feat: a", &["src/a/x.rs"], 1_000),
            record("feat: b", &["src/b/y.rs"], 2_000),
        ];
        let outcome = map_features(&commits, &snapshot(), &FeaturesConfig::default());

        let known: BTreeSet<_> = commits.iter().map(|c| c.hash.clone()).collect();
        for feature in &outcome.features {
            for hash in &feature.commit_hashes {
                assert!(known.contains(hash));
            }
        }
    }

    #[test]
    fn test_login_scenario_single_high_priority_feature() {
        // Three commits by one author, all under src/login, two feat-tagged.
        let commits = vec![
            record("feat: add login page", &["src/login/page.rs"], 1_000),
            record("feat: wire login session", &["src/login/session.rs"], 2_000),
            record("polish error copy", &["src/login/page.rs"], 3_000),
        ];

        let outcome = map_features(&commits, &snapshot(), &FeaturesConfig::default());

        assert_eq!(outcome.features.len(), 1);
        let feature = &outcome.features[0];
        assert_eq!(feature.commit_hashes.len(), 3);
        assert_eq!(feature.priority, Priority::High);
        assert_eq!(feature.label, "Login");
    }

    #[test]
    fn test_empty_input_yields_empty_list() {
        let outcome = map_features(&[], &snapshot(), &FeaturesConfig::default());
        assert!(outcome.features.is_empty());
        assert_eq!(outcome.docs_only_commits, 0);
    }

    #[test]
    fn test_estimated_hours_follow_tier_formula() {
        let commits = vec![
            record("feat: small", &["src/tiny/a.rs"], 1_000),
            record("feat: small 2", &["src/tiny/a.rs"], 2_000),
        ];
        let config = FeaturesConfig::default();
        let outcome = map_features(&commits, &snapshot(), &config);

        let feature = &outcome.features[0];
        // score = 2 commits + 0.01*24 lines + 0.5*1 dir = 2.74 => Low tier
        assert_eq!(feature.complexity, ComplexityTier::Low);
        assert_eq!(feature.estimated_hours, 3.6);
    }

    #[test]
    fn test_status_reflects_recency_window() {
        let day = 86_400i64;
        let commits = vec![
            record("feat: old work", &["src/old/a.rs"], 0),
            record("feat: recent work", &["src/new/b.rs"], 100 * day),
        ];
        let outcome = map_features(&commits, &snapshot(), &FeaturesConfig::default());

        let old = outcome
            .features
            .iter()
            .find(|f| f.id == "path:src/old")
            .unwrap();
        let new = outcome
            .features
            .iter()
            .find(|f| f.id == "path:src/new")
            .unwrap();
        assert_eq!(old.status, FeatureStatus::Completed);
        assert_eq!(new.status, FeatureStatus::InProgress);
    }
}
