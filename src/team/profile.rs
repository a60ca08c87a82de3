// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Per-contributor aggregation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::history::{AuthorIdentity, CommitRecord};

use super::skill::{contribution_pattern, skill_tier, SkillTier};

/// Aggregated statistics for one normalized author identity.
///
/// Recomputed in full each run; nothing persists across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeveloperProfile {
    pub author: AuthorIdentity,
    pub commits: usize,
    /// Share of all mined commits, in percent.
    pub share_percent: f64,
    pub lines_added: usize,
    pub lines_removed: usize,
    pub skill: SkillTier,
    /// Temporal contribution descriptor: burst, sustained, steady, occasional.
    pub pattern: String,
    pub first_commit: DateTime<Utc>,
    pub last_commit: DateTime<Utc>,
}

impl DeveloperProfile {
    /// Mean changed lines per commit.
    pub fn avg_change_size(&self) -> f64 {
        if self.commits == 0 {
            return 0.0;
        }
        (self.lines_added + self.lines_removed) as f64 / self.commits as f64
    }
}

struct Accum {
    author: AuthorIdentity,
    commits: usize,
    lines_added: usize,
    lines_removed: usize,
    areas: BTreeSet<String>,
    first: DateTime<Utc>,
    last: DateTime<Utc>,
}

/// Build one profile per distinct author identity.
///
/// Ordered by commit count descending; ties broken by earliest first
/// contribution. The commit-count sum across profiles equals the input
/// length exactly.
pub fn analyze_contributors(commits: &[CommitRecord]) -> Vec<DeveloperProfile> {
    let mut accums: HashMap<String, Accum> = HashMap::new();

    for commit in commits {
        let accum = accums
            .entry(commit.author.email.clone())
            .or_insert_with(|| Accum {
                author: commit.author.clone(),
                commits: 0,
                lines_added: 0,
                lines_removed: 0,
                areas: BTreeSet::new(),
                first: commit.timestamp,
                last: commit.timestamp,
            });

        accum.commits += 1;
        for file in &commit.files {
            accum.lines_added += file.added;
            accum.lines_removed += file.removed;
            if let Some(top) = file.path.split('/').next() {
                accum.areas.insert(top.to_string());
            }
        }
        if commit.timestamp < accum.first {
            accum.first = commit.timestamp;
        }
        if commit.timestamp > accum.last {
            accum.last = commit.timestamp;
        }
    }

    let total = commits.len();
    let mut profiles: Vec<DeveloperProfile> = accums
        .into_values()
        .map(|a| {
            let avg = if a.commits > 0 {
                (a.lines_added + a.lines_removed) as f64 / a.commits as f64
            } else {
                0.0
            };
            let span_days = (a.last - a.first).num_days();
            DeveloperProfile {
                skill: skill_tier(a.commits, avg, a.areas.len()),
                pattern: contribution_pattern(a.commits, span_days).to_string(),
                share_percent: if total > 0 {
                    a.commits as f64 * 100.0 / total as f64
                } else {
                    0.0
                },
                author: a.author,
                commits: a.commits,
                lines_added: a.lines_added,
                lines_removed: a.lines_removed,
                first_commit: a.first,
                last_commit: a.last,
            }
        })
        .collect();

    profiles.sort_by(|a, b| {
        b.commits
            .cmp(&a.commits)
            .then(a.first_commit.cmp(&b.first_commit))
            .then(a.author.email.cmp(&b.author.email))
    });

    profiles
}

/// Fraction of all commits owned by the top-K contributors.
///
/// Profiles must already be ordered by commit count descending, as
/// [`analyze_contributors`] returns them.
pub fn knowledge_concentration(profiles: &[DeveloperProfile], top_k: usize) -> f64 {
    let total: usize = profiles.iter().map(|p| p.commits).sum();
    if total == 0 {
        return 0.0;
    }
    let top: usize = profiles.iter().take(top_k).map(|p| p.commits).sum();
    top as f64 / total as f64
}
