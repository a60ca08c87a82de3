// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit history mining.
//!
//! Reads the commit graph in-process via git2, oldest first, with a
//! wall-clock budget. A mine that runs out of budget returns the commits
//! read so far together with a `timed_out` flag; it never errors for that.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::config::HistoryConfig;
use crate::error::{HistoryError, LensError, Result};

use super::identity::AuthorIdentity;
use super::repo::Repository;

/// Per-file change statistics within one commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileStat {
    pub path: String,
    pub added: usize,
    pub removed: usize,
}

/// Immutable record of a single commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    pub author: AuthorIdentity,
    pub timestamp: DateTime<Utc>,
    pub summary: String,
    pub files: Vec<FileStat>,
    pub parent_count: usize,
}

impl CommitRecord {
    /// Whether this commit is a merge.
    pub fn is_merge(&self) -> bool {
        self.parent_count > 1
    }

    /// Total lines changed across all files.
    pub fn lines_changed(&self) -> usize {
        self.files.iter().map(|f| f.added + f.removed).sum()
    }
}

/// Result of a history mine: the commit sequence plus degradation flags.
///
/// The commit vector is fully materialized and cached for the run, so
/// callers may iterate it any number of times without re-reading the log.
#[derive(Debug, Clone, Default)]
pub struct HistoryOutcome {
    /// Commits ordered by timestamp ascending.
    pub commits: Vec<CommitRecord>,
    /// The wall-clock budget expired before the walk finished.
    pub timed_out: bool,
    /// The configured commit cap was reached before the walk finished.
    pub truncated: bool,
}

impl HistoryOutcome {
    /// Whether the mined history is incomplete.
    pub fn is_partial(&self) -> bool {
        self.timed_out || self.truncated
    }
}

/// Mine commit history using the budget from the configuration.
pub fn mine_history(repo: &Repository, config: &HistoryConfig) -> Result<HistoryOutcome> {
    mine_history_with_budget(repo, config, Duration::from_secs(config.timeout_secs))
}

/// Mine commit history with an explicit wall-clock budget.
///
/// The budget is checked after each commit is materialized, so a
/// timed-out mine over a non-empty repository always yields at least
/// one commit.
pub fn mine_history_with_budget(
    repo: &Repository,
    config: &HistoryConfig,
    budget: Duration,
) -> Result<HistoryOutcome> {
    if repo.is_unborn() {
        return Ok(HistoryOutcome::default());
    }

    let git = repo.inner();
    let mut revwalk = git.revwalk().map_err(|e| walk_err(&e))?;
    revwalk.push_head().map_err(|e| walk_err(&e))?;
    revwalk
        .set_sorting(git2::Sort::TIME | git2::Sort::REVERSE)
        .map_err(|e| walk_err(&e))?;

    let since = parse_bound(config.since.as_deref(), "history.since");
    let until = parse_bound(config.until.as_deref(), "history.until");

    let start = Instant::now();
    let mut outcome = HistoryOutcome::default();

    for oid_result in revwalk {
        let oid = oid_result.map_err(|e| walk_err(&e))?;
        let commit = git.find_commit(oid).map_err(|e| {
            LensError::History(HistoryError::CommitReadFailed {
                hash: oid.to_string(),
                message: e.message().to_string(),
            })
        })?;

        let parent_count = commit.parent_count();
        let is_merge = parent_count > 1;

        if !(is_merge && !config.include_merges) {
            let timestamp = DateTime::<Utc>::from_timestamp(commit.time().seconds(), 0)
                .unwrap_or_else(Utc::now);

            let in_window = since.map_or(true, |s| timestamp >= s)
                && until.map_or(true, |u| timestamp <= u);

            if in_window {
                let author = commit.author();
                let identity = AuthorIdentity::normalize(
                    author.name().unwrap_or("unknown"),
                    author.email().unwrap_or("unknown"),
                    &config.aliases,
                );

                let files = diff_stats(git, &commit)?;

                outcome.commits.push(CommitRecord {
                    hash: oid.to_string(),
                    author: identity,
                    timestamp,
                    summary: commit.summary().unwrap_or("").to_string(),
                    files,
                    parent_count,
                });

                if outcome.commits.len() >= config.max_commits {
                    outcome.truncated = true;
                    break;
                }
            }
        }

        if start.elapsed() > budget {
            outcome.timed_out = true;
            break;
        }
    }

    // The walk is time-sorted already; make the ordering contract explicit
    // and deterministic across equal timestamps.
    outcome
        .commits
        .sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.hash.cmp(&b.hash)));

    Ok(outcome)
}

/// Per-file added/removed counts against the first parent.
fn diff_stats(git: &git2::Repository, commit: &git2::Commit<'_>) -> Result<Vec<FileStat>> {
    let tree = commit.tree().map_err(|e| diff_err(commit, &e))?;
    let parent_tree = commit.parent(0).ok().and_then(|p| p.tree().ok());

    let diff = git
        .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)
        .map_err(|e| diff_err(commit, &e))?;

    let mut files = Vec::new();
    for idx in 0..diff.deltas().len() {
        let path = diff
            .get_delta(idx)
            .and_then(|d| d.new_file().path().map(|p| p.to_path_buf()))
            .or_else(|| {
                diff.get_delta(idx)
                    .and_then(|d| d.old_file().path().map(|p| p.to_path_buf()))
            });

        let Some(path) = path else { continue };

        let (added, removed) = match git2::Patch::from_diff(&diff, idx) {
            Ok(Some(patch)) => match patch.line_stats() {
                Ok((_, additions, deletions)) => (additions, deletions),
                Err(_) => (0, 0),
            },
            // Binary or unreadable patch: keep the file, zero the counts.
            _ => (0, 0),
        };

        files.push(FileStat {
            path: path.to_string_lossy().to_string(),
            added,
            removed,
        });
    }

    Ok(files)
}

fn parse_bound(raw: Option<&str>, key: &str) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!("Ignoring unparseable {} value '{}': {}", key, raw, e);
            None
        }
    }
}

fn walk_err(e: &git2::Error) -> LensError {
    LensError::History(HistoryError::WalkFailed {
        message: e.message().to_string(),
    })
}

fn diff_err(commit: &git2::Commit<'_>, e: &git2::Error) -> LensError {
    LensError::History(HistoryError::DiffFailed {
        hash: commit.id().to_string(),
        message: e.message().to_string(),
    })
}
