// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit grouping into inferred features.
//!
//! The group key prefers a conventional-commit scope when the message
//! carries one; otherwise the shared leading path prefix of the commit's
//! changed source files decides. Commits touching only non-source paths
//! are excluded from grouping and counted separately.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::history::CommitRecord;
use crate::scan::{classify_path, PathKind};

lazy_static! {
    static ref CONVENTIONAL_RE: Regex = Regex::new(
        r"^(?P<type>feat|feature|fix|bugfix|docs|style|refactor|perf|test|chore|build|ci|revert)(\((?P<scope>[^)]+)\))?!?:\s*(?P<desc>.+)$"
    )
    .expect("conventional commit regex is valid");
}

/// How a group of commits was keyed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum GroupKey {
    /// Conventional-commit scope, e.g. `feat(login): ...` yields `login`.
    Scope(String),
    /// Shared leading path prefix of the changed source files.
    Path(String),
}

impl GroupKey {
    /// Stable identifier for serialization.
    pub fn id(&self) -> String {
        match self {
            GroupKey::Scope(s) => format!("scope:{}", s),
            GroupKey::Path(p) => format!("path:{}", p),
        }
    }

    /// Human label derived from the key's last meaningful segment.
    pub fn label(&self) -> String {
        let raw = match self {
            GroupKey::Scope(s) => s.clone(),
            GroupKey::Path(p) => Path::new(p)
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| p.clone()),
        };
        title_case(&raw)
    }
}

/// Parsed conventional-commit parts of a summary line.
pub struct ConventionalParts<'a> {
    pub commit_type: &'a str,
    pub scope: Option<&'a str>,
}

/// Parse a conventional-commit summary, if the line matches the format.
pub fn conventional_parts(summary: &str) -> Option<ConventionalParts<'_>> {
    let caps = CONVENTIONAL_RE.captures(summary)?;
    Some(ConventionalParts {
        commit_type: caps.name("type").map(|m| m.as_str()).unwrap_or(""),
        scope: caps.name("scope").map(|m| m.as_str()),
    })
}

/// Changed files of a commit that count as source code.
pub fn source_paths(commit: &CommitRecord) -> Vec<PathBuf> {
    commit
        .files
        .iter()
        .map(|f| PathBuf::from(&f.path))
        .filter(|p| classify_path(p) == PathKind::Source)
        .collect()
}

/// Derive the group key for one commit.
///
/// Returns `None` for commits with no source changes (pure docs/config
/// work); such commits are excluded from feature grouping. A scoped
/// conventional tag always wins over the path prefix.
pub fn group_key(commit: &CommitRecord) -> Option<GroupKey> {
    let sources = source_paths(commit);
    if sources.is_empty() {
        return None;
    }

    if let Some(parts) = conventional_parts(&commit.summary) {
        if let Some(scope) = parts.scope {
            return Some(GroupKey::Scope(scope.trim().to_ascii_lowercase()));
        }
    }

    Some(GroupKey::Path(leading_prefix(&sources)))
}

/// Distinct parent directories of a commit's source files.
pub fn distinct_dirs(commit: &CommitRecord) -> BTreeSet<PathBuf> {
    source_paths(commit)
        .iter()
        .filter_map(|p| p.parent().map(|d| d.to_path_buf()))
        .collect()
}

/// Longest shared leading directory prefix, component-wise.
fn leading_prefix(paths: &[PathBuf]) -> String {
    let dirs: Vec<Vec<String>> = paths
        .iter()
        .map(|p| {
            p.parent()
                .map(|d| {
                    d.components()
                        .map(|c| c.as_os_str().to_string_lossy().to_string())
                        .collect()
                })
                .unwrap_or_default()
        })
        .collect();

    let Some(first) = dirs.first() else {
        return "root".to_string();
    };

    let mut prefix: Vec<String> = first.clone();
    for dir in &dirs[1..] {
        let shared = prefix
            .iter()
            .zip(dir.iter())
            .take_while(|(a, b)| a == b)
            .count();
        prefix.truncate(shared);
    }

    if prefix.is_empty() {
        "root".to_string()
    } else {
        prefix.join("/")
    }
}

fn title_case(raw: &str) -> String {
    raw.split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{AuthorIdentity, FileStat};
    use chrono::Utc;
    use std::collections::HashMap;

    fn record(summary: &str, paths: &[&str]) -> CommitRecord {
        CommitRecord {
            hash: format!("{:040x}", summary.len()),
            author: AuthorIdentity::normalize("Dev", "dev@example.com", &HashMap::new()),
            timestamp: Utc::now(),
            summary: summary.to_string(),
            files: paths
                .iter()
                .map(|p| FileStat {
                    path: p.to_string(),
                    added: 5,
                    removed: 1,
                })
                .collect(),
            parent_count: 1,
        }
    }

    #[test]
    fn test_scoped_tag_wins_over_path() {
        let commit = record("feat(login): add session flow", &["src/misc/util.rs"]);
        assert_eq!(
            group_key(&commit),
            Some(GroupKey::Scope("login".to_string()))
        );
    }

    #[test]
    fn test_unscoped_tag_falls_back_to_path() {
        let commit = record("feat: add login page", &["src/login/page.rs"]);
        assert_eq!(
            group_key(&commit),
            Some(GroupKey::Path("src/login".to_string()))
        );
    }

    #[test]
    fn test_plain_message_uses_path_prefix() {
        let commit = record(
            "tighten validation",
            &["src/login/form.rs", "src/login/session.rs"],
        );
        assert_eq!(
            group_key(&commit),
            Some(GroupKey::Path("src/login".to_string()))
        );
    }

    #[test]
    fn test_docs_only_commit_is_excluded() {
        let commit = record("docs: update readme", &["README.md", "docs/guide.md"]);
        assert_eq!(group_key(&commit), None);
    }

    #[test]
    fn test_divergent_paths_share_shorter_prefix() {
        let commit = record("rework", &["src/login/a.rs", "src/billing/b.rs"]);
        assert_eq!(group_key(&commit), Some(GroupKey::Path("src".to_string())));
    }

    #[test]
    fn test_top_level_files_key_to_root() {
        let commit = record("tweak build", &["main.rs"]);
        assert_eq!(group_key(&commit), Some(GroupKey::Path("root".to_string())));
    }

    #[test]
    fn test_labels() {
        assert_eq!(GroupKey::Scope("login".into()).label(), "Login");
        assert_eq!(GroupKey::Path("src/user-auth".into()).label(), "User Auth");
    }

    #[test]
    fn test_conventional_parsing() {
        let parts = conventional_parts("feat(api)!: breaking change").unwrap();
        assert_eq!(parts.commit_type, "feat");
        assert_eq!(parts.scope, Some("api"));

        assert!(conventional_parts("just a message").is_none());
    }
}
