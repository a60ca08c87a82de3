// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Test fixtures: throwaway git repositories built with git2.

use git2::{Oid, Repository as Git2Repo, Signature, Time};
use std::path::Path;
use tempfile::TempDir;

use super::repo::Repository;

/// A temporary git repository for tests.
pub struct FixtureRepo {
    dir: TempDir,
}

impl FixtureRepo {
    /// Initialize an empty repository.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        Git2Repo::init(dir.path()).unwrap();
        Self { dir }
    }

    /// Initialize a repository with no commits (alias kept for readability).
    pub fn bare_init() -> Self {
        Self::new()
    }

    /// Repository root on disk.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Open the fixture through the analysis wrapper.
    pub fn open(&self) -> Repository {
        Repository::open(self.dir.path()).unwrap()
    }

    /// Commit files as the default test author at a fixed timestamp.
    pub fn commit(&self, message: &str, files: &[(&str, &str)], time_secs: i64) -> Oid {
        self.commit_as("Dev One", "dev@example.com", message, files, time_secs)
    }

    /// Commit files under an explicit author identity.
    pub fn commit_as(
        &self,
        name: &str,
        email: &str,
        message: &str,
        files: &[(&str, &str)],
        time_secs: i64,
    ) -> Oid {
        let repo = Git2Repo::open(self.dir.path()).unwrap();

        for (rel, content) in files {
            let full = self.dir.path().join(rel);
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(&full, content).unwrap();
        }

        let mut index = repo.index().unwrap();
        for (rel, _) in files {
            index.add_path(Path::new(rel)).unwrap();
        }
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();

        let sig = Signature::new(name, email, &Time::new(time_secs, 0)).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    /// Create a merge commit joining HEAD with another commit.
    pub fn merge_into_head(&self, other: Oid, message: &str, time_secs: i64) -> Oid {
        let repo = Git2Repo::open(self.dir.path()).unwrap();
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        let other_commit = repo.find_commit(other).unwrap();
        let tree = head.tree().unwrap();

        let sig = Signature::new("Dev One", "dev@example.com", &Time::new(time_secs, 0)).unwrap();
        repo.commit(
            Some("HEAD"),
            &sig,
            &sig,
            message,
            &tree,
            &[&head, &other_commit],
        )
        .unwrap()
    }
}
