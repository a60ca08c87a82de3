// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository access.

use crate::error::{LensError, RepoError, Result};
use git2::Repository as Git2Repo;
use std::path::Path;

/// Wrapper around git2::Repository scoped to read-only analysis.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Open a repository at a path. Bare repositories are rejected:
    /// analysis needs a working tree to scan.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                LensError::Repo(RepoError::InvalidRepository {
                    path: path.to_path_buf(),
                })
            } else {
                LensError::Repo(RepoError::OpenFailed {
                    message: e.message().to_string(),
                })
            }
        })?;

        if repo.workdir().is_none() {
            return Err(LensError::Repo(RepoError::BareRepository));
        }

        Ok(Self { inner: repo })
    }

    /// Get a reference to the inner git2 repository.
    pub fn inner(&self) -> &Git2Repo {
        &self.inner
    }

    /// Whether the repository has no commits yet.
    pub fn is_unborn(&self) -> bool {
        self.inner.head().is_err()
    }
}
