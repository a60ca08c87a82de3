// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Directory walk and repository snapshot construction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ScanConfig;
use crate::error::{LensError, RepoError, Result, ScanError};

use super::stack::{classify_path, framework_for_marker, PathKind};

/// Immutable snapshot of a repository's file-tree structure.
///
/// Created once per analysis run by [`scan_repository`]; read-only input
/// to the feature mapper and the report compiler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    /// Repository root that was scanned.
    pub root: PathBuf,
    /// Classified source files per language.
    pub languages: BTreeMap<String, usize>,
    /// Frameworks/toolchains detected from marker files.
    pub frameworks: Vec<String>,
    /// Configuration files found, repository-relative, sorted.
    pub config_files: Vec<String>,
    /// Top-level directories, sorted.
    pub directories: Vec<String>,
    /// All files seen by the walk (after ignores).
    pub total_files: usize,
    /// Files classified as source code.
    pub classified_files: usize,
    /// Files that matched no classification; reported, never dropped.
    pub unclassified_files: usize,
    /// Documentation files seen.
    pub doc_files: usize,
    /// Total line count over classified source files.
    pub total_lines: usize,
}

impl RepositorySnapshot {
    /// Language shares as percentages of classified files.
    ///
    /// Sums to 100 (within rounding) whenever any file was classified.
    pub fn language_percentages(&self) -> Vec<(String, f64)> {
        if self.classified_files == 0 {
            return Vec::new();
        }
        self.languages
            .iter()
            .map(|(lang, count)| {
                (
                    lang.clone(),
                    *count as f64 * 100.0 / self.classified_files as f64,
                )
            })
            .collect()
    }

    /// The dominant language, if any files were classified.
    pub fn primary_language(&self) -> Option<&str> {
        self.languages
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(lang, _)| lang.as_str())
    }
}

/// Scan a repository tree and build its structure snapshot.
///
/// Read-only. Fails fatally when the root is missing or carries no
/// version-control metadata.
pub fn scan_repository(root: &Path, config: &ScanConfig) -> Result<RepositorySnapshot> {
    if !root.exists() {
        return Err(LensError::Scan(ScanError::RootMissing {
            path: root.to_path_buf(),
        }));
    }
    if !root.join(".git").exists() {
        return Err(LensError::Repo(RepoError::InvalidRepository {
            path: root.to_path_buf(),
        }));
    }

    let ignore_globs: Vec<glob::Pattern> = config
        .ignore_globs
        .iter()
        .filter_map(|p| glob::Pattern::new(p).ok())
        .collect();

    let mut languages: BTreeMap<String, usize> = BTreeMap::new();
    let mut frameworks: Vec<String> = Vec::new();
    let mut config_files: Vec<String> = Vec::new();
    let mut directories: Vec<String> = Vec::new();
    let mut total_files = 0usize;
    let mut classified_files = 0usize;
    let mut unclassified_files = 0usize;
    let mut doc_files = 0usize;
    let mut total_lines = 0usize;

    let walker = WalkDir::new(root)
        .max_depth(config.max_depth)
        .into_iter()
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !(entry.file_type().is_dir() && config.ignore_dirs.iter().any(|d| d == name.as_ref()))
        });

    for entry in walker {
        let entry = entry.map_err(|e| {
            LensError::Scan(ScanError::WalkFailed {
                message: e.to_string(),
            })
        })?;

        let rel = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();

        if rel.as_os_str().is_empty() {
            continue;
        }

        if ignore_globs.iter().any(|p| p.matches_path(&rel)) {
            continue;
        }

        if entry.file_type().is_dir() {
            if rel.components().count() == 1 {
                directories.push(rel.to_string_lossy().to_string());
            }
            continue;
        }

        if !entry.file_type().is_file() {
            continue;
        }

        total_files += 1;

        let file_name = entry.file_name().to_string_lossy().to_string();
        if let Some(framework) = framework_for_marker(&file_name) {
            if !frameworks.iter().any(|f| f == framework) {
                frameworks.push(framework.to_string());
            }
        }

        match classify_path(&rel) {
            PathKind::Source => {
                classified_files += 1;
                let ext = rel
                    .extension()
                    .map(|s| s.to_string_lossy().to_ascii_lowercase())
                    .unwrap_or_default();
                if let Some(lang) = super::stack::language_for_extension(&ext) {
                    *languages.entry(lang.to_string()).or_insert(0) += 1;
                }
                total_lines += count_lines(entry.path());
            }
            PathKind::Config => {
                config_files.push(rel.to_string_lossy().to_string());
            }
            PathKind::Docs => {
                doc_files += 1;
            }
            PathKind::Other => {
                unclassified_files += 1;
                tracing::debug!("Unclassified file: {}", rel.display());
            }
        }
    }

    frameworks.sort();
    config_files.sort();
    directories.sort();

    Ok(RepositorySnapshot {
        root: root.to_path_buf(),
        languages,
        frameworks,
        config_files,
        directories,
        total_files,
        classified_files,
        unclassified_files,
        doc_files,
        total_lines,
    })
}

/// Count newline-terminated lines without assuming valid UTF-8.
fn count_lines(path: &Path) -> usize {
    match std::fs::read(path) {
        Ok(bytes) => bytes.iter().filter(|b| **b == b'\n').count(),
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn seed_repo(dir: &TempDir) {
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("src/main.rs"), "fn main() {}\n").unwrap();
        fs::write(dir.path().join("src/lib.rs"), "pub fn x() {}\nmod y;\n").unwrap();
        fs::write(dir.path().join("docs/guide.md"), "# Guide\n").unwrap();
        fs::write(dir.path().join("Cargo.toml"), "[package]\n").unwrap();
        fs::write(dir.path().join("logo.png"), [0u8, 1, 2]).unwrap();
    }

    #[test]
    fn test_scan_classifies_and_counts() {
        let dir = TempDir::new().unwrap();
        seed_repo(&dir);

        let snapshot = scan_repository(dir.path(), &ScanConfig::default()).unwrap();

        assert_eq!(snapshot.languages.get("Rust"), Some(&2));
        assert_eq!(snapshot.classified_files, 2);
        assert_eq!(snapshot.doc_files, 1);
        assert_eq!(snapshot.unclassified_files, 1);
        assert!(snapshot.frameworks.iter().any(|f| f.contains("Cargo")));
        assert_eq!(snapshot.total_lines, 3);
        assert_eq!(snapshot.primary_language(), Some("Rust"));
    }

    #[test]
    fn test_language_percentages_sum_to_100() {
        let dir = TempDir::new().unwrap();
        seed_repo(&dir);
        fs::write(dir.path().join("src/tool.py"), "print('x')\n").unwrap();

        let snapshot = scan_repository(dir.path(), &ScanConfig::default()).unwrap();
        let total: f64 = snapshot
            .language_percentages()
            .iter()
            .map(|(_, pct)| pct)
            .sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_git_metadata_is_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.rs"), "fn main() {}\n").unwrap();

        let result = scan_repository(dir.path(), &ScanConfig::default());
        assert!(matches!(
            result,
            Err(LensError::Repo(RepoError::InvalidRepository { .. }))
        ));
    }

    #[test]
    fn test_ignored_directories_are_skipped() {
        let dir = TempDir::new().unwrap();
        seed_repo(&dir);
        fs::create_dir_all(dir.path().join("node_modules/dep")).unwrap();
        fs::write(dir.path().join("node_modules/dep/index.js"), "x\n").unwrap();

        let snapshot = scan_repository(dir.path(), &ScanConfig::default()).unwrap();
        assert!(!snapshot.languages.contains_key("JavaScript"));
    }

    #[test]
    fn test_scan_does_not_modify_tree() {
        let dir = TempDir::new().unwrap();
        seed_repo(&dir);

        let before: Vec<_> = walkdir::WalkDir::new(dir.path())
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.path().to_path_buf())
            .collect();
        scan_repository(dir.path(), &ScanConfig::default()).unwrap();
        let after: Vec<_> = walkdir::WalkDir::new(dir.path())
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.path().to_path_buf())
            .collect();

        assert_eq!(before, after);
    }
}
