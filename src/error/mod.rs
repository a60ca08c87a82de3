// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for the repolens application.
//!
//! This module defines all error types used throughout the application,
//! with proper error categorization and context propagation. The pipeline
//! distinguishes fatal errors (surfaced through these types) from
//! recoverable conditions, which are collected as degradations instead.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for repolens operations.
#[derive(Error, Debug)]
pub enum LensError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Repository errors
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),

    // History mining errors
    #[error("History error: {0}")]
    History(#[from] HistoryError),

    // Structure scan errors
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    // Template/report errors
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Repository-related errors.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("Not a git repository: {path}")]
    InvalidRepository { path: PathBuf },

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Repository has no working directory (bare repository)")]
    BareRepository,
}

/// History-mining errors.
///
/// A history timeout is *not* represented here: the miner returns the
/// partial commit sequence together with a timed-out flag, and the
/// orchestrator records a degradation. Only unreadable history is an error.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Failed to walk history: {message}")]
    WalkFailed { message: String },

    #[error("Failed to read commit {hash}: {message}")]
    CommitReadFailed { hash: String, message: String },

    #[error("Failed to diff commit {hash}: {message}")]
    DiffFailed { hash: String, message: String },
}

/// Structure-scan errors.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Repository root does not exist: {path}")]
    RootMissing { path: PathBuf },

    #[error("Failed to walk directory tree: {message}")]
    WalkFailed { message: String },
}

/// Template and report-compilation errors.
///
/// A placeholder with no data source is *not* an error: the compiler
/// renders it as an explicit marker and records a degradation.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Failed to render template: {message}")]
    RenderFailed { message: String },

    #[error("Failed to write report to {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },
}

/// Result type alias for repolens operations.
pub type Result<T> = std::result::Result<T, LensError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| LensError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}
