// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! repolens - Git Repository Analysis & Reporting
//!
//! A CLI tool that analyzes a Git repository's structure and commit
//! history and compiles a stakeholder-tiered Markdown report.
//!
//! # Features
//!
//! - **Structure Scanner**: Languages, frameworks and layout from the file tree
//! - **History Miner**: Commit sequence with per-file change stats via git2
//! - **Feature Mapper**: Commit groups with complexity tiers and effort estimates
//! - **Contribution Analyzer**: Per-developer profiles and team signals
//! - **Risk Assessor**: Rule-table driven technical, team and business risks
//! - **Report Compiler**: Deterministic Markdown rendering with degradation notes
//!
//! # Example
//!
//! ```no_run
//! use repolens::config::LensConfig;
//! use repolens::pipeline::Analyzer;
//! use std::path::Path;
//!
//! let analyzer = Analyzer::new(LensConfig::default());
//! let output = analyzer.run(Path::new(".")).unwrap();
//! println!("{}", output.markdown);
//! ```

// Module declarations
pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod history;
pub mod pipeline;
pub mod report;
pub mod risk;
pub mod scan;
pub mod team;

// Re-exports for convenience
pub use config::LensConfig;
pub use error::{LensError, Result};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of repolens.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
