// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

/// repolens - Git repository analysis and stakeholder reporting
///
/// Analyzes a repository's structure and commit history, infers features,
/// contributor profiles and risks, and writes a Markdown report.
#[derive(Parser, Debug)]
#[command(name = "repolens")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Git repository analysis and reporting", long_about = None)]
pub struct Cli {
    /// Path to the repository to analyze
    #[arg(default_value = ".")]
    pub repo_path: PathBuf,

    /// Where to write the Markdown report
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Also write the structured analysis data as JSON next to the report
    #[arg(long)]
    pub save_data: bool,

    /// Output format for progress and results
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Override the maximum number of commits to mine
    #[arg(long)]
    pub max_commits: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

/// Output format for scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Styled progress lines plus the report file (default)
    Text,
    /// The analysis data as JSON on stdout, no styled output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_debug_assert() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["repolens"]);
        assert_eq!(cli.repo_path, PathBuf::from("."));
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.output.is_none());
        assert!(!cli.save_data);
    }

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::parse_from([
            "repolens",
            "/tmp/project",
            "-o",
            "report.md",
            "--save-data",
            "--format",
            "json",
            "--max-commits",
            "500",
        ]);
        assert_eq!(cli.repo_path, PathBuf::from("/tmp/project"));
        assert_eq!(cli.output, Some(PathBuf::from("report.md")));
        assert!(cli.save_data);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.max_commits, Some(500));
    }
}
