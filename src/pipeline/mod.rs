// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Pipeline orchestration.
//!
//! Runs the six analysis stages in order, collects degradations from
//! recoverable conditions and assembles the final [`AnalysisReport`].
//! The error policy lives here: stages return plain results, and only
//! the orchestrator decides what is fatal.

use chrono::{DateTime, Utc};
use std::path::Path;

use crate::config::LensConfig;
use crate::error::Result;
use crate::features::map_features;
use crate::history::{mine_history, Repository};
use crate::report::{AnalysisReport, Degradation, ReportCompiler, SummaryMetrics};
use crate::risk::{assess_risks, RiskSignals};
use crate::scan::scan_repository;
use crate::team::{analyze_contributors, knowledge_concentration};

/// Finished analysis: the structured report plus its rendered Markdown.
#[derive(Debug)]
pub struct AnalysisOutput {
    pub report: AnalysisReport,
    pub markdown: String,
}

/// Sequential six-stage analyzer over one repository.
pub struct Analyzer {
    config: LensConfig,
}

impl Analyzer {
    pub fn new(config: LensConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline, stamping the report with the current time.
    pub fn run(&self, repo_path: &Path) -> Result<AnalysisOutput> {
        self.run_at(repo_path, Utc::now())
    }

    /// Run the full pipeline with an explicit timestamp.
    ///
    /// The timestamp feeds `generated_at` and the stale-activity risk
    /// rule; fixing it makes the whole run reproducible.
    pub fn run_at(&self, repo_path: &Path, now: DateTime<Utc>) -> Result<AnalysisOutput> {
        let mut degradations: Vec<Degradation> = Vec::new();

        // Stage 1: structure scan.
        tracing::info!(path = %repo_path.display(), "scanning repository structure");
        let snapshot = scan_repository(repo_path, &self.config.scan)?;

        // Stage 2: history mining.
        tracing::info!("mining commit history");
        let repo = Repository::open(repo_path)?;
        let outcome = mine_history(&repo, &self.config.history)?;
        if outcome.timed_out {
            degradations.push(Degradation {
                stage: "history".to_string(),
                detail: format!(
                    "history mining hit the {}s budget after {} commit(s); results are partial",
                    self.config.history.timeout_secs,
                    outcome.commits.len()
                ),
            });
        }
        if outcome.truncated {
            degradations.push(Degradation {
                stage: "history".to_string(),
                detail: format!(
                    "history truncated at the configured cap of {} commits",
                    self.config.history.max_commits
                ),
            });
        }
        let commits = outcome.commits;

        // Stage 3: feature mapping.
        tracing::info!(commits = commits.len(), "mapping features");
        let mapping = map_features(&commits, &snapshot, &self.config.features);

        // Stage 4: contribution analysis.
        tracing::info!("analyzing contributors");
        let developers = analyze_contributors(&commits);
        let concentration =
            knowledge_concentration(&developers, self.config.risk.top_k_contributors);

        // Stage 5: risk assessment.
        tracing::info!("assessing risks");
        let signals = RiskSignals::gather(
            &commits,
            &mapping.features,
            &developers,
            mapping.docs_only_commits,
            self.config.risk.top_k_contributors,
            now,
        );
        let risks = assess_risks(&signals, &self.config.risk);

        // Stage 6: report compilation.
        tracing::info!("compiling report");
        let metrics = SummaryMetrics::compute(
            &commits,
            &mapping.features,
            &developers,
            &risks,
            mapping.docs_only_commits,
            concentration,
        );

        let project_name = snapshot
            .root
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "repository".to_string());

        let mut report = AnalysisReport {
            project_name,
            snapshot,
            features: mapping.features,
            developers,
            risks,
            metrics,
            degradations,
            generated_at: now,
        };

        let compiler = ReportCompiler::new()?;
        let markdown = compiler.compile(&mut report)?;

        Ok(AnalysisOutput { report, markdown })
    }
}
