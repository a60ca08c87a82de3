// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{find_config_file_from, load_config, load_config_from};
use crate::error::{Result, ResultExt, TemplateError};
use crate::pipeline::{AnalysisOutput, Analyzer};

use super::args::{Cli, OutputFormat};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => match find_config_file_from(&cli.repo_path) {
            Some(path) => load_config_from(&path)?,
            None => load_config()?,
        },
    };

    if let Some(max) = cli.max_commits {
        config.history.max_commits = max;
    }

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.report.output_file));

    let analyzer = Analyzer::new(config);

    let output = match cli.format {
        OutputFormat::Text => run_with_spinner(&analyzer, &cli)?,
        OutputFormat::Json => analyzer.run(&cli.repo_path)?,
    };

    write_report(&output_path, &output.markdown)?;

    if cli.save_data {
        let data_path = data_path_for(&output_path);
        let json = serde_json::to_string_pretty(&output.report)
            .context("serializing analysis data")?;
        write_report(&data_path, &json)?;
        if cli.format == OutputFormat::Text {
            println!(
                "{} Analysis data written to {}",
                style("✓").green().bold(),
                style(data_path.display()).cyan()
            );
        }
    }

    match cli.format {
        OutputFormat::Text => print_summary(&output, &output_path),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&output.report)
                .context("serializing analysis data")?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn run_with_spinner(analyzer: &Analyzer, cli: &Cli) -> Result<AnalysisOutput> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Analyzing {}...", cli.repo_path.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = analyzer.run(&cli.repo_path);
    spinner.finish_and_clear();
    result
}

fn print_summary(output: &AnalysisOutput, output_path: &std::path::Path) {
    let report = &output.report;
    println!(
        "{} Analyzed {} commit(s) across {} contributor(s)",
        style("✓").green().bold(),
        report.metrics.total_commits,
        report.developers.len()
    );
    println!(
        "{} Identified {} feature(s), {} risk(s); project health {}",
        style("✓").green().bold(),
        report.features.len(),
        report.risks.len(),
        style(&report.metrics.health_rating).bold()
    );
    for degradation in &report.degradations {
        println!(
            "{} {}: {}",
            style("!").yellow().bold(),
            degradation.stage,
            degradation.detail
        );
    }
    println!(
        "{} Report written to {}",
        style("✓").green().bold(),
        style(output_path.display()).cyan()
    );
}

/// `report.md` becomes `report_data.json`; extension-less paths just
/// get the suffix appended.
fn data_path_for(output_path: &std::path::Path) -> PathBuf {
    let stem = output_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "analysis".to_string());
    output_path.with_file_name(format!("{}_data.json", stem))
}

fn write_report(path: &std::path::Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| {
        TemplateError::WriteFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
        .into()
    })
}
