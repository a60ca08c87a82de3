// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Markdown report rendering.
//!
//! The template is embedded at compile time and rendered with handlebars.
//! Scalar placeholders come from a typed JSON value built out of the
//! [`AnalysisReport`]; repeated sections are `{{#each}}` blocks. Before
//! rendering, the compiler checks every top-level placeholder against the
//! data it built; an unmatched placeholder renders as an explicit marker
//! and records a degradation instead of failing the run.

use handlebars::Handlebars;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{json, Map, Value};

use crate::error::{Result, TemplateError};

use super::model::{AnalysisReport, Degradation};

const TEMPLATE: &str = include_str!("../../templates/report.md.hbs");
const TEMPLATE_NAME: &str = "report";

/// Marker rendered in place of a placeholder with no data source.
pub const UNAVAILABLE: &str = "unavailable";

lazy_static! {
    static ref PLACEHOLDER_RE: Regex =
        Regex::new(r"\{\{\s*([#/^]?)\s*([@A-Za-z_][\w.\-]*)").expect("placeholder regex is valid");
}

/// Renders [`AnalysisReport`] values into Markdown.
pub struct ReportCompiler {
    registry: Handlebars<'static>,
}

impl ReportCompiler {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(TEMPLATE_NAME, TEMPLATE)
            .map_err(|e| TemplateError::RenderFailed {
                message: e.to_string(),
            })?;
        Ok(Self { registry })
    }

    /// Render the report to Markdown.
    ///
    /// Placeholder mismatches are recorded in `report.degradations` so the
    /// Methodology section lists them; compiling the same report again does
    /// not re-record them, and the same input always renders to
    /// byte-identical output.
    pub fn compile(&self, report: &mut AnalysisReport) -> Result<String> {
        let missing = missing_placeholders(TEMPLATE, &template_data(report));
        record_missing(report, &missing);

        // Rebuilt after the degradations above so the report lists them.
        let mut data = template_data(report);
        if let Value::Object(obj) = &mut data {
            for name in missing {
                obj.insert(name, json!(UNAVAILABLE));
            }
        }

        self.registry
            .render(TEMPLATE_NAME, &data)
            .map_err(|e| {
                TemplateError::RenderFailed {
                    message: e.to_string(),
                }
                .into()
            })
    }
}

/// Record one degradation per unmatched placeholder. Recording is
/// idempotent: a detail already present in the report is not added again.
fn record_missing(report: &mut AnalysisReport, missing: &[String]) {
    for name in missing {
        tracing::warn!(placeholder = %name, "template placeholder has no data source");
        let detail = format!(
            "template placeholder '{}' has no data source; rendered as '{}'",
            name, UNAVAILABLE
        );
        if !report.degradations.iter().any(|d| d.detail == detail) {
            report.degradations.push(Degradation {
                stage: "report".to_string(),
                detail,
            });
        }
    }
}

/// Top-level simple placeholders in the template that the data object has
/// no key for. Placeholders inside `{{#each}}` blocks resolve against the
/// iterated items and are skipped.
fn missing_placeholders(template: &str, data: &Value) -> Vec<String> {
    let Value::Object(obj) = data else {
        return Vec::new();
    };

    let mut missing = Vec::new();
    let mut depth = 0usize;
    for caps in PLACEHOLDER_RE.captures_iter(template) {
        let sigil = &caps[1];
        let name = &caps[2];
        match sigil {
            "#" | "^" => depth += 1,
            "/" => depth = depth.saturating_sub(1),
            _ => {
                if depth == 0 && name != "else" && !name.starts_with('@') {
                    let root = name.split('.').next().unwrap_or(name);
                    if !obj.contains_key(root) && !missing.iter().any(|m| m == root) {
                        missing.push(root.to_string());
                    }
                }
            }
        }
    }
    missing
}

fn pct(fraction: f64) -> String {
    format!("{:.0}", fraction * 100.0)
}

fn hours(value: f64) -> String {
    format!("{:.1}", value)
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none detected".to_string()
    } else {
        items.join(", ")
    }
}

/// Build the typed JSON value the template renders against.
fn template_data(report: &AnalysisReport) -> Value {
    let snapshot = &report.snapshot;
    let metrics = &report.metrics;

    let languages: Vec<Value> = snapshot
        .language_percentages()
        .into_iter()
        .map(|(name, percent)| {
            let files = snapshot.languages.get(&name).copied().unwrap_or(0);
            json!({
                "name": name,
                "files": files,
                "percent": format!("{:.1}", percent),
            })
        })
        .collect();

    let features: Vec<Value> = report
        .features
        .iter()
        .map(|f| {
            json!({
                "label": f.label,
                "status": f.status.to_string(),
                "complexity": f.complexity.to_string(),
                "priority": f.priority.to_string(),
                "hours": hours(f.estimated_hours),
            })
        })
        .collect();

    let developers: Vec<Value> = report
        .developers
        .iter()
        .map(|d| {
            json!({
                "name": d.author.name,
                "email": d.author.email,
                "commits": d.commits,
                "share": format!("{:.1}", d.share_percent),
                "lines_added": d.lines_added,
                "lines_removed": d.lines_removed,
                "skill": d.skill.to_string(),
                "pattern": d.pattern,
                "first_commit": d.first_commit.format("%Y-%m-%d").to_string(),
                "last_commit": d.last_commit.format("%Y-%m-%d").to_string(),
            })
        })
        .collect();

    let risks: Vec<Value> = report
        .risks
        .iter()
        .map(|r| {
            json!({
                "category": r.category.to_string(),
                "description": r.description,
                "probability": r.probability.to_string(),
                "impact": r.impact.to_string(),
                "mitigation": r.mitigation,
            })
        })
        .collect();

    let degradations: Vec<Value> = report
        .degradations
        .iter()
        .map(|d| json!({ "stage": d.stage, "detail": d.detail }))
        .collect();

    let mut obj = Map::new();
    obj.insert("project_name".into(), json!(report.project_name));
    obj.insert(
        "generated_at".into(),
        json!(report.generated_at.format("%Y-%m-%d %H:%M UTC").to_string()),
    );
    obj.insert("version".into(), json!(crate::version::VERSION));
    obj.insert("health_rating".into(), json!(metrics.health_rating));
    obj.insert("health_score_pct".into(), json!(pct(metrics.health_score)));
    obj.insert(
        "overall_risk".into(),
        json!(metrics.overall_risk_level.to_string()),
    );
    obj.insert("total_features".into(), json!(metrics.total_features));
    obj.insert(
        "total_estimated_hours".into(),
        json!(hours(metrics.total_estimated_hours)),
    );
    obj.insert("team_size".into(), json!(report.developers.len()));
    obj.insert("bus_factor".into(), json!(metrics.bus_factor));
    obj.insert("total_commits".into(), json!(metrics.total_commits));
    obj.insert("merge_commits".into(), json!(metrics.merge_commits));
    obj.insert(
        "docs_only_commits".into(),
        json!(metrics.docs_only_commits),
    );
    obj.insert(
        "primary_language".into(),
        json!(snapshot.primary_language().unwrap_or("unknown")),
    );
    obj.insert("total_files".into(), json!(snapshot.total_files));
    obj.insert("total_lines".into(), json!(snapshot.total_lines));
    obj.insert(
        "frameworks_list".into(),
        json!(list_or_none(&snapshot.frameworks)),
    );
    obj.insert(
        "config_files_list".into(),
        json!(list_or_none(&snapshot.config_files)),
    );
    obj.insert(
        "message_quality_pct".into(),
        json!(pct(metrics.message_quality)),
    );
    obj.insert(
        "knowledge_concentration_pct".into(),
        json!(pct(metrics.knowledge_concentration)),
    );
    obj.insert("languages".into(), Value::Array(languages));
    obj.insert("features".into(), Value::Array(features));
    obj.insert("developers".into(), Value::Array(developers));
    obj.insert("risks".into(), Value::Array(risks));
    obj.insert("degradations".into(), Value::Array(degradations));

    Value::Object(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::Severity;
    use crate::scan::RepositorySnapshot;
    use chrono::{DateTime, Utc};
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn sample_report() -> AnalysisReport {
        let mut languages = BTreeMap::new();
        languages.insert("Rust".to_string(), 10);
        AnalysisReport {
            project_name: "sample".to_string(),
            snapshot: RepositorySnapshot {
                root: PathBuf::from("/tmp/sample"),
                languages,
                frameworks: vec!["Cargo".to_string()],
                config_files: vec!["Cargo.toml".to_string()],
                directories: vec!["src".to_string()],
                total_files: 12,
                classified_files: 10,
                unclassified_files: 2,
                doc_files: 1,
                total_lines: 800,
            },
            features: Vec::new(),
            developers: Vec::new(),
            risks: Vec::new(),
            metrics: crate::report::SummaryMetrics {
                total_commits: 0,
                merge_commits: 0,
                docs_only_commits: 0,
                total_features: 0,
                total_estimated_hours: 0.0,
                knowledge_concentration: 0.0,
                bus_factor: 0,
                message_quality: 0.0,
                overall_risk_level: Severity::Low,
                health_score: 1.0,
                health_rating: "Excellent".to_string(),
            },
            degradations: Vec::new(),
            generated_at: DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn test_compile_is_deterministic() {
        let compiler = ReportCompiler::new().unwrap();
        let first = compiler.compile(&mut sample_report()).unwrap();
        let second = compiler.compile(&mut sample_report()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_developer_list_renders_marker() {
        let compiler = ReportCompiler::new().unwrap();
        let rendered = compiler.compile(&mut sample_report()).unwrap();
        assert!(rendered.contains("No contributor data available"));
    }

    #[test]
    fn test_all_template_placeholders_have_data() {
        let mut report = sample_report();
        let compiler = ReportCompiler::new().unwrap();
        compiler.compile(&mut report).unwrap();
        assert!(report.degradations.is_empty());
    }

    #[test]
    fn test_unmatched_placeholder_degrades_instead_of_failing() {
        let data = json!({ "known": 1 });
        let missing = missing_placeholders("{{known}} {{unknown_metric}}", &data);
        assert_eq!(missing, vec!["unknown_metric".to_string()]);
    }

    #[test]
    fn test_each_block_variables_are_not_flagged() {
        let data = json!({ "items": [] });
        let missing = missing_placeholders("{{#each items}}{{label}}{{/each}}", &data);
        assert!(missing.is_empty());
    }

    #[test]
    fn test_repeated_compile_does_not_duplicate_degradations() {
        let mut report = sample_report();
        let compiler = ReportCompiler::new().unwrap();
        compiler.compile(&mut report).unwrap();
        let after_first = report.degradations.len();
        compiler.compile(&mut report).unwrap();
        assert_eq!(report.degradations.len(), after_first);

        let missing = vec!["unknown_metric".to_string()];
        record_missing(&mut report, &missing);
        record_missing(&mut report, &missing);
        let matches = report
            .degradations
            .iter()
            .filter(|d| d.detail.contains("unknown_metric"))
            .count();
        assert_eq!(matches, 1);
    }

    #[test]
    fn test_degradations_appear_in_methodology_section() {
        let mut report = sample_report();
        report.degradations.push(Degradation {
            stage: "history".to_string(),
            detail: "history mining timed out after 300s; results are partial".to_string(),
        });
        let compiler = ReportCompiler::new().unwrap();
        let rendered = compiler.compile(&mut report).unwrap();
        assert!(rendered.contains("Degraded (history)"));
        assert!(rendered.contains("timed out"));
    }
}
