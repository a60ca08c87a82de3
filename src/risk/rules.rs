// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in risk rules.
//!
//! Each rule is a plain function over [`RiskSignals`] that yields at most
//! one entry; [`apply_builtin_rules`] walks the table in a fixed order so
//! the report lists risks deterministically. Rules never error.

use crate::config::RiskConfig;

use super::signals::RiskSignals;
use super::{RiskCategory, RiskEntry, Severity};

type RuleFn = fn(&RiskSignals, &RiskConfig) -> Option<RiskEntry>;

/// The rule table, in report order.
const BUILTIN_RULES: &[(&str, RuleFn)] = &[
    ("knowledge-concentration", check_knowledge_concentration),
    ("high-complexity-share", check_high_complexity_share),
    ("heavy-churn", check_heavy_churn),
    ("stale-activity", check_stale_activity),
    ("documentation-gap", check_documentation_gap),
];

/// Evaluate every built-in rule against the gathered signals.
pub fn apply_builtin_rules(signals: &RiskSignals, config: &RiskConfig) -> Vec<RiskEntry> {
    let mut entries = Vec::new();
    for (name, rule) in BUILTIN_RULES {
        if let Some(entry) = rule(signals, config) {
            tracing::debug!(rule = name, "risk rule triggered");
            entries.push(entry);
        }
    }
    entries
}

/// Bus-factor rule. A single-contributor repository always triggers;
/// otherwise the top-K share must exceed the configured threshold.
fn check_knowledge_concentration(
    signals: &RiskSignals,
    config: &RiskConfig,
) -> Option<RiskEntry> {
    if signals.total_commits == 0 {
        return None;
    }

    let single = signals.contributor_count == 1;
    let concentrated = signals.contributor_count >= 2
        && signals.knowledge_concentration > config.knowledge_concentration_threshold;
    if !single && !concentrated {
        return None;
    }

    let description = if single {
        "All commits come from a single contributor; the bus factor is one".to_string()
    } else {
        format!(
            "The top {} contributor(s) own {:.0}% of all commits",
            config.top_k_contributors,
            signals.knowledge_concentration * 100.0
        )
    };

    Some(RiskEntry {
        category: RiskCategory::Team,
        description,
        probability: Severity::High,
        impact: if single {
            Severity::High
        } else {
            Severity::Medium
        },
        mitigation: "Spread ownership through pairing, reviews and rotation of critical areas"
            .to_string(),
    })
}

fn check_high_complexity_share(signals: &RiskSignals, config: &RiskConfig) -> Option<RiskEntry> {
    if signals.high_complexity_share <= config.high_complexity_ratio {
        return None;
    }
    Some(RiskEntry {
        category: RiskCategory::Technical,
        description: format!(
            "{:.0}% of inferred features are high complexity",
            signals.high_complexity_share * 100.0
        ),
        probability: Severity::Medium,
        impact: Severity::High,
        mitigation: "Break large features into smaller units and prioritize refactoring"
            .to_string(),
    })
}

fn check_heavy_churn(signals: &RiskSignals, config: &RiskConfig) -> Option<RiskEntry> {
    if signals.avg_lines_per_commit <= config.churn_lines_per_commit {
        return None;
    }
    Some(RiskEntry {
        category: RiskCategory::Technical,
        description: format!(
            "Commits average {:.0} changed lines, above the {:.0} line threshold",
            signals.avg_lines_per_commit, config.churn_lines_per_commit
        ),
        probability: Severity::Medium,
        impact: Severity::Medium,
        mitigation: "Encourage smaller, reviewable commits to reduce regression surface"
            .to_string(),
    })
}

fn check_stale_activity(signals: &RiskSignals, config: &RiskConfig) -> Option<RiskEntry> {
    if signals.total_commits == 0 || signals.days_since_last_commit <= config.stale_after_days {
        return None;
    }
    Some(RiskEntry {
        category: RiskCategory::Business,
        description: format!(
            "No commits in the last {} days",
            signals.days_since_last_commit
        ),
        probability: Severity::High,
        impact: Severity::Medium,
        mitigation: "Confirm the project's maintenance status and staffing".to_string(),
    })
}

/// Documentation gap. Only meaningful once the history is non-trivial,
/// so short histories never trigger it.
fn check_documentation_gap(signals: &RiskSignals, config: &RiskConfig) -> Option<RiskEntry> {
    const MIN_HISTORY: usize = 20;

    if signals.total_commits < MIN_HISTORY || signals.docs_only_share >= config.docs_share_floor {
        return None;
    }
    Some(RiskEntry {
        category: RiskCategory::Business,
        description: format!(
            "Only {:.1}% of commits touch documentation",
            signals.docs_only_share * 100.0
        ),
        probability: Severity::Medium,
        impact: Severity::Low,
        mitigation: "Schedule documentation passes alongside feature work".to_string(),
    })
}
