// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Risk assessment module.
//!
//! Evaluates a fixed table of rules against aggregates of the earlier
//! pipeline stages and produces qualitative risk entries.

mod rules;
mod signals;

pub use rules::apply_builtin_rules;
pub use signals::RiskSignals;

use serde::{Deserialize, Serialize};

use crate::config::RiskConfig;

/// Which stakeholder concern a risk belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    Technical,
    Team,
    Business,
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskCategory::Technical => write!(f, "Technical"),
            RiskCategory::Team => write!(f, "Team"),
            RiskCategory::Business => write!(f, "Business"),
        }
    }
}

/// Qualitative likelihood or impact level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "Low"),
            Severity::Medium => write!(f, "Medium"),
            Severity::High => write!(f, "High"),
        }
    }
}

/// One identified risk with its suggested mitigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskEntry {
    pub category: RiskCategory,
    pub description: String,
    pub probability: Severity,
    pub impact: Severity,
    pub mitigation: String,
}

/// Run the full rule table against the gathered signals.
pub fn assess_risks(signals: &RiskSignals, config: &RiskConfig) -> Vec<RiskEntry> {
    apply_builtin_rules(signals, config)
}
