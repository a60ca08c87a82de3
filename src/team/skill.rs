// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Deterministic skill-tier and contribution-pattern scoring.
//!
//! These are heuristic scoring functions, not classifiers: the same input
//! always produces the same tier, so runs are fully reproducible.

use serde::{Deserialize, Serialize};

/// Inferred experience tier of a contributor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillTier {
    Junior,
    Mid,
    Senior,
    Expert,
}

impl std::fmt::Display for SkillTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkillTier::Junior => write!(f, "Junior"),
            SkillTier::Mid => write!(f, "Mid-level"),
            SkillTier::Senior => write!(f, "Senior"),
            SkillTier::Expert => write!(f, "Expert"),
        }
    }
}

/// Score a contributor from commit volume, mean change size and the
/// diversity of top-level areas they touched.
pub fn skill_tier(commit_count: usize, avg_change_size: f64, area_diversity: usize) -> SkillTier {
    let mut score = 0u32;

    score += match commit_count {
        c if c >= 100 => 3,
        c if c >= 50 => 2,
        c if c >= 10 => 1,
        _ => 0,
    };

    score += match avg_change_size {
        s if s >= 200.0 => 2,
        s if s >= 50.0 => 1,
        _ => 0,
    };

    score += match area_diversity {
        d if d >= 5 => 2,
        d if d >= 2 => 1,
        _ => 0,
    };

    match score {
        s if s >= 6 => SkillTier::Expert,
        s if s >= 4 => SkillTier::Senior,
        s if s >= 2 => SkillTier::Mid,
        _ => SkillTier::Junior,
    }
}

/// Describe how the contributor's commits are distributed over time.
pub fn contribution_pattern(commit_count: usize, active_span_days: i64) -> &'static str {
    if active_span_days < 7 {
        return "burst";
    }
    let density = commit_count as f64 / active_span_days.max(1) as f64;
    if density >= 0.5 {
        "sustained"
    } else if density >= 0.1 {
        "steady"
    } else {
        "occasional"
    }
}
