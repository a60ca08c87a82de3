// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Contribution analysis module.
//!
//! Aggregates commits into per-developer profiles and team-level signals.

mod profile;
mod skill;

pub use profile::{analyze_contributors, knowledge_concentration, DeveloperProfile};
pub use skill::{contribution_pattern, skill_tier, SkillTier};
