// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Author identity normalization.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Normalized author identity.
///
/// Emails are case-folded and collapsed through the configured alias map,
/// so one person committing under several addresses aggregates into a
/// single identity. Equality and hashing are by email only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorIdentity {
    pub name: String,
    pub email: String,
}

impl AuthorIdentity {
    /// Build a normalized identity from raw signature fields.
    pub fn normalize(name: &str, email: &str, aliases: &HashMap<String, String>) -> Self {
        let folded = email.trim().to_ascii_lowercase();
        let canonical = aliases
            .get(&folded)
            .map(|c| c.to_ascii_lowercase())
            .unwrap_or(folded);

        Self {
            name: name.trim().to_string(),
            email: canonical,
        }
    }
}

impl PartialEq for AuthorIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.email == other.email
    }
}

impl Eq for AuthorIdentity {}

impl std::hash::Hash for AuthorIdentity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.email.hash(state);
    }
}

impl std::fmt::Display for AuthorIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
