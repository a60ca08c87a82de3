// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository structure scanning module.
//!
//! Walks the file tree (read-only) and infers the technology-stack profile.

pub mod stack;
mod walker;

pub use stack::{classify_path, framework_for_marker, language_for_extension, PathKind};
pub use walker::{scan_repository, RepositorySnapshot};
