// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Report compilation module.
//!
//! Holds the serializable analysis model and the handlebars-based
//! Markdown compiler.

mod compiler;
mod model;

pub use compiler::{ReportCompiler, UNAVAILABLE};
pub use model::{AnalysisReport, Degradation, SummaryMetrics};
