// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI module: argument parsing and command execution.

mod args;
mod dispatch;

pub use args::{Cli, OutputFormat};
pub use dispatch::run;
