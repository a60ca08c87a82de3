// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! repolens - Git Repository Analysis & Reporting
//!
//! A CLI tool that analyzes a Git repository and compiles a
//! stakeholder-tiered Markdown report.

use clap::Parser;
use repolens::cli::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Set up logging
    setup_logging(cli.debug);

    // Run the CLI
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Set up logging/tracing.
fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::try_new("repolens=debug,warn").unwrap_or_else(|_| EnvFilter::new("warn"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if debug {
        tracing::debug!("Debug logging enabled");
    }
}
