// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for repolens.
//!
//! This module handles loading, parsing, and validating configuration from
//! repolens.toml files, with built-in defaults for every threshold.

mod loader;
mod schema;

pub use loader::{
    find_config_file, find_config_file_from, load_config, load_config_from, parse_config,
    unknown_keys,
};
pub use schema::*;
