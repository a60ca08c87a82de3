// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading and unknown-key detection.

use crate::error::{ConfigError, LensError, Result};
use std::path::{Path, PathBuf};

use super::schema::LensConfig;

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["repolens.toml", ".repolens.toml", ".config/repolens.toml"];

/// Top-level tables and the keys each one accepts. Used to warn about
/// unrecognized configuration keys without rejecting the file.
const KNOWN_KEYS: &[(&str, &[&str])] = &[
    ("scan", &["max_depth", "ignore_dirs", "ignore_globs"]),
    (
        "history",
        &[
            "max_commits",
            "include_merges",
            "timeout_secs",
            "since",
            "until",
            "aliases",
        ],
    ),
    (
        "features",
        &[
            "weight_commits",
            "weight_lines",
            "weight_dirs",
            "low_max_score",
            "medium_max_score",
            "hours_low",
            "hours_medium",
            "hours_high",
            "estimate_buffer",
            "active_window_days",
        ],
    ),
    (
        "risk",
        &[
            "knowledge_concentration_threshold",
            "top_k_contributors",
            "high_complexity_ratio",
            "churn_lines_per_commit",
            "stale_after_days",
            "docs_share_floor",
        ],
    ),
    ("report", &["output_file"]),
];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    // Fall back to the user's config directory
    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join("repolens").join("config.toml");
        if user_config.exists() {
            return Some(user_config);
        }
    }

    None
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<LensConfig> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            Ok(LensConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<LensConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(LensError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        LensError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// Unknown keys are reported with a warning and otherwise ignored;
/// a file that does not parse at all is a fatal error, as is a parsed
/// configuration that violates the threshold invariants.
pub fn parse_config(content: &str) -> Result<LensConfig> {
    let value: toml::Value = toml::from_str(content).map_err(|e| {
        LensError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })?;

    for key in unknown_keys(&value) {
        tracing::warn!("Unrecognized configuration key ignored: {}", key);
    }

    let config: LensConfig = value.try_into().map_err(|e| {
        LensError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })?;

    config.validate()?;
    Ok(config)
}

/// Collect dotted paths of keys the schema does not recognize.
pub fn unknown_keys(value: &toml::Value) -> Vec<String> {
    let mut unknown = Vec::new();

    let Some(root) = value.as_table() else {
        return unknown;
    };

    for (table_name, table_value) in root {
        match KNOWN_KEYS.iter().find(|(name, _)| name == table_name) {
            None => unknown.push(table_name.clone()),
            Some((_, keys)) => {
                if let Some(table) = table_value.as_table() {
                    for key in table.keys() {
                        if !keys.contains(&key.as_str()) {
                            unknown.push(format!("{}.{}", table_name, key));
                        }
                    }
                }
            }
        }
    }

    unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config.history.max_commits, 10_000);
        assert_eq!(config.history.timeout_secs, 300);
    }

    #[test]
    fn test_parse_custom_config() {
        let toml = r#"
[history]
max_commits = 500
include_merges = true

[features]
hours_high = 8.0

[risk]
top_k_contributors = 2
"#;
        let config = parse_config(toml).unwrap();
        assert_eq!(config.history.max_commits, 500);
        assert!(config.history.include_merges);
        assert_eq!(config.features.hours_high, 8.0);
        assert_eq!(config.risk.top_k_contributors, 2);
    }

    #[test]
    fn test_parse_alias_map() {
        let toml = r#"
[history.aliases]
"jane@oldcorp.example" = "jane@example.com"
"#;
        let config = parse_config(toml).unwrap();
        assert_eq!(
            config.history.aliases.get("jane@oldcorp.example").unwrap(),
            "jane@example.com"
        );
    }

    #[test]
    fn test_unknown_keys_are_collected_not_fatal() {
        let toml = r#"
[history]
max_commits = 100
warp_speed = true

[mystery]
key = 1
"#;
        let value: toml::Value = toml::from_str(toml).unwrap();
        let unknown = unknown_keys(&value);
        assert!(unknown.contains(&"history.warp_speed".to_string()));
        assert!(unknown.contains(&"mystery".to_string()));

        // The file still loads despite the unknown keys.
        assert!(parse_config(toml).is_ok());
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let toml = r#"
[features]
low_max_score = 20.0
medium_max_score = 10.0
"#;
        assert!(parse_config(toml).is_err());
    }

    #[test]
    fn test_garbage_config_is_fatal() {
        assert!(parse_config("this is { not toml").is_err());
    }

    #[test]
    fn test_threshold_monotonicity_over_random_triples() {
        // Deterministic LCG so the property is reproducible.
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for _ in 0..200 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let a = ((seed >> 33) % 100) as f64;
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let b = ((seed >> 33) % 100) as f64;

            let mut config = LensConfig::default();
            config.features.low_max_score = a;
            config.features.medium_max_score = b;

            match config.validate() {
                // Accepted configurations must be strictly monotonic.
                Ok(()) => assert!(a > 0.0 && b > a),
                Err(_) => assert!(a <= 0.0 || b <= a),
            }
        }
    }
}
