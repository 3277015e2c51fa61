// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while loading and binding processor configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read configuration file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for the expected shape
    #[error("Failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The configuration file is not valid TOML for the expected shape
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// The file extension does not map to a supported format
    #[error("Unsupported configuration format for '{path}' (expected .yaml, .yml or .toml)")]
    UnsupportedFormat { path: PathBuf },

    /// No configuration section exists for the processor key
    #[error("No configuration section found for processor '{key}'")]
    MissingSection { key: String },

    /// The processor section exists but one or more values are invalid
    #[error("Invalid configuration for processor '{key}': {}", .problems.join(", "))]
    InvalidSettings { key: String, problems: Vec<String> },

    /// The health_check section holds an unusable value
    #[error("Invalid health check configuration: {problem}")]
    InvalidHealthCheck { problem: String },

    /// Two registrations resolve to the same producer name with different topics
    #[error(
        "Producer name '{producer_name}' is shared by '{first_key}' (topic '{first_topic}') \
         and '{second_key}' (topic '{second_topic}')"
    )]
    ProducerNameCollision {
        producer_name: String,
        first_key: String,
        first_topic: String,
        second_key: String,
        second_topic: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_settings_lists_every_problem() {
        let error = ConfigError::InvalidSettings {
            key: "orders".to_string(),
            problems: vec![
                "brokers are not configured".to_string(),
                "group id is not configured".to_string(),
            ],
        };

        assert_eq!(
            error.to_string(),
            "Invalid configuration for processor 'orders': brokers are not configured, group id is not configured"
        );
    }

    #[test]
    fn collision_names_both_registrations() {
        let error = ConfigError::ProducerNameCollision {
            producer_name: "p".to_string(),
            first_key: "a".to_string(),
            first_topic: "t1".to_string(),
            second_key: "b".to_string(),
            second_topic: "t2".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("'a' (topic 't1')"));
        assert!(message.contains("'b' (topic 't2')"));
    }
}
