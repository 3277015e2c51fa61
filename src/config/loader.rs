// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::config::consts::{
    DEFAULT_HEALTH_CHECK_INTERVAL_MS, HEALTH_CHECK_PRODUCER_NAME, HEALTH_CHECK_TOPIC,
};
use crate::errors::ConfigError;

/// Top-level pipeline configuration.
///
/// Each entry under `processors` is the settings namespace of one processor key.
/// `health_check` is reserved for the readiness check.
///
/// # Example
/// ```yaml
/// processors:
///   orders:
///     brokers: ["localhost:9092"]
///     consumer_topic: orders
///     producer_topic: receipts
///     group_id: billing
///     worker_count: 4
/// health_check:
///   enabled: true
///   brokers: ["localhost:9092"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub processors: BTreeMap<String, ProcessorSection>,
    #[serde(default)]
    pub health_check: HealthCheckConfig,
}

/// Raw settings for one processor key, before defaults and validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessorSection {
    #[serde(default)]
    pub brokers: Vec<String>,
    #[serde(default)]
    pub consumer_topic: String,
    #[serde(default)]
    pub producer_topic: String,
    #[serde(default)]
    pub group_id: String,
    pub worker_count: Option<usize>,
    pub buffer_size: Option<usize>,
    pub auto_commit_interval_ms: Option<u64>,
    pub create_topics_if_not_exist: Option<bool>,
    /// Named sample behaviours to key under this processor
    #[serde(default)]
    pub behaviours: Vec<String>,
}

/// Raw readiness-check settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthCheckConfig {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub brokers: Vec<String>,
    pub producer_topic: Option<String>,
    pub producer_name: Option<String>,
    pub interval_ms: Option<u64>,
}

fn enabled_by_default() -> bool {
    true
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            enabled: enabled_by_default(),
            brokers: Vec::new(),
            producer_topic: None,
            producer_name: None,
            interval_ms: None,
        }
    }
}

/// Readiness-check settings with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthCheckSettings {
    pub brokers: Vec<String>,
    pub producer_topic: String,
    pub producer_name: String,
    pub interval: Duration,
}

impl HealthCheckConfig {
    /// `None` when health checking is disabled. A zero interval is rejected.
    pub fn settings(&self) -> Result<Option<HealthCheckSettings>, ConfigError> {
        if !self.enabled {
            return Ok(None);
        }
        if self.interval_ms == Some(0) {
            return Err(ConfigError::InvalidHealthCheck {
                problem: "interval must be greater than zero".to_string(),
            });
        }

        Ok(Some(HealthCheckSettings {
            brokers: self.brokers.clone(),
            producer_topic: non_blank(&self.producer_topic)
                .unwrap_or(HEALTH_CHECK_TOPIC)
                .to_string(),
            producer_name: non_blank(&self.producer_name)
                .unwrap_or(HEALTH_CHECK_PRODUCER_NAME)
                .to_string(),
            interval: Duration::from_millis(
                self.interval_ms.unwrap_or(DEFAULT_HEALTH_CHECK_INTERVAL_MS),
            ),
        }))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Load a config file, choosing YAML or TOML by its extension.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let read = || {
        fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })
    };

    match extension.as_deref() {
        Some("yaml") | Some("yml") => Config::from_yaml_str(&read()?),
        Some("toml") => Config::from_toml_str(&read()?),
        _ => Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}
