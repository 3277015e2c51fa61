// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::config::consts::{
    DEFAULT_AUTO_COMMIT_INTERVAL_MS, DEFAULT_BUFFER_SIZE, DEFAULT_CREATE_TOPICS_IF_NOT_EXIST,
    DEFAULT_WORKER_COUNT,
};
use crate::config::{Config, HealthCheckSettings, ProcessorSection};
use crate::errors::ConfigError;

/// Name of the producer that writes `topic` on behalf of `processor_key`.
///
/// This is the one naming scheme used for every registration; uniqueness across
/// keys is checked when the runtime is built.
pub fn producer_name(producer_topic: &str, processor_key: &str) -> String {
    format!("{}_{}_producer", processor_key, producer_topic)
}

/// Validated, immutable settings for one processor key.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorSettings {
    processor_key: String,
    brokers: Vec<String>,
    consumer_topic: String,
    producer_topic: String,
    group_id: String,
    worker_count: usize,
    buffer_size: usize,
    auto_commit_interval: Duration,
    create_topics_if_not_exist: bool,
}

impl ProcessorSettings {
    /// Settings with defaults for every optional field.
    ///
    /// No validation happens here; use [`resolve`] to bind from configuration.
    pub fn new(
        processor_key: impl Into<String>,
        brokers: Vec<String>,
        consumer_topic: impl Into<String>,
        producer_topic: impl Into<String>,
        group_id: impl Into<String>,
    ) -> Self {
        Self {
            processor_key: processor_key.into(),
            brokers,
            consumer_topic: consumer_topic.into(),
            producer_topic: producer_topic.into(),
            group_id: group_id.into(),
            worker_count: DEFAULT_WORKER_COUNT,
            buffer_size: DEFAULT_BUFFER_SIZE,
            auto_commit_interval: Duration::from_millis(DEFAULT_AUTO_COMMIT_INTERVAL_MS),
            create_topics_if_not_exist: DEFAULT_CREATE_TOPICS_IF_NOT_EXIST,
        }
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_auto_commit_interval(mut self, interval: Duration) -> Self {
        self.auto_commit_interval = interval;
        self
    }

    pub fn with_create_topics_if_not_exist(mut self, create: bool) -> Self {
        self.create_topics_if_not_exist = create;
        self
    }

    pub fn processor_key(&self) -> &str {
        &self.processor_key
    }

    pub fn brokers(&self) -> &[String] {
        &self.brokers
    }

    pub fn consumer_topic(&self) -> &str {
        &self.consumer_topic
    }

    pub fn producer_topic(&self) -> &str {
        &self.producer_topic
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub fn auto_commit_interval(&self) -> Duration {
        self.auto_commit_interval
    }

    pub fn create_topics_if_not_exist(&self) -> bool {
        self.create_topics_if_not_exist
    }

    pub fn producer_name(&self) -> String {
        producer_name(&self.producer_topic, &self.processor_key)
    }

    /// Consumer group scoped to this key so keys sharing a topic each see every message.
    pub fn consumer_group(&self) -> String {
        format!("{}_{}", self.group_id, self.processor_key)
    }

    pub fn consumer_name(&self) -> String {
        format!("consumer_{}", self.processor_key)
    }

    pub fn is_consumer_only(&self) -> bool {
        self.producer_topic.trim().is_empty()
    }

    pub fn is_producer_only(&self) -> bool {
        self.consumer_topic.trim().is_empty()
    }
}

/// Bind and validate the settings for `processor_key`.
///
/// Every problem in the section is reported together.
pub fn resolve(config: &Config, processor_key: &str) -> Result<ProcessorSettings, ConfigError> {
    let section = config
        .processors
        .get(processor_key)
        .ok_or_else(|| ConfigError::MissingSection {
            key: processor_key.to_string(),
        })?;

    let problems = problems_in(section);
    if !problems.is_empty() {
        return Err(ConfigError::InvalidSettings {
            key: processor_key.to_string(),
            problems,
        });
    }

    let mut settings = ProcessorSettings::new(
        processor_key,
        section
            .brokers
            .iter()
            .map(|broker| broker.trim().to_string())
            .collect(),
        section.consumer_topic.trim(),
        section.producer_topic.trim(),
        section.group_id.trim(),
    );

    if let Some(worker_count) = section.worker_count {
        settings = settings.with_worker_count(worker_count);
    }
    if let Some(buffer_size) = section.buffer_size {
        settings = settings.with_buffer_size(buffer_size);
    }
    if let Some(interval_ms) = section.auto_commit_interval_ms {
        settings = settings.with_auto_commit_interval(Duration::from_millis(interval_ms));
    }
    if let Some(create) = section.create_topics_if_not_exist {
        settings = settings.with_create_topics_if_not_exist(create);
    }

    Ok(settings)
}

fn problems_in(section: &ProcessorSection) -> Vec<String> {
    let mut problems = Vec::new();

    if section.brokers.iter().all(|broker| broker.trim().is_empty()) {
        problems.push("brokers are not configured".to_string());
    }
    if section.consumer_topic.trim().is_empty() && section.producer_topic.trim().is_empty() {
        problems.push("neither a consumer topic nor a producer topic is configured".to_string());
    }
    if section.group_id.trim().is_empty() {
        problems.push("group id is not configured".to_string());
    }
    if section.worker_count == Some(0) {
        problems.push("worker count must be greater than zero".to_string());
    }
    if section.buffer_size == Some(0) {
        problems.push("buffer size must be greater than zero".to_string());
    }

    problems
}

/// Resolves settings from one configuration and remembers what was bound.
///
/// Bindings are never refreshed; a key keeps its first binding for the life of
/// the resolver.
#[derive(Debug)]
pub struct SettingsResolver {
    config: Config,
    bound: HashMap<String, Arc<ProcessorSettings>>,
}

impl SettingsResolver {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            bound: HashMap::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resolve(&mut self, processor_key: &str) -> Result<Arc<ProcessorSettings>, ConfigError> {
        if let Some(existing) = self.bound.get(processor_key) {
            return Ok(Arc::clone(existing));
        }

        let settings = Arc::new(resolve(&self.config, processor_key)?);
        self.bound
            .insert(processor_key.to_string(), Arc::clone(&settings));
        Ok(settings)
    }

    pub fn bound(&self, processor_key: &str) -> Option<Arc<ProcessorSettings>> {
        self.bound.get(processor_key).cloned()
    }

    pub fn health_check(&self) -> Result<Option<HealthCheckSettings>, ConfigError> {
        self.config.health_check.settings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(key: &str, section: ProcessorSection) -> Config {
        let mut config = Config::default();
        config.processors.insert(key.to_string(), section);
        config
    }

    fn valid_section() -> ProcessorSection {
        ProcessorSection {
            brokers: vec!["broker-1:9092".to_string()],
            consumer_topic: "orders".to_string(),
            producer_topic: "receipts".to_string(),
            group_id: "billing".to_string(),
            ..ProcessorSection::default()
        }
    }

    #[test]
    fn applies_defaults_for_unset_fields() {
        let config = config_with("orders", valid_section());
        let settings = resolve(&config, "orders").unwrap();

        assert_eq!(settings.worker_count(), DEFAULT_WORKER_COUNT);
        assert_eq!(settings.buffer_size(), DEFAULT_BUFFER_SIZE);
        assert_eq!(
            settings.auto_commit_interval(),
            Duration::from_millis(DEFAULT_AUTO_COMMIT_INTERVAL_MS)
        );
        assert!(settings.create_topics_if_not_exist());
    }

    #[test]
    fn derives_identity_from_key_and_topics() {
        let config = config_with("orders", valid_section());
        let settings = resolve(&config, "orders").unwrap();

        assert_eq!(settings.producer_name(), "orders_receipts_producer");
        assert_eq!(settings.consumer_group(), "billing_orders");
        assert_eq!(settings.consumer_name(), "consumer_orders");
        assert!(!settings.is_consumer_only());
        assert!(!settings.is_producer_only());
    }

    #[test]
    fn rejects_invalid_sections() {
        struct TestCase {
            name: &'static str,
            section: ProcessorSection,
            expected_problem: &'static str,
        }

        let cases = vec![
            TestCase {
                name: "no brokers",
                section: ProcessorSection {
                    brokers: vec![],
                    ..valid_section()
                },
                expected_problem: "brokers are not configured",
            },
            TestCase {
                name: "blank broker entry",
                section: ProcessorSection {
                    brokers: vec!["  ".to_string()],
                    ..valid_section()
                },
                expected_problem: "brokers are not configured",
            },
            TestCase {
                name: "no topics",
                section: ProcessorSection {
                    consumer_topic: String::new(),
                    producer_topic: " ".to_string(),
                    ..valid_section()
                },
                expected_problem: "neither a consumer topic nor a producer topic is configured",
            },
            TestCase {
                name: "blank group id",
                section: ProcessorSection {
                    group_id: "\t".to_string(),
                    ..valid_section()
                },
                expected_problem: "group id is not configured",
            },
            TestCase {
                name: "zero workers",
                section: ProcessorSection {
                    worker_count: Some(0),
                    ..valid_section()
                },
                expected_problem: "worker count must be greater than zero",
            },
            TestCase {
                name: "zero buffer",
                section: ProcessorSection {
                    buffer_size: Some(0),
                    ..valid_section()
                },
                expected_problem: "buffer size must be greater than zero",
            },
        ];

        for case in cases {
            let config = config_with("orders", case.section);
            match resolve(&config, "orders") {
                Err(ConfigError::InvalidSettings { key, problems }) => {
                    assert_eq!(key, "orders", "{}", case.name);
                    assert_eq!(problems, vec![case.expected_problem], "{}", case.name);
                }
                other => panic!("{}: expected InvalidSettings, got {:?}", case.name, other),
            }
        }
    }

    #[test]
    fn collects_every_problem() {
        let config = config_with("orders", ProcessorSection::default());
        let Err(ConfigError::InvalidSettings { problems, .. }) = resolve(&config, "orders") else {
            panic!("expected InvalidSettings");
        };
        assert_eq!(problems.len(), 3);
    }

    #[test]
    fn missing_section_is_reported() {
        let config = Config::default();
        assert!(matches!(
            resolve(&config, "orders"),
            Err(ConfigError::MissingSection { key }) if key == "orders"
        ));
    }

    #[test]
    fn consumer_only_and_producer_only() {
        let consumer = ProcessorSection {
            producer_topic: String::new(),
            ..valid_section()
        };
        let producer = ProcessorSection {
            consumer_topic: String::new(),
            ..valid_section()
        };

        let consumer = resolve(&config_with("audit", consumer), "audit").unwrap();
        assert!(consumer.is_consumer_only());
        assert!(!consumer.is_producer_only());

        let producer = resolve(&config_with("emit", producer), "emit").unwrap();
        assert!(producer.is_producer_only());
        assert!(!producer.is_consumer_only());
    }

    #[test]
    fn resolver_keeps_first_binding() {
        let mut resolver = SettingsResolver::new(config_with("orders", valid_section()));
        assert!(resolver.bound("orders").is_none());

        let first = resolver.resolve("orders").unwrap();
        let second = resolver.resolve("orders").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(resolver.bound("orders").as_deref(), Some(first.as_ref()));
    }
}
