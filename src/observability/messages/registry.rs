// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for registry population, behaviour resolution and runtime build.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A processor key was registered.
///
/// # Log Level
/// `info!`
///
/// # Example
/// ```
/// use keyed_stream_processor::observability::messages::registry::ProcessorRegistered;
///
/// let msg = ProcessorRegistered {
///     processor_key: "orders",
///     mode: "ConsumerProducer",
///     consumer_topic: "orders",
///     producer_topic: "receipts",
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Registered processor 'orders' in ConsumerProducer mode: orders -> receipts"
/// );
/// ```
pub struct ProcessorRegistered<'a> {
    pub processor_key: &'a str,
    pub mode: &'a str,
    pub consumer_topic: &'a str,
    pub producer_topic: &'a str,
}

impl Display for ProcessorRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Registered processor '{}' in {} mode: {} -> {}",
            self.processor_key,
            self.mode,
            display_topic(self.consumer_topic),
            display_topic(self.producer_topic)
        )
    }
}

impl StructuredLog for ProcessorRegistered<'_> {
    fn log(&self) {
        tracing::info!(
            processor_key = self.processor_key,
            mode = self.mode,
            consumer_topic = self.consumer_topic,
            producer_topic = self.producer_topic,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "registration",
            span_name = name,
            processor_key = self.processor_key,
            mode = self.mode,
        )
    }
}

fn display_topic(topic: &str) -> &str {
    if topic.is_empty() {
        "(none)"
    } else {
        topic
    }
}

/// A keyed behaviour lookup found nothing.
///
/// # Log Level
/// `info!` - absence is tolerated by the pipeline
pub struct BehaviourNotFound<'a> {
    pub processor_key: &'a str,
    pub behaviour: &'a str,
}

impl Display for BehaviourNotFound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} with key '{}' not found",
            self.behaviour, self.processor_key
        )
    }
}

impl StructuredLog for BehaviourNotFound<'_> {
    fn log(&self) {
        tracing::info!(
            processor_key = self.processor_key,
            behaviour = self.behaviour,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "resolution",
            span_name = name,
            processor_key = self.processor_key,
            behaviour = self.behaviour,
        )
    }
}

/// No custom validator is keyed for the processor; the permissive default is used.
///
/// # Log Level
/// `debug!`
pub struct DefaultValidatorInUse<'a> {
    pub processor_key: &'a str,
    pub message_type: &'a str,
}

impl Display for DefaultValidatorInUse<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Using default validator for {} under key '{}'",
            self.message_type, self.processor_key
        )
    }
}

impl StructuredLog for DefaultValidatorInUse<'_> {
    fn log(&self) {
        tracing::debug!(
            processor_key = self.processor_key,
            message_type = self.message_type,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "resolution",
            span_name = name,
            processor_key = self.processor_key,
        )
    }
}

/// Topics the transport should create before consumers start.
///
/// # Log Level
/// `info!`
pub struct TopicsToProvision<'a> {
    pub topics: &'a [String],
}

impl Display for TopicsToProvision<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Found topics to create: [{}]", self.topics.join(", "))
    }
}

impl StructuredLog for TopicsToProvision<'_> {
    fn log(&self) {
        tracing::info!(topic_count = self.topics.len(), "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("provisioning", span_name = name, topic_count = self.topics.len())
    }
}

/// A named producer was wired for a topic.
///
/// # Log Level
/// `info!`
pub struct ProducerConfigured<'a> {
    pub producer_name: &'a str,
    pub topic: &'a str,
}

impl Display for ProducerConfigured<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Configuring producer: {} for topic: {}",
            self.producer_name, self.topic
        )
    }
}

impl StructuredLog for ProducerConfigured<'_> {
    fn log(&self) {
        tracing::info!(
            producer_name = self.producer_name,
            topic = self.topic,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "provisioning",
            span_name = name,
            producer_name = self.producer_name,
            topic = self.topic,
        )
    }
}

/// The runtime finished building.
///
/// # Log Level
/// `info!`
pub struct RuntimeBuilt {
    pub consumer_count: usize,
    pub producer_count: usize,
    pub topic_count: usize,
    pub broker_count: usize,
}

impl Display for RuntimeBuilt {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Runtime built: {} consumers, {} producers, {} topics across {} brokers",
            self.consumer_count, self.producer_count, self.topic_count, self.broker_count
        )
    }
}

impl StructuredLog for RuntimeBuilt {
    fn log(&self) {
        tracing::info!(
            consumer_count = self.consumer_count,
            producer_count = self.producer_count,
            topic_count = self.topic_count,
            broker_count = self.broker_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "runtime",
            span_name = name,
            consumer_count = self.consumer_count,
            producer_count = self.producer_count,
        )
    }
}
