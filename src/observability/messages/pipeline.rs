// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for per-message pipeline events.
//!
//! These are written through [`LogContext::emit`](crate::observability::LogContext::emit)
//! so every line carries the message's correlation id; the level noted on each
//! struct is the one the pipeline uses.

use crate::errors::{FrameworkError, ValidationError};
use std::fmt::{Display, Formatter};

/// A message entered the pipeline.
///
/// # Log Level
/// `debug!`
pub struct MessageReceived<'a> {
    pub processor_key: &'a str,
    pub message_type: &'a str,
}

impl Display for MessageReceived<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processing message of type {} for processor '{}'",
            self.message_type, self.processor_key
        )
    }
}

/// The decoded payload is not the type the registration expects.
///
/// # Log Level
/// `error!`
pub struct PayloadTypeMismatch<'a> {
    pub processor_key: &'a str,
    pub expected_type: &'a str,
}

impl Display for PayloadTypeMismatch<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Invalid message type for processor '{}'. Expected {}",
            self.processor_key, self.expected_type
        )
    }
}

/// The validator rejected the message.
///
/// # Log Level
/// `warn!`
pub struct ValidationFailed<'a> {
    pub message_type: &'a str,
    pub errors: &'a [ValidationError],
}

impl Display for ValidationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Message validation failed for type {}", self.message_type)?;
        if !self.errors.is_empty() {
            let rendered: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
            write!(f, ": {}", rendered.join("; "))?;
        }
        Ok(())
    }
}

/// A consumer-mode key has no consumer-only processor registered.
///
/// # Log Level
/// `info!` - treated as an intentionally disabled key
pub struct ConsumerOnlyProcessorMissing<'a> {
    pub processor_key: &'a str,
    pub message_type: &'a str,
}

impl Display for ConsumerOnlyProcessorMissing<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Consumer-only processor not found for type {} under key '{}'; message skipped",
            self.message_type, self.processor_key
        )
    }
}

/// A consumer-producer key has no transforming processor registered.
///
/// # Log Level
/// `info!`
pub struct TransformingProcessorMissing<'a> {
    pub processor_key: &'a str,
    pub input_type: &'a str,
    pub output_type: &'a str,
}

impl Display for TransformingProcessorMissing<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processor {} -> {} not found under key '{}'; message skipped",
            self.input_type, self.output_type, self.processor_key
        )
    }
}

/// Consumer-only processing finished.
///
/// # Log Level
/// `info!`
pub struct MessageConsumed<'a> {
    pub processor_key: &'a str,
}

impl Display for MessageConsumed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Message processed by '{}' without producing output",
            self.processor_key
        )
    }
}

/// The transformed message was written to the output topic.
///
/// # Log Level
/// `info!`
pub struct MessagePublished<'a> {
    pub topic: &'a str,
    pub producer_name: &'a str,
    pub message_key: &'a str,
}

impl Display for MessagePublished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Message processed and produced to topic: {} using producer: {} (key: {})",
            self.topic, self.producer_name, self.message_key
        )
    }
}

/// Processing of a message ended in a recovered failure.
///
/// # Log Level
/// `warn!` for validation failures, `error!` otherwise
pub struct ProcessingFailed<'a> {
    pub processor_key: &'a str,
    pub error: &'a FrameworkError,
}

impl Display for ProcessingFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Message for '{}' completed with {} error: {}",
            self.processor_key,
            self.error.kind(),
            self.error
        )
    }
}
