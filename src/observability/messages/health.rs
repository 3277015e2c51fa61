// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the readiness check.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A synthetic message made the round trip.
///
/// # Log Level
/// `debug!` - checks run periodically
pub struct HealthCheckSucceeded<'a> {
    pub topic: &'a str,
    pub message_id: &'a str,
}

impl Display for HealthCheckSucceeded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Health check {} delivered to topic {}",
            self.message_id, self.topic
        )
    }
}

impl StructuredLog for HealthCheckSucceeded<'_> {
    fn log(&self) {
        tracing::debug!(topic = self.topic, message_id = self.message_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("health_check", span_name = name, topic = self.topic)
    }
}

/// The health-check producer is not registered with the transport.
///
/// # Log Level
/// `warn!`
pub struct HealthProducerMissing<'a> {
    pub producer_name: &'a str,
}

impl Display for HealthProducerMissing<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Producer '{}' not found", self.producer_name)
    }
}

impl StructuredLog for HealthProducerMissing<'_> {
    fn log(&self) {
        tracing::warn!(producer_name = self.producer_name, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("health_check", span_name = name, producer_name = self.producer_name)
    }
}

/// Publishing the synthetic message failed.
///
/// # Log Level
/// `error!`
pub struct HealthCheckFailed<'a> {
    pub topic: &'a str,
    pub error: &'a dyn Display,
}

impl Display for HealthCheckFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Error during health check on topic {}: {}",
            self.topic, self.error
        )
    }
}

impl StructuredLog for HealthCheckFailed<'_> {
    fn log(&self) {
        tracing::error!(topic = self.topic, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("health_check", span_name = name, topic = self.topic)
    }
}
