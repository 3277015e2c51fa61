// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for consumer lifecycle events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A consumer subscribed and its workers were spawned.
///
/// # Log Level
/// `info!`
pub struct ConsumerStarted<'a> {
    pub consumer_name: &'a str,
    pub topic: &'a str,
    pub group: &'a str,
    pub worker_count: usize,
}

impl Display for ConsumerStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Consumer {} started on topic {} (group: {}, workers: {})",
            self.consumer_name, self.topic, self.group, self.worker_count
        )
    }
}

impl StructuredLog for ConsumerStarted<'_> {
    fn log(&self) {
        tracing::info!(
            consumer_name = self.consumer_name,
            topic = self.topic,
            group = self.group,
            worker_count = self.worker_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "consumer",
            span_name = name,
            consumer_name = self.consumer_name,
            group = self.group,
        )
    }
}

/// Acknowledged messages were committed for a group.
///
/// # Log Level
/// `debug!` - fires on every commit interval with progress
pub struct OffsetsCommitted<'a> {
    pub group: &'a str,
    pub committed: u64,
}

impl Display for OffsetsCommitted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Committed {} messages for group {}", self.committed, self.group)
    }
}

impl StructuredLog for OffsetsCommitted<'_> {
    fn log(&self) {
        tracing::debug!(group = self.group, committed = self.committed, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("consumer", span_name = name, group = self.group)
    }
}

/// A worker or commit task ended abnormally.
///
/// # Log Level
/// `error!`
pub struct ConsumerTaskFailed<'a> {
    pub error: &'a dyn Display,
}

impl Display for ConsumerTaskFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Consumer task failed: {}", self.error)
    }
}

impl StructuredLog for ConsumerTaskFailed<'_> {
    fn log(&self) {
        tracing::error!(error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("consumer", span_name = name)
    }
}

/// All consumers stopped after cancellation.
///
/// # Log Level
/// `info!`
pub struct ConsumersStopped {
    pub task_count: usize,
}

impl Display for ConsumersStopped {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Stopped {} consumer tasks", self.task_count)
    }
}

impl StructuredLog for ConsumersStopped {
    fn log(&self) {
        tracing::info!(task_count = self.task_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("consumer", span_name = name, task_count = self.task_count)
    }
}
