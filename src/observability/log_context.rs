// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::time::{Duration, Instant};
use tracing::Level;
use uuid::Uuid;

const FIXED_FIELDS: [&str; 5] = [
    "correlation_id",
    "message_type",
    "operation",
    "timestamp",
    "elapsed_ms",
];

/// Per-message diagnostic record threaded through every pipeline stage.
///
/// A context is never shared between messages. Stages add properties and
/// restart or stop the timer; the context is dropped after its last log line.
#[derive(Debug, Clone)]
pub struct LogContext {
    correlation_id: String,
    message_type: String,
    operation: String,
    timestamp: DateTime<Utc>,
    started: Instant,
    stopped: Option<Duration>,
    properties: Map<String, Value>,
}

macro_rules! emit_event {
    ($level:expr, $context:expr, $properties:expr, $message:expr) => {
        tracing::event!(
            $level,
            correlation_id = %$context.correlation_id,
            message_type = %$context.message_type,
            operation = %$context.operation,
            elapsed_ms = $context.elapsed().as_millis() as u64,
            properties = %$properties,
            "{}",
            $message
        )
    };
}

impl LogContext {
    /// Start a context, generating a correlation id when none is supplied.
    pub fn start(
        correlation_id: Option<&str>,
        message_type: impl Into<String>,
        operation: impl Into<String>,
    ) -> Self {
        let correlation_id = correlation_id
            .filter(|id| !id.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Self {
            correlation_id,
            message_type: message_type.into(),
            operation: operation.into(),
            timestamp: Utc::now(),
            started: Instant::now(),
            stopped: None,
            properties: Map::new(),
        }
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn message_type(&self) -> &str {
        &self.message_type
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    pub fn restart_timer(&mut self) {
        self.started = Instant::now();
        self.stopped = None;
    }

    /// Freeze the timer and return the elapsed time.
    pub fn stop_timer(&mut self) -> Duration {
        let elapsed = self.started.elapsed();
        self.stopped = Some(elapsed);
        elapsed
    }

    /// Elapsed time, frozen if the timer was stopped.
    pub fn elapsed(&self) -> Duration {
        self.stopped.unwrap_or_else(|| self.started.elapsed())
    }

    /// Add a property; an empty key leaves the context unchanged.
    pub fn add_property(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        if !key.trim().is_empty() {
            self.properties.insert(key.to_string(), value.into());
        }
        self
    }

    /// The five fixed fields followed by the user properties.
    ///
    /// A property named like a fixed field is dropped; the fixed value wins.
    pub fn to_structured_record(&self) -> Map<String, Value> {
        let mut record = Map::new();
        record.insert("correlation_id".into(), Value::from(self.correlation_id.clone()));
        record.insert("message_type".into(), Value::from(self.message_type.clone()));
        record.insert("operation".into(), Value::from(self.operation.clone()));
        record.insert(
            "timestamp".into(),
            Value::from(self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        record.insert(
            "elapsed_ms".into(),
            Value::from(self.elapsed().as_millis() as u64),
        );

        for (key, value) in &self.properties {
            if !FIXED_FIELDS.contains(&key.as_str()) {
                record.insert(key.clone(), value.clone());
            }
        }

        record
    }

    /// Write one `tracing` event carrying this context.
    pub fn emit(&self, level: Level, message: impl std::fmt::Display) {
        let properties = Value::Object(self.properties.clone());

        if level == Level::ERROR {
            emit_event!(Level::ERROR, self, properties, message);
        } else if level == Level::WARN {
            emit_event!(Level::WARN, self, properties, message);
        } else if level == Level::INFO {
            emit_event!(Level::INFO, self, properties, message);
        } else if level == Level::DEBUG {
            emit_event!(Level::DEBUG, self, properties, message);
        } else {
            emit_event!(Level::TRACE, self, properties, message);
        }
    }

    /// Stop the timer and record an info-level timing line for `operation`.
    pub fn log_performance(&mut self, operation: &str) -> Duration {
        let elapsed = self.stop_timer();
        self.add_property("measured_operation", operation);
        self.emit(
            Level::INFO,
            format_args!(
                "Performance measurement: {} completed in {}ms",
                operation,
                elapsed.as_millis()
            ),
        );
        elapsed
    }
}
