// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-message errors produced inside the processing pipeline.
//!
//! These never propagate to the transport. The pipeline logs them at the level
//! returned by [`FrameworkError::level`] and reports them inside the message outcome.

use crate::errors::ValidationError;
use thiserror::Error;
use tracing::Level;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum FrameworkError {
    /// The message was rejected by its validator
    #[error("{message} ({} validation error(s))", .errors.len())]
    Validation {
        correlation_id: String,
        message: String,
        errors: Vec<ValidationError>,
    },

    /// User logic or the publish step failed
    #[error("{message}")]
    Processing {
        message_type: &'static str,
        correlation_id: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The payload could not be read as the expected type
    #[error("{} error for {data_type}: {message}", operation_name(.is_encoding_error))]
    Serialization {
        data_type: &'static str,
        correlation_id: String,
        is_encoding_error: bool,
        message: String,
    },

    /// The transport could not be reached through the configured producer
    #[error("{message} (brokers: [{}], topic: {topic})", .brokers.join(", "))]
    Connection {
        brokers: Vec<String>,
        topic: String,
        correlation_id: String,
        message: String,
    },
}

fn operation_name(is_encoding_error: &bool) -> &'static str {
    if *is_encoding_error {
        "Serialization"
    } else {
        "Deserialization"
    }
}

impl FrameworkError {
    pub fn correlation_id(&self) -> &str {
        match self {
            FrameworkError::Validation { correlation_id, .. }
            | FrameworkError::Processing { correlation_id, .. }
            | FrameworkError::Serialization { correlation_id, .. }
            | FrameworkError::Connection { correlation_id, .. } => correlation_id,
        }
    }

    /// Short kind name used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            FrameworkError::Validation { .. } => "validation",
            FrameworkError::Processing { .. } => "processing",
            FrameworkError::Serialization { .. } => "serialization",
            FrameworkError::Connection { .. } => "connection",
        }
    }

    /// Validation failures are data problems and log at warn; the rest log at error.
    pub fn level(&self) -> Level {
        match self {
            FrameworkError::Validation { .. } => Level::WARN,
            _ => Level::ERROR,
        }
    }

    /// Wrap a user-logic failure.
    pub fn processing(
        message_type: &'static str,
        correlation_id: &str,
        message: impl Into<String>,
        source: anyhow::Error,
    ) -> Self {
        FrameworkError::Processing {
            message_type,
            correlation_id: correlation_id.to_string(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The per-message cancellation token fired at a suspension point.
    pub fn cancelled(message_type: &'static str, correlation_id: &str, stage: &str) -> Self {
        FrameworkError::Processing {
            message_type,
            correlation_id: correlation_id.to_string(),
            message: format!("Processing of {} cancelled during {}", message_type, stage),
            source: None,
        }
    }

    /// User logic panicked at a suspension point.
    pub fn panicked(
        message_type: &'static str,
        correlation_id: &str,
        stage: &str,
        detail: &str,
    ) -> Self {
        FrameworkError::Processing {
            message_type,
            correlation_id: correlation_id.to_string(),
            message: format!(
                "Processing of {} panicked during {}: {}",
                message_type, stage, detail
            ),
            source: None,
        }
    }

    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            FrameworkError::Validation { errors, .. } => errors,
            _ => &[],
        }
    }
}
