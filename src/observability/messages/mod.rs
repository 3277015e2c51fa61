// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit itself as a `tracing` event with typed fields at the
//! level documented on the struct.
//!
//! # Organization
//!
//! * `pipeline` - per-message processing events
//! * `registry` - registration, resolution and runtime build events
//! * `health` - readiness check events
//! * `transport` - consumer lifecycle and commit events
//!
//! # Usage Pattern
//!
//! ```rust
//! use keyed_stream_processor::observability::messages::StructuredLog;
//! use keyed_stream_processor::observability::messages::registry::ProcessorRegistered;
//!
//! ProcessorRegistered {
//!     processor_key: "orders",
//!     mode: "ConsumerProducer",
//!     consumer_topic: "orders",
//!     producer_topic: "receipts",
//! }
//! .log();
//! ```

use tracing::Span;

pub mod health;
pub mod pipeline;
pub mod registry;
pub mod transport;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a `tracing` event.
    fn log(&self);

    /// Build a span carrying the same fields.
    fn span(&self, name: &str) -> Span;
}
