// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and correlation tracking.
//!
//! Two pieces live here:
//!
//! * [`LogContext`] - the per-message record carrying the correlation id, message
//!   type, operation name, timer and free-form properties. One is created when a
//!   message enters the pipeline and dropped once its log lines are written.
//! * `messages` - struct-based log messages with `Display` implementations, so
//!   wording stays in one place instead of being scattered through the code.
//!
//! # Usage
//!
//! ```rust
//! use keyed_stream_processor::observability::LogContext;
//! use tracing::Level;
//!
//! let mut context = LogContext::start(None, "OrderMsg", "ProcessMessage");
//! context.add_property("worker_id", 3);
//! context.emit(Level::DEBUG, "Processing message");
//! let elapsed = context.stop_timer();
//! assert!(elapsed.as_secs() < 1);
//! ```

mod log_context;
pub mod messages;

pub use log_context::LogContext;
