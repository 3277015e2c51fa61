// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-message processing.
//!
//! A [`ProcessingPipeline`] takes one inbound message through
//! `Received -> TypeChecked -> Validated -> ConsumeOnlyExecuted | TransformExecuted -> Published`
//! and always completes it. Failures are recovered per message and reported in the
//! returned [`Outcome`]; none of them escape to the transport.

mod message;
mod pipeline;


pub use message::{short_type_name, InboundMessage, Outcome, Payload, Stage, CORRELATION_ID_HEADER};
pub use pipeline::ProcessingPipeline;
