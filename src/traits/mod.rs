// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Seams between the pipeline, user logic and the transport.

pub mod handler;
pub mod processor;
pub mod producer;
pub mod validator;

pub use handler::{CompletionSignal, MessageHandler};
pub use processor::{ConsumerOnlyProcessor, MessageProcessor};
pub use producer::{MessageProducer, ProducerAccessor};
pub use validator::MessageValidator;
