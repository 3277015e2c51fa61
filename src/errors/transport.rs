// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised by the in-memory transport.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransportError {
    /// The topic was never provisioned
    #[error("Topic '{topic}' does not exist")]
    UnknownTopic { topic: String },

    /// The consumer group already has a live subscription on the topic
    #[error("Consumer group '{group}' is already subscribed to topic '{topic}'")]
    AlreadySubscribed { topic: String, group: String },
}
