// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;

use crate::engine::Payload;

/// A named, transport-level handle that writes keyed payloads to a topic.
///
/// Concurrent calls to `produce` must be safe; the pipeline does not serialize them.
#[async_trait]
pub trait MessageProducer: Send + Sync {
    fn name(&self) -> &str;

    async fn produce(&self, topic: &str, key: &str, payload: Payload) -> anyhow::Result<()>;
}

/// Looks up producers by name at message time.
pub trait ProducerAccessor: Send + Sync {
    fn producer(&self, name: &str) -> Option<Arc<dyn MessageProducer>>;
}
