// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::engine::{InboundMessage, Outcome};

/// Tells the transport a message is done and may be acknowledged.
///
/// Called exactly once per handled message, whatever the outcome.
pub trait CompletionSignal: Send + Sync {
    fn complete(&self, correlation_id: &str, outcome: &Outcome);
}

/// The type-erased face of a keyed pipeline, as seen by a consumer loop.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    fn processor_key(&self) -> &str;

    async fn handle(
        &self,
        message: InboundMessage,
        completion: &dyn CompletionSignal,
        cancel: CancellationToken,
    ) -> Outcome;
}
