// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

/// User logic that maps an input message to an output message.
///
/// Errors are returned as `anyhow::Error`; the pipeline wraps them into a
/// processing failure that keeps the original error as its source.
#[async_trait]
pub trait MessageProcessor<I, O>: Send + Sync
where
    I: Send + Sync + 'static,
    O: Send + 'static,
{
    async fn process(&self, message: &I, correlation_id: &str) -> anyhow::Result<O>;
}

/// User logic that consumes a message without producing output.
#[async_trait]
pub trait ConsumerOnlyProcessor<I>: Send + Sync
where
    I: Send + Sync + 'static,
{
    async fn consume(&self, message: &I, correlation_id: &str) -> anyhow::Result<()>;
}
