// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::backends::local::messages::ContentMsg;
use crate::traits::ConsumerOnlyProcessor;

/// Consumer-only processor that records each message it sees.
#[derive(Default)]
pub struct AuditConsumer {
    audited: AtomicU64,
}

impl AuditConsumer {
    pub fn audited(&self) -> u64 {
        self.audited.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ConsumerOnlyProcessor<ContentMsg> for AuditConsumer {
    async fn consume(&self, message: &ContentMsg, correlation_id: &str) -> anyhow::Result<()> {
        let count = self.audited.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            correlation_id = correlation_id,
            content_id = %message.id,
            content_length = message.content.len(),
            audited = count,
            "Audited content {}", message.id
        );
        Ok(())
    }
}
