// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::backends::local::messages::{OrderMsg, ReceiptMsg};
use crate::traits::MessageProcessor;

/// Turns an order into a receipt; orders without an amount are marked "empty".
pub struct ReceiptEnricher;

#[async_trait]
impl MessageProcessor<OrderMsg, ReceiptMsg> for ReceiptEnricher {
    async fn process(
        &self,
        message: &OrderMsg,
        correlation_id: &str,
    ) -> anyhow::Result<ReceiptMsg> {
        if message.id.trim().is_empty() {
            anyhow::bail!("order has no id");
        }

        let status = if message.amount == 0 { "empty" } else { "ok" };
        tracing::debug!(
            correlation_id = correlation_id,
            order_id = %message.id,
            amount = message.amount,
            "Enriching order {}", message.id
        );

        Ok(ReceiptMsg {
            order_id: message.id.clone(),
            status: status.to_string(),
        })
    }
}
