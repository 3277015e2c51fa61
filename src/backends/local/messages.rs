// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types used by the sample behaviours.

#[derive(Debug, Clone, PartialEq)]
pub struct OrderMsg {
    pub id: String,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptMsg {
    pub order_id: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentMsg {
    pub id: String,
    pub content: String,
}
