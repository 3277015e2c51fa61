// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod audit_consumer;
pub mod content_length_validator;
pub mod receipt_enricher;

pub use audit_consumer::*;
pub use content_length_validator::*;
pub use receipt_enricher::*;
