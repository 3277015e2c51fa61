// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::ValidationError;

/// Accepts or rejects a message before any user logic runs.
///
/// `errors` must be callable without a prior `validate` call, must return the
/// same list for the same message, and must not change state.
#[async_trait]
pub trait MessageValidator<I>: Send + Sync
where
    I: Send + Sync + 'static,
{
    async fn validate(&self, message: &I, correlation_id: &str) -> bool;

    async fn errors(&self, message: &I, correlation_id: &str) -> Vec<ValidationError>;
}
