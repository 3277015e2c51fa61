// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Validation gate defaults.

use async_trait::async_trait;
use std::marker::PhantomData;

use crate::errors::ValidationError;
use crate::traits::MessageValidator;

/// Permissive validator used when no custom validator is keyed for a processor.
///
/// Every message is valid and the error list is always empty.
pub struct DefaultMessageValidator<I> {
    _message: PhantomData<fn(&I)>,
}

impl<I> DefaultMessageValidator<I> {
    pub fn new() -> Self {
        Self {
            _message: PhantomData,
        }
    }
}

impl<I> Default for DefaultMessageValidator<I> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<I> MessageValidator<I> for DefaultMessageValidator<I>
where
    I: Send + Sync + 'static,
{
    async fn validate(&self, _message: &I, _correlation_id: &str) -> bool {
        true
    }

    async fn errors(&self, _message: &I, _correlation_id: &str) -> Vec<ValidationError> {
        Vec::new()
    }
}
