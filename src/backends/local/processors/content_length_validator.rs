// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::backends::local::messages::ContentMsg;
use crate::errors::ValidationError;
use crate::traits::MessageValidator;

pub const DEFAULT_MIN_CONTENT_LENGTH: usize = 10;

/// Rejects messages whose id is blank or whose content is shorter than a minimum.
pub struct MinContentLengthValidator {
    min_length: usize,
}

impl MinContentLengthValidator {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl Default for MinContentLengthValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CONTENT_LENGTH)
    }
}

#[async_trait]
impl MessageValidator<ContentMsg> for MinContentLengthValidator {
    async fn validate(&self, message: &ContentMsg, correlation_id: &str) -> bool {
        self.errors(message, correlation_id).await.is_empty()
    }

    async fn errors(&self, message: &ContentMsg, _correlation_id: &str) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if message.id.trim().is_empty() {
            errors.push(
                ValidationError::for_property("id", "Id is required").with_code("REQUIRED"),
            );
        }

        let length = message.content.chars().count();
        if length < self.min_length {
            errors.push(
                ValidationError::for_property(
                    "content",
                    format!(
                        "Content must be at least {} characters (minimum length), got {}",
                        self.min_length, length
                    ),
                )
                .with_code("MIN_LENGTH"),
            );
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(id: &str, content: &str) -> ContentMsg {
        ContentMsg {
            id: id.to_string(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_min_length() {
        let validator = MinContentLengthValidator::default();

        assert!(validator.validate(&content("B1", "long enough text"), "c").await);
        assert!(!validator.validate(&content("B2", "short"), "c").await);

        let errors = validator.errors(&content("B2", "short"), "c").await;
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].property_name.as_deref(), Some("content"));
        assert_eq!(errors[0].error_code.as_deref(), Some("MIN_LENGTH"));
        assert!(errors[0].error_message.contains("minimum length"));
    }

    #[tokio::test]
    async fn test_errors_are_idempotent_and_independent_of_validate() {
        let validator = MinContentLengthValidator::new(3);
        let message = content("", "ab");

        let first = validator.errors(&message, "c-1").await;
        let second = validator.errors(&message, "c-1").await;

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
