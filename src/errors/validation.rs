// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::fmt;

/// How serious a single validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub enum ValidationSeverity {
    Information,
    Warning,
    #[default]
    Error,
}

/// A single finding produced by a message validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub property_name: Option<String>,
    pub error_message: String,
    pub error_code: Option<String>,
    pub severity: ValidationSeverity,
}

impl ValidationError {
    /// A message-level error not tied to any property.
    pub fn new(error_message: impl Into<String>) -> Self {
        Self {
            property_name: None,
            error_message: error_message.into(),
            error_code: None,
            severity: ValidationSeverity::Error,
        }
    }

    /// An error attached to a named property of the message.
    pub fn for_property(
        property_name: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            property_name: Some(property_name.into()),
            ..Self::new(error_message)
        }
    }

    pub fn with_code(mut self, error_code: impl Into<String>) -> Self {
        self.error_code = Some(error_code.into());
        self
    }

    pub fn with_severity(mut self, severity: ValidationSeverity) -> Self {
        self.severity = severity;
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.property_name {
            Some(property) => write!(f, "{}: {}", property, self.error_message),
            None => write!(f, "{}", self.error_message),
        }
    }
}
