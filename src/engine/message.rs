// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::any::Any;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::errors::FrameworkError;

/// A payload already decoded by an external codec.
///
/// The pipeline only checks its runtime type.
pub type Payload = Arc<dyn Any + Send + Sync>;

/// Header consulted for a correlation id when the message does not carry one.
pub const CORRELATION_ID_HEADER: &str = "correlation-id";

/// One message as delivered by the transport.
#[derive(Clone)]
pub struct InboundMessage {
    pub key: Option<String>,
    pub payload: Payload,
    pub headers: HashMap<String, String>,
    pub correlation_id: Option<String>,
}

impl InboundMessage {
    pub fn new<T: Any + Send + Sync>(payload: T) -> Self {
        Self::from_payload(Arc::new(payload))
    }

    /// Wrap a payload that is already shared.
    pub fn from_payload(payload: Payload) -> Self {
        Self {
            key: None,
            payload,
            headers: HashMap::new(),
            correlation_id: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    /// The carried correlation id: the field first, then the header.
    ///
    /// Blank values count as absent.
    pub fn incoming_correlation_id(&self) -> Option<&str> {
        self.correlation_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .or_else(|| {
                self.headers
                    .get(CORRELATION_ID_HEADER)
                    .map(String::as_str)
                    .filter(|id| !id.trim().is_empty())
            })
    }

    /// Non-blank message key.
    pub fn message_key(&self) -> Option<&str> {
        self.key.as_deref().filter(|key| !key.is_empty())
    }
}

impl std::fmt::Debug for InboundMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InboundMessage")
            .field("key", &self.key)
            .field("headers", &self.headers)
            .field("correlation_id", &self.correlation_id)
            .finish_non_exhaustive()
    }
}

/// Pipeline states in the order a message passes through them.
///
/// `Completed` is implicit: every handled message reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Received,
    TypeChecked,
    Validated,
    ConsumeOnlyExecuted,
    TransformExecuted,
    Published,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Received => "Received",
            Stage::TypeChecked => "TypeChecked",
            Stage::Validated => "Validated",
            Stage::ConsumeOnlyExecuted => "ConsumeOnlyExecuted",
            Stage::TransformExecuted => "TransformExecuted",
            Stage::Published => "Published",
        };
        f.write_str(name)
    }
}

/// What happened to one message.
///
/// Returned for observation only; the transport is always told to continue.
#[derive(Debug)]
pub enum Outcome {
    Published { topic: String, key: String },
    Consumed,
    /// No user logic was registered for the key.
    Skipped,
    Failed { stage: Stage, error: FrameworkError },
}

impl Outcome {
    /// The last stage the message reached before completing.
    pub fn stage(&self) -> Stage {
        match self {
            Outcome::Published { .. } => Stage::Published,
            Outcome::Consumed => Stage::ConsumeOnlyExecuted,
            Outcome::Skipped => Stage::Validated,
            Outcome::Failed { stage, .. } => *stage,
        }
    }

    pub fn error(&self) -> Option<&FrameworkError> {
        match self {
            Outcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Published { topic, key } => write!(f, "published to {} (key: {})", topic, key),
            Outcome::Consumed => write!(f, "consumed"),
            Outcome::Skipped => write!(f, "skipped"),
            Outcome::Failed { stage, error } => {
                write!(f, "{} failure after {}: {}", error.kind(), stage, error)
            }
        }
    }
}

/// Type name without its module path, for logs and error fields.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(index) => &full[index + 2..],
        None => full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OrderMsg;

    #[test]
    fn correlation_id_prefers_field_over_header() {
        struct TestCase {
            name: &'static str,
            field: Option<&'static str>,
            header: Option<&'static str>,
            expected: Option<&'static str>,
        }

        let cases = vec![
            TestCase {
                name: "field only",
                field: Some("f-1"),
                header: None,
                expected: Some("f-1"),
            },
            TestCase {
                name: "header only",
                field: None,
                header: Some("h-1"),
                expected: Some("h-1"),
            },
            TestCase {
                name: "both",
                field: Some("f-1"),
                header: Some("h-1"),
                expected: Some("f-1"),
            },
            TestCase {
                name: "blank field",
                field: Some(" "),
                header: Some("h-1"),
                expected: Some("h-1"),
            },
            TestCase { name: "neither", field: None, header: None, expected: None },
        ];

        for case in cases {
            let mut message = InboundMessage::new(1u32);
            if let Some(field) = case.field {
                message = message.with_correlation_id(field);
            }
            if let Some(header) = case.header {
                message = message.with_header(CORRELATION_ID_HEADER, header);
            }
            assert_eq!(message.incoming_correlation_id(), case.expected, "{}", case.name);
        }
    }

    #[test]
    fn empty_key_is_treated_as_missing() {
        assert_eq!(InboundMessage::new(1u32).with_key("").message_key(), None);
        assert_eq!(InboundMessage::new(1u32).with_key("A1").message_key(), Some("A1"));
    }

    #[test]
    fn short_type_name_strips_module_path() {
        assert_eq!(short_type_name::<OrderMsg>(), "OrderMsg");
        assert_eq!(short_type_name::<u32>(), "u32");
        assert_eq!(short_type_name::<Vec<String>>(), "Vec<alloc::string::String>");
    }

    #[test]
    fn outcome_reports_stage_reached() {
        assert_eq!(Outcome::Skipped.stage(), Stage::Validated);
        assert_eq!(Outcome::Consumed.stage(), Stage::ConsumeOnlyExecuted);

        let failed = Outcome::Failed {
            stage: Stage::Received,
            error: FrameworkError::cancelled("OrderMsg", "c", "validate"),
        };
        assert_eq!(failed.stage(), Stage::Received);
        assert!(failed.is_failure());
    }
}
