// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::registry::Mode;
use thiserror::Error;

/// Errors raised while populating the processor registry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistryError {
    /// Processor keys must be non-blank
    #[error("Processor key cannot be empty")]
    EmptyKey,

    /// A registration already exists for the key
    #[error("Processor key '{key}' is already registered")]
    DuplicateKey { key: String },

    /// The settings bound to the key cannot support the requested mode
    #[error("Processor '{key}' cannot run in {mode:?} mode: {reason}")]
    ModeMismatch {
        key: String,
        mode: Mode,
        reason: &'static str,
    },

    /// No behaviour with this name is known to the factory
    #[error("Unknown behaviour '{name}'")]
    UnknownBehaviour { name: String },
}
