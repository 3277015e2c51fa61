// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod framework;
mod registry;
mod transport;
mod validation;

pub use config::ConfigError;
pub use framework::FrameworkError;
pub use registry::RegistryError;
pub use transport::TransportError;
pub use validation::{ValidationError, ValidationSeverity};

/// Errors that stop a runtime from being built.
///
/// Both kinds surface at startup and are never produced while messages flow.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
