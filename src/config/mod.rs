// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration loading, per-key settings resolution and runtime assembly.

mod loader;
mod runtime;
mod settings;
mod validation;

pub mod consts;

pub use loader::{
    load_config, Config, HealthCheckConfig, HealthCheckSettings, ProcessorSection,
};
pub use runtime::{ConsumerBinding, ConsumerSpec, ProducerSpec, Runtime, RuntimeBuilder};
pub use settings::{producer_name, resolve, ProcessorSettings, SettingsResolver};
pub use validation::{validate_producer_names, HEALTH_CHECK_OWNER};
