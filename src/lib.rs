// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;      // sample behaviours + test doubles
pub mod config;        // settings resolution + runtime assembly
pub mod engine;        // per-message pipeline
pub mod errors;        // error handling
pub mod health;        // liveness + readiness checks
pub mod observability;
pub mod registry;      // keyed processor registry
pub mod traits;        // behaviour + transport seams
pub mod transport;     // in-memory broker
pub mod validation;    // default validator
