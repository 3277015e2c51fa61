// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Behaviour implementations.
//!
//! ## Local Backend
//! Sample processors and validators for the order/receipt and content-audit
//! flows, installable by name through [`local::LocalBehaviourFactory`].
//!
//! ## Stub Backend (Test-Only)
//! Counting, failing and slow processors, recording producers, a recording
//! completion signal and a log-capturing subscriber layer. Not available in
//! production builds.

pub mod local;
#[cfg(test)]
pub mod stub;
