// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Workers spawned per consumer when the section does not set `worker_count`
pub const DEFAULT_WORKER_COUNT: usize = 20;
/// Bounded channel capacity per consumer when `buffer_size` is unset
pub const DEFAULT_BUFFER_SIZE: usize = 100;
/// Offset commit cadence when `auto_commit_interval_ms` is unset
pub const DEFAULT_AUTO_COMMIT_INTERVAL_MS: u64 = 500;
pub const DEFAULT_CREATE_TOPICS_IF_NOT_EXIST: bool = true;

/// Topic used by the readiness check
pub const HEALTH_CHECK_TOPIC: &str = "stream-health-check";
/// Producer name reserved for the readiness check
pub const HEALTH_CHECK_PRODUCER_NAME: &str = "health-check-producer";
/// Check cadence when `interval_ms` is unset
pub const DEFAULT_HEALTH_CHECK_INTERVAL_MS: u64 = 30_000;

/// Messages kept per topic, and acknowledgments kept per group, by the in-memory broker
pub const DEFAULT_RETAINED_MESSAGES: usize = 1_000;
