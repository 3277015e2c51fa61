// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-process transport.
//!
//! [`InMemoryBroker`] stands in for a message broker: topics fan out to one
//! bounded channel per consumer group, each consumer runs a pool of workers
//! that hand messages to the keyed pipelines, and acknowledgments are counted
//! per group and committed on the configured interval. It also serves as the
//! [`ProducerAccessor`](crate::traits::ProducerAccessor) the pipelines publish
//! through.

mod memory;

pub use memory::{AckRecord, AckTracker, InMemoryBroker, InMemoryProducer, RunningConsumers};
