// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Build-time checks across registrations.
//!
//! Producers are shared, named transport resources. Two registrations that
//! compute the same producer name for different topics would silently publish
//! into each other's topic, so the build is rejected instead.

use std::collections::HashMap;

use crate::config::HealthCheckSettings;
use crate::errors::ConfigError;
use crate::registry::ProcessorRegistration;

/// Owner label used for the readiness check's producer in collision reports.
pub const HEALTH_CHECK_OWNER: &str = "health_check";

/// Reject producer names shared by registrations with different producer topics.
///
/// Only producing registrations take part; the health-check producer counts
/// when health checking is enabled.
pub fn validate_producer_names<'a>(
    registrations: impl IntoIterator<Item = &'a ProcessorRegistration>,
    health_check: Option<&HealthCheckSettings>,
) -> Result<(), ConfigError> {
    let mut seen: HashMap<String, (String, String)> = HashMap::new();

    let producing = registrations
        .into_iter()
        .filter(|registration| registration.mode().produces())
        .map(|registration| {
            (
                registration.producer_name(),
                registration.key().to_string(),
                registration.settings().producer_topic().to_string(),
            )
        });
    let health = health_check.map(|health| {
        (
            health.producer_name.clone(),
            HEALTH_CHECK_OWNER.to_string(),
            health.producer_topic.clone(),
        )
    });

    for (producer_name, key, topic) in producing.chain(health) {
        match seen.get(&producer_name) {
            Some((first_key, first_topic)) if first_topic != &topic => {
                return Err(ConfigError::ProducerNameCollision {
                    producer_name,
                    first_key: first_key.clone(),
                    first_topic: first_topic.clone(),
                    second_key: key,
                    second_topic: topic,
                });
            }
            Some(_) => {}
            None => {
                seen.insert(producer_name, (key, topic));
            }
        }
    }

    Ok(())
}
