// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashSet;

use crate::config::HealthCheckSettings;
use crate::registry::ProcessorRegistration;

/// Topics and brokers the transport needs before any consumer starts.
///
/// Both lists are deduplicated and keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProvisioningPlan {
    pub topics: Vec<String>,
    pub brokers: Vec<String>,
}

impl ProvisioningPlan {
    /// Topics come from registrations that ask for topic creation, plus the
    /// health-check topic when health checking is enabled. Brokers come from
    /// every registration and the health check.
    pub fn from_registrations<'a>(
        registrations: impl IntoIterator<Item = &'a ProcessorRegistration>,
        health_check: Option<&HealthCheckSettings>,
    ) -> Self {
        let mut topics = OrderedSet::default();
        let mut brokers = OrderedSet::default();

        for registration in registrations {
            let settings = registration.settings();
            if settings.create_topics_if_not_exist() {
                topics.insert(settings.consumer_topic());
                topics.insert(settings.producer_topic());
            }
            for broker in settings.brokers() {
                brokers.insert(broker);
            }
        }

        if let Some(health) = health_check {
            topics.insert(&health.producer_topic);
            for broker in &health.brokers {
                brokers.insert(broker);
            }
        }

        Self {
            topics: topics.items,
            brokers: brokers.items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty() && self.brokers.is_empty()
    }
}

#[derive(Default)]
struct OrderedSet {
    seen: HashSet<String>,
    items: Vec<String>,
}

impl OrderedSet {
    fn insert(&mut self, value: &str) {
        let value = value.trim();
        if !value.is_empty() && self.seen.insert(value.to_string()) {
            self.items.push(value.to_string());
        }
    }
}
