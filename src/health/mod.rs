// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Liveness and readiness checks.
//!
//! Readiness is asserted by publishing a synthetic [`HealthCheckMessage`]
//! through the health-check producer, the same producer abstraction the
//! pipeline uses.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::config::HealthCheckSettings;
use crate::observability::messages::health::{
    HealthCheckFailed, HealthCheckSucceeded, HealthProducerMissing,
};
use crate::observability::messages::StructuredLog;
use crate::traits::ProducerAccessor;

/// The synthetic message published by the readiness check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthCheckMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Result of one check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub description: String,
    pub data: Map<String, Value>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

pub struct HealthChecker {
    settings: HealthCheckSettings,
    producers: Arc<dyn ProducerAccessor>,
    last_successful_check: RwLock<Option<DateTime<Utc>>>,
    latest: RwLock<Option<HealthReport>>,
}

impl HealthChecker {
    pub fn new(settings: HealthCheckSettings, producers: Arc<dyn ProducerAccessor>) -> Self {
        Self {
            settings,
            producers,
            last_successful_check: RwLock::new(None),
            latest: RwLock::new(None),
        }
    }

    /// Healthy whenever the process can answer.
    pub fn liveness(&self) -> HealthReport {
        HealthReport {
            status: HealthStatus::Healthy,
            description: "Process is running".to_string(),
            data: Map::new(),
        }
    }

    /// Round-trip a check message through the health-check producer and topic.
    pub async fn readiness(&self) -> HealthReport {
        let topic = self.settings.producer_topic.as_str();
        let producer_name = self.settings.producer_name.as_str();

        let Some(producer) = self.producers.producer(producer_name) else {
            let missing = HealthProducerMissing { producer_name };
            missing.log();
            let mut data = self.base_data().await;
            data.insert("producer_name".into(), json!(producer_name));
            return self
                .record(HealthReport {
                    status: HealthStatus::Unhealthy,
                    description: missing.to_string(),
                    data,
                })
                .await;
        };

        let heartbeat = HealthCheckMessage {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
        };

        match producer
            .produce(topic, &heartbeat.id, Arc::new(heartbeat.clone()))
            .await
        {
            Ok(()) => {
                *self.last_successful_check.write().await = Some(Utc::now());
                HealthCheckSucceeded {
                    topic,
                    message_id: &heartbeat.id,
                }
                .log();

                let mut data = self.base_data().await;
                data.insert("message_id".into(), json!(heartbeat.id));
                self.record(HealthReport {
                    status: HealthStatus::Healthy,
                    description: "Transport connection is healthy".to_string(),
                    data,
                })
                .await
            }
            Err(error) => {
                HealthCheckFailed {
                    topic,
                    error: &error,
                }
                .log();

                let mut data = self.base_data().await;
                data.insert("error".into(), json!(error.to_string()));
                self.record(HealthReport {
                    status: HealthStatus::Unhealthy,
                    description: "Failed to publish health check".to_string(),
                    data,
                })
                .await
            }
        }
    }

    pub async fn last_successful_check(&self) -> Option<DateTime<Utc>> {
        *self.last_successful_check.read().await
    }

    /// The report from the most recent check, if one has run.
    pub async fn latest(&self) -> Option<HealthReport> {
        self.latest.read().await.clone()
    }

    /// Check at `interval` until `cancel` fires. The interval is at least 1ms.
    pub fn spawn(self: Arc<Self>, interval: Duration, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        self.readiness().await;
                    }
                }
            }
        })
    }

    async fn base_data(&self) -> Map<String, Value> {
        let last = self
            .last_successful_check()
            .await
            .map(|at| Value::from(at.to_rfc3339_opts(SecondsFormat::Millis, true)))
            .unwrap_or(Value::Null);

        let mut data = Map::new();
        data.insert("last_successful_check".into(), last);
        data.insert("health_check_topic".into(), json!(self.settings.producer_topic));
        data
    }

    async fn record(&self, report: HealthReport) -> HealthReport {
        *self.latest.write().await = Some(report.clone());
        report
    }
}
