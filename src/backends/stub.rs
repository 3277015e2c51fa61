// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Test doubles for behaviours, producers, completion and log capture.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

use crate::engine::{Outcome, Payload};
use crate::errors::ValidationError;
use crate::traits::{
    CompletionSignal, ConsumerOnlyProcessor, MessageProcessor, MessageProducer, MessageValidator,
    ProducerAccessor,
};

/// Transforming processor that prefixes its input with a label and counts calls
pub struct CountingProcessor {
    label: String,
    calls: AtomicUsize,
}

impl CountingProcessor {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageProcessor<String, String> for CountingProcessor {
    async fn process(&self, message: &String, _correlation_id: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{}:{}", self.label, message))
    }
}

/// A processor that always fails
pub struct FailingProcessor;

#[async_trait]
impl MessageProcessor<String, String> for FailingProcessor {
    async fn process(&self, _message: &String, _correlation_id: &str) -> anyhow::Result<String> {
        Err(anyhow::anyhow!("simulated processor failure"))
    }
}

/// A processor that panics on every message
pub struct PanickingProcessor;

#[async_trait]
impl MessageProcessor<String, String> for PanickingProcessor {
    async fn process(&self, _message: &String, _correlation_id: &str) -> anyhow::Result<String> {
        panic!("processor blew up")
    }
}

/// A consumer-only processor that panics on every message
pub struct PanickingConsumer;

#[async_trait]
impl ConsumerOnlyProcessor<String> for PanickingConsumer {
    async fn consume(&self, _message: &String, _correlation_id: &str) -> anyhow::Result<()> {
        panic!("consumer blew up")
    }
}

/// A processor that sleeps before answering, for cancellation tests
pub struct SlowProcessor {
    delay: Duration,
}

impl SlowProcessor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl MessageProcessor<String, String> for SlowProcessor {
    async fn process(&self, message: &String, _correlation_id: &str) -> anyhow::Result<String> {
        tokio::time::sleep(self.delay).await;
        Ok(message.clone())
    }
}

#[derive(Default)]
pub struct CountingConsumer {
    calls: AtomicUsize,
}

impl CountingConsumer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConsumerOnlyProcessor<String> for CountingConsumer {
    async fn consume(&self, _message: &String, _correlation_id: &str) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Validator that rejects every message with one error
pub struct RejectingValidator {
    message: String,
}

impl RejectingValidator {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl MessageValidator<String> for RejectingValidator {
    async fn validate(&self, _message: &String, _correlation_id: &str) -> bool {
        false
    }

    async fn errors(&self, _message: &String, _correlation_id: &str) -> Vec<ValidationError> {
        vec![ValidationError::new(self.message.clone())]
    }
}

#[derive(Clone)]
pub struct PublishedMessage {
    pub producer: String,
    pub topic: String,
    pub key: String,
    pub payload: Payload,
}

struct RecordingProducer {
    name: String,
    fail: bool,
    published: Arc<Mutex<Vec<PublishedMessage>>>,
}

#[async_trait]
impl MessageProducer for RecordingProducer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn produce(&self, topic: &str, key: &str, payload: Payload) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("broker unavailable");
        }
        self.published.lock().unwrap().push(PublishedMessage {
            producer: self.name.clone(),
            topic: topic.to_string(),
            key: key.to_string(),
            payload,
        });
        Ok(())
    }
}

/// Producer accessor that knows a fixed set of names and records every publish
pub struct RecordingProducers {
    names: Vec<String>,
    fail: bool,
    lookups: AtomicUsize,
    published: Arc<Mutex<Vec<PublishedMessage>>>,
}

impl RecordingProducers {
    pub fn with(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            fail: false,
            lookups: AtomicUsize::new(0),
            published: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Producers that exist but fail every publish
    pub fn failing(names: &[&str]) -> Self {
        Self {
            fail: true,
            ..Self::with(names)
        }
    }

    pub fn published(&self) -> Vec<PublishedMessage> {
        self.published.lock().unwrap().clone()
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl ProducerAccessor for RecordingProducers {
    fn producer(&self, name: &str) -> Option<Arc<dyn MessageProducer>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if !self.names.iter().any(|n| n == name) {
            return None;
        }
        Some(Arc::new(RecordingProducer {
            name: name.to_string(),
            fail: self.fail,
            published: Arc::clone(&self.published),
        }))
    }
}

/// Records the correlation id of every completed message
#[derive(Default)]
pub struct RecordingCompletion {
    completed: Mutex<Vec<String>>,
}

impl RecordingCompletion {
    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

impl CompletionSignal for RecordingCompletion {
    fn complete(&self, correlation_id: &str, _outcome: &Outcome) {
        self.completed.lock().unwrap().push(correlation_id.to_string());
    }
}

#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub message: String,
}

struct MessageVisitor<'a>(&'a mut String);

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{:?}", value);
        }
    }
}

struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
        });
    }
}

/// Events recorded on the current thread while this value is alive
pub struct CapturedLogs {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
    _guard: DefaultGuard,
}

impl CapturedLogs {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count_at(&self, level: Level) -> usize {
        self.events().iter().filter(|e| e.level == level).count()
    }

    /// Messages at `level` containing `needle`
    pub fn matching(&self, level: Level, needle: &str) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| e.level == level && e.message.contains(needle))
            .map(|e| e.message)
            .collect()
    }
}

/// Install a capturing subscriber for the current thread.
///
/// Use with the current-thread runtime so spawned work logs on the same thread.
pub fn capture_logs() -> CapturedLogs {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(CaptureLayer {
        events: Arc::clone(&events),
    });
    CapturedLogs {
        events,
        _guard: tracing::subscriber::set_default(subscriber),
    }
}
