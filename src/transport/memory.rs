// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use futures::FutureExt;
use std::collections::{HashMap, HashSet, VecDeque};
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::config::consts::DEFAULT_RETAINED_MESSAGES;
use crate::config::{ConsumerBinding, Runtime};
use crate::engine::{InboundMessage, Outcome, Payload};
use crate::errors::TransportError;
use crate::observability::messages::registry::{ProducerConfigured, TopicsToProvision};
use crate::observability::messages::transport::{
    ConsumerStarted, ConsumerTaskFailed, ConsumersStopped, OffsetsCommitted,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{CompletionSignal, MessageHandler, MessageProducer, ProducerAccessor};

#[derive(Default)]
struct Topic {
    subscriptions: Vec<Subscription>,
    history: VecDeque<InboundMessage>,
}

struct Subscription {
    group: String,
    sender: mpsc::Sender<InboundMessage>,
}

struct BrokerState {
    retention: usize,
    topics: RwLock<HashMap<String, Topic>>,
    producers: RwLock<HashSet<String>>,
    trackers: RwLock<HashMap<String, Arc<AckTracker>>>,
}

/// A broker living in the current process.
///
/// Cloning is cheap; clones share the same topics, producers and trackers.
/// Only the most recent messages per topic and acknowledgments per group are
/// retained for inspection; counts are never truncated.
#[derive(Clone)]
pub struct InMemoryBroker {
    state: Arc<BrokerState>,
}

impl Default for InMemoryBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBroker {
    pub fn new() -> Self {
        Self::with_retention(DEFAULT_RETAINED_MESSAGES)
    }

    /// Keep at most `retention` messages per topic and records per group.
    pub fn with_retention(retention: usize) -> Self {
        Self {
            state: Arc::new(BrokerState {
                retention,
                topics: RwLock::default(),
                producers: RwLock::default(),
                trackers: RwLock::default(),
            }),
        }
    }

    /// Create the planned topics and register every producer the runtime needs.
    pub fn provision(&self, runtime: &Runtime) {
        let plan = runtime.plan();
        if !plan.topics.is_empty() {
            TopicsToProvision {
                topics: &plan.topics,
            }
            .log();
        }
        for topic in &plan.topics {
            self.create_topic(topic);
        }

        for spec in runtime.producers() {
            ProducerConfigured {
                producer_name: &spec.name,
                topic: &spec.default_topic,
            }
            .log();
            self.add_producer(&spec.name);
        }
    }

    /// Creating an existing topic is a no-op.
    pub fn create_topic(&self, topic: &str) {
        self.state
            .topics
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(topic.to_string())
            .or_default();
    }

    pub fn add_producer(&self, name: &str) {
        self.state
            .producers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string());
    }

    /// Provisioned topic names, sorted.
    pub fn topics(&self) -> Vec<String> {
        let mut topics: Vec<String> = self
            .state
            .topics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        topics.sort();
        topics
    }

    /// Append a message to the topic and deliver a copy to every subscribed group.
    ///
    /// Waits while a group's buffer is full.
    pub async fn publish(
        &self,
        topic: &str,
        message: InboundMessage,
    ) -> Result<(), TransportError> {
        let senders: Vec<mpsc::Sender<InboundMessage>> = {
            let mut topics = self
                .state
                .topics
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let entry = topics
                .get_mut(topic)
                .ok_or_else(|| TransportError::UnknownTopic {
                    topic: topic.to_string(),
                })?;
            entry.history.push_back(message.clone());
            while entry.history.len() > self.state.retention {
                entry.history.pop_front();
            }
            entry
                .subscriptions
                .retain(|subscription| !subscription.sender.is_closed());
            entry
                .subscriptions
                .iter()
                .map(|subscription| subscription.sender.clone())
                .collect()
        };

        for sender in senders {
            // a group shutting down between the snapshot and the send just misses it
            let _ = sender.send(message.clone()).await;
        }
        Ok(())
    }

    /// The retained messages published to the topic, oldest first.
    pub fn published(&self, topic: &str) -> Vec<InboundMessage> {
        self.state
            .topics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(topic)
            .map(|entry| entry.history.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Subscribe every binding and spawn its workers and commit task.
    ///
    /// Nothing is spawned unless every binding could subscribe.
    pub fn start(
        &self,
        bindings: &[ConsumerBinding],
        cancel: CancellationToken,
    ) -> Result<RunningConsumers, TransportError> {
        let mut subscribed = Vec::with_capacity(bindings.len());
        for binding in bindings {
            let spec = binding.spec();
            match self.subscribe(&spec.topic, &spec.group, spec.buffer_size) {
                Ok(receiver) => subscribed.push((binding, receiver)),
                Err(error) => {
                    for (binding, _) in &subscribed {
                        self.unsubscribe(&binding.spec().topic, &binding.spec().group);
                    }
                    return Err(error);
                }
            }
        }

        let mut tasks = JoinSet::new();
        for (binding, receiver) in subscribed {
            let spec = binding.spec();
            let tracker = self.tracker(&spec.group);
            let receiver = Arc::new(Mutex::new(receiver));
            let worker_count = spec.worker_count.max(1);

            for _ in 0..worker_count {
                tasks.spawn(run_worker(
                    Arc::clone(&receiver),
                    Arc::clone(binding.handler()),
                    Arc::clone(&tracker),
                    cancel.clone(),
                ));
            }
            tasks.spawn(run_committer(
                tracker,
                spec.auto_commit_interval,
                cancel.clone(),
            ));

            ConsumerStarted {
                consumer_name: &spec.name,
                topic: &spec.topic,
                group: &spec.group,
                worker_count,
            }
            .log();
        }

        Ok(RunningConsumers { tasks, cancel })
    }

    /// Messages acknowledged by the group so far.
    pub fn acknowledged(&self, group: &str) -> u64 {
        self.find_tracker(group)
            .map(|tracker| tracker.acknowledged())
            .unwrap_or(0)
    }

    /// Messages committed by the group so far.
    pub fn committed(&self, group: &str) -> u64 {
        self.find_tracker(group)
            .map(|tracker| tracker.committed())
            .unwrap_or(0)
    }

    pub fn outcomes(&self, group: &str) -> Vec<AckRecord> {
        self.find_tracker(group)
            .map(|tracker| tracker.records())
            .unwrap_or_default()
    }

    /// Wait until the group has acknowledged at least `count` messages.
    ///
    /// Returns `false` when `timeout` elapses first or the group never started.
    pub async fn wait_for_acks(&self, group: &str, count: u64, timeout: Duration) -> bool {
        let Some(tracker) = self.find_tracker(group) else {
            return false;
        };
        let mut acknowledged = tracker.acknowledged.subscribe();
        tokio::time::timeout(timeout, acknowledged.wait_for(|n| *n >= count))
            .await
            .is_ok_and(|reached| reached.is_ok())
    }

    fn subscribe(
        &self,
        topic: &str,
        group: &str,
        buffer_size: usize,
    ) -> Result<mpsc::Receiver<InboundMessage>, TransportError> {
        let mut topics = self
            .state
            .topics
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = topics
            .get_mut(topic)
            .ok_or_else(|| TransportError::UnknownTopic {
                topic: topic.to_string(),
            })?;

        entry
            .subscriptions
            .retain(|subscription| !subscription.sender.is_closed());
        if entry
            .subscriptions
            .iter()
            .any(|subscription| subscription.group == group)
        {
            return Err(TransportError::AlreadySubscribed {
                topic: topic.to_string(),
                group: group.to_string(),
            });
        }

        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        entry.subscriptions.push(Subscription {
            group: group.to_string(),
            sender,
        });
        Ok(receiver)
    }

    fn unsubscribe(&self, topic: &str, group: &str) {
        let mut topics = self
            .state
            .topics
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = topics.get_mut(topic) {
            entry
                .subscriptions
                .retain(|subscription| subscription.group != group);
        }
    }

    fn tracker(&self, group: &str) -> Arc<AckTracker> {
        let mut trackers = self
            .state
            .trackers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            trackers
                .entry(group.to_string())
                .or_insert_with(|| Arc::new(AckTracker::new(group, self.state.retention))),
        )
    }

    fn find_tracker(&self, group: &str) -> Option<Arc<AckTracker>> {
        self.state
            .trackers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(group)
            .cloned()
    }
}

impl ProducerAccessor for InMemoryBroker {
    fn producer(&self, name: &str) -> Option<Arc<dyn MessageProducer>> {
        let known = self
            .state
            .producers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(name);
        if !known {
            return None;
        }
        Some(Arc::new(InMemoryProducer {
            name: name.to_string(),
            broker: self.clone(),
        }))
    }
}

/// A named producer publishing into an [`InMemoryBroker`].
pub struct InMemoryProducer {
    name: String,
    broker: InMemoryBroker,
}

#[async_trait]
impl MessageProducer for InMemoryProducer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn produce(&self, topic: &str, key: &str, payload: Payload) -> anyhow::Result<()> {
        let message = InboundMessage::from_payload(payload).with_key(key);
        self.broker.publish(topic, message).await?;
        Ok(())
    }
}

/// One acknowledged message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AckRecord {
    pub correlation_id: String,
    pub summary: String,
    pub failed: bool,
}

/// Per-group acknowledgment counter.
///
/// Every handled message is acknowledged, failed or not; committing copies
/// the acknowledged count into the committed count.
pub struct AckTracker {
    group: String,
    acknowledged: watch::Sender<u64>,
    committed: AtomicU64,
    retention: usize,
    records: StdMutex<VecDeque<AckRecord>>,
}

impl AckTracker {
    /// Keep at most `retention` records; the counts cover every acknowledgment.
    pub fn new(group: &str, retention: usize) -> Self {
        let (acknowledged, _) = watch::channel(0);
        Self {
            group: group.to_string(),
            acknowledged,
            committed: AtomicU64::new(0),
            retention,
            records: StdMutex::new(VecDeque::new()),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn acknowledged(&self) -> u64 {
        *self.acknowledged.borrow()
    }

    pub fn committed(&self) -> u64 {
        self.committed.load(Ordering::SeqCst)
    }

    pub fn records(&self) -> Vec<AckRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Commit everything acknowledged so far. Returns the newly committed count.
    pub fn commit(&self) -> u64 {
        let acknowledged = self.acknowledged();
        let previous = self.committed.swap(acknowledged, Ordering::SeqCst);
        let fresh = acknowledged.saturating_sub(previous);
        if fresh > 0 {
            OffsetsCommitted {
                group: &self.group,
                committed: acknowledged,
            }
            .log();
        }
        fresh
    }
}

impl CompletionSignal for AckTracker {
    fn complete(&self, correlation_id: &str, outcome: &Outcome) {
        {
            let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
            records.push_back(AckRecord {
                correlation_id: correlation_id.to_string(),
                summary: outcome.to_string(),
                failed: outcome.is_failure(),
            });
            while records.len() > self.retention {
                records.pop_front();
            }
        }
        self.acknowledged.send_modify(|count| *count += 1);
    }
}

/// Handle to the spawned consumer tasks.
pub struct RunningConsumers {
    tasks: JoinSet<()>,
    cancel: CancellationToken,
}

impl RunningConsumers {
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Cancel every worker and wait for all tasks to finish.
    ///
    /// Messages still buffered are left unacknowledged.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        let task_count = self.tasks.len();
        while let Some(result) = self.tasks.join_next().await {
            if let Err(error) = result {
                ConsumerTaskFailed { error: &error }.log();
            }
        }
        ConsumersStopped { task_count }.log();
    }
}

async fn run_worker(
    receiver: Arc<Mutex<mpsc::Receiver<InboundMessage>>>,
    handler: Arc<dyn MessageHandler>,
    tracker: Arc<AckTracker>,
    cancel: CancellationToken,
) {
    loop {
        let next = {
            let mut receiver = receiver.lock().await;
            tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                message = receiver.recv() => message,
            }
        };

        let Some(message) = next else {
            break;
        };
        let handled = AssertUnwindSafe(handler.handle(
            message,
            tracker.as_ref(),
            cancel.child_token(),
        ))
        .catch_unwind()
        .await;
        if handled.is_err() {
            let error = format!("handler for '{}' panicked", handler.processor_key());
            ConsumerTaskFailed { error: &error }.log();
        }
    }
}

async fn run_committer(tracker: Arc<AckTracker>, interval: Duration, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracker.commit();
                break;
            }
            _ = ticker.tick() => {
                tracker.commit();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, RuntimeBuilder};
    use crate::engine::Stage;
    use std::sync::atomic::AtomicUsize;

    struct CountingHandler {
        key: String,
        handled: AtomicUsize,
        fail: bool,
    }

    impl CountingHandler {
        fn new(key: &str, fail: bool) -> Self {
            Self {
                key: key.to_string(),
                handled: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl MessageHandler for CountingHandler {
        fn processor_key(&self) -> &str {
            &self.key
        }

        async fn handle(
            &self,
            message: InboundMessage,
            completion: &dyn CompletionSignal,
            _cancel: CancellationToken,
        ) -> Outcome {
            self.handled.fetch_add(1, Ordering::SeqCst);
            let outcome = if self.fail {
                Outcome::Failed {
                    stage: Stage::Received,
                    error: crate::errors::FrameworkError::cancelled("u32", "c", "Received"),
                }
            } else {
                Outcome::Consumed
            };
            let correlation_id = message.incoming_correlation_id().unwrap_or("none").to_string();
            completion.complete(&correlation_id, &outcome);
            outcome
        }
    }

    /// Panics on the first message, acknowledges the rest
    struct PanicOnceHandler {
        panicked: std::sync::atomic::AtomicBool,
    }

    #[async_trait]
    impl MessageHandler for PanicOnceHandler {
        fn processor_key(&self) -> &str {
            "fragile"
        }

        async fn handle(
            &self,
            message: InboundMessage,
            completion: &dyn CompletionSignal,
            _cancel: CancellationToken,
        ) -> Outcome {
            if !self.panicked.swap(true, Ordering::SeqCst) {
                panic!("first message is poison");
            }
            let correlation_id = message.incoming_correlation_id().unwrap_or("none").to_string();
            completion.complete(&correlation_id, &Outcome::Consumed);
            Outcome::Consumed
        }
    }

    fn binding(key: &str, topic: &str, handler: Arc<dyn MessageHandler>) -> ConsumerBinding {
        binding_with_workers(key, topic, 3, handler)
    }

    fn binding_with_workers(
        key: &str,
        topic: &str,
        worker_count: usize,
        handler: Arc<dyn MessageHandler>,
    ) -> ConsumerBinding {
        ConsumerBinding::new(
            crate::config::ConsumerSpec {
                processor_key: key.to_string(),
                name: format!("consumer_{}", key),
                topic: topic.to_string(),
                group: format!("g_{}", key),
                worker_count,
                buffer_size: 4,
                auto_commit_interval: Duration::from_millis(5),
            },
            handler,
        )
    }

    #[tokio::test]
    async fn test_publish_to_unknown_topic_fails() {
        let broker = InMemoryBroker::new();

        let result = broker.publish("nowhere", InboundMessage::new(1u32)).await;

        assert_eq!(
            result,
            Err(TransportError::UnknownTopic {
                topic: "nowhere".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_every_group_receives_every_message() {
        let broker = InMemoryBroker::new();
        broker.create_topic("orders");
        let first = Arc::new(CountingHandler::new("a", false));
        let second = Arc::new(CountingHandler::new("b", false));
        let running = broker
            .start(
                &[
                    binding("a", "orders", first.clone()),
                    binding("b", "orders", second.clone()),
                ],
                CancellationToken::new(),
            )
            .unwrap();
        assert_eq!(running.task_count(), 8);

        for n in 0..5u32 {
            broker
                .publish("orders", InboundMessage::new(n).with_correlation_id(n.to_string()))
                .await
                .unwrap();
        }

        assert!(broker.wait_for_acks("g_a", 5, Duration::from_secs(2)).await);
        assert!(broker.wait_for_acks("g_b", 5, Duration::from_secs(2)).await);
        running.shutdown().await;

        assert_eq!(first.handled.load(Ordering::SeqCst), 5);
        assert_eq!(second.handled.load(Ordering::SeqCst), 5);
        assert_eq!(broker.committed("g_a"), 5);
        assert_eq!(broker.published("orders").len(), 5);
    }

    #[tokio::test]
    async fn test_failed_messages_are_still_acknowledged() {
        let broker = InMemoryBroker::new();
        broker.create_topic("orders");
        let handler = Arc::new(CountingHandler::new("a", true));
        let running = broker
            .start(&[binding("a", "orders", handler)], CancellationToken::new())
            .unwrap();

        broker
            .publish("orders", InboundMessage::new(1u32).with_correlation_id("c1"))
            .await
            .unwrap();

        assert!(broker.wait_for_acks("g_a", 1, Duration::from_secs(2)).await);
        running.shutdown().await;

        let records = broker.outcomes("g_a");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].correlation_id, "c1");
        assert!(records[0].failed);
    }

    #[tokio::test]
    async fn test_start_fails_without_spawning_on_unknown_topic() {
        let broker = InMemoryBroker::new();
        broker.create_topic("orders");
        let handler: Arc<dyn MessageHandler> = Arc::new(CountingHandler::new("a", false));

        let result = broker.start(
            &[
                binding("a", "orders", handler.clone()),
                binding("b", "missing", handler),
            ],
            CancellationToken::new(),
        );

        assert!(matches!(result, Err(TransportError::UnknownTopic { .. })));
        // the first binding's subscription was rolled back
        let retry = broker.start(
            &[binding("a", "orders", Arc::new(CountingHandler::new("a", false)))],
            CancellationToken::new(),
        );
        assert!(retry.is_ok());
    }

    #[tokio::test]
    async fn test_second_subscription_for_a_group_is_rejected() {
        let broker = InMemoryBroker::new();
        broker.create_topic("orders");
        let handler: Arc<dyn MessageHandler> = Arc::new(CountingHandler::new("a", false));
        let _running = broker
            .start(&[binding("a", "orders", handler.clone())], CancellationToken::new())
            .unwrap();

        let result = broker.start(&[binding("a", "orders", handler)], CancellationToken::new());

        assert_eq!(
            result.err(),
            Some(TransportError::AlreadySubscribed {
                topic: "orders".to_string(),
                group: "g_a".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_wait_for_acks_times_out() {
        let broker = InMemoryBroker::new();
        broker.create_topic("orders");
        let running = broker
            .start(
                &[binding("a", "orders", Arc::new(CountingHandler::new("a", false)))],
                CancellationToken::new(),
            )
            .unwrap();

        assert!(!broker.wait_for_acks("g_a", 1, Duration::from_millis(20)).await);
        assert!(!broker.wait_for_acks("unknown", 0, Duration::from_millis(20)).await);
        running.shutdown().await;
    }

    #[tokio::test]
    async fn test_provision_creates_topics_and_producers() {
        let config = Config::from_yaml_str(
            r#"
processors:
  orders:
    brokers: ["b1:9092"]
    consumer_topic: orders
    producer_topic: receipts
    group_id: billing
health_check:
  producer_topic: health
"#,
        )
        .unwrap();
        let broker = InMemoryBroker::new();
        let mut builder = RuntimeBuilder::new(config);
        builder.add_consumer_producer::<u32, u32>("orders").unwrap();
        let runtime = builder.build(Arc::new(broker.clone())).unwrap();

        broker.provision(&runtime);

        assert_eq!(broker.topics(), vec!["health", "orders", "receipts"]);
        assert!(broker.producer("orders_receipts_producer").is_some());
        assert!(broker.producer("health-check-producer").is_some());
        assert!(broker.producer("other").is_none());

        let producer = broker.producer("orders_receipts_producer").unwrap();
        producer
            .produce("receipts", "k1", Arc::new(7u32))
            .await
            .unwrap();
        let published = broker.published("receipts");
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].message_key(), Some("k1"));
        assert_eq!(published[0].payload.downcast_ref::<u32>(), Some(&7));
    }

    #[tokio::test]
    async fn test_worker_survives_a_panicking_handler() {
        let broker = InMemoryBroker::new();
        broker.create_topic("orders");
        let handler = Arc::new(PanicOnceHandler {
            panicked: std::sync::atomic::AtomicBool::new(false),
        });
        let running = broker
            .start(
                &[binding_with_workers("a", "orders", 1, handler)],
                CancellationToken::new(),
            )
            .unwrap();

        for id in ["c1", "c2", "c3"] {
            broker
                .publish("orders", InboundMessage::new(1u32).with_correlation_id(id))
                .await
                .unwrap();
        }

        assert!(broker.wait_for_acks("g_a", 2, Duration::from_secs(2)).await);
        running.shutdown().await;

        let acknowledged: Vec<String> = broker
            .outcomes("g_a")
            .into_iter()
            .map(|r| r.correlation_id)
            .collect();
        assert_eq!(acknowledged, vec!["c2", "c3"]);
    }

    #[tokio::test]
    async fn test_topic_history_keeps_only_the_newest_messages() {
        let broker = InMemoryBroker::with_retention(3);
        broker.create_topic("orders");

        for n in 0..5u32 {
            broker
                .publish("orders", InboundMessage::new(n))
                .await
                .unwrap();
        }

        let retained: Vec<u32> = broker
            .published("orders")
            .iter()
            .filter_map(|m| m.payload.downcast_ref::<u32>().copied())
            .collect();
        assert_eq!(retained, vec![2, 3, 4]);
    }

    #[test]
    fn test_ack_records_are_capped_but_counts_are_not() {
        let tracker = AckTracker::new("g", 2);
        for id in ["c1", "c2", "c3"] {
            tracker.complete(id, &Outcome::Consumed);
        }

        let ids: Vec<String> = tracker.records().into_iter().map(|r| r.correlation_id).collect();
        assert_eq!(ids, vec!["c2", "c3"]);
        assert_eq!(tracker.acknowledged(), 3);
        assert_eq!(tracker.commit(), 3);
    }

    #[test]
    fn test_commit_reports_only_new_acknowledgments() {
        let tracker = AckTracker::new("g", 10);
        tracker.complete("c1", &Outcome::Consumed);
        tracker.complete("c2", &Outcome::Skipped);

        assert_eq!(tracker.commit(), 2);
        assert_eq!(tracker.commit(), 0);
        tracker.complete("c3", &Outcome::Consumed);
        assert_eq!(tracker.commit(), 1);
        assert_eq!(tracker.committed(), 3);
        assert_eq!(tracker.group(), "g");
    }
}
