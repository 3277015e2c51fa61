// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::Context;
use std::env;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use keyed_stream_processor::backends::local::{
    ContentMsg, LocalBehaviourFactory, OrderMsg, ReceiptMsg,
};
use keyed_stream_processor::config::{Runtime, RuntimeBuilder};
use keyed_stream_processor::engine::InboundMessage;
use keyed_stream_processor::health::HealthChecker;
use keyed_stream_processor::transport::InMemoryBroker;

const DEFAULT_CONFIG: &str = "configs/pipeline-demo.yaml";
const ORDERS_KEY: &str = "orders";
const AUDIT_KEY: &str = "audit";
const ACK_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_file = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let start_time = Instant::now();

    println!("🚀 Keyed Stream Processor Demo");
    println!("═══════════════════════════════");
    println!("Config file: {}", config_file);
    println!();

    let mut builder = RuntimeBuilder::from_file(&config_file)
        .with_context(|| format!("loading {}", config_file))?;
    builder
        .add_consumer_producer::<OrderMsg, ReceiptMsg>(ORDERS_KEY)?
        .add_consumer::<ContentMsg>(AUDIT_KEY)?;

    for key in [ORDERS_KEY, AUDIT_KEY] {
        let behaviours = builder
            .resolver()
            .config()
            .processors
            .get(key)
            .map(|section| section.behaviours.clone())
            .unwrap_or_default();
        LocalBehaviourFactory::install_all(builder.registry_mut(), key, &behaviours)?;
        println!("🔧 {} behaviours: {:?}", key, behaviours);
    }

    let broker = InMemoryBroker::new();
    let runtime = builder.build(Arc::new(broker.clone()))?;
    broker.provision(&runtime);

    println!("📋 Topics: {:?}", runtime.plan().topics);
    println!("📡 Brokers: {:?}", runtime.plan().brokers);

    let cancel = CancellationToken::new();
    let running = broker.start(runtime.consumers(), cancel.clone())?;

    let health = runtime.health_check().cloned().map(|settings| {
        let interval = settings.interval;
        let checker = Arc::new(HealthChecker::new(settings, Arc::new(broker.clone())));
        let handle = Arc::clone(&checker).spawn(interval, cancel.clone());
        (checker, handle)
    });

    let orders_topic = consumer_topic(&runtime, ORDERS_KEY)?;
    let content_topic = consumer_topic(&runtime, AUDIT_KEY)?;

    let orders = [("A-100", 250), ("A-101", 0), ("", 75)];
    for (id, amount) in orders {
        let order = OrderMsg {
            id: id.to_string(),
            amount,
        };
        broker
            .publish(&orders_topic, InboundMessage::new(order).with_key(id))
            .await?;
    }

    let content = [
        ("C-1", "quarterly report attached"),
        ("C-2", "too short"),
        ("C-3", "another sufficiently long document"),
    ];
    for (id, text) in content {
        let message = ContentMsg {
            id: id.to_string(),
            content: text.to_string(),
        };
        broker
            .publish(&content_topic, InboundMessage::new(message).with_correlation_id(id))
            .await?;
    }

    report_key(&broker, &runtime, ORDERS_KEY, orders.len() as u64).await;
    report_key(&broker, &runtime, AUDIT_KEY, content.len() as u64).await;

    println!("\n🧾 Receipts:");
    let receipts_topic = runtime
        .registry()
        .get(ORDERS_KEY)
        .map(|registration| registration.settings().producer_topic().to_string())
        .unwrap_or_default();
    for message in broker.published(&receipts_topic) {
        if let Some(receipt) = message.payload.downcast_ref::<ReceiptMsg>() {
            println!(
                "   • {} → {} (key: {})",
                receipt.order_id,
                receipt.status,
                message.key.as_deref().unwrap_or("-")
            );
        }
    }

    if let Some((checker, _)) = &health {
        let report = checker.readiness().await;
        println!("\n🩺 Readiness:");
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    cancel.cancel();
    running.shutdown().await;
    if let Some((_, handle)) = health {
        handle.await.context("health checker task")?;
    }

    println!("\n⏱️  Total Time: {:?}", start_time.elapsed());
    println!("🎉 Demo complete!");
    Ok(())
}

fn consumer_topic(runtime: &Runtime, key: &str) -> anyhow::Result<String> {
    runtime
        .consumers()
        .iter()
        .find(|binding| binding.spec().processor_key == key)
        .map(|binding| binding.spec().topic.clone())
        .with_context(|| format!("no consumer registered for '{}'", key))
}

async fn report_key(broker: &InMemoryBroker, runtime: &Runtime, key: &str, expected: u64) {
    let Some(binding) = runtime
        .consumers()
        .iter()
        .find(|binding| binding.spec().processor_key == key)
    else {
        return;
    };
    let group = &binding.spec().group;

    if !broker.wait_for_acks(group, expected, ACK_TIMEOUT).await {
        println!(
            "\n⚠️  {}: only {} of {} messages acknowledged",
            key,
            broker.acknowledged(group),
            expected
        );
    }

    println!("\n📊 {} (group: {}):", key, group);
    for record in broker.outcomes(group) {
        let marker = if record.failed { "❌" } else { "✅" };
        println!("   {} {}: {}", marker, record.correlation_id, record.summary);
    }
}
