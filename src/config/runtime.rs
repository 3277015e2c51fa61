// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::config::validation::validate_producer_names;
use crate::config::{load_config, Config, HealthCheckSettings, ProcessorSettings, SettingsResolver};
use crate::errors::StartupError;
use crate::observability::messages::registry::RuntimeBuilt;
use crate::observability::messages::StructuredLog;
use crate::registry::{ProcessorRegistry, ProvisioningPlan};
use crate::traits::{MessageHandler, ProducerAccessor};

/// Runtime builder - binds processor keys to configuration and wires the
/// resulting registrations into consumer bindings.
///
/// Each `add_*` call resolves the key's settings from the configuration and
/// registers the key in the given mode. Behaviours are attached through
/// [`RuntimeBuilder::registry_mut`]. Nothing is started; [`Runtime`] only
/// describes what the transport has to provision and run.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use keyed_stream_processor::config::{Config, RuntimeBuilder};
/// use keyed_stream_processor::transport::InMemoryBroker;
///
/// let config = Config::from_yaml_str(r#"
/// processors:
///   audit:
///     brokers: ["localhost:9092"]
///     consumer_topic: orders
///     group_id: billing
/// health_check:
///   enabled: false
/// "#)?;
///
/// let mut builder = RuntimeBuilder::new(config);
/// builder.add_consumer::<String>("audit")?;
///
/// let broker = InMemoryBroker::new();
/// let runtime = builder.build(Arc::new(broker.clone()))?;
///
/// assert_eq!(runtime.consumers().len(), 1);
/// assert_eq!(runtime.consumers()[0].spec().group, "billing_audit");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct RuntimeBuilder {
    resolver: SettingsResolver,
    registry: ProcessorRegistry,
    health_check_enabled: bool,
}

impl RuntimeBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            resolver: SettingsResolver::new(config),
            registry: ProcessorRegistry::new(),
            health_check_enabled: true,
        }
    }

    /// Load a YAML or TOML configuration file and start a builder over it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StartupError> {
        Ok(Self::new(load_config(path)?))
    }

    pub fn resolver(&self) -> &SettingsResolver {
        &self.resolver
    }

    pub fn registry(&self) -> &ProcessorRegistry {
        &self.registry
    }

    /// Attach behaviours before the registry is frozen by [`RuntimeBuilder::build`].
    pub fn registry_mut(&mut self) -> &mut ProcessorRegistry {
        &mut self.registry
    }

    /// Consume `I` from the key's consumer topic, transform and publish `O`.
    pub fn add_consumer_producer<I, O>(&mut self, key: &str) -> Result<&mut Self, StartupError>
    where
        I: Send + Sync + 'static,
        O: Send + Sync + 'static,
    {
        let key = key.trim();
        let settings = self.resolver.resolve(key)?;
        self.registry.register_consumer_producer::<I, O>(key, settings)?;
        Ok(self)
    }

    /// Consume `I` from the key's consumer topic without publishing.
    pub fn add_consumer<I>(&mut self, key: &str) -> Result<&mut Self, StartupError>
    where
        I: Send + Sync + 'static,
    {
        let key = key.trim();
        let settings = self.resolver.resolve(key)?;
        self.registry.register_consumer::<I>(key, settings)?;
        Ok(self)
    }

    /// Publish `O` to the key's producer topic. No consumer is started.
    pub fn add_producer<O>(&mut self, key: &str) -> Result<&mut Self, StartupError>
    where
        O: Send + Sync + 'static,
    {
        let key = key.trim();
        let settings = self.resolver.resolve(key)?;
        self.registry.register_producer::<O>(key, settings)?;
        Ok(self)
    }

    /// Leave the health-check topic and producer out of the runtime even when
    /// the configuration enables them.
    pub fn disable_health_check(&mut self) -> &mut Self {
        self.health_check_enabled = false;
        self
    }

    /// Validate the registrations, freeze the registry and wire one handler
    /// per consuming registration.
    ///
    /// `producers` is captured by every handler; producers are looked up by
    /// name when a message is published, so the accessor may be populated
    /// after this call.
    pub fn build(self, producers: Arc<dyn ProducerAccessor>) -> Result<Runtime, StartupError> {
        let health_check = if self.health_check_enabled {
            self.resolver.health_check()?
        } else {
            None
        };

        validate_producer_names(self.registry.registrations(), health_check.as_ref())?;

        let plan = ProvisioningPlan::from_registrations(
            self.registry.registrations(),
            health_check.as_ref(),
        );

        let registry = Arc::new(self.registry);

        let consumers: Vec<ConsumerBinding> = registry
            .registrations()
            .filter_map(|registration| {
                registration
                    .build_handler(&registry, Arc::clone(&producers))
                    .map(|handler| ConsumerBinding {
                        spec: ConsumerSpec::from_settings(registration.settings()),
                        handler,
                    })
            })
            .collect();

        let mut seen = HashSet::new();
        let mut producer_specs: Vec<ProducerSpec> = registry
            .registrations()
            .filter(|registration| registration.mode().produces())
            .map(|registration| ProducerSpec {
                name: registration.producer_name(),
                default_topic: registration.settings().producer_topic().to_string(),
            })
            .filter(|spec| seen.insert(spec.name.clone()))
            .collect();

        if let Some(health) = &health_check {
            if seen.insert(health.producer_name.clone()) {
                producer_specs.push(ProducerSpec {
                    name: health.producer_name.clone(),
                    default_topic: health.producer_topic.clone(),
                });
            }
        }

        RuntimeBuilt {
            consumer_count: consumers.len(),
            producer_count: producer_specs.len(),
            topic_count: plan.topics.len(),
            broker_count: plan.brokers.len(),
        }
        .log();

        Ok(Runtime {
            plan,
            consumers,
            producers: producer_specs,
            health_check,
            registry,
        })
    }
}

/// Everything a transport needs to serve the registered keys.
pub struct Runtime {
    plan: ProvisioningPlan,
    consumers: Vec<ConsumerBinding>,
    producers: Vec<ProducerSpec>,
    health_check: Option<HealthCheckSettings>,
    registry: Arc<ProcessorRegistry>,
}

impl Runtime {
    pub fn plan(&self) -> &ProvisioningPlan {
        &self.plan
    }

    pub fn consumers(&self) -> &[ConsumerBinding] {
        &self.consumers
    }

    pub fn producers(&self) -> &[ProducerSpec] {
        &self.producers
    }

    pub fn health_check(&self) -> Option<&HealthCheckSettings> {
        self.health_check.as_ref()
    }

    pub fn registry(&self) -> &Arc<ProcessorRegistry> {
        &self.registry
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("plan", &self.plan)
            .field("consumers", &self.consumers)
            .field("producers", &self.producers)
            .field("health_check", &self.health_check)
            .finish()
    }
}

/// Consumer identity and tuning for one consuming key.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumerSpec {
    pub processor_key: String,
    pub name: String,
    pub topic: String,
    pub group: String,
    pub worker_count: usize,
    pub buffer_size: usize,
    pub auto_commit_interval: Duration,
}

impl ConsumerSpec {
    pub fn from_settings(settings: &ProcessorSettings) -> Self {
        Self {
            processor_key: settings.processor_key().to_string(),
            name: settings.consumer_name(),
            topic: settings.consumer_topic().to_string(),
            group: settings.consumer_group(),
            worker_count: settings.worker_count(),
            buffer_size: settings.buffer_size(),
            auto_commit_interval: settings.auto_commit_interval(),
        }
    }
}

/// A consumer spec paired with the handler its messages are delivered to.
#[derive(Clone)]
pub struct ConsumerBinding {
    spec: ConsumerSpec,
    handler: Arc<dyn MessageHandler>,
}

impl ConsumerBinding {
    pub fn new(spec: ConsumerSpec, handler: Arc<dyn MessageHandler>) -> Self {
        Self { spec, handler }
    }

    pub fn spec(&self) -> &ConsumerSpec {
        &self.spec
    }

    pub fn handler(&self) -> &Arc<dyn MessageHandler> {
        &self.handler
    }
}

impl fmt::Debug for ConsumerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsumerBinding")
            .field("spec", &self.spec)
            .field("handler", &self.handler.processor_key())
            .finish()
    }
}

/// A named producer and the topic it was configured for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducerSpec {
    pub name: String,
    pub default_topic: String,
}
