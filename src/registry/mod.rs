// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Keyed processor registry.
//!
//! Registrations bind a processor key to its settings and execution mode.
//! Behaviours (transforming processors, consumer-only processors and validators)
//! are stored separately, keyed by processor key plus input and output type, so
//! several keys can share one input type without seeing each other's instances.
//!
//! The registry is populated during startup through `&mut self` and is then
//! frozen behind an `Arc`; every lookup after that is a read.
//!
//! # Example
//! ```
//! use keyed_stream_processor::config::ProcessorSettings;
//! use keyed_stream_processor::registry::{Mode, ProcessorRegistry};
//!
//! let settings = ProcessorSettings::new(
//!     "audit",
//!     vec!["localhost:9092".to_string()],
//!     "orders",
//!     "",
//!     "billing",
//! );
//!
//! let mut registry = ProcessorRegistry::new();
//! registry.register_consumer::<String>("audit", settings)?;
//!
//! assert_eq!(registry.get("audit").map(|r| r.mode()), Some(Mode::Consumer));
//! # Ok::<(), keyed_stream_processor::errors::RegistryError>(())
//! ```

mod provisioning;

pub use provisioning::ProvisioningPlan;

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::ProcessorSettings;
use crate::engine::{short_type_name, ProcessingPipeline};
use crate::errors::RegistryError;
use crate::observability::messages::registry::{
    BehaviourNotFound, DefaultValidatorInUse, ProcessorRegistered,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{
    ConsumerOnlyProcessor, MessageHandler, MessageProcessor, MessageValidator, ProducerAccessor,
};
use crate::validation::DefaultMessageValidator;

/// Execution mode of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Publishes only; no consumer is started.
    Producer,
    /// Consumes without producing output.
    Consumer,
    /// Consumes, transforms and publishes.
    ConsumerProducer,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Producer => "Producer",
            Mode::Consumer => "Consumer",
            Mode::ConsumerProducer => "ConsumerProducer",
        }
    }

    pub fn consumes(&self) -> bool {
        matches!(self, Mode::Consumer | Mode::ConsumerProducer)
    }

    pub fn produces(&self) -> bool {
        matches!(self, Mode::Producer | Mode::ConsumerProducer)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime identity of a message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: short_type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Builds the type-specialised handler for a registration once the registry is frozen.
pub type WireFn = Arc<
    dyn Fn(
            &ProcessorRegistry,
            &ProcessorRegistration,
            Arc<dyn ProducerAccessor>,
        ) -> Arc<dyn MessageHandler>
        + Send
        + Sync,
>;

/// Settings and behaviour wiring bound to one processor key.
pub struct ProcessorRegistration {
    key: String,
    settings: Arc<ProcessorSettings>,
    mode: Mode,
    input: TypeTag,
    output: TypeTag,
    wire: Option<WireFn>,
}

impl ProcessorRegistration {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn settings(&self) -> &Arc<ProcessorSettings> {
        &self.settings
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn input(&self) -> TypeTag {
        self.input
    }

    pub fn output(&self) -> TypeTag {
        self.output
    }

    pub fn producer_name(&self) -> String {
        self.settings.producer_name()
    }

    /// The handler a consumer loop invokes for this key; `None` for producer-only keys.
    pub fn build_handler(
        &self,
        registry: &ProcessorRegistry,
        producers: Arc<dyn ProducerAccessor>,
    ) -> Option<Arc<dyn MessageHandler>> {
        self.wire
            .as_ref()
            .map(|wire| wire(registry, self, producers))
    }
}

impl fmt::Debug for ProcessorRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorRegistration")
            .field("key", &self.key)
            .field("mode", &self.mode)
            .field("input", &self.input.name)
            .field("output", &self.output.name)
            .field("settings", &self.settings)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Behaviour {
    Processor,
    ConsumerOnly,
    Validator,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BehaviourKey {
    processor_key: String,
    behaviour: Behaviour,
    input: TypeId,
    output: TypeId,
}

impl BehaviourKey {
    fn new<I: Any, O: Any>(processor_key: &str, behaviour: Behaviour) -> Self {
        Self {
            processor_key: processor_key.to_string(),
            behaviour,
            input: TypeId::of::<I>(),
            output: TypeId::of::<O>(),
        }
    }
}

/// Registrations in insertion order plus the keyed behaviours they resolve.
#[derive(Default)]
pub struct ProcessorRegistry {
    registrations: Vec<ProcessorRegistration>,
    index: HashMap<String, usize>,
    behaviours: HashMap<BehaviourKey, Arc<dyn Any + Send + Sync>>,
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a registration, failing fast on a blank or duplicate key or a mode
    /// the settings cannot support.
    pub fn register(
        &mut self,
        key: &str,
        settings: impl Into<Arc<ProcessorSettings>>,
        mode: Mode,
        input: TypeTag,
        output: TypeTag,
        wire: Option<WireFn>,
    ) -> Result<&ProcessorRegistration, RegistryError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(RegistryError::EmptyKey);
        }
        if self.index.contains_key(key) {
            return Err(RegistryError::DuplicateKey {
                key: key.to_string(),
            });
        }

        let settings = settings.into();
        check_mode(key, &settings, mode)?;

        ProcessorRegistered {
            processor_key: key,
            mode: mode.as_str(),
            consumer_topic: settings.consumer_topic(),
            producer_topic: settings.producer_topic(),
        }
        .log();

        let position = self.registrations.len();
        self.registrations.push(ProcessorRegistration {
            key: key.to_string(),
            settings,
            mode,
            input,
            output,
            wire,
        });
        self.index.insert(key.to_string(), position);

        Ok(&self.registrations[position])
    }

    /// Register a key that consumes `I`, transforms it and publishes `O`.
    pub fn register_consumer_producer<I, O>(
        &mut self,
        key: &str,
        settings: impl Into<Arc<ProcessorSettings>>,
    ) -> Result<&ProcessorRegistration, RegistryError>
    where
        I: Send + Sync + 'static,
        O: Send + Sync + 'static,
    {
        let wire: WireFn = Arc::new(
            |registry: &ProcessorRegistry,
             registration: &ProcessorRegistration,
             producers: Arc<dyn ProducerAccessor>|
             -> Arc<dyn MessageHandler> {
                Arc::new(ProcessingPipeline::<I, O>::from_registry(
                    registry,
                    registration,
                    producers,
                ))
            },
        );

        self.register(
            key,
            settings,
            Mode::ConsumerProducer,
            TypeTag::of::<I>(),
            TypeTag::of::<O>(),
            Some(wire),
        )
    }

    /// Register a key that consumes `I` without producing output.
    pub fn register_consumer<I>(
        &mut self,
        key: &str,
        settings: impl Into<Arc<ProcessorSettings>>,
    ) -> Result<&ProcessorRegistration, RegistryError>
    where
        I: Send + Sync + 'static,
    {
        let wire: WireFn = Arc::new(
            |registry: &ProcessorRegistry,
             registration: &ProcessorRegistration,
             producers: Arc<dyn ProducerAccessor>|
             -> Arc<dyn MessageHandler> {
                Arc::new(ProcessingPipeline::<I, ()>::from_registry(
                    registry,
                    registration,
                    producers,
                ))
            },
        );

        self.register(
            key,
            settings,
            Mode::Consumer,
            TypeTag::of::<I>(),
            TypeTag::of::<()>(),
            Some(wire),
        )
    }

    /// Register a key that only publishes `O`; no consumer is started for it.
    pub fn register_producer<O>(
        &mut self,
        key: &str,
        settings: impl Into<Arc<ProcessorSettings>>,
    ) -> Result<&ProcessorRegistration, RegistryError>
    where
        O: Send + Sync + 'static,
    {
        self.register(
            key,
            settings,
            Mode::Producer,
            TypeTag::of::<()>(),
            TypeTag::of::<O>(),
            None,
        )
    }

    /// Key a transforming processor for `I -> O`. A later call for the same
    /// key and types replaces the earlier instance.
    pub fn add_processor<I, O>(
        &mut self,
        key: &str,
        processor: Arc<dyn MessageProcessor<I, O>>,
    ) -> Result<&mut Self, RegistryError>
    where
        I: Send + Sync + 'static,
        O: Send + 'static,
    {
        self.add_behaviour(BehaviourKey::new::<I, O>(key.trim(), Behaviour::Processor), processor)
    }

    pub fn add_consumer_only<I>(
        &mut self,
        key: &str,
        processor: Arc<dyn ConsumerOnlyProcessor<I>>,
    ) -> Result<&mut Self, RegistryError>
    where
        I: Send + Sync + 'static,
    {
        self.add_behaviour(
            BehaviourKey::new::<I, ()>(key.trim(), Behaviour::ConsumerOnly),
            processor,
        )
    }

    pub fn add_validator<I>(
        &mut self,
        key: &str,
        validator: Arc<dyn MessageValidator<I>>,
    ) -> Result<&mut Self, RegistryError>
    where
        I: Send + Sync + 'static,
    {
        self.add_behaviour(
            BehaviourKey::new::<I, ()>(key.trim(), Behaviour::Validator),
            validator,
        )
    }

    fn add_behaviour<T>(
        &mut self,
        key: BehaviourKey,
        behaviour: T,
    ) -> Result<&mut Self, RegistryError>
    where
        T: Any + Send + Sync,
    {
        if key.processor_key.is_empty() {
            return Err(RegistryError::EmptyKey);
        }
        self.behaviours.insert(key, Arc::new(behaviour));
        Ok(self)
    }

    fn lookup<T>(&self, key: &BehaviourKey) -> Option<T>
    where
        T: Any + Clone,
    {
        self.behaviours
            .get(key)
            .and_then(|stored| stored.downcast_ref::<T>())
            .cloned()
    }

    /// The transforming processor keyed for `I -> O`, if any.
    pub fn resolve_processor<I, O>(&self, key: &str) -> Option<Arc<dyn MessageProcessor<I, O>>>
    where
        I: Send + Sync + 'static,
        O: Send + 'static,
    {
        let found = self.lookup::<Arc<dyn MessageProcessor<I, O>>>(&BehaviourKey::new::<I, O>(
            key,
            Behaviour::Processor,
        ));
        if found.is_none() {
            BehaviourNotFound {
                processor_key: key,
                behaviour: "Processor",
            }
            .log();
        }
        found
    }

    pub fn resolve_consumer_only<I>(&self, key: &str) -> Option<Arc<dyn ConsumerOnlyProcessor<I>>>
    where
        I: Send + Sync + 'static,
    {
        let found = self.lookup::<Arc<dyn ConsumerOnlyProcessor<I>>>(&BehaviourKey::new::<I, ()>(
            key,
            Behaviour::ConsumerOnly,
        ));
        if found.is_none() {
            BehaviourNotFound {
                processor_key: key,
                behaviour: "Consumer-only processor",
            }
            .log();
        }
        found
    }

    /// The validator keyed for `I`, or the permissive default.
    pub fn resolve_validator<I>(&self, key: &str) -> Arc<dyn MessageValidator<I>>
    where
        I: Send + Sync + 'static,
    {
        match self.lookup::<Arc<dyn MessageValidator<I>>>(&BehaviourKey::new::<I, ()>(
            key,
            Behaviour::Validator,
        )) {
            Some(validator) => validator,
            None => {
                DefaultValidatorInUse {
                    processor_key: key,
                    message_type: short_type_name::<I>(),
                }
                .log();
                Arc::new(DefaultMessageValidator::<I>::new())
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ProcessorRegistration> {
        self.index
            .get(key)
            .map(|&position| &self.registrations[position])
    }

    /// All registrations in the order they were added.
    pub fn registrations(&self) -> std::slice::Iter<'_, ProcessorRegistration> {
        self.registrations.iter()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

fn check_mode(key: &str, settings: &ProcessorSettings, mode: Mode) -> Result<(), RegistryError> {
    let reason = match mode {
        Mode::Consumer if settings.is_producer_only() => Some("no consumer topic is configured"),
        Mode::Producer if settings.is_consumer_only() => Some("no producer topic is configured"),
        Mode::ConsumerProducer if settings.is_producer_only() => {
            Some("no consumer topic is configured")
        }
        Mode::ConsumerProducer if settings.is_consumer_only() => {
            Some("no producer topic is configured")
        }
        _ => None,
    };

    match reason {
        Some(reason) => Err(RegistryError::ModeMismatch {
            key: key.to_string(),
            mode,
            reason,
        }),
        None => Ok(()),
    }
}
