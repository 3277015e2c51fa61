// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::Level;
use uuid::Uuid;

use crate::config::ProcessorSettings;
use crate::engine::message::{short_type_name, InboundMessage, Outcome, Stage};
use crate::errors::FrameworkError;
use crate::observability::messages::pipeline::{
    ConsumerOnlyProcessorMissing, MessageConsumed, MessagePublished, MessageReceived,
    PayloadTypeMismatch, ProcessingFailed, TransformingProcessorMissing, ValidationFailed,
};
use crate::observability::LogContext;
use crate::registry::{Mode, ProcessorRegistration, ProcessorRegistry};
use crate::traits::{
    CompletionSignal, ConsumerOnlyProcessor, MessageHandler, MessageProcessor, MessageValidator,
    ProducerAccessor,
};

const OPERATION: &str = "ProcessMessage";

/// Per-message state machine for one processor key.
///
/// Behaviours are resolved from the registry once, when the pipeline is built,
/// and the settings are captured by value. Every call to [`MessageHandler::handle`]
/// ends by signalling completion exactly once, whatever happened to the message.
pub struct ProcessingPipeline<I, O> {
    processor_key: String,
    mode: Mode,
    settings: Arc<ProcessorSettings>,
    validator: Arc<dyn MessageValidator<I>>,
    processor: Option<Arc<dyn MessageProcessor<I, O>>>,
    consumer_only: Option<Arc<dyn ConsumerOnlyProcessor<I>>>,
    producers: Arc<dyn ProducerAccessor>,
}

impl<I, O> ProcessingPipeline<I, O>
where
    I: Send + Sync + 'static,
    O: Send + Sync + 'static,
{
    /// Resolve the validator and the behaviour matching the registration's mode.
    pub fn from_registry(
        registry: &ProcessorRegistry,
        registration: &ProcessorRegistration,
        producers: Arc<dyn ProducerAccessor>,
    ) -> Self {
        let key = registration.key();
        let (processor, consumer_only) = match registration.mode() {
            Mode::ConsumerProducer => (registry.resolve_processor::<I, O>(key), None),
            Mode::Consumer => (None, registry.resolve_consumer_only::<I>(key)),
            Mode::Producer => (None, None),
        };

        Self {
            processor_key: key.to_string(),
            mode: registration.mode(),
            settings: Arc::clone(registration.settings()),
            validator: registry.resolve_validator::<I>(key),
            processor,
            consumer_only,
            producers,
        }
    }

    fn message_type(&self) -> &'static str {
        short_type_name::<I>()
    }

    /// Run `future` unless the token fires first. A panic inside it becomes a
    /// processing failure for this message only.
    async fn until_cancelled<F: Future>(
        &self,
        cancel: &CancellationToken,
        correlation_id: &str,
        stage: &str,
        future: F,
    ) -> Result<F::Output, FrameworkError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FrameworkError::cancelled(
                self.message_type(),
                correlation_id,
                stage,
            )),
            output = AssertUnwindSafe(future).catch_unwind() => output.map_err(|panic| {
                FrameworkError::panicked(
                    self.message_type(),
                    correlation_id,
                    stage,
                    &panic_message(&*panic),
                )
            }),
        }
    }

    async fn run(
        &self,
        message: &InboundMessage,
        context: &mut LogContext,
        stage: &mut Stage,
        cancel: &CancellationToken,
    ) -> Result<Outcome, FrameworkError> {
        let correlation_id = context.correlation_id().to_string();
        let payload: &(dyn Any + Send + Sync) = &*message.payload;

        let Some(input) = payload.downcast_ref::<I>() else {
            return Err(FrameworkError::Serialization {
                data_type: self.message_type(),
                correlation_id,
                is_encoding_error: false,
                message: PayloadTypeMismatch {
                    processor_key: &self.processor_key,
                    expected_type: self.message_type(),
                }
                .to_string(),
            });
        };
        *stage = Stage::TypeChecked;

        let valid = self
            .until_cancelled(
                cancel,
                &correlation_id,
                "validation",
                self.validator.validate(input, &correlation_id),
            )
            .await?;
        if !valid {
            let errors = self
                .until_cancelled(
                    cancel,
                    &correlation_id,
                    "validation",
                    self.validator.errors(input, &correlation_id),
                )
                .await?;
            context.add_property("validation_error_count", errors.len());
            return Err(FrameworkError::Validation {
                message: ValidationFailed {
                    message_type: self.message_type(),
                    errors: &errors,
                }
                .to_string(),
                correlation_id,
                errors,
            });
        }
        *stage = Stage::Validated;

        match self.mode {
            Mode::Consumer => self.consume(input, context, stage, cancel).await,
            Mode::ConsumerProducer => {
                self.transform_and_publish(input, message, context, stage, cancel)
                    .await
            }
            Mode::Producer => Err(FrameworkError::Processing {
                message_type: self.message_type(),
                correlation_id,
                message: format!(
                    "Processor '{}' is registered as producer-only and cannot consume",
                    self.processor_key
                ),
                source: None,
            }),
        }
    }

    async fn consume(
        &self,
        input: &I,
        context: &mut LogContext,
        stage: &mut Stage,
        cancel: &CancellationToken,
    ) -> Result<Outcome, FrameworkError> {
        let Some(consumer) = &self.consumer_only else {
            context.emit(
                Level::INFO,
                ConsumerOnlyProcessorMissing {
                    processor_key: &self.processor_key,
                    message_type: self.message_type(),
                },
            );
            return Ok(Outcome::Skipped);
        };

        let correlation_id = context.correlation_id().to_string();
        self.until_cancelled(
            cancel,
            &correlation_id,
            "consume",
            consumer.consume(input, &correlation_id),
        )
        .await?
        .map_err(|error| {
            FrameworkError::processing(
                self.message_type(),
                &correlation_id,
                format!("Error processing message in '{}'", self.processor_key),
                error,
            )
        })?;
        *stage = Stage::ConsumeOnlyExecuted;

        context.emit(
            Level::INFO,
            MessageConsumed {
                processor_key: &self.processor_key,
            },
        );
        Ok(Outcome::Consumed)
    }

    async fn transform_and_publish(
        &self,
        input: &I,
        message: &InboundMessage,
        context: &mut LogContext,
        stage: &mut Stage,
        cancel: &CancellationToken,
    ) -> Result<Outcome, FrameworkError> {
        let Some(processor) = &self.processor else {
            context.emit(
                Level::INFO,
                TransformingProcessorMissing {
                    processor_key: &self.processor_key,
                    input_type: self.message_type(),
                    output_type: short_type_name::<O>(),
                },
            );
            return Ok(Outcome::Skipped);
        };

        let correlation_id = context.correlation_id().to_string();
        let output = self
            .until_cancelled(
                cancel,
                &correlation_id,
                "process",
                processor.process(input, &correlation_id),
            )
            .await?
            .map_err(|error| {
                FrameworkError::processing(
                    self.message_type(),
                    &correlation_id,
                    format!("Error processing message in '{}'", self.processor_key),
                    error,
                )
            })?;
        *stage = Stage::TransformExecuted;

        let producer_name = self.settings.producer_name();
        let topic = self.settings.producer_topic();
        let Some(producer) = self.producers.producer(&producer_name) else {
            return Err(FrameworkError::Connection {
                brokers: self.settings.brokers().to_vec(),
                topic: topic.to_string(),
                correlation_id,
                message: format!("Producer '{}' not found", producer_name),
            });
        };

        let key = message
            .message_key()
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        context.restart_timer();
        self.until_cancelled(
            cancel,
            &correlation_id,
            "publish",
            producer.produce(topic, &key, Arc::new(output)),
        )
        .await?
        .map_err(|error| {
            FrameworkError::processing(
                self.message_type(),
                &correlation_id,
                format!("Failed to publish to topic '{}'", topic),
                error,
            )
        })?;
        *stage = Stage::Published;

        context.add_property("producer_topic", topic);
        context.log_performance("Publish");
        context.emit(
            Level::INFO,
            MessagePublished {
                topic,
                producer_name: &producer_name,
                message_key: &key,
            },
        );

        Ok(Outcome::Published {
            topic: topic.to_string(),
            key,
        })
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}

#[async_trait]
impl<I, O> MessageHandler for ProcessingPipeline<I, O>
where
    I: Send + Sync + 'static,
    O: Send + Sync + 'static,
{
    fn processor_key(&self) -> &str {
        &self.processor_key
    }

    async fn handle(
        &self,
        message: InboundMessage,
        completion: &dyn CompletionSignal,
        cancel: CancellationToken,
    ) -> Outcome {
        let mut context = LogContext::start(
            message.incoming_correlation_id(),
            self.message_type(),
            OPERATION,
        );
        context
            .add_property("processor_key", self.processor_key.as_str())
            .add_property("mode", self.mode.as_str())
            .add_property("consumer_topic", self.settings.consumer_topic());

        context.emit(
            Level::DEBUG,
            MessageReceived {
                processor_key: &self.processor_key,
                message_type: self.message_type(),
            },
        );

        let mut stage = Stage::Received;
        let outcome = match self.run(&message, &mut context, &mut stage, &cancel).await {
            Ok(outcome) => outcome,
            Err(error) => {
                context
                    .add_property("error_kind", error.kind())
                    .add_property("stage", stage.to_string());
                context.emit(
                    error.level(),
                    ProcessingFailed {
                        processor_key: &self.processor_key,
                        error: &error,
                    },
                );
                Outcome::Failed { stage, error }
            }
        };

        completion.complete(context.correlation_id(), &outcome);
        outcome
    }
}
