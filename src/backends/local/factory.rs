// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use super::messages::{ContentMsg, OrderMsg, ReceiptMsg};
use super::processors::*;
use crate::errors::RegistryError;
use crate::registry::ProcessorRegistry;

/// Installs the sample behaviours into a registry by name.
pub struct LocalBehaviourFactory;

impl LocalBehaviourFactory {
    /// Key the named behaviour under `processor_key`.
    ///
    /// - "receipt_enricher" -> `ReceiptEnricher` (`OrderMsg -> ReceiptMsg`)
    /// - "min_content_length" -> `MinContentLengthValidator` for `ContentMsg`
    /// - "audit_consumer" -> `AuditConsumer` for `ContentMsg`
    pub fn install(
        registry: &mut ProcessorRegistry,
        processor_key: &str,
        name: &str,
    ) -> Result<(), RegistryError> {
        match name {
            "receipt_enricher" => {
                registry.add_processor::<OrderMsg, ReceiptMsg>(
                    processor_key,
                    Arc::new(ReceiptEnricher),
                )?;
            }
            "min_content_length" => {
                registry.add_validator::<ContentMsg>(
                    processor_key,
                    Arc::new(MinContentLengthValidator::default()),
                )?;
            }
            "audit_consumer" => {
                registry.add_consumer_only::<ContentMsg>(
                    processor_key,
                    Arc::new(AuditConsumer::default()),
                )?;
            }
            _ => {
                return Err(RegistryError::UnknownBehaviour {
                    name: name.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Install every named behaviour in order, stopping at the first unknown name.
    pub fn install_all(
        registry: &mut ProcessorRegistry,
        processor_key: &str,
        names: &[String],
    ) -> Result<(), RegistryError> {
        for name in names {
            Self::install(registry, processor_key, name)?;
        }
        Ok(())
    }

    pub fn list_available_behaviours() -> Vec<&'static str> {
        vec!["receipt_enricher", "min_content_length", "audit_consumer"]
    }

    pub fn is_behaviour_available(name: &str) -> bool {
        Self::list_available_behaviours().contains(&name)
    }
}
