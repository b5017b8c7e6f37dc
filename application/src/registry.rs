//! Provider registry
//!
//! Owns the mapping from provider name to live provider. Iteration follows
//! insertion order, and that order is the default provider set for
//! consensus and debate.

use crate::error::OrchestraError;
use crate::ports::provider::Provider;
use crate::ports::provider_factory::ProviderFactory;
use orchestra_domain::ProviderConfig;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// A named provider handle resolved for one operation
#[derive(Clone)]
pub struct Participant {
    pub name: String,
    pub provider: Arc<dyn Provider>,
}

impl std::fmt::Debug for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Participant")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Registry of live providers
///
/// Mutations are administrative and infrequent; each one is a single
/// atomic update of the entry list.
pub struct ProviderRegistry {
    factory: Arc<dyn ProviderFactory>,
    entries: RwLock<Vec<Participant>>,
}

impl ProviderRegistry {
    pub fn new(factory: Arc<dyn ProviderFactory>) -> Self {
        Self {
            factory,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Build a provider from `config` and store it under `name`.
    ///
    /// An existing entry with the same name is replaced (it keeps its
    /// position in the listing).
    pub fn register(&self, name: &str, config: &ProviderConfig) -> Result<(), OrchestraError> {
        config.validate(name)?;
        let provider = self.factory.create(name, config)?;
        self.register_with(name, provider);
        Ok(())
    }

    /// Store an already built provider under `name`.
    pub fn register_with(&self, name: impl Into<String>, provider: Arc<dyn Provider>) {
        let name = name.into();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = entries.iter_mut().find(|e| e.name == name) {
            debug!("Replacing provider {}", name);
            entry.provider = provider;
        } else {
            info!("Registered provider {}", name);
            entries.push(Participant { name, provider });
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|e| e.name == name)
            .map(|e| Arc::clone(&e.provider))
    }

    /// Remove `name`; returns whether an entry existed.
    ///
    /// Responses the provider already produced are unaffected.
    pub fn remove(&self, name: &str) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|e| e.name != name);
        let removed = entries.len() != before;
        if removed {
            info!("Removed provider {}", name);
        }
        removed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered names in insertion order
    pub fn list(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve the provider set for one operation.
    ///
    /// Uses `names` when given (in that order), otherwise every registered
    /// provider. Fails on an unknown name or an empty result.
    pub fn resolve(&self, names: Option<&[String]>) -> Result<Vec<Participant>, OrchestraError> {
        let participants = match names {
            Some(names) => names
                .iter()
                .map(|name| {
                    self.get(name)
                        .map(|provider| Participant {
                            name: name.clone(),
                            provider,
                        })
                        .ok_or_else(|| OrchestraError::ProviderNotFound(name.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => self
                .entries
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        };

        if participants.is_empty() {
            return Err(OrchestraError::NoProviders);
        }
        Ok(participants)
    }
}
