//! Orchestration facade
//!
//! [`Orchestra`] owns the static configuration, the provider registry and the
//! event bus. `consensus` and `debate` delegate to their use cases and
//! bracket them with start/complete events.
//!
//! Events are published synchronously, after the state change they report:
//!
//! | Operation | Events |
//! |-----------|--------|
//! | construction | `initialized` |
//! | `consensus` | `consensus:start`, `consensus:complete` |
//! | `debate` | `debate:start`, `debate:round` (per round), `debate:complete` |
//! | `add_provider` | `provider:added` |
//! | `remove_provider` | `provider:removed` |

use crate::config::{ConsensusOptions, DebateOptions, QueryOptions};
use crate::error::OrchestraError;
use crate::ports::event_listener::{EventBus, EventListener};
use crate::ports::provider::{Provider, StreamHandle};
use crate::ports::provider_factory::ProviderFactory;
use crate::registry::ProviderRegistry;
use crate::use_cases::build_consensus::{BuildConsensusInput, BuildConsensusUseCase};
use crate::use_cases::run_debate::{RunDebateInput, RunDebateUseCase};
use futures::FutureExt;
use futures::future::join_all;
use orchestra_domain::{
    ConsensusResult, DebateResult, OrchestraConfig, OrchestraEvent, ProviderConfig, Response,
};
use std::collections::BTreeMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub struct Orchestra {
    config: OrchestraConfig,
    registry: Arc<ProviderRegistry>,
    events: EventBus,
}

impl Orchestra {
    /// Build the facade and register every configured provider.
    pub fn new(
        config: OrchestraConfig,
        factory: Arc<dyn ProviderFactory>,
    ) -> Result<Self, OrchestraError> {
        Self::with_listeners(config, factory, Vec::new())
    }

    /// Like [`Orchestra::new`], with listeners that also receive
    /// `initialized`.
    pub fn with_listeners(
        config: OrchestraConfig,
        factory: Arc<dyn ProviderFactory>,
        listeners: Vec<Arc<dyn EventListener>>,
    ) -> Result<Self, OrchestraError> {
        config.validate()?;

        let registry = Arc::new(ProviderRegistry::new(factory));
        for (name, provider_config) in &config.providers {
            registry.register(name, provider_config)?;
        }

        let orchestra = Self {
            config,
            registry,
            events: EventBus::new(listeners),
        };

        info!(
            "Orchestra initialized with {} providers",
            orchestra.registry.len()
        );
        orchestra.events.publish(&OrchestraEvent::Initialized {
            providers: orchestra.registry.list(),
            default_provider: orchestra.config.default_provider.clone(),
        });

        Ok(orchestra)
    }

    pub fn subscribe(&self, listener: Arc<dyn EventListener>) {
        self.events.subscribe(listener);
    }

    /// Static configuration snapshot taken at construction
    pub fn config(&self) -> &OrchestraConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }

    /// Registered provider names in insertion order
    pub fn providers(&self) -> Vec<String> {
        self.registry.list()
    }

    /// Query a single provider: the one named in `options`, else the
    /// configured default, else the fallback name.
    pub async fn query(
        &self,
        prompt: &str,
        options: &QueryOptions,
    ) -> Result<Response, OrchestraError> {
        let (name, provider) = self.resolve_single(options)?;
        self.with_timeout(options.timeout, async move {
            let started = Instant::now();
            let mut response = provider
                .complete(prompt, &options.completion)
                .await
                .map_err(|source| OrchestraError::ProviderCall {
                    provider: name.clone(),
                    source,
                })?;
            if response.latency_ms.is_none() {
                response.latency_ms = Some(started.elapsed().as_millis() as u64);
            }
            info!("Query answered by {}", name);
            Ok(response)
        })
        .await
    }

    /// Stream from a single provider, resolved like [`Orchestra::query`].
    pub async fn stream(
        &self,
        prompt: &str,
        options: &QueryOptions,
    ) -> Result<StreamHandle, OrchestraError> {
        let (name, provider) = self.resolve_single(options)?;
        self.with_timeout(options.timeout, async move {
            provider
                .stream(prompt, &options.completion)
                .await
                .map_err(|source| OrchestraError::ProviderCall {
                    provider: name,
                    source,
                })
        })
        .await
    }

    pub async fn consensus(
        &self,
        prompt: &str,
        options: &ConsensusOptions,
    ) -> Result<ConsensusResult, OrchestraError> {
        self.events.publish(&OrchestraEvent::ConsensusStart {
            prompt: prompt.to_string(),
            providers: options.providers.clone(),
        });
        if options.weights.is_some() {
            info!("Provider weights supplied; they do not affect lexical grouping");
        }

        let use_case = BuildConsensusUseCase::new(Arc::clone(&self.registry));
        let input = BuildConsensusInput::from_options(prompt, options);
        let result = self
            .with_timeout(options.timeout, use_case.execute(input))
            .await?;

        self.events.publish(&OrchestraEvent::ConsensusComplete {
            result: result.clone(),
        });
        Ok(result)
    }

    pub async fn debate(
        &self,
        prompt: &str,
        options: &DebateOptions,
    ) -> Result<DebateResult, OrchestraError> {
        let threshold = options.threshold.unwrap_or_else(|| self.config.threshold());
        let max_rounds = options
            .max_rounds
            .unwrap_or_else(|| self.config.max_rounds());

        self.events.publish(&OrchestraEvent::DebateStart {
            prompt: prompt.to_string(),
            providers: options.providers.clone(),
            threshold,
            max_rounds,
        });

        let mut input = RunDebateInput::new(prompt)
            .with_threshold(threshold)
            .with_max_rounds(max_rounds);
        input.providers = options.providers.clone();

        let use_case = RunDebateUseCase::new(Arc::clone(&self.registry));
        let result = self
            .with_timeout(
                options.timeout,
                use_case.execute_with_progress(input, &self.events),
            )
            .await?;

        self.events.publish(&OrchestraEvent::DebateComplete {
            result: result.clone(),
        });
        Ok(result)
    }

    /// Build and register a provider from configuration.
    ///
    /// Mutates the registry only; [`Orchestra::config`] keeps the snapshot
    /// taken at construction.
    pub fn add_provider(&self, name: &str, config: &ProviderConfig) -> Result<(), OrchestraError> {
        self.registry.register(name, config)?;
        self.events.publish(&OrchestraEvent::ProviderAdded {
            name: name.to_string(),
        });
        Ok(())
    }

    /// Register an already built provider.
    pub fn add_provider_instance(&self, name: &str, provider: Arc<dyn Provider>) {
        self.registry.register_with(name, provider);
        self.events.publish(&OrchestraEvent::ProviderAdded {
            name: name.to_string(),
        });
    }

    pub fn remove_provider(&self, name: &str) {
        self.registry.remove(name);
        self.events.publish(&OrchestraEvent::ProviderRemoved {
            name: name.to_string(),
        });
    }

    /// Probe every registered provider.
    ///
    /// A probe that errors or panics marks only its own provider unhealthy.
    pub async fn health_check(&self) -> BTreeMap<String, bool> {
        let participants = self.registry.resolve(None).unwrap_or_default();

        let probes = participants.into_iter().map(|participant| async move {
            let healthy = match AssertUnwindSafe(participant.provider.health_check())
                .catch_unwind()
                .await
            {
                Ok(Ok(healthy)) => healthy,
                Ok(Err(e)) => {
                    warn!("Health probe for {} failed: {}", participant.name, e);
                    false
                }
                Err(_) => {
                    warn!("Health probe for {} panicked", participant.name);
                    false
                }
            };
            (participant.name, healthy)
        });

        join_all(probes).await.into_iter().collect()
    }

    fn resolve_single(
        &self,
        options: &QueryOptions,
    ) -> Result<(String, Arc<dyn Provider>), OrchestraError> {
        let name = options
            .completion
            .provider
            .as_deref()
            .unwrap_or_else(|| self.config.query_provider());
        self.registry
            .get(name)
            .map(|provider| (name.to_string(), provider))
            .ok_or_else(|| OrchestraError::ProviderNotFound(name.to_string()))
    }

    /// Race `operation` against the call's timeout, else the configured one.
    async fn with_timeout<T, F>(
        &self,
        timeout: Option<Duration>,
        operation: F,
    ) -> Result<T, OrchestraError>
    where
        F: Future<Output = Result<T, OrchestraError>>,
    {
        match timeout.or_else(|| self.config.timeout()) {
            Some(limit) => tokio::time::timeout(limit, operation)
                .await
                .map_err(|_| OrchestraError::Timeout(limit))?,
            None => operation.await,
        }
    }
}
