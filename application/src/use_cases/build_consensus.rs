//! Build Consensus use case
//!
//! One parallel round: fan the prompt out, group the responses by
//! similarity, and report the majority answer.

use crate::config::ConsensusOptions;
use crate::error::OrchestraError;
use crate::ports::provider::CompletionOptions;
use crate::registry::ProviderRegistry;
use crate::use_cases::fan_out::fan_out;
use orchestra_domain::{ConsensusMode, ConsensusResult, aggregate_responses};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Input for the BuildConsensus use case
#[derive(Debug, Clone)]
pub struct BuildConsensusInput {
    pub prompt: String,
    /// Explicit provider set; every registered provider when absent
    pub providers: Option<Vec<String>>,
    pub mode: ConsensusMode,
}

impl BuildConsensusInput {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            providers: None,
            mode: ConsensusMode::default(),
        }
    }

    pub fn from_options(prompt: impl Into<String>, options: &ConsensusOptions) -> Self {
        Self {
            prompt: prompt.into(),
            providers: options.providers.clone(),
            mode: options.mode.unwrap_or_default(),
        }
    }

    pub fn with_providers(mut self, providers: Vec<String>) -> Self {
        self.providers = Some(providers);
        self
    }
}

/// Use case for building a single-round consensus
pub struct BuildConsensusUseCase {
    registry: Arc<ProviderRegistry>,
}

impl BuildConsensusUseCase {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(
        &self,
        input: BuildConsensusInput,
    ) -> Result<ConsensusResult, OrchestraError> {
        let started = Instant::now();

        let participants = self.registry.resolve(input.providers.as_deref())?;
        info!("Building consensus across {} providers", participants.len());
        if input.mode != ConsensusMode::Majority {
            debug!(
                "Consensus mode '{}' requested; aggregating by lexical majority",
                input.mode
            );
        }

        let responses = fan_out(&participants, &input.prompt, &CompletionOptions::default()).await?;
        let result = aggregate_responses(responses)
            .ok_or(OrchestraError::NoProviders)?
            .with_total_time_ms(started.elapsed().as_millis() as u64);

        info!(
            "Consensus reached with {:.0}% agreement ({} dissenting)",
            result.agreement * 100.0,
            result.dissent_count()
        );
        Ok(result)
    }
}
