//! Options accepted by `query`, `consensus` and `debate`.
//!
//! Anything left unset falls back to the facade's [`OrchestraConfig`].
//!
//! [`OrchestraConfig`]: orchestra_domain::OrchestraConfig

use crate::ports::provider::CompletionOptions;
use orchestra_domain::ConsensusMode;
use std::collections::HashMap;
use std::time::Duration;

/// Options for a single-provider query
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Generation options; `completion.provider` selects the provider
    pub completion: CompletionOptions,
    pub timeout: Option<Duration>,
}

impl QueryOptions {
    pub fn for_provider(provider: impl Into<String>) -> Self {
        Self {
            completion: CompletionOptions::default().with_provider(provider),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Options for a consensus call
#[derive(Debug, Clone, Default)]
pub struct ConsensusOptions {
    /// Explicit provider set; every registered provider when absent
    pub providers: Option<Vec<String>>,
    /// Requested mode; aggregation is lexical majority for every mode
    pub mode: Option<ConsensusMode>,
    /// Per-provider weights; accepted but not applied
    pub weights: Option<HashMap<String, f64>>,
    pub timeout: Option<Duration>,
}

impl ConsensusOptions {
    pub fn with_providers<I, S>(mut self, providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.providers = Some(providers.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_mode(mut self, mode: ConsensusMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Options for a debate
#[derive(Debug, Clone, Default)]
pub struct DebateOptions {
    /// Explicit participant set; every registered provider when absent
    pub providers: Option<Vec<String>>,
    /// Agreement needed to stop early
    pub threshold: Option<f64>,
    pub max_rounds: Option<usize>,
    pub timeout: Option<Duration>,
}

impl DebateOptions {
    pub fn with_providers<I, S>(mut self, providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.providers = Some(providers.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
