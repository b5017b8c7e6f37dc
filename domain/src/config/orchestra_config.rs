//! Process-wide orchestration settings.

use super::provider_config::ProviderConfig;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Debate agreement threshold used when none is configured
pub const DEFAULT_CONSENSUS_THRESHOLD: f64 = 0.7;

/// Debate round budget used when none is configured
pub const DEFAULT_MAX_DEBATE_ROUNDS: usize = 3;

/// Provider queried when neither the call nor the config names one
pub const FALLBACK_PROVIDER: &str = "openai";

/// Orchestration configuration
///
/// Providers are keyed by name and registered in name order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestraConfig {
    pub providers: BTreeMap<String, ProviderConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_provider: Option<String>,
    /// Debate agreement threshold (0-1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consensus_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_debate_rounds: Option<usize>,
    /// Caller-level timeout for whole operations, in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    /// Reserved; responses are never cached
    pub cache: bool,
}

impl OrchestraConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, name: impl Into<String>, config: ProviderConfig) -> Self {
        self.providers.insert(name.into(), config);
        self
    }

    pub fn with_default_provider(mut self, name: impl Into<String>) -> Self {
        self.default_provider = Some(name.into());
        self
    }

    pub fn with_consensus_threshold(mut self, threshold: f64) -> Self {
        self.consensus_threshold = Some(threshold);
        self
    }

    pub fn with_max_debate_rounds(mut self, rounds: usize) -> Self {
        self.max_debate_rounds = Some(rounds);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    pub fn threshold(&self) -> f64 {
        self.consensus_threshold
            .unwrap_or(DEFAULT_CONSENSUS_THRESHOLD)
    }

    pub fn max_rounds(&self) -> usize {
        self.max_debate_rounds.unwrap_or(DEFAULT_MAX_DEBATE_ROUNDS)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Provider name that `query` falls back to.
    pub fn query_provider(&self) -> &str {
        self.default_provider.as_deref().unwrap_or(FALLBACK_PROVIDER)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(threshold) = self.consensus_threshold {
            validate_threshold(threshold)?;
        }
        if self.max_debate_rounds == Some(0) {
            return Err(DomainError::InvalidMaxRounds);
        }
        if self.timeout_ms == Some(0) {
            return Err(DomainError::InvalidTimeout);
        }
        for (name, provider) in &self.providers {
            provider.validate(name)?;
        }
        Ok(())
    }
}

/// A threshold must be a number in [0, 1].
pub fn validate_threshold(threshold: f64) -> Result<(), DomainError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(DomainError::InvalidThreshold(threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OrchestraConfig::new();
        assert_eq!(config.threshold(), 0.7);
        assert_eq!(config.max_rounds(), 3);
        assert!(config.timeout().is_none());
        assert_eq!(config.query_provider(), "openai");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_configured_values_override_defaults() {
        let config = OrchestraConfig::new()
            .with_consensus_threshold(0.9)
            .with_max_debate_rounds(5)
            .with_timeout(Duration::from_secs(2))
            .with_default_provider("anthropic");
        assert_eq!(config.threshold(), 0.9);
        assert_eq!(config.max_rounds(), 5);
        assert_eq!(config.timeout(), Some(Duration::from_millis(2000)));
        assert_eq!(config.query_provider(), "anthropic");
    }

    #[test]
    fn test_validate_rejects_out_of_range_threshold() {
        let config = OrchestraConfig::new().with_consensus_threshold(1.2);
        assert_eq!(config.validate(), Err(DomainError::InvalidThreshold(1.2)));
        assert!(validate_threshold(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_rounds_and_timeout() {
        assert_eq!(
            OrchestraConfig::new().with_max_debate_rounds(0).validate(),
            Err(DomainError::InvalidMaxRounds)
        );
        let config = OrchestraConfig {
            timeout_ms: Some(0),
            ..OrchestraConfig::default()
        };
        assert_eq!(config.validate(), Err(DomainError::InvalidTimeout));
    }

    #[test]
    fn test_validate_checks_each_provider() {
        let config =
            OrchestraConfig::new().with_provider("mock", ProviderConfig::scripted(Vec::<String>::new()));
        assert!(matches!(
            config.validate(),
            Err(DomainError::InvalidProviderConfig { .. })
        ));
    }
}
