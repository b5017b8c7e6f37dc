//! Errors surfaced by the orchestration use cases and facade

use crate::ports::provider::ProviderError;
use orchestra_domain::DomainError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchestraError {
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("No providers available")]
    NoProviders,

    #[error("Provider '{provider}' failed: {source}")]
    ProviderCall {
        provider: String,
        #[source]
        source: ProviderError,
    },

    #[error("Operation timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Configuration error: {0}")]
    Config(#[from] DomainError),
}

impl OrchestraError {
    /// Name of the provider whose call failed, if this is a call failure.
    pub fn failed_provider(&self) -> Option<&str> {
        match self {
            OrchestraError::ProviderCall { provider, .. } => Some(provider),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, OrchestraError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_call_display_names_provider() {
        let error = OrchestraError::ProviderCall {
            provider: "anthropic".into(),
            source: ProviderError::Timeout,
        };
        assert_eq!(error.to_string(), "Provider 'anthropic' failed: Timeout");
        assert_eq!(error.failed_provider(), Some("anthropic"));
    }

    #[test]
    fn test_timeout_display() {
        let error = OrchestraError::Timeout(Duration::from_millis(1500));
        assert_eq!(error.to_string(), "Operation timed out after 1500ms");
        assert!(error.is_timeout());
    }
}
