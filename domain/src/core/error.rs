//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are configuration and invariant violations detected before any
/// provider is contacted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid configuration for provider '{name}': {reason}")]
    InvalidProviderConfig { name: String, reason: String },

    #[error("Consensus threshold must be between 0 and 1, got {0}")]
    InvalidThreshold(f64),

    #[error("Maximum debate rounds must be at least 1")]
    InvalidMaxRounds,

    #[error("Timeout cannot be 0")]
    InvalidTimeout,
}

impl DomainError {
    /// Shorthand for a provider configuration error
    pub fn provider_config(name: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::InvalidProviderConfig {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
